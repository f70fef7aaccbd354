/// Device error statistics and repeated-message tracking

use colored::*;
use rustc_hash::FxHashMap;

use crate::context::Context;
use crate::device::DeviceErrorCode;

/// Device error counters of one context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorStats {
    pub invalid_enum: u32,
    pub invalid_value: u32,
    pub invalid_operation: u32,
    pub invalid_framebuffer_operation: u32,
    pub out_of_memory: u32,
    pub stack_underflow: u32,
    pub stack_overflow: u32,
    pub unknown: u32,
}

impl ErrorStats {
    pub fn total(&self) -> u32 {
        self.invalid_enum
            + self.invalid_value
            + self.invalid_operation
            + self.invalid_framebuffer_operation
            + self.out_of_memory
            + self.stack_underflow
            + self.stack_overflow
            + self.unknown
    }

    fn increment(&mut self, code: DeviceErrorCode) {
        let counter = match code {
            DeviceErrorCode::InvalidEnum => &mut self.invalid_enum,
            DeviceErrorCode::InvalidValue => &mut self.invalid_value,
            DeviceErrorCode::InvalidOperation => &mut self.invalid_operation,
            DeviceErrorCode::InvalidFramebufferOperation => &mut self.invalid_framebuffer_operation,
            DeviceErrorCode::OutOfMemory => &mut self.out_of_memory,
            DeviceErrorCode::StackUnderflow => &mut self.stack_underflow,
            DeviceErrorCode::StackOverflow => &mut self.stack_overflow,
            DeviceErrorCode::Unknown(_) => &mut self.unknown,
        };
        *counter += 1;
    }
}

/// Counts polled errors and groups identical messages
#[derive(Debug, Default)]
pub(crate) struct ErrorTracker {
    stats: ErrorStats,
    messages: FxHashMap<String, u32>,
}

impl ErrorTracker {
    /// Record one polled error; returns how many times this exact message was seen
    pub(crate) fn record(&mut self, code: DeviceErrorCode, message: &str) -> u32 {
        self.stats.increment(code);
        let count = self.messages.entry(message.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub(crate) fn stats(&self) -> ErrorStats {
        self.stats
    }

    /// Number of distinct messages seen more than once
    pub(crate) fn repeated_messages(&self) -> usize {
        self.messages.values().filter(|&&count| count > 1).count()
    }

    pub(crate) fn reset(&mut self) {
        self.stats = ErrorStats::default();
        self.messages.clear();
    }
}

/// Print the device error statistics of `ctx` to stdout
pub fn print_error_stats_report(ctx: &Context) {
    let stats = ctx.error_stats();

    if stats.total() == 0 {
        println!("\n{}", "✓ No device errors".green().bold());
        return;
    }

    println!("\n{}", format!("=== Device Error Report ({}) ===", ctx.config().label).bright_blue().bold());

    let rows = [
        ("INVALID_ENUM:", stats.invalid_enum),
        ("INVALID_VALUE:", stats.invalid_value),
        ("INVALID_OPERATION:", stats.invalid_operation),
        ("INVALID_FRAMEBUFFER_OPERATION:", stats.invalid_framebuffer_operation),
        ("OUT_OF_MEMORY:", stats.out_of_memory),
        ("STACK_UNDERFLOW:", stats.stack_underflow),
        ("STACK_OVERFLOW:", stats.stack_overflow),
        ("UNKNOWN:", stats.unknown),
    ];
    for (label, count) in rows {
        if count > 0 {
            println!("  {} {}", label.red().bold(), count);
        }
    }

    println!("  {} {}", "Total:".white().bold(), stats.total());

    let repeated = ctx.repeated_error_messages();
    if repeated > 0 {
        println!("\n  {} {} message(s) appeared multiple times", "ℹ".cyan(), repeated);
    }

    println!("{}\n", "================================".bright_blue().bold());
}

/*!
# GpuWard

Safe ownership and usage checking for stateful, handle-based graphics device APIs.

Device objects (buffers, shader stages, linked programs) are wrapped in single-owner
types that release their handle on drop and refuse every call the device would
treat as illegal: incompatible mapping and storage flags, range violations, calls
made in the wrong lifecycle phase, and uniform writes whose shape does not match
the declaration reflected from the linked program.

## Architecture

- **Device**: trait over the raw device API (one method per primitive)
- **Context**: a device plus its runtime configuration, shared by every resource
- **Buffer**: device memory with upload, range I/O and mapping state machine
- **ShaderStage**: one compilable pipeline stage
- **Program**: stage attachment, linking and type-checked uniform binding
- **UniformReflector**: builds the name/location index of active uniforms

Backend crates provide concrete `Device` implementations. `MockDevice` is a
software device that needs no GPU.
*/

// Internal modules
mod error;
mod runtime;
mod debug;
pub mod log;
pub mod device;
pub mod flags;
pub mod uniform;
pub mod reflection;
pub mod context;
pub mod buffer;
pub mod shader;
pub mod program;
pub mod surface;

// Main ward namespace module
pub mod ward {
    // Error types
    pub use crate::error::{Error, ErrorCategory, Result};

    // Logging facade
    pub use crate::runtime::Ward;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, MemoryLogger};
    }

    // Device boundary
    pub mod device {
        pub use crate::device::*;
    }

    pub use crate::context::{Context, Config};
    pub use crate::debug::{ErrorStats, print_error_stats_report};
    pub use crate::flags::{MapAccess, StorageFlags, FlagError, validate_map_access, validate_storage_flags};
    pub use crate::buffer::{Buffer, Mapping};
    pub use crate::shader::ShaderStage;
    pub use crate::program::Program;
    pub use crate::reflection::{UniformReflector, UniformIndex, UniformSlot};
    pub use crate::uniform::{UniformType, UniformValue, UniformShape, Scalars, ScalarKind, unsupported_code};
    pub use crate::uniform::{Mat2x3, Mat3x2, Mat2x4, Mat4x2, Mat3x4, Mat4x3};
    pub use crate::surface::{Surface, SurfaceEvent, SurfaceHandler, run_surface};
}

// Re-export math library at crate root
pub use glam;

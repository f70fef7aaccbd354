/// Device trait - the raw, stateful device API driven by every resource

use std::fmt;

use crate::device::{BufferKind, BufferUsage, StageKind, ActiveUniform};
use crate::flags::{MapAccess, StorageFlags};
use crate::uniform::{UniformType, UniformValue};

// ============================================================================
// Common types
// ============================================================================

/// Opaque device object name. 0 never names a live object.
pub type RawHandle = u32;

/// Error flag raised by the device and queued until polled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceErrorCode {
    /// An enum argument is out of range
    InvalidEnum,
    /// A numeric argument is out of range
    InvalidValue,
    /// The operation is not allowed in the current state
    InvalidOperation,
    /// The framebuffer object is not complete
    InvalidFramebufferOperation,
    /// Not enough memory left to execute the command
    OutOfMemory,
    /// An internal stack would underflow
    StackUnderflow,
    /// An internal stack would overflow
    StackOverflow,
    /// Code not known to this crate
    Unknown(u32),
}

impl DeviceErrorCode {
    /// Symbolic name of the error flag
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceErrorCode::InvalidEnum => "INVALID_ENUM",
            DeviceErrorCode::InvalidValue => "INVALID_VALUE",
            DeviceErrorCode::InvalidOperation => "INVALID_OPERATION",
            DeviceErrorCode::InvalidFramebufferOperation => "INVALID_FRAMEBUFFER_OPERATION",
            DeviceErrorCode::OutOfMemory => "OUT_OF_MEMORY",
            DeviceErrorCode::StackUnderflow => "STACK_UNDERFLOW",
            DeviceErrorCode::StackOverflow => "STACK_OVERFLOW",
            DeviceErrorCode::Unknown(_) => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for DeviceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceErrorCode::Unknown(code) => write!(f, "UNKNOWN_ERROR({:#06x})", code),
            other => f.write_str(other.as_str()),
        }
    }
}

// ============================================================================
// Device trait
// ============================================================================

/// Raw device API
///
/// One method per device primitive. Implementations do no validation of their
/// own beyond what the device does: every legality check lives in the resource
/// types that drive this trait. Buffer calls act on the buffer currently bound
/// to the given binding point, exactly like the device does.
///
/// All methods take `&self`. A device is a stateful object owned by a single
/// thread, so implementations use interior mutability where they need it.
pub trait Device {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Pop the next queued error flag, `None` once the queue is empty
    fn poll_error(&self) -> Option<DeviceErrorCode>;

    // ===== BUFFERS =====

    /// Create a buffer object, 0 if the device refuses
    fn create_buffer(&self) -> RawHandle;

    /// Delete a buffer object (0 is ignored)
    fn delete_buffer(&self, buffer: RawHandle);

    /// Bind `buffer` to the binding point of `kind` (0 unbinds)
    fn bind_buffer(&self, kind: BufferKind, buffer: RawHandle);

    /// Byte size of the buffer bound to `kind`
    fn buffer_size(&self, kind: BufferKind) -> i64;

    /// Replace the whole data store of the bound buffer (mutable storage)
    fn buffer_data(&self, kind: BufferKind, size: i64, data: Option<&[u8]>, usage: BufferUsage);

    /// Allocate immutable storage for the bound buffer
    fn buffer_storage(&self, kind: BufferKind, size: i64, data: Option<&[u8]>, flags: StorageFlags);

    /// Write `data` at `offset` into the bound buffer
    fn buffer_sub_data(&self, kind: BufferKind, offset: i64, data: &[u8]);

    /// Read `out.len()` bytes at `offset` from the bound buffer
    fn get_buffer_sub_data(&self, kind: BufferKind, offset: i64, out: &mut [u8]);

    /// Map a range of the bound buffer, null on failure
    fn map_buffer_range(&self, kind: BufferKind, offset: i64, length: i64, access: MapAccess) -> *mut u8;

    /// Unmap the bound buffer. `false` means the data store was corrupted
    /// while mapped and its contents are undefined.
    fn unmap_buffer(&self, kind: BufferKind) -> bool;

    // ===== SHADERS =====

    /// Create a shader object of the given stage, 0 if the device refuses
    fn create_shader(&self, kind: StageKind) -> RawHandle;

    /// Delete a shader object (0 is ignored)
    fn delete_shader(&self, shader: RawHandle);

    /// Replace the source of `shader` and compile it. Returns the compile status.
    fn compile_shader(&self, shader: RawHandle, source: &str) -> bool;

    /// Compiler diagnostic text of the last compile
    fn shader_info_log(&self, shader: RawHandle) -> String;

    // ===== PROGRAMS =====

    /// Create a program object, 0 if the device refuses
    fn create_program(&self) -> RawHandle;

    /// Delete a program object (0 is ignored)
    fn delete_program(&self, program: RawHandle);

    /// Shader objects currently attached to `program`
    fn attached_shaders(&self, program: RawHandle) -> Vec<RawHandle>;

    fn attach_shader(&self, program: RawHandle, shader: RawHandle);

    fn detach_shader(&self, program: RawHandle, shader: RawHandle);

    /// Link `program`. Returns the link status.
    fn link_program(&self, program: RawHandle) -> bool;

    /// Run the device validation pass on `program`. Returns the validate status.
    fn validate_program(&self, program: RawHandle) -> bool;

    /// Linker/validator diagnostic text
    fn program_info_log(&self, program: RawHandle) -> String;

    /// Make `program` current (0 makes no program current)
    fn use_program(&self, program: RawHandle);

    // ===== UNIFORMS =====

    /// Number of active uniform resources of a linked program
    fn active_uniform_count(&self, program: RawHandle) -> u32;

    /// Active uniform resource at `index` (0..active_uniform_count)
    fn active_uniform(&self, program: RawHandle, index: u32) -> ActiveUniform;

    /// Write consecutive elements starting at `location` of the current program
    fn set_uniform(&self, location: i32, values: &[UniformValue]);

    /// Read the value at `location` of `program` interpreted as `ty`
    fn get_uniform(&self, program: RawHandle, location: i32, ty: UniformType) -> UniformValue;
}

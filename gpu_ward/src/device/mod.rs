//! Device module - the raw device boundary and its parameter types

// Module declarations
pub mod device;
pub mod buffer;
pub mod shader;
pub mod program;
pub mod mock;

// Re-export everything from device.rs
pub use device::*;

// Re-export from other modules
pub use buffer::*;
pub use shader::*;
pub use program::*;
pub use mock::MockDevice;

//! Program reflection records exchanged with the device

use crate::uniform::UniformType;

/// One active uniform resource as reported by the device
///
/// Arrays are reported once, with the location of element 0, and their name
/// usually carries a `[0]` suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveUniform {
    /// Name as reported by the device
    pub name: String,
    /// Device location, -1 for uniforms without one (block members, built-ins)
    pub location: i32,
    /// Declared type tag
    pub ty: UniformType,
    /// Declared array length (1 if not an array)
    pub array_size: i32,
}

//! Buffer binding points and usage hints

/// Binding-point category of a buffer
///
/// A buffer is always bound to the binding point of its kind before any call
/// that touches its memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Vertex attributes
    Vertex,
    /// Atomic counter storage
    AtomicCounter,
    /// Buffer copy source
    CopyRead,
    /// Buffer copy destination
    CopyWrite,
    /// Indirect compute dispatch commands
    DispatchIndirect,
    /// Indirect draw command arguments
    DrawIndirect,
    /// Vertex array indices
    Index,
    /// Pixel read target
    PixelPack,
    /// Texture data source
    PixelUnpack,
    /// Query result buffer
    Query,
    /// Read-write storage for shaders
    ShaderStorage,
    /// Texture data buffer
    Texture,
    /// Transform feedback buffer
    TransformFeedback,
    /// Uniform block storage
    Uniform,
}

impl BufferKind {
    /// Every binding point, in declaration order
    pub const ALL: [BufferKind; 14] = [
        BufferKind::Vertex,
        BufferKind::AtomicCounter,
        BufferKind::CopyRead,
        BufferKind::CopyWrite,
        BufferKind::DispatchIndirect,
        BufferKind::DrawIndirect,
        BufferKind::Index,
        BufferKind::PixelPack,
        BufferKind::PixelUnpack,
        BufferKind::Query,
        BufferKind::ShaderStorage,
        BufferKind::Texture,
        BufferKind::TransformFeedback,
        BufferKind::Uniform,
    ];
}

/// Usage hint for mutable (re-uploadable) buffer storage
///
/// Frequency: Stream (modified once, used a few times), Static (modified once,
/// used many times), Dynamic (modified repeatedly, used many times).
///
/// Nature: Draw (written by the application, read by the device), Read
/// (written by the device, read back by the application), Copy (written and
/// read by the device).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    StreamDraw,
    StreamRead,
    StreamCopy,
    StaticDraw,
    StaticRead,
    StaticCopy,
    DynamicDraw,
    DynamicRead,
    DynamicCopy,
}

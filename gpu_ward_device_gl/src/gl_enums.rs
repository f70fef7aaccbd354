/// Conversions between GpuWard parameter types and OpenGL enums
///
/// Pure functions: nothing here touches a context.

use gl::types::{GLbitfield, GLenum};
use gpu_ward::ward::device::{BufferKind, BufferUsage, DeviceErrorCode, StageKind};
use gpu_ward::ward::{MapAccess, StorageFlags, UniformType};

/// Binding target of a buffer kind
pub fn buffer_target(kind: BufferKind) -> GLenum {
    match kind {
        BufferKind::Vertex => gl::ARRAY_BUFFER,
        BufferKind::AtomicCounter => gl::ATOMIC_COUNTER_BUFFER,
        BufferKind::CopyRead => gl::COPY_READ_BUFFER,
        BufferKind::CopyWrite => gl::COPY_WRITE_BUFFER,
        BufferKind::DispatchIndirect => gl::DISPATCH_INDIRECT_BUFFER,
        BufferKind::DrawIndirect => gl::DRAW_INDIRECT_BUFFER,
        BufferKind::Index => gl::ELEMENT_ARRAY_BUFFER,
        BufferKind::PixelPack => gl::PIXEL_PACK_BUFFER,
        BufferKind::PixelUnpack => gl::PIXEL_UNPACK_BUFFER,
        BufferKind::Query => gl::QUERY_BUFFER,
        BufferKind::ShaderStorage => gl::SHADER_STORAGE_BUFFER,
        BufferKind::Texture => gl::TEXTURE_BUFFER,
        BufferKind::TransformFeedback => gl::TRANSFORM_FEEDBACK_BUFFER,
        BufferKind::Uniform => gl::UNIFORM_BUFFER,
    }
}

pub fn buffer_usage(usage: BufferUsage) -> GLenum {
    match usage {
        BufferUsage::StreamDraw => gl::STREAM_DRAW,
        BufferUsage::StreamRead => gl::STREAM_READ,
        BufferUsage::StreamCopy => gl::STREAM_COPY,
        BufferUsage::StaticDraw => gl::STATIC_DRAW,
        BufferUsage::StaticRead => gl::STATIC_READ,
        BufferUsage::StaticCopy => gl::STATIC_COPY,
        BufferUsage::DynamicDraw => gl::DYNAMIC_DRAW,
        BufferUsage::DynamicRead => gl::DYNAMIC_READ,
        BufferUsage::DynamicCopy => gl::DYNAMIC_COPY,
    }
}

/// `access` argument of glMapBufferRange
pub fn map_access_bits(access: MapAccess) -> GLbitfield {
    const TABLE: [(MapAccess, GLbitfield); 8] = [
        (MapAccess::READ, gl::MAP_READ_BIT),
        (MapAccess::WRITE, gl::MAP_WRITE_BIT),
        (MapAccess::PERSISTENT, gl::MAP_PERSISTENT_BIT),
        (MapAccess::COHERENT, gl::MAP_COHERENT_BIT),
        (MapAccess::INVALIDATE_RANGE, gl::MAP_INVALIDATE_RANGE_BIT),
        (MapAccess::INVALIDATE_BUFFER, gl::MAP_INVALIDATE_BUFFER_BIT),
        (MapAccess::FLUSH_EXPLICIT, gl::MAP_FLUSH_EXPLICIT_BIT),
        (MapAccess::UNSYNCHRONIZED, gl::MAP_UNSYNCHRONIZED_BIT),
    ];
    TABLE
        .iter()
        .filter(|(flag, _)| access.contains(*flag))
        .fold(0, |bits, (_, bit)| bits | bit)
}

/// `flags` argument of glBufferStorage
pub fn storage_bits(flags: StorageFlags) -> GLbitfield {
    const TABLE: [(StorageFlags, GLbitfield); 6] = [
        (StorageFlags::DYNAMIC_STORAGE, gl::DYNAMIC_STORAGE_BIT),
        (StorageFlags::MAP_READ, gl::MAP_READ_BIT),
        (StorageFlags::MAP_WRITE, gl::MAP_WRITE_BIT),
        (StorageFlags::MAP_PERSISTENT, gl::MAP_PERSISTENT_BIT),
        (StorageFlags::MAP_COHERENT, gl::MAP_COHERENT_BIT),
        (StorageFlags::CLIENT_STORAGE, gl::CLIENT_STORAGE_BIT),
    ];
    TABLE
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .fold(0, |bits, (_, bit)| bits | bit)
}

pub fn shader_type(kind: StageKind) -> GLenum {
    match kind {
        StageKind::Vertex => gl::VERTEX_SHADER,
        StageKind::Fragment => gl::FRAGMENT_SHADER,
        StageKind::Geometry => gl::GEOMETRY_SHADER,
        StageKind::TessControl => gl::TESS_CONTROL_SHADER,
        StageKind::TessEvaluation => gl::TESS_EVALUATION_SHADER,
        StageKind::Compute => gl::COMPUTE_SHADER,
    }
}

/// Tag of a reflected GL type code. Codes without a shape map to `Unsupported`.
pub fn uniform_type(code: GLenum) -> UniformType {
    match code {
        gl::FLOAT => UniformType::Float,
        gl::FLOAT_VEC2 => UniformType::Vec2,
        gl::FLOAT_VEC3 => UniformType::Vec3,
        gl::FLOAT_VEC4 => UniformType::Vec4,
        gl::INT => UniformType::Int,
        gl::INT_VEC2 => UniformType::IVec2,
        gl::INT_VEC3 => UniformType::IVec3,
        gl::INT_VEC4 => UniformType::IVec4,
        gl::UNSIGNED_INT => UniformType::UInt,
        gl::UNSIGNED_INT_VEC2 => UniformType::UVec2,
        gl::UNSIGNED_INT_VEC3 => UniformType::UVec3,
        gl::UNSIGNED_INT_VEC4 => UniformType::UVec4,
        gl::FLOAT_MAT2 => UniformType::Mat2,
        gl::FLOAT_MAT3 => UniformType::Mat3,
        gl::FLOAT_MAT4 => UniformType::Mat4,
        gl::FLOAT_MAT2x3 => UniformType::Mat2x3,
        gl::FLOAT_MAT3x2 => UniformType::Mat3x2,
        gl::FLOAT_MAT2x4 => UniformType::Mat2x4,
        gl::FLOAT_MAT4x2 => UniformType::Mat4x2,
        gl::FLOAT_MAT3x4 => UniformType::Mat3x4,
        gl::FLOAT_MAT4x3 => UniformType::Mat4x3,
        other => UniformType::Unsupported(other),
    }
}

/// Error flag of a glGetError result, `None` for GL_NO_ERROR
pub fn device_error(code: GLenum) -> Option<DeviceErrorCode> {
    let error = match code {
        gl::NO_ERROR => return None,
        gl::INVALID_ENUM => DeviceErrorCode::InvalidEnum,
        gl::INVALID_VALUE => DeviceErrorCode::InvalidValue,
        gl::INVALID_OPERATION => DeviceErrorCode::InvalidOperation,
        gl::INVALID_FRAMEBUFFER_OPERATION => DeviceErrorCode::InvalidFramebufferOperation,
        gl::OUT_OF_MEMORY => DeviceErrorCode::OutOfMemory,
        gl::STACK_UNDERFLOW => DeviceErrorCode::StackUnderflow,
        gl::STACK_OVERFLOW => DeviceErrorCode::StackOverflow,
        other => DeviceErrorCode::Unknown(other),
    };
    Some(error)
}

#[cfg(test)]
#[path = "gl_enums_tests.rs"]
mod tests;

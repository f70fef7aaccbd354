/// OpenGL 4.6 implementation of the `Device` trait

use std::ffi::c_void;
use std::marker::PhantomData;
use std::ptr;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLsizeiptr, GLuint};
use gpu_ward::ward::device::{ActiveUniform, BufferKind, BufferUsage, Device, DeviceErrorCode, RawHandle, StageKind};
use gpu_ward::ward::{MapAccess, Result, Scalars, ScalarKind, StorageFlags, UniformType, UniformValue};
use gpu_ward::{ward_err, ward_info};

use crate::gl_enums;

const SOURCE: &str = "ward::GlDevice";

/// Entry points every `Device` method relies on
const REQUIRED: &[(&str, fn() -> bool)] = &[
    ("glGetError", gl::GetError::is_loaded),
    ("glGetString", gl::GetString::is_loaded),
    ("glGenBuffers", gl::GenBuffers::is_loaded),
    ("glDeleteBuffers", gl::DeleteBuffers::is_loaded),
    ("glBindBuffer", gl::BindBuffer::is_loaded),
    ("glGetBufferParameteri64v", gl::GetBufferParameteri64v::is_loaded),
    ("glBufferData", gl::BufferData::is_loaded),
    ("glBufferStorage", gl::BufferStorage::is_loaded),
    ("glBufferSubData", gl::BufferSubData::is_loaded),
    ("glGetBufferSubData", gl::GetBufferSubData::is_loaded),
    ("glMapBufferRange", gl::MapBufferRange::is_loaded),
    ("glUnmapBuffer", gl::UnmapBuffer::is_loaded),
    ("glCreateShader", gl::CreateShader::is_loaded),
    ("glDeleteShader", gl::DeleteShader::is_loaded),
    ("glShaderSource", gl::ShaderSource::is_loaded),
    ("glCompileShader", gl::CompileShader::is_loaded),
    ("glGetShaderiv", gl::GetShaderiv::is_loaded),
    ("glGetShaderInfoLog", gl::GetShaderInfoLog::is_loaded),
    ("glCreateProgram", gl::CreateProgram::is_loaded),
    ("glDeleteProgram", gl::DeleteProgram::is_loaded),
    ("glGetAttachedShaders", gl::GetAttachedShaders::is_loaded),
    ("glAttachShader", gl::AttachShader::is_loaded),
    ("glDetachShader", gl::DetachShader::is_loaded),
    ("glLinkProgram", gl::LinkProgram::is_loaded),
    ("glValidateProgram", gl::ValidateProgram::is_loaded),
    ("glGetProgramiv", gl::GetProgramiv::is_loaded),
    ("glGetProgramInfoLog", gl::GetProgramInfoLog::is_loaded),
    ("glUseProgram", gl::UseProgram::is_loaded),
    ("glGetProgramInterfaceiv", gl::GetProgramInterfaceiv::is_loaded),
    ("glGetProgramResourceiv", gl::GetProgramResourceiv::is_loaded),
    ("glGetProgramResourceName", gl::GetProgramResourceName::is_loaded),
    ("glUniform1fv", gl::Uniform1fv::is_loaded),
    ("glUniform4fv", gl::Uniform4fv::is_loaded),
    ("glUniform4iv", gl::Uniform4iv::is_loaded),
    ("glUniform4uiv", gl::Uniform4uiv::is_loaded),
    ("glUniformMatrix4fv", gl::UniformMatrix4fv::is_loaded),
    ("glUniformMatrix4x3fv", gl::UniformMatrix4x3fv::is_loaded),
    ("glGetnUniformfv", gl::GetnUniformfv::is_loaded),
    ("glGetnUniformiv", gl::GetnUniformiv::is_loaded),
    ("glGetnUniformuiv", gl::GetnUniformuiv::is_loaded),
    #[cfg(feature = "object-labels")]
    ("glObjectLabel", gl::ObjectLabel::is_loaded),
];

/// Device backed by the OpenGL context current on the creating thread
///
/// GL function pointers are process-wide, but every call acts on the context
/// current on the calling thread. `GlDevice` is `!Send` so it stays with it.
pub struct GlDevice {
    version: String,
    _not_send: PhantomData<*const ()>,
}

impl GlDevice {
    /// Load GL entry points through `loader` and check that all required ones exist
    ///
    /// # Safety
    ///
    /// An OpenGL 4.6 context must be current on the calling thread, and
    /// `loader` must return valid function pointers for that context (or null).
    pub unsafe fn load_with<F>(loader: F) -> Result<Self>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let missing: Vec<&str> = REQUIRED
            .iter()
            .filter(|(_, is_loaded)| !is_loaded())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ward_err!(SOURCE, BackendError, "Missing OpenGL entry points: {}", missing.join(", ")));
        }

        let version = {
            let raw = gl::GetString(gl::VERSION);
            if raw.is_null() {
                "unknown".to_string()
            } else {
                std::ffi::CStr::from_ptr(raw as *const std::ffi::c_char).to_string_lossy().into_owned()
            }
        };
        ward_info!(SOURCE, "OpenGL {} loaded", version);
        Ok(Self { version, _not_send: PhantomData })
    }

    /// `GL_VERSION` string reported by the driver
    pub fn version(&self) -> &str {
        &self.version
    }

    #[cfg(feature = "object-labels")]
    fn label(&self, identifier: GLenum, name: GLuint, prefix: &str) {
        if name == 0 {
            return;
        }
        let text = format!("ward {} {}", prefix, name);
        unsafe {
            gl::ObjectLabel(identifier, name, text.len() as GLsizei, text.as_ptr() as *const GLchar);
        }
    }

    #[cfg(not(feature = "object-labels"))]
    fn label(&self, _identifier: GLenum, _name: GLuint, _prefix: &str) {}
}

/// Read an info log of `length` bytes through `fetch`
fn read_info_log(length: GLint, fetch: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
    if length <= 0 {
        return String::new();
    }
    let mut buffer = vec![0u8; length as usize];
    let mut written: GLsizei = 0;
    fetch(length, &mut written, buffer.as_mut_ptr() as *mut GLchar);
    buffer.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buffer).into_owned()
}

fn data_ptr(data: Option<&[u8]>) -> *const c_void {
    data.map_or(ptr::null(), |d| d.as_ptr() as *const c_void)
}

impl Device for GlDevice {
    fn name(&self) -> &str {
        "OpenGL"
    }

    fn poll_error(&self) -> Option<DeviceErrorCode> {
        gl_enums::device_error(unsafe { gl::GetError() })
    }

    // ===== BUFFERS =====

    fn create_buffer(&self) -> RawHandle {
        let mut id: GLuint = 0;
        unsafe { gl::GenBuffers(1, &mut id) };
        self.label(gl::BUFFER, id, "buffer");
        id
    }

    fn delete_buffer(&self, buffer: RawHandle) {
        unsafe { gl::DeleteBuffers(1, &buffer) };
    }

    fn bind_buffer(&self, kind: BufferKind, buffer: RawHandle) {
        unsafe { gl::BindBuffer(gl_enums::buffer_target(kind), buffer) };
    }

    fn buffer_size(&self, kind: BufferKind) -> i64 {
        let mut size: i64 = 0;
        unsafe { gl::GetBufferParameteri64v(gl_enums::buffer_target(kind), gl::BUFFER_SIZE, &mut size) };
        size
    }

    fn buffer_data(&self, kind: BufferKind, size: i64, data: Option<&[u8]>, usage: BufferUsage) {
        unsafe {
            gl::BufferData(
                gl_enums::buffer_target(kind),
                size as GLsizeiptr,
                data_ptr(data),
                gl_enums::buffer_usage(usage),
            )
        };
    }

    fn buffer_storage(&self, kind: BufferKind, size: i64, data: Option<&[u8]>, flags: StorageFlags) {
        unsafe {
            gl::BufferStorage(
                gl_enums::buffer_target(kind),
                size as GLsizeiptr,
                data_ptr(data),
                gl_enums::storage_bits(flags),
            )
        };
    }

    fn buffer_sub_data(&self, kind: BufferKind, offset: i64, data: &[u8]) {
        unsafe {
            gl::BufferSubData(
                gl_enums::buffer_target(kind),
                offset as isize,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
            )
        };
    }

    fn get_buffer_sub_data(&self, kind: BufferKind, offset: i64, out: &mut [u8]) {
        unsafe {
            gl::GetBufferSubData(
                gl_enums::buffer_target(kind),
                offset as isize,
                out.len() as GLsizeiptr,
                out.as_mut_ptr() as *mut c_void,
            )
        };
    }

    fn map_buffer_range(&self, kind: BufferKind, offset: i64, length: i64, access: MapAccess) -> *mut u8 {
        unsafe {
            gl::MapBufferRange(
                gl_enums::buffer_target(kind),
                offset as isize,
                length as GLsizeiptr,
                gl_enums::map_access_bits(access),
            ) as *mut u8
        }
    }

    fn unmap_buffer(&self, kind: BufferKind) -> bool {
        unsafe { gl::UnmapBuffer(gl_enums::buffer_target(kind)) == gl::TRUE }
    }

    // ===== SHADERS =====

    fn create_shader(&self, kind: StageKind) -> RawHandle {
        let id = unsafe { gl::CreateShader(gl_enums::shader_type(kind)) };
        self.label(gl::SHADER, id, "shader");
        id
    }

    fn delete_shader(&self, shader: RawHandle) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn compile_shader(&self, shader: RawHandle, source: &str) -> bool {
        let text = source.as_ptr() as *const GLchar;
        let length = source.len() as GLint;
        let mut status: GLint = 0;
        unsafe {
            gl::ShaderSource(shader, 1, &text, &length);
            gl::CompileShader(shader);
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
        }
        status == gl::TRUE as GLint
    }

    fn shader_info_log(&self, shader: RawHandle) -> String {
        let mut length: GLint = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut length) };
        read_info_log(length, |len, written, buf| unsafe { gl::GetShaderInfoLog(shader, len, written, buf) })
    }

    // ===== PROGRAMS =====

    fn create_program(&self) -> RawHandle {
        let id = unsafe { gl::CreateProgram() };
        self.label(gl::PROGRAM, id, "program");
        id
    }

    fn delete_program(&self, program: RawHandle) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn attached_shaders(&self, program: RawHandle) -> Vec<RawHandle> {
        let mut count: GLint = 0;
        unsafe { gl::GetProgramiv(program, gl::ATTACHED_SHADERS, &mut count) };
        if count <= 0 {
            return Vec::new();
        }
        let mut shaders = vec![0 as GLuint; count as usize];
        let mut written: GLsizei = 0;
        unsafe { gl::GetAttachedShaders(program, count, &mut written, shaders.as_mut_ptr()) };
        shaders.truncate(written.max(0) as usize);
        shaders
    }

    fn attach_shader(&self, program: RawHandle, shader: RawHandle) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn detach_shader(&self, program: RawHandle, shader: RawHandle) {
        unsafe { gl::DetachShader(program, shader) };
    }

    fn link_program(&self, program: RawHandle) -> bool {
        let mut status: GLint = 0;
        unsafe {
            gl::LinkProgram(program);
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
        }
        status == gl::TRUE as GLint
    }

    fn validate_program(&self, program: RawHandle) -> bool {
        let mut status: GLint = 0;
        unsafe {
            gl::ValidateProgram(program);
            gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut status);
        }
        status == gl::TRUE as GLint
    }

    fn program_info_log(&self, program: RawHandle) -> String {
        let mut length: GLint = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut length) };
        read_info_log(length, |len, written, buf| unsafe { gl::GetProgramInfoLog(program, len, written, buf) })
    }

    fn use_program(&self, program: RawHandle) {
        unsafe { gl::UseProgram(program) };
    }

    // ===== UNIFORMS =====

    fn active_uniform_count(&self, program: RawHandle) -> u32 {
        let mut count: GLint = 0;
        unsafe { gl::GetProgramInterfaceiv(program, gl::UNIFORM, gl::ACTIVE_RESOURCES, &mut count) };
        count.max(0) as u32
    }

    fn active_uniform(&self, program: RawHandle, index: u32) -> ActiveUniform {
        const PROPS: [GLenum; 4] = [gl::NAME_LENGTH, gl::TYPE, gl::LOCATION, gl::ARRAY_SIZE];
        let mut values: [GLint; 4] = [0; 4];
        unsafe {
            gl::GetProgramResourceiv(
                program,
                gl::UNIFORM,
                index,
                PROPS.len() as GLsizei,
                PROPS.as_ptr(),
                values.len() as GLsizei,
                ptr::null_mut(),
                values.as_mut_ptr(),
            )
        };
        let [name_length, ty, location, array_size] = values;

        // NAME_LENGTH includes the terminating NUL
        let name = read_info_log(name_length, |len, written, buf| unsafe {
            gl::GetProgramResourceName(program, gl::UNIFORM, index, len, written, buf)
        });

        ActiveUniform {
            name,
            location,
            ty: gl_enums::uniform_type(ty as GLenum),
            array_size: array_size.max(1),
        }
    }

    fn set_uniform(&self, location: i32, values: &[UniformValue]) {
        let Some(first) = values.first() else { return };
        let ty = first.ty();
        let count = values.len() as GLsizei;

        let mut floats = Vec::new();
        let mut ints = Vec::new();
        let mut uints = Vec::new();
        for value in values {
            match value.scalars() {
                Scalars::Float(v) => floats.extend(v),
                Scalars::Int(v) => ints.extend(v),
                Scalars::UInt(v) => uints.extend(v),
            }
        }
        let (f, i, u) = (floats.as_ptr(), ints.as_ptr(), uints.as_ptr());

        unsafe {
            match ty {
                UniformType::Float => gl::Uniform1fv(location, count, f),
                UniformType::Vec2 => gl::Uniform2fv(location, count, f),
                UniformType::Vec3 => gl::Uniform3fv(location, count, f),
                UniformType::Vec4 => gl::Uniform4fv(location, count, f),
                UniformType::Int => gl::Uniform1iv(location, count, i),
                UniformType::IVec2 => gl::Uniform2iv(location, count, i),
                UniformType::IVec3 => gl::Uniform3iv(location, count, i),
                UniformType::IVec4 => gl::Uniform4iv(location, count, i),
                UniformType::UInt => gl::Uniform1uiv(location, count, u),
                UniformType::UVec2 => gl::Uniform2uiv(location, count, u),
                UniformType::UVec3 => gl::Uniform3uiv(location, count, u),
                UniformType::UVec4 => gl::Uniform4uiv(location, count, u),
                UniformType::Mat2 => gl::UniformMatrix2fv(location, count, gl::FALSE, f),
                UniformType::Mat3 => gl::UniformMatrix3fv(location, count, gl::FALSE, f),
                UniformType::Mat4 => gl::UniformMatrix4fv(location, count, gl::FALSE, f),
                UniformType::Mat2x3 => gl::UniformMatrix2x3fv(location, count, gl::FALSE, f),
                UniformType::Mat3x2 => gl::UniformMatrix3x2fv(location, count, gl::FALSE, f),
                UniformType::Mat2x4 => gl::UniformMatrix2x4fv(location, count, gl::FALSE, f),
                UniformType::Mat4x2 => gl::UniformMatrix4x2fv(location, count, gl::FALSE, f),
                UniformType::Mat3x4 => gl::UniformMatrix3x4fv(location, count, gl::FALSE, f),
                UniformType::Mat4x3 => gl::UniformMatrix4x3fv(location, count, gl::FALSE, f),
                // Values always carry a supported tag
                UniformType::Unsupported(_) => {}
            }
        }
    }

    fn get_uniform(&self, program: RawHandle, location: i32, ty: UniformType) -> UniformValue {
        let components = ty.component_count();
        let value = match ty.scalar_kind() {
            Some(ScalarKind::Float) => {
                let mut data = vec![0f32; components];
                let bytes = (components * std::mem::size_of::<f32>()) as GLsizei;
                unsafe { gl::GetnUniformfv(program, location, bytes, data.as_mut_ptr()) };
                UniformValue::from_f32s(ty, &data)
            }
            Some(ScalarKind::Int) => {
                let mut data = vec![0i32; components];
                let bytes = (components * std::mem::size_of::<i32>()) as GLsizei;
                unsafe { gl::GetnUniformiv(program, location, bytes, data.as_mut_ptr()) };
                UniformValue::from_i32s(ty, &data)
            }
            Some(ScalarKind::UInt) => {
                let mut data = vec![0u32; components];
                let bytes = (components * std::mem::size_of::<u32>()) as GLsizei;
                unsafe { gl::GetnUniformuiv(program, location, bytes, data.as_mut_ptr()) };
                UniformValue::from_u32s(ty, &data)
            }
            None => None,
        };
        value.unwrap_or(UniformValue::Float(0.0))
    }
}

impl std::fmt::Debug for GlDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlDevice").field("version", &self.version).finish()
    }
}

#[cfg(test)]
#[path = "gl_device_tests.rs"]
mod tests;

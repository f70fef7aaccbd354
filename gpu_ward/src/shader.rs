/// One compilable pipeline stage
///
/// The stage kind is fixed at construction. Compiling always drops the
/// previous compiled state first; a failed compile leaves the object usable
/// for another attempt.

use std::io::Read;

use crate::context::Context;
use crate::device::{RawHandle, StageKind};
use crate::error::{Error, Result};
use crate::{ward_bail, ward_error, ward_trace};

const SOURCE: &str = "ward::ShaderStage";

/// Single-owner shader object
pub struct ShaderStage {
    ctx: Context,
    handle: RawHandle,
    kind: StageKind,
    compiled: bool,
}

impl ShaderStage {
    /// Create an uncompiled stage of `kind`
    pub fn new(ctx: &Context, kind: StageKind) -> Result<Self> {
        let handle = Self::create_handle(ctx, kind)?;
        Ok(Self { ctx: ctx.clone(), handle, kind, compiled: false })
    }

    /// Create a stage and compile `source`
    pub fn with_source(ctx: &Context, kind: StageKind, source: &str) -> Result<Self> {
        let mut stage = Self::new(ctx, kind)?;
        stage.compile(source)?;
        Ok(stage)
    }

    /// Create a stage and compile the whole content of `reader`
    pub fn from_reader<R: Read>(ctx: &Context, kind: StageKind, reader: R) -> Result<Self> {
        let mut stage = Self::new(ctx, kind)?;
        stage.compile_reader(reader)?;
        Ok(stage)
    }

    fn create_handle(ctx: &Context, kind: StageKind) -> Result<RawHandle> {
        let handle = ctx.device().create_shader(kind);
        ctx.check_errors("ShaderStage::new");
        if handle == 0 {
            ward_bail!(SOURCE, CreationFailed, "Failed to create {} shader object", kind.name());
        }
        ward_trace!(SOURCE, "Created {} shader {}", kind.name(), handle);
        Ok(handle)
    }

    /// Release the device object. Idempotent.
    pub fn release(&mut self) {
        if self.handle != 0 {
            self.ctx.device().delete_shader(self.handle);
            self.ctx.check_errors("ShaderStage::release");
            ward_trace!(SOURCE, "Released shader {}", self.handle);
        }
        self.handle = 0;
        self.compiled = false;
    }

    /// Release the device object and create a fresh, uncompiled one
    pub fn reset(&mut self) -> Result<()> {
        self.release();
        self.handle = Self::create_handle(&self.ctx, self.kind)?;
        Ok(())
    }

    pub fn handle(&self) -> RawHandle { self.handle }

    pub fn exists(&self) -> bool { self.handle != 0 }

    pub fn kind(&self) -> StageKind { self.kind }

    pub fn compiled(&self) -> bool { self.compiled }

    pub(crate) fn context(&self) -> &Context { &self.ctx }

    /// Compile `source`, replacing any previous compile
    pub fn compile(&mut self, source: &str) -> Result<()> {
        if source.contains('\0') {
            ward_bail!(SOURCE, InvalidArgument, "Shader source contains a NUL byte");
        }
        if self.handle == 0 {
            ward_bail!(SOURCE, InvalidState, "Shader object does not exist");
        }

        self.compiled = false;
        let ok = self.ctx.device().compile_shader(self.handle, source);
        self.ctx.check_errors("ShaderStage::compile");
        if !ok {
            let log = self.ctx.device().shader_info_log(self.handle);
            let err = Error::CompileFailed { stage: self.kind, log };
            ward_error!(SOURCE, "{}", err);
            return Err(err);
        }
        self.compiled = true;
        Ok(())
    }

    /// Read `reader` to completion, then compile it
    pub fn compile_reader<R: Read>(&mut self, mut reader: R) -> Result<()> {
        let mut source = String::new();
        if let Err(e) = reader.read_to_string(&mut source) {
            ward_bail!(SOURCE, InvalidArgument, "Failed while reading shader source: {}", e);
        }
        self.compile(&source)
    }

    /// Compiler diagnostic text of the last compile
    pub fn info_log(&self) -> Result<String> {
        if self.handle == 0 {
            ward_bail!(SOURCE, InvalidState, "Shader object does not exist");
        }
        Ok(self.ctx.device().shader_info_log(self.handle))
    }
}

impl Drop for ShaderStage {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderStage")
            .field("handle", &self.handle)
            .field("kind", &self.kind)
            .field("compiled", &self.compiled)
            .finish()
    }
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;

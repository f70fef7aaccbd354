/// Linkable program with type-checked uniform binding.
///
/// State machine: Unlinked -> attach/detach -> link() -> Linked. Any attach or
/// detach returns to Unlinked and drops the uniform index. The index is only
/// rebuilt by a successful link (and, with debug checks on, a successful
/// validation pass).
///
/// Every uniform read or write goes through the index first: the location
/// must be known, the value shape must match the declared type exactly, and
/// the element count must fit the declared array length. Nothing reaches the
/// device until all three checks pass.
///
/// Attached stages are not owned. They must stay alive until `link()` returns.

use crate::context::Context;
use crate::device::RawHandle;
use crate::error::Result;
use crate::reflection::{UniformIndex, UniformReflector, UniformSlot};
use crate::shader::ShaderStage;
use crate::uniform::{UniformShape, UniformType, UniformValue};
use crate::{ward_bail, ward_debug, ward_err, ward_trace};

const SOURCE: &str = "ward::Program";

/// Single-owner program object
pub struct Program {
    ctx: Context,
    handle: RawHandle,
    linked: bool,
    uniforms: Option<UniformIndex>,
}

impl Program {
    /// Create an empty, unlinked program
    pub fn new(ctx: &Context) -> Result<Self> {
        let handle = Self::create_handle(ctx)?;
        Ok(Self { ctx: ctx.clone(), handle, linked: false, uniforms: None })
    }

    fn create_handle(ctx: &Context) -> Result<RawHandle> {
        let handle = ctx.device().create_program();
        ctx.check_errors("Program::new");
        if handle == 0 {
            ward_bail!(SOURCE, CreationFailed, "Failed to create program object");
        }
        ward_trace!(SOURCE, "Created program {}", handle);
        Ok(handle)
    }

    /// Release the device object. Idempotent. Attached stages are left alone.
    pub fn release(&mut self) {
        if self.handle != 0 {
            self.ctx.device().delete_program(self.handle);
            self.ctx.check_errors("Program::release");
            ward_trace!(SOURCE, "Released program {}", self.handle);
        }
        self.handle = 0;
        self.linked = false;
        self.uniforms = None;
    }

    /// Release the device object and create a fresh, empty one
    pub fn reset(&mut self) -> Result<()> {
        self.release();
        self.handle = Self::create_handle(&self.ctx)?;
        Ok(())
    }

    // ===== ACCESSORS =====

    pub fn handle(&self) -> RawHandle { self.handle }

    pub fn exists(&self) -> bool { self.handle != 0 }

    pub fn linked(&self) -> bool { self.linked }

    /// Uniform index of the last successful link, `None` while unlinked
    pub fn uniforms(&self) -> Option<&UniformIndex> { self.uniforms.as_ref() }

    fn require_exists(&self) -> Result<()> {
        if self.handle == 0 {
            ward_bail!(SOURCE, InvalidState, "Program object does not exist");
        }
        Ok(())
    }

    fn require_linked(&self) -> Result<&UniformIndex> {
        self.require_exists()?;
        match (self.linked, self.uniforms.as_ref()) {
            (true, Some(index)) => Ok(index),
            _ => Err(ward_err!(SOURCE, InvalidState, "Program {} is not linked", self.handle)),
        }
    }

    // ===== STAGES =====

    /// Shader objects currently attached, as reported by the device
    pub fn attached_stages(&self) -> Result<Vec<RawHandle>> {
        self.require_exists()?;
        Ok(self.ctx.device().attached_shaders(self.handle))
    }

    /// True if `stage` is attached to this program
    pub fn is_attached(&self, stage: &ShaderStage) -> Result<bool> {
        Ok(stage.exists() && self.attached_stages()?.contains(&stage.handle()))
    }

    fn check_stage(&self, stage: &ShaderStage) -> Result<()> {
        self.require_exists()?;
        if !stage.exists() {
            ward_bail!(SOURCE, InvalidState, "Shader object does not exist");
        }
        if !stage.context().same_as(&self.ctx) {
            ward_bail!(SOURCE, InvalidArgument, "Shader {} belongs to a different context", stage.handle());
        }
        Ok(())
    }

    /// Attach `stage`. Invalidates the link.
    pub fn attach(&mut self, stage: &ShaderStage) -> Result<()> {
        self.check_stage(stage)?;
        if self.is_attached(stage)? {
            ward_bail!(
                SOURCE, InvalidState,
                "Shader {} is already attached to program {}, so it can't be attached",
                stage.handle(), self.handle
            );
        }
        self.ctx.device().attach_shader(self.handle, stage.handle());
        self.ctx.check_errors("Program::attach");
        self.invalidate();
        Ok(())
    }

    /// Detach `stage`. Invalidates the link.
    pub fn detach(&mut self, stage: &ShaderStage) -> Result<()> {
        self.check_stage(stage)?;
        if !self.is_attached(stage)? {
            ward_bail!(
                SOURCE, InvalidState,
                "Shader {} is not attached to program {}, so it can't be detached",
                stage.handle(), self.handle
            );
        }
        self.ctx.device().detach_shader(self.handle, stage.handle());
        self.ctx.check_errors("Program::detach");
        self.invalidate();
        Ok(())
    }

    fn invalidate(&mut self) {
        self.linked = false;
        self.uniforms = None;
    }

    // ===== LINK =====

    /// Link the attached stages and rebuild the uniform index
    ///
    /// On failure the program stays unlinked but intact and can be relinked.
    /// With debug checks on, a failed validation pass counts as a failed link.
    pub fn link(&mut self) -> Result<()> {
        self.require_exists()?;
        self.invalidate();

        let device = self.ctx.device();
        let ok = device.link_program(self.handle);
        self.ctx.check_errors("Program::link");
        if !ok {
            let log = device.program_info_log(self.handle);
            ward_bail!(SOURCE, LinkFailed, "{}", log);
        }

        if self.ctx.debug_checks() {
            let ok = device.validate_program(self.handle);
            self.ctx.check_errors("Program::link (validate)");
            if !ok {
                let log = device.program_info_log(self.handle);
                ward_bail!(SOURCE, ProgramValidationFailed, "{}", log);
            }
        }

        let index = UniformReflector::reflect(device, self.handle);
        self.ctx.check_errors("Program::link (reflect)");
        ward_debug!(SOURCE, "Linked program {} with {} active uniforms", self.handle, index.len());
        self.uniforms = Some(index);
        self.linked = true;
        Ok(())
    }

    /// Make this program current
    pub fn bind(&self) -> Result<()> {
        self.require_linked()?;
        self.ctx.device().use_program(self.handle);
        self.ctx.check_errors("Program::bind");
        Ok(())
    }

    /// Make no program current on `ctx`
    pub fn unbind(ctx: &Context) {
        ctx.device().use_program(0);
        ctx.check_errors("Program::unbind");
    }

    // ===== UNIFORMS =====

    /// Location of the uniform declared as `name`
    pub fn uniform_location(&self, name: &str) -> Result<i32> {
        let index = self.require_linked()?;
        match index.by_name(name) {
            Some(slot) => Ok(slot.location),
            None => Err(ward_err!(SOURCE, InvalidArgument, "Uniform '{}' does not exist in program {}", name, self.handle)),
        }
    }

    fn slot(&self, location: i32) -> Result<&UniformSlot> {
        let index = self.require_linked()?;
        index.by_location(location).ok_or_else(|| {
            ward_err!(SOURCE, InvalidArgument, "Location {} does not correspond to a uniform", location)
        })
    }

    /// Check `count` elements of type `ty` against the slot at `location`
    fn check_access(&self, location: i32, ty: UniformType, count: usize) -> Result<&UniformSlot> {
        let slot = self.slot(location)?;
        if ty != slot.ty {
            ward_bail!(
                SOURCE, ValidationFailed,
                "Type of data ({}) does not correspond to the GLSL type of '{}' ({})",
                ty, slot.name, slot.ty
            );
        }
        if count as i64 > slot.array_size as i64 {
            ward_bail!(
                SOURCE, ValidationFailed,
                "Size of data ({}) is greater than the size of uniform '{}' ({})",
                count, slot.name, slot.array_size
            );
        }
        if count == 0 {
            ward_bail!(SOURCE, InvalidArgument, "Size of data to write must be greater than 0");
        }
        Ok(slot)
    }

    /// Write a single value at `location`
    pub fn set_uniform(&mut self, location: i32, value: impl Into<UniformValue>) -> Result<()> {
        self.set_uniform_values(location, &[value.into()])
    }

    /// Write consecutive array elements starting at `location`
    pub fn set_uniform_array<T>(&mut self, location: i32, values: &[T]) -> Result<()>
    where
        T: Into<UniformValue> + Copy,
    {
        let values: Vec<UniformValue> = values.iter().map(|&v| v.into()).collect();
        self.set_uniform_values(location, &values)
    }

    fn set_uniform_values(&mut self, location: i32, values: &[UniformValue]) -> Result<()> {
        if values.is_empty() {
            self.slot(location)?;
            ward_bail!(SOURCE, InvalidArgument, "Size of data to write must be greater than 0");
        }
        for value in values {
            self.check_access(location, value.ty(), values.len())?;
        }

        self.bind()?;
        self.ctx.device().set_uniform(location, values);
        self.ctx.check_errors("Program::set_uniform");
        Ok(())
    }

    /// Read the value at `location` as `T`
    pub fn get_uniform<T: UniformShape>(&self, location: i32) -> Result<T> {
        let value = self.uniform_value(location, T::TYPE)?;
        T::from_value(value).ok_or_else(|| {
            ward_err!(SOURCE, BackendError, "Device returned a {} for a {} uniform", value.ty(), T::TYPE)
        })
    }

    /// Read the value at `location`, which must be declared as `ty`
    pub fn uniform_value(&self, location: i32, ty: UniformType) -> Result<UniformValue> {
        self.check_access(location, ty, 1)?;
        let value = self.ctx.device().get_uniform(self.handle, location, ty);
        self.ctx.check_errors("Program::get_uniform");
        Ok(value)
    }

    // ===== BY NAME =====

    pub fn set_uniform_by_name(&mut self, name: &str, value: impl Into<UniformValue>) -> Result<()> {
        let location = self.uniform_location(name)?;
        self.set_uniform(location, value)
    }

    pub fn set_uniform_array_by_name<T>(&mut self, name: &str, values: &[T]) -> Result<()>
    where
        T: Into<UniformValue> + Copy,
    {
        let location = self.uniform_location(name)?;
        self.set_uniform_array(location, values)
    }

    pub fn get_uniform_by_name<T: UniformShape>(&self, name: &str) -> Result<T> {
        let location = self.uniform_location(name)?;
        self.get_uniform(location)
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("handle", &self.handle)
            .field("linked", &self.linked)
            .field("uniforms", &self.uniforms.as_ref().map(|u| u.len()))
            .finish()
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;

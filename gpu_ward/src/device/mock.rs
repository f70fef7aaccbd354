/// Mock device for headless use and tests (no GPU required)
///
/// Emulates the device state machine closely enough to exercise every check
/// in the resource types: per-kind binding points, mutable and immutable
/// buffer storage, mapping, a line-based shader compiler, a linker with
/// location assignment, uniform storage and the queued error flags.
///
/// `MockDevice` is a cheap handle over shared state. Keep a clone after
/// handing one to a `Context` to inspect the device or inject faults.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::device::{
    ActiveUniform, BufferKind, BufferUsage, Device, DeviceErrorCode, RawHandle, StageKind,
};
use crate::flags::{MapAccess, StorageFlags};
use crate::uniform::{UniformType, UniformValue};

// ============================================================================
// Mock objects
// ============================================================================

#[derive(Debug, Default)]
struct MockBuffer {
    data: Vec<u8>,
    usage: Option<BufferUsage>,
    /// `Some` once immutable storage was allocated
    storage: Option<StorageFlags>,
    mapped: Option<(i64, i64, MapAccess)>,
}

#[derive(Debug, Clone, PartialEq)]
struct Declaration {
    name: String,
    ty: UniformType,
    array_size: i32,
}

#[derive(Debug)]
struct MockShader {
    kind: StageKind,
    compiled: bool,
    info_log: String,
    uniforms: Vec<Declaration>,
}

#[derive(Debug, Default)]
struct MockProgram {
    attached: Vec<RawHandle>,
    linked: bool,
    info_log: String,
    active: Vec<ActiveUniform>,
    /// location -> (type, elements left in the array from this location)
    slots: FxHashMap<i32, (UniformType, i32)>,
    values: FxHashMap<i32, UniformValue>,
}

#[derive(Debug, Default)]
struct MockState {
    next_id: RawHandle,
    buffers: FxHashMap<RawHandle, MockBuffer>,
    bindings: FxHashMap<BufferKind, RawHandle>,
    shaders: FxHashMap<RawHandle, MockShader>,
    programs: FxHashMap<RawHandle, MockProgram>,
    current_program: RawHandle,
    errors: VecDeque<DeviceErrorCode>,
    calls: Vec<String>,

    refuse_allocations: bool,
    fail_next_map: bool,
    corrupt_next_unmap: bool,
    fail_validation: Option<String>,
}

impl MockState {
    fn allocate_id(&mut self) -> Option<RawHandle> {
        if self.refuse_allocations {
            return None;
        }
        self.next_id += 1;
        Some(self.next_id)
    }

    fn raise(&mut self, code: DeviceErrorCode) {
        self.errors.push_back(code);
    }

    /// Buffer bound to `kind`, raising INVALID_OPERATION if there is none
    fn bound_buffer(&mut self, kind: BufferKind) -> Option<&mut MockBuffer> {
        let id = self.bindings.get(&kind).copied().unwrap_or(0);
        if id == 0 || !self.buffers.contains_key(&id) {
            self.raise(DeviceErrorCode::InvalidOperation);
            return None;
        }
        self.buffers.get_mut(&id)
    }
}

// ============================================================================
// MockDevice
// ============================================================================

/// Software device
#[derive(Debug, Clone, Default)]
pub struct MockDevice {
    state: Rc<RefCell<MockState>>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: String) {
        self.state.borrow_mut().calls.push(call);
    }

    // ===== FAULT INJECTION =====

    /// Make every create_* call return 0
    pub fn refuse_allocations(&self, refuse: bool) {
        self.state.borrow_mut().refuse_allocations = refuse;
    }

    /// Make the next map return a null pointer
    pub fn fail_next_map(&self) {
        self.state.borrow_mut().fail_next_map = true;
    }

    /// Make the next unmap report corrupted contents
    pub fn corrupt_next_unmap(&self) {
        self.state.borrow_mut().corrupt_next_unmap = true;
    }

    /// Make every validation pass fail with `log` (`None` restores normal behavior)
    pub fn fail_validation(&self, log: Option<&str>) {
        self.state.borrow_mut().fail_validation = log.map(str::to_string);
    }

    /// Queue an error flag as if the device had raised it
    pub fn push_error(&self, code: DeviceErrorCode) {
        self.state.borrow_mut().raise(code);
    }

    // ===== INSPECTION =====

    /// Every device call made so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    /// Number of recorded calls whose text starts with `prefix`
    pub fn call_count(&self, prefix: &str) -> usize {
        self.state.borrow().calls.iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Error flags queued and not yet polled
    pub fn pending_errors(&self) -> usize {
        self.state.borrow().errors.len()
    }

    /// Number of live buffers, shaders and programs
    pub fn live_objects(&self) -> usize {
        let state = self.state.borrow();
        state.buffers.len() + state.shaders.len() + state.programs.len()
    }

    /// Buffer currently bound to `kind` (0 if none)
    pub fn bound_buffer(&self, kind: BufferKind) -> RawHandle {
        self.state.borrow().bindings.get(&kind).copied().unwrap_or(0)
    }

    /// Contents of a buffer
    pub fn buffer_contents(&self, buffer: RawHandle) -> Option<Vec<u8>> {
        self.state.borrow().buffers.get(&buffer).map(|b| b.data.clone())
    }

    /// Usage hint given with the last mutable upload of a buffer
    pub fn buffer_usage(&self, buffer: RawHandle) -> Option<BufferUsage> {
        self.state.borrow().buffers.get(&buffer).and_then(|b| b.usage)
    }

    pub fn is_buffer_mapped(&self, buffer: RawHandle) -> bool {
        self.state.borrow().buffers.get(&buffer).is_some_and(|b| b.mapped.is_some())
    }

    /// Program made current by the last use_program call
    pub fn current_program(&self) -> RawHandle {
        self.state.borrow().current_program
    }
}

// ============================================================================
// Shader source parsing
// ============================================================================

const PRECISION_QUALIFIERS: [&str; 3] = ["lowp", "mediump", "highp"];

/// Parse one `uniform <type> <name>[N];` line
fn parse_uniform(line: &str) -> Result<Option<Declaration>, String> {
    let body = match line.strip_prefix("uniform") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest,
        _ => return Ok(None),
    };
    if body.contains('{') {
        // Uniform blocks have no locations
        return Ok(None);
    }
    let body = body.trim_end().trim_end_matches(';');
    let body = body.split('=').next().unwrap_or("");
    let tokens: Vec<&str> = body
        .split_whitespace()
        .filter(|t| !PRECISION_QUALIFIERS.contains(t))
        .collect();
    let [type_name, declarator] = tokens.as_slice() else {
        return Err(format!("malformed uniform declaration '{}'", line));
    };
    let ty = UniformType::from_glsl_name(type_name)
        .ok_or_else(|| format!("'{}' : unknown uniform type", type_name))?;

    let (name, array_size) = match declarator.split_once('[') {
        Some((name, rest)) => {
            let size = rest
                .strip_suffix(']')
                .and_then(|n| n.parse::<i32>().ok())
                .filter(|&n| n > 0)
                .ok_or_else(|| format!("'{}' : invalid array size", declarator))?;
            (name, size)
        }
        None => (*declarator, 1),
    };
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("'{}' : invalid identifier", name));
    }
    Ok(Some(Declaration { name: name.to_string(), ty, array_size }))
}

/// Compile `source`: every `uniform` declaration, or the error log
fn compile_source(source: &str) -> Result<Vec<Declaration>, String> {
    let mut errors = Vec::new();
    let mut uniforms = Vec::new();

    for (number, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if let Some(message) = line.strip_prefix("#error") {
            errors.push(format!("ERROR: 0:{}: '#error' : {}", number + 1, message.trim()));
            continue;
        }
        match parse_uniform(line) {
            Ok(Some(decl)) => uniforms.push(decl),
            Ok(None) => {}
            Err(message) => errors.push(format!("ERROR: 0:{}: {}", number + 1, message)),
        }
    }
    if !source.contains("void main") {
        errors.push("ERROR: 0:0: missing entry point 'void main()'".to_string());
    }

    if errors.is_empty() {
        Ok(uniforms)
    } else {
        Err(errors.join("\n"))
    }
}

/// Merge the declarations of every stage and assign locations
fn link_stages(stages: &[&MockShader]) -> Result<Vec<ActiveUniform>, String> {
    if stages.is_empty() {
        return Err("error: no shader stages attached".to_string());
    }
    let has_compute = stages.iter().any(|s| s.kind == StageKind::Compute);
    if has_compute && stages.iter().any(|s| s.kind.is_graphics()) {
        return Err("error: compute stage cannot be linked with graphics stages".to_string());
    }

    let mut merged: Vec<&Declaration> = Vec::new();
    for decl in stages.iter().flat_map(|s| s.uniforms.iter()) {
        match merged.iter().find(|d| d.name == decl.name) {
            Some(existing) if existing.ty != decl.ty || existing.array_size != decl.array_size => {
                return Err(format!(
                    "error: uniform '{}' declared with conflicting types ({} / {})",
                    decl.name, existing.ty, decl.ty
                ));
            }
            Some(_) => {}
            None => merged.push(decl),
        }
    }

    let mut next_location = 0;
    let active = merged
        .into_iter()
        .map(|decl| {
            let location = if decl.name.starts_with("gl_") {
                -1
            } else {
                let location = next_location;
                next_location += decl.array_size;
                location
            };
            let name = if decl.array_size > 1 {
                format!("{}[0]", decl.name)
            } else {
                decl.name.clone()
            };
            ActiveUniform { name, location, ty: decl.ty, array_size: decl.array_size }
        })
        .collect();
    Ok(active)
}

fn range_in_bounds(offset: i64, length: i64, size: usize) -> bool {
    offset >= 0 && length >= 0 && offset.checked_add(length).is_some_and(|end| end <= size as i64)
}

// ============================================================================
// Device implementation
// ============================================================================

impl Device for MockDevice {
    fn name(&self) -> &str {
        "MockDevice"
    }

    fn poll_error(&self) -> Option<DeviceErrorCode> {
        self.state.borrow_mut().errors.pop_front()
    }

    // ===== BUFFERS =====

    fn create_buffer(&self) -> RawHandle {
        self.record("create_buffer".to_string());
        let mut state = self.state.borrow_mut();
        match state.allocate_id() {
            Some(id) => {
                state.buffers.insert(id, MockBuffer::default());
                id
            }
            None => 0,
        }
    }

    fn delete_buffer(&self, buffer: RawHandle) {
        self.record(format!("delete_buffer({})", buffer));
        let mut state = self.state.borrow_mut();
        if state.buffers.remove(&buffer).is_some() {
            state.bindings.retain(|_, bound| *bound != buffer);
        }
    }

    fn bind_buffer(&self, kind: BufferKind, buffer: RawHandle) {
        self.record(format!("bind_buffer({:?}, {})", kind, buffer));
        let mut state = self.state.borrow_mut();
        if buffer != 0 && !state.buffers.contains_key(&buffer) {
            state.raise(DeviceErrorCode::InvalidValue);
            return;
        }
        state.bindings.insert(kind, buffer);
    }

    fn buffer_size(&self, kind: BufferKind) -> i64 {
        let mut state = self.state.borrow_mut();
        state.bound_buffer(kind).map(|b| b.data.len() as i64).unwrap_or(0)
    }

    fn buffer_data(&self, kind: BufferKind, size: i64, data: Option<&[u8]>, usage: BufferUsage) {
        self.record(format!("buffer_data({:?}, {})", kind, size));
        let mut state = self.state.borrow_mut();
        if size < 0 {
            state.raise(DeviceErrorCode::InvalidValue);
            return;
        }
        let Some(buffer) = state.bound_buffer(kind) else { return };
        if buffer.storage.is_some() {
            state.raise(DeviceErrorCode::InvalidOperation);
            return;
        }
        let mut bytes = vec![0u8; size as usize];
        if let Some(data) = data {
            let n = data.len().min(bytes.len());
            bytes[..n].copy_from_slice(&data[..n]);
        }
        buffer.data = bytes;
        buffer.usage = Some(usage);
        buffer.mapped = None;
    }

    fn buffer_storage(&self, kind: BufferKind, size: i64, data: Option<&[u8]>, flags: StorageFlags) {
        self.record(format!("buffer_storage({:?}, {}, {:?})", kind, size, flags));
        let mut state = self.state.borrow_mut();
        if size <= 0 {
            state.raise(DeviceErrorCode::InvalidValue);
            return;
        }
        let Some(buffer) = state.bound_buffer(kind) else { return };
        if buffer.storage.is_some() {
            state.raise(DeviceErrorCode::InvalidOperation);
            return;
        }
        let mut bytes = vec![0u8; size as usize];
        if let Some(data) = data {
            let n = data.len().min(bytes.len());
            bytes[..n].copy_from_slice(&data[..n]);
        }
        buffer.data = bytes;
        buffer.usage = None;
        buffer.storage = Some(flags);
    }

    fn buffer_sub_data(&self, kind: BufferKind, offset: i64, data: &[u8]) {
        self.record(format!("buffer_sub_data({:?}, {}, {})", kind, offset, data.len()));
        let mut state = self.state.borrow_mut();
        let Some(buffer) = state.bound_buffer(kind) else { return };
        let code = if !range_in_bounds(offset, data.len() as i64, buffer.data.len()) {
            Some(DeviceErrorCode::InvalidValue)
        } else if buffer.storage.is_some_and(|f| !f.contains(StorageFlags::DYNAMIC_STORAGE)) {
            Some(DeviceErrorCode::InvalidOperation)
        } else if buffer.mapped.is_some_and(|(_, _, a)| !a.contains(MapAccess::PERSISTENT)) {
            Some(DeviceErrorCode::InvalidOperation)
        } else {
            let start = offset as usize;
            buffer.data[start..start + data.len()].copy_from_slice(data);
            None
        };
        if let Some(code) = code {
            state.raise(code);
        }
    }

    fn get_buffer_sub_data(&self, kind: BufferKind, offset: i64, out: &mut [u8]) {
        self.record(format!("get_buffer_sub_data({:?}, {}, {})", kind, offset, out.len()));
        let mut state = self.state.borrow_mut();
        let Some(buffer) = state.bound_buffer(kind) else { return };
        let code = if !range_in_bounds(offset, out.len() as i64, buffer.data.len()) {
            Some(DeviceErrorCode::InvalidValue)
        } else if buffer.mapped.is_some_and(|(_, _, a)| !a.contains(MapAccess::PERSISTENT)) {
            Some(DeviceErrorCode::InvalidOperation)
        } else {
            let start = offset as usize;
            out.copy_from_slice(&buffer.data[start..start + out.len()]);
            None
        };
        if let Some(code) = code {
            state.raise(code);
        }
    }

    fn map_buffer_range(&self, kind: BufferKind, offset: i64, length: i64, access: MapAccess) -> *mut u8 {
        self.record(format!("map_buffer_range({:?}, {}, {}, {:?})", kind, offset, length, access));
        let mut state = self.state.borrow_mut();
        if std::mem::take(&mut state.fail_next_map) {
            state.raise(DeviceErrorCode::OutOfMemory);
            return std::ptr::null_mut();
        }
        let Some(buffer) = state.bound_buffer(kind) else { return std::ptr::null_mut() };

        let allowed = match buffer.storage {
            Some(flags) => {
                (!access.contains(MapAccess::READ) || flags.contains(StorageFlags::MAP_READ))
                    && (!access.contains(MapAccess::WRITE) || flags.contains(StorageFlags::MAP_WRITE))
                    && (!access.contains(MapAccess::PERSISTENT) || flags.contains(StorageFlags::MAP_PERSISTENT))
                    && (!access.contains(MapAccess::COHERENT) || flags.contains(StorageFlags::MAP_COHERENT))
            }
            None => !access.intersects(MapAccess::PERSISTENT | MapAccess::COHERENT),
        };
        let code = if length <= 0 || !range_in_bounds(offset, length, buffer.data.len()) {
            Some(DeviceErrorCode::InvalidValue)
        } else if buffer.mapped.is_some() || !allowed {
            Some(DeviceErrorCode::InvalidOperation)
        } else {
            None
        };
        if let Some(code) = code {
            state.raise(code);
            return std::ptr::null_mut();
        }

        buffer.mapped = Some((offset, length, access));
        // In bounds: offset + length <= data.len() was checked above
        buffer.data[offset as usize..].as_mut_ptr()
    }

    fn unmap_buffer(&self, kind: BufferKind) -> bool {
        self.record(format!("unmap_buffer({:?})", kind));
        let mut state = self.state.borrow_mut();
        let corrupt = std::mem::take(&mut state.corrupt_next_unmap);
        let Some(buffer) = state.bound_buffer(kind) else { return false };
        if buffer.mapped.take().is_none() {
            state.raise(DeviceErrorCode::InvalidOperation);
            return false;
        }
        !corrupt
    }

    // ===== SHADERS =====

    fn create_shader(&self, kind: StageKind) -> RawHandle {
        self.record(format!("create_shader({:?})", kind));
        let mut state = self.state.borrow_mut();
        match state.allocate_id() {
            Some(id) => {
                state.shaders.insert(id, MockShader {
                    kind,
                    compiled: false,
                    info_log: String::new(),
                    uniforms: Vec::new(),
                });
                id
            }
            None => 0,
        }
    }

    fn delete_shader(&self, shader: RawHandle) {
        self.record(format!("delete_shader({})", shader));
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn compile_shader(&self, shader: RawHandle, source: &str) -> bool {
        self.record(format!("compile_shader({})", shader));
        let mut state = self.state.borrow_mut();
        let Some(object) = state.shaders.get_mut(&shader) else {
            state.raise(DeviceErrorCode::InvalidValue);
            return false;
        };
        match compile_source(source) {
            Ok(uniforms) => {
                object.compiled = true;
                object.info_log.clear();
                object.uniforms = uniforms;
                true
            }
            Err(log) => {
                object.compiled = false;
                object.info_log = log;
                object.uniforms.clear();
                false
            }
        }
    }

    fn shader_info_log(&self, shader: RawHandle) -> String {
        self.state.borrow().shaders.get(&shader).map(|s| s.info_log.clone()).unwrap_or_default()
    }

    // ===== PROGRAMS =====

    fn create_program(&self) -> RawHandle {
        self.record("create_program".to_string());
        let mut state = self.state.borrow_mut();
        match state.allocate_id() {
            Some(id) => {
                state.programs.insert(id, MockProgram::default());
                id
            }
            None => 0,
        }
    }

    fn delete_program(&self, program: RawHandle) {
        self.record(format!("delete_program({})", program));
        let mut state = self.state.borrow_mut();
        if state.programs.remove(&program).is_some() && state.current_program == program {
            state.current_program = 0;
        }
    }

    fn attached_shaders(&self, program: RawHandle) -> Vec<RawHandle> {
        self.state.borrow().programs.get(&program).map(|p| p.attached.clone()).unwrap_or_default()
    }

    fn attach_shader(&self, program: RawHandle, shader: RawHandle) {
        self.record(format!("attach_shader({}, {})", program, shader));
        let mut state = self.state.borrow_mut();
        if !state.shaders.contains_key(&shader) {
            state.raise(DeviceErrorCode::InvalidValue);
            return;
        }
        let code = match state.programs.get_mut(&program) {
            Some(p) if p.attached.contains(&shader) => Some(DeviceErrorCode::InvalidOperation),
            Some(p) => {
                p.attached.push(shader);
                None
            }
            None => Some(DeviceErrorCode::InvalidValue),
        };
        if let Some(code) = code {
            state.raise(code);
        }
    }

    fn detach_shader(&self, program: RawHandle, shader: RawHandle) {
        self.record(format!("detach_shader({}, {})", program, shader));
        let mut state = self.state.borrow_mut();
        let code = match state.programs.get_mut(&program) {
            Some(p) if p.attached.contains(&shader) => {
                p.attached.retain(|&s| s != shader);
                None
            }
            Some(_) => Some(DeviceErrorCode::InvalidOperation),
            None => Some(DeviceErrorCode::InvalidValue),
        };
        if let Some(code) = code {
            state.raise(code);
        }
    }

    fn link_program(&self, program: RawHandle) -> bool {
        self.record(format!("link_program({})", program));
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let Some(object) = state.programs.get_mut(&program) else {
            state.raise(DeviceErrorCode::InvalidValue);
            return false;
        };

        object.linked = false;
        object.active.clear();
        object.slots.clear();
        object.values.clear();

        let mut stages = Vec::new();
        for id in &object.attached {
            match state.shaders.get(id) {
                Some(shader) if shader.compiled => stages.push(shader),
                _ => {
                    object.info_log = format!("error: attached shader {} is not compiled", id);
                    return false;
                }
            }
        }

        match link_stages(&stages) {
            Ok(active) => {
                for uniform in active.iter().filter(|u| u.location >= 0) {
                    for element in 0..uniform.array_size {
                        object.slots.insert(uniform.location + element, (uniform.ty, uniform.array_size - element));
                    }
                }
                object.active = active;
                object.info_log.clear();
                object.linked = true;
                true
            }
            Err(log) => {
                object.info_log = log;
                false
            }
        }
    }

    fn validate_program(&self, program: RawHandle) -> bool {
        self.record(format!("validate_program({})", program));
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let Some(object) = state.programs.get_mut(&program) else {
            state.raise(DeviceErrorCode::InvalidValue);
            return false;
        };
        if let Some(log) = &state.fail_validation {
            object.info_log = log.clone();
            return false;
        }
        if !object.linked {
            object.info_log = "error: program is not linked".to_string();
            return false;
        }
        true
    }

    fn program_info_log(&self, program: RawHandle) -> String {
        self.state.borrow().programs.get(&program).map(|p| p.info_log.clone()).unwrap_or_default()
    }

    fn use_program(&self, program: RawHandle) {
        self.record(format!("use_program({})", program));
        let mut state = self.state.borrow_mut();
        if program == 0 {
            state.current_program = 0;
            return;
        }
        let code = match state.programs.get(&program) {
            Some(p) if p.linked => None,
            Some(_) => Some(DeviceErrorCode::InvalidOperation),
            None => Some(DeviceErrorCode::InvalidValue),
        };
        match code {
            Some(code) => state.raise(code),
            None => state.current_program = program,
        }
    }

    // ===== UNIFORMS =====

    fn active_uniform_count(&self, program: RawHandle) -> u32 {
        self.state.borrow().programs.get(&program).map(|p| p.active.len() as u32).unwrap_or(0)
    }

    fn active_uniform(&self, program: RawHandle, index: u32) -> ActiveUniform {
        let mut state = self.state.borrow_mut();
        let found = state.programs.get(&program).and_then(|p| p.active.get(index as usize).cloned());
        found.unwrap_or_else(|| {
            state.raise(DeviceErrorCode::InvalidValue);
            ActiveUniform {
                name: String::new(),
                location: -1,
                ty: UniformType::Unsupported(0),
                array_size: 0,
            }
        })
    }

    fn set_uniform(&self, location: i32, values: &[UniformValue]) {
        self.record(format!("set_uniform({}, {})", location, values.len()));
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let current = state.current_program;
        let Some(object) = state.programs.get_mut(&current) else {
            state.raise(DeviceErrorCode::InvalidOperation);
            return;
        };
        if location == -1 {
            return;
        }
        let fits = match object.slots.get(&location) {
            Some(&(ty, left)) => values.len() as i32 <= left && values.iter().all(|v| v.ty() == ty),
            None => false,
        };
        if !fits {
            state.raise(DeviceErrorCode::InvalidOperation);
            return;
        }
        for (i, value) in values.iter().enumerate() {
            object.values.insert(location + i as i32, *value);
        }
    }

    fn get_uniform(&self, program: RawHandle, location: i32, ty: UniformType) -> UniformValue {
        let mut state = self.state.borrow_mut();
        let stored = match state.programs.get(&program) {
            Some(p) if p.linked && p.slots.contains_key(&location) => {
                Ok(p.values.get(&location).copied().or_else(|| UniformValue::zero(ty)))
            }
            Some(_) => Err(DeviceErrorCode::InvalidOperation),
            None => Err(DeviceErrorCode::InvalidValue),
        };
        match stored {
            Ok(Some(value)) => value,
            Ok(None) => UniformValue::Float(0.0),
            Err(code) => {
                state.raise(code);
                UniformValue::zero(ty).unwrap_or(UniformValue::Float(0.0))
            }
        }
    }
}

#[cfg(test)]
#[path = "mock_tests.rs"]
mod tests;

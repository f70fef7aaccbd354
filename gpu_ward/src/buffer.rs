/// Device buffer with upload, range I/O and a checked mapping state machine.
///
/// A Buffer owns one device buffer object for its whole lifetime and releases
/// it on drop. Every call that touches device memory first binds the buffer to
/// the binding point of its kind.
///
/// State:
/// - Unmapped: upload, allocate_storage, write_range, read_range, map_range
/// - Mapped: unmap; write_range/read_range only if mapped with PERSISTENT
///
/// Storage flags given to `allocate_storage` are remembered so that a
/// persistent mapping can be refused before the device sees it.

use std::ptr::NonNull;

use bytemuck::Pod;

use crate::context::Context;
use crate::device::{BufferKind, BufferUsage, RawHandle};
use crate::error::Result;
use crate::flags::{validate_map_access, validate_storage_flags, MapAccess, StorageFlags};
use crate::{ward_bail, ward_err, ward_trace};

const SOURCE: &str = "ward::Buffer";

// ===== MAPPING =====

/// Active mapping of a buffer range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    ptr: NonNull<u8>,
    offset: i64,
    length: i64,
    access: MapAccess,
}

impl Mapping {
    /// Host pointer to the first mapped byte
    ///
    /// Valid for `length()` bytes until the buffer is unmapped, released or
    /// re-uploaded. Reads need `MapAccess::READ`, writes `MapAccess::WRITE`.
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    pub fn offset(&self) -> i64 { self.offset }

    pub fn length(&self) -> i64 { self.length }

    pub fn access(&self) -> MapAccess { self.access }
}

// ===== BUFFER =====

/// Single-owner device buffer
pub struct Buffer {
    ctx: Context,
    handle: RawHandle,
    kind: BufferKind,
    mapping: Option<Mapping>,
    storage_flags: StorageFlags,
}

impl Buffer {
    /// Create a buffer object for binding point `kind`
    pub fn new(ctx: &Context, kind: BufferKind) -> Result<Self> {
        let handle = Self::create_handle(ctx)?;
        ward_trace!(SOURCE, "Created buffer {} ({:?})", handle, kind);
        Ok(Self {
            ctx: ctx.clone(),
            handle,
            kind,
            mapping: None,
            storage_flags: StorageFlags::empty(),
        })
    }

    fn create_handle(ctx: &Context) -> Result<RawHandle> {
        let handle = ctx.device().create_buffer();
        ctx.check_errors("Buffer::new");
        if handle == 0 {
            ward_bail!(SOURCE, CreationFailed, "Failed to create buffer object");
        }
        Ok(handle)
    }

    /// Release the device object. Idempotent.
    pub fn release(&mut self) {
        if self.handle != 0 {
            self.ctx.device().delete_buffer(self.handle);
            self.ctx.check_errors("Buffer::release");
            ward_trace!(SOURCE, "Released buffer {}", self.handle);
        }
        self.handle = 0;
        self.mapping = None;
        self.storage_flags = StorageFlags::empty();
    }

    /// Release the device object and create a fresh one of the same kind
    pub fn reset(&mut self) -> Result<()> {
        self.release();
        self.handle = Self::create_handle(&self.ctx)?;
        ward_trace!(SOURCE, "Created buffer {} ({:?})", self.handle, self.kind);
        Ok(())
    }

    // ===== ACCESSORS =====

    pub fn handle(&self) -> RawHandle { self.handle }

    pub fn exists(&self) -> bool { self.handle != 0 }

    pub fn kind(&self) -> BufferKind { self.kind }

    pub fn is_mapped(&self) -> bool { self.mapping.is_some() }

    /// Access flags of the active mapping (empty while unmapped)
    pub fn map_access(&self) -> MapAccess {
        self.mapping.map(|m| m.access).unwrap_or_default()
    }

    /// Flags of the last `allocate_storage` (empty after `upload`)
    pub fn storage_flags(&self) -> StorageFlags { self.storage_flags }

    pub fn mapping(&self) -> Option<&Mapping> { self.mapping.as_ref() }

    // ===== DEVICE CALLS =====

    fn require_exists(&self, op: &str) -> Result<()> {
        if self.handle == 0 {
            ward_bail!(SOURCE, InvalidState, "Buffer::{}: buffer object does not exist", op);
        }
        Ok(())
    }

    fn bind_raw(&self) {
        self.ctx.device().bind_buffer(self.kind, self.handle);
    }

    /// Bind to the binding point of this buffer's kind
    pub fn bind(&self) -> Result<()> {
        self.require_exists("bind")?;
        self.bind_raw();
        self.ctx.check_errors("Buffer::bind");
        Ok(())
    }

    /// Current byte size, queried from the device
    pub fn size(&self) -> Result<i64> {
        self.require_exists("size")?;
        self.bind_raw();
        let size = self.ctx.device().buffer_size(self.kind);
        self.ctx.check_errors("Buffer::size");
        Ok(size)
    }

    /// Replace the whole data store (mutable storage)
    ///
    /// `data` must hold at least `size` bytes; `None` leaves the contents
    /// undefined. Forgets any storage flags from a previous `allocate_storage`.
    pub fn upload(&mut self, size: i64, data: Option<&[u8]>, usage: BufferUsage) -> Result<()> {
        self.require_exists("upload")?;
        if size < 0 {
            ward_bail!(SOURCE, InvalidArgument, "size may not be negative (got {})", size);
        }
        check_data_len(data, size)?;
        if self.is_mapped() {
            ward_bail!(SOURCE, InvalidState, "upload can't be used while the buffer is mapped");
        }
        self.storage_flags = StorageFlags::empty();
        self.bind_raw();
        self.ctx.device().buffer_data(self.kind, size, data, usage);
        self.ctx.check_errors("Buffer::upload");
        Ok(())
    }

    /// Upload a slice of plain values as the whole data store
    pub fn upload_slice<T: Pod>(&mut self, data: &[T], usage: BufferUsage) -> Result<()> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        self.upload(bytes.len() as i64, Some(bytes), usage)
    }

    /// Allocate fixed-size immutable storage
    ///
    /// The flags are validated first and remembered for later mapping checks.
    pub fn allocate_storage(&mut self, size: i64, data: Option<&[u8]>, flags: StorageFlags) -> Result<()> {
        self.require_exists("allocate_storage")?;
        if size <= 0 {
            ward_bail!(SOURCE, InvalidArgument, "size must be greater than 0 (got {})", size);
        }
        check_data_len(data, size)?;
        if let Err(reason) = validate_storage_flags(flags) {
            ward_bail!(SOURCE, ValidationFailed, "Invalid storage flags:\n{}", reason);
        }
        if self.is_mapped() {
            ward_bail!(SOURCE, InvalidState, "allocate_storage can't be used while the buffer is mapped");
        }
        self.storage_flags = flags;
        self.bind_raw();
        self.ctx.device().buffer_storage(self.kind, size, data, flags);
        self.ctx.check_errors("Buffer::allocate_storage");
        Ok(())
    }

    /// Allocate immutable storage initialized from a slice of plain values
    pub fn allocate_storage_slice<T: Pod>(&mut self, data: &[T], flags: StorageFlags) -> Result<()> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        self.allocate_storage(bytes.len() as i64, Some(bytes), flags)
    }

    fn check_range_io(&self, op: &str, offset: i64, length: i64) -> Result<()> {
        self.require_exists(op)?;
        if offset < 0 {
            ward_bail!(SOURCE, InvalidArgument, "offset may not be negative (got {})", offset);
        }
        let size = self.size()?;
        if range_exceeds(offset, length, size) {
            ward_bail!(
                SOURCE, InvalidArgument,
                "length + offset may not be greater than size() ({} + {} > {})",
                length, offset, size
            );
        }
        if self.is_mapped() && !self.map_access().contains(MapAccess::PERSISTENT) {
            ward_bail!(
                SOURCE, InvalidState,
                "{} can't be used when the buffer is mapped without MapAccess::PERSISTENT",
                op
            );
        }
        Ok(())
    }

    /// Write `data` at byte `offset`
    pub fn write_range(&mut self, offset: i64, data: &[u8]) -> Result<()> {
        self.check_range_io("write_range", offset, data.len() as i64)?;
        self.bind_raw();
        self.ctx.device().buffer_sub_data(self.kind, offset, data);
        self.ctx.check_errors("Buffer::write_range");
        Ok(())
    }

    /// Read `out.len()` bytes starting at byte `offset`
    pub fn read_range(&self, offset: i64, out: &mut [u8]) -> Result<()> {
        self.check_range_io("read_range", offset, out.len() as i64)?;
        self.bind_raw();
        self.ctx.device().get_buffer_sub_data(self.kind, offset, out);
        self.ctx.check_errors("Buffer::read_range");
        Ok(())
    }

    /// Write a slice of plain values at byte `offset`
    pub fn write_slice<T: Pod>(&mut self, offset: i64, data: &[T]) -> Result<()> {
        self.write_range(offset, bytemuck::cast_slice(data))
    }

    /// Fill a slice of plain values from byte `offset`
    pub fn read_slice<T: Pod>(&self, offset: i64, out: &mut [T]) -> Result<()> {
        self.read_range(offset, bytemuck::cast_slice_mut(out))
    }

    /// Map `length` bytes at `offset` into host memory
    ///
    /// Only one mapping may be active at a time. `MapAccess::PERSISTENT`
    /// requires storage allocated with `StorageFlags::MAP_PERSISTENT`.
    pub fn map_range(&mut self, offset: i64, length: i64, access: MapAccess) -> Result<NonNull<u8>> {
        self.require_exists("map_range")?;
        if self.is_mapped() {
            ward_bail!(SOURCE, InvalidState, "Buffer is already mapped");
        }
        if length <= 0 {
            ward_bail!(SOURCE, InvalidArgument, "length must be greater than 0 (got {})", length);
        }
        if offset < 0 {
            ward_bail!(SOURCE, InvalidArgument, "offset may not be negative (got {})", offset);
        }
        let size = self.size()?;
        if range_exceeds(offset, length, size) {
            ward_bail!(
                SOURCE, InvalidArgument,
                "length + offset may not be greater than size() ({} + {} > {})",
                length, offset, size
            );
        }
        if let Err(reason) = validate_map_access(access) {
            ward_bail!(SOURCE, ValidationFailed, "Invalid map access:\n{}", reason);
        }
        if access.contains(MapAccess::PERSISTENT) && !self.storage_flags.contains(StorageFlags::MAP_PERSISTENT) {
            ward_bail!(
                SOURCE, ValidationFailed,
                "MapAccess::PERSISTENT requires StorageFlags::MAP_PERSISTENT to be set through allocate_storage"
            );
        }

        self.bind_raw();
        let ptr = self.ctx.device().map_buffer_range(self.kind, offset, length, access);
        self.ctx.check_errors("Buffer::map_range");
        let ptr = NonNull::new(ptr)
            .ok_or_else(|| ward_err!(SOURCE, BackendError, "map_buffer_range returned a null pointer"))?;

        self.mapping = Some(Mapping { ptr, offset, length, access });
        Ok(ptr)
    }

    /// End the active mapping
    ///
    /// The buffer is unmapped afterwards even when the device reports that the
    /// contents were corrupted while mapped; that case returns `DataCorrupted`.
    pub fn unmap(&mut self) -> Result<()> {
        self.require_exists("unmap")?;
        if !self.is_mapped() {
            ward_bail!(SOURCE, InvalidState, "Buffer is not mapped");
        }
        self.bind_raw();
        let intact = self.ctx.device().unmap_buffer(self.kind);
        self.mapping = None;
        self.ctx.check_errors("Buffer::unmap");
        if !intact {
            ward_bail!(SOURCE, DataCorrupted, "unmap signalled data corruption");
        }
        Ok(())
    }
}

/// True if `offset + length` overflows or ends past `size`
fn range_exceeds(offset: i64, length: i64, size: i64) -> bool {
    offset.checked_add(length).map_or(true, |end| end > size)
}

fn check_data_len(data: Option<&[u8]>, size: i64) -> Result<()> {
    if let Some(data) = data {
        if (data.len() as i64) < size {
            ward_bail!(SOURCE, InvalidArgument, "data holds {} bytes but size is {}", data.len(), size);
        }
    }
    Ok(())
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("handle", &self.handle)
            .field("kind", &self.kind)
            .field("mapping", &self.mapping)
            .field("storage_flags", &self.storage_flags)
            .finish()
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;

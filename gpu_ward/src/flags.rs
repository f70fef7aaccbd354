//! Mapping-access and storage flags, and the rule table that validates them
//!
//! Both validators are pure: they issue no device call and log nothing. The
//! buffer turns a [`FlagError`] into `Error::ValidationFailed`.

use std::fmt;
use bitflags::bitflags;

bitflags! {
    /// Access requested when mapping a buffer range
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MapAccess: u32 {
        /// The mapped range may be read
        const READ = 1 << 0;
        /// The mapped range may be written
        const WRITE = 1 << 1;
        /// The mapping stays valid while the device uses the buffer
        const PERSISTENT = 1 << 2;
        /// Persistent writes become visible without an explicit barrier
        const COHERENT = 1 << 3;
        /// Previous contents of the range may be discarded
        const INVALIDATE_RANGE = 1 << 4;
        /// Previous contents of the whole buffer may be discarded
        const INVALIDATE_BUFFER = 1 << 5;
        /// Modified sub-ranges are flushed explicitly by the caller
        const FLUSH_EXPLICIT = 1 << 6;
        /// The device does not synchronize pending operations on the buffer
        const UNSYNCHRONIZED = 1 << 7;
    }
}

bitflags! {
    /// Flags of an immutable (fixed-size) storage allocation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StorageFlags: u32 {
        /// Contents may be updated through sub-data writes
        const DYNAMIC_STORAGE = 1 << 0;
        /// The store may be mapped for reading
        const MAP_READ = 1 << 1;
        /// The store may be mapped for writing
        const MAP_WRITE = 1 << 2;
        /// The store may stay mapped while the device uses it
        const MAP_PERSISTENT = 1 << 3;
        /// Persistent mappings may be coherent
        const MAP_COHERENT = 1 << 4;
        /// Prefer client-side memory for the store
        const CLIENT_STORAGE = 1 << 5;
    }
}

/// Reason a flag combination was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagError {
    NoReadOrWrite,
    InvalidateRangeWithRead,
    InvalidateBufferWithRead,
    UnsynchronizedWithRead,
    FlushExplicitWithoutWrite,
    PersistentWithoutMapAccess,
    CoherentWithoutPersistent,
}

impl fmt::Display for FlagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FlagError::NoReadOrWrite => "Neither MapAccess::READ nor MapAccess::WRITE is set",
            FlagError::InvalidateRangeWithRead => "MapAccess::INVALIDATE_RANGE can't be used with MapAccess::READ",
            FlagError::InvalidateBufferWithRead => "MapAccess::INVALIDATE_BUFFER can't be used with MapAccess::READ",
            FlagError::UnsynchronizedWithRead => "MapAccess::UNSYNCHRONIZED can't be used with MapAccess::READ",
            FlagError::FlushExplicitWithoutWrite => "MapAccess::WRITE must be set when using MapAccess::FLUSH_EXPLICIT",
            FlagError::PersistentWithoutMapAccess => {
                "StorageFlags::MAP_READ or StorageFlags::MAP_WRITE must be set when using StorageFlags::MAP_PERSISTENT"
            }
            FlagError::CoherentWithoutPersistent => {
                "StorageFlags::MAP_PERSISTENT must be set when using StorageFlags::MAP_COHERENT"
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for FlagError {}

/// Check a mapping-access combination against the device's legality rules
pub fn validate_map_access(access: MapAccess) -> Result<(), FlagError> {
    if !access.intersects(MapAccess::READ | MapAccess::WRITE) {
        return Err(FlagError::NoReadOrWrite);
    }
    if access.contains(MapAccess::INVALIDATE_RANGE | MapAccess::READ) {
        return Err(FlagError::InvalidateRangeWithRead);
    }
    if access.contains(MapAccess::INVALIDATE_BUFFER | MapAccess::READ) {
        return Err(FlagError::InvalidateBufferWithRead);
    }
    if access.contains(MapAccess::UNSYNCHRONIZED | MapAccess::READ) {
        return Err(FlagError::UnsynchronizedWithRead);
    }
    if access.contains(MapAccess::FLUSH_EXPLICIT) && !access.contains(MapAccess::WRITE) {
        return Err(FlagError::FlushExplicitWithoutWrite);
    }
    Ok(())
}

/// Check a storage-flag combination against the device's legality rules
pub fn validate_storage_flags(flags: StorageFlags) -> Result<(), FlagError> {
    if flags.contains(StorageFlags::MAP_PERSISTENT)
        && !flags.intersects(StorageFlags::MAP_READ | StorageFlags::MAP_WRITE)
    {
        return Err(FlagError::PersistentWithoutMapAccess);
    }
    if flags.contains(StorageFlags::MAP_COHERENT) && !flags.contains(StorageFlags::MAP_PERSISTENT) {
        return Err(FlagError::CoherentWithoutPersistent);
    }
    Ok(())
}

#[cfg(test)]
#[path = "flags_tests.rs"]
mod tests;

use super::*;

// ============================================================================
// MAP ACCESS
// ============================================================================

#[test]
fn test_map_access_requires_read_or_write() {
    assert_eq!(validate_map_access(MapAccess::empty()), Err(FlagError::NoReadOrWrite));
    assert_eq!(validate_map_access(MapAccess::PERSISTENT), Err(FlagError::NoReadOrWrite));
}

#[test]
fn test_map_access_accepts_plain_read_and_write() {
    assert!(validate_map_access(MapAccess::READ).is_ok());
    assert!(validate_map_access(MapAccess::WRITE).is_ok());
    assert!(validate_map_access(MapAccess::READ | MapAccess::WRITE).is_ok());
}

#[test]
fn test_map_access_rejects_read_with_write_only_hints() {
    assert_eq!(
        validate_map_access(MapAccess::READ | MapAccess::INVALIDATE_RANGE),
        Err(FlagError::InvalidateRangeWithRead)
    );
    assert_eq!(
        validate_map_access(MapAccess::READ | MapAccess::WRITE | MapAccess::INVALIDATE_BUFFER),
        Err(FlagError::InvalidateBufferWithRead)
    );
    assert_eq!(
        validate_map_access(MapAccess::READ | MapAccess::UNSYNCHRONIZED),
        Err(FlagError::UnsynchronizedWithRead)
    );
}

#[test]
fn test_map_access_write_hints_are_fine_without_read() {
    assert!(validate_map_access(
        MapAccess::WRITE | MapAccess::INVALIDATE_RANGE | MapAccess::INVALIDATE_BUFFER | MapAccess::UNSYNCHRONIZED
    )
    .is_ok());
}

#[test]
fn test_map_access_flush_explicit_needs_write() {
    assert_eq!(
        validate_map_access(MapAccess::READ | MapAccess::FLUSH_EXPLICIT),
        Err(FlagError::FlushExplicitWithoutWrite)
    );
    assert!(validate_map_access(MapAccess::WRITE | MapAccess::FLUSH_EXPLICIT).is_ok());
}

#[test]
fn test_map_access_persistent_coherent_is_not_checked_here() {
    assert!(validate_map_access(MapAccess::READ | MapAccess::PERSISTENT | MapAccess::COHERENT).is_ok());
}

// ============================================================================
// STORAGE FLAGS
// ============================================================================

#[test]
fn test_storage_flags_empty_is_valid() {
    assert!(validate_storage_flags(StorageFlags::empty()).is_ok());
    assert!(validate_storage_flags(StorageFlags::DYNAMIC_STORAGE | StorageFlags::CLIENT_STORAGE).is_ok());
}

#[test]
fn test_storage_flags_persistent_needs_map_access() {
    assert_eq!(
        validate_storage_flags(StorageFlags::MAP_PERSISTENT),
        Err(FlagError::PersistentWithoutMapAccess)
    );
    assert!(validate_storage_flags(StorageFlags::MAP_PERSISTENT | StorageFlags::MAP_WRITE).is_ok());
}

#[test]
fn test_storage_flags_coherent_needs_persistent() {
    assert_eq!(
        validate_storage_flags(StorageFlags::MAP_COHERENT),
        Err(FlagError::CoherentWithoutPersistent)
    );
    assert_eq!(
        validate_storage_flags(StorageFlags::MAP_COHERENT | StorageFlags::MAP_READ),
        Err(FlagError::CoherentWithoutPersistent)
    );
    assert!(validate_storage_flags(
        StorageFlags::MAP_PERSISTENT | StorageFlags::MAP_READ | StorageFlags::MAP_COHERENT
    )
    .is_ok());
}

#[test]
fn test_flag_error_messages_name_the_flags() {
    assert!(FlagError::FlushExplicitWithoutWrite.to_string().contains("FLUSH_EXPLICIT"));
    assert!(FlagError::CoherentWithoutPersistent.to_string().contains("MAP_COHERENT"));
}

//! Active-uniform reflection
//!
//! After a successful link the program asks [`UniformReflector`] for a fresh
//! [`UniformIndex`]. The index owns one arena of slots and two lookup maps
//! into it; it is only ever built whole and replaced whole.

use rustc_hash::FxHashMap;

use crate::device::{Device, RawHandle};
use crate::uniform::UniformType;

/// One reflected uniform declaration
#[derive(Debug, Clone, PartialEq)]
pub struct UniformSlot {
    /// Base name (array suffix stripped)
    pub name: String,
    /// Device location of element 0
    pub location: i32,
    /// Declared type
    pub ty: UniformType,
    /// Declared array length (1 if not an array)
    pub array_size: i32,
}

/// Name and location index over the active uniforms of one link
#[derive(Debug, Clone, Default)]
pub struct UniformIndex {
    slots: Vec<UniformSlot>,
    by_name: FxHashMap<String, usize>,
    by_location: FxHashMap<i32, usize>,
}

impl UniformIndex {
    /// Build an index from slots. When two slots share a name or a location,
    /// the later one replaces the earlier one.
    pub fn from_slots(slots: impl IntoIterator<Item = UniformSlot>) -> Self {
        let mut index = Self::default();
        let mut kept: Vec<UniformSlot> = Vec::new();
        for slot in slots.into_iter().collect::<Vec<_>>().into_iter().rev() {
            if kept.iter().any(|k| k.name == slot.name || k.location == slot.location) {
                continue;
            }
            kept.push(slot);
        }
        for slot in kept.into_iter().rev() {
            let at = index.slots.len();
            index.by_name.insert(slot.name.clone(), at);
            index.by_location.insert(slot.location, at);
            index.slots.push(slot);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot declared at `location`
    pub fn by_location(&self, location: i32) -> Option<&UniformSlot> {
        self.by_location.get(&location).map(|&i| &self.slots[i])
    }

    /// Slot declared under `name`
    pub fn by_name(&self, name: &str) -> Option<&UniformSlot> {
        self.by_name.get(name).map(|&i| &self.slots[i])
    }

    /// Slots in device enumeration order
    pub fn iter(&self) -> impl Iterator<Item = &UniformSlot> {
        self.slots.iter()
    }
}

/// Builds a [`UniformIndex`] from a linked program
pub struct UniformReflector;

impl UniformReflector {
    /// Enumerate the active uniforms of `program`
    ///
    /// Uniforms without a location (block members, built-ins) are skipped.
    /// Arrays are reported by the device as `name[0]`; the suffix is removed.
    pub fn reflect(device: &dyn Device, program: RawHandle) -> UniformIndex {
        let count = device.active_uniform_count(program);
        let slots = (0..count).filter_map(|i| {
            let active = device.active_uniform(program, i);
            if active.location < 0 {
                return None;
            }
            Some(UniformSlot {
                name: base_name(&active.name, active.array_size).to_string(),
                location: active.location,
                ty: active.ty,
                array_size: active.array_size,
            })
        });
        UniformIndex::from_slots(slots)
    }
}

fn base_name(name: &str, array_size: i32) -> &str {
    if array_size > 1 {
        if let Some(stripped) = name.strip_suffix("[0]") {
            return stripped;
        }
    }
    name
}

#[cfg(test)]
#[path = "reflection_tests.rs"]
mod tests;

//! Activity id interning.
//!
//! Maps activity id strings to dense indices in declaration order, so the
//! activity-level checks can run on plain vectors.

use rustc_hash::FxHashMap;

/// Interned activity index (position in declaration order).
pub type ActivityIndex = u32;

#[derive(Debug, Clone)]
pub struct ActivityInterner {
    to_int: FxHashMap<String, ActivityIndex>,
    from_int: Vec<String>,
}

impl ActivityInterner {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_int: Vec::with_capacity(capacity),
        }
    }

    /// Intern a new id. Returns `None` if the id was already interned.
    pub fn insert(&mut self, s: &str) -> Option<ActivityIndex> {
        if self.to_int.contains_key(s) {
            return None;
        }
        let id = self.from_int.len() as ActivityIndex;
        self.from_int.push(s.to_string());
        self.to_int.insert(s.to_string(), id);
        Some(id)
    }

    #[inline]
    pub fn get(&self, s: &str) -> Option<ActivityIndex> {
        self.to_int.get(s).copied()
    }

    #[inline]
    pub fn resolve(&self, id: ActivityIndex) -> Option<&str> {
        self.from_int.get(id as usize).map(|s| s.as_str())
    }
}

impl Default for ActivityInterner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_in_declaration_order() {
        let mut interner = ActivityInterner::with_capacity(4);

        assert_eq!(interner.insert("A"), Some(0));
        assert_eq!(interner.insert("B"), Some(1));
        assert_eq!(interner.insert("A"), None); // duplicate

        assert_eq!(interner.get("B"), Some(1));
        assert_eq!(interner.resolve(2), None); // the duplicate took no slot
        assert_eq!(interner.get("Z"), None);
        assert_eq!(interner.resolve(0), Some("A"));
        assert_eq!(interner.resolve(7), None);
    }
}

//! Ordered, deduplicated drug selection.

use crate::models::Drug;

/// Minimum number of drugs before an interaction check makes sense.
pub const MIN_CHECK_SELECTION: usize = 2;

/// The user's selection set.
///
/// Insertion order is display order and `name` is unique. Every effective
/// mutation bumps `version`, so holders of an older version can tell the
/// selection has moved on.
#[derive(Debug, Default, Clone)]
pub struct SelectionStore {
    drugs: Vec<Drug>,
    version: u64,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a drug unless one with the same name is already selected.
    ///
    /// Returns `true` if the selection changed.
    pub fn add(&mut self, drug: Drug) -> bool {
        if self.contains(&drug.name) {
            return false;
        }
        self.drugs.push(drug);
        self.version += 1;
        true
    }

    /// Remove the drug with this name. Returns `true` if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.drugs.len();
        self.drugs.retain(|d| !d.is_named(name));
        let changed = self.drugs.len() != before;
        if changed {
            self.version += 1;
        }
        changed
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.drugs.clear();
        self.version += 1;
    }

    pub fn list(&self) -> &[Drug] {
        &self.drugs
    }

    /// Selected names in display order.
    pub fn names(&self) -> Vec<String> {
        self.drugs.iter().map(|d| d.name.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.drugs.iter().any(|d| d.is_named(name))
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }

    /// Whether enough drugs are selected to run a check.
    pub fn can_check(&self) -> bool {
        self.drugs.len() >= MIN_CHECK_SELECTION
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_order() {
        let mut store = SelectionStore::new();
        store.add(Drug::new("Warfarin"));
        store.add(Drug::new("Aspirin"));
        store.add(Drug::new("Ibuprofen"));

        assert_eq!(store.names(), vec!["Warfarin", "Aspirin", "Ibuprofen"]);
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut store = SelectionStore::new();
        assert!(store.add(Drug::new("Aspirin")));
        let version = store.version();

        assert!(!store.add(Drug::new("Aspirin")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.version(), version);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut store = SelectionStore::new();
        store.add(Drug::new("Aspirin"));
        store.add(Drug::new("aspirin"));

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = SelectionStore::new();
        store.add(Drug::new("Aspirin"));
        let version = store.version();

        assert!(!store.remove("Warfarin"));
        assert_eq!(store.version(), version);
        assert!(store.remove("Aspirin"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_can_check_threshold() {
        let mut store = SelectionStore::new();
        store.add(Drug::new("Aspirin"));
        assert!(!store.can_check());

        store.add(Drug::new("Warfarin"));
        assert!(store.can_check());

        store.remove("Aspirin");
        assert!(!store.can_check());
    }

    #[test]
    fn test_clear_bumps_version() {
        let mut store = SelectionStore::new();
        store.add(Drug::new("Aspirin"));
        let version = store.version();

        store.clear();
        assert!(store.is_empty());
        assert!(store.version() > version);
    }
}

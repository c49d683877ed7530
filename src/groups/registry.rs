use super::presets::{BLACK_NUMBERS, DOZENS, ORPHELINS, RED_NUMBERS, TIERS, VOISINS};
use crate::error::{Result, SpinbiasError};
use crate::types::{Group, GroupSpec, Symbol};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Named groups in insertion order. Insertion order is the default
/// priority order for overlap resolution.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: Vec<Group>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    groups: Vec<GroupSpec>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Wheel sectors, colors and dozens.
    pub fn with_presets() -> Self {
        let mut registry = Self::new();
        registry.register_sectors();
        registry.register_colors();
        registry.register_dozens();
        registry
    }

    pub fn add_group<I>(&mut self, name: &str, members: I) -> Result<()>
    where
        I: IntoIterator<Item = i64>,
    {
        let group = Group::new(name, members)?;
        self.insert(group)
    }

    /// Register `start..=end` as a group.
    pub fn add_range(&mut self, name: &str, start: i64, end: i64) -> Result<()> {
        if start > end {
            return Err(SpinbiasError::Validation(format!(
                "Range start {} is greater than end {}",
                start, end
            )));
        }
        self.add_group(name, start..=end)
    }

    pub fn insert(&mut self, group: Group) -> Result<()> {
        if self.contains(group.name()) {
            return Err(SpinbiasError::Validation(format!(
                "Group '{}' already exists",
                group.name()
            )));
        }
        log::debug!("Registered group '{}' with {} members", group.name(), group.len());
        self.groups.push(group);
        Ok(())
    }

    pub fn remove_group(&mut self, name: &str) -> Result<Group> {
        let position = self
            .groups
            .iter()
            .position(|g| g.name() == name)
            .ok_or_else(|| SpinbiasError::Validation(format!("Unknown group '{}'", name)))?;
        Ok(self.groups.remove(position))
    }

    pub fn list_groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn snapshot(&self) -> Vec<Group> {
        self.groups.clone()
    }

    /// Explicit priority list built from group names.
    pub fn ordered(&self, names: &[&str]) -> Result<Vec<Group>> {
        names
            .iter()
            .map(|name| {
                self.get(name)
                    .cloned()
                    .ok_or_else(|| SpinbiasError::Validation(format!("Unknown group '{}'", name)))
            })
            .collect()
    }

    /// Register the union of existing groups under `new_name`.
    pub fn combine(&mut self, names: &[&str], new_name: &str) -> Result<&Group> {
        if names.is_empty() {
            return Err(SpinbiasError::Validation(
                "At least one group is required to combine".to_string(),
            ));
        }
        let members: Vec<i64> = self
            .ordered(names)?
            .iter()
            .flat_map(|g| g.members().iter().map(|&s| s as i64).collect::<Vec<_>>())
            .collect();
        self.add_group(new_name, members)?;
        Ok(&self.groups[self.groups.len() - 1])
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SpinbiasError::Configuration(format!("Failed to read registry: {}", e)))?;
        let file: RegistryFile = toml::from_str(&contents)?;

        let mut registry = Self::new();
        for spec in file.groups {
            registry.insert(Group::try_from(spec)?)?;
        }
        Ok(registry)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = RegistryFile {
            groups: self.groups.iter().map(GroupSpec::from).collect(),
        };
        let toml_str = toml::to_string_pretty(&file)
            .map_err(|e| SpinbiasError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| SpinbiasError::Configuration(format!("Failed to write registry: {}", e)))?;

        Ok(())
    }

    fn register_sectors(&mut self) {
        self.register_preset("Voisins", &VOISINS);
        self.register_preset("Orphelins", &ORPHELINS);
        self.register_preset("Tiers", &TIERS);
    }

    fn register_colors(&mut self) {
        self.register_preset("Red", &RED_NUMBERS);
        self.register_preset("Black", &BLACK_NUMBERS);
    }

    fn register_dozens(&mut self) {
        for (i, (start, end)) in DOZENS.iter().enumerate() {
            let members: Vec<Symbol> = (*start..=*end).collect();
            self.register_preset(&format!("Dozen {}", i + 1), &members);
        }
    }

    fn register_preset(&mut self, name: &str, members: &[Symbol]) {
        if let Err(e) = self.add_group(name, members.iter().map(|&s| s as i64)) {
            log::warn!("Skipping preset '{}': {}", name, e);
        }
    }
}

/// Registry shared between the I/O layer and analyses. Each call is
/// atomic; analyses work on [`SharedRegistry::snapshot`].
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<GroupRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: GroupRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn add_group<I>(&self, name: &str, members: I) -> Result<()>
    where
        I: IntoIterator<Item = i64>,
    {
        self.write(|r| r.add_group(name, members))
    }

    pub fn add_range(&self, name: &str, start: i64, end: i64) -> Result<()> {
        self.write(|r| r.add_range(name, start, end))
    }

    pub fn remove_group(&self, name: &str) -> Result<Group> {
        self.write(|r| r.remove_group(name))
    }

    pub fn list_groups(&self) -> Result<Vec<Group>> {
        self.snapshot()
    }

    pub fn snapshot(&self) -> Result<Vec<Group>> {
        let registry = self.inner.read().map_err(|_| poisoned())?;
        Ok(registry.snapshot())
    }

    fn write<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut GroupRegistry) -> Result<T>,
    {
        let mut registry = self.inner.write().map_err(|_| poisoned())?;
        f(&mut registry)
    }
}

fn poisoned() -> SpinbiasError {
    SpinbiasError::Configuration("Group registry lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_list_in_insertion_order() {
        let mut registry = GroupRegistry::new();
        registry.add_group("Low", vec![1, 2, 3]).unwrap();
        registry.add_range("High", 30, 36).unwrap();

        let names: Vec<&str> = registry.list_groups().iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["Low", "High"]);
        assert_eq!(registry.get("High").unwrap().len(), 7);
    }

    #[test]
    fn test_rejects_blank_duplicate_and_out_of_range() {
        let mut registry = GroupRegistry::new();
        registry.add_group("A", vec![1]).unwrap();

        assert!(matches!(
            registry.add_group("  ", vec![1]),
            Err(SpinbiasError::Validation(_))
        ));
        assert!(matches!(
            registry.add_group("A", vec![2]),
            Err(SpinbiasError::Validation(_))
        ));
        assert!(matches!(
            registry.add_group("B", vec![5, 37]),
            Err(SpinbiasError::Validation(_))
        ));
        assert!(matches!(
            registry.add_group("C", vec![-1]),
            Err(SpinbiasError::Validation(_))
        ));
        assert!(registry.add_range("D", 10, 9).is_err());

        // Failed writes leave the registry untouched
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("A").unwrap().members().len(), 1);
    }

    #[test]
    fn test_remove_group() {
        let mut registry = GroupRegistry::new();
        registry.add_group("A", vec![1]).unwrap();
        let removed = registry.remove_group("A").unwrap();
        assert_eq!(removed.name(), "A");
        assert!(registry.is_empty());
        assert!(registry.remove_group("A").is_err());
    }

    #[test]
    fn test_presets() {
        let registry = GroupRegistry::with_presets();
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.list_groups()[0].name(), "Voisins");
        assert!(registry.get("Dozen 3").unwrap().contains(36));
    }

    #[test]
    fn test_combine_registers_union() {
        let mut registry = GroupRegistry::with_presets();
        let combined = registry.combine(&["Orphelins", "Tiers"], "Orph + Tiers").unwrap();
        assert_eq!(combined.len(), 20);
        assert!(!combined.contains(0));
        assert!(registry.combine(&["Missing"], "X").is_err());
    }

    #[test]
    fn test_ordered_preserves_requested_priority() {
        let registry = GroupRegistry::with_presets();
        let ordered = registry.ordered(&["Red", "Voisins"]).unwrap();
        assert_eq!(ordered[0].name(), "Red");
        assert_eq!(ordered[1].name(), "Voisins");
    }

    #[test]
    fn test_shared_snapshot_is_isolated() {
        let shared = SharedRegistry::new(GroupRegistry::new());
        shared.add_group("A", vec![1, 2]).unwrap();
        let snapshot = shared.snapshot().unwrap();

        shared.add_group("B", vec![3]).unwrap();
        shared.remove_group("A").unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name(), "A");
        assert_eq!(shared.list_groups().unwrap()[0].name(), "B");
    }
}

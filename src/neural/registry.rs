use indexmap::IndexMap;

use super::layer::Layer;

/// Named layers in registration order. Names are unique; registering a name
/// again replaces the layer and keeps its position.
#[derive(Debug, Clone, Default)]
pub struct LayerRegistry {
    entries: IndexMap<String, Layer>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the layer previously stored under `name`, if any.
    pub fn insert(&mut self, name: impl Into<String>, layer: Layer) -> Option<Layer> {
        self.entries.insert(name.into(), layer)
    }

    /// Removes `name`, keeping the remaining layers in order.
    pub fn remove(&mut self, name: &str) -> Option<Layer> {
        self.entries.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.entries.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Layer)> + '_ {
        self.entries.iter().map(|(name, layer)| (name.as_str(), layer))
    }
}

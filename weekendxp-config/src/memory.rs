use std::collections::HashMap;

use crate::{ConfigProvider, ConfigValue};

/// Config held in a plain map. Used for tests and for runtime overrides.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfig {
    values: HashMap<String, ConfigValue>,
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.values.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigProvider for MemoryConfig {
    fn value(&self, key: &str) -> Option<ConfigValue> {
        self.values.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for MemoryConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

//! Memoised layout targets.
//!
//! Targets depend only on `(scheme, count)` for a fixed configuration, so
//! they are computed once and reused until the configuration changes.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::{LayoutConfig, LayoutError, LayoutScheme, Transform, generate};

/// Cache of generated layouts keyed by `(scheme, count)`.
#[derive(Debug, Default)]
pub struct LayoutCache {
    config: LayoutConfig,
    entries: HashMap<(LayoutScheme, usize), Vec<Transform>>,
}

impl LayoutCache {
    /// Create an empty cache for `config`.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    /// The configuration targets are generated with.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the configuration, dropping cached targets if it changed.
    pub fn set_config(&mut self, config: LayoutConfig) {
        if config != self.config {
            self.config = config;
            self.entries.clear();
        }
    }

    /// Get the targets for `scheme` with `count` items, generating on a miss.
    ///
    /// Errors are not cached.
    pub fn targets(&mut self, scheme: LayoutScheme, count: usize) -> Result<&[Transform], LayoutError> {
        match self.entries.entry((scheme, count)) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_slice()),
            Entry::Vacant(entry) => {
                let targets = generate(scheme, count, &self.config)?;
                Ok(entry.insert(targets).as_slice())
            }
        }
    }

    /// Number of cached layouts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

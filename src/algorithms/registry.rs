//! Name resolution over the static algorithm catalog.
//!
//! 基于静态算法目录的名称解析。

use super::definitions::{Algorithm, AlgorithmDescriptor, DESCRIPTORS};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// A read-only index from symbolic names (and aliases) to catalog entries.
///
/// The index is built on first use and never changes afterwards, so lookups
/// from any number of threads need no locking.
///
/// 从符号名称（及别名）到目录条目的只读索引。
#[derive(Debug)]
pub struct Registry {
    by_name: HashMap<&'static str, Algorithm>,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// The process-wide registry.
    pub fn global() -> &'static Registry {
        REGISTRY.get_or_init(|| {
            let mut by_name = HashMap::new();
            for descriptor in DESCRIPTORS.iter() {
                by_name.insert(descriptor.name, descriptor.algorithm);
                for alias in descriptor.aliases {
                    by_name.insert(*alias, descriptor.algorithm);
                }
            }
            debug!(
                "algorithm registry built with {} entries ({} enabled)",
                DESCRIPTORS.len(),
                DESCRIPTORS.iter().filter(|d| d.is_enabled()).count()
            );
            Registry { by_name }
        })
    }

    /// Resolves a name or alias, ignoring ASCII case. Compiled-out entries are
    /// returned too; check [`AlgorithmDescriptor::is_enabled`].
    pub fn lookup(&self, name: &str) -> Result<&'static AlgorithmDescriptor> {
        let algorithm = match self.by_name.get(name) {
            Some(algorithm) => *algorithm,
            None => *self
                .by_name
                .get(name.to_ascii_lowercase().as_str())
                .ok_or_else(|| Error::UnknownAlgorithm(name.to_string()))?,
        };
        Ok(algorithm.descriptor())
    }

    pub fn get(&self, algorithm: Algorithm) -> &'static AlgorithmDescriptor {
        algorithm.descriptor()
    }

    /// `false` for unknown names as well as for compiled-out ones.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.lookup(name).is_ok_and(|d| d.is_enabled())
    }

    /// Canonical names of the enabled algorithms, in registration order.
    pub fn list(&self) -> Vec<&'static str> {
        self.iter_enabled().map(|d| d.name).collect()
    }

    pub fn iter_enabled(&self) -> impl Iterator<Item = &'static AlgorithmDescriptor> {
        DESCRIPTORS.iter().filter(|d| d.is_enabled())
    }

    /// Every catalog entry, enabled or not.
    pub fn descriptors(&self) -> &'static [AlgorithmDescriptor] {
        &DESCRIPTORS
    }

    /// The human-readable name for any registered name or alias.
    pub fn display_name(&self, name: &str) -> Result<&'static str> {
        self.lookup(name).map(|d| d.display_name)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Registry::global().lookup(s).map(|d| d.algorithm)
    }
}

impl TryFrom<&str> for Algorithm {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

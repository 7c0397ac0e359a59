//! Host-ecosystem probe.
//!
//! The walker asks whether an external package is installed and whether
//! it exports a given symbol. Lookups must be fail-soft: a probe error
//! degrades to an info diagnostic and a negative answer to a hint, never
//! to a fatal.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("probe unavailable: {reason}")]
    Unavailable { reason: String },
}

pub trait Probe {
    fn package_installed(&self, package: &str) -> Result<bool, ProbeError>;
    fn package_exports(&self, package: &str, symbol: &str) -> Result<bool, ProbeError>;
}

/// Default probe: answers affirmatively so no spurious hints are emitted
/// when no host library is wired in.
#[derive(Debug, Default)]
pub struct NoProbe;

impl Probe for NoProbe {
    fn package_installed(&self, _package: &str) -> Result<bool, ProbeError> {
        Ok(true)
    }

    fn package_exports(&self, _package: &str, _symbol: &str) -> Result<bool, ProbeError> {
        Ok(true)
    }
}

/// Probe over an in-memory table of packages and their exports.
#[derive(Debug, Default)]
pub struct StaticProbe {
    packages: HashMap<String, HashSet<String>>,
}

impl StaticProbe {
    pub fn new() -> Self {
        StaticProbe {
            packages: HashMap::new(),
        }
    }

    pub fn add_package(&mut self, package: &str, exports: &[&str]) {
        self.packages.insert(
            package.to_string(),
            exports.iter().map(|s| s.to_string()).collect(),
        );
    }
}

impl Probe for StaticProbe {
    fn package_installed(&self, package: &str) -> Result<bool, ProbeError> {
        Ok(self.packages.contains_key(package))
    }

    fn package_exports(&self, package: &str, symbol: &str) -> Result<bool, ProbeError> {
        Ok(self
            .packages
            .get(package)
            .map(|exports| exports.contains(symbol))
            .unwrap_or(false))
    }
}

//! Run configuration
//!
//! Defaults, optionally overlaid by a YAML file, then by command-line flags.
//!
//! ```yaml
//! strategy: ordered
//! threads: 8
//! per_vertex: true
//! index_base: one
//! ```

use crate::error::{TricountError, TricountResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tricount_kernels::{CountOptions, IndexBase, Strategy, MAX_DENSE_VERTICES};

/// Upper bound accepted for an explicit worker count
pub const MAX_THREADS: usize = 1024;

/// Settings for one counting run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Counting strategy
    pub strategy: Strategy,
    /// Worker threads (0 = rayon's global pool)
    pub threads: usize,
    /// Keep per-vertex counts in the report
    pub per_vertex: bool,
    /// Index base of input files
    pub index_base: IndexBase,
    /// Cross-check against the dense brute-force counter
    pub verify: bool,
    /// Edge probability for generated graphs
    pub probability: f64,
    /// Seed for generated graphs (None = from entropy)
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::EdgeMerge,
            threads: 0,
            per_vertex: false,
            index_base: IndexBase::One,
            verify: false,
            probability: 0.5,
            seed: None,
        }
    }
}

impl RunConfig {
    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> TricountResult<Self> {
        let config: RunConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn load(path: &Path) -> TricountResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> TricountResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> TricountResult<()> {
        if self.threads > MAX_THREADS {
            return Err(TricountError::Config(format!(
                "threads must be at most {}, got {}",
                MAX_THREADS, self.threads
            )));
        }
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(TricountError::Config(format!(
                "probability must be within [0, 1], got {}",
                self.probability
            )));
        }
        Ok(())
    }

    /// Options handed to the counting kernels
    pub fn count_options(&self) -> CountOptions {
        CountOptions::new(self.strategy, self.threads)
    }

    /// Whether a graph of this size can be verified densely
    pub fn can_verify(&self, vertex_count: usize) -> bool {
        self.verify && vertex_count <= MAX_DENSE_VERTICES
    }
}

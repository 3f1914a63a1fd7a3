use crate::kcmlib::{KcmError, Result};
use serde::{Deserialize, Serialize};

/// How the engine places its starting centers
#[derive(clap::ValueEnum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InitMode {
    /// Every coordinate uniform in [0, 1)
    #[default]
    Unit,
    /// Every coordinate uniform within the observed per-dimension min/max of the points
    Range,
}

/// Parameters of a clustering sweep
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    pub min_clusters_num: usize,
    pub max_clusters_num: usize,
    pub m: f64,
    pub convergence_limit: f64,
    pub max_iterations: usize,
    pub init: InitMode,
    pub seed: Option<u64>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            min_clusters_num: 2,
            max_clusters_num: 10,
            m: 2.0,
            convergence_limit: 0.005,
            max_iterations: 1000,
            init: InitMode::Unit,
            seed: None,
        }
    }
}

impl ClusterConfig {
    /// Builds a validated config for the sweep `min_clusters_num..=max_clusters_num`
    pub fn new(
        min_clusters_num: usize,
        max_clusters_num: usize,
        m: f64,
        convergence_limit: f64,
    ) -> Result<Self> {
        let config = Self {
            min_clusters_num,
            max_clusters_num,
            m,
            convergence_limit,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_init(mut self, init: InitMode) -> Self {
        self.init = init;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the rules every sweep depends on. Nothing is computed on an invalid config.
    pub fn validate(&self) -> Result<()> {
        // NaN fails this comparison too
        if !(self.m > 1.0) {
            return Err(KcmError::Config(format!(
                "m must be greater than 1, got {}",
                self.m
            )));
        }
        if self.min_clusters_num < 2 {
            return Err(KcmError::Config(format!(
                "min_clusters_num must be at least 2, got {}",
                self.min_clusters_num
            )));
        }
        if self.min_clusters_num > self.max_clusters_num {
            return Err(KcmError::Config(format!(
                "min_clusters_num ({}) is greater than max_clusters_num ({})",
                self.min_clusters_num, self.max_clusters_num
            )));
        }
        if !(self.convergence_limit > 0.0) {
            return Err(KcmError::Config(format!(
                "convergence_limit must be positive, got {}",
                self.convergence_limit
            )));
        }
        if self.max_iterations == 0 {
            return Err(KcmError::Config(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

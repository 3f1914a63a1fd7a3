use crate::kcmlib::{ClusterConfig, InitMode};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Clone, Debug)]
#[command(name = "kcm")]
#[command(about = "Fuzzy c-means clustering with entropy-based cluster count selection")]
#[command(version)]
pub struct KcmArgs {
    #[command(flatten)]
    pub io: IOParams,

    #[command(flatten)]
    pub fcm: FcmParams,
}

pub trait KcmParams: std::fmt::Debug {
    fn validate(&self) -> bool;
    fn debug(&self) -> bool;
}

#[derive(clap::Args, Clone, Debug)]
pub struct IOParams {
    /// Comma separated points, one per line
    #[arg(short, long, help_heading = "I/O")]
    pub input: PathBuf,

    /// Output JSON of the final model for plotting (default stdout)
    #[arg(short, long, help_heading = "I/O")]
    pub plot: Option<PathBuf>,

    /// Skip writing the plot JSON
    #[arg(long, default_value_t = false, help_heading = "I/O")]
    pub no_plot: bool,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

#[derive(clap::Args, Clone, Debug)]
pub struct FcmParams {
    /// Smallest number of clusters to try
    #[arg(long, default_value_t = 2, help_heading = "Clustering")]
    pub min_clusters: usize,

    /// Largest number of clusters to try
    #[arg(long, default_value_t = 10, help_heading = "Clustering")]
    pub max_clusters: usize,

    /// Fuzziness exponent m
    #[arg(short, long, default_value_t = 2.0, help_heading = "Clustering")]
    pub fuzziness: f64,

    /// Largest per-coordinate center movement considered converged
    #[arg(long, default_value_t = 0.005, help_heading = "Clustering")]
    pub convergence_limit: f64,

    /// Iterations per candidate before giving up
    #[arg(long, default_value_t = 1000, help_heading = "Clustering")]
    pub max_iterations: usize,

    /// Starting center placement
    #[arg(long, value_enum, default_value_t = InitMode::Unit, help_heading = "Clustering")]
    pub init: InitMode,

    /// Random seed for reproducible runs
    #[arg(long, help_heading = "Clustering")]
    pub seed: Option<u64>,
}

impl KcmArgs {
    pub fn to_config(&self) -> ClusterConfig {
        ClusterConfig {
            min_clusters_num: self.fcm.min_clusters,
            max_clusters_num: self.fcm.max_clusters,
            m: self.fcm.fuzziness,
            convergence_limit: self.fcm.convergence_limit,
            max_iterations: self.fcm.max_iterations,
            init: self.fcm.init,
            seed: self.fcm.seed,
        }
    }
}

impl KcmParams for KcmArgs {
    fn debug(&self) -> bool {
        self.io.debug
    }

    /// Validate command line arguments
    fn validate(&self) -> bool {
        let mut is_ok = true;

        is_ok &= validate_file(&self.io.input, "--input");

        if self.fcm.min_clusters < 2 {
            error!("--min-clusters must be at least 2");
            is_ok = false;
        }

        if self.fcm.min_clusters > self.fcm.max_clusters {
            error!("--min-clusters must not exceed --max-clusters");
            is_ok = false;
        }

        if !(self.fcm.fuzziness > 1.0) {
            error!("--fuzziness must be greater than 1.0");
            is_ok = false;
        }

        if !(self.fcm.convergence_limit > 0.0) {
            error!("--convergence-limit must be positive");
            is_ok = false;
        }

        if self.fcm.max_iterations < 1 {
            error!("--max-iterations must be at least 1");
            is_ok = false;
        }

        if self.fcm.fuzziness > 10.0 {
            warn!("--fuzziness above 10 makes nearly uniform memberships");
        }

        if self.fcm.init == InitMode::Unit {
            debug!("--init unit places centers in [0, 1) regardless of the data range");
        }

        is_ok
    }
}

/// Helper function to validate a file's existence and type
fn validate_file(path: &Path, label: &str) -> bool {
    if !path.exists() {
        error!("{} does not exist", label);
        return false;
    }
    if !path.is_file() {
        error!("{} is not a file", label);
        return false;
    }
    true
}

mod cli;
pub use crate::kcmlib::cli::{FcmParams, IOParams, KcmArgs, KcmParams};

mod config;
pub use crate::kcmlib::config::{ClusterConfig, InitMode};

mod errors;
pub use crate::kcmlib::errors::{KcmError, Result};

mod fcm;
pub use crate::kcmlib::fcm::{Convergence, FcmRun, FuzzyEngine};

pub mod metrics;

mod plot;
pub use crate::kcmlib::plot::{cluster_color, PlotData, PlotWriter, PALETTE};

mod pointparser;
pub use crate::kcmlib::pointparser::PointParser;

mod points;
pub use crate::kcmlib::points::{Cluster, Point, PointStore};

mod selector;
pub use crate::kcmlib::selector::{best_candidate, CandidateScore, ModelSelector, ModelSnapshot};

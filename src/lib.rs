#[macro_use]
extern crate log;

mod kcmlib;
pub use self::{
    kcmlib::best_candidate, kcmlib::cluster_color, kcmlib::metrics, kcmlib::CandidateScore,
    kcmlib::Cluster, kcmlib::ClusterConfig, kcmlib::Convergence, kcmlib::FcmParams,
    kcmlib::FcmRun, kcmlib::FuzzyEngine, kcmlib::IOParams, kcmlib::InitMode, kcmlib::KcmArgs,
    kcmlib::KcmError, kcmlib::KcmParams, kcmlib::ModelSelector, kcmlib::ModelSnapshot,
    kcmlib::PlotData, kcmlib::PlotWriter, kcmlib::Point, kcmlib::PointParser,
    kcmlib::PointStore, kcmlib::Result, kcmlib::PALETTE,
};

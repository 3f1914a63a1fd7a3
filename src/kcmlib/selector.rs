use crate::kcmlib::{
    metrics, Cluster, ClusterConfig, Convergence, FuzzyEngine, KcmError, PointStore, Result,
};
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{Array2, Axis};
use serde::Serialize;

/// A deep copy of one candidate run, independent of every later run
#[derive(Debug, Clone)]
pub struct ModelSnapshot {
    pub c: usize,
    pub points: PointStore,
    pub centers: Array2<f64>,
    pub clusters: Vec<Cluster>,
    pub entropy: f64,
    pub status: Convergence,
    pub iterations: usize,
}

impl ModelSnapshot {
    /// Each center's coordinates as `(x, y, ...)`
    pub fn center_strings(&self) -> Vec<String> {
        self.centers
            .axis_iter(Axis(0))
            .map(|row| {
                let coords: Vec<String> = row.iter().map(|v| format!("{:.4}", v)).collect();
                format!("({})", coords.join(", "))
            })
            .collect()
    }
}

/// Summary line of the entropy curve
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub c: usize,
    pub entropy: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Sweeps the configured cluster counts and keeps the crispest partition
pub struct ModelSelector {
    config: ClusterConfig,
    engine: FuzzyEngine,
    points: PointStore,
    centers: Array2<f64>,
    clusters: Vec<Cluster>,
    scores: Vec<CandidateScore>,
    progress: bool,
}

impl ModelSelector {
    pub fn new(config: ClusterConfig, points: PointStore) -> Result<Self> {
        let engine = FuzzyEngine::new(&config)?;
        let dim = points.dim();
        Ok(Self {
            config,
            engine,
            points,
            centers: Array2::zeros((0, dim)),
            clusters: Vec::new(),
            scores: Vec::new(),
            progress: false,
        })
    }

    /// Draw a progress bar over the candidate counts
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    pub fn points(&self) -> &PointStore {
        &self.points
    }

    pub fn centers(&self) -> &Array2<f64> {
        &self.centers
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Entropy of every candidate from the latest sweep, in sweep order
    pub fn scores(&self) -> &[CandidateScore] {
        &self.scores
    }

    /// Run the engine for `c` clusters, label the points and capture the result
    pub fn evaluate(&mut self, c: usize) -> Result<ModelSnapshot> {
        let run = self.engine.run(c, &mut self.points)?;
        if run.status == Convergence::MaxIterationsReached {
            warn!(
                "c={} did not converge within {} iterations (last shift {:.6})",
                c, run.iterations, run.shift
            );
        }

        let entropy = metrics::partition_entropy(self.points.membership_table().view());
        self.points.assign_labels();
        let clusters = self.points.build_clusters(c);

        Ok(ModelSnapshot {
            c,
            points: self.points.clone(),
            centers: run.centers,
            clusters,
            entropy,
            status: run.status,
            iterations: run.iterations,
        })
    }

    /// Try every cluster count from `min_clusters_num` to `max_clusters_num` and publish the
    /// snapshot with the strictly lowest entropy. Ties keep the smaller count.
    pub fn select(&mut self) -> Result<ModelSnapshot> {
        self.config.validate()?;
        let (min_c, max_c) = (self.config.min_clusters_num, self.config.max_clusters_num);
        self.scores.clear();

        let pbar = if self.progress && max_c > min_c {
            let sty = ProgressStyle::with_template(
                " [{elapsed_precise}] {bar:44.cyan/blue} > {pos}/{len} candidates",
            )
            .map_err(|e| KcmError::Config(e.to_string()))?
            .progress_chars("##-");
            Some(ProgressBar::new((max_c - min_c + 1) as u64).with_style(sty))
        } else {
            None
        };

        let mut snapshots: Vec<ModelSnapshot> = Vec::with_capacity(max_c - min_c + 1);
        for c in min_c..=max_c {
            let snapshot = self.evaluate(c)?;
            debug!("c={} entropy {:.6}", c, snapshot.entropy);
            self.scores.push(CandidateScore {
                c,
                entropy: snapshot.entropy,
                iterations: snapshot.iterations,
                converged: snapshot.status == Convergence::Converged,
            });
            snapshots.push(snapshot);

            if let Some(ref bar) = pbar {
                bar.inc(1);
            }
        }
        if let Some(bar) = pbar {
            bar.finish();
        }

        let idx = best_candidate(&self.scores).ok_or(KcmError::NoFiniteModel)?;
        let best = snapshots.swap_remove(idx);
        self.points = best.points.clone();
        self.centers = best.centers.clone();
        self.clusters = best.clusters.clone();
        Ok(best)
    }
}

/// Index of the strictly lowest entropy. Ties keep the earliest candidate, NaN never wins.
pub fn best_candidate(scores: &[CandidateScore]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, score) in scores.iter().enumerate() {
        match best {
            Some(b) if !(score.entropy < scores[b].entropy) => {}
            _ if score.entropy.is_nan() => {}
            _ => best = Some(idx),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_points() -> PointStore {
        PointStore::from_rows(vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![10.0, 10.0],
            vec![10.0, 11.0],
        ])
        .unwrap()
    }

    #[test]
    fn snapshots_are_isolated_from_later_runs() {
        let config = ClusterConfig::new(2, 3, 2.0, 0.01).unwrap().with_seed(2);
        let mut selector = ModelSelector::new(config, four_points()).unwrap();
        let first = selector.evaluate(2).unwrap();
        let kept = first.clone();
        let _second = selector.evaluate(3).unwrap();

        assert_eq!(first.points, kept.points);
        assert!(first
            .points
            .points()
            .iter()
            .all(|p| p.memberships.len() == 2));
        assert!(selector
            .points()
            .points()
            .iter()
            .all(|p| p.memberships.len() == 3));
    }

    #[test]
    fn publishes_lowest_entropy() {
        let config = ClusterConfig::new(2, 3, 2.0, 0.01).unwrap().with_seed(8);
        let mut selector = ModelSelector::new(config, four_points()).unwrap();
        let best = selector.select().unwrap();

        let scores = selector.scores();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].c, 2);
        assert_eq!(scores[1].c, 3);
        let lowest = scores
            .iter()
            .fold(f64::INFINITY, |acc, s| acc.min(s.entropy));
        assert_eq!(best.entropy, lowest);

        // live state is the winner
        assert_eq!(selector.centers(), &best.centers);
        assert_eq!(selector.clusters(), best.clusters.as_slice());
        assert_eq!(selector.points(), &best.points);
        assert_eq!(best.clusters.len(), best.c);
        assert_eq!(best.center_strings().len(), best.c);
    }

    fn score(c: usize, entropy: f64) -> CandidateScore {
        CandidateScore {
            c,
            entropy,
            iterations: 1,
            converged: true,
        }
    }

    #[test]
    fn ties_keep_the_smaller_count() {
        let scores = vec![score(2, 1.5), score(3, 0.5), score(4, 0.5), score(5, 0.7)];
        assert_eq!(best_candidate(&scores), Some(1));
        let scores = vec![score(2, f64::NAN), score(3, 2.0), score(4, 2.0)];
        assert_eq!(best_candidate(&scores), Some(1));
        assert_eq!(best_candidate(&[]), None);
    }

    #[test]
    fn identical_points_score_one_per_point() {
        let points = PointStore::from_rows(vec![vec![1.0, 1.0]; 4]).unwrap();
        let config = ClusterConfig::new(2, 4, 2.0, 0.01).unwrap().with_seed(3);
        let mut selector = ModelSelector::new(config, points).unwrap();
        let best = selector.select().unwrap();
        assert!((2..=4).contains(&best.c));
        for score in selector.scores() {
            assert!(score.converged);
            assert!((score.entropy - 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn invalid_config_stops_before_running() {
        let mut config = ClusterConfig::default();
        config.m = 1.0;
        assert!(matches!(
            ModelSelector::new(config, four_points()),
            Err(KcmError::Config(_))
        ));
    }

    #[test]
    fn center_strings_format() {
        let snapshot = ModelSnapshot {
            c: 1,
            points: four_points(),
            centers: ndarray::arr2(&[[0.0, 0.5]]),
            clusters: vec![vec![0, 1, 2, 3]],
            entropy: 0.0,
            status: Convergence::Converged,
            iterations: 1,
        };
        assert_eq!(snapshot.center_strings(), vec!["(0.0000, 0.5000)".to_string()]);
    }
}

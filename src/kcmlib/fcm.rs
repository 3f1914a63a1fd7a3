use crate::kcmlib::{metrics, ClusterConfig, InitMode, KcmError, PointStore, Result};
use itertools::{Itertools, MinMaxResult};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    Converged,
    MaxIterationsReached,
}

/// Result of a single fixed-`c` run. Memberships are left on the points.
#[derive(Debug, Clone)]
pub struct FcmRun {
    pub centers: Array2<f64>,
    pub iterations: usize,
    pub status: Convergence,
    /// Largest per-coordinate center movement of the final iteration
    pub shift: f64,
}

impl FcmRun {
    pub fn converged(&self) -> bool {
        self.status == Convergence::Converged
    }
}

/// Uniform in [lo, hi). Degenerate or unbounded ranges fall back to a finite endpoint.
fn draw_between(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    if lo < hi && (hi - lo).is_finite() {
        rng.gen_range(lo..hi)
    } else if lo.is_finite() {
        lo
    } else if hi.is_finite() {
        hi
    } else {
        0.0
    }
}

/// Fuzzy c-means iteration for a fixed cluster count
pub struct FuzzyEngine {
    m: f64,
    convergence_limit: f64,
    max_iterations: usize,
    init: InitMode,
    rng: StdRng,
}

impl FuzzyEngine {
    pub fn new(config: &ClusterConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            m: config.m,
            convergence_limit: config.convergence_limit,
            max_iterations: config.max_iterations,
            init: config.init,
            rng,
        })
    }

    pub fn convergence_limit(&self) -> f64 {
        self.convergence_limit
    }

    /// Draw `c` random centers matching the points' dimensionality
    pub fn init_centers(&mut self, c: usize, points: &PointStore) -> Array2<f64> {
        let dim = points.dim();
        let init = self.init;
        match init {
            InitMode::Unit => Array2::from_shape_fn((c, dim), |_| self.rng.gen::<f64>()),
            InitMode::Range => {
                let bounds: Vec<(f64, f64)> = (0..dim)
                    .map(|j| match points.points().iter().map(|p| p.values()[j]).minmax() {
                        MinMaxResult::NoElements => (0.0, 1.0),
                        MinMaxResult::OneElement(x) => (x, x),
                        MinMaxResult::MinMax(lo, hi) => (lo, hi),
                    })
                    .collect();
                Array2::from_shape_fn((c, dim), |(_, j)| {
                    let (lo, hi) = bounds[j];
                    draw_between(&mut self.rng, lo, hi)
                })
            }
        }
    }

    /// Partition `points` into exactly `c` fuzzy clusters from random starting centers
    pub fn run(&mut self, c: usize, points: &mut PointStore) -> Result<FcmRun> {
        if c == 0 {
            return Err(KcmError::Config(
                "cluster count must be at least 1".to_string(),
            ));
        }
        let centers = self.init_centers(c, points);
        self.run_from(centers, points)
    }

    /// Iterate from the given starting centers until they stop moving or the iteration
    /// bound is hit
    pub fn run_from(&self, mut centers: Array2<f64>, points: &mut PointStore) -> Result<FcmRun> {
        let c = centers.nrows();
        if c == 0 {
            return Err(KcmError::Config(
                "cluster count must be at least 1".to_string(),
            ));
        }
        if centers.ncols() != points.dim() {
            return Err(KcmError::Config(format!(
                "starting centers have {} dimensions, points have {}",
                centers.ncols(),
                points.dim()
            )));
        }
        points.reset_memberships(c);

        let mut shift = f64::INFINITY;
        let mut iterations = 0;
        while iterations < self.max_iterations {
            shift = self.step(&mut centers, points);
            iterations += 1;
            trace!("c={} iteration {} shift {}", c, iterations, shift);
            if shift <= self.convergence_limit {
                debug!("c={} converged after {} iterations", c, iterations);
                return Ok(FcmRun {
                    centers,
                    iterations,
                    status: Convergence::Converged,
                    shift,
                });
            }
        }

        debug!(
            "c={} stopped after {} iterations with shift {}",
            c, iterations, shift
        );
        Ok(FcmRun {
            centers,
            iterations,
            status: Convergence::MaxIterationsReached,
            shift,
        })
    }

    /// One membership update followed by one center update.
    /// Returns the largest per-coordinate center movement.
    pub fn step(&self, centers: &mut Array2<f64>, points: &mut PointStore) -> f64 {
        let previous = centers.clone();
        self.update_memberships(centers.view(), points);
        self.update_centers(centers, points);
        metrics::max_shift(previous.view(), centers.view())
    }

    /// u_ik = 1 / sum_j (d(x_k, v_i) / d(x_k, v_j))^(2 / (m - 1))
    pub fn update_memberships(&self, centers: ArrayView2<f64>, points: &mut PointStore) {
        let exponent = 2.0 / (self.m - 1.0);
        for p in points.points_mut().iter_mut() {
            let dists: Vec<f64> = centers
                .axis_iter(Axis(0))
                .map(|v| metrics::distance(p.values().view(), v))
                .collect();

            // Coincident centers share the point outright
            let coincident = dists.iter().filter(|&&d| d == 0.0).count();
            let memberships: Array1<f64> = if coincident > 0 {
                dists
                    .iter()
                    .map(|&d| if d == 0.0 { 1.0 / coincident as f64 } else { 0.0 })
                    .collect()
            } else {
                dists
                    .iter()
                    .map(|&d_i| {
                        let total: f64 = dists.iter().map(|&d_j| (d_i / d_j).powf(exponent)).sum();
                        1.0 / total
                    })
                    .collect()
            };
            p.memberships = memberships;
        }
    }

    /// v_i = sum_k u_ik^m x_k / sum_k u_ik^m. A center with no weight stays where it is.
    pub fn update_centers(&self, centers: &mut Array2<f64>, points: &PointStore) {
        let origin = match points.points().first() {
            Some(p) => p.values().clone(),
            None => return,
        };
        for (i, mut center) in centers.axis_iter_mut(Axis(0)).enumerate() {
            let mut offset = Array1::<f64>::zeros(origin.len());
            let mut weight = 0.0;
            for p in points.points() {
                let w = p.memberships[i].powf(self.m);
                if w == 0.0 {
                    continue;
                }
                // accumulate relative to the first point so identical points stay exact
                offset.scaled_add(w, &(p.values() - &origin));
                weight += w;
            }
            if weight > 0.0 {
                center.assign(&(&origin + &(offset / weight)));
            } else {
                trace!("center {} has no weight, leaving in place", i);
            }
        }
    }
}

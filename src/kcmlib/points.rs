use crate::kcmlib::{metrics, KcmError, Result};
use ndarray::{Array1, Array2};

/// A coordinate vector plus the clustering state attached to it by the latest run
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    values: Array1<f64>,
    pub memberships: Array1<f64>,
    pub label: Option<usize>,
}

impl Point {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values: Array1::from(values),
            memberships: Array1::zeros(0),
            label: None,
        }
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn dim(&self) -> usize {
        self.values.len()
    }
}

/// Point indices sharing one hard label
pub type Cluster = Vec<usize>;

#[derive(Debug, Clone, PartialEq)]
pub struct PointStore {
    points: Vec<Point>,
    dim: usize,
}

impl PointStore {
    /// Every point must share the first point's dimensionality
    pub fn new(points: Vec<Point>) -> Result<Self> {
        let dim = match points.first() {
            Some(p) => p.dim(),
            None => return Err(KcmError::EmptyInput),
        };
        if dim == 0 {
            return Err(KcmError::DimensionMismatch {
                line: 1,
                expected: 1,
                found: 0,
            });
        }
        if let Some((idx, p)) = points.iter().enumerate().find(|(_, p)| p.dim() != dim) {
            return Err(KcmError::DimensionMismatch {
                line: idx + 1,
                expected: dim,
                found: p.dim(),
            });
        }
        for (idx, p) in points.iter().enumerate() {
            if let Some(v) = p.values().iter().find(|v| !v.is_finite()) {
                return Err(KcmError::NonFinite {
                    line: idx + 1,
                    field: v.to_string(),
                });
            }
        }
        Ok(Self { points, dim })
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(rows.into_iter().map(Point::new).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    /// Drop any previous run's state and give every point `c` zeroed memberships
    pub fn reset_memberships(&mut self, c: usize) {
        for p in self.points.iter_mut() {
            p.memberships = Array1::zeros(c);
            p.label = None;
        }
    }

    /// Memberships as an `n x c` table
    pub fn membership_table(&self) -> Array2<f64> {
        let c = self.points.first().map_or(0, |p| p.memberships.len());
        Array2::from_shape_fn((self.points.len(), c), |(k, i)| self.points[k].memberships[i])
    }

    /// Set each point's label to its maximal membership
    pub fn assign_labels(&mut self) {
        for p in self.points.iter_mut() {
            p.label = metrics::argmax(p.memberships.view());
        }
    }

    /// Group point indices by label into `c` buckets. Unlabeled points are left out.
    pub fn build_clusters(&self, c: usize) -> Vec<Cluster> {
        let mut clusters: Vec<Cluster> = vec![Vec::new(); c];
        for (idx, p) in self.points.iter().enumerate() {
            if let Some(label) = p.label {
                if label < c {
                    clusters[label].push(idx);
                }
            }
        }
        clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn rejects_mixed_dimensions() {
        let res = PointStore::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0]]);
        match res {
            Err(KcmError::DimensionMismatch {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_non_finite_values() {
        let res = PointStore::from_rows(vec![vec![0.0, 0.0], vec![f64::NAN, 1.0]]);
        assert!(matches!(res, Err(KcmError::NonFinite { line: 2, .. })));
        let res = PointStore::from_rows(vec![vec![f64::INFINITY, 1.0]]);
        assert!(matches!(res, Err(KcmError::NonFinite { line: 1, .. })));
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            PointStore::from_rows(vec![]),
            Err(KcmError::EmptyInput)
        ));
    }

    #[test]
    fn labels_and_clusters() {
        let mut store =
            PointStore::from_rows(vec![vec![0.0], vec![1.0], vec![2.0]]).unwrap();
        store.reset_memberships(3);
        store.points_mut()[0].memberships = arr1(&[0.7, 0.2, 0.1]);
        store.points_mut()[1].memberships = arr1(&[0.1, 0.1, 0.8]);
        store.points_mut()[2].memberships = arr1(&[0.6, 0.3, 0.1]);
        store.assign_labels();

        let labels: Vec<Option<usize>> = store.points().iter().map(|p| p.label).collect();
        assert_eq!(labels, vec![Some(0), Some(2), Some(0)]);

        let clusters = store.build_clusters(3);
        assert_eq!(clusters, vec![vec![0, 2], vec![], vec![1]]);

        let table = store.membership_table();
        assert_eq!(table.dim(), (3, 3));
        assert_eq!(table[[1, 2]], 0.8);
    }

    #[test]
    fn reset_clears_labels() {
        let mut store = PointStore::from_rows(vec![vec![0.0, 0.0]]).unwrap();
        store.reset_memberships(2);
        store.points_mut()[0].memberships = arr1(&[1.0, 0.0]);
        store.assign_labels();
        assert_eq!(store.points()[0].label, Some(0));

        store.reset_memberships(4);
        assert_eq!(store.points()[0].label, None);
        assert_eq!(store.points()[0].memberships, Array1::<f64>::zeros(4));
    }
}

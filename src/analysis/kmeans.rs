use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ---------------------------------------------------------------------------
// K-means (Lloyd's algorithm, k-means++ seeding)
// ---------------------------------------------------------------------------

/// Result of a clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering<const D: usize> {
    /// Cluster index per input point, numbered by first appearance.
    pub labels: Vec<usize>,
    pub centroids: Vec<[f64; D]>,
    /// Sum of squared distances of points to their centroid.
    pub inertia: f64,
}

/// Partition-based clustering with a fixed seed, so identical input always
/// yields the identical partition.
#[derive(Debug, Clone)]
pub struct KMeans {
    pub k: usize,
    pub seed: u64,
    pub n_init: usize,
    pub max_iter: usize,
    pub tol: f64,
}

impl KMeans {
    pub fn new(k: usize) -> Self {
        KMeans {
            k,
            seed: 42,
            n_init: 10,
            max_iter: 300,
            tol: 1e-4,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Cluster `points`. With fewer points than `k`, k shrinks to the point count.
    pub fn fit<const D: usize>(&self, points: &[[f64; D]]) -> Clustering<D> {
        let k = self.k.min(points.len());
        if k == 0 {
            return Clustering {
                labels: Vec::new(),
                centroids: Vec::new(),
                inertia: 0.0,
            };
        }
        if k < self.k {
            log::warn!("k-means: only {} points, reducing k from {} to {k}", points.len(), self.k);
        }

        let tol = self.tol * mean_variance(points);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best = self.run(points, k, tol, &mut rng, 0);
        for run in 1..self.n_init {
            let candidate = self.run(points, k, tol, &mut rng, run);
            if candidate.inertia < best.inertia {
                best = candidate;
            }
        }
        canonicalize(best)
    }

    fn run<const D: usize>(
        &self,
        points: &[[f64; D]],
        k: usize,
        tol: f64,
        rng: &mut StdRng,
        run: usize,
    ) -> Clustering<D> {
        let init = plus_plus_init(points, k, rng);
        let (labels, centroids, inertia, iterations) = lloyd(points, init, self.max_iter, tol);
        log::debug!("k-means run {run}: inertia {inertia:.3} after {iterations} iterations");
        Clustering {
            labels,
            centroids,
            inertia,
        }
    }
}

fn sq_dist<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn mean_variance<const D: usize>(points: &[[f64; D]]) -> f64 {
    if points.is_empty() || D == 0 {
        return 0.0;
    }
    let n = points.len() as f64;
    let total: f64 = (0..D)
        .map(|d| {
            let mean = points.iter().map(|p| p[d]).sum::<f64>() / n;
            points.iter().map(|p| (p[d] - mean).powi(2)).sum::<f64>() / n
        })
        .sum();
    total / D as f64
}

/// k-means++: first centre uniformly, the rest proportional to squared
/// distance from the nearest chosen centre.
fn plus_plus_init<const D: usize>(points: &[[f64; D]], k: usize, rng: &mut StdRng) -> Vec<[f64; D]> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())]);

    let mut nearest: Vec<f64> = points.iter().map(|p| sq_dist(p, &centroids[0])).collect();
    while centroids.len() < k {
        let total: f64 = nearest.iter().sum();
        let idx = if total <= 0.0 {
            rng.gen_range(0..points.len())
        } else {
            let mut target = rng.gen::<f64>() * total;
            let mut chosen = points.len() - 1;
            for (i, d) in nearest.iter().enumerate() {
                if target < *d {
                    chosen = i;
                    break;
                }
                target -= d;
            }
            chosen
        };

        let centre = points[idx];
        for (p, d) in points.iter().zip(nearest.iter_mut()) {
            *d = d.min(sq_dist(p, &centre));
        }
        centroids.push(centre);
    }
    centroids
}

fn assign<const D: usize>(points: &[[f64; D]], centroids: &[[f64; D]], labels: &mut [usize]) -> f64 {
    let mut inertia = 0.0;
    for (p, label) in points.iter().zip(labels.iter_mut()) {
        let (best, dist) = centroids
            .iter()
            .enumerate()
            .map(|(c, centre)| (c, sq_dist(p, centre)))
            .fold((0, f64::INFINITY), |acc, cur| if cur.1 < acc.1 { cur } else { acc });
        *label = best;
        inertia += dist;
    }
    inertia
}

fn lloyd<const D: usize>(
    points: &[[f64; D]],
    mut centroids: Vec<[f64; D]>,
    max_iter: usize,
    tol: f64,
) -> (Vec<usize>, Vec<[f64; D]>, f64, usize) {
    let k = centroids.len();
    let mut labels = vec![0; points.len()];
    let mut iterations = 0;

    for _ in 0..max_iter {
        iterations += 1;
        assign(points, &centroids, &mut labels);

        let mut sums = vec![[0.0; D]; k];
        let mut counts = vec![0usize; k];
        for (p, &label) in points.iter().zip(&labels) {
            counts[label] += 1;
            for d in 0..D {
                sums[label][d] += p[d];
            }
        }

        let mut shift = 0.0;
        for c in 0..k {
            // An empty cluster keeps its previous centre.
            if counts[c] == 0 {
                continue;
            }
            let mut next = sums[c];
            for v in next.iter_mut() {
                *v /= counts[c] as f64;
            }
            shift += sq_dist(&centroids[c], &next);
            centroids[c] = next;
        }

        if shift <= tol {
            break;
        }
    }

    let inertia = assign(points, &centroids, &mut labels);
    (labels, centroids, inertia, iterations)
}

/// Renumber clusters in order of first appearance.
fn canonicalize<const D: usize>(clustering: Clustering<D>) -> Clustering<D> {
    let k = clustering.centroids.len();
    let mut mapping = vec![usize::MAX; k];
    let mut next = 0;
    for &label in &clustering.labels {
        if mapping[label] == usize::MAX {
            mapping[label] = next;
            next += 1;
        }
    }
    // Clusters that ended up empty go last.
    for m in mapping.iter_mut().filter(|m| **m == usize::MAX) {
        *m = next;
        next += 1;
    }

    let mut centroids = vec![[0.0; D]; k];
    for (old, &new) in mapping.iter().enumerate() {
        centroids[new] = clustering.centroids[old];
    }
    Clustering {
        labels: clustering.labels.iter().map(|&l| mapping[l]).collect(),
        centroids,
        inertia: clustering.inertia,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blobs() -> Vec<[f64; 2]> {
        vec![
            [0.0, 0.0],
            [0.1, 0.2],
            [10.0, 10.0],
            [10.2, 9.9],
            [-0.1, 0.1],
            [20.0, 0.0],
            [20.1, 0.2],
            [9.8, 10.1],
        ]
    }

    #[test]
    fn test_separates_obvious_blobs() {
        let result = KMeans::new(3).fit(&blobs());
        let l = &result.labels;
        assert_eq!(l[0], l[1]);
        assert_eq!(l[0], l[4]);
        assert_eq!(l[2], l[3]);
        assert_eq!(l[2], l[7]);
        assert_eq!(l[5], l[6]);
        assert_ne!(l[0], l[2]);
        assert_ne!(l[2], l[5]);
        // labels follow first appearance
        assert_eq!(&l[..3], &[0, 0, 1]);
        assert_eq!(l[5], 2);
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let a = KMeans::new(3).fit(&blobs());
        let b = KMeans::new(3).fit(&blobs());
        assert_eq!(a, b);
    }

    #[test]
    fn test_fewer_points_than_clusters() {
        let result = KMeans::new(3).fit(&[[1.0, 1.0], [5.0, 5.0]]);
        assert_eq!(result.labels, vec![0, 1]);
        assert_eq!(result.centroids.len(), 2);

        let empty: [[f64; 2]; 0] = [];
        assert!(KMeans::new(3).fit(&empty).labels.is_empty());
    }

    #[test]
    fn test_identical_points_do_not_panic() {
        let result = KMeans::new(3).fit(&[[2.0, 2.0]; 5]);
        assert_eq!(result.labels.len(), 5);
        assert_eq!(result.inertia, 0.0);
    }
}

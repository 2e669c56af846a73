//! K-means over TF-IDF vectors.
//!
//! Lloyd's algorithm with k-means++ seeding from a fixed seed, so the same
//! names, `k` and seed always give the same partition.
//!
//! # Empty clusters
//!
//! A centroid that attracts no point is moved onto the point lying farthest
//! from its own centroid, taken from a cluster with at least two members.
//! The result therefore always has exactly `k` non-empty groups.

use ndarray::Array2;
use rand::prelude::*;

use super::tfidf::{SparseVector, TfidfVectorizer};
use crate::config::{DEFAULT_K, DEFAULT_SEED, KMEANS_MAX_ITER};
use crate::core::{ClusterError, Partition, Result};

const ALGORITHM: &str = "tfidf-kmeans";

#[derive(Debug, Clone)]
pub struct TfidfKmeans {
	/// Number of groups to produce
	pub k: usize,
	pub seed: u64,
	pub max_iter: usize,
}

/// Partition plus convergence diagnostics
#[derive(Debug, Clone)]
pub struct KmeansFit {
	pub partition: Partition,
	/// Lloyd iterations actually run
	pub iterations: usize,
	/// False when `max_iter` was hit while assignments were still changing
	pub converged: bool,
	/// Sum of squared distances to the assigned centroids
	pub inertia: f64,
}

impl Default for TfidfKmeans {
	fn default() -> Self {
		Self::new(DEFAULT_K)
	}
}

impl TfidfKmeans {
	pub fn new(k: usize) -> Self {
		Self {
			k,
			seed: DEFAULT_SEED,
			max_iter: KMEANS_MAX_ITER,
		}
	}

	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = seed;
		self
	}

	pub fn with_max_iter(mut self, max_iter: usize) -> Self {
		self.max_iter = max_iter;
		self
	}

	pub fn partition<S: AsRef<str>>(&self, names: &[S]) -> Result<Partition> {
		self.fit(names).map(|fit| fit.partition)
	}

	pub fn fit<S: AsRef<str>>(&self, names: &[S]) -> Result<KmeansFit> {
		if self.k == 0 {
			return Err(ClusterError::parameter("k", "must be at least 1"));
		}
		if self.max_iter == 0 {
			return Err(ClusterError::parameter("max_iter", "must be at least 1"));
		}

		let n = names.len();
		if n == 0 {
			return Err(ClusterError::InvalidInput(format!(
				"cannot form {} groups from an empty list",
				self.k
			)));
		}
		if self.k > n {
			return Err(ClusterError::InvalidInput(format!(
				"cannot form {} groups from {} names",
				self.k, n
			)));
		}

		// One group or one group per name: nothing to fit
		if self.k == 1 || self.k == n {
			let labels: Vec<usize> = if self.k == 1 { vec![0; n] } else { (0..n).collect() };
			return Ok(KmeansFit {
				partition: Partition::from_labels(&labels),
				iterations: 0,
				converged: true,
				inertia: 0.0,
			});
		}

		let tfidf = TfidfVectorizer::fit_transform(names);
		if tfidf.dim() == 0 || tfidf.rows.iter().all(SparseVector::is_zero) {
			return Err(ClusterError::Computation {
				algorithm: ALGORITHM,
				n_items: n,
				reason: "every name is shorter than two characters, all vectors are zero".into(),
			});
		}

		let mut rng = StdRng::seed_from_u64(self.seed);
		let mut centroids = Centroids::new(self.k, tfidf.dim());
		self.init_centroids(&tfidf.rows, &mut centroids, &mut rng);

		let mut labels = vec![usize::MAX; n];
		let mut iterations = 0;
		let mut converged = false;

		while iterations < self.max_iter {
			iterations += 1;

			let (mut next, distances) = centroids.assign(&tfidf.rows);
			relocate_empty(&mut next, &distances, self.k);

			if next == labels {
				converged = true;
				break;
			}
			labels = next;
			centroids.update(&tfidf.rows, &labels);
		}

		let inertia = tfidf
			.rows
			.iter()
			.zip(&labels)
			.map(|(row, &c)| centroids.distance(row, c))
			.sum::<f64>();

		if !inertia.is_finite() {
			return Err(ClusterError::Computation {
				algorithm: ALGORITHM,
				n_items: n,
				reason: format!("inertia is {}", inertia),
			});
		}

		Ok(KmeansFit {
			partition: Partition::from_labels(&labels),
			iterations,
			converged,
			inertia,
		})
	}

	/// k-means++: first centre uniform, the rest proportional to D(x)²
	fn init_centroids(&self, rows: &[SparseVector], centroids: &mut Centroids, rng: &mut StdRng) {
		let n = rows.len();
		let mut chosen = vec![false; n];

		let first = rng.random_range(0..n);
		chosen[first] = true;
		centroids.set(0, &rows[first]);

		let mut nearest: Vec<f64> = rows.iter().map(|r| centroids.distance(r, 0)).collect();

		for c in 1..self.k {
			let total: f64 = nearest.iter().sum();

			let pick = if total > 0.0 {
				let target = rng.random::<f64>() * total;
				let mut cumulative = 0.0;
				let mut pick = None;
				for (i, &d) in nearest.iter().enumerate() {
					if d <= 0.0 {
						continue;
					}
					cumulative += d;
					pick = Some(i);
					if cumulative >= target {
						break;
					}
				}
				pick
			} else {
				None
			};

			// All remaining points coincide with a centre; take any unused one
			let pick = pick
				.or_else(|| chosen.iter().position(|used| !used))
				.unwrap_or(0);

			chosen[pick] = true;
			centroids.set(c, &rows[pick]);

			for (i, row) in rows.iter().enumerate() {
				nearest[i] = nearest[i].min(centroids.distance(row, c));
			}
		}
	}
}

/// Dense k × dim centroid table with cached squared norms
struct Centroids {
	data: Array2<f64>,
	norms: Vec<f64>,
}

impl Centroids {
	fn new(k: usize, dim: usize) -> Self {
		Self {
			data: Array2::zeros((k, dim)),
			norms: vec![0.0; k],
		}
	}

	fn k(&self) -> usize {
		self.data.nrows()
	}

	fn set(&mut self, c: usize, row: &SparseVector) {
		let mut target = self.data.row_mut(c);
		target.fill(0.0);
		for &(i, v) in &row.entries {
			target[i] = v;
		}
		self.norms[c] = row.norm_squared();
	}

	fn distance(&self, row: &SparseVector, c: usize) -> f64 {
		let centre = self.data.row(c);
		let dot: f64 = row.entries.iter().map(|&(i, v)| v * centre[i]).sum();
		(row.norm_squared() - 2.0 * dot + self.norms[c]).max(0.0)
	}

	/// Nearest centroid per row (lowest index on ties) and the distance to it
	fn assign(&self, rows: &[SparseVector]) -> (Vec<usize>, Vec<f64>) {
		rows.iter()
			.map(|row| {
				let mut best = (0, f64::INFINITY);
				for c in 0..self.k() {
					let d = self.distance(row, c);
					if d < best.1 {
						best = (c, d);
					}
				}
				best
			})
			.unzip()
	}

	/// Move every centroid to the mean of its members
	fn update(&mut self, rows: &[SparseVector], labels: &[usize]) {
		let mut counts = vec![0usize; self.k()];
		self.data.fill(0.0);

		for (row, &c) in rows.iter().zip(labels) {
			counts[c] += 1;
			let mut target = self.data.row_mut(c);
			for &(i, v) in &row.entries {
				target[i] += v;
			}
		}

		for (c, &count) in counts.iter().enumerate() {
			let mut centre = self.data.row_mut(c);
			if count > 0 {
				centre /= count as f64;
			}
			self.norms[c] = centre.iter().map(|v| v * v).sum();
		}
	}
}

/// Give every empty cluster the farthest point of a cluster that can spare one
fn relocate_empty(labels: &mut [usize], distances: &[f64], k: usize) {
	let mut sizes = vec![0usize; k];
	for &c in labels.iter() {
		sizes[c] += 1;
	}

	let mut moved = vec![false; labels.len()];
	for empty in 0..k {
		if sizes[empty] > 0 {
			continue;
		}

		let donor = (0..labels.len())
			.filter(|&i| !moved[i] && sizes[labels[i]] > 1)
			.max_by(|&a, &b| distances[a].total_cmp(&distances[b]).then(b.cmp(&a)));

		if let Some(i) = donor {
			sizes[labels[i]] -= 1;
			sizes[empty] += 1;
			labels[i] = empty;
			moved[i] = true;
		}
	}
}

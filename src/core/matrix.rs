//! Symmetric pairwise distance matrix

use ndarray::Array2;

/// Dense n×n matrix of non-negative distances with a zero diagonal.
///
/// Built once per clustering call and dropped with it. Each unordered pair
/// is evaluated exactly once.
#[derive(Debug, Clone)]
pub struct DistanceMatrix(Array2<f64>);

impl DistanceMatrix {
	/// Evaluate `distance(i, j)` for every `i < j` and mirror it
	pub fn from_fn<F>(n: usize, mut distance: F) -> Self
	where
		F: FnMut(usize, usize) -> f64,
	{
		let mut data = Array2::zeros((n, n));
		for i in 0..n {
			for j in (i + 1)..n {
				let d = distance(i, j);
				data[[i, j]] = d;
				data[[j, i]] = d;
			}
		}
		Self(data)
	}

	pub fn len(&self) -> usize {
		self.0.nrows()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn get(&self, i: usize, j: usize) -> f64 {
		self.0[[i, j]]
	}

	/// Indices within `radius` of `i`, excluding `i` itself
	pub fn neighbors(&self, i: usize, radius: f64) -> Vec<usize> {
		self.0
			.row(i)
			.iter()
			.enumerate()
			.filter(|&(j, &d)| j != i && d <= radius)
			.map(|(j, _)| j)
			.collect()
	}

	/// Upper triangle in row-major order, length n(n-1)/2
	pub fn condensed(&self) -> Vec<f64> {
		let n = self.len();
		let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
		for i in 0..n {
			for j in (i + 1)..n {
				out.push(self.0[[i, j]]);
			}
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn symmetric_with_zero_diagonal() {
		let m = DistanceMatrix::from_fn(3, |i, j| (i + j) as f64);
		for i in 0..3 {
			assert_eq!(m.get(i, i), 0.0);
			for j in 0..3 {
				assert_eq!(m.get(i, j), m.get(j, i));
			}
		}
		assert_eq!(m.get(0, 2), 2.0);
	}

	#[test]
	fn each_pair_evaluated_once() {
		let mut calls = 0;
		let _ = DistanceMatrix::from_fn(5, |_, _| {
			calls += 1;
			1.0
		});
		assert_eq!(calls, 10);
	}

	#[test]
	fn condensed_layout() {
		let m = DistanceMatrix::from_fn(4, |i, j| (10 * i + j) as f64);
		assert_eq!(m.condensed(), vec![1.0, 2.0, 3.0, 12.0, 13.0, 23.0]);
	}

	#[test]
	fn neighbors_inclusive_radius() {
		let m = DistanceMatrix::from_fn(3, |i, j| if (i, j) == (0, 1) { 2.0 } else { 5.0 });
		assert_eq!(m.neighbors(0, 2.0), vec![1]);
		assert_eq!(m.neighbors(2, 4.9), Vec::<usize>::new());
	}

	#[test]
	fn empty_matrix() {
		let m = DistanceMatrix::from_fn(0, |_, _| 1.0);
		assert!(m.is_empty());
		assert!(m.condensed().is_empty());
	}
}

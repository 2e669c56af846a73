//! Density clustering over Levenshtein distances.
//!
//! Every name within `max_dist` edits of another is its neighbour. With
//! `min_points = 1` every name is a core point, so groups are the connected
//! components of the neighbour graph: two names far apart still share a
//! group when a chain of close names links them.

use crate::config::{DEFAULT_MAX_DIST, DEFAULT_MIN_POINTS};
use crate::core::{ClusterError, DistanceMatrix, Partition, Result};

const UNVISITED: usize = usize::MAX;

/// Edit distance counted over Unicode scalar values
pub fn levenshtein(a: &str, b: &str) -> usize {
	strsim::levenshtein(a, b)
}

#[derive(Debug, Clone)]
pub struct EditDistance {
	/// Neighbourhood radius in edits
	pub max_dist: f64,
	/// Neighbours (self included) needed to seed a group
	pub min_points: usize,
}

impl Default for EditDistance {
	fn default() -> Self {
		Self::new(DEFAULT_MAX_DIST)
	}
}

impl EditDistance {
	pub fn new(max_dist: f64) -> Self {
		Self {
			max_dist,
			min_points: DEFAULT_MIN_POINTS,
		}
	}

	pub fn with_max_dist(mut self, max_dist: f64) -> Self {
		self.max_dist = max_dist;
		self
	}

	pub fn with_min_points(mut self, min_points: usize) -> Self {
		self.min_points = min_points;
		self
	}

	fn validate(&self) -> Result<()> {
		if !self.max_dist.is_finite() || self.max_dist < 0.0 {
			return Err(ClusterError::parameter(
				"max_dist",
				format!("must be a non-negative number, got {}", self.max_dist),
			));
		}
		if self.min_points == 0 {
			return Err(ClusterError::parameter("min_points", "must be at least 1"));
		}
		Ok(())
	}

	pub fn partition<S: AsRef<str>>(&self, names: &[S]) -> Result<Partition> {
		self.validate()?;

		let chars: Vec<Vec<char>> = names.iter().map(|s| s.as_ref().chars().collect()).collect();
		let matrix = DistanceMatrix::from_fn(names.len(), |i, j| {
			strsim::generic_levenshtein(&chars[i], &chars[j]) as f64
		});

		Ok(Partition::from_labels(&self.assign(&matrix)))
	}

	/// DBSCAN over a precomputed matrix; noise points become their own group
	fn assign(&self, matrix: &DistanceMatrix) -> Vec<usize> {
		let n = matrix.len();
		let mut labels = vec![UNVISITED; n];
		let mut next_label = 0;

		for point in 0..n {
			if labels[point] != UNVISITED {
				continue;
			}

			let neighbors = matrix.neighbors(point, self.max_dist);
			if neighbors.len() + 1 < self.min_points {
				// Might still be claimed as a border point later
				continue;
			}

			let label = next_label;
			next_label += 1;
			labels[point] = label;

			let mut queue = neighbors;
			while let Some(q) = queue.pop() {
				if labels[q] != UNVISITED {
					continue;
				}
				labels[q] = label;

				let reach = matrix.neighbors(q, self.max_dist);
				if reach.len() + 1 >= self.min_points {
					queue.extend(reach.into_iter().filter(|&r| labels[r] == UNVISITED));
				}
			}
		}

		for label in labels.iter_mut().filter(|l| **l == UNVISITED) {
			*label = next_label;
			next_label += 1;
		}

		labels
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn groups(names: &[&str], max_dist: f64) -> Vec<Vec<String>> {
		EditDistance::new(max_dist).partition(names).unwrap().resolve(names)
	}

	#[test]
	fn levenshtein_basics() {
		assert_eq!(levenshtein("kitten", "sitting"), 3);
		assert_eq!(levenshtein("", "abc"), 3);
		assert_eq!(levenshtein("same", "same"), 0);
		assert_eq!(levenshtein("é", "e"), 1);
	}

	#[test]
	fn report_versions_group_together() {
		let out = groups(&["report_final", "report_final_v2", "budget_2023"], 5.0);
		assert_eq!(
			out,
			vec![
				vec!["report_final".to_string(), "report_final_v2".to_string()],
				vec!["budget_2023".to_string()],
			]
		);
	}

	#[test]
	fn zero_radius_gives_exact_match_classes() {
		let out = groups(&["a", "b", "a", "ab"], 0.0);
		assert_eq!(out.len(), 3);
		assert_eq!(out[0], vec!["a".to_string(), "a".to_string()]);
	}

	#[test]
	fn chains_connect_distant_names() {
		// Neighbours differ by one edit; the two ends are four edits apart
		let names = ["aaaa", "baaa", "bbaa", "bbba", "bbbb"];
		let p = EditDistance::new(1.0).partition(&names).unwrap();
		assert_eq!(p.len(), 1);
		assert_eq!(levenshtein("aaaa", "bbbb"), 4);
	}

	#[test]
	fn empty_and_single_inputs() {
		let empty: [&str; 0] = [];
		assert!(EditDistance::default().partition(&empty).unwrap().is_empty());
		assert_eq!(groups(&["only"], 3.0), vec![vec!["only".to_string()]]);
	}

	#[test]
	fn noise_points_stay_alone() {
		let names = ["aaaa", "aaab", "zzzz"];
		let p = EditDistance::new(1.0).with_min_points(2).partition(&names).unwrap();
		assert_eq!(p.groups(), &[vec![0, 1], vec![2]]);
	}

	#[test]
	fn rejects_bad_parameters() {
		let names = ["a"];
		assert!(matches!(
			EditDistance::new(-1.0).partition(&names),
			Err(ClusterError::InvalidParameter { name: "max_dist", .. })
		));
		assert!(matches!(
			EditDistance::new(f64::NAN).partition(&names),
			Err(ClusterError::InvalidParameter { name: "max_dist", .. })
		));
		assert!(matches!(
			EditDistance::new(1.0).with_min_points(0).partition(&names),
			Err(ClusterError::InvalidParameter { name: "min_points", .. })
		));
	}
}

//! Average-linkage clustering over trigram (shingle) Jaccard distances

use std::collections::HashSet;

use kodama::{linkage, Method as Linkage};

use crate::config::{DEFAULT_THRESHOLD, SHINGLE_LEN};
use crate::core::{ClusterError, DistanceMatrix, Partition, Result};

/// Every contiguous 3-character window of `name`
pub fn shingles(name: &str) -> HashSet<String> {
	let chars: Vec<char> = name.chars().collect();
	chars.windows(SHINGLE_LEN).map(|w| w.iter().collect()).collect()
}

/// `1 - |A ∩ B| / |A ∪ B|` over shingle sets.
///
/// Identical names are at distance 0. Otherwise a name too short to yield a
/// shingle is maximally far (1.0) from everything.
pub fn jaccard_distance(a: &str, b: &str) -> f64 {
	if a == b {
		return 0.0;
	}
	shingle_distance(&shingles(a), &shingles(b))
}

fn shingle_distance(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
	if a.is_empty() || b.is_empty() {
		return 1.0;
	}
	let shared = a.intersection(b).count();
	let union = a.len() + b.len() - shared;
	1.0 - shared as f64 / union as f64
}

#[derive(Debug, Clone)]
pub struct ShingleOverlap {
	/// Highest average dissimilarity at which two groups still merge
	pub threshold: f64,
}

impl Default for ShingleOverlap {
	fn default() -> Self {
		Self::new(DEFAULT_THRESHOLD)
	}
}

impl ShingleOverlap {
	pub fn new(threshold: f64) -> Self {
		Self { threshold }
	}

	pub fn partition<S: AsRef<str>>(&self, names: &[S]) -> Result<Partition> {
		if !(0.0..=1.0).contains(&self.threshold) {
			return Err(ClusterError::parameter(
				"threshold",
				format!("must be within [0, 1], got {}", self.threshold),
			));
		}

		let n = names.len();
		if n < 2 {
			return Ok(Partition::from_labels(&vec![0usize; n]));
		}

		let sets: Vec<HashSet<String>> = names.iter().map(|s| shingles(s.as_ref())).collect();
		let matrix = DistanceMatrix::from_fn(n, |i, j| {
			if names[i].as_ref() == names[j].as_ref() {
				0.0
			} else {
				shingle_distance(&sets[i], &sets[j])
			}
		});

		let mut condensed = matrix.condensed();
		let dendrogram = linkage(&mut condensed, n, Linkage::Average);

		// Leaves are 0..n, merge i creates cluster n + i
		let mut forest = Forest::new(n);
		let mut leaf_of: Vec<usize> = (0..n).collect();
		for step in dendrogram.steps() {
			let (a, b) = (leaf_of[step.cluster1], leaf_of[step.cluster2]);
			if step.dissimilarity <= self.threshold {
				forest.union(a, b);
			}
			leaf_of.push(a);
		}

		let labels: Vec<usize> = (0..n).map(|i| forest.find(i)).collect();
		Ok(Partition::from_labels(&labels))
	}
}

/// Union-find over leaf indices
struct Forest {
	parent: Vec<usize>,
}

impl Forest {
	fn new(n: usize) -> Self {
		Self { parent: (0..n).collect() }
	}

	fn find(&mut self, mut x: usize) -> usize {
		while self.parent[x] != x {
			self.parent[x] = self.parent[self.parent[x]];
			x = self.parent[x];
		}
		x
	}

	fn union(&mut self, a: usize, b: usize) {
		let (ra, rb) = (self.find(a), self.find(b));
		if ra != rb {
			self.parent[rb] = ra;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shingle_sets() {
		let s = shingles("abcd");
		assert_eq!(s.len(), 2);
		assert!(s.contains("abc") && s.contains("bcd"));
		assert!(shingles("ab").is_empty());
		assert_eq!(shingles("ééé").len(), 1);
	}

	#[test]
	fn distance_values() {
		assert_eq!(jaccard_distance("abcd", "abcd"), 0.0);
		assert_eq!(jaccard_distance("ab", "ab"), 0.0);
		assert_eq!(jaccard_distance("ab", "abc"), 1.0);
		// {abc, bcd} vs {abc, bce}: one shared out of three
		assert!((jaccard_distance("abcd", "abce") - 2.0 / 3.0).abs() < 1e-12);
	}

	#[test]
	fn short_names_stay_apart_at_high_threshold() {
		let names = ["abc", "abd", "xyz"];
		let p = ShingleOverlap::new(0.9).partition(&names).unwrap();
		assert_eq!(p.len(), 3);
	}

	#[test]
	fn full_threshold_merges_everything() {
		let names = ["abc", "abd", "xyz"];
		let p = ShingleOverlap::new(1.0).partition(&names).unwrap();
		assert_eq!(p.len(), 1);
	}

	#[test]
	fn series_episodes_merge() {
		let names = [
			"the_office_s01e01",
			"the_office_s01e02",
			"the_office_s01e03",
			"planet_earth_ep1",
			"planet_earth_ep2",
		];
		let p = ShingleOverlap::new(0.4).partition(&names).unwrap();
		assert_eq!(p.groups(), &[vec![0, 1, 2], vec![3, 4]]);
	}

	#[test]
	fn average_linkage_not_single_linkage() {
		// Every neighbouring pair is within 0.4, but the ends average out too far
		let names = ["aaaabbbb_xx", "aaaabbbb_xx_yyyy", "bbbb_xx_yyyy"];
		assert!(jaccard_distance(names[0], names[1]) <= 0.4);
		assert!(jaccard_distance(names[1], names[2]) <= 0.4);
		let p = ShingleOverlap::new(0.4).partition(&names).unwrap();
		assert_eq!(p.groups(), &[vec![0], vec![1, 2]]);
	}

	#[test]
	fn empty_and_single() {
		let empty: [&str; 0] = [];
		assert!(ShingleOverlap::default().partition(&empty).unwrap().is_empty());
		assert_eq!(ShingleOverlap::default().partition(&["x"]).unwrap().len(), 1);
	}

	#[test]
	fn rejects_threshold_outside_unit_interval() {
		for bad in [-0.1, 1.5, f64::NAN] {
			assert!(matches!(
				ShingleOverlap::new(bad).partition(&["abc"]),
				Err(ClusterError::InvalidParameter { name: "threshold", .. })
			));
		}
	}
}

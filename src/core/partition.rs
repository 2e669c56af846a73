//! Grouping of input positions produced by every clusterer

use std::collections::HashMap;

/// A partition of `n` input positions into disjoint groups.
///
/// Labels are renumbered by first appearance: group 0 always holds
/// position 0 and each group lists its positions in input order. Two
/// partitions that differ only by label naming therefore compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
	labels: Vec<usize>,
	groups: Vec<Vec<usize>>,
}

impl Partition {
	/// Build from arbitrary per-position labels
	pub fn from_labels<L>(raw: &[L]) -> Self
	where
		L: Copy + Eq + std::hash::Hash,
	{
		let mut renumber: HashMap<L, usize> = HashMap::new();
		let mut labels = Vec::with_capacity(raw.len());
		let mut groups: Vec<Vec<usize>> = Vec::new();

		for (position, label) in raw.iter().enumerate() {
			let next = renumber.len();
			let id = *renumber.entry(*label).or_insert(next);
			if id == groups.len() {
				groups.push(Vec::new());
			}
			groups[id].push(position);
			labels.push(id);
		}

		Self { labels, groups }
	}

	/// Number of groups
	pub fn len(&self) -> usize {
		self.groups.len()
	}

	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}

	/// Group id of every input position
	pub fn labels(&self) -> &[usize] {
		&self.labels
	}

	pub fn groups(&self) -> &[Vec<usize>] {
		&self.groups
	}

	pub fn group_sizes(&self) -> Vec<usize> {
		self.groups.iter().map(Vec::len).collect()
	}

	/// Replace positions with the names they index
	pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Vec<Vec<String>> {
		self.groups
			.iter()
			.map(|group| group.iter().map(|&i| names[i].as_ref().to_string()).collect())
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renumbers_by_first_appearance() {
		let p = Partition::from_labels(&[7, 3, 7, 9, 3]);
		assert_eq!(p.labels(), &[0, 1, 0, 2, 1]);
		assert_eq!(p.groups(), &[vec![0, 2], vec![1, 4], vec![3]]);
		assert_eq!(p.group_sizes(), vec![2, 2, 1]);
	}

	#[test]
	fn label_renaming_is_invisible() {
		let a = Partition::from_labels(&[1usize, 1, 0]);
		let b = Partition::from_labels(&[5usize, 5, 2]);
		assert_eq!(a, b);
	}

	#[test]
	fn resolve_keeps_duplicate_values() {
		let names = ["a", "b", "a"];
		let p = Partition::from_labels(&[0, 1, 2]);
		assert_eq!(
			p.resolve(&names),
			vec![vec!["a".to_string()], vec!["b".to_string()], vec!["a".to_string()]]
		);
	}

	#[test]
	fn empty_labels() {
		let p = Partition::from_labels::<usize>(&[]);
		assert!(p.is_empty());
		assert!(p.resolve::<&str>(&[]).is_empty());
	}
}

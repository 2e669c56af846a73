//! Character n-gram TF-IDF vectors.
//!
//! The input names are their own corpus: document frequencies are counted
//! over the names being clustered, never over a fixed vocabulary.

use std::collections::{BTreeMap, HashMap};

use crate::config::{NGRAM_MAX, NGRAM_MIN};

/// Sparse row with column indices in ascending order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
	pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
	pub fn is_zero(&self) -> bool {
		self.entries.iter().all(|&(_, v)| v == 0.0)
	}

	pub fn norm_squared(&self) -> f64 {
		self.entries.iter().map(|&(_, v)| v * v).sum()
	}

	/// Dot product with a dense vector
	pub fn dot(&self, dense: &[f64]) -> f64 {
		self.entries.iter().map(|&(i, v)| v * dense[i]).sum()
	}

	/// Squared Euclidean distance to a dense vector whose squared norm is known
	pub fn distance_squared(&self, dense: &[f64], dense_norm_squared: f64) -> f64 {
		(self.norm_squared() - 2.0 * self.dot(dense) + dense_norm_squared).max(0.0)
	}

	pub fn to_dense(&self, dim: usize) -> Vec<f64> {
		let mut out = vec![0.0; dim];
		for &(i, v) in &self.entries {
			out[i] = v;
		}
		out
	}
}

/// Fitted vocabulary plus the weighted rows of every input name
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
	/// n-gram → column, columns in lexical order
	pub vocabulary: BTreeMap<String, usize>,
	pub idf: Vec<f64>,
	pub rows: Vec<SparseVector>,
}

impl TfidfVectorizer {
	/// Smoothed idf `ln((1 + n) / (1 + df)) + 1`, raw term counts, L2-normalized rows
	pub fn fit_transform<S: AsRef<str>>(names: &[S]) -> Self {
		let counts: Vec<HashMap<String, usize>> = names.iter().map(|s| ngram_counts(s.as_ref())).collect();

		let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
		for doc in &counts {
			for gram in doc.keys() {
				*document_frequency.entry(gram.clone()).or_default() += 1;
			}
		}

		let n = names.len() as f64;
		let mut vocabulary = BTreeMap::new();
		let mut idf = Vec::with_capacity(document_frequency.len());
		for (column, (gram, df)) in document_frequency.into_iter().enumerate() {
			idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
			vocabulary.insert(gram, column);
		}

		let rows = counts
			.iter()
			.map(|doc| {
				let mut entries: Vec<(usize, f64)> = doc
					.iter()
					.map(|(gram, &tf)| {
						let column = vocabulary[gram];
						(column, tf as f64 * idf[column])
					})
					.collect();
				entries.sort_by_key(|&(column, _)| column);

				let norm = entries.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt();
				if norm > 0.0 {
					for (_, v) in &mut entries {
						*v /= norm;
					}
				}
				SparseVector { entries }
			})
			.collect();

		Self { vocabulary, idf, rows }
	}

	pub fn dim(&self) -> usize {
		self.vocabulary.len()
	}
}

/// Lower-case, squeeze whitespace runs, then count every n-gram of length 2..=5
fn ngram_counts(name: &str) -> HashMap<String, usize> {
	let lowered = name.to_lowercase();
	let mut chars: Vec<char> = Vec::with_capacity(lowered.len());
	for c in lowered.chars() {
		let squeezed = c.is_whitespace() && chars.last().is_some_and(|p| p.is_whitespace());
		if squeezed {
			if let Some(last) = chars.last_mut() {
				*last = ' ';
			}
		} else {
			chars.push(c);
		}
	}

	let mut counts = HashMap::new();
	for len in NGRAM_MIN..=NGRAM_MAX.min(chars.len()) {
		for window in chars.windows(len) {
			*counts.entry(window.iter().collect::<String>()).or_default() += 1;
		}
	}
	counts
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_all_gram_lengths() {
		let counts = ngram_counts("abcd");
		// 3 bigrams + 2 trigrams + 1 four-gram
		assert_eq!(counts.len(), 6);
		assert_eq!(counts["ab"], 1);
		assert_eq!(counts["abcd"], 1);
	}

	#[test]
	fn lowercases_and_squeezes_whitespace() {
		let counts = ngram_counts("A  B");
		assert!(counts.contains_key("a "));
		assert!(counts.contains_key("a b"));
		assert!(!counts.contains_key("  "));
	}

	#[test]
	fn short_names_have_no_grams() {
		assert!(ngram_counts("x").is_empty());
		assert!(ngram_counts("").is_empty());
	}

	#[test]
	fn rows_are_unit_length() {
		let tfidf = TfidfVectorizer::fit_transform(&["movie_one", "movie_two", "z"]);
		assert!((tfidf.rows[0].norm_squared() - 1.0).abs() < 1e-9);
		assert!((tfidf.rows[1].norm_squared() - 1.0).abs() < 1e-9);
		assert!(tfidf.rows[2].is_zero());
	}

	#[test]
	fn shared_grams_weigh_less() {
		let tfidf = TfidfVectorizer::fit_transform(&["abx", "aby"]);
		let shared = tfidf.idf[tfidf.vocabulary["ab"]];
		let unique = tfidf.idf[tfidf.vocabulary["bx"]];
		assert!((shared - 1.0).abs() < 1e-12);
		assert!(unique > shared);
	}

	#[test]
	fn sparse_distance_matches_dense() {
		let tfidf = TfidfVectorizer::fit_transform(&["alpha", "alpine"]);
		let a = &tfidf.rows[0];
		let b = tfidf.rows[1].to_dense(tfidf.dim());
		let b_norm: f64 = b.iter().map(|v| v * v).sum();
		let dense_a = a.to_dense(tfidf.dim());
		let expected: f64 = dense_a.iter().zip(&b).map(|(x, y)| (x - y).powi(2)).sum();
		assert!((a.distance_squared(&b, b_norm) - expected).abs() < 1e-9);
	}
}

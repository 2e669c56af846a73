//! # Filename Clustering
//!
//! Three interchangeable ways to group look-alike filenames. Each one is a
//! pure function of its input: an ordered list of names goes in, a
//! [`Partition`] of their positions comes out. Duplicated names are kept as
//! distinct positions.
//!
//! | Variant | Distance | Grouping |
//! |---------|----------|----------|
//! | [`EditDistance`] | Levenshtein | density connectivity within `max_dist` |
//! | [`TfidfKmeans`] | Euclidean over TF-IDF char n-grams | exactly `k` centroids |
//! | [`ShingleOverlap`] | Jaccard over 3-char shingles | average linkage cut at `threshold` |
//!
//! ```
//! use vidsift::processing::cluster::{cluster, Method, EditDistance};
//!
//! let names = ["report_final", "report_final_v2", "budget_2023"];
//! let groups = cluster(&names, &Method::EditDistance(EditDistance::new(5.0))).unwrap();
//! assert_eq!(groups.len(), 2);
//! ```

mod edit;
mod kmeans;
mod shingle;
mod tfidf;

use std::fmt;

pub use edit::{levenshtein, EditDistance};
pub use kmeans::{KmeansFit, TfidfKmeans};
pub use shingle::{jaccard_distance, shingles, ShingleOverlap};
pub use tfidf::{SparseVector, TfidfVectorizer};

use crate::core::{Partition, Result};

/// A clustering variant together with its parameters
#[derive(Debug, Clone)]
pub enum Method {
	EditDistance(EditDistance),
	TfidfKmeans(TfidfKmeans),
	ShingleOverlap(ShingleOverlap),
}

impl Method {
	pub fn partition<S: AsRef<str>>(&self, names: &[S]) -> Result<Partition> {
		match self {
			Method::EditDistance(m) => m.partition(names),
			Method::TfidfKmeans(m) => m.partition(names),
			Method::ShingleOverlap(m) => m.partition(names),
		}
	}
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Method::EditDistance(m) => write!(f, "edit-distance(max_dist={}, min_points={})", m.max_dist, m.min_points),
			Method::TfidfKmeans(m) => write!(f, "tfidf-kmeans(k={}, seed={})", m.k, m.seed),
			Method::ShingleOverlap(m) => write!(f, "shingle-overlap(threshold={})", m.threshold),
		}
	}
}

/// Group `names` with the chosen method
pub fn cluster<S: AsRef<str>>(names: &[S], method: &Method) -> Result<Vec<Vec<String>>> {
	Ok(method.partition(names)?.resolve(names))
}

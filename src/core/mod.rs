//! Core domain types

pub mod cluster;
pub mod error;
pub mod matrix;
pub mod media;
pub mod partition;
pub mod record;

pub use cluster::{ClusterReport, NameGroup};
pub use error::{ClusterError, Result};
pub use matrix::DistanceMatrix;
pub use media::{is_video, normalize_filename};
pub use partition::Partition;
pub use record::{DeviceRecord, VideoRecord};

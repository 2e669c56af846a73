//! Scanning and filename clustering

pub mod cluster;
pub mod device;
pub mod scan;

pub use scan::scan_directory;

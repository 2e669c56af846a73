//! # vidsift Library
//!
//! Indexes video files into SQLite and groups look-alike filenames with one
//! of three clustering methods: edit-distance density clustering, TF-IDF
//! character n-gram k-means, or trigram-overlap average linkage.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod processing;
pub mod storage;
pub mod ui;

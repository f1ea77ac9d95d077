//! Client-side feature roadmap tracker.
//!
//! An in-memory list of feature records persisted to a single JSON storage
//! slot, with CRUD operations, text and enum filtering, summary statistics,
//! and an impact/effort prioritization matrix.
//!
//! The [`store::FeatureStore`] owns the records and filter state and writes
//! through an injected [`store::Storage`] backend; [`matrix`] holds the pure
//! scoring and coordinate math; [`cli`] is the terminal front end used by the
//! `rdmp` binary.

pub mod cli;
pub mod matrix;
pub mod models;
pub mod store;

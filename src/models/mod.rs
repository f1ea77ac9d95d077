//! Domain models for the roadmap tracker.
//!
//! # Core Concepts
//!
//! - [`Feature`]: one roadmap entry, identified by an opaque id string and
//!   stamped with creation/update times. The whole collection is a flat
//!   ordered list.
//! - [`MatrixPosition`]: a feature's impact/effort placement (scores 1..=5),
//!   interpreted by the functions in [`crate::matrix`].
//! - [`FilterOptions`] / [`FilterUpdate`]: the active filter selection and
//!   single-field changes to it. Filters are view state; they never affect
//!   what is stored.
//! - [`Stats`]: derived counts for the summary view.
//!
//! Create/update flows use the [`CreateFeatureInput`] / [`UpdateFeatureInput`]
//! pair; updates are partial, with `None` meaning "keep the current value".

mod feature;
mod filter;
mod stats;

pub use feature::*;
pub use filter::*;
pub use stats::*;

//! Core building blocks for nesting irregular 2D garment pattern pieces onto
//! a rectangular fabric: geometric primitives and rigid transformations,
//! exact-area boolean helpers, the piece/fabric/layout entities, a spatial
//! index for collision pruning, and import/export of the external schemas.
//!
//! The optimizers themselves (seed packers, genetic search, compaction and
//! the heuristic nester) live in the `gapack` crate.

pub mod collision;
pub mod entities;
pub mod geometry;
pub mod io;

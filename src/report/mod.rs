//! Output renderers for a clustering run.
//!
//! - [`terminal`] — colored summary plus one `comfy-table` per cluster.
//! - [`charts`] — PNG artifacts via `plotters`: elbow curve, PCA scatter,
//!   per-cluster top-package bars.

pub mod charts;
pub mod terminal;

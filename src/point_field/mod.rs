//! Point fields pick where trees go. The forest only needs a set of points in a
//! rectangle that keep a minimum distance from each other; how they are found
//! is up to the [`PointSampler`] in use.

use geo_types::{Point, Rect};
use std::fmt::Debug;

pub mod poisson;
pub use poisson::*;

pub trait PointSampler: Debug {
    /// Points inside `bounds` (edges included), pairwise at least
    /// `min_distance` apart.
    fn sample(&mut self, min_distance: f64, bounds: &Rect<f64>) -> Vec<Point<f64>>;
}

use geo_types::{Point, Rect};
use rand::prelude::*;
use rstar::RTree;
use std::f64::consts::TAU;
use std::fmt::{Debug, Formatter};
use tracing::{debug, warn};

use super::PointSampler;
use crate::params::MIN_SPAWN_RADIUS;

pub const DEFAULT_MAX_ATTEMPTS: usize = 30;

/// Bridson-style Poisson disk sampling. Each accepted point spawns up to
/// `max_attempts` candidates in the annulus `[r, 2r)` around it; a candidate is
/// kept if nothing already accepted lies within `r`. Neighbour lookups go
/// through an R-tree. Distances under [`MIN_SPAWN_RADIUS`] are raised to it.
pub struct PoissonPointField {
    seed: Option<u64>,
    max_attempts: usize,
    rng: SmallRng,
}

impl Debug for PoissonPointField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoissonPointField")
            .field("seed", &self.seed)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

impl Default for PoissonPointField {
    fn default() -> Self {
        Self {
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            rng: SmallRng::from_entropy(),
        }
    }
}

impl PoissonPointField {
    pub fn new(seed: Option<u64>, max_attempts: usize) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            seed,
            max_attempts: max_attempts.max(1),
            rng,
        }
    }
}

impl PointSampler for PoissonPointField {
    fn sample(&mut self, min_distance: f64, bounds: &Rect<f64>) -> Vec<Point<f64>> {
        let min = bounds.min();
        let max = bounds.max();
        if ![min_distance, min.x, min.y, max.x, max.y]
            .iter()
            .all(|v| v.is_finite())
        {
            warn!(min_distance, ?bounds, "Non-finite sampling area, no points placed");
            return Vec::new();
        }
        let min_distance = min_distance.max(MIN_SPAWN_RADIUS);
        let r2 = min_distance * min_distance;
        let inside = |x: f64, y: f64| x >= min.x && x <= max.x && y >= min.y && y <= max.y;

        let mut tree: RTree<[f64; 2]> = RTree::new();
        let mut points: Vec<Point<f64>> = Vec::new();
        let mut active: Vec<usize> = Vec::new();

        let first = [
            self.rng.gen_range(min.x..=max.x),
            self.rng.gen_range(min.y..=max.y),
        ];
        tree.insert(first);
        points.push(Point::new(first[0], first[1]));
        active.push(0);

        while !active.is_empty() {
            let slot = self.rng.gen_range(0..active.len());
            let base = points[active[slot]];
            let mut found = false;
            for _ in 0..self.max_attempts {
                let angle = self.rng.gen_range(0.0..TAU);
                let dist = self.rng.gen_range(min_distance..2.0 * min_distance);
                let candidate = [
                    base.x() + dist * angle.cos(),
                    base.y() + dist * angle.sin(),
                ];
                if !inside(candidate[0], candidate[1]) {
                    continue;
                }
                if tree.locate_within_distance(candidate, r2).next().is_some() {
                    continue;
                }
                tree.insert(candidate);
                active.push(points.len());
                points.push(Point::new(candidate[0], candidate[1]));
                found = true;
                break;
            }
            if !found {
                active.swap_remove(slot);
            }
        }
        debug!(count = points.len(), min_distance, "Sampled Poisson point field");
        points
    }
}

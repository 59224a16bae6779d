//! ArmyOfEvilRobots L-system arboretum
//!
//! Grows trees from bracketed L-system grammars, walks them with a 3D turtle,
//! and scatters whole forests over a spawn area with Poisson disk placement.
//! The output is plain line segments (start, end, width, leaf or branch), so
//! whatever draws them is up to you: a mesh builder, a plotter, an SVG.
//!
//! The pieces, roughly in the order they run:
//!
//! * [`l_system`]: grammar expansion and the eight stock tree grammars.
//! * [`variation`]: the jitter table that keeps a tree's look stable between
//!   rebuilds until you ask for a new one.
//! * [`turtle`]: turns an expanded string into segments.
//! * [`point_field`]: where the trees go.
//! * [`forest`]: one tree per point, centred on the origin.
//! * [`generator`]: the session object that decides when to rebuild.

/// Error types for generation and parameter input.
pub mod errors;

/// L-system implementation, with expansion and the stock tree catalog
pub mod l_system;

/// 3D turtle graphics, including integration with L-systems
pub mod turtle;

/// Rotation jitter table
pub mod variation;

/// Generation parameters and their editing rules
pub mod params;

/// Minimum-distance point sampling for tree placement
pub mod point_field;

/// Trees, forests, and forest placement
pub mod forest;

/// Regeneration control
pub mod generator;

/// Make your life easy! Just import prelude::* and ignore all the warnings!
pub mod prelude {
    pub use crate::errors::{GenerationError, ParamError};
    pub use crate::forest::{place_forest, Forest, Layout, RulesetSelection, Tree};
    pub use crate::generator::{Generator, GeneratorConfig, WarningState};
    pub use crate::l_system::{catalog_entry, expand, LSystem, Ruleset};
    pub use crate::params::{GenerationParams, ParamField};
    pub use crate::point_field::{PointSampler, PoissonPointField};
    pub use crate::turtle::{interpret, Segment, SegmentKind, Turtle, TurtleTrait};
    pub use crate::variation::VariationTable;
}

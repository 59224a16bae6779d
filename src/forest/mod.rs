//! Trees and forests. [`place_forest`] runs one grammar expansion and turtle
//! walk per sampled position and lays the results out around the origin.

use geo::BoundingRect;
use geo_types::{coord, MultiLineString, MultiPoint, Point, Rect};
use nalgebra::Vector3;
use rand::Rng;
use tracing::debug;

use crate::errors::GenerationError;
use crate::l_system::{catalog_entry, random_entry, LSystem};
use crate::params::GenerationParams;
use crate::point_field::PointSampler;
use crate::turtle::{interpret, segments_to_multiline, Segment};
use crate::variation::VariationTable;

/// Where each tree's grammar comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum RulesetSelection {
    /// A fixed catalog entry (1-based, clamped).
    Catalog(usize),
    /// A uniformly random catalog entry, drawn independently per tree.
    Random,
    /// A caller supplied grammar.
    Custom(LSystem),
}

/// Where the trees go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// One tree at the origin.
    Single,
    /// One tree per sampled point in the spawn area.
    Scattered,
}

/// One interpretation pass, already moved to its place. `title` is the
/// catalog entry it grew from, `None` for a custom grammar.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    pub title: Option<usize>,
    pub offset: Vector3<f64>,
    pub segments: Vec<Segment>,
}

impl Tree {
    /// Expands `system`, walks it, and shifts every segment by `offset`.
    pub fn grow(
        system: &LSystem,
        title: Option<usize>,
        params: &GenerationParams,
        variation: &VariationTable,
        offset: Vector3<f64>,
    ) -> Result<Tree, GenerationError> {
        let command = system.expand(params.iterations());
        let segments = interpret(&command, params, variation)?
            .iter()
            .map(|segment| segment.translated(&offset))
            .collect();
        Ok(Tree {
            title,
            offset,
            segments,
        })
    }

    /// Front view of the tree.
    pub fn to_multiline(&self) -> MultiLineString<f64> {
        segments_to_multiline(&self.segments)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
}

impl Forest {
    pub fn new(trees: Vec<Tree>) -> Forest {
        Forest { trees }
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn segment_count(&self) -> usize {
        self.trees.iter().map(|tree| tree.segments.len()).sum()
    }

    /// Front view of every tree, in tree order.
    pub fn to_multiline(&self) -> MultiLineString<f64> {
        MultiLineString::new(
            self.trees
                .iter()
                .flat_map(|tree| tree.to_multiline().0)
                .collect(),
        )
    }

    /// Bounding rectangle of the tree bases on the ground (x, z) plane.
    pub fn footprint(&self) -> Option<Rect<f64>> {
        let bases: MultiPoint<f64> = self
            .trees
            .iter()
            .map(|tree| Point::new(tree.offset.x, tree.offset.z))
            .collect();
        bases.bounding_rect()
    }
}

/// Builds a whole forest. In [`Layout::Scattered`] the sampler fills the spawn
/// area and each point `p` gets a tree offset by `p - area / 2` on the ground
/// plane, so the field is centred on the origin. In [`Layout::Single`] one tree
/// grows at the origin. The first tree that fails aborts the pass.
pub fn place_forest<S, R>(
    params: &GenerationParams,
    variation: &VariationTable,
    layout: Layout,
    selection: &RulesetSelection,
    sampler: &mut S,
    rng: &mut R,
) -> Result<Forest, GenerationError>
where
    S: PointSampler + ?Sized,
    R: Rng + ?Sized,
{
    let area = params.spawn_area();
    let offsets: Vec<Vector3<f64>> = match layout {
        Layout::Single => vec![Vector3::zeros()],
        Layout::Scattered => {
            let bounds = Rect::new(coord! {x: 0.0, y: 0.0}, area);
            sampler
                .sample(params.spawn_radius(), &bounds)
                .iter()
                .map(|p| Vector3::new(p.x() - area.x / 2.0, 0.0, p.y() - area.y / 2.0))
                .collect()
        }
    };

    let mut trees = Vec::with_capacity(offsets.len());
    for offset in offsets {
        let (title, system) = match selection {
            RulesetSelection::Catalog(title) => (Some(*title), catalog_entry(*title)),
            RulesetSelection::Random => {
                let (title, system) = random_entry(rng);
                (Some(title), system)
            }
            RulesetSelection::Custom(system) => (None, system.clone()),
        };
        trees.push(Tree::grow(&system, title, params, variation, offset)?);
    }

    let forest = Forest::new(trees);
    debug!(
        trees = forest.len(),
        segments = forest.segment_count(),
        ?layout,
        "Placed forest"
    );
    Ok(forest)
}

use geo_types::{coord, LineString, MultiLineString};
use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::errors::GenerationError;
use crate::params::GenerationParams;
use crate::variation::VariationTable;

/// Fixed twist applied by `*` and `/`, before jitter.
pub const TWIST_DEGREES: f64 = 120.0;

/// Helper function to convert degrees to radians
pub fn degrees(deg: f64) -> f64 {
    std::f64::consts::PI * (deg / 180.0)
}

/// Whether a segment ends in foliage or carries more structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Branch,
    Leaf,
}

/// One drawn line of a tree. Width is the same at both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    pub width: f64,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn translated(&self, offset: &Vector3<f64>) -> Segment {
        Segment {
            start: self.start + offset,
            end: self.end + offset,
            ..*self
        }
    }
}

/// Position and orientation; what `[` saves and `]` restores.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurtleState {
    pub position: Point3<f64>,
    pub orientation: UnitQuaternion<f64>,
}

impl Default for TurtleState {
    fn default() -> Self {
        TurtleState {
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
        }
    }
}

/// # Turtle Module
///
/// A 3D turtle that grows along its own local "up" axis. Every move and turn
/// is relative to the turtle's current orientation, which is what fans the
/// branches out instead of stacking them in a plane.
#[derive(Clone, Debug, Default)]
pub struct Turtle {
    stack: Vec<TurtleState>,
    segments: Vec<Segment>,
    state: TurtleState,
}

/// TurtleTrait provides turtle related functions for the Turtle struct.
///
/// # Example
///
/// ```
/// use aoer_arbor_rs::turtle::{Turtle, TurtleTrait, SegmentKind, degrees};
/// let segments = Turtle::new()
///     .fwd(4.0, 1.0, SegmentKind::Branch)
///     .push()
///     .lean(degrees(30.0))
///     .fwd(4.0, 1.0, SegmentKind::Leaf)
///     .pop()
///     .unwrap()
///     .fwd(4.0, 1.0, SegmentKind::Branch)
///     .to_segments();
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[2].start, segments[0].end);
/// ```
pub trait TurtleTrait {
    fn new() -> Turtle;
    fn fwd(self, distance: f64, width: f64, kind: SegmentKind) -> Self;
    fn lean(self, angle: f64) -> Self;
    fn twist(self, angle: f64) -> Self;
    fn push(self) -> Self;
    fn pop(self) -> Result<Self, GenerationError>
    where
        Self: Sized;
    fn walk_lpath(
        self,
        lpath: &str,
        params: &GenerationParams,
        variation: &VariationTable,
    ) -> Result<Self, GenerationError>
    where
        Self: Sized;
    fn state(&self) -> TurtleState;
    fn to_segments(self) -> Vec<Segment>;
}

impl TurtleTrait for Turtle {
    fn new() -> Self {
        Turtle {
            stack: vec![],
            segments: vec![],
            state: TurtleState::default(),
        }
    }

    /// Moves `distance` along the local up axis, drawing a segment.
    fn fwd(mut self, distance: f64, width: f64, kind: SegmentKind) -> Self {
        let start = self.state.position;
        let end = start + self.state.orientation * Vector3::new(0.0, distance, 0.0);
        self.segments.push(Segment {
            start,
            end,
            width,
            kind,
        });
        self.state.position = end;
        self
    }

    /// Rotates about the local Z axis, tipping the growth direction sideways.
    fn lean(mut self, angle: f64) -> Self {
        self.state.orientation *= UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle);
        self
    }

    /// Rotates about the local Y axis (the growth direction itself).
    fn twist(mut self, angle: f64) -> Self {
        self.state.orientation *= UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle);
        self
    }

    fn push(mut self) -> Self {
        self.stack.push(self.state);
        self
    }

    /// Restores the last pushed state. Fails with
    /// [`GenerationError::EmptyStack`] if nothing was pushed.
    fn pop(mut self) -> Result<Self, GenerationError> {
        match self.stack.pop() {
            Some(state) => {
                self.state = state;
                Ok(self)
            }
            None => Err(GenerationError::EmptyStack),
        }
    }

    /// Walks an expanded L-system string.
    ///
    /// * `F` draws `2 * length` forward, as a leaf if the next symbol (wrapping
    ///   to the start) is `X`.
    /// * `+` / `-` lean by `-angle` / `+angle`, `*` / `/` twist by `+120°` /
    ///   `-120°`, each scaled by the jitter for that symbol's index.
    /// * `[` / `]` push / pop. An unmatched `]` aborts the walk.
    /// * `X` and anything else are skipped.
    fn walk_lpath(
        mut self,
        lpath: &str,
        params: &GenerationParams,
        variation: &VariationTable,
    ) -> Result<Self, GenerationError> {
        let symbols: Vec<char> = lpath.chars().collect();
        let distance = 2.0 * params.length();
        for (i, &c) in symbols.iter().enumerate() {
            let jitter = variation.jitter(i, params.variance());
            self = match c {
                'F' => {
                    let kind = if symbols[(i + 1) % symbols.len()] == 'X' {
                        SegmentKind::Leaf
                    } else {
                        SegmentKind::Branch
                    };
                    self.fwd(distance, params.width(), kind)
                }
                '+' => self.lean(-degrees(params.angle() * jitter)),
                '-' => self.lean(degrees(params.angle() * jitter)),
                '*' => self.twist(degrees(TWIST_DEGREES * jitter)),
                '/' => self.twist(-degrees(TWIST_DEGREES * jitter)),
                '[' => self.push(),
                ']' => self.pop().map_err(|err| match err {
                    GenerationError::EmptyStack => GenerationError::PoppedEmptyStack { index: i },
                    other => other,
                })?,
                _ => self,
            }
        }
        Ok(self)
    }

    fn state(&self) -> TurtleState {
        self.state
    }

    fn to_segments(self) -> Vec<Segment> {
        self.segments
    }
}

/// Runs one interpretation pass over `command` from a fresh turtle. Either the
/// whole segment list comes back or an error does; nothing partial.
pub fn interpret(
    command: &str,
    params: &GenerationParams,
    variation: &VariationTable,
) -> Result<Vec<Segment>, GenerationError> {
    Ok(Turtle::new()
        .walk_lpath(command, params, variation)?
        .to_segments())
}

/// Front view (x, y) of a run of segments, one two-point line per segment.
pub fn segments_to_multiline(segments: &[Segment]) -> MultiLineString<f64> {
    segments
        .iter()
        .map(|segment| {
            LineString::new(vec![
                coord! {x: segment.start.x, y: segment.start.y},
                coord! {x: segment.end.x, y: segment.end.y},
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::l_system::{catalog_entry, CATALOG_SIZE};
    use crate::variation::VARIATION_TABLE_LEN;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn approx(a: &Point3<f64>, b: &Point3<f64>) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn test_single_forward() {
        let segments = interpret("F", &GenerationParams::default(), &VariationTable::default())
            .unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(segments[0].end, Point3::new(0.0, 4.0, 0.0));
        assert_eq!(segments[0].width, 1.0);
        assert_eq!(segments[0].kind, SegmentKind::Branch);
    }

    #[test]
    fn test_pop_restores_exactly() {
        let mut rng = SmallRng::seed_from_u64(5);
        let table = VariationTable::sampled(&mut rng);
        let segments = interpret("F[+F]F", &GenerationParams::default(), &table).unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].start, segments[0].end);
        assert_ne!(segments[1].end, segments[2].end);
    }

    #[test]
    fn test_leaf_classification() {
        let segments = interpret("FXF[FX]", &GenerationParams::default(), &VariationTable::default())
            .unwrap();
        let kinds: Vec<SegmentKind> = segments.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SegmentKind::Leaf, SegmentKind::Branch, SegmentKind::Leaf]
        );
        // Wraps around to the first symbol.
        let segments = interpret("XF", &GenerationParams::default(), &VariationTable::default())
            .unwrap();
        assert_eq!(segments[0].kind, SegmentKind::Leaf);
    }

    #[test]
    fn test_lean_directions_are_opposite() {
        let params = GenerationParams::default();
        let table = VariationTable::default();
        let plus = interpret("+F", &params, &table).unwrap();
        let minus = interpret("-F", &params, &table).unwrap();
        let s = 4.0 * degrees(30.0).sin();
        let c = 4.0 * degrees(30.0).cos();
        assert!(approx(&plus[0].end, &Point3::new(s, c, 0.0)));
        assert!(approx(&minus[0].end, &Point3::new(-s, c, 0.0)));
    }

    #[test]
    fn test_rotations_are_local() {
        let params = GenerationParams::default();
        let table = VariationTable::default();
        // Twisting about the growth axis doesn't move a straight stem...
        let twisted = interpret("*F", &params, &table).unwrap();
        assert!(approx(&twisted[0].end, &Point3::new(0.0, 4.0, 0.0)));
        // ...but it swings the next lean out of the XY plane.
        let fanned = interpret("*+F", &params, &table).unwrap();
        assert!(fanned[0].end.z.abs() > 1e-6);
        let back = interpret("/+F", &params, &table).unwrap();
        assert!((fanned[0].end.z + back[0].end.z).abs() < 1e-9);
    }

    #[test]
    fn test_jitter_uses_command_index() {
        let mut values = [0.0; VARIATION_TABLE_LEN];
        values[1] = 1.0;
        let table = VariationTable::from_values(values);
        let mut params = GenerationParams::default();
        params.set_angle(30.0).set_variance(100.0);
        // Index 0 has no jitter: plain 30 degrees.
        let first = interpret("+F", &params, &table).unwrap();
        assert!(approx(
            &first[0].end,
            &Point3::new(4.0 * degrees(30.0).sin(), 4.0 * degrees(30.0).cos(), 0.0)
        ));
        // Index 1 doubles the angle: 60 degrees.
        let second = interpret("X+F", &params, &table).unwrap();
        assert!(approx(
            &second[0].end,
            &Point3::new(4.0 * degrees(60.0).sin(), 4.0 * degrees(60.0).cos(), 0.0)
        ));
    }

    #[test]
    fn test_zero_and_negative_dimensions() {
        let mut params = GenerationParams::default();
        params.set_length(0.0).set_width(-1.0);
        let segments = interpret("FF", &params, &VariationTable::default()).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start, segments[0].end);
        assert_eq!(segments[1].width, -1.0);

        params.set_length(-1.0);
        let segments = interpret("F", &params, &VariationTable::default()).unwrap();
        assert_eq!(segments[0].end, Point3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn test_unmatched_pop_fails() {
        let result = interpret("F]F", &GenerationParams::default(), &VariationTable::default());
        assert_eq!(result, Err(GenerationError::PoppedEmptyStack { index: 1 }));
        assert_eq!(Turtle::new().pop().err(), Some(GenerationError::EmptyStack));
    }

    #[test]
    fn test_segment_count_matches_forward_symbols() {
        let params = GenerationParams::default();
        let mut rng = SmallRng::seed_from_u64(99);
        let table = VariationTable::sampled(&mut rng);
        for title in 1..=CATALOG_SIZE {
            let expanded = catalog_entry(title).expand(4);
            let segments = interpret(&expanded, &params, &table).unwrap();
            assert_eq!(segments.len(), expanded.matches('F').count());
        }
    }

    #[test]
    fn test_interpret_is_deterministic() {
        let params = GenerationParams::default();
        let mut rng = SmallRng::seed_from_u64(17);
        let table = VariationTable::sampled(&mut rng);
        let expanded = catalog_entry(8).expand(3);
        let a = interpret(&expanded, &params, &table).unwrap();
        let b = interpret(&expanded, &params, &table).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stack() {
        let t = Turtle::new()
            .push()
            .fwd(100.0, 1.0, SegmentKind::Branch)
            .lean(degrees(90.0))
            .fwd(100.0, 1.0, SegmentKind::Branch)
            .pop()
            .unwrap();
        assert_eq!(t.state(), TurtleState::default());
        assert_eq!(t.to_segments().len(), 2);
    }

    #[test]
    fn test_empty_command() {
        let segments = interpret("", &GenerationParams::default(), &VariationTable::default())
            .unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn test_multiline_projection() {
        let segments = interpret("FF", &GenerationParams::default(), &VariationTable::default())
            .unwrap();
        let mls = segments_to_multiline(&segments);
        assert_eq!(mls.0.len(), 2);
        assert_eq!(mls.0[1].0[1], coord! {x: 0.0, y: 8.0});
    }
}

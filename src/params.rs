//! Generation parameters and the editing surface around them: clamping setters,
//! the +/- step buttons, and text entry that falls back to the previous value
//! when the input does not parse.

use geo_types::{coord, Coord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ParamError;
use crate::l_system::catalog::clamp_title;
use crate::l_system::MAX_ITERATIONS;

pub const MIN_SPAWN_RADIUS: f64 = 0.1;
pub const MIN_SPAWN_AREA: f64 = 1.0;

/// Every editable value, for text entry and display.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    Title,
    Iterations,
    Angle,
    Length,
    Width,
    Variance,
    SpawnRadius,
    SpawnAreaX,
    SpawnAreaY,
}

/// Flat value object. The bounded fields (title, iterations, spawn radius and
/// area) are clamped on every write; length, width, angle and variance are
/// taken as given, negative values included.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenerationParams {
    title: usize,
    iterations: u32,
    angle: f64,
    length: f64,
    width: f64,
    variance: f64,
    spawn_radius: f64,
    spawn_area: Coord<f64>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            title: 1,
            iterations: 4,
            angle: 30.0,
            length: 2.0,
            width: 1.0,
            variance: 10.0,
            spawn_radius: 5.0,
            spawn_area: coord! {x: 20.0, y: 20.0},
        }
    }
}

impl GenerationParams {
    pub fn title(&self) -> usize {
        self.title
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Branch angle in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Jitter magnitude, in percent.
    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn spawn_radius(&self) -> f64 {
        self.spawn_radius
    }

    pub fn spawn_area(&self) -> Coord<f64> {
        self.spawn_area
    }

    pub fn set_title(&mut self, title: i64) -> &mut Self {
        self.title = clamp_title(title);
        self
    }

    pub fn set_iterations(&mut self, iterations: i64) -> &mut Self {
        self.iterations = iterations.clamp(1, MAX_ITERATIONS as i64) as u32;
        self
    }

    pub fn set_angle(&mut self, angle: f64) -> &mut Self {
        if angle.is_finite() {
            self.angle = angle;
        }
        self
    }

    pub fn set_length(&mut self, length: f64) -> &mut Self {
        if length.is_finite() {
            self.length = length;
        }
        self
    }

    pub fn set_width(&mut self, width: f64) -> &mut Self {
        if width.is_finite() {
            self.width = width;
        }
        self
    }

    pub fn set_variance(&mut self, variance: f64) -> &mut Self {
        if variance.is_finite() {
            self.variance = variance;
        }
        self
    }

    pub fn set_spawn_radius(&mut self, radius: f64) -> &mut Self {
        if radius.is_finite() {
            self.spawn_radius = radius.max(MIN_SPAWN_RADIUS);
        }
        self
    }

    pub fn set_spawn_area(&mut self, x: f64, y: f64) -> &mut Self {
        if x.is_finite() && y.is_finite() {
            self.spawn_area = coord! {x: x.max(MIN_SPAWN_AREA), y: y.max(MIN_SPAWN_AREA)};
        }
        self
    }

    /// Puts the tree shape values back to their defaults. Title and the spawn
    /// settings are left alone.
    pub fn reset_tree_values(&mut self) {
        let defaults = GenerationParams::default();
        self.iterations = defaults.iterations;
        self.angle = defaults.angle;
        self.width = defaults.width;
        self.length = defaults.length;
        self.variance = defaults.variance;
    }

    /// Re-applies every clamp. Used after deserializing, which bypasses the
    /// setters. Non-finite values fall back to the defaults.
    pub fn clamped(self) -> Self {
        let mut params = GenerationParams::default();
        params
            .set_title(self.title as i64)
            .set_iterations(self.iterations as i64)
            .set_angle(self.angle)
            .set_length(self.length)
            .set_width(self.width)
            .set_variance(self.variance)
            .set_spawn_radius(self.spawn_radius)
            .set_spawn_area(self.spawn_area.x, self.spawn_area.y);
        params
    }

    /// One click of the "up" button for `field`.
    pub fn step_up(&mut self, field: ParamField) {
        match field {
            ParamField::Title => {
                self.set_title(self.title as i64 + 1);
            }
            ParamField::Iterations => {
                self.set_iterations(self.iterations as i64 + 1);
            }
            ParamField::Angle => self.angle += 1.0,
            ParamField::Length => self.length += 0.1,
            ParamField::Width => self.width += 0.1,
            ParamField::Variance => self.variance += 1.0,
            ParamField::SpawnRadius => self.spawn_radius += 0.1,
            ParamField::SpawnAreaX => self.spawn_area.x += 1.0,
            ParamField::SpawnAreaY => self.spawn_area.y += 1.0,
        }
    }

    /// One click of the "down" button for `field`. Length, width and variance
    /// only step down while positive, spawn settings only while above their
    /// floors. A single step can still land slightly below zero.
    pub fn step_down(&mut self, field: ParamField) {
        match field {
            ParamField::Title => {
                self.set_title(self.title as i64 - 1);
            }
            ParamField::Iterations => {
                self.set_iterations(self.iterations as i64 - 1);
            }
            ParamField::Angle => self.angle -= 1.0,
            ParamField::Length => {
                if self.length > 0.0 {
                    self.length -= 0.1
                }
            }
            ParamField::Width => {
                if self.width > 0.0 {
                    self.width -= 0.1
                }
            }
            ParamField::Variance => {
                if self.variance > 0.0 {
                    self.variance -= 1.0
                }
            }
            ParamField::SpawnRadius => {
                if self.spawn_radius > MIN_SPAWN_RADIUS {
                    self.spawn_radius -= 0.1
                }
            }
            ParamField::SpawnAreaX => {
                if self.spawn_area.x > MIN_SPAWN_AREA {
                    self.spawn_area.x -= 1.0
                }
            }
            ParamField::SpawnAreaY => {
                if self.spawn_area.y > MIN_SPAWN_AREA {
                    self.spawn_area.y -= 1.0
                }
            }
        }
    }

    /// Applies text typed into the field for `field`. Title, iterations, angle
    /// and variance take integers; the rest take finite decimals. On a parse failure
    /// nothing changes and the error says what was rejected; callers are
    /// expected to drop it and re-display [`GenerationParams::display`].
    pub fn apply_text(&mut self, field: ParamField, input: &str) -> Result<(), ParamError> {
        let reject = || {
            debug!(?field, input, "Discarding unparseable parameter input");
            ParamError::Parse {
                field,
                input: input.to_string(),
            }
        };
        let text = input.trim();
        match field {
            ParamField::Title | ParamField::Iterations | ParamField::Angle | ParamField::Variance => {
                let value: i64 = text.parse().map_err(|_| reject())?;
                match field {
                    ParamField::Title => {
                        self.set_title(value);
                    }
                    ParamField::Iterations => {
                        self.set_iterations(value);
                    }
                    ParamField::Angle => {
                        self.set_angle(value as f64);
                    }
                    _ => {
                        self.set_variance(value as f64);
                    }
                }
            }
            _ => {
                let value: f64 = text
                    .parse()
                    .ok()
                    .filter(|value: &f64| value.is_finite())
                    .ok_or_else(reject)?;
                match field {
                    ParamField::Length => {
                        self.set_length(value);
                    }
                    ParamField::Width => {
                        self.set_width(value);
                    }
                    ParamField::SpawnRadius => {
                        self.set_spawn_radius(value);
                    }
                    ParamField::SpawnAreaX => {
                        self.set_spawn_area(value, self.spawn_area.y);
                    }
                    _ => {
                        self.set_spawn_area(self.spawn_area.x, value);
                    }
                }
            }
        }
        Ok(())
    }

    /// Text shown in the field for `field`.
    pub fn display(&self, field: ParamField) -> String {
        match field {
            ParamField::Title => self.title.to_string(),
            ParamField::Iterations => self.iterations.to_string(),
            ParamField::Angle => format!("{}°", self.angle),
            ParamField::Length => format!("{:.1}", self.length),
            ParamField::Width => format!("{:.1}", self.width),
            ParamField::Variance => format!("{}%", self.variance),
            ParamField::SpawnRadius => format!("{:.1}", self.spawn_radius),
            ParamField::SpawnAreaX => format!("{:.1}", self.spawn_area.x),
            ParamField::SpawnAreaY => format!("{:.1}", self.spawn_area.y),
        }
    }
}

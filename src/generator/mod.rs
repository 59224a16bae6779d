//! Provides the [`crate::generator::Generator`], the session object that owns
//! the parameters, the jitter table and the current forest, and decides when
//! the forest has to be rebuilt.
//!
//! Four things cause a rebuild:
//!
//! * [`Generator::regenerate`]: new jitter, new forest.
//! * [`Generator::reset`]: default tree values, then the same as regenerate.
//! * A title change, seen by [`Generator::tick`] or made through
//!   [`Generator::select_ruleset`]: new forest with the same jitter.
//! * Drift in iterations, angle, width or length, seen by
//!   [`Generator::tick`]: new forest with the same jitter.
//!
//! A rebuild that fails leaves the previous forest in place.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::errors::GenerationError;
use crate::forest::{place_forest, Forest, Layout, RulesetSelection};
use crate::l_system::LSystem;
use crate::params::GenerationParams;
use crate::point_field::{PoissonPointField, PointSampler};
use crate::variation::VariationTable;

pub mod config;
pub mod fade;

pub use config::GeneratorConfig;
pub use fade::{WarningFade, WarningState};

/// Iteration counts from here up grow slowly enough to warrant a warning.
pub const WARN_ITERATIONS: u32 = 6;

/// Sampler seeds are derived from the session seed so the two streams differ.
const SAMPLER_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// # Generator
///
/// # Example
///
/// ```rust
/// use aoer_arbor_rs::generator::{Generator, GeneratorConfig};
///
/// let config = GeneratorConfig {
///     multi_tree: false,
///     seed: Some(1),
///     ..GeneratorConfig::default()
/// };
/// let mut generator = Generator::new(config).unwrap();
/// assert_eq!(generator.forest().len(), 1);
///
/// generator.params_mut().set_angle(45.0);
/// assert!(generator.tick(1.0 / 60.0).unwrap());
/// ```
#[derive(Debug)]
pub struct Generator<S: PointSampler = PoissonPointField> {
    params: GenerationParams,
    observed: GenerationParams,
    variation: VariationTable,
    layout: Layout,
    custom: Option<LSystem>,
    sampler: S,
    rng: SmallRng,
    forest: Forest,
    warning: WarningFade,
}

impl Generator<PoissonPointField> {
    /// Builds a session with the Poisson sampler and grows the first forest.
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerationError> {
        let sampler = PoissonPointField::new(
            config.seed.map(|seed| seed ^ SAMPLER_SEED_SALT),
            config.max_attempts,
        );
        Generator::with_sampler(config, sampler)
    }
}

impl<S: PointSampler> Generator<S> {
    /// Builds a session around any sampler and grows the first forest.
    pub fn with_sampler(config: GeneratorConfig, sampler: S) -> Result<Self, GenerationError> {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let variation = VariationTable::sampled(&mut rng);
        let layout = if config.multi_tree {
            Layout::Scattered
        } else {
            Layout::Single
        };
        let mut generator = Generator {
            observed: config.params.clone(),
            params: config.params,
            variation,
            layout,
            custom: None,
            sampler,
            rng,
            forest: Forest::default(),
            warning: WarningFade::default(),
        };
        generator.rebuild()?;
        Ok(generator)
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Edits made here are picked up by the next [`Generator::tick`].
    pub fn params_mut(&mut self) -> &mut GenerationParams {
        &mut self.params
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn variation(&self) -> &VariationTable {
        &self.variation
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Takes effect on the next rebuild.
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    /// Grows single trees from `system` instead of the selected catalog entry.
    /// Scattered forests keep drawing random catalog entries. Takes effect on
    /// the next rebuild.
    pub fn set_custom_ruleset(&mut self, system: Option<LSystem>) {
        self.custom = system;
    }

    pub fn warning(&self) -> WarningState {
        self.warning.state()
    }

    /// Resamples the jitter table and rebuilds.
    pub fn regenerate(&mut self) -> Result<(), GenerationError> {
        info!("Regenerating with fresh variation");
        self.variation.resample(&mut self.rng);
        self.rebuild()
    }

    /// Restores default iterations, angle, width, length and variance, then
    /// regenerates. The change to those values is absorbed here, so the next
    /// tick does not rebuild a second time.
    pub fn reset(&mut self) -> Result<(), GenerationError> {
        info!("Resetting tree values");
        self.params.reset_tree_values();
        self.observe_iterations();
        self.observed = self.params.clone();
        self.regenerate()
    }

    /// Switches to catalog entry `title` (clamped) and rebuilds straight away,
    /// keeping the jitter table.
    pub fn select_ruleset(&mut self, title: i64) -> Result<(), GenerationError> {
        self.params.set_title(title);
        self.observed.set_title(self.params.title() as i64);
        debug!(title = self.params.title(), "Ruleset selected");
        self.rebuild()
    }

    /// Once-per-frame check. Advances the warning fade by `dt` seconds, then
    /// compares the parameters with what was seen last tick and rebuilds if the
    /// title or any of iterations, angle, width and length moved. Returns
    /// whether a rebuild happened.
    pub fn tick(&mut self, dt: f64) -> Result<bool, GenerationError> {
        self.warning.advance(dt);

        let title_changed = self.params.title() != self.observed.title();
        let drifted = self.params.iterations() != self.observed.iterations()
            || moved(self.params.angle(), self.observed.angle())
            || moved(self.params.width(), self.observed.width())
            || moved(self.params.length(), self.observed.length());

        self.observe_iterations();
        self.observed = self.params.clone();

        if title_changed {
            debug!(title = self.params.title(), "Title changed");
        }
        if drifted {
            debug!("Tree parameters drifted");
        }
        if title_changed || drifted {
            self.rebuild()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Starts or clears the warning when iterations moved since last observed.
    fn observe_iterations(&mut self) {
        if self.params.iterations() == self.observed.iterations() {
            return;
        }
        if self.params.iterations() >= WARN_ITERATIONS {
            self.warning.start();
        } else {
            self.warning.clear();
        }
    }

    fn selection(&self) -> RulesetSelection {
        match (self.layout, &self.custom) {
            (Layout::Scattered, _) => RulesetSelection::Random,
            (Layout::Single, Some(system)) => RulesetSelection::Custom(system.clone()),
            (Layout::Single, None) => RulesetSelection::Catalog(self.params.title()),
        }
    }

    fn rebuild(&mut self) -> Result<(), GenerationError> {
        let selection = self.selection();
        match place_forest(
            &self.params,
            &self.variation,
            self.layout,
            &selection,
            &mut self.sampler,
            &mut self.rng,
        ) {
            Ok(forest) => {
                debug!(trees = forest.len(), "Forest rebuilt");
                self.forest = forest;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Generation failed, keeping the previous forest");
                Err(err)
            }
        }
    }
}

/// Bitwise comparison, so a value that was not touched never counts as moved.
fn moved(current: f64, observed: f64) -> bool {
    current.to_bits() != observed.to_bits()
}

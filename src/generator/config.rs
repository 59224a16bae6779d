use std::io::Read;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::params::GenerationParams;
use crate::point_field::DEFAULT_MAX_ATTEMPTS;

/// Everything a [`crate::generator::Generator`] starts from. Stored as RON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub params: GenerationParams,
    /// Scatter a forest over the spawn area instead of growing one tree.
    pub multi_tree: bool,
    /// Fixes every random draw (jitter, ruleset picks, placement) when set.
    pub seed: Option<u64>,
    /// Candidate attempts per active point in the placement sampler.
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            params: GenerationParams::default(),
            multi_tree: true,
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GeneratorConfig {
    pub fn from_ron_str(data: &str) -> Result<GeneratorConfig> {
        let config: GeneratorConfig = ron::from_str(data)?;
        Ok(config.clamped())
    }

    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::to_string(self)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<GeneratorConfig> {
        let mut reader = std::fs::File::open(path)?;
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        GeneratorConfig::from_ron_str(&data)
    }

    /// Writes through a temporary file and renames it into place.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension(format!("tmp-{}", rand::random::<usize>()));
        let written = std::fs::File::create(&tmp_path)
            .map_err(anyhow::Error::from)
            .and_then(|writer| Ok(ron::Options::default().to_io_writer(writer, &self)?))
            .and_then(|_| Ok(std::fs::rename(&tmp_path, path)?));
        if written.is_err() {
            let _ = std::fs::remove_file(&tmp_path);
        }
        written
    }

    fn clamped(mut self) -> Self {
        self.params = self.params.clamped();
        self.max_attempts = self.max_attempts.max(1);
        self
    }
}

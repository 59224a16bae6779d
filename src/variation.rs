//! Precomputed rotation jitter. The table is only ever rewritten by
//! [`VariationTable::resample`], so repeated interpretation passes over the same
//! command string stay visually identical until someone explicitly asks for a
//! new look.

use rand::Rng;

pub const VARIATION_TABLE_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct VariationTable {
    values: [f64; VARIATION_TABLE_LEN],
}

impl Default for VariationTable {
    /// All zeros: no jitter at all.
    fn default() -> Self {
        Self {
            values: [0.0; VARIATION_TABLE_LEN],
        }
    }
}

impl VariationTable {
    /// A freshly sampled table.
    pub fn sampled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut table = Self::default();
        table.resample(rng);
        table
    }

    /// Builds a table from explicit coefficients. Handy for reproducing a
    /// particular look, or in tests.
    pub fn from_values(values: [f64; VARIATION_TABLE_LEN]) -> Self {
        Self { values }
    }

    /// Overwrites every entry with an independent uniform draw from [-1, 1].
    pub fn resample<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for value in self.values.iter_mut() {
            *value = rng.gen_range(-1.0..=1.0);
        }
    }

    /// Coefficient for command index `index`, wrapping cyclically.
    pub fn get(&self, index: usize) -> f64 {
        self.values[index % VARIATION_TABLE_LEN]
    }

    /// `1 + variance% * coefficient`: the factor applied to a base rotation at
    /// command index `index`.
    pub fn jitter(&self, index: usize, variance: f64) -> f64 {
        1.0 + variance / 100.0 * self.get(index)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_sampled_range() {
        let mut rng = SmallRng::seed_from_u64(3);
        let table = VariationTable::sampled(&mut rng);
        assert!(table.values().iter().all(|v| (-1.0..=1.0).contains(v)));
        assert!(table.values().iter().any(|v| *v != 0.0));
    }

    #[test]
    fn test_resample_changes_table() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut table = VariationTable::sampled(&mut rng);
        let before = table.clone();
        table.resample(&mut rng);
        assert_ne!(before, table);
    }

    #[test]
    fn test_cyclic_index() {
        let mut values = [0.0; VARIATION_TABLE_LEN];
        values[3] = 0.5;
        let table = VariationTable::from_values(values);
        assert_eq!(table.get(3), 0.5);
        assert_eq!(table.get(103), 0.5);
        assert_eq!(table.get(VARIATION_TABLE_LEN * 7 + 3), 0.5);
    }

    #[test]
    fn test_jitter() {
        let mut values = [0.0; VARIATION_TABLE_LEN];
        values[1] = -1.0;
        values[2] = 1.0;
        let table = VariationTable::from_values(values);
        assert_eq!(table.jitter(0, 10.0), 1.0);
        assert!((table.jitter(1, 10.0) - 0.9).abs() < 1e-12);
        assert!((table.jitter(2, 10.0) - 1.1).abs() < 1e-12);
        assert!((table.jitter(2, 0.0) - 1.0).abs() < 1e-12);
    }
}

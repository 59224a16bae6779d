//! The eight stock tree grammars. Every entry grows from the axiom `X`, doubles
//! its `F` runs each round, and differs only in how `X` branches.

use rand::Rng;

use super::{LSystem, Ruleset};

pub const CATALOG_SIZE: usize = 8;

const AXIOM: &str = "X";

const X_RULES: [&str; CATALOG_SIZE] = [
    "[F-[X+X]+F[+FX]-X]",
    "[-FX][+FX][FX]",
    "[-FX]X[+FX][+F-FX]",
    "[FF[+XF-F+FX]--F+F-FX]",
    "[FX[+F[-FX]FX][-F-FXFX]]",
    "[F[+FX][*+FX][/+FX]]",
    "[*+FX]X[+FX][/+F-FX]",
    "[F[-X+F[+FX]][*-X+F[+FX]][/-X+F[+FX]-X]]",
];

/// Clamps a 1-based catalog index into `1..=CATALOG_SIZE`.
pub fn clamp_title(title: i64) -> usize {
    title.clamp(1, CATALOG_SIZE as i64) as usize
}

/// Catalog entry `title` (1-based). Out of range indices are clamped.
pub fn catalog_entry(title: usize) -> LSystem {
    let title = clamp_title(title as i64);
    LSystem {
        axiom: AXIOM.to_string(),
        rules: Ruleset::new([('X', X_RULES[title - 1]), ('F', "FF")]),
    }
}

/// Uniformly picks a catalog entry, returning its 1-based index alongside it.
pub fn random_entry<R: Rng + ?Sized>(rng: &mut R) -> (usize, LSystem) {
    let title = rng.gen_range(1..=CATALOG_SIZE);
    (title, catalog_entry(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::l_system::MAX_ITERATIONS;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn bracket_balanced(expanded: &str) -> bool {
        let mut depth: i64 = 0;
        for c in expanded.chars() {
            match c {
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }

    #[test]
    fn test_catalog_is_balanced() {
        for title in 1..=CATALOG_SIZE {
            let system = catalog_entry(title);
            for n in 1..=MAX_ITERATIONS {
                assert!(
                    bracket_balanced(&system.expand(n)),
                    "catalog entry {} unbalanced at {} iterations",
                    title,
                    n
                );
            }
        }
    }

    #[test]
    fn test_catalog_expansion_is_deterministic() {
        for title in 1..=CATALOG_SIZE {
            let system = catalog_entry(title);
            for n in 1..=5 {
                assert_eq!(system.expand(n), catalog_entry(title).expand(n));
            }
        }
    }

    #[test]
    fn test_title_clamping() {
        assert_eq!(clamp_title(0), 1);
        assert_eq!(clamp_title(-4), 1);
        assert_eq!(clamp_title(9), 8);
        assert_eq!(catalog_entry(0), catalog_entry(1));
        assert_eq!(catalog_entry(42), catalog_entry(8));
    }

    #[test]
    fn test_entries_are_distinct() {
        for a in 1..=CATALOG_SIZE {
            for b in (a + 1)..=CATALOG_SIZE {
                assert_ne!(catalog_entry(a), catalog_entry(b));
            }
        }
    }

    #[test]
    fn test_random_entry_covers_catalog() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = [false; CATALOG_SIZE];
        for _ in 0..500 {
            let (title, system) = random_entry(&mut rng);
            assert_eq!(system, catalog_entry(title));
            seen[title - 1] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}

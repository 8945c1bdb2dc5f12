use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::errors::EngineError;
use crate::pmf::Pmf;

/// Smallest die this crate models.
pub const MIN_SIDES: u32 = 2;

/// Probability mass function of one fair die.
///
/// Index `i` is the face valued `i + 1`; every entry equals `1 / sides`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when `sides < 2`.
///
/// # Examples
///
/// ```
/// use stagedice_engine::dice::uniform_die;
///
/// let d6 = uniform_die(6).unwrap();
/// assert_eq!(d6.len(), 6);
/// assert!(d6.iter().all(|p| (p - 1.0 / 6.0).abs() < 1e-15));
/// ```
pub fn uniform_die(sides: u32) -> Result<Pmf, EngineError> {
    if sides < MIN_SIDES {
        return Err(EngineError::invalid(format!(
            "sides must be >= {}, got {}",
            MIN_SIDES, sides
        )));
    }
    Ok(Pmf::uniform(sides))
}

/// Seeded fair-die roller; the same seed reproduces the same rolls.
#[derive(Debug)]
pub struct DiceRoller {
    sides: u32,
    rng: ChaCha20Rng,
}

impl DiceRoller {
    pub fn new_with_seed(sides: u32, seed: u64) -> Result<Self, EngineError> {
        if sides < MIN_SIDES {
            return Err(EngineError::invalid(format!(
                "sides must be >= {}, got {}",
                MIN_SIDES, sides
            )));
        }
        Ok(Self {
            sides,
            rng: ChaCha20Rng::seed_from_u64(seed),
        })
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn roll(&mut self) -> u32 {
        self.rng.random_range(1..=self.sides)
    }

    /// Participant label of the form `P-XXXXXXXXX` (base-36, upper case).
    pub fn participant_id(&mut self) -> String {
        const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
        let tag: String = (0..9)
            .map(|_| ALPHABET[self.rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        format!("P-{}", tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_die_rejects_fewer_than_two_sides() {
        assert!(uniform_die(0).is_err());
        assert!(uniform_die(1).is_err());
        assert!(uniform_die(2).is_ok());
    }

    #[test]
    fn rolls_stay_on_the_faces() {
        let mut roller = DiceRoller::new_with_seed(6, 7).unwrap();
        for _ in 0..1_000 {
            let r = roller.roll();
            assert!((1..=6).contains(&r));
        }
    }

    #[test]
    fn same_seed_same_rolls() {
        let mut a = DiceRoller::new_with_seed(20, 99).unwrap();
        let mut b = DiceRoller::new_with_seed(20, 99).unwrap();
        let ra: Vec<u32> = (0..32).map(|_| a.roll()).collect();
        let rb: Vec<u32> = (0..32).map(|_| b.roll()).collect();
        assert_eq!(ra, rb);
    }

    #[test]
    fn participant_id_shape() {
        let mut roller = DiceRoller::new_with_seed(6, 1).unwrap();
        let id = roller.participant_id();
        assert_eq!(id.len(), 11);
        assert!(id.starts_with("P-"));
        assert!(id[2..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}

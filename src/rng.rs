use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// RandMode controls random generator behaviour. May be predictable for testing or truly random for gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandMode {
    Predictable,
    RandomUniform,
}

pub struct GameRng {
    rng: Box<dyn RngCore>,
    rand_mode: RandMode,
}

impl GameRng {
    pub fn new_uniform() -> GameRng {
        GameRng {
            rng: Box::new(rand::thread_rng()),
            rand_mode: RandMode::RandomUniform,
        }
    }

    pub fn new_predictable(seed: u64) -> GameRng {
        GameRng {
            rng: Box::new(StdRng::seed_from_u64(seed)),
            rand_mode: RandMode::Predictable,
        }
    }

    /// Seeded when a seed is given, uniform otherwise
    pub fn from_seed(seed: Option<u64>) -> GameRng {
        match seed {
            Some(seed) => GameRng::new_predictable(seed),
            None => GameRng::new_uniform(),
        }
    }

    pub fn mode(&self) -> RandMode {
        self.rand_mode
    }

    /// Index in [0..len); len must be non-zero
    pub fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

impl std::fmt::Debug for GameRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameRng")
            .field("rand_mode", &self.rand_mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = GameRng::new_predictable(7);
        let mut b = GameRng::new_predictable(7);
        let xs: Vec<usize> = (0..16).map(|_| a.pick(8)).collect();
        let ys: Vec<usize> = (0..16).map(|_| b.pick(8)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&x| x < 8));
        assert_eq!(a.mode(), RandMode::Predictable);
    }
}

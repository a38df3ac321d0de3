use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Supplier of randomized scalar values.
pub trait ScalarSource {
    /// Default string for a field, traceable to the field it was made for.
    fn default_string(&mut self, hint: &str) -> String;

    /// Uniform integer in `min..=max`.
    fn random_int(&mut self, min: i64, max: i64) -> i64;

    /// Uniform value in `[0, 1)`.
    fn random_unit(&mut self) -> f64;
}

/// [`ScalarSource`] backed by a ChaCha8 generator.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl ScalarSource for RandomSource {
    fn default_string(&mut self, hint: &str) -> String {
        format!("{hint}_{:08x}", self.rng.random::<u32>())
    }

    fn random_int(&mut self, min: i64, max: i64) -> i64 {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.rng.random_range(min..=max)
    }

    fn random_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Current-time provider used by the date rule.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

//! Random matrices.

use rand::Rng;
use rust_decimal::Decimal;

use crate::tensors::matrix::Matrix;

/// Bounds and number kind for [Matrix::random].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RandomSettings {
    min: i32,
    max: i32,
    fractional: bool,
}

impl RandomSettings {
    /// Generate values in `[min, max)`. If `fractional` is set, about half of
    /// the values have two fractional digits.
    pub fn new(min: i32, max: i32, fractional: bool) -> Result<RandomSettings, String> {
        if min >= max {
            return Err(format!(
                "The minimum {} must be smaller than the maximum {}",
                min, max
            ));
        }

        Ok(RandomSettings {
            min,
            max,
            fractional,
        })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    /// The exclusive upper bound.
    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn fractional(&self) -> bool {
        self.fractional
    }

    pub fn with_min(self, min: i32) -> Result<RandomSettings, String> {
        RandomSettings::new(min, self.max, self.fractional)
    }

    pub fn with_max(self, max: i32) -> Result<RandomSettings, String> {
        RandomSettings::new(self.min, max, self.fractional)
    }

    pub fn with_fractional(mut self, fractional: bool) -> RandomSettings {
        self.fractional = fractional;
        self
    }

    fn sample(&self, rng: &mut impl Rng) -> Decimal {
        if self.fractional && rng.gen_bool(0.5) {
            // draw whole hundredths so that no binary float is involved
            let hundredths = rng.gen_range(self.min as i64 * 100..self.max as i64 * 100);
            Decimal::new(hundredths, 2)
        } else {
            Decimal::from(rng.gen_range(self.min..self.max))
        }
    }
}

impl Default for RandomSettings {
    fn default() -> Self {
        RandomSettings {
            min: -100,
            max: 100,
            fractional: false,
        }
    }
}

impl Matrix {
    /// Create a matrix with `nrows` rows and `ncols` columns filled with random values.
    pub fn random(nrows: u32, ncols: u32, settings: &RandomSettings, rng: &mut impl Rng) -> Matrix {
        Matrix {
            data: (0..nrows as usize * ncols as usize)
                .map(|_| settings.sample(rng))
                .collect(),
            nrows,
            ncols,
        }
    }
}

// The formulas in this module follow the `Normal` distribution of the
// [statrs](https://github.com/statrs-dev/statrs) package, whose error
// functions we call directly.

use crate::error::{Error, Result, Violation};
use statrs::function::erf;
use std::f64::consts::{PI, SQRT_2};

/// A Gaussian with a strictly positive standard deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mean: f64,
    std_dev: f64,
}

impl Default for Normal {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
        }
    }
}

impl Normal {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        if !(std_dev > 0.0) || !std_dev.is_finite() {
            return Err(Error::DomainViolation(Violation::NonPositiveDeviation(
                std_dev,
            )));
        }
        Ok(Self { mean, std_dev })
    }

    /// The standard normal distribution, with mean 0 and deviation 1.
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Number of standard deviations between `x` and the mean.
    pub fn standardize(&self, x: f64) -> f64 {
        (x - self.mean) / self.std_dev
    }

    pub fn pdf(&self, x: f64) -> f64 {
        pdf_unchecked(x, self.mean, self.std_dev)
    }

    pub fn cdf(&self, x: f64) -> f64 {
        cdf_unchecked(x, self.mean, self.std_dev)
    }

    /// The value below which a fraction `p` of the mass lies.
    /// Only the open interval (0, 1) is accepted.
    pub fn inverse_cdf(&self, p: f64) -> Result<f64> {
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::DomainViolation(Violation::ProbabilityOutOfRange(
                p,
            )));
        }
        Ok(inverse_cdf_unchecked(p, self.mean, self.std_dev))
    }
}

pub fn pdf_unchecked(x: f64, mean: f64, std_dev: f64) -> f64 {
    let d = (x - mean) / std_dev;
    (-0.5 * d * d).exp() / (std_dev * (2.0 * PI).sqrt())
}

pub fn cdf_unchecked(x: f64, mean: f64, std_dev: f64) -> f64 {
    0.5 * erf::erfc((mean - x) / (std_dev * SQRT_2))
}

pub fn inverse_cdf_unchecked(p: f64, mean: f64, std_dev: f64) -> f64 {
    mean - (std_dev * SQRT_2 * erf::erfc_inv(2.0 * p))
}

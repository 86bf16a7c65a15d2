use crate::error::{Combination, Error, Result, Violation};
use crate::render::PlotSpec;
use crate::stats::Normal;

/// Decimals used when showing a solved score.
pub const SCORE_DECIMALS: i32 = 1;
/// Decimals used when showing a solved cumulative probability.
pub const PROBABILITY_DECIMALS: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionParameters {
    normal: Normal,
}

impl DistributionParameters {
    pub fn new(mean: f64, deviation: f64) -> Result<Self> {
        Ok(Self {
            normal: Normal::new(mean, deviation)?,
        })
    }

    pub fn mean(&self) -> f64 {
        self.normal.mean()
    }

    pub fn deviation(&self) -> f64 {
        self.normal.std_dev()
    }

    pub fn normal(&self) -> &Normal {
        &self.normal
    }
}

/// The two interdependent entries. Exactly one of them must be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QueryState {
    pub score: Option<f64>,
    pub probability: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unknown {
    Score,
    Probability,
}

/// What to compute, decided once from which entries are present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    SolveForScore { probability: f64 },
    SolveForProbability { score: f64 },
    Invalid(Combination),
}

impl Decision {
    pub fn from_query(query: QueryState) -> Self {
        match (query.score, query.probability) {
            (None, Some(probability)) => Self::SolveForScore { probability },
            (Some(score), None) => Self::SolveForProbability { score },
            (None, None) => Self::Invalid(Combination::Underspecified),
            (Some(_), Some(_)) => Self::Invalid(Combination::Overspecified),
        }
    }
}

/// A fully resolved query. Values are kept at full precision, rounding
/// happens only in the `*_text` accessors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    parameters: DistributionParameters,
    score: f64,
    probability: f64,
    solved: Unknown,
}

impl Solution {
    pub fn parameters(&self) -> DistributionParameters {
        self.parameters
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn solved(&self) -> Unknown {
        self.solved
    }

    pub fn z(&self) -> f64 {
        self.parameters.normal().standardize(self.score)
    }

    pub fn score_text(&self) -> String {
        format!("{:.*}", SCORE_DECIMALS as usize, round_to(self.score, SCORE_DECIMALS))
    }

    pub fn probability_text(&self) -> String {
        format!(
            "{:.*}",
            PROBABILITY_DECIMALS as usize,
            round_to(self.probability, PROBABILITY_DECIMALS)
        )
    }

    pub fn plot_spec(&self) -> PlotSpec {
        PlotSpec {
            mean: self.parameters.mean(),
            deviation: self.parameters.deviation(),
            score: self.score,
            probability: self.probability,
        }
    }
}

pub fn solve(parameters: DistributionParameters, query: QueryState) -> Result<Solution> {
    let normal = parameters.normal();
    let solution = match Decision::from_query(query) {
        Decision::SolveForScore { probability } => Solution {
            parameters,
            score: normal.inverse_cdf(probability)?,
            probability,
            solved: Unknown::Score,
        },
        Decision::SolveForProbability { score } => Solution {
            parameters,
            score,
            probability: normal.cdf(score),
            solved: Unknown::Probability,
        },
        Decision::Invalid(combination) => {
            log::warn!("invalid field combination: {:?}", combination);
            return Err(Error::InvalidFieldCombination(combination));
        }
    };
    if !solution.score.is_finite() || !solution.z().is_finite() {
        log::warn!(
            "non-finite result for mean={} deviation={}",
            parameters.mean(),
            parameters.deviation()
        );
        return Err(Error::DomainViolation(Violation::NonFiniteResult));
    }
    log::debug!(
        "solved {:?}: mean={} deviation={} score={} probability={}",
        solution.solved,
        parameters.mean(),
        parameters.deviation(),
        solution.score,
        solution.probability
    );
    Ok(solution)
}

/// Rounds half away from zero to the given number of decimals.
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (x * factor).round() / factor
}

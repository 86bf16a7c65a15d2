use crate::error::{Error, Result};
use crate::solver::{DistributionParameters, QueryState, Solution, Unknown};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Mean,
    Deviation,
    Score,
    Probability,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Mean => "Mean",
            Self::Deviation => "Deviation",
            Self::Score => "Score",
            Self::Probability => "Cumulative probability",
        };
        write!(f, "{}", name)
    }
}

/// The four entries of the form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    pub mean: String,
    pub deviation: String,
    pub score: String,
    pub probability: String,
}

impl Fields {
    pub fn new<S: Into<String>>(mean: S, deviation: S, score: S, probability: S) -> Self {
        Self {
            mean: mean.into(),
            deviation: deviation.into(),
            score: score.into(),
            probability: probability.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Mean => &self.mean,
            Field::Deviation => &self.deviation,
            Field::Score => &self.score,
            Field::Probability => &self.probability,
        }
    }

    /// Parses the form. Mean and deviation are mandatory and are checked
    /// before anything else; the checks on the score/probability pair are
    /// left to the solver.
    pub fn parse(&self) -> Result<(DistributionParameters, QueryState)> {
        for field in [Field::Mean, Field::Deviation] {
            if self.get(field).trim().is_empty() {
                return Err(Error::MissingRequiredField(field));
            }
        }
        let mean = parse_required(Field::Mean, &self.mean)?;
        let deviation = parse_required(Field::Deviation, &self.deviation)?;
        let parameters = DistributionParameters::new(mean, deviation)?;

        let score = parse_field(Field::Score, &self.score)?;
        let probability = parse_field(Field::Probability, &self.probability)?;
        Ok((parameters, QueryState { score, probability }))
    }

    /// A copy of the form with the solved entry filled in, rounded for display.
    pub fn filled_with(&self, solution: &Solution) -> Self {
        let mut filled = self.clone();
        match solution.solved() {
            Unknown::Score => filled.score = solution.score_text(),
            Unknown::Probability => filled.probability = solution.probability_text(),
        }
        filled
    }
}

fn parse_required(field: Field, text: &str) -> Result<f64> {
    parse_field(field, text)?.ok_or(Error::MissingRequiredField(field))
}

/// Blank entries are `None`. Anything else must be a finite decimal number
/// in plain notation, with a period as separator: `1e3` is rejected.
pub fn parse_field(field: Field, text: &str) -> Result<Option<f64>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let plain = !trimmed.contains(|c: char| c == 'e' || c == 'E');
    match fast_float::parse::<f64, _>(trimmed) {
        Ok(x) if plain && x.is_finite() => Ok(Some(x)),
        _ => {
            log::warn!("rejecting {} entry {:?}", field, text);
            Err(Error::InvalidNumber {
                field,
                text: text.to_owned(),
            })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Violation;
    use crate::solver::solve;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field(Field::Mean, "").unwrap(), None);
        assert_eq!(parse_field(Field::Mean, "   ").unwrap(), None);
        assert_eq!(parse_field(Field::Mean, "12.5").unwrap(), Some(12.5));
        assert_eq!(parse_field(Field::Mean, " -3 ").unwrap(), Some(-3.0));
        assert_eq!(parse_field(Field::Mean, ".5").unwrap(), Some(0.5));
        for bad in ["1,5", "abc", "1.2.3", "inf", "NaN", "12 kg", "1e3", "2.5E-1"] {
            assert_eq!(
                parse_field(Field::Score, bad),
                Err(Error::InvalidNumber {
                    field: Field::Score,
                    text: bad.to_owned()
                }),
                "input {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_missing_required() {
        let fields = Fields::new("", "15", "100", "");
        assert_eq!(
            fields.parse().unwrap_err(),
            Error::MissingRequiredField(Field::Mean)
        );
        let fields = Fields::new("100", "", "100", "");
        assert_eq!(
            fields.parse().unwrap_err(),
            Error::MissingRequiredField(Field::Deviation)
        );
    }

    #[test]
    fn test_missing_required_comes_first() {
        assert_eq!(
            Fields::new("", "1", "abc", "").parse().unwrap_err(),
            Error::MissingRequiredField(Field::Mean)
        );
        assert_eq!(
            Fields::new("3", " ", "", "1,5").parse().unwrap_err(),
            Error::MissingRequiredField(Field::Deviation)
        );
        assert_eq!(
            Fields::new("3", "-1", "abc", "").parse().unwrap_err(),
            Error::DomainViolation(Violation::NonPositiveDeviation(-1.0))
        );
        assert_eq!(
            Fields::new("x", "", "", "").parse().unwrap_err(),
            Error::MissingRequiredField(Field::Deviation)
        );
    }

    #[test]
    fn test_zero_deviation() {
        let fields = Fields::new("100", "0", "100", "");
        assert_eq!(
            fields.parse().unwrap_err(),
            Error::DomainViolation(Violation::NonPositiveDeviation(0.0))
        );
    }

    #[test]
    fn test_parse_ok() {
        let (params, query) = Fields::new("500", "100", "650", "").parse().unwrap();
        assert_eq!(params.mean(), 500.0);
        assert_eq!(params.deviation(), 100.0);
        assert_eq!(query.score, Some(650.0));
        assert_eq!(query.probability, None);
    }

    #[test]
    fn test_filled_with() {
        let fields = Fields::new("500", "100", "650", "");
        let (params, query) = fields.parse().unwrap();
        let solution = solve(params, query).unwrap();
        assert_eq!(
            fields.filled_with(&solution),
            Fields::new("500", "100", "650", "0.93319")
        );

        let fields = Fields::new("100", "15", "", "0.5");
        let (params, query) = fields.parse().unwrap();
        let solution = solve(params, query).unwrap();
        assert_eq!(
            fields.filled_with(&solution),
            Fields::new("100", "15", "100.0", "0.5")
        );
    }
}

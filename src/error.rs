use crate::input::Field;
use std::fmt::Display;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combination {
    /// Both the score and the probability are blank.
    Underspecified,
    /// All four fields are filled.
    Overspecified,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Violation {
    NonPositiveDeviation(f64),
    ProbabilityOutOfRange(f64),
    /// The inputs are valid on their own but the result overflows.
    NonFiniteResult,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    MissingRequiredField(Field),
    InvalidFieldCombination(Combination),
    InvalidNumber { field: Field, text: String },
    DomainViolation(Violation),
    Render(String),
    Export { path: PathBuf, reason: String },
}

impl Error {
    /// Short heading to show above the message, e.g. as a dialog title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Render(_) => "Failed to plot",
            Self::Export { .. } => "Failed to save",
            _ => "Wrong input",
        }
    }

    /// Whether the error comes from what the user typed in.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Render(_) | Self::Export { .. })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredField(field) => write!(
                f,
                "Both the mean and deviation entries must be filled ({} is empty).",
                field
            ),
            Self::InvalidFieldCombination(Combination::Underspecified) => write!(
                f,
                "Only one out of 4 values must be left empty: fill in either the score or the cumulative probability."
            ),
            Self::InvalidFieldCombination(Combination::Overspecified) => write!(
                f,
                "Only one out of 4 values must be left empty: clear either the score or the cumulative probability."
            ),
            Self::InvalidNumber { field, text } => {
                write!(f, "{} is not a valid number: {:?}", field, text)
            }
            Self::DomainViolation(Violation::NonPositiveDeviation(d)) => {
                write!(f, "The deviation must be a positive number, got {}.", d)
            }
            Self::DomainViolation(Violation::ProbabilityOutOfRange(p)) => write!(
                f,
                "The cumulative probability must lie strictly between 0 and 1, got {}.",
                p
            ),
            Self::DomainViolation(Violation::NonFiniteResult) => write!(
                f,
                "The result is too large to represent, try a smaller mean or deviation."
            ),
            Self::Render(reason) => write!(f, "Failed to plot the figure: {}", reason),
            Self::Export { path, reason } => {
                write!(f, "Failed to save figure to {:?}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for Error {}

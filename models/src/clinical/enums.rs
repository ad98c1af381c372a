// models/src/clinical/enums.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RepoError;

/// Severity of a diagnosis. Stored in the graph by its label.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = RepoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Severity::High),
            "Medium" => Ok(Severity::Medium),
            "Low" => Ok(Severity::Low),
            other => Err(RepoError::invalid(format!(
                "invalid severity '{}', must be High, Medium or Low",
                other
            ))),
        }
    }
}

/// Administrative sex recorded on a patient.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Other => "Other",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sex {
    type Err = RepoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Sex::Male),
            "Female" => Ok(Sex::Female),
            "Other" => Ok(Sex::Other),
            other => Err(RepoError::invalid(format!(
                "invalid sex '{}', must be Male, Female or Other",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Severity, Sex};
    use std::str::FromStr;

    #[test]
    fn should_round_trip_labels() {
        for severity in [Severity::High, Severity::Medium, Severity::Low] {
            assert_eq!(Severity::from_str(severity.label()).unwrap(), severity);
        }
        for sex in [Sex::Male, Sex::Female, Sex::Other] {
            assert_eq!(Sex::from_str(sex.label()).unwrap(), sex);
        }
    }

    #[test]
    fn should_reject_unknown_labels() {
        assert!(Severity::from_str("Critical").is_err());
        assert!(Sex::from_str("").is_err());
    }
}

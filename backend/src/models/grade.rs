//! Grade scale and enrollment status vocabularies.
//!
//! Both are closed enumerations. Text coming from requests or from stored rows
//! is parsed through `FromStr`, and anything outside the vocabulary lands in
//! the [`UnrecognizedValue`] branch instead of passing through silently.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text that does not belong to a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} '{value}'")]
pub struct UnrecognizedValue {
    pub kind: &'static str,
    pub value: String,
}

/// Letter grade, `A+` down to `F`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "F")]
    F,
}

/// Letter to grade-point lookup, highest first.
pub const GRADE_SCALE: [(Grade, f64); 13] = [
    (Grade::APlus, 4.0),
    (Grade::A, 4.0),
    (Grade::AMinus, 3.7),
    (Grade::BPlus, 3.3),
    (Grade::B, 3.0),
    (Grade::BMinus, 2.7),
    (Grade::CPlus, 2.3),
    (Grade::C, 2.0),
    (Grade::CMinus, 1.7),
    (Grade::DPlus, 1.3),
    (Grade::D, 1.0),
    (Grade::DMinus, 0.7),
    (Grade::F, 0.0),
];

impl Grade {
    /// All grades in scale order.
    pub fn all() -> impl Iterator<Item = Grade> {
        GRADE_SCALE.iter().map(|(grade, _)| *grade)
    }

    /// Grade points on the 4.0 scale.
    pub fn points(self) -> f64 {
        GRADE_SCALE
            .iter()
            .find(|(grade, _)| *grade == self)
            .map(|(_, points)| *points)
            .unwrap_or(0.0)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::DMinus => "D-",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Grade::all()
            .find(|grade| grade.as_str() == trimmed)
            .ok_or_else(|| UnrecognizedValue {
                kind: "grade",
                value: s.to_string(),
            })
    }
}

/// Lifecycle state of an enrollment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    #[default]
    Enrolled,
    Completed,
    Dropped,
}

impl EnrollmentStatus {
    pub const ALL: [EnrollmentStatus; 3] = [
        EnrollmentStatus::Enrolled,
        EnrollmentStatus::Completed,
        EnrollmentStatus::Dropped,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EnrollmentStatus::Enrolled => "enrolled",
            EnrollmentStatus::Completed => "completed",
            EnrollmentStatus::Dropped => "dropped",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enrolled" => Ok(EnrollmentStatus::Enrolled),
            "completed" => Ok(EnrollmentStatus::Completed),
            "dropped" => Ok(EnrollmentStatus::Dropped),
            _ => Err(UnrecognizedValue {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_has_thirteen_grades_in_range() {
        assert_eq!(Grade::all().count(), 13);
        for (_, points) in GRADE_SCALE {
            assert!((0.0..=4.0).contains(&points));
        }
    }

    #[test]
    fn test_points_lookup() {
        assert_eq!(Grade::APlus.points(), 4.0);
        assert_eq!(Grade::A.points(), 4.0);
        assert_eq!(Grade::BMinus.points(), 2.7);
        assert_eq!(Grade::C.points(), 2.0);
        assert_eq!(Grade::F.points(), 0.0);
    }

    #[test]
    fn test_grade_parse_roundtrips_display() {
        for grade in Grade::all() {
            assert_eq!(grade.to_string().parse::<Grade>().unwrap(), grade);
        }
        assert_eq!(" B+ ".parse::<Grade>().unwrap(), Grade::BPlus);
    }

    #[test]
    fn test_grade_rejects_unknown_text() {
        let err = "E".parse::<Grade>().unwrap_err();
        assert_eq!(err.kind, "grade");
        assert_eq!(err.value, "E");
        assert!("a".parse::<Grade>().is_err());
        assert!("".parse::<Grade>().is_err());
    }

    #[test]
    fn test_grade_serde_uses_letters() {
        assert_eq!(serde_json::to_string(&Grade::AMinus).unwrap(), "\"A-\"");
        let parsed: Grade = serde_json::from_str("\"D+\"").unwrap();
        assert_eq!(parsed, Grade::DPlus);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "Completed".parse::<EnrollmentStatus>().unwrap(),
            EnrollmentStatus::Completed
        );
        assert_eq!(EnrollmentStatus::default(), EnrollmentStatus::Enrolled);
        let err = "withdrawn".parse::<EnrollmentStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unrecognized status 'withdrawn'");
    }
}

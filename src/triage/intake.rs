use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const MISSING_INPUT_WARNING: &str =
    "Please enter your symptoms, location, and select your age category.";

pub const MIN_RADIUS_KM: u32 = 1;
pub const MAX_RADIUS_KM: u32 = 20;
pub const DEFAULT_RADIUS_KM: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeCategory {
    #[serde(rename = "Minor (under 18)", alias = "minor")]
    Minor,
    #[serde(rename = "Major (19-35)", alias = "major")]
    Major,
    #[serde(rename = "Senior (36+)", alias = "senior")]
    Senior,
}

impl AgeCategory {
    pub fn label(self) -> &'static str {
        match self {
            AgeCategory::Minor => "Minor (under 18)",
            AgeCategory::Major => "Major (19-35)",
            AgeCategory::Senior => "Senior (36+)",
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    #[default]
    #[serde(rename = "Mild", alias = "mild")]
    Mild,
    #[serde(rename = "Moderate", alias = "moderate")]
    Moderate,
    #[serde(rename = "Severe", alias = "severe")]
    Severe,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn default_radius_km() -> u32 {
    DEFAULT_RADIUS_KM
}

/// Form input as submitted by the browser.
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentRequest {
    #[serde(default)]
    pub symptoms: String,
    pub age_category: Option<AgeCategory>,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_radius_km")]
    pub radius_km: u32,
}

/// Validated input for one assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct Intake {
    pub symptoms: String,
    pub age_category: AgeCategory,
    pub severity: Severity,
    pub location: String,
    pub radius_m: u32,
}

impl AssessmentRequest {
    pub fn validate(self) -> Result<Intake, AppError> {
        let symptoms = self.symptoms.trim();
        let location = self.location.trim();

        let age_category = match self.age_category {
            Some(age) if !symptoms.is_empty() && !location.is_empty() => age,
            _ => return Err(AppError::Validation(MISSING_INPUT_WARNING.to_string())),
        };

        if !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&self.radius_km) {
            return Err(AppError::Validation(format!(
                "Search radius must be between {MIN_RADIUS_KM} and {MAX_RADIUS_KM} km"
            )));
        }

        Ok(Intake {
            symptoms: symptoms.to_string(),
            age_category,
            severity: self.severity,
            location: location.to_string(),
            radius_m: self.radius_km * 1000,
        })
    }
}

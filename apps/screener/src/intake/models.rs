use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields collected by the intake form, in the order they are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeField {
    FullName,
    Email,
    Phone,
    YearsExperience,
    DesiredPosition,
    Location,
    TechStack,
}

impl IntakeField {
    pub const ALL: [IntakeField; 7] = [
        IntakeField::FullName,
        IntakeField::Email,
        IntakeField::Phone,
        IntakeField::YearsExperience,
        IntakeField::DesiredPosition,
        IntakeField::Location,
        IntakeField::TechStack,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IntakeField::FullName => "Full Name",
            IntakeField::Email => "Email Address",
            IntakeField::Phone => "Phone Number",
            IntakeField::YearsExperience => "Years of Experience",
            IntakeField::DesiredPosition => "Desired Position(s)",
            IntakeField::Location => "Current Location",
            IntakeField::TechStack => "Tech Stack",
        }
    }
}

impl fmt::Display for IntakeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw intake submission exactly as typed by the candidate.
///
/// `tech_stack` is the comma-separated free text; it is split during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntakeForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub years_experience: f64,
    pub desired_position: String,
    pub location: String,
    pub tech_stack: String,
}

/// A validated candidate. Only `intake::validation::validate_intake` builds one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub years_experience: f64,
    pub desired_position: String,
    pub location: String,
    pub tech_stack: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl CandidateRecord {
    pub fn has_tech_stack(&self) -> bool {
        !self.tech_stack.is_empty()
    }
}

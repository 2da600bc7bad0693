use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::intake::models::{CandidateRecord, IntakeField, IntakeForm};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please fill all required fields: {}", join_labels(.0))]
    MissingFields(Vec<IntakeField>),

    #[error("Years of experience must be a non-negative multiple of 0.5 (got {0})")]
    InvalidExperience(f64),
}

impl ValidationError {
    #[cfg(test)]
    pub fn fields(&self) -> Vec<IntakeField> {
        match self {
            ValidationError::MissingFields(fields) => fields.clone(),
            ValidationError::InvalidExperience(_) => vec![IntakeField::YearsExperience],
        }
    }
}

fn join_labels(fields: &[IntakeField]) -> String {
    fields
        .iter()
        .map(IntakeField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validates an intake submission and builds the candidate record, stamped now.
pub fn validate_intake(form: &IntakeForm) -> Result<CandidateRecord, ValidationError> {
    validate_intake_at(form, Utc::now())
}

/// Validation with an explicit creation time.
///
/// Required text fields are checked after trimming. The tech stack text only has to be
/// non-blank; the split list itself may still come out empty (e.g. `", ,"`).
pub fn validate_intake_at(
    form: &IntakeForm,
    created_at: DateTime<Utc>,
) -> Result<CandidateRecord, ValidationError> {
    let required = [
        (IntakeField::FullName, &form.full_name),
        (IntakeField::Email, &form.email),
        (IntakeField::Phone, &form.phone),
        (IntakeField::DesiredPosition, &form.desired_position),
        (IntakeField::Location, &form.location),
        (IntakeField::TechStack, &form.tech_stack),
    ];

    let missing: Vec<IntakeField> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    if !is_valid_experience(form.years_experience) {
        return Err(ValidationError::InvalidExperience(form.years_experience));
    }

    Ok(CandidateRecord {
        full_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        years_experience: form.years_experience,
        desired_position: form.desired_position.trim().to_string(),
        location: form.location.trim().to_string(),
        tech_stack: split_tech_stack(&form.tech_stack),
        created_at,
    })
}

/// Splits comma-separated technologies, trimming each and dropping empty tokens.
pub fn split_tech_stack(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

fn is_valid_experience(years: f64) -> bool {
    years.is_finite() && years >= 0.0 && (years * 2.0).fract() == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> IntakeForm {
        IntakeForm {
            full_name: "  Ada Lovelace ".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+44 20 7946 0000".to_string(),
            years_experience: 4.5,
            desired_position: "Backend Engineer".to_string(),
            location: "London".to_string(),
            tech_stack: "Python, Django , ,PostgreSQL,".to_string(),
        }
    }

    #[test]
    fn test_complete_form_builds_trimmed_record() {
        let record = validate_intake(&complete_form()).unwrap();
        assert_eq!(record.full_name, "Ada Lovelace");
        assert_eq!(record.tech_stack, vec!["Python", "Django", "PostgreSQL"]);
        assert_eq!(record.years_experience, 4.5);
    }

    #[test]
    fn test_empty_name_is_missing() {
        let form = IntakeForm {
            full_name: String::new(),
            ..complete_form()
        };
        assert_eq!(
            validate_intake(&form).unwrap_err(),
            ValidationError::MissingFields(vec![IntakeField::FullName])
        );
    }

    #[test]
    fn test_whitespace_only_fields_are_missing_in_form_order() {
        let form = IntakeForm {
            email: "   ".to_string(),
            location: "\t".to_string(),
            tech_stack: " \n ".to_string(),
            ..complete_form()
        };
        let err = validate_intake(&form).unwrap_err();
        assert_eq!(
            err.fields(),
            vec![IntakeField::Email, IntakeField::Location, IntakeField::TechStack]
        );
    }

    #[test]
    fn test_commas_only_tech_stack_passes_with_empty_list() {
        let form = IntakeForm {
            tech_stack: " , ,".to_string(),
            ..complete_form()
        };
        let record = validate_intake(&form).unwrap();
        assert!(record.tech_stack.is_empty());
        assert!(!record.has_tech_stack());
    }

    #[test]
    fn test_zero_experience_is_valid() {
        let form = IntakeForm {
            years_experience: 0.0,
            ..complete_form()
        };
        assert!(validate_intake(&form).is_ok());
    }

    #[test]
    fn test_negative_experience_rejected() {
        let form = IntakeForm {
            years_experience: -1.0,
            ..complete_form()
        };
        assert_eq!(
            validate_intake(&form).unwrap_err(),
            ValidationError::InvalidExperience(-1.0)
        );
    }

    #[test]
    fn test_off_step_experience_rejected() {
        let form = IntakeForm {
            years_experience: 2.25,
            ..complete_form()
        };
        assert!(matches!(
            validate_intake(&form),
            Err(ValidationError::InvalidExperience(_))
        ));
    }

    #[test]
    fn test_missing_fields_reported_before_experience() {
        let form = IntakeForm {
            phone: String::new(),
            years_experience: f64::NAN,
            ..complete_form()
        };
        assert_eq!(
            validate_intake(&form).unwrap_err(),
            ValidationError::MissingFields(vec![IntakeField::Phone])
        );
    }
}

use crate::api::errors::ApiError;
use crate::db::types::Grade;
use crate::services::credentials::GROUPS;

pub(crate) fn validate_group(group: &str) -> Result<(), ApiError> {
    if GROUPS.contains(&group) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Invalid group '{group}', expected 1..10")))
    }
}

/// A section is required for the three section-bearing grades and must come
/// from that grade's list; any other grade must not carry one.
pub(crate) fn validate_section(grade: Grade, section: Option<&str>) -> Result<(), ApiError> {
    match (grade.has_sections(), section) {
        (true, Some(section)) => {
            if grade.sections().contains(&section) {
                Ok(())
            } else {
                Err(ApiError::BadRequest(format!(
                    "Section '{section}' does not exist for {}",
                    grade.label()
                )))
            }
        }
        (true, None) => {
            Err(ApiError::BadRequest(format!("A section is required for {}", grade.label())))
        }
        (false, Some(_)) => {
            Err(ApiError::BadRequest(format!("{} does not carry sections", grade.label())))
        }
        (false, None) => Ok(()),
    }
}

pub(crate) fn validate_classification(
    grade: Grade,
    group: &str,
    section: Option<&str>,
) -> Result<(), ApiError> {
    validate_group(group)?;
    validate_section(grade, section)
}

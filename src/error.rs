// ⚠️ Error types for the roster
//
// Two families:
// - RosterError: soft outcomes of registry operations (unknown ids).
//   The operation is a no-op and the caller carries on.
// - StoreError: hard failures of the persistence codec.

use crate::entities::{StudentId, TeacherId};
use thiserror::Error;

/// Soft failure of a registry operation.
///
/// Returned as a value; the registry state is unchanged whenever one of
/// these comes back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    #[error("Student ID {0} not found")]
    StudentNotFound(StudentId),

    #[error("Teacher ID {0} not found")]
    TeacherNotFound(TeacherId),

    #[error("Class ID {0} not found")]
    ClassroomNotFound(String),

    /// NaN and infinities have no JSON form
    #[error("Grade {grade} in {subject} is not a finite number")]
    InvalidGrade { subject: String, grade: f64 },
}

/// Hard failure while saving or loading a snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document present but structurally invalid
    #[error("Malformed document: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Malformed(e.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_error_messages() {
        assert_eq!(
            RosterError::StudentNotFound(StudentId(7)).to_string(),
            "Student ID 7 not found"
        );
        assert_eq!(
            RosterError::ClassroomNotFound("10A".to_string()).to_string(),
            "Class ID 10A not found"
        );
        assert_eq!(
            RosterError::InvalidGrade {
                subject: "Math".to_string(),
                grade: f64::INFINITY,
            }
            .to_string(),
            "Grade inf in Math is not a finite number"
        );
    }

    #[test]
    fn test_json_error_becomes_malformed() {
        let err: StoreError = serde_json::from_str::<serde_json::Value>("{ nope")
            .unwrap_err()
            .into();
        assert!(matches!(err, StoreError::Malformed(_)));
        assert!(err.to_string().starts_with("Malformed document"));
    }
}

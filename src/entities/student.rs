// 🎒 Student Entity - attendance history + grade history
//
// Identity: StudentId (assigned by the registry, never changes)
// Values: attendance by date, grades by subject (append-only)
//
// Derived statistics (averages, attendance tally) are computed on read,
// never stored.

use super::person::{Member, Person, StudentId};
use crate::error::RosterError;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Numeric grade. Any finite value is accepted, no range check.
pub type Grade = f64;

// ============================================================================
// ATTENDANCE STATUS
// ============================================================================

/// Attendance status for one date.
///
/// Only `Present` counts towards the attendance tally. Unknown strings are
/// kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Other(String),
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Other(s) => s,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, AttendanceStatus::Present)
    }
}

impl From<String> for AttendanceStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Present" => AttendanceStatus::Present,
            "Absent" => AttendanceStatus::Absent,
            _ => AttendanceStatus::Other(s),
        }
    }
}

impl From<&str> for AttendanceStatus {
    fn from(s: &str) -> Self {
        AttendanceStatus::from(s.to_string())
    }
}

impl From<AttendanceStatus> for String {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// STUDENT ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    id: StudentId,
    person: Person,

    /// date -> status, last write wins
    pub(crate) attendance: BTreeMap<String, AttendanceStatus>,

    /// subject -> grades in recording order
    pub(crate) grades: BTreeMap<String, Vec<Grade>>,
}

impl Student {
    pub(crate) fn new(id: StudentId, person: Person) -> Self {
        Student {
            id,
            person,
            attendance: BTreeMap::new(),
            grades: BTreeMap::new(),
        }
    }

    /// Append a grade for a subject (creates the subject on first grade)
    pub fn record_grade(&mut self, subject: &str, grade: Grade) -> Result<(), RosterError> {
        if !grade.is_finite() {
            log::warn!("Grade {} in {} for {} refused", grade, subject, self.person.name);
            return Err(RosterError::InvalidGrade {
                subject: subject.to_string(),
                grade,
            });
        }

        self.grades.entry(subject.to_string()).or_default().push(grade);
        log::debug!("Added grade {} in {} for {}", grade, subject, self.person.name);
        Ok(())
    }

    /// Set attendance for a date, overwriting any earlier entry
    pub fn record_attendance(&mut self, date: &str, status: impl Into<AttendanceStatus>) {
        let status = status.into();
        log::debug!("Attendance for {} on {}: {}", self.person.name, date, status);
        self.attendance.insert(date.to_string(), status);
    }

    /// Record attendance against today's local date (YYYY-MM-DD)
    pub fn record_attendance_today(&mut self, status: impl Into<AttendanceStatus>) {
        let today = Local::now().format("%Y-%m-%d").to_string();
        self.record_attendance(&today, status);
    }

    pub fn attendance(&self) -> &BTreeMap<String, AttendanceStatus> {
        &self.attendance
    }

    pub fn grades(&self) -> &BTreeMap<String, Vec<Grade>> {
        &self.grades
    }

    /// Mean over every grade in every subject; 0.0 when nothing is recorded
    pub fn average_grade(&self) -> f64 {
        let (total, count) = self
            .grades
            .values()
            .flatten()
            .fold((0.0, 0usize), |(sum, n), g| (sum + g, n + 1));

        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }

    pub fn attendance_tally(&self) -> AttendanceTally {
        AttendanceTally {
            present: self.attendance.values().filter(|s| s.is_present()).count(),
            total: self.attendance.len(),
        }
    }

    /// Read-only report: per-subject grades and means, attendance, overall mean
    pub fn report(&self) -> ReportCard {
        let subjects = self
            .grades
            .iter()
            .map(|(subject, grades)| SubjectSummary {
                subject: subject.clone(),
                grades: grades.clone(),
                average: mean(grades),
            })
            .collect();

        ReportCard {
            student_id: self.id,
            name: self.person.name.clone(),
            subjects,
            attendance: self.attendance_tally(),
            overall_average: self.average_grade(),
        }
    }
}

impl Member for Student {
    type Id = StudentId;

    fn id(&self) -> StudentId {
        self.id
    }

    fn person(&self) -> &Person {
        &self.person
    }
}

fn mean(grades: &[Grade]) -> f64 {
    if grades.is_empty() {
        0.0
    } else {
        grades.iter().sum::<f64>() / grades.len() as f64
    }
}

// ============================================================================
// REPORT CARD
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectSummary {
    pub subject: String,
    pub grades: Vec<Grade>,
    pub average: f64,
}

/// Present entries over total entries recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceTally {
    pub present: usize,
    pub total: usize,
}

impl AttendanceTally {
    /// None when no attendance has been recorded
    pub fn ratio(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.present as f64 / self.total as f64)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportCard {
    pub student_id: StudentId,
    pub name: String,
    pub subjects: Vec<SubjectSummary>,
    pub attendance: AttendanceTally,
    pub overall_average: f64,
}

impl fmt::Display for ReportCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Report Card for {}:", self.name)?;
        for s in &self.subjects {
            let grades: Vec<String> = s.grades.iter().map(|g| g.to_string()).collect();
            writeln!(
                f,
                "Subject: {}, Grades: [{}], Average: {:.2}",
                s.subject,
                grades.join(", "),
                s.average
            )?;
        }
        writeln!(
            f,
            "Total Attendance: {}/{}",
            self.attendance.present, self.attendance.total
        )?;
        write!(f, "Overall Average Grade: {:.2}", self.overall_average)
    }
}

// ============================================================================
// TESTS
// ============================================================================

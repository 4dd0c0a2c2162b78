// 🏫 Classroom - a named group of student and teacher references
//
// Members are held by id, never by value. The School owns the records;
// a classroom only points into the School's maps.

use super::person::{Member, StudentId, TeacherId};
use super::student::Student;
use super::teacher::Teacher;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Classroom {
    class_id: String,
    pub(crate) students: Vec<StudentId>,
    pub(crate) teachers: Vec<TeacherId>,
}

impl Classroom {
    pub(crate) fn new(class_id: impl Into<String>) -> Self {
        Classroom {
            class_id: class_id.into(),
            students: Vec::new(),
            teachers: Vec::new(),
        }
    }

    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    /// Append a student reference. Adding the same id twice lists it twice.
    pub(crate) fn add_student(&mut self, id: StudentId) {
        self.students.push(id);
    }

    /// Append a teacher reference. Adding the same id twice lists it twice.
    pub(crate) fn add_teacher(&mut self, id: TeacherId) {
        self.teachers.push(id);
    }

    pub fn students(&self) -> &[StudentId] {
        &self.students
    }

    pub fn teachers(&self) -> &[TeacherId] {
        &self.teachers
    }

    /// Resolve members against the owning maps and build a read view
    pub fn summary(
        &self,
        students: &BTreeMap<StudentId, Student>,
        teachers: &BTreeMap<TeacherId, Teacher>,
    ) -> ClassSummary {
        ClassSummary {
            class_id: self.class_id.clone(),
            students: self
                .students
                .iter()
                .filter_map(|id| students.get(id))
                .map(|s| s.info())
                .collect(),
            teachers: self
                .teachers
                .iter()
                .filter_map(|id| teachers.get(id))
                .map(|t| t.subjects_line())
                .collect(),
        }
    }
}

// ============================================================================
// CLASS SUMMARY
// ============================================================================

/// Display view of a classroom: one info line per student, one
/// subjects line per teacher, in membership order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSummary {
    pub class_id: String,
    pub students: Vec<String>,
    pub teachers: Vec<String>,
}

impl fmt::Display for ClassSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Class {} Information:", self.class_id)?;
        writeln!(f, "Students:")?;
        for line in &self.students {
            writeln!(f, "{}", line)?;
        }
        write!(f, "Teachers:")?;
        for line in &self.teachers {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

// 🏛️ School Registry - aggregate root of the roster
//
// Owns every Student, Teacher and Classroom. All cross-links go through
// here so a classroom can only ever reference ids that exist.
//
// Invariants:
// - Student and teacher ids come from per-kind counters starting at 1,
//   never reused
// - class_id is unique (creating twice returns the existing classroom)
// - every id listed in a classroom is a key of the owning map
//
// Unknown ids are soft failures: logged, returned as RosterError, no
// state changes.

use crate::entities::{
    AttendanceStatus, ClassSummary, Classroom, Grade, Member, Person, ReportCard, Student,
    StudentId, Teacher, TeacherId,
};
use crate::error::{RosterError, StoreError};
use log::{info, warn};
use std::collections::BTreeMap;

// ============================================================================
// CREATION OUTCOME
// ============================================================================

/// Result of an idempotent create: freshly made, or already there
#[derive(Debug, PartialEq)]
pub enum Created<T> {
    New(T),
    Existing(T),
}

impl<T> Created<T> {
    pub fn is_new(&self) -> bool {
        matches!(self, Created::New(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Created::New(v) | Created::Existing(v) => v,
        }
    }
}

// ============================================================================
// SCHOOL
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct School {
    name: String,
    pub(crate) students: BTreeMap<StudentId, Student>,
    pub(crate) teachers: BTreeMap<TeacherId, Teacher>,
    pub(crate) classrooms: BTreeMap<String, Classroom>,
    next_student_id: u32,
    next_teacher_id: u32,
}

impl School {
    /// Empty school
    pub fn new(name: impl Into<String>) -> Self {
        School {
            name: name.into(),
            students: BTreeMap::new(),
            teachers: BTreeMap::new(),
            classrooms: BTreeMap::new(),
            next_student_id: 1,
            next_teacher_id: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Point the id counters past the highest id held (after a load)
    pub(crate) fn resync_counters(&mut self) -> Result<(), StoreError> {
        self.next_student_id = next_after(self.students.keys().next_back().map(|id| id.0))
            .ok_or_else(|| StoreError::Malformed("student ids exhausted".to_string()))?;
        self.next_teacher_id = next_after(self.teachers.keys().next_back().map(|id| id.0))
            .ok_or_else(|| StoreError::Malformed("teacher ids exhausted".to_string()))?;
        Ok(())
    }

    // ========================================================================
    // REGISTRATION
    // ========================================================================

    pub fn register_student(&mut self, name: &str, age: u32) -> &Student {
        let id = StudentId(self.next_student_id);
        self.next_student_id += 1;

        info!("Student {} registered successfully with ID: {}", name, id);
        self.students
            .entry(id)
            .or_insert_with(|| Student::new(id, Person::new(name, age)))
    }

    pub fn register_teacher(&mut self, name: &str, age: u32) -> &Teacher {
        let id = TeacherId(self.next_teacher_id);
        self.next_teacher_id += 1;

        info!("Teacher {} registered successfully with ID: {}", name, id);
        self.teachers
            .entry(id)
            .or_insert_with(|| Teacher::new(id, Person::new(name, age)))
    }

    /// Create a classroom, or hand back the existing one untouched
    pub fn create_classroom(&mut self, class_id: &str) -> Created<&Classroom> {
        if self.classrooms.contains_key(class_id) {
            warn!("Classroom {} already exists.", class_id);
            return Created::Existing(&self.classrooms[class_id]);
        }

        info!("Classroom {} created successfully.", class_id);
        let room = self
            .classrooms
            .entry(class_id.to_string())
            .or_insert_with(|| Classroom::new(class_id));
        Created::New(room)
    }

    // ========================================================================
    // ASSIGNMENT
    // ========================================================================

    pub fn assign_student_to_class(
        &mut self,
        student_id: StudentId,
        class_id: &str,
    ) -> Result<(), RosterError> {
        let name = self.student(student_id)?.name().to_string();
        let room = self.classroom_mut(class_id)?;

        room.add_student(student_id);
        info!("Added {} to class {}", name, class_id);
        Ok(())
    }

    /// Records the subject on the teacher and adds them to the class;
    /// both happen or neither does
    pub fn assign_teacher_to_class(
        &mut self,
        teacher_id: TeacherId,
        class_id: &str,
        subject: &str,
    ) -> Result<(), RosterError> {
        // Nothing is mutated until both lookups succeed
        let Some(teacher) = self.teachers.get_mut(&teacher_id) else {
            warn!("Teacher ID {} not found.", teacher_id);
            return Err(RosterError::TeacherNotFound(teacher_id));
        };
        let Some(room) = self.classrooms.get_mut(class_id) else {
            warn!("Class ID {} not found.", class_id);
            return Err(RosterError::ClassroomNotFound(class_id.to_string()));
        };

        teacher.assign_subject(subject);
        room.add_teacher(teacher_id);
        let name = teacher.name();
        info!("Added {} to class {}", name, class_id);
        Ok(())
    }

    // ========================================================================
    // RECORDING
    // ========================================================================

    pub fn record_attendance(
        &mut self,
        student_id: StudentId,
        date: &str,
        status: impl Into<AttendanceStatus>,
    ) -> Result<(), RosterError> {
        self.student_mut(student_id)?.record_attendance(date, status);
        Ok(())
    }

    /// Record attendance against today's local date
    pub fn record_attendance_today(
        &mut self,
        student_id: StudentId,
        status: impl Into<AttendanceStatus>,
    ) -> Result<(), RosterError> {
        self.student_mut(student_id)?.record_attendance_today(status);
        Ok(())
    }

    /// Non-finite grades are refused and leave the student untouched
    pub fn record_grade(
        &mut self,
        student_id: StudentId,
        subject: &str,
        grade: Grade,
    ) -> Result<(), RosterError> {
        self.student_mut(student_id)?.record_grade(subject, grade)
    }

    // ========================================================================
    // REPORTING
    // ========================================================================

    pub fn display_class(&self, class_id: &str) -> Result<ClassSummary, RosterError> {
        Ok(self
            .classroom(class_id)?
            .summary(&self.students, &self.teachers))
    }

    pub fn report_card(&self, student_id: StudentId) -> Result<ReportCard, RosterError> {
        Ok(self.student(student_id)?.report())
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    pub fn student(&self, id: StudentId) -> Result<&Student, RosterError> {
        self.students.get(&id).ok_or_else(|| {
            warn!("Student ID {} not found.", id);
            RosterError::StudentNotFound(id)
        })
    }

    pub fn teacher(&self, id: TeacherId) -> Result<&Teacher, RosterError> {
        self.teachers.get(&id).ok_or_else(|| {
            warn!("Teacher ID {} not found.", id);
            RosterError::TeacherNotFound(id)
        })
    }

    pub fn classroom(&self, class_id: &str) -> Result<&Classroom, RosterError> {
        self.classrooms.get(class_id).ok_or_else(|| {
            warn!("Class ID {} not found.", class_id);
            RosterError::ClassroomNotFound(class_id.to_string())
        })
    }

    fn student_mut(&mut self, id: StudentId) -> Result<&mut Student, RosterError> {
        self.students.get_mut(&id).ok_or_else(|| {
            warn!("Student ID {} not found.", id);
            RosterError::StudentNotFound(id)
        })
    }

    fn classroom_mut(&mut self, class_id: &str) -> Result<&mut Classroom, RosterError> {
        self.classrooms.get_mut(class_id).ok_or_else(|| {
            warn!("Class ID {} not found.", class_id);
            RosterError::ClassroomNotFound(class_id.to_string())
        })
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    pub fn teachers(&self) -> impl Iterator<Item = &Teacher> {
        self.teachers.values()
    }

    pub fn classrooms(&self) -> impl Iterator<Item = &Classroom> {
        self.classrooms.values()
    }
}

/// Counter value following the highest held id (1 when none)
fn next_after(highest: Option<u32>) -> Option<u32> {
    match highest {
        Some(id) => id.checked_add(1),
        None => Some(1),
    }
}

// ============================================================================
// TESTS
// ============================================================================

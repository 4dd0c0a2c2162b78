// Entity Models
//
// Each record has:
// - Stable identity (typed id) that NEVER changes
// - Values that grow over time (grades, attendance, subjects)
// - No owning links to other records: classrooms hold ids only

pub mod person;
pub mod student;
pub mod teacher;
pub mod classroom;

pub use person::{Member, Person, StudentId, TeacherId};
pub use student::{AttendanceStatus, AttendanceTally, Grade, ReportCard, Student, SubjectSummary};
pub use teacher::Teacher;
pub use classroom::{ClassSummary, Classroom};

// School Roster - Core Library
// Exposes the roster model and persistence codec for the CLI and tests

pub mod entities;
pub mod error;
pub mod school;
pub mod store;

// Re-export commonly used types
pub use entities::{
    AttendanceStatus, AttendanceTally, ClassSummary, Classroom, Grade, Member, Person,
    ReportCard, Student, StudentId, SubjectSummary, Teacher, TeacherId,
};
pub use error::{RosterError, StoreError};
pub use school::{Created, School};
pub use store::{
    decode, encode, load, save, FileStore, MemoryStore, SchoolDocument, SnapshotStore,
    DEFAULT_DATA_FILE,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

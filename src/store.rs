// 💾 Persistence Codec - School <-> JSON snapshot
//
// Document shape:
//   {
//     "students":   { "<id>": {name, age, attendance: {date: status}, grades: {subject: [n]}} },
//     "teachers":   { "<id>": {name, age, subjects: [s]} },
//     "classrooms": { "<class_id>": {students: [id], teachers: [id]} }
//   }
//
// Key handling:
// - student / teacher keys are the canonical decimal text of the id: no sign,
//   no padding, no whitespace, never "0" ("01", "+1", " 1" are Malformed)
// - classroom keys are the class id, verbatim (never parsed)
// - member lists are written as integers, read as integers or as text under
//   the same canonical rule as keys; 0 is never a valid member
//
// Load rebuilds every student and teacher BEFORE relinking classrooms.
// Any structural problem fails the whole load; there is no partial School.

use crate::entities::{
    AttendanceStatus, Classroom, Grade, Member, Person, Student, StudentId, Teacher, TeacherId,
};
use crate::error::StoreError;
use crate::school::School;
use log::info;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Well-known snapshot file name
pub const DEFAULT_DATA_FILE: &str = "school_data.json";

// ============================================================================
// DOCUMENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolDocument {
    pub students: BTreeMap<String, StudentRecord>,
    pub teachers: BTreeMap<String, TeacherRecord>,
    pub classrooms: BTreeMap<String, ClassroomRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub age: u32,
    pub attendance: BTreeMap<String, AttendanceStatus>,
    pub grades: BTreeMap<String, Vec<Grade>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherRecord {
    pub name: String,
    pub age: u32,
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassroomRecord {
    pub students: Vec<MemberRef>,
    pub teachers: Vec<MemberRef>,
}

/// A classroom member id as found in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberRef {
    Number(u32),
    Text(String),
}

impl MemberRef {
    fn parse(&self, what: &str, class_id: &str) -> Result<u32, StoreError> {
        let id = match self {
            MemberRef::Number(n) => Some(*n).filter(|n| *n != 0),
            MemberRef::Text(s) => parse_id(s),
        };
        id.ok_or_else(|| {
            StoreError::Malformed(format!(
                "classroom {}: {} id {:?} is not a positive integer",
                class_id, what, self
            ))
        })
    }
}

/// Canonical positive decimal id, or None
fn parse_id(text: &str) -> Option<u32> {
    let id: u32 = text.parse().ok()?;
    (id != 0 && id.to_string() == text).then_some(id)
}

fn parse_key(section: &str, key: &str) -> Result<u32, StoreError> {
    parse_id(key).ok_or_else(|| {
        StoreError::Malformed(format!("{}: key {:?} is not a positive integer id", section, key))
    })
}

impl SchoolDocument {
    pub fn from_school(school: &School) -> Self {
        let students = school
            .students()
            .map(|s| {
                (
                    s.id().to_string(),
                    StudentRecord {
                        name: s.name().to_string(),
                        age: s.age(),
                        attendance: s.attendance().clone(),
                        grades: s.grades().clone(),
                    },
                )
            })
            .collect();

        let teachers = school
            .teachers()
            .map(|t| {
                (
                    t.id().to_string(),
                    TeacherRecord {
                        name: t.name().to_string(),
                        age: t.age(),
                        subjects: t.subjects_taught().to_vec(),
                    },
                )
            })
            .collect();

        let classrooms = school
            .classrooms()
            .map(|c| {
                (
                    c.class_id().to_string(),
                    ClassroomRecord {
                        students: c.students().iter().map(|id| MemberRef::Number(id.0)).collect(),
                        teachers: c.teachers().iter().map(|id| MemberRef::Number(id.0)).collect(),
                    },
                )
            })
            .collect();

        SchoolDocument {
            students,
            teachers,
            classrooms,
        }
    }

    /// Rebuild a School: people first, then classrooms relinked by id
    pub fn into_school(self, name: &str) -> Result<School, StoreError> {
        let mut school = School::new(name);

        // 1. Students
        for (key, record) in self.students {
            let id = StudentId(parse_key("students", &key)?);
            let mut student = Student::new(id, Person::new(record.name, record.age));
            student.attendance = record.attendance;
            student.grades = record.grades;
            school.students.insert(id, student);
        }

        // 2. Teachers
        for (key, record) in self.teachers {
            let id = TeacherId(parse_key("teachers", &key)?);
            let mut teacher = Teacher::new(id, Person::new(record.name, record.age));
            teacher.subjects = record.subjects;
            school.teachers.insert(id, teacher);
        }

        // 3. Classrooms (every person exists by now)
        for (class_id, record) in self.classrooms {
            let mut room = Classroom::new(class_id.as_str());

            for member in &record.students {
                let id = StudentId(member.parse("student", &class_id)?);
                if !school.students.contains_key(&id) {
                    return Err(StoreError::Malformed(format!(
                        "classroom {} lists unknown student {}",
                        class_id, id
                    )));
                }
                room.add_student(id);
            }

            for member in &record.teachers {
                let id = TeacherId(member.parse("teacher", &class_id)?);
                if !school.teachers.contains_key(&id) {
                    return Err(StoreError::Malformed(format!(
                        "classroom {} lists unknown teacher {}",
                        class_id, id
                    )));
                }
                room.add_teacher(id);
            }

            school.classrooms.insert(class_id, room);
        }

        school.resync_counters()?;
        Ok(school)
    }
}

// ============================================================================
// CODEC
// ============================================================================

/// Serialize the whole School as pretty JSON (4-space indent)
pub fn encode(school: &School) -> Result<Vec<u8>, StoreError> {
    let doc = SchoolDocument::from_school(school);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)?;
    Ok(buf)
}

/// Parse a snapshot back into a School
pub fn decode(bytes: &[u8], name: &str) -> Result<School, StoreError> {
    let doc: SchoolDocument = serde_json::from_slice(bytes)?;
    doc.into_school(name)
}

/// Snapshot the School into the store, replacing whatever was there
pub fn save(school: &School, store: &dyn SnapshotStore) -> Result<(), StoreError> {
    let bytes = encode(school)?;
    store.write(&bytes)?;
    info!("School data saved successfully.");
    Ok(())
}

/// Restore a School from the store; empty School when nothing was saved
pub fn load(store: &dyn SnapshotStore, name: &str) -> Result<School, StoreError> {
    match store.read()? {
        Some(bytes) => {
            let school = decode(&bytes, name)?;
            info!(
                "School data loaded successfully ({} students, {} teachers, {} classrooms).",
                school.students.len(),
                school.teachers.len(),
                school.classrooms.len()
            );
            Ok(school)
        }
        None => {
            info!("No previous data found.");
            Ok(School::new(name))
        }
    }
}

// ============================================================================
// STORES
// ============================================================================

/// Whole-document key-value persistence contract
pub trait SnapshotStore {
    /// None when no snapshot has been written yet
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the snapshot
    fn write(&self, bytes: &[u8]) -> Result<(), StoreError>;
}

/// Snapshot kept in a single local file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl SnapshotStore for FileStore {
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, bytes: &[u8]) -> Result<(), StoreError> {
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

/// Snapshot kept in memory (single-threaded)
#[derive(Debug, Default)]
pub struct MemoryStore {
    bytes: RefCell<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        MemoryStore {
            bytes: RefCell::new(Some(bytes.into())),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.bytes.borrow().clone())
    }

    fn write(&self, bytes: &[u8]) -> Result<(), StoreError> {
        *self.bytes.borrow_mut() = Some(bytes.to_vec());
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_school() -> School {
        let mut school = School::new("Green Valley High School");
        school.register_student("John Doe", 15);
        school.register_student("Jane Smith", 16);
        school.register_teacher("Mrs. Robinson", 35);
        school.create_classroom("10A");
        school.create_classroom("11B");
        school.assign_student_to_class(StudentId(1), "10A").unwrap();
        school.assign_student_to_class(StudentId(2), "11B").unwrap();
        school.assign_student_to_class(StudentId(1), "11B").unwrap();
        school
            .assign_teacher_to_class(TeacherId(1), "10A", "Math")
            .unwrap();
        school
            .assign_teacher_to_class(TeacherId(1), "11B", "Science")
            .unwrap();
        school
            .record_attendance(StudentId(1), "2024-09-29", "Present")
            .unwrap();
        school
            .record_attendance(StudentId(2), "2024-09-29", "Late")
            .unwrap();
        school.record_grade(StudentId(1), "Math", 85.0).unwrap();
        school.record_grade(StudentId(1), "Math", 92.5).unwrap();
        school.record_grade(StudentId(2), "Science", 78.0).unwrap();
        school
    }

    #[test]
    fn test_round_trip_reproduces_school() {
        let school = sample_school();
        let store = MemoryStore::new();

        save(&school, &store).unwrap();
        let loaded = load(&store, school.name()).unwrap();

        assert_eq!(loaded, school);
        assert_eq!(
            loaded.classroom("11B").unwrap().students(),
            [StudentId(2), StudentId(1)]
        );
    }

    #[test]
    fn test_load_without_snapshot_is_empty() {
        let school = load(&MemoryStore::new(), "Empty").unwrap();
        assert_eq!(school, School::new("Empty"));
    }

    #[test]
    fn test_loaded_school_continues_id_sequence() {
        let store = MemoryStore::new();
        save(&sample_school(), &store).unwrap();

        let mut loaded = load(&store, "Reloaded").unwrap();
        assert_eq!(loaded.register_student("Sam Brown", 14).id(), StudentId(3));
        assert_eq!(loaded.register_teacher("Mr. Anderson", 40).id(), TeacherId(2));
    }

    #[test]
    fn test_encoded_document_shape() {
        let bytes = encode(&sample_school()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["students"]["1"]["name"], "John Doe");
        assert_eq!(value["students"]["2"]["attendance"]["2024-09-29"], "Late");
        assert_eq!(value["teachers"]["1"]["subjects"], serde_json::json!(["Math", "Science"]));
        assert_eq!(value["classrooms"]["11B"]["students"], serde_json::json!([2, 1]));

        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\n    \"classrooms\""));
    }

    #[test]
    fn test_string_member_ids_are_accepted() {
        let json = r#"{
            "students": {"1": {"name": "A", "age": 10, "attendance": {}, "grades": {"Math": [95]}}},
            "teachers": {"1": {"name": "B", "age": 30, "subjects": ["Math"]}},
            "classrooms": {"X": {"students": ["1"], "teachers": [1]}}
        }"#;

        let school = decode(json.as_bytes(), "Mixed").unwrap();
        let room = school.classroom("X").unwrap();
        assert_eq!(room.students(), [StudentId(1)]);
        assert_eq!(room.teachers(), [TeacherId(1)]);
        assert_eq!(school.student(StudentId(1)).unwrap().grades()["Math"], vec![95.0]);
    }

    #[test]
    fn test_numeric_looking_class_id_stays_text() {
        let json = r#"{
            "students": {},
            "teachers": {},
            "classrooms": {"007": {"students": [], "teachers": []}}
        }"#;

        let school = decode(json.as_bytes(), "Keys").unwrap();
        assert!(school.classroom("007").is_ok());
        assert!(school.classroom("7").is_err());
    }

    #[test]
    fn test_missing_section_is_malformed() {
        let json = r#"{"students": {}, "teachers": {}}"#;
        let err = decode(json.as_bytes(), "Broken").unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let json = r#"{
            "students": {"1": {"name": "A", "attendance": {}, "grades": {}}},
            "teachers": {},
            "classrooms": {}
        }"#;
        let err = decode(json.as_bytes(), "Broken").unwrap_err();
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn test_non_numeric_student_key_is_malformed() {
        let json = r#"{
            "students": {"abc": {"name": "A", "age": 1, "attendance": {}, "grades": {}}},
            "teachers": {},
            "classrooms": {}
        }"#;
        let err = decode(json.as_bytes(), "Broken").unwrap_err();
        assert!(err.to_string().contains("\"abc\""));
    }

    #[test]
    fn test_dangling_member_is_malformed() {
        let json = r#"{
            "students": {},
            "teachers": {},
            "classrooms": {"X": {"students": [3], "teachers": []}}
        }"#;
        let err = decode(json.as_bytes(), "Broken").unwrap_err();
        assert!(err.to_string().contains("unknown student 3"));
    }

    #[test]
    fn test_truncated_document_is_malformed() {
        let bytes = encode(&sample_school()).unwrap();
        let store = MemoryStore::with_bytes(&bytes[..bytes.len() / 2]);
        assert!(matches!(load(&store, "Cut"), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let store = MemoryStore::new();
        save(&sample_school(), &store).unwrap();
        save(&School::new("Fresh"), &store).unwrap();

        let loaded = load(&store, "Fresh").unwrap();
        assert_eq!(loaded.students().count(), 0);
        assert_eq!(loaded.classrooms().count(), 0);
    }

    fn one_student_doc(key: &str) -> String {
        format!(
            r#"{{
                "students": {{"{}": {{"name": "A", "age": 10, "attendance": {{}}, "grades": {{}}}}}},
                "teachers": {{}},
                "classrooms": {{}}
            }}"#,
            key
        )
    }

    #[test]
    fn test_refused_grade_keeps_snapshot_loadable() {
        let mut school = sample_school();
        assert!(school.record_grade(StudentId(1), "Math", f64::INFINITY).is_err());
        assert!(school.record_grade(StudentId(1), "Math", f64::NAN).is_err());

        let store = MemoryStore::new();
        save(&school, &store).unwrap();
        assert_eq!(load(&store, school.name()).unwrap(), school);
    }

    #[test]
    fn test_max_id_key_is_malformed_not_a_panic() {
        let json = one_student_doc("4294967295");
        let err = decode(json.as_bytes(), "Ceiling").unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }

    #[test]
    fn test_non_canonical_keys_are_malformed() {
        for key in ["01", "+1", " 1", "1 "] {
            let err = decode(one_student_doc(key).as_bytes(), "Keys").unwrap_err();
            assert!(matches!(err, StoreError::Malformed(_)), "key {:?}", key);
        }
    }

    #[test]
    fn test_aliased_keys_cannot_collapse_records() {
        let json = r#"{
            "students": {
                "1": {"name": "A", "age": 10, "attendance": {}, "grades": {}},
                "01": {"name": "B", "age": 11, "attendance": {}, "grades": {}}
            },
            "teachers": {},
            "classrooms": {}
        }"#;
        assert!(decode(json.as_bytes(), "Dupes").is_err());
    }

    #[test]
    fn test_zero_id_is_malformed() {
        assert!(decode(one_student_doc("0").as_bytes(), "Zero").is_err());

        let json = r#"{
            "students": {"1": {"name": "A", "age": 10, "attendance": {}, "grades": {}}},
            "teachers": {},
            "classrooms": {"X": {"students": [0], "teachers": []}}
        }"#;
        assert!(decode(json.as_bytes(), "Zero").is_err());

        let json = json.replace("[0]", r#"["0"]"#);
        assert!(decode(json.as_bytes(), "Zero").is_err());
    }

    #[test]
    fn test_member_text_ids_follow_key_rules() {
        let json = r#"{
            "students": {"1": {"name": "A", "age": 10, "attendance": {}, "grades": {}}},
            "teachers": {},
            "classrooms": {"X": {"students": [" 1"], "teachers": []}}
        }"#;
        let err = decode(json.as_bytes(), "Trim").unwrap_err();
        assert!(err.to_string().contains("not a positive integer"));
    }
}

// 🍎 Teacher Entity - Person + assigned subjects
//
// Subjects are an assignment log, not a set: assigning "Math" twice
// records it twice.

use super::person::{Member, Person, TeacherId};

#[derive(Debug, Clone, PartialEq)]
pub struct Teacher {
    id: TeacherId,
    person: Person,
    pub(crate) subjects: Vec<String>,
}

impl Teacher {
    pub(crate) fn new(id: TeacherId, person: Person) -> Self {
        Teacher {
            id,
            person,
            subjects: Vec::new(),
        }
    }

    /// Append a subject (no dedup)
    pub fn assign_subject(&mut self, subject: &str) {
        self.subjects.push(subject.to_string());
        log::debug!("{} is now assigned to teach {}", self.person.name, subject);
    }

    pub fn subjects_taught(&self) -> &[String] {
        &self.subjects
    }

    /// `<name> teaches: a, b`
    pub fn subjects_line(&self) -> String {
        format!("{} teaches: {}", self.person.name, self.subjects.join(", "))
    }
}

impl Member for Teacher {
    type Id = TeacherId;

    fn id(&self) -> TeacherId {
        self.id
    }

    fn person(&self) -> &Person {
        &self.person
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_subject_keeps_duplicates_in_order() {
        let mut t = Teacher::new(TeacherId(1), Person::new("Mrs. Robinson", 35));
        t.assign_subject("Math");
        t.assign_subject("Physics");
        t.assign_subject("Math");

        assert_eq!(t.subjects_taught(), ["Math", "Physics", "Math"]);
        assert_eq!(t.subjects_line(), "Mrs. Robinson teaches: Math, Physics, Math");
    }

    #[test]
    fn test_teacher_identity() {
        let t = Teacher::new(TeacherId(2), Person::new("Mr. Anderson", 40));
        assert_eq!(t.id(), TeacherId(2));
        assert_eq!(t.info(), "Name: Mr. Anderson, Age: 40, ID: 2");
        assert!(t.subjects_taught().is_empty());
    }
}

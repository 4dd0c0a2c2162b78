// 🪪 Person - identity shared by students and teachers
//
// "The id is IDENTITY (never changes), name and age are VALUES"
//
// Students and teachers embed a Person and expose it through the Member
// trait. Ids are per-kind newtypes so a student id can never be used to
// look up a teacher.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// IDS
// ============================================================================

/// Student identity, assigned sequentially from 1 by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub u32);

/// Teacher identity, an independent sequence from StudentId
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeacherId(pub u32);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// PERSON
// ============================================================================

/// Common identity attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Person {
            name: name.into(),
            age,
        }
    }
}

/// Anything registered in the school: has a typed id and a Person
pub trait Member {
    type Id: Copy + fmt::Display;

    fn id(&self) -> Self::Id;

    fn person(&self) -> &Person;

    fn name(&self) -> &str {
        &self.person().name
    }

    fn age(&self) -> u32 {
        self.person().age
    }

    /// One-line identity display: `Name: .., Age: .., ID: ..`
    fn info(&self) -> String {
        format!("Name: {}, Age: {}, ID: {}", self.name(), self.age(), self.id())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Visitor {
        id: u32,
        person: Person,
    }

    impl Member for Visitor {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }

        fn person(&self) -> &Person {
            &self.person
        }
    }

    #[test]
    fn test_member_defaults() {
        let v = Visitor {
            id: 3,
            person: Person::new("Ada", 36),
        };
        assert_eq!(v.name(), "Ada");
        assert_eq!(v.age(), 36);
        assert_eq!(v.info(), "Name: Ada, Age: 36, ID: 3");
    }

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        assert_eq!(serde_json::to_string(&StudentId(4)).unwrap(), "4");
        assert_eq!(serde_json::from_str::<TeacherId>("9").unwrap(), TeacherId(9));
        assert_eq!(StudentId(12).to_string(), "12");
    }
}

use crate::model::{PersonId, PersonRef, Role};

/// Who the client acts as
///
/// There is no login flow; the identity comes from configuration and is
/// handed to every page that needs an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub student_id: PersonId,
    pub instructor_id: PersonId,
    /// Record shown and edited on the profile page
    pub profile: PersonRef,
}

impl Session {
    /// Session whose profile page edits the given role's own record
    pub fn new(student_id: PersonId, instructor_id: PersonId, role: Role) -> Self {
        let id = match role {
            Role::Student => student_id,
            Role::Instructor => instructor_id,
        };
        Self {
            student_id,
            instructor_id,
            profile: PersonRef { role, id },
        }
    }

    pub fn role(&self) -> Role {
        self.profile.role
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1, 1, Role::Student)
    }
}

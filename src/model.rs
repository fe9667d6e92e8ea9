use crate::hourmin::HourMin;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type ReservationId = u64;
pub type PersonId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_reserved: bool,
    #[serde(rename = "studentID", default)]
    pub student_id: Option<PersonId>,
    #[serde(rename = "instructorID", default)]
    pub instructor_id: Option<PersonId>,
    pub reservation_date: String,
    pub reservation_time: String,
    pub reservation_place: String,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl Reservation {
    /// `2025-05-10` is shown as `10.05.2025`, anything else unchanged
    pub fn display_date(&self) -> String {
        NaiveDate::parse_from_str(&self.reservation_date, "%Y-%m-%d")
            .map(|d| d.format("%d.%m.%Y").to_string())
            .unwrap_or_else(|_| self.reservation_date.clone())
    }

    pub fn display_time(&self) -> String {
        HourMin::try_from(self.reservation_time.as_str())
            .map(|t| t.to_string())
            .unwrap_or_else(|_| self.reservation_time.clone())
    }
}

/// Body of `POST /api/reservations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub is_reserved: bool,
    #[serde(rename = "studentID")]
    pub student_id: PersonId,
    #[serde(rename = "instructorID")]
    pub instructor_id: PersonId,
    pub reservation_date: String,
    pub reservation_time: String,
    pub reservation_place: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
}

impl Role {
    /// Collection segment under `/api/`
    pub fn collection(&self) -> &'static str {
        match self {
            Role::Student => "students",
            Role::Instructor => "instructors",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "Student"),
            Role::Instructor => write!(f, "Instructor"),
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "instructor" => Ok(Role::Instructor),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonRef {
    pub role: Role,
    pub id: PersonId,
}

/// A student or an instructor record
///
/// The password travels in plaintext because that is what the API exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PersonId>,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name_of_school: String,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Body of `PUT /api/students/{id}` and `PUT /api/instructors/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonUpdate {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub name_of_school: String,
}

impl From<Person> for PersonUpdate {
    fn from(p: Person) -> Self {
        Self {
            name: p.name,
            surname: p.surname,
            email: p.email,
            password: p.password,
            name_of_school: p.name_of_school,
        }
    }
}

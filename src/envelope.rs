//! Normalization of the API's response envelopes
//!
//! The server wraps some payloads (`{status, instructor}`,
//! `{status, reservations}`) and returns others bare, depending on the
//! endpoint and version. Everything past this module sees plain
//! [`Person`] and [`Reservation`] values.

use crate::error::ApiError;
use crate::model::{Person, Reservation, Role};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReservationsEnvelope {
    Bare(Vec<Reservation>),
    Wrapped {
        #[serde(default)]
        #[allow(dead_code)]
        status: Option<u16>,
        #[serde(default)]
        reservations: Option<Vec<Reservation>>,
        #[serde(default)]
        error: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PersonEnvelope {
    Bare(Person),
    Wrapped {
        #[serde(default)]
        #[allow(dead_code)]
        status: Option<u16>,
        #[serde(default)]
        instructor: Option<Person>,
        #[serde(default)]
        student: Option<Person>,
        #[serde(default)]
        error: Option<String>,
    },
}

/// Error body the server sends alongside non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
    // field name -> validation message
    #[serde(default)]
    errors: BTreeMap<String, Value>,
}

pub fn reservations(body: &[u8]) -> Result<Vec<Reservation>, ApiError> {
    match serde_json::from_slice::<ReservationsEnvelope>(body)? {
        ReservationsEnvelope::Bare(list) => Ok(list),
        ReservationsEnvelope::Wrapped {
            reservations: Some(list),
            ..
        } => Ok(list),
        ReservationsEnvelope::Wrapped {
            error: Some(error), ..
        } => Err(ApiError::Remote(error)),
        ReservationsEnvelope::Wrapped { .. } => Err(ApiError::Malformed(
            "response has neither reservations nor error".to_string(),
        )),
    }
}

pub fn person(role: Role, body: &[u8]) -> Result<Person, ApiError> {
    match serde_json::from_slice::<PersonEnvelope>(body)? {
        PersonEnvelope::Bare(person) => Ok(person),
        PersonEnvelope::Wrapped {
            instructor,
            student,
            error,
            ..
        } => {
            let person = match role {
                Role::Instructor => instructor.or(student),
                Role::Student => student.or(instructor),
            };
            match (person, error) {
                (Some(person), _) => Ok(person),
                (None, Some(error)) => Err(ApiError::Remote(error)),
                (None, None) => Err(ApiError::Malformed(format!(
                    "response carries no {} record",
                    role.to_string().to_lowercase()
                ))),
            }
        }
    }
}

/// Best-effort extraction of the server's message from an error response
pub fn error_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    if let Some(message) = parsed.error.or(parsed.message) {
        return Some(message);
    }
    let fields: Vec<String> = parsed
        .errors
        .into_iter()
        .map(|(field, reason)| match reason {
            Value::String(text) => format!("{field}: {text}"),
            other => format!("{field}: {other}"),
        })
        .collect();
    (!fields.is_empty()).then(|| fields.join("; "))
}

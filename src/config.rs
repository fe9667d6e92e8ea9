use crate::model::{PersonId, PersonRef, Role};
use crate::session::Session;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub api_base_url: String,
    pub static_dir: String,
    pub request_timeout: Duration,
    pub session: Session,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let student_id: PersonId = parsed(&lookup, "STUDENT_ID", 1)?;
        let instructor_id: PersonId = parsed(&lookup, "INSTRUCTOR_ID", 1)?;
        let role = Role::try_from(text("PROFILE_ROLE", "student").as_str())
            .map_err(|e| anyhow!("PROFILE_ROLE: {e}"))?;

        let mut session = Session::new(student_id, instructor_id, role);
        if let Some(id) = lookup("PROFILE_ID") {
            session.profile = PersonRef {
                role,
                id: id
                    .parse()
                    .with_context(|| format!("PROFILE_ID is not an id: {id}"))?,
            };
        }

        Ok(Self {
            port: parsed(&lookup, "PORT", 3000)?,
            api_base_url: text("API_BASE_URL", "http://localhost:8080"),
            static_dir: text("STATIC_DIR", "static"),
            request_timeout: Duration::from_secs(parsed(&lookup, "REQUEST_TIMEOUT_SECS", 30)?),
            session,
        })
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{key} has invalid value: {value}")),
        None => Ok(default),
    }
}

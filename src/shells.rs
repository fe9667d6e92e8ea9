use crate::api::ApiClient;
use crate::session::Session;
use crate::shell::Shell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

pub const SHELL_COOKIE: &str = "SHELL-COOKIE";

/// Shells untouched for this long are dropped, cancelling their requests
pub const SHELL_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShellId(u64);

impl ShellId {
    fn random() -> Self {
        Self(rand::random())
    }
}

impl fmt::Display for ShellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl TryFrom<&str> for ShellId {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.len() != 16 {
            return Err(format!("Invalid shell id length: {}", value.len()));
        }
        u64::from_str_radix(value, 16)
            .map(Self)
            .map_err(|e| format!("Invalid shell id: {}", e))
    }
}

struct Entry {
    shell: Arc<Mutex<Shell>>,
    last_used: Instant,
}

/// Shells by browser, keyed by the id in [`SHELL_COOKIE`]
pub struct ShellRegistry {
    api: ApiClient,
    session: Session,
    shells: RwLock<HashMap<ShellId, Entry>>,
}

impl ShellRegistry {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            session,
            shells: RwLock::new(HashMap::new()),
        }
    }

    /// Shell for the given cookie value, opening a new one if the value is
    /// missing, malformed or no longer known
    pub async fn shell_for(&self, cookie: Option<&str>) -> (ShellId, Arc<Mutex<Shell>>) {
        let known = cookie.and_then(|value| ShellId::try_from(value).ok());

        if let Some(id) = known {
            if let Some(entry) = self.shells.write().await.get_mut(&id) {
                entry.last_used = Instant::now();
                return (id, entry.shell.clone());
            }
        }

        let mut shells = self.shells.write().await;
        let now = Instant::now();
        shells.retain(|id, entry| {
            let keep = now.duration_since(entry.last_used) < SHELL_IDLE_TIMEOUT;
            if !keep {
                debug!("Dropping idle shell {}", id);
            }
            keep
        });

        let mut id = ShellId::random();
        //ensure id is unique
        while shells.contains_key(&id) {
            id = ShellId::random();
        }
        debug!("Opening shell {} ({} open)", id, shells.len() + 1);
        let shell = Arc::new(Mutex::new(Shell::new(
            self.api.clone(),
            self.session.clone(),
        )));
        shells.insert(
            id,
            Entry {
                shell: shell.clone(),
                last_used: now,
            },
        );
        (id, shell)
    }
}

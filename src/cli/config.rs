use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionToken;

const SESSION_FILE: &str = "session.json";

/// Session recorded by `treepz login`, replayed as the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub server: String,
    pub email: String,
    pub token: String,
    pub logged_in_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(server: &str, email: &str, token: &SessionToken) -> Self {
        Self {
            server: server.trim_end_matches('/').to_string(),
            email: email.to_string(),
            token: token.expose().to_string(),
            logged_in_at: Utc::now(),
        }
    }

    pub fn token(&self) -> SessionToken {
        SessionToken::new(self.token.clone())
    }

    /// Recorded against the same server URL.
    pub fn is_for(&self, server: &str) -> bool {
        self.server == server.trim_end_matches('/')
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("TREEPZ_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("treepz")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_session() -> anyhow::Result<Option<StoredSession>> {
    load_session_from(&get_config_dir()?)
}

pub fn save_session(session: &StoredSession) -> anyhow::Result<()> {
    save_session_to(&get_config_dir()?, session)
}

pub fn clear_session() -> anyhow::Result<()> {
    clear_session_in(&get_config_dir()?)
}

fn load_session_from(dir: &Path) -> anyhow::Result<Option<StoredSession>> {
    let session_file = dir.join(SESSION_FILE);

    if !session_file.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(session_file)?;
    let session: StoredSession = serde_json::from_str(&content)?;
    Ok(Some(session))
}

fn save_session_to(dir: &Path, session: &StoredSession) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(session)?;
    fs::write(dir.join(SESSION_FILE), content)?;
    Ok(())
}

fn clear_session_in(dir: &Path) -> anyhow::Result<()> {
    let session_file = dir.join(SESSION_FILE);
    if session_file.exists() {
        fs::remove_file(session_file)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("treepz-cli-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn session_round_trips_through_disk() {
        let dir = scratch_dir("roundtrip");
        let stored = StoredSession::new("http://localhost:3000/", "ops@treepz.com", &SessionToken::new("tok-1"));
        save_session_to(&dir, &stored).unwrap();

        let loaded = load_session_from(&dir).unwrap().unwrap();
        assert_eq!(loaded.token(), SessionToken::new("tok-1"));
        assert!(loaded.is_for("http://localhost:3000"));
        assert!(!loaded.is_for("http://localhost:4000"));

        clear_session_in(&dir).unwrap();
        assert!(load_session_from(&dir).unwrap().is_none());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_session_file_is_none() {
        let dir = scratch_dir("missing");
        assert!(load_session_from(&dir).unwrap().is_none());
        clear_session_in(&dir).unwrap();
        fs::remove_dir_all(dir).unwrap();
    }
}

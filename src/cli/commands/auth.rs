use serde_json::json;

use crate::cli::config::{self, StoredSession};
use crate::cli::utils::output_success;
use crate::cli::{connect, OutputFormat};
use crate::client::SessionState;

pub async fn login(server: &str, email: &str, password: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut session = connect(server)?;
    session.login(email, password).await?;

    let token = session
        .current_token()
        .ok_or_else(|| anyhow::anyhow!("server accepted the login but set no session cookie"))?;
    config::save_session(&StoredSession::new(server, email, &token))?;

    output_success(
        &output_format,
        &format!("Logged in as {}", email),
        Some(json!({ "server": server, "email": email })),
    )
}

/// The recorded session is forgotten even when the server cannot be reached.
pub async fn logout(server: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut session = connect(server)?;
    config::clear_session()?;

    if session.is_authenticated() {
        if let Err(e) = session.logout().await {
            tracing::warn!("server logout failed: {}", e);
        }
    }

    output_success(&output_format, "Logged out", None)
}

pub fn status(server: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let stored = config::load_session()?.filter(|s| s.is_for(server));
    let session = connect(server)?;

    match (session.state(), stored) {
        (SessionState::Authenticated { .. }, Some(stored)) => output_success(
            &output_format,
            &format!("Logged in to {} as {}", server, stored.email),
            Some(json!({
                "authenticated": true,
                "server": server,
                "email": stored.email,
                "logged_in_at": stored.logged_in_at,
            })),
        ),
        _ => output_success(
            &output_format,
            &format!("Not logged in to {}", server),
            Some(json!({ "authenticated": false, "server": server })),
        ),
    }
}

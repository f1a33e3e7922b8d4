//! Client-side session controller.
//!
//! One object owns the session from the client's point of view. The token
//! itself only ever sits in the HTTP cookie jar.

use reqwest::cookie::CookieStore;

use super::{ClientError, DashboardClient};
use crate::config::SESSION_COOKIE_NAME;
use crate::session::SessionToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated { email: Option<String> },
}

#[derive(Debug)]
pub struct SessionController {
    client: DashboardClient,
    state: SessionState,
}

impl SessionController {
    pub fn new(client: DashboardClient) -> Self {
        Self {
            client,
            state: SessionState::Anonymous,
        }
    }

    /// Resume a session whose token was recorded earlier.
    pub fn restore(client: DashboardClient, token: &SessionToken) -> Self {
        let cookie = format!("{}={}; Path=/", SESSION_COOKIE_NAME, token.expose());
        client.jar().add_cookie_str(&cookie, client.base_url());
        Self {
            client,
            state: SessionState::Authenticated { email: None },
        }
    }

    pub fn client(&self) -> &DashboardClient {
        &self.client
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        self.client.login(email, password).await?;
        self.state = SessionState::Authenticated {
            email: Some(email.to_string()),
        };
        Ok(())
    }

    /// Local state is cleared even when the server cannot be reached.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        self.state = SessionState::Anonymous;
        self.client.logout().await
    }

    /// Token currently held for this client, if signed in.
    pub fn current_token(&self) -> Option<SessionToken> {
        if !self.is_authenticated() {
            return None;
        }
        let header = self.client.jar().cookies(self.client.base_url())?;
        let header = header.to_str().ok()?;
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == SESSION_COOKIE_NAME && !value.is_empty())
            .map(|(_, value)| SessionToken::new(value))
    }

    /// A proxy answered 401: the recorded session is no longer good.
    pub fn expire(&mut self) {
        self.state = SessionState::Anonymous;
    }
}

/// Supplies the signed-in user and owns the session lifecycle.
pub trait Authenticator: Send {
    fn username(&self) -> &str;

    fn sign_out(&mut self);
}

/// Identity handed to the client from outside (flags or environment).
/// Credentials are never issued or refreshed here.
pub struct ConfiguredSession {
    username: String,
    token: Option<String>,
}

impl ConfiguredSession {
    pub fn new(username: impl Into<String>, token: Option<String>) -> Self {
        Self {
            username: username.into(),
            token,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl Authenticator for ConfiguredSession {
    fn username(&self) -> &str {
        &self.username
    }

    fn sign_out(&mut self) {
        self.token = None;
        log::info!("signed out {}", self.username);
    }
}

// File: src/session.rs
// Purpose: Session login accessor consumed by View::render

/// The current login, as exposed by the external session layer
#[derive(Debug, Clone, PartialEq)]
pub struct Login {
    pub id: i64,
    pub name: String,
}

impl Login {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Per-request session handle; absent login means unauthenticated
#[derive(Debug, Clone, Default)]
pub struct Session {
    login: Option<Login>,
}

impl Session {
    /// An unauthenticated session
    pub fn anonymous() -> Self {
        Self { login: None }
    }

    pub fn with_login(login: Login) -> Self {
        Self { login: Some(login) }
    }

    pub fn login(&self) -> Option<&Login> {
        self.login.as_ref()
    }

    /// The identity injected into every render scope: the active login,
    /// or the anonymous `(0, "world")` pair
    pub fn render_identity(&self) -> (i64, String) {
        match &self.login {
            Some(login) => (login.id, login.name.clone()),
            None => (0, "world".to_string()),
        }
    }
}

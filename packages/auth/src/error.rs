use store::StoreError;

/// Failures of the sign-in strategies and the session manager.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("a user with this username already exists")]
    DuplicateUser,
    #[error("username and password are both required")]
    MissingCredentials,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("identity provider error: {0}")]
    Provider(String),
    #[error("unknown identity provider: {0}")]
    UnknownProvider(String),
    #[error("identity provider {0} is not configured")]
    ProviderNotConfigured(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl AuthError {
    /// Failures caused by what the visitor submitted rather than by the server.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::DuplicateUser
                | AuthError::MissingCredentials
                | AuthError::InvalidCredentials
                | AuthError::Provider(_)
                | AuthError::UnknownProvider(_)
                | AuthError::ProviderNotConfigured(_)
        )
    }
}

pub type Result<T, E = AuthError> = std::result::Result<T, E>;

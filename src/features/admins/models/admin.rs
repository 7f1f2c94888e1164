use sqlx::FromRow;

/// Database model for an administrator
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Admin {
    pub id: String,
    pub username: String,
    pub name: String,
    /// Argon2 PHC string
    pub password: String,
}

/// Identity taken from a verified bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAdmin {
    pub id: String,
    pub username: String,
}

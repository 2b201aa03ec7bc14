use serde::{Deserialize, Serialize};

/// Credentials presented at login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Domain user (business view, never carries the hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
}

/// Stored account as the repository sees it
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub password_hash: String,
}

impl UserRecord {
    pub fn into_user(self) -> AuthUser {
        AuthUser { id: self.id, name: self.name, email: self.email, roles: self.roles }
    }
}

/// Successful login: the user plus a freshly signed token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: Option<String>,
}

/// JWT payload shared by token minting and verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account email
    pub sub: String,
    pub uid: i32,
    pub roles: Vec<String>,
    pub exp: usize,
}

impl Claims {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}

use async_trait::async_trait;

use super::domain::UserRecord;
use super::errors::AuthError;

/// Repository abstraction for account lookup during login and token checks.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError>;
    async fn find_user_by_id(&self, id: i32) -> Result<Option<UserRecord>, AuthError>;
}

/// In-memory repository used by the service-level tests
pub mod mock {
    use super::*;
    use argon2::{
        password_hash::{PasswordHasher, SaltString},
        Argon2,
    };
    use rand::rngs::OsRng;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<Vec<UserRecord>>,
    }

    impl MockAuthRepository {
        /// Store an account with an argon2 hash of `password`.
        pub fn seed(&self, id: i32, name: &str, email: &str, password: &str, roles: &[&str]) {
            let salt = SaltString::generate(&mut OsRng);
            let hash = Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .expect("hash seed password")
                .to_string();
            self.users.lock().unwrap().push(UserRecord {
                id,
                name: name.to_string(),
                email: email.to_string(),
                roles: roles.iter().map(|r| r.to_string()).collect(),
                password_hash: hash,
            });
        }

        pub fn remove(&self, id: i32) {
            self.users.lock().unwrap().retain(|u| u.id != id);
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.email == email).cloned())
        }

        async fn find_user_by_id(&self, id: i32) -> Result<Option<UserRecord>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.id == id).cloned())
        }
    }
}

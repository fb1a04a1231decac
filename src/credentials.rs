use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use tokio::sync::RwLock;

use crate::error::AppError;

const SEED_USERS: [(&str, &str); 2] = [("admin", "senha123"), ("user", "senha123")];

#[derive(Debug, Clone)]
pub struct Credential {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Append-only set of username/password-hash pairs.
pub struct CredentialStore {
    users: RwLock<Vec<Credential>>,
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

impl CredentialStore {
    /// Store holding the two built-in accounts.
    pub fn seeded() -> Result<Self, AppError> {
        let mut users = Vec::with_capacity(SEED_USERS.len());
        for (idx, (username, password)) in SEED_USERS.iter().enumerate() {
            users.push(Credential {
                id: idx as i64 + 1,
                username: username.to_string(),
                password_hash: hash_password(password)?,
            });
        }

        Ok(Self {
            users: RwLock::new(users),
        })
    }

    pub async fn find_by_username(&self, username: &str) -> Option<Credential> {
        self.users
            .read()
            .await
            .iter()
            .find(|c| c.username == username)
            .cloned()
    }

    /// Returns the credential id when `password` matches the stored hash.
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<i64> {
        let credential = self.find_by_username(username).await?;

        // argon2 verification compares in constant time
        let parsed = match PasswordHash::new(&credential.password_hash) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(username, error = %e, "stored password hash is unparsable");
                return None;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .ok()
            .map(|_| credential.id)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<Credential, AppError> {
        let password_hash = hash_password(password)?;

        let mut users = self.users.write().await;
        if users.iter().any(|c| c.username == username) {
            return Err(AppError::conflict("username already exists"));
        }

        let credential = Credential {
            id: users.len() as i64 + 1,
            username: username.to_string(),
            password_hash,
        };
        users.push(credential.clone());

        Ok(credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_accounts_authenticate() {
        let store = CredentialStore::seeded().unwrap();

        assert_eq!(store.authenticate("admin", "senha123").await, Some(1));
        assert_eq!(store.authenticate("user", "senha123").await, Some(2));
        assert_eq!(store.authenticate("admin", "wrong").await, None);
        assert_eq!(store.authenticate("nobody", "senha123").await, None);
    }

    #[tokio::test]
    async fn test_seeded_hashes_are_not_plaintext() {
        let store = CredentialStore::seeded().unwrap();
        let admin = store.find_by_username("admin").await.unwrap();

        assert_ne!(admin.password_hash, "senha123");
        assert!(admin.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_appends_with_next_id() {
        let store = CredentialStore::seeded().unwrap();
        let created = store.register("carol", "pw").await.unwrap();

        assert_eq!(created.id, 3);
        assert_eq!(store.authenticate("carol", "pw").await, Some(3));
    }

    #[tokio::test]
    async fn test_register_duplicate_conflicts() {
        let store = CredentialStore::seeded().unwrap();
        let err = store.register("admin", "other").await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        // original password still works
        assert_eq!(store.authenticate("admin", "senha123").await, Some(1));
    }
}

//! Hashing de contraseñas con bcrypt (sal aleatoria por hash)

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::utils::errors::AppError;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.cost).map_err(|e| AppError::Hash(format!("Error hasheando contraseña: {}", e)))
    }

    /// Un hash almacenado corrupto es un error interno, no un login fallido
    pub fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AppError> {
        verify(password, password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando contraseña: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(4);
        let hashed = hasher.hash("s3cret!").unwrap();

        assert_ne!(hashed, "s3cret!");
        assert!(hasher.verify("s3cret!", &hashed).unwrap());
        assert!(!hasher.verify("wrong", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = PasswordHasher::new(4);
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_an_error() {
        let hasher = PasswordHasher::new(4);
        assert!(matches!(hasher.verify("x", "not-a-bcrypt-hash"), Err(AppError::Hash(_))));
    }
}

use argon2::{
    Argon2,
    PasswordHash,
    PasswordHasher,
    PasswordVerifier,
    password_hash::{Error as PasswordHashError, SaltString},
};
use domain::DomainError;
use rand_core::OsRng;

/// 生成带随机盐的 Argon2id 哈希。
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| DomainError::Internal(err.to_string()))?;
    Ok(hash.to_string())
}

/// 校验口令；口令不匹配返回 `Ok(false)`，哈希损坏返回错误。
pub fn verify_password(stored_password_hash: &str, password: &str) -> Result<bool, DomainError> {
    let parsed = PasswordHash::new(stored_password_hash)
        .map_err(|err| DomainError::Internal(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(err) => Err(DomainError::Internal(err.to_string())),
    }
}

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::Rng;

use crate::types::internal::Principal;

/// Hash a password with Argon2id and a fresh salt
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

/// Verify a password against a PHC-format hash
pub fn verify_hash(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Whether stored credential material is a PHC-format hash
pub fn is_phc_hash(stored: &str) -> bool {
    PasswordHash::new(stored).is_ok()
}

/// Verify a supplied password against a principal's stored credential.
///
/// User credentials are always hashed. Clinic credentials are hashed for
/// migrated rows; legacy rows still hold plaintext and are compared by
/// direct string equality. The plaintext path is a known defect kept for
/// compatibility with existing clinic accounts until they are migrated.
pub fn verify_principal_password(principal: &Principal, supplied: &str) -> bool {
    match principal {
        Principal::User(_) => verify_hash(supplied, principal.stored_credential()),
        Principal::Clinic(_) => {
            let stored = principal.stored_credential();
            if is_phc_hash(stored) {
                verify_hash(supplied, stored)
            } else {
                stored == supplied
            }
        }
    }
}

/// Generate the random numeric password assigned to accounts created
/// through federated login. The value is never shown to the user; it only
/// exists so the account has credential material to hash.
pub fn generate_numeric_password() -> String {
    let mut rng = rand::rng();
    rng.random_range(0..100_000_000u32).to_string()
}

use bcrypt::{hash, verify};

/// Fixed bcrypt cost factor for every stored credential.
const BCRYPT_COST: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(bcrypt::BcryptError),
    #[error("Password verification failed: {0}")]
    VerificationFailed(bcrypt::BcryptError),
}

pub struct PasswordManager;

impl PasswordManager {
    pub fn hash(senha: &str) -> Result<String, PasswordError> {
        hash(senha, BCRYPT_COST).map_err(PasswordError::HashingFailed)
    }

    pub fn verify(senha: &str, hash: &str) -> Result<bool, PasswordError> {
        verify(senha, hash).map_err(PasswordError::VerificationFailed)
    }

    /// Minimum password rule shared by account creation and the reset flow:
    /// at least 8 characters mixing upper case, lower case and digits.
    pub fn is_strong(senha: &str) -> bool {
        if senha.len() < 8 {
            return false;
        }
        let (mut upper, mut lower, mut digit) = (false, false, false);
        for c in senha.chars() {
            upper |= c.is_uppercase();
            lower |= c.is_lowercase();
            digit |= c.is_ascii_digit();
            if upper && lower && digit {
                return true;
            }
        }
        upper && lower && digit
    }
}

#[cfg(test)]
mod tests {
    use super::PasswordManager;

    #[test]
    fn verify_returns_true_when_password_matches() {
        let senha = "Senha_segura123";
        let hashed = PasswordManager::hash(senha).expect("Hashing failed");

        assert!(PasswordManager::verify(senha, &hashed).expect("Verification failed"));
    }

    #[test]
    fn verify_returns_false_when_password_does_not_match() {
        let senha = "Senha_segura123";
        let hashed = PasswordManager::hash(senha).expect("Hashing failed");

        assert!(!PasswordManager::verify("Senha_errada456", &hashed).expect("Verification failed"));
    }

    #[test]
    fn hash_embeds_the_fixed_cost() {
        let hashed = PasswordManager::hash("Senha_segura123").expect("Hashing failed");

        assert!(
            hashed.starts_with("$2b$10$") || hashed.starts_with("$2a$10$"),
            "Hash should carry cost 10: {hashed}"
        );
    }

    #[test]
    fn verify_fails_when_case_differs() {
        let hash = PasswordManager::hash("MinhaSenha1").unwrap();

        let result = PasswordManager::verify("minhasenha1", &hash);

        assert!(result.is_ok());
        assert!(!result.unwrap());
    }

    #[test]
    fn is_strong_accepts_mixed_eight_chars() {
        assert!(PasswordManager::is_strong("Abcdef12"));
        assert!(PasswordManager::is_strong("SenhaForte99"));
    }

    #[test]
    fn is_strong_rejects_weak_passwords() {
        assert!(!PasswordManager::is_strong("curta1A"));
        assert!(!PasswordManager::is_strong("semnumeros"));
        assert!(!PasswordManager::is_strong("SEMMINUSCULA1"));
        assert!(!PasswordManager::is_strong("12345678"));
    }
}

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};
use vouch_core::Password;

// Argon2id, 15 MiB, 2 passes, 1 lane.
fn hasher() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
pub async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Password,
) -> Result<(), String> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash: PasswordHash<'_> =
                PasswordHash::new(expected_password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            hasher()?
                .verify_password(
                    password_candidate.as_ref().expose_secret().as_bytes(),
                    &expected_password_hash,
                )
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
pub async fn compute_password_hash(password: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            hasher()?
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(raw: &str) -> Password {
        Password::try_from(Secret::from(raw.to_owned())).unwrap()
    }

    #[tokio::test]
    async fn test_hash_is_phc_argon2id() {
        let hash = compute_password_hash(password("correct horse")).await.unwrap();
        assert!(hash.expose_secret().starts_with("$argon2id$"));
        assert!(!hash.expose_secret().contains("correct horse"));
    }

    #[tokio::test]
    async fn test_verification_accepts_only_the_original_password() {
        let hash = compute_password_hash(password("correct horse")).await.unwrap();

        assert!(
            verify_password_hash(hash.clone(), password("correct horse"))
                .await
                .is_ok()
        );
        assert!(
            verify_password_hash(hash, password("wrong horse"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_password_salts_are_random() {
        let first = compute_password_hash(password("same password")).await.unwrap();
        let second = compute_password_hash(password("same password")).await.unwrap();
        assert_ne!(first.expose_secret(), second.expose_secret());
    }

    #[tokio::test]
    async fn test_garbage_hash_is_rejected() {
        let result =
            verify_password_hash(Secret::from("not a hash".to_owned()), password("whatever1")).await;
        assert!(result.is_err());
    }
}

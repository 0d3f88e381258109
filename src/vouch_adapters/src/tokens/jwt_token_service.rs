use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vouch_core::{
    SignedToken, TokenClaims, TokenError, TokenPurpose, TokenService, TokenTtl, UserId,
};

#[derive(Clone)]
pub struct TokenConfig {
    pub secret: Secret<String>,
    /// Previous signing key, accepted for verification only while rotating.
    pub retired_secret: Option<Secret<String>>,
}

impl TokenConfig {
    pub fn new(secret: Secret<String>) -> Self {
        Self {
            secret,
            retired_secret: None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenConfigError {
    #[error("Token secret must not be empty")]
    EmptySecret,
}

/// HS256-signed compact JWS tokens carrying subject, purpose, issue and expiry times.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    // Current key first, then the retired key if any.
    decoding_keys: Vec<DecodingKey>,
    validation: Validation,
}

impl JwtTokenService {
    pub fn new(config: &TokenConfig) -> Result<Self, TokenConfigError> {
        let secret = non_empty(&config.secret)?;

        let mut decoding_keys = vec![DecodingKey::from_secret(secret)];
        if let Some(retired) = &config.retired_secret {
            decoding_keys.push(DecodingKey::from_secret(non_empty(retired)?));
        }

        // Expiry is checked against the caller's clock in `decode_at`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_keys,
            validation,
        })
    }

    #[tracing::instrument(name = "JwtTokenService::issue", skip(self))]
    pub fn issue_at(
        &self,
        subject: UserId,
        purpose: TokenPurpose,
        ttl: TokenTtl,
        issued_at: DateTime<Utc>,
    ) -> Result<SignedToken, TokenError> {
        let claims = JwtClaims::from(&TokenClaims::new(subject, purpose, issued_at, ttl));

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(SignedToken::from)
            .map_err(|e| TokenError::Unexpected(e.to_string()))
    }

    #[tracing::instrument(name = "JwtTokenService::decode", skip(self, token))]
    pub fn decode_at(
        &self,
        token: &str,
        expected: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, TokenError> {
        let claims = self.decode_signed(token)?.into_claims()?;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        if claims.purpose != expected {
            return Err(TokenError::PurposeMismatch {
                expected,
                found: claims.purpose,
            });
        }

        Ok(claims)
    }

    // Verify the signature under each accepted key and return the raw claims.
    fn decode_signed(&self, token: &str) -> Result<JwtClaims, TokenError> {
        for key in &self.decoding_keys {
            match decode::<JwtClaims>(token, key, &self.validation) {
                Ok(data) => return Ok(data.claims),
                Err(e) => match classify(&e) {
                    TokenError::BadSignature => continue,
                    other => return Err(other),
                },
            }
        }

        Err(TokenError::BadSignature)
    }
}

impl TokenService for JwtTokenService {
    fn issue(
        &self,
        subject: UserId,
        purpose: TokenPurpose,
        ttl: TokenTtl,
    ) -> Result<SignedToken, TokenError> {
        self.issue_at(subject, purpose, ttl, Utc::now())
    }

    fn decode(&self, token: &str, expected: TokenPurpose) -> Result<TokenClaims, TokenError> {
        self.decode_at(token, expected, Utc::now())
    }
}

fn non_empty(secret: &Secret<String>) -> Result<&[u8], TokenConfigError> {
    let bytes = secret.expose_secret().as_bytes();
    if bytes.is_empty() {
        return Err(TokenConfigError::EmptySecret);
    }
    Ok(bytes)
}

fn classify(error: &jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}

// Wire form of the claims. `sub` is a string as registered JWT claims expect.
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    sub: String,
    purpose: TokenPurpose,
    iat: i64,
    exp: i64,
}

impl From<&TokenClaims> for JwtClaims {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            sub: claims.subject.to_string(),
            purpose: claims.purpose,
            iat: claims.issued_at,
            exp: claims.expires_at,
        }
    }
}

impl JwtClaims {
    fn into_claims(self) -> Result<TokenClaims, TokenError> {
        let subject = self
            .sub
            .parse::<UserId>()
            .map_err(|_| TokenError::Malformed)?;

        Ok(TokenClaims {
            subject,
            purpose: self.purpose,
            issued_at: self.iat,
            expires_at: self.exp,
        })
    }
}

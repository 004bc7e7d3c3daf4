//! Token codec implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, TokenClass};
use crate::errors::{ConfigError, DomainError, TokenError};

use super::config::TokenCodecConfig;

/// Keys and validation rules for one token class
struct ClassKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl ClassKeys {
    fn from_secret(secret: &str, issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

/// Codec for signing and verifying the two bearer token classes
///
/// Pure with respect to external state: verification is a function of
/// the token string, the class secret, and the clock. Revocation and
/// session checks live in the auth service, not here.
pub struct TokenCodec {
    access: ClassKeys,
    refresh: ClassKeys,
    config: TokenCodecConfig,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Creates a new codec from its configuration
    pub fn new(config: TokenCodecConfig) -> Result<Self, DomainError> {
        if config.access_secret.is_empty() {
            return Err(ConfigError::MissingSecret {
                name: "ACCESS_TOKEN_SECRET".to_string(),
            }
            .into());
        }
        if config.refresh_secret.is_empty() {
            return Err(ConfigError::MissingSecret {
                name: "REFRESH_TOKEN_SECRET".to_string(),
            }
            .into());
        }

        Ok(Self {
            access: ClassKeys::from_secret(&config.access_secret, &config.issuer, &config.audience),
            refresh: ClassKeys::from_secret(
                &config.refresh_secret,
                &config.issuer,
                &config.audience,
            ),
            config,
        })
    }

    /// Issues a signed access token for the subject
    pub fn issue_access_token(&self, subject: &str, role: &str) -> Result<String, DomainError> {
        let claims = self.build_claims(subject, role, TokenClass::Access);
        self.encode_jwt(&claims)
    }

    /// Issues a signed refresh token for the subject
    pub fn issue_refresh_token(&self, subject: &str, role: &str) -> Result<String, DomainError> {
        let claims = self.build_claims(subject, role, TokenClass::Refresh);
        self.encode_jwt(&claims)
    }

    /// Verifies an access token and returns its claims
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify(token, TokenClass::Access)
    }

    /// Verifies a refresh token and returns its claims
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify(token, TokenClass::Refresh)
    }

    /// Decodes claims without verifying the signature
    ///
    /// For diagnostics and logging only. Never use the result for an
    /// authorization decision.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .ok()
    }

    /// Access token lifetime in seconds
    pub fn access_ttl_seconds(&self) -> i64 {
        self.config.access_ttl_seconds
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.config.refresh_ttl_seconds
    }

    fn build_claims(&self, subject: &str, role: &str, class: TokenClass) -> Claims {
        let ttl = match class {
            TokenClass::Access => self.config.access_ttl_seconds,
            TokenClass::Refresh => self.config.refresh_ttl_seconds,
        };
        let mut claims = Claims::new(subject, role, class, ttl);
        claims.iss = self.config.issuer.clone();
        claims.aud = self.config.audience.clone();
        claims
    }

    fn keys_for(&self, class: TokenClass) -> &ClassKeys {
        match class {
            TokenClass::Access => &self.access,
            TokenClass::Refresh => &self.refresh,
        }
    }

    /// Encodes claims into a JWT using the secret of the claims' class
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.keys_for(claims.cls).encoding)
            .map_err(|_| TokenError::TokenGenerationFailed.into())
    }

    fn verify(&self, token: &str, class: TokenClass) -> Result<Claims, DomainError> {
        let keys = self.keys_for(class);
        let token_data = decode::<Claims>(token, &keys.decoding, &keys.validation).map_err(|e| {
            DomainError::Token(match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::InvalidTokenFormat,
            })
        })?;

        // Secrets differ per class, but a shared or misconfigured secret
        // must still not let one class stand in for the other.
        if token_data.claims.cls != class {
            return Err(TokenError::WrongClass {
                expected: class.as_str().to_string(),
            }
            .into());
        }

        Ok(token_data.claims)
    }
}

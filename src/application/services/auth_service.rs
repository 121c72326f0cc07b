//! Credential issuance, verification, and per-request identity resolution.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::domain::entities::{NewUser, User};
use crate::domain::identity::Identity;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Prefix identifying the password hash scheme in stored credentials.
const HASH_SCHEME: &str = "hmac-sha256";

/// Salt length in bytes for password hashing.
const SALT_LENGTH_BYTES: usize = 16;

/// Signed token claims.
///
/// Tokens are issued without an expiry and there is no revocation list: a
/// token stays valid until the signing secret rotates. `exp` is still
/// honored when present so the format admits expiring tokens later.
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sub: i64,
    iat: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Token verification failures.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Malformed structure or signature mismatch.
    #[error("invalid token")]
    Invalid,
    /// The token carries an `exp` claim that has passed.
    #[error("expired token")]
    Expired,
}

/// Service for credential issuance and identity resolution.
///
/// Tokens are signed with HMAC-SHA256 keyed by the process-wide
/// `signing_secret`; passwords are stored as salted iterated HMAC-SHA256
/// digests with a configurable work factor. The secret is read-only after
/// construction.
pub struct AuthService<U: UserRepository> {
    users: Arc<U>,
    signing_secret: String,
    hash_iterations: u32,
}

impl<U: UserRepository> AuthService<U> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - user repository for account lookups
    /// - `signing_secret` - HMAC key for token signatures; must be stable
    ///   across restarts or every outstanding token is invalidated
    /// - `hash_iterations` - password hashing work factor
    pub fn new(users: Arc<U>, signing_secret: String, hash_iterations: u32) -> Self {
        Self {
            users,
            signing_secret,
            hash_iterations,
        }
    }

    // ── Tokens ──────────────────────────────────────────────────────────────

    /// Issues a signed token for a user id.
    ///
    /// The token is `base64url(claims) "." base64url(mac)`; stateless, never
    /// persisted, never revoked.
    pub fn issue_token(&self, user_id: i64) -> String {
        let claims = TokenClaims {
            sub: user_id,
            iat: chrono::Utc::now().timestamp(),
            exp: None,
        };
        self.sign_claims(&claims)
    }

    fn sign_claims(&self, claims: &TokenClaims) -> String {
        let payload = serde_json::to_vec(claims).expect("claims serialize to JSON");
        let encoded = URL_SAFE_NO_PAD.encode(payload);

        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(encoded.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        format!("{encoded}.{signature}")
    }

    /// Verifies a token and returns its subject id.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] on malformed structure or signature
    /// mismatch (verified in constant time), [`TokenError::Expired`] when a
    /// present `exp` claim has passed.
    pub fn verify_token(&self, token: &str) -> Result<i64, TokenError> {
        let (encoded, signature) = token.split_once('.').ok_or(TokenError::Invalid)?;

        let signature_bytes = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::Invalid)?;

        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(encoded.as_bytes());
        mac.verify_slice(&signature_bytes)
            .map_err(|_| TokenError::Invalid)?;

        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| TokenError::Invalid)?;
        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Invalid)?;

        if let Some(exp) = claims.exp
            && exp <= chrono::Utc::now().timestamp()
        {
            return Err(TokenError::Expired);
        }

        Ok(claims.sub)
    }

    // ── Passwords ───────────────────────────────────────────────────────────

    /// Hashes a password with a fresh random salt.
    ///
    /// Encoded as `hmac-sha256$<iterations>$<salt hex>$<digest hex>` so the
    /// work factor can be raised without invalidating stored credentials.
    ///
    /// # Panics
    ///
    /// Panics if the system random number generator fails (extremely rare).
    pub fn hash_password(&self, password: &str) -> String {
        let mut salt = [0u8; SALT_LENGTH_BYTES];
        getrandom::fill(&mut salt).expect("Failed to generate random bytes");

        let digest = derive_digest(password, &salt, self.hash_iterations);

        format!(
            "{HASH_SCHEME}${}${}${}",
            self.hash_iterations,
            hex::encode(salt),
            hex::encode(digest)
        )
    }

    /// Verifies a password against a stored hash.
    ///
    /// Comparison is constant-time with respect to the stored digest; any
    /// parse failure of the stored value verifies as false.
    pub fn verify_password(&self, password: &str, stored: &str) -> bool {
        let mut parts = stored.split('$');
        let (Some(scheme), Some(iterations), Some(salt), Some(digest), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return false;
        };

        if scheme != HASH_SCHEME {
            return false;
        }
        let Ok(iterations) = iterations.parse::<u32>() else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (hex::decode(salt), hex::decode(digest)) else {
            return false;
        };

        let computed = derive_digest(password, &salt, iterations);
        computed.as_slice().ct_eq(expected.as_slice()).into()
    }

    // ── Account operations ──────────────────────────────────────────────────

    /// Registers a new user and issues their first token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn signup(
        &self,
        email: String,
        password: &str,
        name: String,
    ) -> Result<(String, User), AppError> {
        let password_hash = self.hash_password(password);

        let user = self
            .users
            .create(NewUser {
                email: email.clone(),
                name,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => AppError::conflict(
                    "Email is already registered",
                    json!({ "email": email }),
                ),
                other => other,
            })?;

        let token = self.issue_token(user.id);
        Ok((token, user))
    }

    /// Authenticates by email and password, issuing a fresh token.
    ///
    /// Unknown email and wrong password fail identically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on invalid credentials.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        let invalid_credentials = || {
            AppError::unauthorized(
                "Invalid email or password",
                json!({ "reason": "Invalid credentials" }),
            )
        };

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !self.verify_password(password, &user.password_hash) {
            return Err(invalid_credentials());
        }

        let token = self.issue_token(user.id);
        Ok((token, user))
    }

    // ── Identity resolution ─────────────────────────────────────────────────

    /// Resolves an optional bearer token to a request identity.
    ///
    /// Resolution is soft: a missing, malformed, or unverifiable token (and
    /// a verified token whose subject no longer exists) resolves to
    /// [`Identity::Anonymous`]. Authentication failures surface later at the
    /// operation boundary, not here.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only when the user lookup itself
    /// fails; that is fatal for the request.
    pub async fn resolve_bearer(&self, bearer: Option<&str>) -> Result<Identity, AppError> {
        let Some(token) = bearer else {
            return Ok(Identity::Anonymous);
        };

        let user_id = match self.verify_token(token) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(error = %e, "Bearer token rejected, continuing as anonymous");
                return Ok(Identity::Anonymous);
            }
        };

        match self.users.find_by_id(user_id).await? {
            Some(user) => Ok(Identity::Authenticated(user)),
            None => {
                tracing::debug!(user_id, "Token subject no longer exists");
                Ok(Identity::Anonymous)
            }
        }
    }
}

/// Salted iterated HMAC-SHA256 digest keyed by the password.
fn derive_digest(password: &str, salt: &[u8], iterations: u32) -> [u8; 32] {
    let mut mac =
        HmacSha256::new_from_slice(password.as_bytes()).expect("HMAC accepts any key length");
    mac.update(salt);
    let mut digest = mac.finalize().into_bytes();

    for _ in 1..iterations {
        let mut mac =
            HmacSha256::new_from_slice(password.as_bytes()).expect("HMAC accepts any key length");
        mac.update(&digest);
        digest = mac.finalize().into_bytes();
    }

    digest.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;

    const TEST_ITERATIONS: u32 = 1_000;

    fn service(users: MockUserRepository) -> AuthService<MockUserRepository> {
        AuthService::new(Arc::new(users), "test-signing-secret".to_string(), TEST_ITERATIONS)
    }

    fn test_user(id: i64, email: &str, password_hash: String) -> User {
        User::new(
            id,
            email.to_string(),
            "A".to_string(),
            password_hash,
            Utc::now(),
        )
    }

    #[test]
    fn test_token_round_trip() {
        let svc = service(MockUserRepository::new());

        let token = svc.issue_token(42);
        assert_eq!(svc.verify_token(&token).unwrap(), 42);
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let svc = service(MockUserRepository::new());
        let token = svc.issue_token(42);

        let (payload, signature) = token.split_once('.').unwrap();
        let mut bytes = payload.as_bytes().to_vec();
        bytes[0] ^= 1;
        let tampered = format!("{}.{signature}", String::from_utf8(bytes).unwrap());

        assert_eq!(svc.verify_token(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tampered_signature_is_invalid() {
        let svc = service(MockUserRepository::new());
        let token = svc.issue_token(42);

        let (payload, signature) = token.split_once('.').unwrap();
        let flipped: String = signature
            .chars()
            .map(|c| if c == 'A' { 'B' } else { 'A' })
            .collect();
        let tampered = format!("{payload}.{flipped}");

        assert_eq!(svc.verify_token(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let svc = service(MockUserRepository::new());

        assert_eq!(svc.verify_token(""), Err(TokenError::Invalid));
        assert_eq!(svc.verify_token("no-dot-here"), Err(TokenError::Invalid));
        assert_eq!(svc.verify_token("a.b.c"), Err(TokenError::Invalid));
        assert_eq!(svc.verify_token("!!!.???"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let issuing = AuthService::new(
            Arc::new(MockUserRepository::new()),
            "secret-a".to_string(),
            TEST_ITERATIONS,
        );
        let verifying = AuthService::new(
            Arc::new(MockUserRepository::new()),
            "secret-b".to_string(),
            TEST_ITERATIONS,
        );

        let token = issuing.issue_token(42);
        assert_eq!(verifying.verify_token(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_claim_is_honored() {
        let svc = service(MockUserRepository::new());

        let expired = svc.sign_claims(&TokenClaims {
            sub: 42,
            iat: Utc::now().timestamp() - 7200,
            exp: Some(Utc::now().timestamp() - 3600),
        });
        assert_eq!(svc.verify_token(&expired), Err(TokenError::Expired));

        let live = svc.sign_claims(&TokenClaims {
            sub: 42,
            iat: Utc::now().timestamp(),
            exp: Some(Utc::now().timestamp() + 3600),
        });
        assert_eq!(svc.verify_token(&live).unwrap(), 42);
    }

    #[test]
    fn test_issued_tokens_never_expire() {
        let svc = service(MockUserRepository::new());
        let token = svc.issue_token(42);

        let (payload, _) = token.split_once('.').unwrap();
        let claims: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
        assert!(claims.get("exp").is_none());
    }

    #[test]
    fn test_password_hash_round_trip() {
        let svc = service(MockUserRepository::new());

        let stored = svc.hash_password("pw");
        assert!(svc.verify_password("pw", &stored));
        assert!(!svc.verify_password("wrong", &stored));
    }

    #[test]
    fn test_password_hashes_are_salted() {
        let svc = service(MockUserRepository::new());

        // Same password, different salt, different digest.
        assert_ne!(svc.hash_password("pw"), svc.hash_password("pw"));
    }

    #[test]
    fn test_password_hash_records_work_factor() {
        let svc = service(MockUserRepository::new());

        let stored = svc.hash_password("pw");
        let mut parts = stored.split('$');
        assert_eq!(parts.next(), Some(HASH_SCHEME));
        assert_eq!(parts.next(), Some("1000"));
    }

    #[test]
    fn test_malformed_stored_hash_verifies_false() {
        let svc = service(MockUserRepository::new());

        assert!(!svc.verify_password("pw", ""));
        assert!(!svc.verify_password("pw", "plaintext"));
        assert!(!svc.verify_password("pw", "other-scheme$1000$c2FsdA$aGFzaA"));
        assert!(!svc.verify_password("pw", "hmac-sha256$abc$c2FsdA$aGFzaA"));
        assert!(!svc.verify_password("pw", "hmac-sha256$1000$!!$aGFzaA"));
    }

    #[tokio::test]
    async fn test_signup_issues_token_for_created_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .withf(|new_user| {
                new_user.email == "a@x.com"
                    && new_user.name == "A"
                    && new_user.password_hash.starts_with("hmac-sha256$")
            })
            .times(1)
            .returning(|new_user| {
                Ok(test_user(7, &new_user.email, new_user.password_hash))
            });

        let svc = service(users);
        let (token, user) = svc
            .signup("a@x.com".to_string(), "pw", "A".to_string())
            .await
            .unwrap();

        assert_eq!(user.email, "a@x.com");
        assert_eq!(svc.verify_token(&token).unwrap(), 7);
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_is_conflict() {
        let mut users = MockUserRepository::new();
        users.expect_create().times(1).returning(|_| {
            Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_email_key" }),
            ))
        });

        let svc = service(users);
        let err = svc
            .signup("a@x.com".to_string(), "pw", "A".to_string())
            .await
            .unwrap_err();

        match err {
            AppError::Conflict { message, .. } => {
                assert_eq!(message, "Email is already registered");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_success_token_resolves_to_same_user() {
        let svc = service(MockUserRepository::new());
        let stored = svc.hash_password("pw");

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(move |_| Ok(Some(test_user(7, "a@x.com", stored.clone()))));

        let svc = service(users);
        let (token, user) = svc.login("a@x.com", "pw").await.unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(svc.verify_token(&token).unwrap(), 7);
    }

    #[tokio::test]
    async fn test_login_wrong_password_fails() {
        let svc = service(MockUserRepository::new());
        let stored = svc.hash_password("pw");

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(test_user(7, "a@x.com", stored.clone()))));

        let svc = service(users);
        let err = svc.login("a@x.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_login_unknown_email_fails_identically() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().times(1).returning(|_| Ok(None));

        let svc = service(users);
        let err = svc.login("nobody@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_resolve_no_bearer_is_anonymous() {
        let svc = service(MockUserRepository::new());

        let identity = svc.resolve_bearer(None).await.unwrap();
        assert!(identity.is_anonymous());
    }

    #[tokio::test]
    async fn test_resolve_garbage_bearer_is_anonymous_not_error() {
        let svc = service(MockUserRepository::new());

        let identity = svc.resolve_bearer(Some("not-a-token")).await.unwrap();
        assert!(identity.is_anonymous());
    }

    #[tokio::test]
    async fn test_resolve_valid_bearer_is_authenticated() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(Some(test_user(7, "a@x.com", "hash".to_string()))));

        let svc = service(users);
        let token = svc.issue_token(7);

        match svc.resolve_bearer(Some(&token)).await.unwrap() {
            Identity::Authenticated(user) => assert_eq!(user.id, 7),
            Identity::Anonymous => panic!("expected authenticated identity"),
        }
    }

    #[tokio::test]
    async fn test_resolve_stale_subject_is_anonymous() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let svc = service(users);
        let token = svc.issue_token(7);

        let identity = svc.resolve_bearer(Some(&token)).await.unwrap();
        assert!(identity.is_anonymous());
    }

    #[tokio::test]
    async fn test_resolve_store_failure_propagates() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let svc = service(users);
        let token = svc.issue_token(7);

        let err = svc.resolve_bearer(Some(&token)).await.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}

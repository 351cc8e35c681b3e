use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use tracing::info;
use validator::Validate;

use crate::dto::auth_dto::{ResetConfirmPayload, SignInPayload, SignUpPayload};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::profile::{NewProfile, Profile, Role};
use crate::store::ProfileStore;
use crate::utils::token::generate_reset_token;

const MAX_FAILED_ATTEMPTS: u32 = 5;
const ATTEMPT_WINDOW: Duration = Duration::from_secs(15 * 60);
const RESET_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);
const RESET_TOKEN_LENGTH: usize = 48;

/// The fixed set of sign-in failure codes the UI knows how to phrase.
/// Anything else falls through to the generic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthCode {
    UserNotFound,
    WrongPassword,
    TooManyAttempts,
    InvalidResetToken,
    Unexpected,
}

impl AuthCode {
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthCode::UserNotFound => "No account found with this email.",
            AuthCode::WrongPassword => "Incorrect password.",
            AuthCode::TooManyAttempts => "Too many attempts. Please wait and try again.",
            AuthCode::InvalidResetToken => "This reset link is invalid or has expired.",
            AuthCode::Unexpected => "An unexpected error occurred. Please try again.",
        }
    }

    fn into_error(self) -> Error {
        Error::Authentication(self.user_message().to_string())
    }
}

#[derive(Debug)]
struct AttemptWindow {
    start: Instant,
    count: u32,
}

#[derive(Debug)]
struct PendingReset {
    user_id: uuid::Uuid,
    issued: Instant,
}

#[derive(Clone)]
pub struct AuthService {
    profiles: Arc<dyn ProfileStore>,
    attempts: Arc<Mutex<HashMap<String, AttemptWindow>>>,
    resets: Arc<Mutex<HashMap<String, PendingReset>>>,
}

impl AuthService {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            profiles,
            attempts: Arc::new(Mutex::new(HashMap::new())),
            resets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates the profile with its sign-up defaults and opens a session.
    /// Business fields are only kept for employer accounts.
    pub async fn sign_up(&self, payload: SignUpPayload) -> Result<(String, Profile)> {
        payload.validate()?;

        let is_employer = payload.role == Role::Employer;
        let profile = self
            .profiles
            .create(NewProfile {
                display_name: payload.display_name,
                email: payload.email.to_lowercase(),
                role: payload.role,
                password_hash: hash_password(&payload.password)?,
                business_name: payload.business_name.filter(|_| is_employer),
                business_address: payload.business_address.filter(|_| is_employer),
                is_legally_registered: payload.is_legally_registered.filter(|_| is_employer),
                contact_phone: payload.contact_phone.filter(|_| is_employer),
            })
            .await?;

        info!(user_id = %profile.id, role = %profile.role, "account created");
        let token = issue_token(&profile)?;
        Ok((token, profile))
    }

    pub async fn sign_in(&self, payload: SignInPayload) -> Result<(String, Profile)> {
        payload.validate()?;
        let email = payload.email.to_lowercase();

        if self.throttled(&email) {
            return Err(AuthCode::TooManyAttempts.into_error());
        }

        let Some(profile) = self.profiles.find_by_email(&email).await? else {
            self.record_failure(&email);
            return Err(AuthCode::UserNotFound.into_error());
        };

        if !verify_password(&payload.password, &profile.password_hash) {
            self.record_failure(&email);
            return Err(AuthCode::WrongPassword.into_error());
        }

        self.clear_failures(&email);
        let token = issue_token(&profile)?;
        Ok((token, profile))
    }

    /// Sessions are stateless bearer tokens; sign-out is an acknowledgment
    /// that lets the client discard its copy.
    pub fn sign_out(&self, claims: &Claims) {
        info!(user_id = %claims.sub, "signed out");
    }

    /// Issues a short-lived reset token. Delivery is out of scope; the
    /// caller is whatever operator channel mails it onward.
    pub async fn request_password_reset(&self, email: &str) -> Result<String> {
        let Some(profile) = self.profiles.find_by_email(&email.to_lowercase()).await? else {
            return Err(AuthCode::UserNotFound.into_error());
        };

        let token = generate_reset_token(RESET_TOKEN_LENGTH);
        let mut resets = self.resets.lock().expect("reset mutex poisoned");
        resets.retain(|_, pending| pending.issued.elapsed() < RESET_TOKEN_TTL);
        resets.insert(
            token.clone(),
            PendingReset {
                user_id: profile.id,
                issued: Instant::now(),
            },
        );
        Ok(token)
    }

    pub async fn confirm_password_reset(&self, payload: ResetConfirmPayload) -> Result<()> {
        payload.validate()?;

        let user_id = {
            let mut resets = self.resets.lock().expect("reset mutex poisoned");
            match resets.remove(&payload.token) {
                Some(pending) if pending.issued.elapsed() < RESET_TOKEN_TTL => pending.user_id,
                _ => return Err(AuthCode::InvalidResetToken.into_error()),
            }
        };

        self.profiles
            .set_password_hash(user_id, hash_password(&payload.new_password)?)
            .await?;
        info!(user_id = %user_id, "password reset completed");
        Ok(())
    }

    fn throttled(&self, email: &str) -> bool {
        let mut attempts = self.attempts.lock().expect("attempt mutex poisoned");
        match attempts.get(email) {
            Some(window) if window.start.elapsed() >= ATTEMPT_WINDOW => {
                attempts.remove(email);
                false
            }
            Some(window) => window.count >= MAX_FAILED_ATTEMPTS,
            None => false,
        }
    }

    fn record_failure(&self, email: &str) {
        let mut attempts = self.attempts.lock().expect("attempt mutex poisoned");
        let window = attempts.entry(email.to_string()).or_insert(AttemptWindow {
            start: Instant::now(),
            count: 0,
        });
        if window.start.elapsed() >= ATTEMPT_WINDOW {
            window.start = Instant::now();
            window.count = 0;
        }
        window.count += 1;
    }

    fn clear_failures(&self, email: &str) {
        self.attempts
            .lock()
            .expect("attempt mutex poisoned")
            .remove(email);
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn issue_token(profile: &Profile) -> Result<String> {
    let config = crate::config::get_config();
    let expires = Utc::now() + chrono::Duration::hours(config.jwt_ttl_hours);
    let claims = Claims {
        sub: profile.id.to_string(),
        email: profile.email.clone(),
        name: Some(profile.display_name.clone()),
        role: Some(profile.role.as_str().to_string()),
        exp: expires.timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Token issuance failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryProfileStore;

    fn init_test_config() {
        std::env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
        std::env::set_var("DATABASE_URL", "postgres://localhost/unused");
        std::env::set_var("JWT_SECRET", "unit_test_secret");
        std::env::set_var("GEMINI_API_KEY", "test-key");
        std::env::set_var("PUBLIC_RPS", "100");
        std::env::set_var("ADMIN_RPS", "100");
        let _ = crate::config::init_config();
    }

    fn service() -> AuthService {
        init_test_config();
        AuthService::new(Arc::new(MemoryProfileStore::new()))
    }

    fn sign_up_payload(email: &str) -> SignUpPayload {
        SignUpPayload {
            display_name: "Ada".into(),
            email: email.into(),
            password: "correct-horse".into(),
            role: Role::Employee,
            business_name: None,
            business_address: None,
            is_legally_registered: None,
            contact_phone: None,
        }
    }

    #[tokio::test]
    async fn sign_up_then_sign_in_round_trips() {
        let svc = service();
        svc.sign_up(sign_up_payload("ada@example.com")).await.unwrap();

        let (token, profile) = svc
            .sign_in(SignInPayload {
                email: "Ada@Example.com".into(),
                password: "correct-horse".into(),
            })
            .await
            .unwrap();
        assert!(!token.is_empty());
        assert_eq!(profile.email, "ada@example.com");
    }

    #[tokio::test]
    async fn unknown_email_gets_the_no_account_message() {
        let svc = service();
        let err = svc
            .sign_in(SignInPayload {
                email: "ghost@example.com".into(),
                password: "whatever-pass".into(),
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No account found"));
    }

    #[tokio::test]
    async fn wrong_password_gets_its_own_message() {
        let svc = service();
        svc.sign_up(sign_up_payload("ada@example.com")).await.unwrap();

        let err = svc
            .sign_in(SignInPayload {
                email: "ada@example.com".into(),
                password: "not-the-password".into(),
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Incorrect password"));
    }

    #[tokio::test]
    async fn repeated_failures_throttle_the_account() {
        let svc = service();
        svc.sign_up(sign_up_payload("ada@example.com")).await.unwrap();

        for _ in 0..MAX_FAILED_ATTEMPTS {
            let _ = svc
                .sign_in(SignInPayload {
                    email: "ada@example.com".into(),
                    password: "wrong-password".into(),
                })
                .await;
        }

        let err = svc
            .sign_in(SignInPayload {
                email: "ada@example.com".into(),
                password: "correct-horse".into(),
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Too many attempts"));
    }

    #[tokio::test]
    async fn employer_fields_are_dropped_for_non_employers() {
        let svc = service();
        let mut payload = sign_up_payload("ada@example.com");
        payload.business_name = Some("Acme".into());
        let (_, profile) = svc.sign_up(payload).await.unwrap();
        assert!(profile.business_name.is_none());
    }

    #[tokio::test]
    async fn password_reset_round_trips_and_tokens_are_single_use() {
        let svc = service();
        svc.sign_up(sign_up_payload("ada@example.com")).await.unwrap();

        let token = svc.request_password_reset("ada@example.com").await.unwrap();
        svc.confirm_password_reset(ResetConfirmPayload {
            token: token.clone(),
            new_password: "brand-new-pass".into(),
        })
        .await
        .unwrap();

        let err = svc
            .confirm_password_reset(ResetConfirmPayload {
                token,
                new_password: "again-different".into(),
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("reset link"));

        svc.sign_in(SignInPayload {
            email: "ada@example.com".into(),
            password: "brand-new-pass".into(),
        })
        .await
        .unwrap();
    }

    #[test]
    fn every_known_code_has_a_fixed_message_and_a_fallback_exists() {
        assert_eq!(
            AuthCode::UserNotFound.user_message(),
            "No account found with this email."
        );
        assert_eq!(AuthCode::WrongPassword.user_message(), "Incorrect password.");
        assert!(AuthCode::TooManyAttempts.user_message().contains("Too many"));
        assert!(AuthCode::Unexpected.user_message().contains("unexpected"));
    }
}

use chrono::Duration;
use regex::Regex;

use crate::core::error::{self, Error};
use crate::store::UserStore;
use crate::types::request::{SignInData, SignUpData};
use crate::types::user::{NewUser, User};
use crate::utils::auth::TokenIssuer;
use crate::utils::hash::Hasher;
use crate::utils::validator::{self, EMAIL_PATTERN, ValidationErrors};

pub(crate) const SESSION_TTL_HOURS: i64 = 12;

#[derive(Clone)]
pub(crate) struct UserController<S, H, T> {
    store: S,
    hasher: H,
    token_issuer: T,
    session_ttl: Duration,
    email_pattern: Regex,
}

impl<S, H, T> std::fmt::Debug for UserController<S, H, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserController")
            .field("session_ttl", &self.session_ttl)
            .field("email_pattern", &self.email_pattern.as_str())
            .finish()
    }
}

impl<S: UserStore, H: Hasher, T: TokenIssuer> UserController<S, H, T> {
    pub(crate) fn new(
        store: S,
        hasher: H,
        token_issuer: T,
        session_ttl: Duration,
    ) -> Result<Self, error::ConfigError> {
        Ok(Self {
            store,
            hasher,
            token_issuer,
            session_ttl,
            email_pattern: Regex::new(EMAIL_PATTERN)?,
        })
    }

    /// Runs on the blocking pool.
    pub(crate) async fn hash(&self, secret: &str) -> Result<String, Error> {
        let hasher = self.hasher.clone();
        let secret = secret.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&secret)).await?
    }

    pub(crate) async fn verify(&self, secret: &str, stored_hash: &str) -> Result<bool, Error> {
        let hasher = self.hasher.clone();
        let secret = secret.to_owned();
        let stored_hash = stored_hash.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&secret, &stored_hash)).await?
    }

    pub(crate) fn issue_token(&self, subject_id: i64, ttl: Duration) -> Result<String, Error> {
        self.token_issuer.issue(subject_id, ttl)
    }

    pub(crate) async fn sign_up(&self, input: SignUpData) -> Result<User, Error> {
        validate_user(&self.email_pattern, &input).into_result(())?;

        let password_hash = self.hash(&input.password).await?;

        let user = self
            .store
            .insert(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "user signed up");

        Ok(user)
    }

    /// Unknown email and wrong password both yield [`Error::InvalidCredentials`].
    pub(crate) async fn sign_in(&self, input: SignInData) -> Result<String, Error> {
        let user = match self.store.find_by_email(&input.email).await {
            Ok(user) => user,
            Err(Error::NotFound) => return Err(Error::InvalidCredentials),
            Err(e) => return Err(e),
        };

        if !self.verify(&input.password, &user.password_hash).await? {
            return Err(Error::InvalidCredentials);
        }

        let token = self.issue_token(user.id, self.session_ttl)?;

        tracing::info!(user_id = user.id, "user signed in");

        Ok(token)
    }
}

fn validate_name(name: &str) -> ValidationErrors {
    ValidationErrors::new()
        .check(!name.is_empty(), "name", "must be provided")
        .check(name.len() <= 100, "name", "must not be more than 100 bytes long")
}

fn validate_password(password: &str) -> ValidationErrors {
    ValidationErrors::new()
        .check(!password.is_empty(), "password", "must be provided")
        .check(password.len() >= 8, "password", "must be at least 8 bytes long")
        .check(password.len() <= 64, "password", "must not be more than 64 bytes long")
}

fn validate_user(email_pattern: &Regex, input: &SignUpData) -> ValidationErrors {
    validate_name(&input.name)
        .merge(validator::validate_email(email_pattern, &input.email))
        .merge(validate_password(&input.password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryUserStore;
    use crate::utils::auth::JwtIssuer;
    use crate::utils::hash::BcryptHasher;
    use chrono::Utc;

    type Controller = UserController<MemoryUserStore, BcryptHasher, JwtIssuer>;

    fn controller() -> (Controller, MemoryUserStore, JwtIssuer) {
        let store = MemoryUserStore::default();
        let issuer = JwtIssuer::new("test-signing-key").unwrap();
        let controller = UserController::new(
            store.clone(),
            BcryptHasher::new(BcryptHasher::MIN_COST).unwrap(),
            issuer.clone(),
            Duration::hours(SESSION_TTL_HOURS),
        )
        .unwrap();

        (controller, store, issuer)
    }

    fn sign_up_data(name: &str, email: &str, password: &str) -> SignUpData {
        SignUpData {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    fn sign_in_data(email: &str, password: &str) -> SignInData {
        SignInData {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn sign_up_then_sign_in_end_to_end() {
        let (controller, _, issuer) = controller();

        let user = controller
            .sign_up(sign_up_data("Ann", "ann@x.com", "longpw123"))
            .await
            .unwrap();
        assert_eq!(user.email, "ann@x.com");
        assert_ne!(user.password_hash, "longpw123");

        let duplicate = controller
            .sign_up(sign_up_data("Ann", "ann@x.com", "longpw123"))
            .await;
        assert!(matches!(duplicate, Err(Error::Duplicate)));

        let token = controller
            .sign_in(sign_in_data("ann@x.com", "longpw123"))
            .await
            .unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.subject_id().unwrap(), user.id);

        let wrong = controller
            .sign_in(sign_in_data("ann@x.com", "wrongpw123"))
            .await;
        assert!(matches!(wrong, Err(Error::InvalidCredentials)));
    }

    #[tokio::test]
    async fn sign_in_failures_are_indistinguishable() {
        let (controller, _, _) = controller();
        controller
            .sign_up(sign_up_data("Ann", "ann@x.com", "longpw123"))
            .await
            .unwrap();

        let unknown = controller
            .sign_in(sign_in_data("nobody@x.com", "longpw123"))
            .await
            .unwrap_err();
        let mismatch = controller
            .sign_in(sign_in_data("ann@x.com", "not-the-password"))
            .await
            .unwrap_err();

        assert!(matches!(unknown, Error::InvalidCredentials));
        assert!(matches!(mismatch, Error::InvalidCredentials));
        assert_eq!(unknown.to_string(), mismatch.to_string());
    }

    #[tokio::test]
    async fn session_token_lasts_twelve_hours() {
        let (controller, _, issuer) = controller();
        controller
            .sign_up(sign_up_data("Ann", "ann@x.com", "longpw123"))
            .await
            .unwrap();

        let before = Utc::now().timestamp();
        let token = controller
            .sign_in(sign_in_data("ann@x.com", "longpw123"))
            .await
            .unwrap();
        let after = Utc::now().timestamp();

        let claims = issuer.verify(&token).unwrap();
        let ttl = SESSION_TTL_HOURS * 3600;
        assert!(claims.exp >= before + ttl && claims.exp <= after + ttl);
    }

    #[tokio::test]
    async fn invalid_sign_up_reports_every_field_and_persists_nothing() {
        let (controller, store, _) = controller();

        let err = controller
            .sign_up(sign_up_data("", "not-an-email", "short"))
            .await
            .unwrap_err();

        match err {
            Error::Validation(errors) => {
                assert_eq!(errors.fields(), vec!["name", "email", "password"]);
                assert_eq!(errors.message("name"), Some("must be provided"));
                assert_eq!(
                    errors.message("email"),
                    Some("must be a valid email address")
                );
                assert_eq!(
                    errors.message("password"),
                    Some("must be at least 8 bytes long")
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn length_limits_are_enforced() {
        let (controller, store, _) = controller();

        let long_name = "n".repeat(101);
        let long_password = "p".repeat(65);
        let err = controller
            .sign_up(sign_up_data(&long_name, "ann@x.com", &long_password))
            .await
            .unwrap_err();

        match err {
            Error::Validation(errors) => {
                assert_eq!(errors.fields(), vec!["name", "password"]);
                assert_eq!(
                    errors.message("password"),
                    Some("must not be more than 64 bytes long")
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store.len().await, 0);

        let boundary = controller
            .sign_up(sign_up_data(&"n".repeat(100), "ann@x.com", &"p".repeat(64)))
            .await;
        assert!(boundary.is_ok());
    }

    #[tokio::test]
    async fn hash_is_salted_per_call() {
        let (controller, _, _) = controller();

        let first = controller.hash("longpw123").await.unwrap();
        let second = controller.hash("longpw123").await.unwrap();

        assert_ne!(first, second);
        assert!(controller.verify("longpw123", &first).await.unwrap());
        assert!(controller.verify("longpw123", &second).await.unwrap());
        assert!(!controller.verify("longpw124", &first).await.unwrap());
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_an_internal_error() {
        let (controller, store, _) = controller();
        store
            .insert(NewUser {
                name: "Ann".into(),
                email: "ann@x.com".into(),
                password_hash: "plaintext-by-mistake".into(),
            })
            .await
            .unwrap();

        let err = controller
            .sign_in(sign_in_data("ann@x.com", "longpw123"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Bcrypt(_)));
    }

    #[test]
    fn issue_token_uses_requested_ttl() {
        let (controller, _, issuer) = controller();

        let token = controller.issue_token(9, Duration::minutes(5)).unwrap();
        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.sub, "9");
        assert_eq!(claims.exp - claims.iat, 300);
    }
}

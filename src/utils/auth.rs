use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::{self, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, Error};
use crate::core::state::AppState;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Claims {
    pub(crate) exp: i64,
    pub(crate) iat: i64,
    pub(crate) sub: String,
}

impl Claims {
    pub(crate) fn subject_id(&self) -> Result<i64, Error> {
        self.sub.parse().map_err(|_| Error::Unauthorized)
    }
}

/// Authenticated caller, inserted into request extensions by [`authorize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Subject(pub(crate) i64);

pub(crate) trait TokenIssuer: Clone + Send + Sync + 'static {
    fn issue(&self, subject_id: i64, ttl: Duration) -> Result<String, Error>;

    fn verify(&self, token: &str) -> Result<Claims, Error>;
}

/// HS256 tokens signed with a process-wide secret.
#[derive(Clone)]
pub(crate) struct JwtIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIssuer").finish_non_exhaustive()
    }
}

impl JwtIssuer {
    pub(crate) fn new(secret: &str) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::EmptySigningKey);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }
}

impl TokenIssuer for JwtIssuer {
    fn issue(&self, subject_id: i64, ttl: Duration) -> Result<String, Error> {
        let current_time = Utc::now();
        let expiration_time = current_time + ttl;

        let claims = Claims {
            exp: expiration_time.timestamp(),
            iat: current_time.timestamp(),
            sub: subject_id.to_string(),
        };

        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    fn verify(&self, token: &str) -> Result<Claims, Error> {
        match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(token_data) => Ok(token_data.claims),
            Err(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(Error::ExpiredJWT),
                _ => {
                    tracing::debug!(error = %e, "rejected bearer token");
                    Err(Error::Unauthorized)
                }
            },
        }
    }
}

pub(crate) async fn authorize(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or(Error::NoCredentials)?;

    let mut header = auth_header.to_str()?.split_whitespace();

    let token = match (header.next(), header.next(), header.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => token,
        _ => return Err(Error::Unauthorized),
    };

    let claims = state.token_issuer.verify(token)?;
    let subject = Subject(claims.subject_id()?);

    request.extensions_mut().insert(subject);

    Ok(next.run(request).await)
}

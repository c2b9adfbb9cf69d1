//! [`Command`] for authorizing a user [`Session`].

use derive_more::{Display, Error, From};
use jsonwebtoken::{Algorithm, Validation};
use tracerr::Traced;

use crate::{
    domain::user::{session, Session},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a user [`Session`] issued by the identity
/// provider.
#[derive(Clone, Debug, From)]
pub struct AuthorizeSession {
    /// [`Session`] token to authorize.
    pub token: session::Token,
}

impl<Db, Ml, Rp> Command<AuthorizeSession> for Service<Db, Ml, Rp> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeSession { token } = cmd;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config().jwt_audience]);

        Ok(jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config().jwt_decoding_key,
            &validation,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?
        .claims)
    }
}

/// Error of [`AuthorizeSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),
}

#[cfg(test)]
mod spec {
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use crate::{command::Command as _, domain::user::session, spec};

    use super::AuthorizeSession;

    fn token(secret: &[u8], aud: &str, exp: i64) -> session::Token {
        let claims = json!({
            "sub": "5f0c7c8e-54a8-4a4e-9f4e-6f1d2a0c7b11",
            "email": "owner@example.com",
            "aud": aud,
            "exp": exp,
        });
        session::Token::new_unverified(
            jsonwebtoken::encode(
                &Header::default(),
                &claims,
                &EncodingKey::from_secret(secret),
            )
            .unwrap(),
        )
    }

    fn in_an_hour() -> i64 {
        time::OffsetDateTime::now_utc().unix_timestamp() + 3600
    }

    #[tokio::test]
    async fn accepts_valid_token() {
        let svc = spec::service();

        let session = svc
            .execute(AuthorizeSession {
                token: token(spec::JWT_SECRET, "authenticated", in_an_hour()),
            })
            .await
            .unwrap();

        assert_eq!(
            session.user_id.to_string(),
            "5f0c7c8e-54a8-4a4e-9f4e-6f1d2a0c7b11",
        );
        assert_eq!(session.email.unwrap().to_string(), "owner@example.com");
    }

    #[tokio::test]
    async fn rejects_invalid_tokens() {
        let svc = spec::service();

        for token in [
            token(b"other-secret", "authenticated", in_an_hour()),
            token(spec::JWT_SECRET, "anon", in_an_hour()),
            token(spec::JWT_SECRET, "authenticated", in_an_hour() - 7200),
            session::Token::new_unverified("garbage".into()),
        ] {
            assert!(svc.execute(AuthorizeSession { token }).await.is_err());
        }
    }
}

//! Account API handlers.
//!
//! ```text
//! POST /api/auth/signup {"email":"ada@example.com","password":"…"}
//! POST /api/auth/login  (form: username=ada@example.com&password=…)
//! ```
//!
//! Login takes form data with the email in the `username` field, mirroring
//! the OAuth2 password-grant shape browsers and CLI clients already speak.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::auth::{CredentialValidationError, LoginCredentials, SignupCredentials};
use crate::domain::{AuthSession, Error};

use super::ApiResult;
use super::state::HttpState;

/// Signup request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    /// Login name and author identity.
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
}

/// Login form body (OAuth2 password-grant field names).
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginForm {
    /// The account email.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Token envelope returned by both signup and login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenEnvelope {
    /// Signed bearer token.
    pub access_token: String,
    /// Email echoed back to the client.
    pub email: String,
    /// Always `bearer`.
    pub token_type: String,
}

impl From<AuthSession> for TokenEnvelope {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.access_token,
            email: session.email,
            token_type: "bearer".to_owned(),
        }
    }
}

fn map_signup_validation_error(err: CredentialValidationError) -> Error {
    match err {
        CredentialValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
        CredentialValidationError::Email(email_err) => {
            Error::invalid_request(email_err.to_string())
                .with_details(json!({ "field": "email", "code": "invalid_email" }))
        }
    }
}

/// Register a new account and issue its first bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = TokenEnvelope),
        (status = 400, description = "Invalid payload or email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<TokenEnvelope>> {
    let payload = payload.into_inner();
    let credentials = SignupCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_signup_validation_error)?;
    let session = state.auth.signup(credentials).await?;
    Ok(web::Json(session.into()))
}

/// Authenticate an existing account and issue a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login success", body = TokenEnvelope),
        (status = 401, description = "Incorrect email or password", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    form: web::Form<LoginForm>,
) -> ApiResult<web::Json<TokenEnvelope>> {
    let form = form.into_inner();
    // Empty fields get the same answer as wrong ones; the login path never
    // explains which part of the credential failed.
    let credentials = LoginCredentials::try_from_parts(&form.username, &form.password)
        .map_err(|_| Error::unauthorized("Incorrect email or password"))?;
    let session = state.auth.login(credentials).await?;
    Ok(web::Json(session.into()))
}

#[cfg(test)]
mod tests {
    //! Handler coverage against in-memory state.
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, web};

    use super::*;
    use crate::test_support::{build_test_app, memory_state};

    async fn signup_response(
        email: &str,
        password: &str,
    ) -> (StatusCode, serde_json::Value) {
        let app = actix_test::init_service(build_test_app(web::Data::new(memory_state()))).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(SignupRequest {
                email: email.into(),
                password: password.into(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        let status = response.status();
        let body = actix_test::read_body_json(response).await;
        (status, body)
    }

    #[actix_web::test]
    async fn signup_returns_a_bearer_envelope() {
        let (status, body) = signup_response("ada@example.com", "hunter2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["token_type"], "bearer");
        assert!(
            body["access_token"]
                .as_str()
                .is_some_and(|token| !token.is_empty())
        );
    }

    #[actix_web::test]
    async fn signup_rejects_malformed_email() {
        let (status, body) = signup_response("not-an-email", "hunter2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "email");
    }

    #[actix_web::test]
    async fn signup_rejects_empty_password() {
        let (status, body) = signup_response("ada@example.com", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "password");
    }

    #[actix_web::test]
    async fn duplicate_signup_is_a_bad_request() {
        let state = web::Data::new(memory_state());
        let app = actix_test::init_service(build_test_app(state)).await;

        for expected in [StatusCode::OK, StatusCode::BAD_REQUEST] {
            let request = actix_test::TestRequest::post()
                .uri("/api/auth/signup")
                .set_json(SignupRequest {
                    email: "ada@example.com".into(),
                    password: "hunter2".into(),
                })
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), expected);
        }
    }

    #[actix_web::test]
    async fn login_round_trips_form_credentials() {
        let state = web::Data::new(memory_state());
        let app = actix_test::init_service(build_test_app(state)).await;

        let signup_request = actix_test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(SignupRequest {
                email: "ada@example.com".into(),
                password: "hunter2".into(),
            })
            .to_request();
        assert!(actix_test::call_service(&app, signup_request).await.status().is_success());

        let login_request = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_form(LoginForm {
                username: "ada@example.com".into(),
                password: "hunter2".into(),
            })
            .to_request();
        let response = actix_test::call_service(&app, login_request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(body["email"], "ada@example.com");
    }

    #[actix_web::test]
    async fn bad_credentials_are_unauthorized() {
        let state = web::Data::new(memory_state());
        let app = actix_test::init_service(build_test_app(state)).await;

        let login_request = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_form(LoginForm {
                username: "ghost@example.com".into(),
                password: "whatever".into(),
            })
            .to_request();
        let response = actix_test::call_service(&app, login_request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

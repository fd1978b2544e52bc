//! Email/password authentication endpoints.
//!
//! ```text
//! POST /api/auth/sign-up/email {"name":"Ada","email":"ada@example.com","password":"…"}
//! POST /api/auth/sign-in/email {"email":"ada@example.com","password":"…"}
//! POST /api/auth/sign-out
//! GET  /api/auth/get-session
//! ```
//!
//! Successful sign-up and sign-in set the `auth_session` cookie; sign-out
//! expires it together with the legacy cookie name.

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::AuthOutcome;
use crate::domain::{CredentialValidationError, Error, SignInCredentials, SignUpDetails, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::{
    Authenticated, SessionCookies, client_metadata, expired_session_cookies, session_cookie,
};
use crate::inbound::http::settings::SuccessResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_format_error, invalid_length_error, missing_field_error,
};

/// Sign-up request body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery")]
    pub password: Option<String>,
}

/// Sign-in request body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<SignUpRequest> for SignUpDetails {
    type Error = CredentialValidationError;

    fn try_from(value: SignUpRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.as_deref(),
            value.email.as_deref(),
            value.password.as_deref(),
        )
    }
}

impl TryFrom<SignInRequest> for SignInCredentials {
    type Error = CredentialValidationError;

    fn try_from(value: SignInRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.email.as_deref(), value.password.as_deref())
    }
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            image: user.image,
        }
    }
}

/// Body returned by sign-up and sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub user: AuthUser,
}

/// Session expiry as seen by clients.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub expires_at: DateTime<Utc>,
}

/// Body returned by `get-session`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SessionResponse {
    pub user: AuthUser,
    pub session: SessionInfo,
}

fn credential_error(err: CredentialValidationError) -> Error {
    let field = FieldName::new(err.field());
    let message = err.to_string();
    match err {
        CredentialValidationError::MissingName
        | CredentialValidationError::MissingEmail
        | CredentialValidationError::MissingPassword => missing_field_error(field, message),
        CredentialValidationError::InvalidEmail => invalid_format_error(field, message),
        CredentialValidationError::PasswordTooShort { .. }
        | CredentialValidationError::PasswordTooLong { .. } => {
            invalid_length_error(field, message)
        }
    }
}

fn signed_in_response(state: &HttpState, outcome: AuthOutcome) -> HttpResponse {
    let cookie = session_cookie(&outcome.session.token, &state.cookies);
    HttpResponse::Ok().cookie(cookie).json(AuthResponse {
        user: outcome.user.into(),
    })
}

/// Register with email and password, then sign in.
#[utoipa::path(
    post,
    path = "/api/auth/sign-up/email",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "Registered and signed in", body = AuthResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signUpEmail",
    security([])
)]
#[post("/auth/sign-up/email")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    req: HttpRequest,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<HttpResponse> {
    let details = SignUpDetails::try_from(payload.into_inner()).map_err(credential_error)?;
    let outcome = state.auth.sign_up(details, client_metadata(&req)).await?;
    Ok(signed_in_response(&state, outcome))
}

/// Sign in with email and password.
#[utoipa::path(
    post,
    path = "/api/auth/sign-in/email",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid email or password", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signInEmail",
    security([])
)]
#[post("/auth/sign-in/email")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    req: HttpRequest,
    payload: web::Json<SignInRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = SignInCredentials::try_from(payload.into_inner()).map_err(credential_error)?;
    let outcome = state.auth.sign_in(credentials, client_metadata(&req)).await?;
    Ok(signed_in_response(&state, outcome))
}

/// End the current session. Succeeds without a cookie.
#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    responses(
        (status = 200, description = "Signed out", body = SuccessResponse,
            headers(("Set-Cookie" = String, description = "Expired session cookies"))),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signOut",
    security([])
)]
#[post("/auth/sign-out")]
pub async fn sign_out(
    state: web::Data<HttpState>,
    SessionCookies(token): SessionCookies,
) -> ApiResult<HttpResponse> {
    if let Some(token) = token {
        state.auth.sign_out(&token).await?;
    }
    let mut response = HttpResponse::Ok();
    for cookie in expired_session_cookies(&state.cookies) {
        response.cookie(cookie);
    }
    Ok(response.json(SuccessResponse::OK))
}

/// Current user and session expiry.
#[utoipa::path(
    get,
    path = "/api/auth/get-session",
    responses(
        (status = 200, description = "Active session", body = SessionResponse),
        (status = 401, description = "No valid session", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "getSession"
)]
#[get("/auth/get-session")]
pub async fn get_session(
    state: web::Data<HttpState>,
    Authenticated(identity): Authenticated,
) -> ApiResult<web::Json<SessionResponse>> {
    let user = state.profile.fetch_profile(&identity.user_id).await?;
    Ok(web::Json(SessionResponse {
        user: user.into(),
        session: SessionInfo {
            expires_at: identity.expires_at,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use chrono::Duration;
    use rstest::rstest;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use crate::domain::{Session, SessionToken, UserId};
    use crate::inbound::http::session::{AUTH_SESSION_COOKIE, LEGACY_SESSION_COOKIE};
    use crate::inbound::http::test_utils::{MockPorts, TEST_TOKEN, api_app, test_identity};

    fn outcome() -> AuthOutcome {
        let now = Utc::now();
        let user = User {
            id: UserId::random(),
            name: Some("Ada".into()),
            email: "ada@example.com".into(),
            email_verified: false,
            image: None,
            created_at: now,
            updated_at: now,
        };
        let session = Session {
            id: Uuid::new_v4(),
            token: SessionToken::from_cookie_value("fresh-token").expect("token"),
            user_id: user.id,
            expires_at: now + Duration::days(7),
            ip_address: None,
            user_agent: Some("test-agent".into()),
            created_at: now,
            updated_at: now,
        };
        AuthOutcome { user, session }
    }

    fn set_cookies(response: &actix_web::dev::ServiceResponse) -> Vec<Cookie<'static>> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .filter_map(|value| value.to_str().ok())
            .filter_map(|raw| Cookie::parse(raw.to_owned()).ok())
            .collect()
    }

    #[actix_web::test]
    async fn sign_up_sets_session_cookie_and_returns_user() {
        let mut ports = MockPorts::default();
        ports
            .auth
            .expect_sign_up()
            .withf(|details, client| {
                details.email().as_ref() == "ada@example.com"
                    && client.user_agent.as_deref() == Some("test-agent")
            })
            .return_once(|_, _| Ok(outcome()));
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/sign-up/email")
                .insert_header((header::USER_AGENT, "test-agent"))
                .set_json(json!({
                    "name": "Ada",
                    "email": "Ada@Example.com",
                    "password": "correct horse"
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let cookies = set_cookies(&response);
        let cookie = cookies
            .iter()
            .find(|c| c.name() == AUTH_SESSION_COOKIE)
            .expect("session cookie");
        assert_eq!(cookie.value(), "fresh-token");
        assert_eq!(cookie.http_only(), Some(true));
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["user"]["email"], "ada@example.com");
        assert_eq!(body["user"]["name"], "Ada");
        assert!(body["user"].get("emailVerified").is_none());
    }

    #[rstest]
    #[case(json!({ "email": "a@b.c", "password": "longenough" }), "name", "missing_field")]
    #[case(json!({ "name": "Ada", "password": "longenough" }), "email", "missing_field")]
    #[case(json!({ "name": "Ada", "email": "nope", "password": "longenough" }), "email", "invalid_format")]
    #[case(json!({ "name": "Ada", "email": "a@b.c", "password": "short" }), "password", "invalid_length")]
    #[actix_web::test]
    async fn sign_up_validates_payload(
        #[case] payload: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mut ports = MockPorts::default();
        ports.auth.expect_sign_up().times(0);
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/sign-up/email")
                .set_json(payload)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }

    #[actix_web::test]
    async fn sign_up_conflict_is_forwarded() {
        let mut ports = MockPorts::default();
        ports
            .auth
            .expect_sign_up()
            .return_once(|_, _| Err(Error::conflict("User already exists")));
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/sign-up/email")
                .set_json(json!({ "name": "Ada", "email": "a@b.c", "password": "longenough" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(set_cookies(&response).is_empty());
    }

    #[actix_web::test]
    async fn sign_in_rejects_bad_credentials() {
        let mut ports = MockPorts::default();
        ports
            .auth
            .expect_sign_in()
            .return_once(|_, _| Err(Error::unauthorized("Invalid email or password")));
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/sign-in/email")
                .set_json(json!({ "email": "a@b.c", "password": "wrong" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "Invalid email or password");
    }

    #[actix_web::test]
    async fn sign_in_sets_cookie() {
        let mut ports = MockPorts::default();
        ports
            .auth
            .expect_sign_in()
            .withf(|credentials, _| credentials.password() == "any length")
            .return_once(|_, _| Ok(outcome()));
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/sign-in/email")
                .set_json(json!({ "email": "ada@example.com", "password": "any length" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            set_cookies(&response)
                .iter()
                .any(|c| c.name() == AUTH_SESSION_COOKIE && c.value() == "fresh-token")
        );
    }

    #[actix_web::test]
    async fn sign_out_deletes_session_and_expires_both_cookies() {
        let mut ports = MockPorts::default();
        ports
            .auth
            .expect_sign_out()
            .withf(|token| token.as_str() == TEST_TOKEN)
            .times(1)
            .return_once(|_| Ok(()));
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/sign-out")
                .cookie(Cookie::new(AUTH_SESSION_COOKIE, TEST_TOKEN))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let mut names: Vec<_> = set_cookies(&response)
            .iter()
            .filter(|c| c.value().is_empty())
            .map(|c| c.name().to_owned())
            .collect();
        names.sort();
        assert_eq!(names, [AUTH_SESSION_COOKIE, LEGACY_SESSION_COOKIE]);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "success": true }));
    }

    #[actix_web::test]
    async fn sign_out_without_cookie_skips_store() {
        let mut ports = MockPorts::default();
        ports.auth.expect_sign_out().times(0);
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/auth/sign-out").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn get_session_reports_user_and_expiry() {
        let identity = test_identity();
        let mut ports = MockPorts::default();
        ports.sign_in_as(identity);
        ports.profile.expect_fetch_profile().return_once(move |_| {
            let mut user = outcome().user;
            user.id = identity.user_id;
            Ok(user)
        });
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/auth/get-session")
                .cookie(Cookie::new(AUTH_SESSION_COOKIE, TEST_TOKEN))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["user"]["id"], identity.user_id.to_string());
        let expires_at: DateTime<Utc> =
            serde_json::from_value(body["session"]["expiresAt"].clone()).expect("timestamp");
        assert_eq!(expires_at, identity.expires_at);
    }

    #[actix_web::test]
    async fn get_session_requires_cookie() {
        let app = test::init_service(api_app(MockPorts::default().into_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/auth/get-session").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

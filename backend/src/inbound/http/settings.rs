//! Profile settings for the signed-in user.
//!
//! ```text
//! GET /api/settings
//! PUT /api/settings {"name":"Ada","image":"https://…/ada.png"}
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{EmptyProfileUpdate, ProfileUpdate, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::Authenticated;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{NAME, missing_field_error};

/// Profile fields exposed on the settings page.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
}

impl From<User> for SettingsResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
            image: user.image,
        }
    }
}

/// Partial profile update; at least one field must be non-empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub name: Option<String>,
    pub image: Option<String>,
}

impl TryFrom<UpdateSettingsRequest> for ProfileUpdate {
    type Error = EmptyProfileUpdate;

    fn try_from(value: UpdateSettingsRequest) -> Result<Self, Self::Error> {
        Self::try_new(value.name, value.image)
    }
}

/// `{"success": true}` acknowledgement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub const OK: Self = Self { success: true };
}

/// Read the caller's profile.
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Profile", body = SettingsResponse),
        (status = 401, description = "No valid session", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["settings"],
    operation_id = "getSettings"
)]
#[get("/settings")]
pub async fn get_settings(
    state: web::Data<HttpState>,
    Authenticated(identity): Authenticated,
) -> ApiResult<web::Json<SettingsResponse>> {
    let user = state.profile.fetch_profile(&identity.user_id).await?;
    Ok(web::Json(user.into()))
}

/// Update the caller's display name and/or avatar.
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Profile updated", body = SuccessResponse),
        (status = 400, description = "Nothing to update", body = ErrorSchema),
        (status = 401, description = "No valid session", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["settings"],
    operation_id = "updateSettings"
)]
#[put("/settings")]
pub async fn update_settings(
    state: web::Data<HttpState>,
    Authenticated(identity): Authenticated,
    payload: web::Json<UpdateSettingsRequest>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let update = ProfileUpdate::try_from(payload.into_inner())
        .map_err(|err| missing_field_error(NAME, err.to_string()))?;
    state
        .profile_command
        .update_profile(&identity.user_id, update)
        .await?;
    Ok(web::Json(SuccessResponse::OK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::Error;
    use crate::inbound::http::session::AUTH_SESSION_COOKIE;
    use crate::inbound::http::test_utils::{MockPorts, TEST_TOKEN, api_app, test_identity};

    fn user() -> User {
        let identity = test_identity();
        User {
            id: identity.user_id,
            name: Some("Ada Lovelace".into()),
            email: "ada@example.com".into(),
            email_verified: false,
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn signed_in() -> MockPorts {
        let mut ports = MockPorts::default();
        ports.sign_in_as(test_identity());
        ports
    }

    fn with_cookie(request: test::TestRequest) -> test::TestRequest {
        request.cookie(Cookie::new(AUTH_SESSION_COOKIE, TEST_TOKEN))
    }

    #[actix_web::test]
    async fn get_returns_profile_fields() {
        let mut ports = signed_in();
        let expected_id = test_identity().user_id;
        ports
            .profile
            .expect_fetch_profile()
            .withf(move |id| *id == expected_id)
            .return_once(|_| Ok(user()));
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(
            &app,
            with_cookie(test::TestRequest::get().uri("/api/settings")).to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(
            body,
            json!({ "name": "Ada Lovelace", "email": "ada@example.com", "image": null })
        );
    }

    #[rstest]
    #[case(test::TestRequest::get())]
    #[case(test::TestRequest::put().set_json(json!({ "name": "Ada" })))]
    #[actix_web::test]
    async fn requests_without_cookie_are_unauthorized(#[case] request: test::TestRequest) {
        let mut ports = MockPorts::default();
        ports.profile.expect_fetch_profile().times(0);
        ports.profile_command.expect_update_profile().times(0);
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(&app, request.uri("/api/settings").to_request()).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "Unauthorized");
    }

    #[actix_web::test]
    async fn get_reports_missing_user() {
        let mut ports = signed_in();
        ports
            .profile
            .expect_fetch_profile()
            .return_once(|_| Err(Error::not_found("User not found")));
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(
            &app,
            with_cookie(test::TestRequest::get().uri("/api/settings")).to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "User not found");
    }

    #[actix_web::test]
    async fn put_applies_supplied_fields() {
        let mut ports = signed_in();
        ports
            .profile_command
            .expect_update_profile()
            .withf(|_, update| update.name() == Some("Ada") && update.image().is_none())
            .return_once(|_, _| Ok(()));
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(
            &app,
            with_cookie(test::TestRequest::put().uri("/api/settings"))
                .set_json(json!({ "name": "Ada" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "success": true }));
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({ "name": "", "image": "" }))]
    #[actix_web::test]
    async fn put_requires_a_field(#[case] payload: Value) {
        let mut ports = signed_in();
        ports.profile_command.expect_update_profile().times(0);
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(
            &app,
            with_cookie(test::TestRequest::put().uri("/api/settings"))
                .set_json(payload)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "Name or image is required");
    }
}

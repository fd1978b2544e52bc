//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler from the inbound layer together
//! with the request and response bodies they exchange. Error payloads use
//! [`ErrorSchema`] so the domain error type stays free of utoipa derives.
//!
//! The document backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::auth::{
    AuthResponse, AuthUser, SessionInfo, SessionResponse, SignInRequest, SignUpRequest,
};
use crate::inbound::http::campaigns::{CampaignResponse, CreateCampaignRequest};
use crate::inbound::http::leads::{CreateLeadRequest, LeadResponse, LeadSummaryResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::session::AUTH_SESSION_COOKIE;
use crate::inbound::http::settings::{SettingsResponse, SuccessResponse, UpdateSettingsRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                AUTH_SESSION_COOKIE,
                "Session cookie issued by the sign-up and sign-in endpoints.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Leadboard API",
        description = "Leads and campaigns dashboard with cookie-based sessions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::auth::get_session,
        crate::inbound::http::campaigns::list_campaigns,
        crate::inbound::http::campaigns::create_campaign,
        crate::inbound::http::leads::list_leads,
        crate::inbound::http::leads::create_lead,
        crate::inbound::http::settings::get_settings,
        crate::inbound::http::settings::update_settings,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        SignUpRequest,
        SignInRequest,
        AuthUser,
        AuthResponse,
        SessionInfo,
        SessionResponse,
        CampaignResponse,
        CreateCampaignRequest,
        LeadSummaryResponse,
        CreateLeadRequest,
        LeadResponse,
        SettingsResponse,
        UpdateSettingsRequest,
        SuccessResponse,
    )),
    tags(
        (name = "auth", description = "Email sign-up, sign-in and session lookup"),
        (name = "campaigns", description = "Outreach campaigns"),
        (name = "leads", description = "Leads and the paginated lead list"),
        (name = "settings", description = "Profile of the signed-in user"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

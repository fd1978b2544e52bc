//! Campaign API handlers.
//!
//! ```text
//! GET /api/campaigns
//! POST /api/campaigns {"name":"Q1 Email Campaign","status":"active"}
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Campaign, MissingCampaignName, NewCampaign};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{NAME, missing_field_error};

/// Create-campaign request body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    #[schema(example = "Q1 Email Campaign")]
    pub name: Option<String>,
    /// Defaults to `draft`.
    #[schema(example = "active")]
    pub status: Option<String>,
}

/// Campaign as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub name: String,
    pub status: String,
    pub total_leads: i32,
    pub successful_leads: i32,
    pub response_rate: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Campaign> for CampaignResponse {
    fn from(campaign: Campaign) -> Self {
        Self {
            id: campaign.id.to_string(),
            status: campaign.status.as_ref().to_owned(),
            name: campaign.name,
            total_leads: campaign.total_leads,
            successful_leads: campaign.successful_leads,
            response_rate: campaign.response_rate,
            created_at: campaign.created_at,
        }
    }
}

impl TryFrom<CreateCampaignRequest> for NewCampaign {
    type Error = MissingCampaignName;

    fn try_from(value: CreateCampaignRequest) -> Result<Self, Self::Error> {
        Self::try_new(value.name, value.status)
    }
}

/// List every campaign in creation order.
#[utoipa::path(
    get,
    path = "/api/campaigns",
    responses(
        (status = 200, description = "Campaigns", body = [CampaignResponse]),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["campaigns"],
    operation_id = "listCampaigns",
    security([])
)]
#[get("/campaigns")]
pub async fn list_campaigns(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CampaignResponse>>> {
    let campaigns = state.campaigns.list_campaigns().await?;
    Ok(web::Json(
        campaigns.into_iter().map(CampaignResponse::from).collect(),
    ))
}

/// Create a campaign with zeroed counters.
#[utoipa::path(
    post,
    path = "/api/campaigns",
    request_body = CreateCampaignRequest,
    responses(
        (status = 200, description = "Created campaign", body = CampaignResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["campaigns"],
    operation_id = "createCampaign",
    security([])
)]
#[post("/campaigns")]
pub async fn create_campaign(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCampaignRequest>,
) -> ApiResult<web::Json<CampaignResponse>> {
    let campaign = NewCampaign::try_from(payload.into_inner())
        .map_err(|err| missing_field_error(NAME, err.to_string()))?;
    let created = state.campaigns_command.create_campaign(campaign).await?;
    Ok(web::Json(created.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::{CampaignId, CampaignStatus, Error};
    use crate::inbound::http::test_utils::{MockPorts, api_app};

    fn campaign(name: &str, status: &str) -> Campaign {
        Campaign {
            id: CampaignId::random(),
            name: name.to_owned(),
            status: CampaignStatus::from_stored(status.to_owned()),
            total_leads: 150,
            successful_leads: 45,
            response_rate: 30.0,
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 15, 9, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[actix_web::test]
    async fn list_returns_campaigns_in_port_order() {
        let mut ports = MockPorts::default();
        let rows = vec![
            campaign("Q1 Email Campaign", "active"),
            campaign("Product Launch", "paused"),
        ];
        ports
            .campaigns
            .expect_list_campaigns()
            .times(1)
            .return_once(move || Ok(rows));
        let app = test::init_service(api_app(ports.into_state())).await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/api/campaigns").to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        let names: Vec<_> = body
            .as_array()
            .expect("array")
            .iter()
            .map(|c| c["name"].as_str().expect("name"))
            .collect();
        assert_eq!(names, ["Q1 Email Campaign", "Product Launch"]);
        assert_eq!(body[0]["totalLeads"], 150);
        assert_eq!(body[0]["successfulLeads"], 45);
        assert_eq!(body[0]["responseRate"], 30.0);
        assert_eq!(body[0]["createdAt"], "2024-01-15T09:00:00Z");
    }

    #[actix_web::test]
    async fn list_surfaces_port_failures() {
        let mut ports = MockPorts::default();
        ports
            .campaigns
            .expect_list_campaigns()
            .return_once(|| Err(Error::internal("Failed to fetch campaigns")));
        let app = test::init_service(api_app(ports.into_state())).await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/api/campaigns").to_request())
                .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "Failed to fetch campaigns");
    }

    #[actix_web::test]
    async fn create_defaults_status_and_zeroes_counters() {
        let mut ports = MockPorts::default();
        ports
            .campaigns_command
            .expect_create_campaign()
            .withf(|campaign| campaign.name() == "X" && campaign.status().as_ref() == "draft")
            .return_once(|campaign| Ok(campaign.into_campaign(Utc::now())));
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/campaigns")
                .set_json(json!({ "name": "X" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["status"], "draft");
        assert_eq!(body["totalLeads"], 0);
        assert_eq!(body["successfulLeads"], 0);
        assert_eq!(body["responseRate"], 0.0);
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({ "name": "" }))]
    #[case(json!({ "name": "   ", "status": "active" }))]
    #[actix_web::test]
    async fn create_requires_name(#[case] payload: Value) {
        let mut ports = MockPorts::default();
        ports.campaigns_command.expect_create_campaign().times(0);
        let app = test::init_service(api_app(ports.into_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/campaigns")
                .set_json(payload)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "Campaign name is required");
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], "name");
    }

    #[actix_web::test]
    async fn create_rejects_malformed_json() {
        let app = test::init_service(api_app(MockPorts::default().into_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/campaigns")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["details"]["code"], "invalid_body");
    }
}

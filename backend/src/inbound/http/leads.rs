//! Lead API handlers.
//!
//! ```text
//! GET /api/leads?page=1&limit=20&search=John&status=contacted
//! POST /api/leads {"name":"John Doe","email":"john@techcorp.com"}
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CampaignId, DEFAULT_LIMIT, DEFAULT_PAGE, Error, Lead, LeadListQuery, LeadStatusFilter,
    LeadSummary, MissingLeadContact, NewLead, NewLeadDraft,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    CAMPAIGN_ID, EMAIL, FieldName, LAST_CONTACT_DATE, LIMIT, NAME, PAGE, lead_list_query_error,
    missing_field_error, parse_optional_rfc3339_timestamp, parse_optional_uuid, parse_u32_param,
};

/// Raw lead listing parameters. Numbers arrive as strings so that
/// malformed values produce field-level errors.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListLeadsParams {
    /// 1-based page number; defaults to 1.
    #[param(value_type = Option<u32>, example = 1)]
    pub page: Option<String>,
    /// Page size between 1 and 100; defaults to 20.
    #[param(value_type = Option<u32>, example = 20)]
    pub limit: Option<String>,
    /// Case-sensitive substring matched against the lead name.
    pub search: Option<String>,
    /// Exact status, or `all` for no filter.
    #[param(example = "contacted")]
    pub status: Option<String>,
}

impl TryFrom<ListLeadsParams> for LeadListQuery {
    type Error = Error;

    fn try_from(params: ListLeadsParams) -> Result<Self, Self::Error> {
        let page = parse_u32_param(params.page.as_deref(), PAGE, DEFAULT_PAGE)?;
        let limit = parse_u32_param(params.limit.as_deref(), LIMIT, DEFAULT_LIMIT)?;
        let status = LeadStatusFilter::parse(params.status.as_deref());
        Self::try_new(page, limit, params.search, status).map_err(lead_list_query_error)
    }
}

/// One row of the lead listing.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadSummaryResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub status: String,
    pub last_contact_date: Option<DateTime<Utc>>,
    /// Name of the owning campaign; `null` when the lead has none.
    pub campaign_name: Option<String>,
}

impl From<LeadSummary> for LeadSummaryResponse {
    fn from(lead: LeadSummary) -> Self {
        Self {
            id: lead.id.to_string(),
            status: lead.status.as_ref().to_owned(),
            name: lead.name,
            email: lead.email,
            company: lead.company,
            last_contact_date: lead.last_contact_date,
            campaign_name: lead.campaign_name,
        }
    }
}

/// Create-lead request body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    #[schema(example = "john@techcorp.com")]
    pub email: Option<String>,
    pub company: Option<String>,
    #[schema(format = "uuid")]
    pub campaign_id: Option<String>,
    /// Defaults to `pending`.
    pub status: Option<String>,
    #[schema(format = "date-time")]
    pub last_contact_date: Option<String>,
}

impl TryFrom<CreateLeadRequest> for NewLead {
    type Error = Error;

    fn try_from(value: CreateLeadRequest) -> Result<Self, Self::Error> {
        if let Some(field) = first_blank(&[(NAME, &value.name), (EMAIL, &value.email)]) {
            return Err(missing_field_error(field, MissingLeadContact.to_string()));
        }
        let campaign_id = parse_optional_uuid(value.campaign_id, CAMPAIGN_ID)?;
        let last_contact_date =
            parse_optional_rfc3339_timestamp(value.last_contact_date, LAST_CONTACT_DATE)?;
        Self::try_new(NewLeadDraft {
            name: value.name,
            email: value.email,
            company: value.company,
            campaign_id: campaign_id.map(CampaignId::from),
            status: value.status,
            last_contact_date,
        })
        .map_err(|err| missing_field_error(NAME, err.to_string()))
    }
}

fn first_blank(fields: &[(FieldName, &Option<String>)]) -> Option<FieldName> {
    fields
        .iter()
        .find(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(field, _)| *field)
}

/// Lead as returned after creation.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub campaign_id: Option<String>,
    pub status: String,
    pub last_contact_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Lead> for LeadResponse {
    fn from(lead: Lead) -> Self {
        Self {
            id: lead.id.to_string(),
            campaign_id: lead.campaign_id.map(|id| id.to_string()),
            status: lead.status.as_ref().to_owned(),
            name: lead.name,
            email: lead.email,
            company: lead.company,
            last_contact_date: lead.last_contact_date,
            created_at: lead.created_at,
        }
    }
}

/// Page through leads with optional name search and status filter.
///
/// No total count is returned; a full page suggests more results.
#[utoipa::path(
    get,
    path = "/api/leads",
    params(ListLeadsParams),
    responses(
        (status = 200, description = "Leads", body = [LeadSummaryResponse]),
        (status = 400, description = "Invalid query parameters", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["leads"],
    operation_id = "listLeads",
    security([])
)]
#[get("/leads")]
pub async fn list_leads(
    state: web::Data<HttpState>,
    params: web::Query<ListLeadsParams>,
) -> ApiResult<web::Json<Vec<LeadSummaryResponse>>> {
    let query = LeadListQuery::try_from(params.into_inner())?;
    let leads = state.leads.list_leads(&query).await?;
    Ok(web::Json(
        leads.into_iter().map(LeadSummaryResponse::from).collect(),
    ))
}

/// Create a lead. Campaign counters are not updated.
#[utoipa::path(
    post,
    path = "/api/leads",
    request_body = CreateLeadRequest,
    responses(
        (status = 200, description = "Created lead", body = LeadResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["leads"],
    operation_id = "createLead",
    security([])
)]
#[post("/leads")]
pub async fn create_lead(
    state: web::Data<HttpState>,
    payload: web::Json<CreateLeadRequest>,
) -> ApiResult<web::Json<LeadResponse>> {
    let lead = NewLead::try_from(payload.into_inner())?;
    let created = state.leads_command.create_lead(lead).await?;
    Ok(web::Json(created.into()))
}

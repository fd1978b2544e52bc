//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::Identity;
use crate::domain::UserId;
use crate::domain::ports::{
    MockAuthCommand, MockCampaignsCommand, MockCampaignsQuery, MockLeadsCommand, MockLeadsQuery,
    MockProfileCommand, MockProfileQuery, MockSessionResolver,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts, SessionCookieConfig};

/// Token value tests place in the session cookie.
pub const TEST_TOKEN: &str = "test-session-token";

/// Fixed identity returned by [`MockPorts::sign_in_as`] in most tests.
pub fn test_identity() -> Identity {
    let expires_at = Utc
        .with_ymd_and_hms(2099, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(|| Utc::now() + Duration::days(7));
    Identity {
        user_id: UserId::from(Uuid::from_u128(0x3fa8_5f64_5717_4562_b3fc_2c96_3f66_afa6)),
        session_id: Uuid::from_u128(1),
        expires_at,
    }
}

/// One mock per driving port. Unconfigured mocks panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub sessions: MockSessionResolver,
    pub auth: MockAuthCommand,
    pub profile: MockProfileQuery,
    pub profile_command: MockProfileCommand,
    pub campaigns: MockCampaignsQuery,
    pub campaigns_command: MockCampaignsCommand,
    pub leads: MockLeadsQuery,
    pub leads_command: MockLeadsCommand,
}

impl MockPorts {
    /// Resolve [`TEST_TOKEN`] to `identity`; any other token to nothing.
    pub fn sign_in_as(&mut self, identity: Identity) {
        self.sessions
            .expect_resolve()
            .returning(move |token| Ok((token.as_str() == TEST_TOKEN).then_some(identity)));
    }

    /// Build handler state with non-secure cookies for plain-HTTP tests.
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                sessions: Arc::new(self.sessions),
                auth: Arc::new(self.auth),
                profile: Arc::new(self.profile),
                profile_command: Arc::new(self.profile_command),
                campaigns: Arc::new(self.campaigns),
                campaigns_command: Arc::new(self.campaigns_command),
                leads: Arc::new(self.leads),
                leads_command: Arc::new(self.leads_command),
            },
            SessionCookieConfig {
                secure: false,
                ..SessionCookieConfig::default()
            },
        )
    }
}

/// App with every `/api` route mounted over `state`.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure_api)
}

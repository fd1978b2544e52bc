//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod auth;
pub mod campaigns;
pub mod error;
pub mod health;
pub mod leads;
pub mod schemas;
pub mod session;
pub mod settings;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Mount the `/api` scope and the JSON and query error handlers.
///
/// Handlers expect `web::Data<HttpState>` to be registered on the app.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use leadboard::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(
            web::scope("/api")
                .service(campaigns::list_campaigns)
                .service(campaigns::create_campaign)
                .service(leads::list_leads)
                .service(leads::create_lead)
                .service(settings::get_settings)
                .service(settings::update_settings)
                .service(auth::sign_up)
                .service(auth::sign_in)
                .service(auth::sign_out)
                .service(auth::get_session),
        );
}

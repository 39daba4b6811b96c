use crate::{
    api::records,
    auth::handlers,
    config::Config,
    error::ApiError,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = 60_000 / requests_per_min as u64;
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms.max(1))
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("period and burst size are non-zero");
        Governor::new(&cfg)
    }

    // Malformed bodies, paths and query strings answer with the same
    // `{"error": ...}` shape as the handlers.
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(err.to_string()).into()
    }));

    // Public login
    cfg.service(
        web::resource("/login")
            .wrap(build_limiter(config.rate_login_per_min))
            .route(web::post().to(handlers::login)),
    );

    // Generic record CRUD
    cfg.service(
        web::scope(&config.api_prefix)
            // /api/{table}
            .service(
                web::resource("/{table}")
                    .route(web::get().to(records::list_records))
                    .route(web::post().to(records::create_record)),
            )
            // /api/{table}/{id}
            .service(
                web::resource("/{table}/{id}")
                    .route(web::get().to(records::get_record))
                    .route(web::put().to(records::update_record))
                    .route(web::delete().to(records::delete_record)),
            ),
    );
}

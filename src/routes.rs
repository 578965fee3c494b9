use crate::api::{attendance, collect};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, web};
use std::sync::Arc;

pub type Limiter = Arc<Governor<PeerIpKeyExtractor, NoOpMiddleware>>;

/// Per peer IP limiter. Build it once, outside the `HttpServer` factory, so
/// every worker shares the same quota.
pub fn build_limiter(requests_per_min: u32) -> Limiter {
    let requests_per_min = requests_per_min.max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond((60_000 / requests_per_min as u64).max(1))
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("period and burst are non-zero");
    Arc::new(Governor::new(&cfg))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("garden5 attendance")
}

/// `slack_limiter` guards the routes that call the Slack API.
pub fn configure(cfg: &mut web::ServiceConfig, slack_limiter: Limiter) {
    cfg.route("/", web::get().to(index))
        .service(
            web::resource("/collect")
                .wrap(slack_limiter.clone())
                .route(web::post().to(collect::collect)),
        )
        .service(web::resource("/get/{date}").route(web::get().to(attendance::attendance_on)))
        .service(
            web::scope("/api")
                // /api/users
                .service(web::resource("/users").route(web::get().to(attendance::list_members)))
                // /api/users/{user}
                .service(
                    web::resource("/users/{user}")
                        .route(web::get().to(attendance::user_attendance)),
                )
                // /api/gets
                .service(web::resource("/gets").route(web::get().to(attendance::all_attendance)))
                // /api/no-shows/notify
                .service(
                    web::resource("/no-shows/notify")
                        .wrap(slack_limiter)
                        .route(web::post().to(collect::notify_no_shows)),
                )
                // /api/no-shows/{date}
                .service(
                    web::resource("/no-shows/{date}").route(web::get().to(attendance::no_shows)),
                ),
        );
}

use crate::config::rate_limit::{RateLimitConfig, RateLimitRule, RouteGroup};
use crate::config::upload::UploadConfig;
use crate::handlers;
use crate::middleware::auth::{optional_auth, require_auth};
use axum::{extract::DefaultBodyLimit, middleware, routing, Router};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

/// Multipart framing on top of the raw image bytes.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn create_routes() -> Router {
    Router::new().nest("/api/v1", api_routes())
}

fn api_routes() -> Router {
    let rate_limit_config = RateLimitConfig::from_env();

    let auth = auth_routes(&rate_limit_config);
    let public_read =
        public_read_routes(&rate_limit_config).layer(middleware::from_fn(optional_auth));
    let protected =
        protected_routes(&rate_limit_config).layer(middleware::from_fn(require_auth));

    auth.merge(public_read).merge(protected)
}

/// Auth routes: signup, login.
fn auth_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        .route("/auth/signup", routing::post(handlers::auth::signup))
        .route("/auth/login", routing::post(handlers::auth::login));

    with_optional_rate_limit(router, config.enabled, config.rule(RouteGroup::Auth))
}

/// Public reads. A valid token is still resolved so `my_score` can be filled in.
fn public_read_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        // Recipes
        .route("/recipes", routing::get(handlers::recipe::list_recipes))
        .route(
            "/recipes/popular",
            routing::get(handlers::recipe::popular_recipes),
        )
        .route("/recipes/{id}", routing::get(handlers::recipe::get_recipe))
        // Ratings
        .route(
            "/recipes/{id}/rating",
            routing::get(handlers::rating::get_rating),
        )
        // Comments
        .route(
            "/recipes/{id}/comments",
            routing::get(handlers::comment::list_comments),
        )
        // Follow (public reads)
        .route(
            "/members/{id}/followers",
            routing::get(handlers::follow::list_followers),
        )
        .route(
            "/members/{id}/following",
            routing::get(handlers::follow::list_following),
        )
        // Tags
        .route("/tags", routing::get(handlers::tag::list_tags));

    with_optional_rate_limit(router, config.enabled, config.rule(RouteGroup::Read))
}

/// Protected routes: everything that needs a signed-in member.
fn protected_routes(config: &RateLimitConfig) -> Router {
    let image_limit = UploadConfig::from_env().max_bytes + MULTIPART_OVERHEAD;

    let router = Router::new()
        // Auth
        .route("/auth/me", routing::get(handlers::auth::me))
        // Recipes
        .route("/recipes", routing::post(handlers::recipe::create_recipe))
        .route(
            "/recipes/{id}",
            routing::put(handlers::recipe::update_recipe)
                .delete(handlers::recipe::delete_recipe),
        )
        .route(
            "/recipes/{id}/image",
            routing::post(handlers::recipe::upload_recipe_image)
                .layer(DefaultBodyLimit::max(image_limit)),
        )
        // Likes and ratings
        .route(
            "/recipes/{id}/like",
            routing::post(handlers::like::toggle_like),
        )
        .route(
            "/recipes/{id}/rating",
            routing::post(handlers::rating::rate_recipe).delete(handlers::rating::delete_rating),
        )
        // Comments
        .route(
            "/recipes/{id}/comments",
            routing::post(handlers::comment::create_comment),
        )
        .route(
            "/comments/{id}",
            routing::delete(handlers::comment::delete_comment),
        )
        // Follow
        .route(
            "/members/{id}/follow",
            routing::post(handlers::follow::toggle_follow),
        )
        // Reports
        .route(
            "/recipes/{id}/report",
            routing::post(handlers::report::report_recipe),
        )
        .route(
            "/comments/{id}/report",
            routing::post(handlers::report::report_comment),
        )
        // Admin
        .route(
            "/admin/reports",
            routing::get(handlers::report::list_reports),
        )
        .route(
            "/admin/reports/{id}",
            routing::patch(handlers::report::resolve_report),
        )
        .route(
            "/admin/members/{id}/sanctions",
            routing::get(handlers::report::list_member_sanctions),
        )
        .route("/admin/tags", routing::post(handlers::tag::create_tag));

    with_optional_rate_limit(router, config.enabled, config.rule(RouteGroup::Write))
}

fn with_optional_rate_limit(router: Router, enabled: bool, rule: RateLimitRule) -> Router {
    if !enabled {
        return router;
    }

    let Some(governor_conf) = GovernorConfigBuilder::default()
        .per_second(rule.per_second)
        .burst_size(rule.burst_size)
        .finish()
    else {
        tracing::warn!(?rule, "invalid rate limit rule, serving without a limiter");
        return router;
    };

    router.layer(GovernorLayer::new(governor_conf))
}

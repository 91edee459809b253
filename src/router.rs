use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::auth::require_bearer;
use crate::bookmarks;
use crate::faults::{panic_fault, render_faults};
use crate::handler::{AppState, healthcheck};

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any)
}

/// Builds the full application: the public healthcheck, the protected
/// bookmark subtree, and the layers every response passes through.
pub fn app(state: AppState) -> Router {
    let protected = bookmarks::routes().layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/", get(healthcheck))
        .nest(bookmarks::COLLECTION_PATH, protected)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(cors())
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("SAMEORIGIN"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("no-referrer"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_DNS_PREFETCH_CONTROL,
                    HeaderValue::from_static("off"),
                ))
                .layer(middleware::from_fn_with_state(state.clone(), render_faults))
                .layer(CatchPanicLayer::custom(panic_fault)),
        )
        .with_state(state)
}

use axum::{
    Router,
    routing::{any, get},
};
use tower_http::trace::TraceLayer;

use greeter_core::health::health_routes;
use greeter_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::domain::port::DataPort;
use crate::handlers::{data::get_data, hello::hello};
use crate::state::AppState;

pub fn build_router<P>(state: AppState<P>) -> Router
where
    P: DataPort + Clone + 'static,
{
    Router::new()
        .merge(health_routes::<AppState<P>>())
        .route("/data", get(get_data::<P>))
        .route("/", any(hello))
        // Unrouted method or path: greet anyway.
        .method_not_allowed_fallback(hello)
        .fallback(hello)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}

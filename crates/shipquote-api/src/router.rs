use axum::{
	routing::{get, post},
	Router,
};
use tower::ServiceBuilder;
use tower_http::{
	compression::CompressionLayer,
	cors::CorsLayer,
	limit::RequestBodyLimitLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use tracing::Level;

use crate::handlers::{
	cancel_shipment, get_quote_options, get_shipment_label, health, post_shipments,
	post_shipping_quote, track_shipment,
};
use crate::security::add_security_headers;
use crate::state::AppState;
// State is applied at the application level using `.with_state(...)`.

pub fn create_router() -> Router<AppState> {
	let cors = CorsLayer::permissive();
	let body_limit = RequestBodyLimitLayer::new(1024 * 1024);
	let trace = TraceLayer::new_for_http()
		.make_span_with(|req: &axum::http::Request<_>| {
			let req_id = req
				.headers()
				.get("x-request-id")
				.and_then(|v| v.to_str().ok())
				.unwrap_or("-");
			tracing::info_span!(
				"http_request",
				method = %req.method(),
				uri = %req.uri(),
				req_id
			)
		})
		.on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
		.on_response(
			tower_http::trace::DefaultOnResponse::new()
				.level(Level::INFO)
				.latency_unit(tower_http::LatencyUnit::Millis),
		);
	let req_id = ServiceBuilder::new()
		.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
		.layer(PropagateRequestIdLayer::x_request_id());

	let router = Router::new()
		.route("/health", get(health))
		.route("/health/", get(health))
		.route("/shipping-quote", post(post_shipping_quote))
		.route("/shipping-quote/", post(post_shipping_quote))
		.route("/api/shipping-quote", post(post_shipping_quote))
		.route("/api/shipping-quote/", post(post_shipping_quote))
		.route("/shipping-quote/options", get(get_quote_options))
		.route("/shipping-quote/options/", get(get_quote_options))
		.route("/api/shipping-quote/options", get(get_quote_options))
		.route("/api/shipping-quote/options/", get(get_quote_options))
		.route("/shipments", post(post_shipments))
		.route("/shipments/", post(post_shipments))
		.route("/shipments/{tracking_id}/cancel", post(cancel_shipment))
		.route("/shipments/{tracking_id}/label", get(get_shipment_label))
		.route("/shipments/{tracking_id}/track", get(track_shipment));

	let router = router
		.layer(cors)
		.layer(CompressionLayer::new())
		.layer(trace)
		.layer(req_id)
		.layer(body_limit);

	add_security_headers(router)
}

use axum::Router;
use stagehand::kernel::prelude::ApiState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Stagehand API", description = "Option catalogs for the admin dashboard"))]
struct ApiDoc;

pub(crate) fn init(state: ApiState) -> Router {
    let api = ApiDoc::openapi();

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(stagehand::server::router::system_router())
        .merge(stagehand::server::router::features_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    let scalar_routes = Scalar::with_url("/api", api_doc);

    Router::new().merge(openapi_routes).merge(scalar_routes)
}

use super::health;
use axum::extract::FromRef;
use stagehand_database::Database;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn system_router<S>() -> OpenApiRouter<S>
where
    Database: FromRef<S>,
    S: Send + Sync + Clone + 'static,
{
    OpenApiRouter::<S>::new().routes(routes!(health::health_handler))
}

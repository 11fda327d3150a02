//! HTTP surface of the catalog slice.

use crate::{AddOutcome, Candidate, Catalog, CatalogError};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use stagehand_domain::catalog::{CatalogKind, EquipmentCategory, KindInfo, OptionValue};
use stagehand_domain::constants::CATALOG_TAG;
use stagehand_kernel::security::Caller;
use stagehand_kernel::server::{ApiErrorBody, ApiResponse, ApiState};
use std::str::FromStr;
use tracing::{debug, error};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Body of `POST /catalog/{kind}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddOptionRequest {
    /// A string, or a number (or numeric string) for amounts
    pub value: Candidate,
}

impl CatalogError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::StorageUnavailable { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Catalog request failed");
        } else {
            debug!(error = %self, "Catalog request rejected");
        }
        ApiErrorBody::new(self.public_message()).into_response_with(status)
    }
}

fn catalog(state: &ApiState) -> Result<&Catalog, CatalogError> {
    state.try_get_slice::<Catalog>().map_err(|e| CatalogError::Internal {
        message: e.to_string().into(),
        context: Some("Resolving catalog slice".into()),
    })
}

fn parse_kind(kind: &str) -> Result<CatalogKind, CatalogError> {
    CatalogKind::from_str(kind)
        .map_err(|_| CatalogError::invalid(format!("Unknown catalog kind '{kind}'")))
}

#[utoipa::path(
    get,
    path = "/catalog",
    responses((status = OK, description = "Supported catalogs", body = ApiResponse<Vec<KindInfo>>)),
    tag = CATALOG_TAG,
)]
pub(crate) async fn list_kinds(
    State(state): State<ApiState>,
) -> Result<ApiResponse<Vec<KindInfo>>, CatalogError> {
    Ok(ApiResponse::ok(catalog(&state)?.service.list_kinds()))
}

#[utoipa::path(
    get,
    path = "/catalog/{kind}",
    params(("kind" = String, Path, description = "Catalog slug, e.g. `event-type`")),
    responses(
        (status = OK, description = "Merged option list", body = ApiResponse<Vec<OptionValue>>),
        (status = BAD_REQUEST, description = "Unknown kind", body = ApiErrorBody),
        (status = UNAUTHORIZED, description = "Admin-only catalog", body = ApiErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Storage unavailable", body = ApiErrorBody),
    ),
    tag = CATALOG_TAG,
)]
pub(crate) async fn list_options(
    State(state): State<ApiState>,
    caller: Caller,
    Path(kind): Path<String>,
) -> Result<ApiResponse<Vec<OptionValue>>, CatalogError> {
    let kind = parse_kind(&kind)?;
    let options = catalog(&state)?.service.list_options(&caller, kind).await?;
    Ok(ApiResponse::ok(options))
}

#[utoipa::path(
    post,
    path = "/catalog/{kind}",
    params(("kind" = String, Path, description = "Catalog slug, e.g. `location`")),
    request_body = AddOptionRequest,
    responses(
        (status = OK, description = "Option created or already present", body = ApiResponse<AddOutcome>),
        (status = BAD_REQUEST, description = "Invalid value or unknown kind", body = ApiErrorBody),
        (status = UNAUTHORIZED, description = "Admin session required", body = ApiErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Storage unavailable", body = ApiErrorBody),
    ),
    tag = CATALOG_TAG,
)]
pub(crate) async fn add_option(
    State(state): State<ApiState>,
    caller: Caller,
    Path(kind): Path<String>,
    body: Result<Json<AddOptionRequest>, JsonRejection>,
) -> Result<ApiResponse<AddOutcome>, CatalogError> {
    if !caller.is_admin() {
        return Err(CatalogError::unauthorized(format!("Adding {kind} option")));
    }

    let kind = parse_kind(&kind)?;
    let Json(request) = body.map_err(|e| CatalogError::invalid(e.body_text()))?;

    let outcome = catalog(&state)?.service.add_option(&caller, kind, request.value).await?;
    let message = if outcome.is_created() { "Option added" } else { "Option already exists" };

    Ok(ApiResponse::ok(outcome).with_message(message))
}

#[utoipa::path(
    get,
    path = "/catalog/equipment-name/categories",
    responses(
        (status = OK, description = "Equipment categories", body = ApiResponse<Vec<EquipmentCategory>>),
        (status = INTERNAL_SERVER_ERROR, description = "Storage unavailable", body = ApiErrorBody),
    ),
    tag = CATALOG_TAG,
)]
pub(crate) async fn list_equipment_categories(
    State(state): State<ApiState>,
) -> Result<ApiResponse<Vec<EquipmentCategory>>, CatalogError> {
    let categories = catalog(&state)?.service.list_equipment_categories().await?;
    Ok(ApiResponse::ok(categories))
}

/// Catalog routes, mounted at the API root.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_kinds))
        .routes(routes!(list_options, add_option))
        .routes(routes!(list_equipment_categories))
}

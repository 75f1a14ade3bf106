use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::booking;
use crate::db;
use crate::models::DataBloqueada;

#[derive(Deserialize)]
pub struct BloqueioRequest {
    pub data: String,
    pub motivo: Option<String>,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// `POST /datas-bloqueadas` — block a date. Idempotent; existing
/// appointments on the date are untouched.
pub async fn bloquear(
    State(ctx): State<ApiContext>,
    Json(body): Json<BloqueioRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let data = booking::parse_data(&body.data)?;
    let conn = ctx.conn()?;
    db::bloquear_data(&conn, data, body.motivo.as_deref())?;
    tracing::info!(%data, "Date blocked");
    Ok(Json(SuccessResponse { success: true }))
}

/// `DELETE /datas-bloqueadas/:data` — unblock. No-op success when the
/// date was never blocked.
pub async fn desbloquear(
    State(ctx): State<ApiContext>,
    Path(data): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let data = booking::parse_data(&data)?;
    let conn = ctx.conn()?;
    db::desbloquear_data(&conn, data)?;
    tracing::info!(%data, "Date unblocked");
    Ok(Json(SuccessResponse { success: true }))
}

/// `GET /datas-bloqueadas` — current blocked set, ordered by date.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<DataBloqueada>>, ApiError> {
    let conn = ctx.conn()?;
    Ok(Json(db::list_datas_bloqueadas(&conn)?))
}

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::LogAgendamentoDetalhado;

/// `GET /logs-agendamentos` — status-transition audit trail, newest
/// first, with appointment/client context for the admin panel.
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<LogAgendamentoDetalhado>>, ApiError> {
    let conn = ctx.conn()?;
    Ok(Json(db::list_logs_detalhados(&conn)?))
}

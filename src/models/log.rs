use chrono::NaiveDateTime;
use serde::Serialize;

/// Immutable status-transition record. `status_anterior` is NULL for the
/// genesis entry written at booking time; `agendamento_id` is a weak
/// reference that survives external retention deletes.
#[derive(Debug, Clone, Serialize)]
pub struct LogAgendamento {
    pub id: i64,
    pub agendamento_id: Option<i64>,
    pub status_anterior: Option<String>,
    pub status_novo: String,
    pub alterado_por: String,
    pub criado_em: NaiveDateTime,
}

/// Log entry enriched with appointment and client context for the admin
/// panel listing.
#[derive(Debug, Clone, Serialize)]
pub struct LogAgendamentoDetalhado {
    #[serde(flatten)]
    pub log: LogAgendamento,
    pub data_agendada: Option<String>,
    pub hora_agendada: Option<String>,
    pub cliente_nome: Option<String>,
}

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;

#[derive(Debug, Clone, Serialize)]
pub struct Agendamento {
    pub id: i64,
    pub cliente_id: i64,
    pub servico_id: i64,
    pub data_agendada: NaiveDate,
    pub hora_agendada: NaiveTime,
    pub observacoes: String,
    pub status: AppointmentStatus,
    pub criado_em: NaiveDateTime,
}

/// Appointment with client/service context from the admin-list JOIN.
#[derive(Debug, Clone, Serialize)]
pub struct AgendamentoDetalhado {
    #[serde(flatten)]
    pub agendamento: Agendamento,
    pub cliente_nome: String,
    pub cliente_email: String,
    pub cliente_telefone: String,
    pub servico_nome: String,
    pub servico_preco: f64,
}

/// Booking request as it arrives from the public form. Date and time are
/// raw strings; the Booking Writer owns their validation.
#[derive(Debug, Clone, Deserialize)]
pub struct NovoAgendamento {
    pub cliente_id: i64,
    pub servico_id: i64,
    pub data_agendada: String,
    pub hora_agendada: String,
    #[serde(default)]
    pub observacoes: String,
}

/// One entry of the availability grid for a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disponibilidade {
    pub horario: String,
    pub disponivel: bool,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A calendar date excluded from booking, regardless of slot state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataBloqueada {
    pub data: NaiveDate,
    pub motivo: Option<String>,
}

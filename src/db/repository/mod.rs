//! Repository layer — entity-scoped database operations.
//!
//! Free functions over `&Connection`, re-exported here so callers use
//! `crate::db::*` without caring about the split.

mod agendamento;
mod bloqueio;
mod cliente;
mod log;
mod servico;

pub use agendamento::*;
pub use bloqueio::*;
pub use cliente::*;
pub use log::*;
pub use servico::*;

//! API endpoint handlers.
//!
//! One module per resource; handlers stay thin and delegate to the
//! booking core and repository layer.

pub mod agendamentos;
pub mod clientes;
pub mod datas_bloqueadas;
pub mod disponibilidade;
pub mod health;
pub mod logs;
pub mod servicos;

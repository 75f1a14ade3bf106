pub mod agendamento;
pub mod bloqueio;
pub mod cliente;
pub mod enums;
pub mod log;
pub mod servico;

pub use agendamento::*;
pub use bloqueio::*;
pub use cliente::*;
pub use enums::*;
pub use log::*;
pub use servico::*;

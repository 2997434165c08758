pub mod amount;
pub mod console;
pub mod csv;
pub mod ledger;
pub mod model;

pub use amount::Amount;
pub use ledger::Ledger;
pub use model::{AccountNumber, Command, MovementKind, NationalId, Operation};

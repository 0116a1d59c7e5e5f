pub mod ledger;
pub mod notifier;
pub mod validation;

pub use ledger::Ledger;
pub use notifier::Notifier;
pub use validation::{validate_booking, ValidationError};

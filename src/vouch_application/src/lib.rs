pub mod messages;
pub mod use_cases;

pub use messages::{AccountMessage, AccountMessages};
pub use use_cases::*;

//! Progress ledger and XP aggregation.

pub mod ledger;
pub mod types;
pub mod xp;

pub use ledger::{LogRequest, ProgressError};
pub use types::{ProgressLedger, ProgressRecord};
pub use xp::{recompute_all, XpAggregate, DAILY_XP_CAP};

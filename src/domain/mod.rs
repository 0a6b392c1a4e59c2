mod account;
mod history;
mod money;
pub mod validation;

pub use account::*;
pub use history::*;
pub use money::*;
pub use validation::{AmountIssue, EmailIssue, NameIssue};

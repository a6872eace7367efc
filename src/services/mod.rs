pub mod dependents;
pub mod inventory;
mod remover;
pub mod resolver;
mod teardown;

pub use dependents::find_dependents;
pub use inventory::Inventory;
pub use remover::{ArgumentOutcome, BatchReport, ImageRemover};
pub use resolver::{resolve, resolve_input};
pub use teardown::{Teardown, TeardownPolicy, TeardownReport};

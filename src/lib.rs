pub mod cli;
pub mod domain;
pub mod infra;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{Container, ContainerEngine, ContainerScope, Image, Reference, RmiError};
pub use infra::CliEngine;
pub use services::{ImageRemover, Inventory, Teardown, TeardownPolicy};

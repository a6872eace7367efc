use crate::domain::{ContainerEngine, RmiError};
use crate::services::inventory::Inventory;
use crate::services::resolver::resolve_input;
use crate::services::teardown::{Teardown, TeardownPolicy, TeardownReport};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Result of processing one command-line argument
#[derive(Debug)]
pub enum ArgumentOutcome {
    Removed(TeardownReport),
    Failed(RmiError),
}

impl ArgumentOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(_))
    }
}

/// Outcomes in argument order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<(String, ArgumentOutcome)>,
}

impl BatchReport {
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| !outcome.is_removed())
            .count()
    }

    pub fn all_removed(&self) -> bool {
        self.failures() == 0
    }
}

/// Resolves and tears down user-specified images one after the other
pub struct ImageRemover {
    inventory: Inventory,
    teardown: Teardown,
}

impl ImageRemover {
    pub fn new(inventory: Inventory, teardown: Teardown) -> Self {
        Self {
            inventory,
            teardown,
        }
    }

    /// Loads the inventory from `engine` and wires a teardown with `policy`
    pub fn load(engine: Arc<dyn ContainerEngine>, policy: TeardownPolicy) -> Self {
        let inventory = Inventory::load(engine.as_ref());
        Self::new(inventory, Teardown::new(engine, policy))
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Processes every argument in order, continuing past failures
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> BatchReport {
        let mut report = BatchReport::default();

        for arg in args {
            let arg = arg.as_ref();
            let outcome = match self.remove(arg) {
                Ok(teardown) => {
                    if !teardown.is_clean() {
                        warn!(
                            arg,
                            stop_failed = ?teardown.stop_failed,
                            remove_failed = ?teardown.remove_failed,
                            "imagem removida, mas alguns containers falharam"
                        );
                    }
                    ArgumentOutcome::Removed(teardown)
                }
                Err(e) => {
                    self.report_failure(arg, &e);
                    ArgumentOutcome::Failed(e)
                }
            };
            report.outcomes.push((arg.to_string(), outcome));
        }

        report
    }

    pub fn remove(&self, arg: &str) -> Result<TeardownReport, RmiError> {
        let image = resolve_input(arg, self.inventory.images())?;
        debug!(id = %image.id, repo = %image.repo, tag = %image.tag, "imagem encontrada");

        self.teardown.teardown(image, &self.inventory)
    }

    fn report_failure(&self, arg: &str, e: &RmiError) {
        match e {
            RmiError::BlockedByRunningContainers { image, containers } => {
                warn!(
                    image = %image,
                    "containers em execução usam a imagem, pare-os manualmente:"
                );
                for id in containers {
                    warn!("\t{id}");
                }
                warn!("ou tente novamente com \"--stop-running\"");
            }
            RmiError::NotFound { .. } | RmiError::Ambiguous { .. } => {
                error!(arg, "Informe dados corretos da imagem: {e}");
            }
            RmiError::InvalidReference(_) => error!(arg, "{e}"),
            // teardown already logged the command and its output
            RmiError::Engine(_) => info!(arg, "imagem mantida"),
        }
    }
}

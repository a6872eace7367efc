use crate::domain::{ContainerEngine, ContainerScope, EngineError, Image, RmiError};
use crate::services::dependents::find_dependents;
use crate::services::inventory::Inventory;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeardownPolicy {
    /// Stop running dependents instead of refusing to touch the image
    pub stop_running: bool,
}

impl Default for TeardownPolicy {
    fn default() -> Self {
        Self { stop_running: true }
    }
}

/// What happened to one image and its dependents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub image: String,
    pub stopped: Vec<String>,
    pub stop_failed: Vec<String>,
    pub removed: Vec<String>,
    pub remove_failed: Vec<String>,
}

impl TeardownReport {
    /// True when every stop and container removal succeeded
    pub fn is_clean(&self) -> bool {
        self.stop_failed.is_empty() && self.remove_failed.is_empty()
    }
}

/// Stops dependents if allowed, removes them, then removes the image
pub struct Teardown {
    engine: Arc<dyn ContainerEngine>,
    policy: TeardownPolicy,
}

impl Teardown {
    pub fn new(engine: Arc<dyn ContainerEngine>, policy: TeardownPolicy) -> Self {
        Self { engine, policy }
    }

    /// Tears `image` down against the snapshot in `inventory`.
    ///
    /// Fails with `BlockedByRunningContainers` before any mutation when running
    /// dependents exist and stopping is disabled. Stop and container-removal
    /// failures are recorded in the report; only a failed image removal is
    /// returned as an error.
    pub fn teardown(
        &self,
        image: &Image,
        inventory: &Inventory,
    ) -> Result<TeardownReport, RmiError> {
        let target = image.removal_target();
        let mut report = TeardownReport {
            image: target.clone(),
            ..Default::default()
        };

        let running = find_dependents(image, inventory.containers(ContainerScope::Running));
        if !running.is_empty() {
            if !self.policy.stop_running {
                return Err(RmiError::BlockedByRunningContainers {
                    image: target,
                    containers: running.iter().map(|c| c.id.clone()).collect(),
                });
            }

            for container in running {
                match self.engine.stop_container(&container.id) {
                    Ok(()) => {
                        info!(container = %container.id, "container parado");
                        report.stopped.push(container.id.clone());
                    }
                    Err(e) => {
                        log_failure("falha ao parar container", &e);
                        report.stop_failed.push(container.id.clone());
                    }
                }
            }
        }

        for container in find_dependents(image, inventory.containers(ContainerScope::All)) {
            match self.engine.remove_container(&container.id) {
                Ok(()) => {
                    info!(container = %container.id, "container removido");
                    report.removed.push(container.id.clone());
                }
                Err(e) => {
                    log_failure("falha ao remover container", &e);
                    report.remove_failed.push(container.id.clone());
                }
            }
        }

        match self.engine.remove_image(&target) {
            Ok(()) => {
                info!(image = %target, "imagem removida");
                Ok(report)
            }
            Err(e) => {
                log_failure("falha ao remover imagem", &e);
                Err(e.into())
            }
        }
    }
}

fn log_failure(message: &str, e: &EngineError) {
    error!(cmd = e.command(), output = e.output(), error = %e, "{message}");
}

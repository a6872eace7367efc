use crate::domain::{ContainerEngine, ContainerScope, EngineError};
use std::collections::HashSet;
use std::sync::RwLock;

/// In-memory engine that serves canned listings and records every call.
///
/// Calls are recorded as `op` or `op:arg` (e.g. `stop:c1`,
/// `list_containers:running`, `remove_image:abc`). A failing listing behaves
/// like an engine that printed its canned output and then exited with status 1.
#[derive(Debug, Default)]
pub struct MockEngine {
    images: String,
    all_containers: String,
    running_containers: String,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<HashSet<String>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_images(mut self, output: &str) -> Self {
        self.images = output.to_string();
        self
    }

    pub fn with_containers(mut self, scope: ContainerScope, output: &str) -> Self {
        match scope {
            ContainerScope::All => self.all_containers = output.to_string(),
            ContainerScope::Running => self.running_containers = output.to_string(),
        }
        self
    }

    /// Makes calls fail, either a whole operation (`stop`) or one target (`stop:c1`)
    pub fn set_fail_on(&self, operation: &str) {
        self.fail_on.write().unwrap().insert(operation.to_string());
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    fn record(&self, op: &str, arg: Option<&str>, stdout: &str) -> Result<(), EngineError> {
        let cmd = match arg {
            Some(arg) => format!("{op}:{arg}"),
            None => op.to_string(),
        };
        self.commands.write().unwrap().push(cmd.clone());

        let fail_on = self.fail_on.read().unwrap();
        if fail_on.contains(op) || fail_on.contains(&cmd) {
            return Err(EngineError::Failed {
                command: cmd,
                code: Some(1),
                stdout: stdout.to_string(),
                output: format!("{stdout}Mock failure on: {op}"),
            });
        }
        Ok(())
    }
}

impl ContainerEngine for MockEngine {
    fn list_images(&self) -> Result<String, EngineError> {
        self.record("list_images", None, &self.images)?;
        Ok(self.images.clone())
    }

    fn list_containers(&self, scope: ContainerScope) -> Result<String, EngineError> {
        let output = match scope {
            ContainerScope::All => &self.all_containers,
            ContainerScope::Running => &self.running_containers,
        };
        self.record("list_containers", Some(&scope.to_string()), output)?;
        Ok(output.clone())
    }

    fn stop_container(&self, id: &str) -> Result<(), EngineError> {
        self.record("stop", Some(id), "")
    }

    fn remove_container(&self, id: &str) -> Result<(), EngineError> {
        self.record("remove_container", Some(id), "")
    }

    fn remove_image(&self, reference: &str) -> Result<(), EngineError> {
        self.record("remove_image", Some(reference), "")
    }
}

use crate::domain::{ContainerEngine, ContainerScope, EngineError};
use std::ffi::OsStr;
use std::process::Command;
use tracing::debug;

pub const DEFAULT_ENGINE: &str = "docker";

const IMAGE_FORMAT: &str = "{{.ID}}:{{.Repository}}:{{.Tag}}";
const CONTAINER_FORMAT: &str = "{{.ID}}|{{.Image}}";

/// Drives a docker-compatible CLI (`docker`, `podman`) through argument vectors
#[derive(Debug, Clone)]
pub struct CliEngine {
    binary: String,
}

impl CliEngine {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn output<I, S>(&self, args: I) -> Result<String, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<_> = args
            .into_iter()
            .map(|item| item.as_ref().to_os_string())
            .collect();
        let command = render_command(&self.binary, &args);
        debug!(cmd = %command, "executando");

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|source| EngineError::Spawn {
                command: command.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            return Ok(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(EngineError::Failed {
            command,
            code: output.status.code(),
            output: format!("{stdout}{stderr}").trim().to_string(),
            stdout,
        })
    }

    fn run<I, S>(&self, args: I) -> Result<(), EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.output(args).map(|_| ())
    }
}

impl Default for CliEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE)
    }
}

impl ContainerEngine for CliEngine {
    fn list_images(&self) -> Result<String, EngineError> {
        self.output(["images", "--format", IMAGE_FORMAT])
    }

    fn list_containers(&self, scope: ContainerScope) -> Result<String, EngineError> {
        self.output(container_list_args(scope))
    }

    fn stop_container(&self, id: &str) -> Result<(), EngineError> {
        self.run(["stop", id])
    }

    fn remove_container(&self, id: &str) -> Result<(), EngineError> {
        self.run(["rm", id])
    }

    fn remove_image(&self, reference: &str) -> Result<(), EngineError> {
        self.run(["rmi", reference])
    }
}

fn container_list_args(scope: ContainerScope) -> Vec<&'static str> {
    match scope {
        ContainerScope::All => vec!["ps", "-a", "--format", CONTAINER_FORMAT],
        ContainerScope::Running => vec!["ps", "--format", CONTAINER_FORMAT],
    }
}

fn render_command(binary: &str, args: &[std::ffi::OsString]) -> String {
    let mut rendered = binary.to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&arg.to_string_lossy());
    }
    rendered
}

use super::{Image, Reference};
use thiserror::Error;

/// Failure of a single engine invocation
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("não foi possível executar `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited non-zero; `stdout` may still hold records
    #[error("`{command}` retornou {}", format_code(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        stdout: String,
        output: String,
    },
}

impl EngineError {
    pub fn command(&self) -> &str {
        match self {
            Self::Spawn { command, .. } | Self::Failed { command, .. } => command,
        }
    }

    /// Captured stdout/stderr of the failed invocation, empty if it never ran
    pub fn output(&self) -> &str {
        match self {
            Self::Failed { output, .. } => output,
            Self::Spawn { .. } => "",
        }
    }

    /// Stdout alone, for listings whose records precede the failure
    pub fn stdout(&self) -> &str {
        match self {
            Self::Failed { stdout, .. } => stdout,
            Self::Spawn { .. } => "",
        }
    }
}

fn format_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "sem status (encerrado por sinal)".to_string(),
    }
}

/// Why a single image argument could not be (fully) removed
#[derive(Debug, Error)]
pub enum RmiError {
    #[error("formato de imagem inválido '{0}', use \"repo:tag\" ou um ID")]
    InvalidReference(String),

    #[error("imagem não encontrada ({query})")]
    NotFound { query: Reference },

    #[error("múltiplas imagens encontradas ({query}):{}", format_candidates(.candidates))]
    Ambiguous {
        query: Reference,
        candidates: Vec<Image>,
    },

    #[error(
        "containers em execução usam {image}: {}",
        .containers.join(", ")
    )]
    BlockedByRunningContainers {
        image: String,
        containers: Vec<String>,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn format_candidates(candidates: &[Image]) -> String {
    candidates
        .iter()
        .map(|img| format!("\n\t{img}"))
        .collect()
}

use crate::domain::ContainerEngine;
use crate::infra::config::{default_config_dir, expand_config_dir, load_app_config};
use crate::infra::{AppConfig, CliEngine, Settings};
use crate::services::{BatchReport, ImageRemover, TeardownPolicy};
use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "dockerrmi",
    version,
    disable_version_flag = true,
    about = "Remove imagens docker junto com os containers que as usam",
    long_about = "Remove as imagens informadas (repo:tag, repo ou ID) e os containers \
                  que dependem delas. Containers em execução são parados antes, a menos \
                  que --stop-running=false seja usado."
)]
pub struct Cli {
    /// Imagens a remover: repo:tag, repo (tag latest) ou prefixo de ID
    #[arg(value_name = "IMAGES")]
    pub images: Vec<String>,

    /// Para containers em execução que usam a imagem (padrão: true)
    #[arg(
        short = 's',
        long,
        env = "DOCKERRMI_STOP_RUNNING",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub stop_running: Option<bool>,

    /// Binário do engine (docker, podman)
    #[arg(long, env = "DOCKERRMI_ENGINE")]
    pub engine: Option<String>,

    /// Diretório de configuração (default: ~/.config/dockerrmi)
    #[arg(long, env = "DOCKERRMI_CONFIG_DIR", default_value_os_t = default_config_dir())]
    pub config_dir: PathBuf,

    /// Mostra logs de debug (imagens e containers lidos)
    #[arg(long)]
    pub verbose: bool,

    /// Mostra a versão
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

impl Cli {
    /// Config files with command-line flags applied on top
    pub fn settings(&self) -> Result<Settings> {
        let config_dir = expand_config_dir(&self.config_dir);
        let mut config = load_app_config(&config_dir)
            .with_context(|| format!("carregando config de {:?}", config_dir))?;

        config.merge(AppConfig {
            engine: self.engine.clone(),
            stop_running: self.stop_running,
        });

        let settings = config.into_settings();
        debug!(?settings, "configuração efetiva");
        Ok(settings)
    }
}

pub fn run(cli: Cli) -> Result<BatchReport> {
    if cli.images.is_empty() {
        bail!("você deve especificar ao menos uma imagem");
    }

    let settings = cli.settings()?;
    let engine = Arc::new(CliEngine::new(settings.engine.clone()));
    run_with_engine(
        &cli.images,
        engine,
        TeardownPolicy {
            stop_running: settings.stop_running,
        },
    )
}

/// Loads the inventory from `engine` and removes `images` in order
pub fn run_with_engine(
    images: &[String],
    engine: Arc<dyn ContainerEngine>,
    policy: TeardownPolicy,
) -> Result<BatchReport> {
    if images.is_empty() {
        bail!("você deve especificar ao menos uma imagem");
    }

    let remover = ImageRemover::load(engine, policy);
    let report = remover.run(images);

    let failures = report.failures();
    if failures == 0 {
        info!(total = images.len(), "todas as imagens foram removidas");
    } else {
        warn!(
            total = images.len(),
            failures, "algumas imagens não foram removidas"
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsString;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_stop_running_flag_forms() {
        let cli = Cli::try_parse_from(["dockerrmi", "nginx"]).unwrap();
        assert_eq!(cli.stop_running, None);

        let cli = Cli::try_parse_from(["dockerrmi", "-s", "nginx"]).unwrap();
        assert_eq!(cli.stop_running, Some(true));
        assert_eq!(cli.images, vec!["nginx"]);

        let cli = Cli::try_parse_from(["dockerrmi", "--stop-running=false", "a", "b:1"]).unwrap();
        assert_eq!(cli.stop_running, Some(false));
        assert_eq!(cli.images, vec!["a", "b:1"]);
    }

    #[test]
    fn test_version_flag_short_circuits() {
        let err = Cli::try_parse_from(["dockerrmi", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_flags_override_config_files() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(
            dir.path().join("dockerrmi.toml"),
            "engine = \"podman\"\nstop_running = true\n",
        )?;

        let args: Vec<OsString> = vec![
            "dockerrmi".into(),
            "--stop-running=false".into(),
            "--config-dir".into(),
            dir.path().as_os_str().to_os_string(),
            "nginx".into(),
        ];
        let cli = Cli::try_parse_from(args)?;
        let settings = cli.settings()?;

        assert_eq!(settings.engine, "podman");
        assert!(!settings.stop_running);
        Ok(())
    }

    #[test]
    fn test_missing_images_is_fatal() {
        let cli = Cli::try_parse_from(["dockerrmi"]).unwrap();
        assert!(run(cli).is_err());
    }
}

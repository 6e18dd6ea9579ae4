//! Wiring configuration, workspace and provider together at startup.

use crate::chat_service::ChatService;
use anyhow::{Context as _, Result};
use nani_core::config::NaniConfig;
use nani_core::provider::CompletionProvider;
use nani_infrastructure::{ConfigService, Workspace};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Everything a front end needs after startup.
pub struct App {
    pub config: NaniConfig,
    pub workspace: Arc<Mutex<Workspace>>,
    pub chat: ChatService,
}

/// Opens the workspace named by `config` under `base_dir`.
pub fn open_workspace(config: &NaniConfig, base_dir: impl AsRef<Path>) -> Result<Workspace> {
    let root = base_dir.as_ref().join(&config.workspace.dir_name);
    let workspace = Workspace::open_at(&root, config.project.clone())
        .with_context(|| format!("failed to open workspace at {}", root.display()))?;
    tracing::info!(
        "Opened workspace {} at {}",
        workspace.context().workspace,
        root.display()
    );
    Ok(workspace)
}

/// Loads (creating on first run) the configuration, opens the workspace under
/// `base_dir` and builds the chat service around `provider`.
///
/// Tracing is not initialised here; call
/// [`crate::telemetry::init_tracing`] with `config.logging.filter` first if
/// wanted.
pub fn bootstrap(
    config_service: &ConfigService,
    base_dir: impl AsRef<Path>,
    provider: Arc<dyn CompletionProvider>,
) -> Result<App> {
    let config = config_service.ensure_exists().with_context(|| {
        format!(
            "failed to load configuration from {}",
            config_service.path().display()
        )
    })?;

    let workspace = Arc::new(Mutex::new(open_workspace(&config, base_dir)?));
    let chat = ChatService::from_config(workspace.clone(), provider, &config);

    Ok(App {
        config,
        workspace,
        chat,
    })
}

//! Composition root: wires configuration, storage and the HTTP API into
//! the application services.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use apdesk_application::{ApprovalBook, ApprovalWorkflow, ClientRoster, SessionGuard, ViewGate};
use apdesk_core::api::DeskApi;
use apdesk_core::config::RootConfig;
use apdesk_core::document::DownloadSink;
use apdesk_core::notification::Notifier;
use apdesk_core::route::Route;
use apdesk_infrastructure::config_service::apply_overrides;
use apdesk_infrastructure::{
    ConfigService, DeskPaths, FileSessionStore, FileSystemDownloadSink,
};
use apdesk_interaction::HttpDeskApi;
use colored::Colorize;

use crate::terminal::TerminalNotifier;

/// Global options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config_dir: Option<PathBuf>,
    pub api_url: Option<String>,
}

pub struct AppContext {
    pub paths: DeskPaths,
    pub config_service: ConfigService,
    pub config: RootConfig,
    pub api: Arc<dyn DeskApi>,
    pub notifier: Arc<dyn Notifier>,
    pub sink: Arc<dyn DownloadSink>,
    pub guard: SessionGuard,
}

impl AppContext {
    /// Loads configuration only; used before logging is up.
    pub fn load_config(options: &GlobalOptions) -> Result<(DeskPaths, ConfigService, RootConfig)> {
        let paths = DeskPaths::new(options.config_dir.as_deref());
        let service = ConfigService::new(&paths)?;
        let config = service
            .load_with_env()
            .with_context(|| format!("Failed to load {}", service.path().display()))?;
        let config = apply_overrides(config, options.api_url.clone());
        Ok((paths, service, config))
    }

    pub async fn build(
        paths: DeskPaths,
        config_service: ConfigService,
        config: RootConfig,
    ) -> Result<Self> {
        let api = HttpDeskApi::from_config(&config.api)?;
        tracing::debug!("Using API at {}", api.base_url());

        let downloads_dir = match &config.downloads.dir {
            Some(dir) => dir.clone(),
            None => paths.downloads_dir()?,
        };
        let store = FileSessionStore::new(&paths)?;
        let guard = SessionGuard::init(Arc::new(store)).await;

        Ok(Self {
            config_service,
            paths,
            config,
            api: Arc::new(api),
            notifier: Arc::new(TerminalNotifier::new(true)),
            sink: Arc::new(FileSystemDownloadSink::new(downloads_dir)),
            guard,
        })
    }

    /// Activates `route` through the session guard.
    ///
    /// A redirect is reported and turned into an error so no API call
    /// follows.
    pub async fn enter(&self, route: Route) -> Result<()> {
        let gate = self.guard.activate(route).await;
        if let ViewGate::Redirect(target) = gate {
            eprintln!(
                "{}",
                format!("{} requires a session; redirected to {}.", route, target.path()).yellow()
            );
        }
        gate.into_result()
            .context("Not logged in. Run `apdesk login --user <name>` first.")?;
        Ok(())
    }

    pub fn roster(&self) -> ClientRoster {
        ClientRoster::new(self.api.clone(), self.notifier.clone(), self.sink.clone())
    }

    pub fn approval_book(&self) -> ApprovalBook {
        ApprovalBook::new(self.api.clone())
    }

    pub fn workflow(&self) -> ApprovalWorkflow {
        ApprovalWorkflow::new(
            self.api.clone(),
            self.notifier.clone(),
            self.sink.clone(),
            self.config.workflow.clone(),
        )
    }
}

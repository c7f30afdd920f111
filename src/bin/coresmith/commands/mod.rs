//! Command implementations

pub mod deps;
pub mod get;
pub mod list;
pub mod roots;
pub mod show;
pub mod systems;

use anyhow::{Context, Result};

use crate::cli::Cli;
use coresmith::util::config::{self, Config};
use coresmith::util::diagnostic::{self, Diagnostic};
use coresmith::CoreManager;

/// Build the registry for this run from config files and command line flags.
///
/// Configured roots that are missing only produce a warning; roots given on
/// the command line must exist. Descriptors that fail to load are logged as
/// warnings during the scan.
pub fn load_registry(cli: &Cli, color: bool) -> Result<CoreManager> {
    let config = if cli.no_config {
        Config::default()
    } else {
        let cwd = std::env::current_dir().context("failed to determine current directory")?;
        config::load_config(
            config::global_config_path().as_deref(),
            &config::project_config_path(&cwd),
        )
    };

    let mut manager = CoreManager::default();
    manager.set_tool(cli.tool.clone().or(config.main.tool));

    for root in &config.main.cores_root {
        if let Err(e) = manager.add_root(root) {
            diagnostic::emit(
                &Diagnostic::warning(format!("ignoring configured cores root: {}", e)),
                color,
            );
        }
    }

    for root in &cli.cores_root {
        manager
            .add_root(root)
            .with_context(|| format!("failed to add cores root {}", root.display()))?;
    }

    tracing::debug!(
        "{} core(s) from {} root(s)",
        manager.db().len(),
        manager.cores_root().len()
    );

    Ok(manager)
}

use crate::app::status::render_status;
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::journal::Journal;
use crate::mcp::McpServer;
use crate::tools::{ExecutionContext, build_registry, tool_descriptions};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Open the journal under the configured storage root.
pub fn open_journal(config: &Config) -> Result<Arc<Journal>> {
    let root = config.storage_path();
    let journal = Journal::open(&root)
        .with_context(|| format!("Failed to open journal at {}", root.display()))?;
    info!(root = %root.display(), "journal opened");
    Ok(Arc::new(journal))
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let journal = open_journal(&config)?;

    match cli.resolved_command() {
        Commands::Serve => {
            let server = McpServer::new(build_registry(&journal), config.server.clone());
            server.serve_stdio().await?;
            Ok(())
        }

        Commands::Call { tool, args } => {
            let output = call_tool(&journal, &tool, &args).await?;
            println!("{output}");
            Ok(())
        }

        Commands::Tools => {
            for (name, description) in tool_descriptions(&build_registry(&journal)) {
                println!("{name:<30} {description}");
            }
            Ok(())
        }

        Commands::Status => {
            println!("{}", render_status(&config, &journal));
            Ok(())
        }
    }
}

/// Run one tool outside the server loop. An unsuccessful result is an error
/// so the process exits non-zero.
pub async fn call_tool(journal: &Arc<Journal>, tool: &str, raw_args: &str) -> Result<String> {
    let args: Value =
        serde_json::from_str(raw_args).context("--args must be a JSON object")?;
    if !args.is_object() {
        bail!("--args must be a JSON object");
    }

    let registry = build_registry(journal);
    let ctx = ExecutionContext::new("cli");
    let result = registry.execute(tool, args, &ctx).await?;

    if result.success {
        Ok(result.output)
    } else if result.output.is_empty() {
        bail!("{}", result.error.unwrap_or_else(|| format!("{tool} failed")))
    } else {
        bail!("{}", result.output)
    }
}

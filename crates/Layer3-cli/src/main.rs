//! Arbor CLI - Main entry point

mod commands;
mod console;

use arbor_core::{CommandHost, MessageCatalog, Status};
use arbor_foundation::{
    Actor, AppConfig, ConfigStore, ConsoleActor, PermissionSet, PermissionSettings,
};
use clap::Parser;
use commands::CommandContext;
use console::ConsoleMessenger;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Arbor - dispatch commands through a permission-checked command tree
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (JSON or TOML). Defaults to .arbor/config.json
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Permissions file (JSON or TOML). Defaults to global + project permissions.json
    #[arg(long)]
    permissions: Option<PathBuf>,

    /// Name of the invoking actor
    #[arg(long, default_value = "player")]
    actor: String,

    /// Grant a permission pattern (e.g. arbor.cmd.*)
    #[arg(short, long = "grant")]
    grants: Vec<String>,

    /// Deny a permission pattern
    #[arg(long = "deny")]
    denies: Vec<String>,

    /// Run as the console (every permission)
    #[arg(long)]
    console: bool,

    /// Print every command path with its permission and exit
    #[arg(long)]
    tree: bool,

    /// Read command lines from stdin
    #[arg(long)]
    repl: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Tokens passed to the root command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let config = match &args.config {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::load_from(&ConfigStore::current_project()?)?,
    };

    let catalog = Arc::new(MessageCatalog::new().with_overrides(config.messages.clone()));
    let ctx = CommandContext {
        messenger: Arc::new(ConsoleMessenger),
        catalog: Arc::clone(&catalog),
        config_path: args.config.clone(),
    };
    let tree = commands::build_tree(&config, &ctx)?;

    if args.tree {
        for (path, permission) in tree.permission_paths() {
            println!("{:<28} {}", path, permission);
        }
        return Ok(());
    }

    let actor = load_actor(&args)?;
    let host = CommandHost::new(tree, Arc::clone(&ctx.messenger), catalog);

    if args.repl {
        return run_repl(&host, actor.as_ref());
    }

    let status = host.on_command(actor.as_ref(), &args.tokens);
    tracing::debug!("Finished with {}", status);
    if !status.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

/// Build the invoking actor from flags and permission files
fn load_actor(args: &Args) -> anyhow::Result<Box<dyn Actor>> {
    if args.console {
        return Ok(Box::new(ConsoleActor));
    }

    let mut settings: PermissionSettings = match &args.permissions {
        Some(path) => ConfigStore::read_path(path)?,
        None => PermissionSettings::load()?,
    };
    for grant in &args.grants {
        settings.add_grant(grant);
    }
    for deny in &args.denies {
        settings.add_deny(deny);
    }

    Ok(Box::new(PermissionSet::new(args.actor.clone(), settings)))
}

/// One command line per input line. A leading `/label` or `label` is
/// dropped so pasted commands work as typed.
fn run_repl(host: &CommandHost, actor: &dyn Actor) -> anyhow::Result<()> {
    let label = host.tree().owner().command_label().to_string();
    let stdin = std::io::stdin();

    for line in stdin.lock().lines() {
        let line = line?;
        let mut tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens[0].trim_start_matches('/') == label {
            tokens.remove(0);
        }

        let status = host.on_command(actor, &tokens);
        if status != Status::Ok {
            tracing::debug!("'{}' finished with {}", line, status);
        }
    }

    Ok(())
}

// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! padlink - companion core for a Bluetooth joystick remote.
//!
//! This is the binary entry point: a CLI over the task, history, chat,
//! coupon, subscription and payment stores.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod app;
mod commands;
mod console;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use padlink_core::types::CouponScope;
use tracing::error;

use crate::app::App;

/// padlink - companion core for a Bluetooth joystick remote.
#[derive(Parser, Debug)]
#[command(name = "padlink", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage saved control tasks.
    #[command(subcommand)]
    Task(TaskCommands),
    /// Send actions as one joystick session and save it to history.
    Drive {
        /// Comma-separated action codes, e.g. "F,F,L,S".
        actions: String,
        /// Name recorded with the history row.
        #[arg(long, default_value = "manual")]
        name: String,
    },
    /// Inspect or clear completed sessions.
    #[command(subcommand)]
    History(HistoryCommands),
    /// Chat with a peer.
    #[command(subcommand)]
    Chat(ChatCommands),
    /// Manage discount coupons.
    #[command(subcommand)]
    Coupon(CouponCommands),
    /// Check the subscription state.
    #[command(subcommand)]
    Subscription(SubscriptionCommands),
    /// Pay for one subscription period through PayPal.
    Pay {
        #[arg(long)]
        coupon: Option<String>,
        #[arg(long, default_value = "public")]
        scope: CouponScope,
    },
    /// Print the effective configuration.
    Config,
}

#[derive(Subcommand, Debug)]
pub(crate) enum TaskCommands {
    List,
    Add {
        title: String,
        /// Comma-separated action codes.
        #[arg(long)]
        actions: Option<String>,
    },
    Delete {
        id: i64,
    },
    /// Flip the enabled flag.
    Toggle {
        id: i64,
    },
    /// Replay the task's actions. Disabled tasks are skipped.
    Run {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum HistoryCommands {
    List,
    Clear,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ChatCommands {
    List {
        peer: String,
    },
    Send {
        peer: String,
        text: String,
    },
    /// Delete one peer's messages, or all messages.
    Clear {
        peer: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum CouponCommands {
    Add {
        code: String,
        #[arg(long, default_value = "public")]
        scope: CouponScope,
        /// Percentage in [0, 100].
        #[arg(long)]
        discount: f64,
    },
    /// Show the price after applying a coupon.
    Apply {
        code: String,
        #[arg(long, default_value = "public")]
        scope: CouponScope,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum SubscriptionCommands {
    /// Reconcile against the subscription record and cache the result.
    Check,
    /// Show the cached state without a remote check.
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => padlink_config::load_and_validate_path(path),
        None => padlink_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            padlink_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    let Some(command) = cli.command else {
        println!("padlink: use --help for available commands");
        return;
    };

    if let Commands::Config = command {
        if let Err(e) = commands::show_config(&config) {
            eprintln!("padlink: {e}");
            std::process::exit(1);
        }
        return;
    }

    let app = match App::open(config).await {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "failed to initialize storage");
            eprintln!("padlink: {e}");
            std::process::exit(1);
        }
    };

    let result = match command {
        Commands::Task(cmd) => commands::task(&app, cmd).await,
        Commands::Drive { actions, name } => commands::drive(&app, &name, &actions).await,
        Commands::History(cmd) => commands::history(&app, cmd).await,
        Commands::Chat(cmd) => commands::chat(&app, cmd).await,
        Commands::Coupon(cmd) => commands::coupon(&app, cmd).await,
        Commands::Subscription(cmd) => commands::subscription(&app, cmd).await,
        Commands::Pay { coupon, scope } => commands::pay(&app, coupon, scope).await,
        Commands::Config => Ok(()),
    };

    let closed = app.close().await;
    if let Err(e) = result.and(closed) {
        eprintln!("padlink: {e}");
        std::process::exit(1);
    }
}

/// Install the fmt subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("padlink={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the stats epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn default_config_is_valid() {
        let config = padlink_config::load_and_validate_str("").expect("defaults should validate");
        assert_eq!(config.app.owner_id, "local");
    }

    #[test]
    fn parses_task_add_with_actions() {
        let cli = Cli::try_parse_from(["padlink", "task", "add", "Patrol", "--actions", "F,L"])
            .unwrap();
        match cli.command {
            Some(Commands::Task(TaskCommands::Add { title, actions })) => {
                assert_eq!(title, "Patrol");
                assert_eq!(actions.as_deref(), Some("F,L"));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn parses_coupon_scope() {
        let cli = Cli::try_parse_from([
            "padlink", "coupon", "add", "VIP", "--scope", "private", "--discount", "40",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Coupon(CouponCommands::Add {
                scope, discount, ..
            })) => {
                assert_eq!(scope, CouponScope::Private);
                assert_eq!(discount, 40.0);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_scope() {
        assert!(
            Cli::try_parse_from(["padlink", "coupon", "apply", "X", "--scope", "secret"]).is_err()
        );
    }

    #[test]
    fn global_config_flag() {
        let cli = Cli::try_parse_from(["padlink", "history", "list", "--config", "/tmp/p.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/p.toml")));
    }
}

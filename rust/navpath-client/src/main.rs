use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use navpath_client::{Config, NavClient};
use navpath_core::{convert, ItemMerge, StaticGame, Tile};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "navpath-client", version, about = "Query a navpath navigation service")]
struct Args {
    /// Base URL of the navigation service (overrides NAVPATH_URL)
    #[arg(long, global = true, value_name = "URL")]
    url: Option<String>,

    /// How to fold duplicate item names: overwrite or sum (overrides NAVPATH_ITEM_MERGE)
    #[arg(long = "item-merge", global = true, value_name = "POLICY")]
    item_merge: Option<ItemMerge>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the server's data selection
    Select,
    /// Request a path between two tiles
    Path {
        /// Start tile as x,y,plane
        #[arg(long, value_name = "X,Y,PLANE")]
        start: Tile,

        /// End tile as x,y,plane
        #[arg(long, value_name = "X,Y,PLANE")]
        end: Tile,

        /// JSON dump of the game state
        #[arg(long, value_name = "PATH")]
        state: PathBuf,

        /// Print host web-path vertices instead of raw edges
        #[arg(long)]
        native: bool,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().with_writer(std::io::stderr).init();

    match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "navpath-client failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let mut cfg = Config::from_env()?;
    if let Some(url) = args.url {
        cfg = Config { item_merge: cfg.item_merge, ..Config::new(url) };
    }
    if let Some(policy) = args.item_merge {
        cfg.item_merge = policy;
    }
    info!(core_version = %navpath_core::version(), url = %cfg.base_url, "starting navpath-client");
    let client = NavClient::new(cfg).context("building http client")?;

    match args.command {
        Command::Select => {
            let Some(sel) = client.selection()? else {
                warn!("data selection unavailable");
                return Ok(ExitCode::FAILURE);
            };
            println!("{}", serde_json::to_string_pretty(&*sel)?);
        }
        Command::Path { start, end, state, native } => {
            let raw = std::fs::read_to_string(&state).with_context(|| format!("reading {}", state.display()))?;
            let game = StaticGame::from_json(&raw).with_context(|| format!("parsing {}", state.display()))?;
            let Some(path) = client.build_between(start, end, &game)? else {
                warn!(%start, %end, "path unavailable");
                return Ok(ExitCode::FAILURE);
            };
            if native {
                let web = convert(&path, &game)?;
                println!("{}", serde_json::to_string_pretty(&web)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&path)?);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

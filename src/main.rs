//! Route file inspection tool.
//!
//! Loads a TOML route file into a routing table and reports which slot a
//! path resolves to, or dispatches it to the built-in `echo` handler.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use proxy_table::config::load_config;
use proxy_table::observability::logging::init_logging;
use proxy_table::{HandlerRegistry, ParamBindings, ProxyTable};

#[derive(Parser)]
#[command(name = "proxy-table")]
#[command(about = "Inspect and exercise a proxy routing table", long_about = None)]
struct Cli {
    /// Route file (TOML).
    #[arg(short, long)]
    config: PathBuf,

    /// Log level, overrides the route file.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List occupied slots in match order
    Routes,
    /// Show which slot each path resolves to
    Find { paths: Vec<String> },
    /// Dispatch a path, forwarding the extra arguments
    Dispatch { path: String, args: Vec<String> },
}

fn registry() -> HandlerRegistry<Vec<String>> {
    let mut registry = HandlerRegistry::new();
    registry.register("echo", |params: &ParamBindings, args: Vec<String>| {
        println!("{}", json!({ "params": params, "args": args }));
    });
    registry
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    init_logging(level);

    let table: ProxyTable<Vec<String>> = ProxyTable::from_config(&config, &registry());

    match cli.command {
        Commands::Routes => {
            for (slot, pattern) in table.slots() {
                println!("{}", json!({ "slot": slot, "pattern": pattern }));
            }
        }
        Commands::Find { paths } => {
            for path in paths {
                let line = match table.resolve(&path) {
                    Some((slot, params)) => json!({ "path": path, "slot": slot, "params": params }),
                    None => json!({ "path": path, "slot": null }),
                };
                println!("{}", line);
            }
        }
        Commands::Dispatch { path, args } => {
            if table.find(&path).is_none() {
                eprintln!("No route matched {}", path);
            }
            table.dispatch(&path, args);
        }
    }

    Ok(())
}

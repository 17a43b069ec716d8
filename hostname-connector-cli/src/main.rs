//! `hcq`: query the `cloudflare_custom_hostname` table from the command line.
//!
//! Rows are written to stdout as JSON lines; logs go to stderr.

mod config;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hostname_connector_core::{CUSTOM_HOSTNAME_TABLE, Plugin, Quals, Record, table_definition};
use hostname_connector_provider::create_client;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hcq")]
#[command(about = "Query Cloudflare custom hostnames as table rows", long_about = None)]
struct Args {
    /// Config file (defaults to <config dir>/hostname-connector/config.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Table to query
    #[arg(long, short = 't', global = true, default_value = CUSTOM_HOSTNAME_TABLE)]
    table: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the table definition
    Columns,
    /// List every custom hostname of every zone
    List {
        /// Only read this zone
        #[arg(long)]
        zone_id: Option<String>,
    },
    /// Fetch one custom hostname
    Get {
        #[arg(long)]
        zone_id: String,
        #[arg(long)]
        id: String,
    },
    /// Check that the configured credentials are accepted
    Verify,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_ansi(false)
        .with_target(debug)
        .init();
}

fn build_plugin(config: Option<&std::path::Path>) -> Result<Plugin> {
    let connection = config::load(config)?.with_overrides(config::env_overrides());
    let credentials = connection.credentials()?;
    tracing::debug!("Using credentials {credentials:?}");

    let api = create_client(credentials, connection.client_options())
        .context("Failed to create Cloudflare client")?;
    Ok(Plugin::new(api))
}

/// Pretty JSON of a table definition; needs no credentials.
fn columns_json(table: &str) -> Result<String> {
    let definition = table_definition(table)?;
    Ok(serde_json::to_string_pretty(&definition)?)
}

fn write_line<W: Write>(out: &mut W, record: &Record) -> Result<()> {
    serde_json::to_writer(&mut *out, record)?;
    out.write_all(b"\n")?;
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let connect = || build_plugin(args.config.as_deref());

    match args.command {
        Command::Columns => {
            println!("{}", columns_json(&args.table)?);
        }
        Command::List { zone_id } => {
            let plugin = connect()?;
            let quals = zone_id.map_or_else(Quals::new, |z| Quals::new().with("zone_id", z));

            let (mut tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Record>();
            let printer = tokio::spawn(async move {
                let stdout = std::io::stdout();
                let mut count = 0usize;
                while let Some(record) = rx.recv().await {
                    write_line(&mut stdout.lock(), &record)?;
                    count += 1;
                }
                anyhow::Ok(count)
            });

            let listed = plugin.list(&args.table, &quals, &mut tx).await;
            drop(tx);
            let count = printer.await.context("Row printer task failed")??;
            listed?;
            tracing::info!("{count} row(s) listed");
        }
        Command::Get { zone_id, id } => {
            let plugin = connect()?;
            let quals = Quals::new().with("zone_id", zone_id).with("id", id);
            let record = plugin.get(&args.table, &quals).await?;
            write_line(&mut std::io::stdout().lock(), &record)?;
        }
        Command::Verify => {
            if connect()?.verify().await? {
                println!("credentials ok");
            } else {
                anyhow::bail!("credentials rejected by Cloudflare");
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("command failed: {e:?}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

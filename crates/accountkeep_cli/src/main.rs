//! Command-line front-end for the account record store.
//!
//! # Responsibility
//! - Open the SQLite-backed key-value store and load the record collection.
//! - Map subcommands onto record store operations and print plain text.

use accountkeep_core::db::open_db;
use accountkeep_core::{
    core_version, default_log_level, init_logging, init_stderr_logging, AccountRecord,
    RecordStore, RecordType, RecordUpdate, SqliteKeyValueStore, StoreConfig,
    DEFAULT_STORAGE_KEY,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_DB_FILE_NAME: &str = "accountkeep.sqlite3";
const STDERR_LOG_LEVEL: &str = "warn";

/// Manage account credential records stored in a local database.
#[derive(Parser, Debug)]
#[command(name = "accountkeep", version = core_version())]
struct Args {
    /// SQLite database file holding the key-value store.
    #[arg(long, default_value = DEFAULT_DB_FILE_NAME)]
    db: PathBuf,

    /// Key under which the record collection is persisted.
    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    key: String,

    /// Absolute directory for rolling log files. Warnings and errors go to
    /// stderr when omitted.
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all records in stored order.
    List,
    /// Create a blank record and print its id.
    Add,
    /// Print one record, including its password.
    Show { id: String },
    /// Replace the contents of a record.
    Update {
        id: String,
        /// Record type: LDAP or local.
        #[arg(long = "type", default_value = "local")]
        kind: RecordType,
        #[arg(long, default_value = "")]
        login: String,
        /// Ignored for LDAP records.
        #[arg(long)]
        password: Option<String>,
        /// Semicolon-separated tags, e.g. "mail; vpn".
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Delete a record.
    Delete { id: String },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = effective_log_level(&args);
    let logging = match args.log_dir.as_deref() {
        Some(log_dir) => init_logging(level, log_dir),
        None => init_stderr_logging(level),
    };
    logging.map_err(anyhow::Error::msg)?;

    let config = StoreConfig::with_storage_key(&args.key).map_err(anyhow::Error::msg)?;
    let conn = open_db(&args.db)
        .with_context(|| format!("failed to open database: {}", args.db.display()))?;
    let mut store = RecordStore::with_config(SqliteKeyValueStore::new(&conn), config);
    store.load();

    run(&mut store, args.command)
}

fn run(store: &mut RecordStore<SqliteKeyValueStore<'_>>, command: Command) -> Result<()> {
    match command {
        Command::List => {
            if store.is_empty() {
                println!("no records");
            }
            for record in store.records() {
                println!("{}", summary_line(record));
            }
        }
        Command::Add => {
            let id = store.add()?;
            println!("{id}");
        }
        Command::Show { id } => {
            let record = store
                .get_by_id(&id)
                .with_context(|| format!("record not found: {id}"))?;
            println!("id:       {}", record.id);
            println!("type:     {}", record.kind);
            println!("login:    {}", record.login);
            println!("password: {}", record.password.as_deref().unwrap_or("<none>"));
            println!("tags:     {}", record.tags_label());
        }
        Command::Update {
            id,
            kind,
            login,
            password,
            tags,
        } => {
            if store.get_by_id(&id).is_none() {
                println!("no record with id {id}; nothing updated");
                return Ok(());
            }
            store.update(
                &id,
                &RecordUpdate {
                    tags,
                    kind,
                    login,
                    password,
                },
            )?;
            println!("updated {id}");
        }
        Command::Delete { id } => {
            if store.get_by_id(&id).is_none() {
                println!("no record with id {id}; nothing deleted");
                return Ok(());
            }
            store.delete(&id)?;
            println!("deleted {id}");
        }
    }

    Ok(())
}

fn effective_log_level(args: &Args) -> &str {
    match (args.log_level.as_deref(), args.log_dir.as_deref()) {
        (Some(level), _) => level,
        (None, Some(_)) => default_log_level(),
        (None, None) => STDERR_LOG_LEVEL,
    }
}

fn summary_line(record: &AccountRecord) -> String {
    let password = match record.password.as_deref() {
        Some("") => "empty",
        Some(_) => "set",
        None => "none",
    };
    format!(
        "{}\t{}\t{}\tpassword={}\ttags=[{}]",
        record.id,
        record.kind,
        record.login,
        password,
        record.tags_label()
    )
}

//! accountsvc daemon: start-up and seeding path for the account store.

use std::path::PathBuf;
use std::process::ExitCode;

use accountsvc_store::AccountStore;
use accountsvc_store_lmdb::{LmdbAccountStore, StoreConfig};
use accountsvc_types::{Account, AccountId};
use accountsvc_utils::LogFormat;
use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(name = "accountsvc", about = "Embedded account record store")]
struct Cli {
    /// Path of the store file. Overrides the config file.
    #[arg(long, env = "ACCOUNTSVC_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Path to a TOML configuration file.
    #[arg(long, env = "ACCOUNTSVC_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "ACCOUNTSVC_LOG_LEVEL")]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, default_value = "human", env = "ACCOUNTSVC_LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Recreate the account bucket and fill it with synthetic accounts.
    Seed {
        /// Number of accounts (defaults to the config's seed_count).
        #[arg(long)]
        count: Option<usize>,
    },
    /// Print one account as JSON.
    Query { id: String },
    /// Write one account.
    Put { id: String, name: String },
    /// Report whether the store opens and how many accounts it holds.
    Check,
}

fn load_config(cli: &Cli) -> StoreConfig {
    let mut config = match cli.config {
        Some(ref path) => match StoreConfig::from_toml_file(path) {
            Ok(cfg) => {
                tracing::info!("Loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                tracing::warn!("Failed to load config {}: {e}, using defaults", path.display());
                StoreConfig::default()
            }
        },
        None => StoreConfig::default(),
    };
    if let Some(ref path) = cli.db_path {
        config.path = path.clone();
    }
    config
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    accountsvc_utils::init_logging(cli.log_format, &cli.log_level);

    let config = load_config(&cli);
    let seed_count = config.seed_count;
    let mut store = LmdbAccountStore::new(config);
    if let Err(e) = store.open() {
        tracing::error!(error = %e, "cannot continue without a store");
        return Err(e).context("opening account store");
    }

    let code = match cli.command {
        Command::Seed { count } => {
            store.initialize_bucket().context("initializing bucket")?;
            let report = store.seed_accounts(count.unwrap_or(seed_count));
            println!("Seeded {} fake accounts...", report.written);
            if report.is_complete() {
                ExitCode::SUCCESS
            } else {
                eprintln!("{} accounts failed to seed", report.failures.len());
                ExitCode::FAILURE
            }
        }
        Command::Query { id } => match store.query_account(&AccountId::new(id)) {
            Ok(account) => {
                println!("{}", serde_json::to_string(&account)?);
                ExitCode::SUCCESS
            }
            Err(e) if e.is_not_found() => {
                eprintln!("{e}");
                ExitCode::from(2)
            }
            Err(e) => return Err(e).context("querying account"),
        },
        Command::Put { id, name } => {
            store
                .put_account(&Account::new(id, name))
                .context("writing account")?;
            ExitCode::SUCCESS
        }
        Command::Check => {
            let healthy = store.check();
            let path = store.config().path.display();
            match store.account_count() {
                Ok(n) => println!("path={path} healthy={healthy} accounts={n}"),
                Err(e) => println!("path={path} healthy={healthy} ({e})"),
            }
            if healthy {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    };

    store.close();
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_path_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("store.toml");
        std::fs::write(&cfg_path, "path = \"from-file.db\"\nseed_count = 7\n").unwrap();

        let cli = Cli::try_parse_from([
            "accountsvc",
            "--config",
            cfg_path.to_str().unwrap(),
            "--db-path",
            "override.db",
            "check",
        ])
        .unwrap();
        let config = load_config(&cli);
        assert_eq!(config.path, PathBuf::from("override.db"));
        assert_eq!(config.seed_count, 7);
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let cli = Cli::try_parse_from([
            "accountsvc",
            "--config",
            "/nonexistent/accountsvc.toml",
            "seed",
            "--count",
            "3",
        ])
        .unwrap();
        assert_eq!(load_config(&cli), StoreConfig::default());
        assert!(matches!(cli.command, Command::Seed { count: Some(3) }));
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(Cli::try_parse_from(["accountsvc", "--log-format", "xml", "check"]).is_err());
    }
}

//! BucketKV CLI
//!
//! Command-line interface for inspecting and editing a table directory.

use std::path::PathBuf;
use std::process::ExitCode;

use bucketkv::config::DEFAULT_BUCKET_MAGNITUDE;
use bucketkv::{Table, TableConfig, TableError};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// BucketKV CLI
#[derive(Parser, Debug)]
#[command(name = "bucketkv-cli")]
#[command(about = "CLI for the BucketKV persistent hash table")]
#[command(version)]
struct Args {
    /// Table directory
    #[arg(short, long, default_value = "./bucketkv_data")]
    dir: PathBuf,

    /// Shard count is 16^bucket_magnitude
    #[arg(short, long, default_value_t = DEFAULT_BUCKET_MAGNITUDE)]
    bucket_magnitude: u32,

    /// Do not append writes to the table's log
    #[arg(long)]
    no_log: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        #[arg(allow_negative_numbers = true)]
        key: i64,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        #[arg(allow_negative_numbers = true)]
        key: i64,

        /// The value to set
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Rebuild the table directory from a log file
    Recover {
        /// Log file to replay
        #[arg(short, long)]
        from: PathBuf,
    },

    /// Show shard and log information
    Stats,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "info,bucketkv=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> bucketkv::Result<ExitCode> {
    match &args.command {
        Commands::Recover { from } => {
            let (table, result) = Table::replay_log(from, &args.dir, args.bucket_magnitude)?;
            println!(
                "recovered {} records into {}",
                result.records_replayed,
                table.table_dir().display()
            );
        }
        Commands::Get { key } => match open_table(&args)?.get(*key) {
            Ok(value) => println!("{}", value),
            Err(TableError::KeyNotFound(key)) => {
                eprintln!("key {} not found", key);
                return Ok(ExitCode::FAILURE);
            }
            Err(e) => return Err(e),
        },
        Commands::Set { key, value } => {
            open_table(&args)?.set(*key, *value)?;
            println!("OK");
        }
        Commands::Stats => {
            let table = open_table(&args)?;
            println!("dir:              {}", table.table_dir().display());
            println!("bucket magnitude: {}", table.bucket_magnitude());
            println!("shards:           {}", table.shard_count());
            println!("bucket files:     {}", table.bucket_files()?.len());
            match table.log_file_path() {
                Some(path) => println!("log:              {}", path.display()),
                None => println!("log:              disabled"),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn open_table(args: &Args) -> bucketkv::Result<Table> {
    let config = TableConfig::builder()
        .table_dir(&args.dir)
        .bucket_magnitude(args.bucket_magnitude)
        .log_enabled(!args.no_log)
        .build();
    Table::open(config)
}

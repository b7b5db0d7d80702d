//! Command-line arguments. Every option can also come from an `AIRBNB_*`
//! environment variable.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "airbnb-dashboard",
    version,
    about = "Import Airbnb listing CSVs and serve them to the dashboard"
)]
pub struct Args {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", env = "AIRBNB_LOG_LEVEL")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Load the {city}_{period}s.csv files into a listing store
    Import(ImportArgs),
    /// Serve the dashboard and the listings API
    Serve(ServeArgs),
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ImportArgs {
    /// Directory holding the source CSV files
    #[arg(long, value_name = "DIR", default_value = "data", env = "AIRBNB_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Where normalized listings are written
    #[arg(long, value_enum, default_value_t = StoreKind::Sqlite, env = "AIRBNB_STORE")]
    pub store: StoreKind,

    /// SQLite database file, created if missing
    #[arg(long, value_name = "FILE", default_value = "airbnb.db", env = "AIRBNB_DB")]
    pub db: PathBuf,

    /// Output directory for normalized partition files (csv store)
    #[arg(long, value_name = "DIR", required_if_eq("store", "csv"), env = "AIRBNB_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// Re-import partitions whose source file has not changed
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Query the SQLite table written by `import`
    Sqlite,
    /// Re-read the CSV partition files on every request
    Csv,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServeArgs {
    #[arg(long, value_name = "ADDR", default_value = "127.0.0.1:5000", env = "AIRBNB_ADDR")]
    pub addr: SocketAddr,

    /// Where listings are read from
    #[arg(long, value_enum, default_value_t = StoreKind::Sqlite, env = "AIRBNB_STORE")]
    pub store: StoreKind,

    #[arg(long, value_name = "FILE", default_value = "airbnb.db", env = "AIRBNB_DB")]
    pub db: PathBuf,

    /// CSV partitions (csv store) and the geojson/ boundary files
    #[arg(long, value_name = "DIR", default_value = "data", env = "AIRBNB_DATA_DIR")]
    pub data_dir: PathBuf,

    #[arg(long, value_name = "DIR", default_value = "static", env = "AIRBNB_STATIC_DIR")]
    pub static_dir: PathBuf,

    /// Worker threads handling requests
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: u16,
}

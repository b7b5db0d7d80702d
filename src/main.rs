use crate::cli::{Args, Commands, ImportArgs, ServeArgs, StoreKind};
use crate::config::DashboardConfig;
use crate::errors::ServerError;
use crate::router::{handle, AppState};
use crate::store::{CsvStore, ImportMode, ListingStore, SqliteStore};
use astra::Server;
use clap::Parser;
use std::path::Path;
use std::process;
use tracing::{error, info};

mod cli;
mod config;
mod db;
mod domain;
mod errors;
mod importer;
mod responses;
mod router;
mod store;
mod templates;


fn main() {
    let args = Args::parse();
    setup_logging(&args.log_level);

    // Cities and periods are shared by both commands.
    let config = DashboardConfig::default();

    let result = match args.command {
        Commands::Import(import_args) => run_import(config, &import_args),
        Commands::Serve(serve_args) => run_server(config, &serve_args),
    };

    if let Err(e) = result {
        error!("{e}");
        process::exit(1);
    }
}

fn setup_logging(log_level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("airbnb_dashboard={log_level}")))
        .unwrap_or_else(|_| EnvFilter::new("airbnb_dashboard=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run_import(config: DashboardConfig, args: &ImportArgs) -> Result<(), ServerError> {
    let target: &Path = match (args.store, &args.out_dir) {
        (StoreKind::Sqlite, _) => args.db.as_path(),
        (StoreKind::Csv, Some(out_dir)) => out_dir.as_path(),
        (StoreKind::Csv, None) => {
            return Err(ServerError::BadRequest(
                "--out-dir is required with --store csv".to_string(),
            ))
        }
    };
    let store: Box<dyn ListingStore> = match args.store {
        StoreKind::Sqlite => Box::new(SqliteStore::open(target)?),
        StoreKind::Csv => Box::new(CsvStore::new(target)),
    };
    let mode = if args.force {
        ImportMode::Replace
    } else {
        ImportMode::SkipUnchanged
    };

    let summary = importer::run_import(&config, &args.data_dir, store.as_ref(), mode);
    info!(
        "Import completed! {} rows from {} files into {}",
        summary.rows_imported,
        summary.imported_files,
        target.display()
    );
    Ok(())
}

fn run_server(config: DashboardConfig, args: &ServeArgs) -> Result<(), ServerError> {
    let store: Box<dyn ListingStore> = match args.store {
        StoreKind::Sqlite => Box::new(SqliteStore::read_only(&args.db)),
        StoreKind::Csv => Box::new(CsvStore::new(&args.data_dir)),
    };

    let state = AppState {
        config,
        store,
        static_dir: args.static_dir.clone(),
        geojson_dir: args.data_dir.join("geojson"),
    };

    info!(
        "Starting server at http://{} ({:?} store, {} workers)",
        args.addr, args.store, args.workers
    );

    let server = Server::bind(&args.addr).max_workers(usize::from(args.workers));

    // Errors from non-API routes render as HTML pages.
    server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    })?;

    info!("Server shut down cleanly.");
    Ok(())
}

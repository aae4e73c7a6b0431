//! kgraph builds a deduplicated, size-bounded knowledge graph from
//! per-document entity extraction records.

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::BuildArgs;

fn resolve_data_dir() -> PathBuf {
    std::env::var("KGRAPH_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn print_help() {
    println!("kgraph: knowledge graph construction and pruning");
    println!();
    println!("Usage: kgraph <command>");
    println!();
    println!("Commands:");
    println!("  build [input-dir] [-o <name>] [-v]   Build graph from *_entities.json records");
    println!("  stats <snapshot>                     Print statistics of a saved snapshot");
    println!("  validate <snapshot>                  Check a saved snapshot's invariants");
    println!("  help                                 Show this help message");
    println!();
    println!("Environment:");
    println!("  KGRAPH_DATA_DIR          data root (default ./data)");
    println!("  KGRAPH_MIN_CONFIDENCE    KGRAPH_MAX_NODES");
    println!("  KGRAPH_VIZ_SAMPLE_SIZE   KGRAPH_TOP_K");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");

    match command {
        "build" => {
            let build_args = match BuildArgs::parse(&args[2..]) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("{}. Use 'kgraph help' for usage.", e);
                    std::process::exit(2);
                }
            };

            let data_dir = resolve_data_dir();
            info!("Data directory: {}", data_dir.display());
            let paths = kgraph_core::DataPaths::new(&data_dir)?;
            let config = kgraph_core::GraphConfig::load(&paths.config_file)?;

            let summary = commands::build(&paths, &config, &build_args)?;
            commands::print_build_summary(&summary);
        }
        "stats" => {
            let Some(snapshot) = args.get(2) else {
                eprintln!("Usage: kgraph stats <snapshot>");
                std::process::exit(2);
            };
            let config_file = resolve_data_dir().join(kgraph_core::config::CONFIG_FILE_NAME);
            let config = kgraph_core::GraphConfig::load(&config_file)?;
            println!("{}", commands::stats(&PathBuf::from(snapshot), &config)?);
        }
        "validate" | "--validate" => {
            let Some(snapshot) = args.get(2) else {
                eprintln!("Usage: kgraph validate <snapshot>");
                std::process::exit(2);
            };
            let report = commands::validate(&PathBuf::from(snapshot));
            commands::print_validation_report(&report);
            std::process::exit(if report.valid { 0 } else { 1 });
        }
        "help" | "--help" | "-h" => print_help(),
        other => {
            eprintln!("Unknown command: {}. Use 'kgraph help' for usage.", other);
            std::process::exit(1);
        }
    }

    Ok(())
}

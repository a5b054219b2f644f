//! DocMeta — document metadata extraction server and CLI.

use std::path::PathBuf;
use std::sync::Arc;

use docmeta_core::{DocMetaConfig, ToolCapabilities};
use docmeta_ingest::{create_ocr_backend, Ingester};
use docmeta_server::{cli, routes, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("DocMeta — document metadata extraction");
    println!();
    println!("Usage: docmeta [command]");
    println!();
    println!("Commands:");
    println!("  (none) | serve             Start the HTTP server");
    println!("  extract <file> [output]    Write metadata for one file (default: metadata.json)");
    println!("  help                       Show this help message");
}

/// Load tools and model capabilities once.
///
/// Runs before any async runtime exists: the summarizer owns a blocking
/// HTTP client that must not be created inside one.
fn build_ingester(config: &DocMetaConfig) -> (Ingester, ToolCapabilities) {
    let tools = ToolCapabilities::discover();
    let capabilities = docmeta_infer::load_capabilities(config);
    let ocr = create_ocr_backend(&config.ocr, &tools);
    info!("Model capabilities: {:?}", capabilities);
    (Ingester::new(config, capabilities, ocr), tools)
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        None | Some("serve") => serve(),
        Some("extract") => {
            let Some(input) = args.get(2) else {
                eprintln!("Usage: docmeta extract <file> [output]");
                std::process::exit(1);
            };
            let output = args
                .get(3)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(cli::DEFAULT_OUTPUT));

            let config = DocMetaConfig::from_env()?;
            let (ingester, _) = build_ingester(&config);
            let record = cli::extract_to_file(&ingester, &PathBuf::from(input), &output)?;
            println!("{}", record.title);
            Ok(())
        }
        Some("--help" | "-h" | "help") => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'docmeta help' for usage.", other);
            std::process::exit(1);
        }
    }
}

fn serve() -> anyhow::Result<()> {
    let config = DocMetaConfig::from_env()?;
    let port = config.port;
    let (ingester, tools) = build_ingester(&config);
    let state = Arc::new(AppState::new(config, ingester, tools));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on({
        let state = state.clone();
        async move {
            let app = routes::build_router(state);
            let addr = format!("0.0.0.0:{}", port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("DocMeta server listening on {}", addr);
            axum::serve(listener, app).await?;
            anyhow::Ok(())
        }
    });

    // Last reference to the blocking HTTP client is released outside the runtime
    drop(runtime);
    drop(state);
    result
}

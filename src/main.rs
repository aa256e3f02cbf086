use std::path::PathBuf;

use clap::Parser;

use cleansweep::app::App;
use cleansweep::config::settings::WorkerSpec;
use cleansweep::models::human_size;
use cleansweep::state::scan::ScanPhase;

#[derive(Parser, Debug)]
#[command(name = "cleansweep", version, about = "Disk cleanup control plane")]
struct Cli {
    /// Bundled engine binary (packaged mode)
    #[arg(long, conflicts_with_all = ["interpreter", "script"])]
    engine: Option<PathBuf>,

    /// Interpreter to run the engine script with (development mode)
    #[arg(long, requires = "script")]
    interpreter: Option<PathBuf>,

    /// Engine script path (development mode)
    #[arg(long, requires = "interpreter")]
    script: Option<PathBuf>,

    /// Quick scan instead of a full scan
    #[arg(long)]
    quick: bool,

    /// Print merged cleanup history instead of scanning
    #[arg(long)]
    history: bool,

    /// Print disk usage instead of scanning
    #[arg(long)]
    disk_usage: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs to stderr; stdout stays clean for output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let spec = if let Some(binary) = cli.engine {
        WorkerSpec::Packaged { binary }
    } else if let (Some(interpreter), Some(script)) = (cli.interpreter, cli.script) {
        WorkerSpec::Development {
            interpreter,
            script,
        }
    } else {
        anyhow::bail!("pass --engine <path>, or --interpreter and --script for development mode");
    };

    let mut app = App::new(spec);
    app.initialize().await;

    if cli.disk_usage {
        let usage = app.disk_usage().await;
        println!("Total: {}", human_size(usage.total));
        println!("Used:  {}", human_size(usage.used));
        println!("Free:  {}", human_size(usage.free));
        return Ok(());
    }

    if cli.history {
        let view = app.history_view().await;
        println!(
            "Total freed: {} across {} items",
            human_size(view.total_bytes_freed),
            view.total_items_cleaned
        );
        for record in &view.cleanups {
            println!(
                "  [{}] {} - {} items, {} freed",
                record.id,
                record.timestamp,
                record.items_deleted,
                human_size(record.bytes_freed)
            );
        }
        return Ok(());
    }

    app.run_scan_with(cli.quick).await?;

    let state = app.state();
    if state.scan.phase() == ScanPhase::Complete {
        if let Some(result) = &state.scan_result {
            println!("Found {} items, {}", result.total_items, human_size(result.total_size_bytes));
            println!("Selected for cleanup: {}", state.selected.len());
            for (category, bytes) in &result.categories {
                println!("  {}: {}", category, human_size(*bytes));
            }
        }
    }

    Ok(())
}

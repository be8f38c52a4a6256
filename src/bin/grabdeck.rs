use std::env;
use std::path::PathBuf;

use grabdeck::ClientConfig;

fn print_usage() {
    eprintln!("Usage: grabdeck [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --backend <URL>       Resolver backend base URL (default: from config)");
    eprintln!("  --download-dir <DIR>  Where downloads are saved (default: from config)");
    eprintln!("  --config <FILE>       Config file path (default: platform config dir)");
    eprintln!("  -h, --help            Show this help");
}

/// Routes log output to a file next to the config; the TUI owns the
/// terminal, so stderr is not available while it runs.
fn init_logging(config_path: &std::path::Path) -> std::io::Result<()> {
    let log_path = config_path.with_file_name("grabdeck.log");
    let file = std::fs::File::create(&log_path)?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> grabdeck::Result<()> {
    let mut backend: Option<String> = None;
    let mut download_dir: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let args: Vec<String> = env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--backend" => {
                i += 1;
                if i < args.len() {
                    backend = Some(args[i].clone());
                } else {
                    eprintln!("Error: --backend requires a value");
                    std::process::exit(1);
                }
            }
            "--download-dir" => {
                i += 1;
                if i < args.len() {
                    download_dir = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: --download-dir requires a value");
                    std::process::exit(1);
                }
            }
            "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: --config requires a value");
                    std::process::exit(1);
                }
            }
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Error: unknown option {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config_path = config_path.unwrap_or_else(ClientConfig::config_path);
    let mut config = ClientConfig::load_or_create(&config_path)?;
    if let Some(backend) = backend {
        config.backend.base_url = backend;
    }
    if let Some(dir) = download_dir {
        config.download.dir = dir;
    }

    init_logging(&config_path)?;
    log::info!(
        "starting against {} (downloads -> {})",
        config.backend.base_url,
        config.download.dir.display()
    );

    #[cfg(feature = "tui")]
    {
        grabdeck::tui::run(config).await
    }
    #[cfg(not(feature = "tui"))]
    {
        let _ = config;
        eprintln!("TUI support not compiled in");
        std::process::exit(1);
    }
}

use clap::Parser;
use taskboard::config::{Cli, Config};
use taskboard::{app, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_file.as_deref(), cli.debug) {
        eprintln!("error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app::run(&config).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

use clap::Parser;
use recall_core::{Config, Result, Session, SessionEnd, SessionOptions};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recall")]
#[command(about = "Interactive flashcard trainer", long_about = None)]
struct Cli {
    /// Deck file imported before the first prompt
    #[arg(long = "import_from", value_name = "PATH")]
    import_from: Option<PathBuf>,

    /// Deck file exported to when the session ends
    #[arg(long = "export_to", value_name = "PATH")]
    export_to: Option<PathBuf>,

    /// Read configuration from PATH instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    recall_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Flags win over config defaults
    let options = SessionOptions {
        import_from: cli.import_from.or(config.files.import_from),
        export_to: cli.export_to.or(config.files.export_to),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), options);

    if session.run()? == SessionEnd::Aborted {
        tracing::debug!("Session aborted on unrecognized action");
    }
    Ok(())
}

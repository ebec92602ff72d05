mod audit_cmd;
mod cli;
mod shared;
mod text_cmd;
mod words_cmd;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        cli::Commands::Audit {
            ref file,
            ref format,
            max_pages,
        } => audit_cmd::run(file, format, max_pages),
        cli::Commands::Text {
            ref file,
            ref pages,
        } => text_cmd::run(file, pages.as_deref()),
        cli::Commands::Words {
            ref file,
            ref pages,
            ref format,
        } => words_cmd::run(file, pages.as_deref(), format),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}

/// Logs go to stderr so stdout stays clean for report output. The
/// PROPAUDIT_LOG environment variable overrides the default filter;
/// --verbose raises the default to debug.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose {
        "propaudit=debug"
    } else {
        "propaudit=warn"
    };
    let filter = EnvFilter::try_from_env("PROPAUDIT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

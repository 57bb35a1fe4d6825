use imgfetch_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    // Per-URL failures never reach here; only startup and I/O errors do.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("imgfetch error: {:#}", err);
        std::process::exit(1);
    }
}

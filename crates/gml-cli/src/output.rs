//! Tagged terminal output.

use colored::Colorize;

/// Fatal condition, on stderr.
pub fn fail(message: impl std::fmt::Display) {
    eprintln!("{} {}", "[FAIL]".red().bold(), message);
}

/// Non-fatal condition, on stderr so stdout stays parseable.
pub fn warn(message: impl std::fmt::Display) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), message);
}

pub fn info(message: impl std::fmt::Display) {
    println!("{} {}", "[INFO]".blue().bold(), message);
}

/// Section header such as `=== PLAN ===`.
pub fn header(title: &str) {
    println!("{}", format!("=== {title} ===").bold());
}

/// Install a DEBUG-level subscriber on stderr when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    if !verbose {
        return;
    }
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}

use crate::scheduler::Scheduler;
use clap::{Parser, ValueEnum};
use std::{fmt, path::PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the ROM
    pub path: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = Scheduler::DEFAULT_HZ)]
    pub hz: u32,

    /// Window scale factor
    #[arg(short, long, default_value_t = 10)]
    pub scale: u32,

    /// Disable the tone output
    #[arg(short, long)]
    pub mute: bool,

    /// Verbosity of debug logging
    #[arg(short, long, value_enum)]
    debug: Option<DebugMode>,
}

#[derive(Copy, Clone, ValueEnum)]
enum DebugMode {
    Info,
    Debug,
    Trace,
    Warn,
    Error,
}

impl fmt::Display for DebugMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(level)
    }
}

/// Parses the command line and sets up logging. Usage errors exit with
/// status 1.
pub fn init() -> Cli {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(if e.use_stderr() { 1 } else { 0 });
    });

    std::env::set_var(
        "RUST_LOG",
        format!("octo8={}", cli.debug.unwrap_or(DebugMode::Warn)),
    );

    env_logger::init();

    cli
}

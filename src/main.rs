// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

use transmem::app_config::{self, CacheBackend, Config};
use transmem::app_controller::Controller;

/// CLI Wrapper for CacheBackend to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliCacheBackend {
    Redis,
    Memory,
}

impl From<CliCacheBackend> for CacheBackend {
    fn from(cli_backend: CliCacheBackend) -> Self {
        match cli_backend {
            CliCacheBackend::Redis => CacheBackend::Redis,
            CliCacheBackend::Memory => CacheBackend::Memory,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the translation web service (default command)
    Serve(ServeArgs),

    /// Generate shell completions for transmem
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct ServeArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", env = "TRANSMEM_CONFIG")]
    config_path: String,

    /// Address to bind the HTTP listener to
    #[arg(short, long, env = "TRANSMEM_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "TRANSMEM_PORT")]
    port: Option<u16>,

    /// Result cache backend
    #[arg(long, value_enum, env = "TRANSMEM_CACHE_BACKEND")]
    cache_backend: Option<CliCacheBackend>,

    /// Redis connection URL (e.g. redis://127.0.0.1:6379/0)
    #[arg(short, long, env = "TRANSMEM_REDIS_URL")]
    redis_url: Option<String>,

    /// Translation memory database file (":memory:" for a throwaway database)
    #[arg(short, long, env = "TRANSMEM_DB_PATH")]
    db_path: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum, env = "TRANSMEM_LOG_LEVEL")]
    log_level: Option<CliLogLevel>,
}

impl ServeArgs {
    /// Apply command line overrides on top of the loaded configuration
    fn apply_to(self, config: &mut Config) {
        if let Some(bind) = self.bind {
            config.server.bind_addr = bind;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(backend) = self.cache_backend {
            config.cache.backend = backend.into();
        }
        if let Some(url) = self.redis_url {
            config.cache.redis_url = url;
        }
        if let Some(path) = self.db_path {
            config.database.path = path;
        }
        if let Some(level) = self.log_level {
            config.log_level = level.into();
        }
    }
}

/// transmem - translation memory web service
///
/// Accepts text over HTTP, detects its language and answers with a known
/// translation, backed by a Redis result cache and a SQLite translation memory.
#[derive(Parser, Debug)]
#[command(name = "transmem")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Translation memory web service")]
#[command(long_about = "transmem serves POST /translate and GET /health.

EXAMPLES:
    transmem                                   # Serve using conf.json (or defaults)
    transmem serve -p 8080                     # Serve on another port
    transmem serve --cache-backend memory      # Run without Redis
    transmem serve -d :memory:                 # Use a throwaway database
    transmem completions bash > transmem.bash  # Generate bash completions

CONFIGURATION:
    Configuration is read from conf.json by default. You can specify a different
    file with --config-path. If the file doesn't exist, built-in defaults are used.
    Every option can also be set through a TRANSMEM_* environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Serve options when no subcommand is given; they may not be combined with one
    #[command(flatten)]
    serve: ServeArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and marker for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌"),
            Level::Warn => ("\x1B[1;33m", "🚧"),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍"),
            Level::Trace => ("\x1B[1;35m", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, marker) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The level is lowered or raised once the configuration is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "transmem", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Serve(args)) => run_serve(args).await,
        None => run_serve(cli.serve).await,
    }
}

async fn run_serve(options: ServeArgs) -> Result<()> {
    let mut config = Config::load(&options.config_path)?;
    options.apply_to(&mut config);

    config.validate()?;
    log::set_max_level(config.log_level.to_level_filter());

    info!(
        "Starting transmem on {} (cache: {}, database: {})",
        config.server.socket_addr(),
        config.cache.backend,
        config.database.path
    );

    let controller = Controller::with_config(config)?;
    controller.run().await
}

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use dep_digest::config::Config;
use dep_digest::output::{OutputFormat, writer_for};
use dep_digest::pipeline::check;

#[derive(Parser)]
#[command(name = "dep-digest")]
#[command(
    version,
    about = "Show latest versions, release notes and vulnerability status for npm dependencies"
)]
struct Cli {
    /// JSON file mapping package names to versions (reads stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Config file (defaults to $XDG_CONFIG_HOME/dep-digest/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// GitHub access token used for release and changelog requests
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Number of packages checked at the same time
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,

    /// npm registry base URL
    #[arg(long, value_name = "URL")]
    registry_url: Option<String>,

    /// Branch CHANGELOG.md is read from when a repository has no release
    #[arg(long)]
    changelog_branch: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(token) = &self.github_token {
            config.github_token = Some(token.clone());
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(url) = &self.registry_url {
            config.registry_url = url.clone();
        }
        if let Some(branch) = &self.changelog_branch {
            config.changelog_branch = branch.clone();
        }
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let (writer, guard) = match &cli.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(cli.log_file.is_none())
        .with_target(false);

    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(guard)
}

fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read dependencies from stdin")?;
            Ok(content)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    cli.apply_overrides(&mut config);

    let content = read_input(cli.input.as_deref())?;

    let stdout = std::io::stdout();
    let mut writer = writer_for(cli.format, stdout.lock());
    check(&content, &config, &mut *writer).await?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

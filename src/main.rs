use tracing_subscriber::util::SubscriberInitExt;

pub(crate) mod config;
pub(crate) mod digest;
pub(crate) mod error;
pub(crate) mod fetch;
pub(crate) mod hn_api;
pub(crate) mod json;
pub(crate) mod pipeline;

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Print the current Hacker News top stories", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "false")]
    #[arg(help = "Log diagnostics to stderr")]
    verbose: bool,

    #[arg(value_parser = config::parse_count, allow_negative_numbers = true)]
    #[arg(default_value_t = config::DEFAULT_STORIES)]
    #[arg(help = "Number of stories to print, from 1 to 500")]
    count: usize,
}

/// One line of the digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoryRecord {
    /// 1-based position in the top stories list.
    pub(crate) rank: usize,
    pub(crate) id: i64,

    // Either may be missing, e.g. "Ask HN" posts have no url.
    pub(crate) title: Option<String>,
    pub(crate) url: Option<String>,
}

fn init_tracing(config: &config::Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if config.verbose {
        tracing::level_filters::LevelFilter::DEBUG
    } else {
        tracing::level_filters::LevelFilter::WARN
    };

    // stdout carries the digest, so diagnostics go to stderr.
    let console_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_filter(console_level)
        .boxed();

    let registry = tracing_subscriber::registry().with(console_layer);

    match &config.log_dir {
        Some(log_dir) => {
            let file_appender = tracing_appender::rolling::daily(log_dir, "hn_digest.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .json()
                .with_filter(tracing::level_filters::LevelFilter::INFO)
                .boxed();

            registry.with(file_layer).init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

fn error_kind(err: &anyhow::Error) -> Option<error::ErrorKind> {
    if let Some(e) = err.downcast_ref::<error::PipelineError>() {
        Some(e.kind())
    } else if let Some(e) = err.downcast_ref::<error::ConfigError>() {
        Some(e.kind())
    } else {
        err.downcast_ref::<error::FetchError>()
            .map(|_| error::ErrorKind::Fetch)
    }
}

async fn get_digest(config: config::Config) -> anyhow::Result<String> {
    use anyhow::Context;

    let pipeline = pipeline::Pipeline::new(config).context("failed to set up the http client")?;
    Ok(pipeline.run().await?)
}

fn fail(err: anyhow::Error) -> std::process::ExitCode {
    tracing::error!(error =? err, kind =? error_kind(&err), "Error when building digest");
    eprintln!("Error: {err:#}");
    std::process::ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    use clap::Parser;
    let args = Args::parse();

    let config = match config::Config::from_env(args.count, args.verbose) {
        Ok(config) => config,
        Err(e) => return fail(e.into()),
    };

    let _guard = init_tracing(&config);

    tracing::info!(
        config =? config,
        args =? args,
        "Starting HN digest"
    );

    match get_digest(config).await {
        Ok(digest) => {
            println!("{digest}");
            tracing::info!("HN digest finished");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

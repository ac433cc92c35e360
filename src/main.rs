use clap::{Args, Parser, Subcommand};
use redirect_checker::generator::{self, CmsClient, GeneratorError, ListingShape};
use redirect_checker::output::write_json_file;
use redirect_checker::{
    BatchRunner, FailedReportFormat, Normalization, RedirectChecker, RedirectMode, ReportWriter,
    Settings, get_configuration, load_spec_file,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use url::Url;

const DEFAULT_ASSEMBLED_PATH: &str = "jsons/check_redirects/redirects.json";

#[derive(Parser, Debug)]
#[command(
    name = "redirect-checker",
    version,
    about = "Verify HTTP redirects against a live server and build redirect lists"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every redirect of a redirect list
    Check(CheckArgs),
    /// Build a redirect list from the CMS
    Generate(GenerateArgs),
    /// Zip three parallel JSON lists into a redirect list
    Assemble(AssembleArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Redirect list: a JSON array, or an object with a `redirects` array
    spec_file: PathBuf,

    /// Base URL for relative entries; without it every URL must be absolute
    base_url: Option<Url>,

    /// Follow the whole redirect chain instead of reading the first `Location`
    #[arg(long)]
    follow: bool,

    /// How destinations are compared
    #[arg(long, value_enum)]
    normalization: Option<Normalization>,

    /// Replacement for `*` in URLs
    #[arg(long)]
    wildcard_token: Option<String>,

    /// Format of the failed tests report
    #[arg(long, value_enum)]
    failed_format: Option<FailedReportFormat>,

    /// Log a run time estimate after the first few checks
    #[arg(long)]
    estimate: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Directory the reports are written to
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Exit with a failure code when any redirect did not pass
    #[arg(long)]
    fail_on_mismatch: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Keep only entries whose name contains this (case-sensitive)
    filter: Option<String>,

    /// Where the redirect list is written
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write `status_code` or the `permanent` flag
    #[arg(long, value_enum)]
    shape: Option<ListingShape>,
}

#[derive(Args, Debug)]
struct AssembleArgs {
    /// JSON list of source URLs
    urls: PathBuf,
    /// JSON list of expected destinations
    redirect_urls: PathBuf,
    /// JSON list of expected status codes
    status_codes: PathBuf,

    /// Where the redirect list is written
    #[arg(short, long, default_value = DEFAULT_ASSEMBLED_PATH)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let settings = match get_configuration() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to read configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = match cli.command {
        Command::Check(args) => check(args, settings).await,
        Command::Generate(args) => generate(args, settings).await,
        Command::Assemble(args) => assemble(args),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn check(args: CheckArgs, settings: Settings) -> Result<ExitCode, Box<dyn Error>> {
    let mut options = settings.checker.check_options();
    if args.follow {
        options.mode = RedirectMode::Follow;
    }
    if let Some(normalization) = args.normalization {
        options.normalization = normalization;
    }
    if let Some(token) = args.wildcard_token {
        options.wildcard_token = token;
    }
    if let Some(timeout) = args.timeout {
        options.timeout = Duration::from_secs(timeout);
    }

    let specs = load_spec_file(&args.spec_file)?;
    info!(
        "Loaded {} redirects from {}",
        specs.len(),
        args.spec_file.display()
    );

    let checker = RedirectChecker::new(options)?;
    let mut runner = BatchRunner::new(&checker);
    if args.estimate {
        runner = runner.with_estimate(settings.checker.estimate_sample_size);
    }
    let report = runner.run(&specs, args.base_url.as_ref()).await?;

    let writer = ReportWriter::new(
        args.report_dir.unwrap_or(settings.report.directory),
        args.failed_format.unwrap_or(settings.report.failed_format),
    );
    writer.write(&report)?;

    if args.fail_on_mismatch && report.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

async fn generate(args: GenerateArgs, settings: Settings) -> Result<ExitCode, Box<dyn Error>> {
    let cms = settings.cms;
    let timeout = cms.timeout();
    let api_key = cms.api_key.ok_or(GeneratorError::MissingCredential)?;
    let client = CmsClient::new(
        cms.base_url,
        cms.content_path,
        api_key,
        cms.page_size,
        timeout,
    )?;

    let shape = args.shape.unwrap_or(cms.listing_shape);
    let listing = generator::generate(&client, args.filter.as_deref(), shape).await?;

    let output = args.output.unwrap_or(cms.output_path);
    generator::write_listing(&output, &listing)?;
    Ok(ExitCode::SUCCESS)
}

fn assemble(args: AssembleArgs) -> Result<ExitCode, Box<dyn Error>> {
    let records = generator::assemble_files(&args.urls, &args.redirect_urls, &args.status_codes)?;
    write_json_file(&args.output, &records)?;
    info!(
        "Redirect list with {} entries saved as {}",
        records.len(),
        args.output.display()
    );
    Ok(ExitCode::SUCCESS)
}

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use resume_scanner::config::Config;
use resume_scanner::document::{DocumentKind, DocumentTextExtractor, TextExtractor};
use resume_scanner::{ResumeScanner, Upload};

#[derive(Parser, Debug)]
#[command(name = "resume-scanner")]
#[command(about = "Rank PDF/DOCX resumes against a job description")]
struct Args {
    /// Log level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract, score and rank a batch of resumes
    Scan {
        #[command(flatten)]
        job: JobArgs,

        /// Resume files (.pdf or .docx)
        #[arg(required = true)]
        resumes: Vec<PathBuf>,
    },
    /// Analyze one resume without ranking
    Analyze {
        #[command(flatten)]
        job: JobArgs,

        /// Resume file (.pdf, .docx, or plain text)
        #[arg(short, long)]
        resume: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
struct JobArgs {
    /// File containing the job description
    #[arg(short, long)]
    job_description: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    job_text: Option<String>,
}

impl JobArgs {
    async fn load(&self) -> Result<String> {
        match (&self.job_text, &self.job_description) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read job description {:?}", path)),
            (None, None) => bail!("Job description is required"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Starting resume-scanner v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().context("Failed to load configuration")?;
    let scanner = ResumeScanner::from_config(&config).context("Failed to build scanner")?;
    info!(
        "Scanner ready ({} skill categories)",
        scanner.taxonomy().len()
    );

    let output = match args.command {
        Command::Scan { job, resumes } => {
            let job_description = job.load().await?;
            let uploads = read_uploads(&resumes).await?;
            let report = scanner.scan(uploads, &job_description).await?;
            serde_json::to_string_pretty(&report)?
        }
        Command::Analyze { job, resume } => {
            let job_description = job.load().await?;
            let resume_text = read_resume_text(&resume).await?;
            let report = scanner.analyze(&resume_text, &job_description)?;
            serde_json::to_string_pretty(&report)?
        }
    };

    println!("{}", output);
    Ok(())
}

async fn read_uploads(paths: &[PathBuf]) -> Result<Vec<Upload>> {
    let reads = paths.iter().map(|path| async move {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {:?}", path))?;
        Ok::<_, anyhow::Error>(Upload::new(file_name(path), bytes))
    });

    futures::future::try_join_all(reads).await
}

/// Decode PDF/DOCX through the document extractor; anything else is read as text
async fn read_resume_text(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {:?}", path))?;

    match DocumentKind::from_filename(&file_name(path)) {
        Some(kind) => tokio::task::spawn_blocking(move || {
            DocumentTextExtractor.extract(&bytes, kind)
        })
        .await
        .context("Extraction task failed")?
        .with_context(|| format!("Failed to extract text from {:?}", path)),
        None => String::from_utf8(bytes).with_context(|| format!("{:?} is not UTF-8 text", path)),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

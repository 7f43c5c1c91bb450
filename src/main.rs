use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use stagelink::channel;
use stagelink::client::{Credential, FilesClient, JobsClient};
use stagelink::config::ClientConfig;
use stagelink::diagnostics;
use stagelink::staging::{run_job, StagingRun};

#[derive(Parser, Debug)]
#[command(name = "stagelink")]
#[command(version)]
#[command(about = "Client for a remote job and file staging grid")]
struct Args {
    #[command(flatten)]
    client: ClientArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
struct ClientArgs {
    /// Service address (use https:// for TLS)
    #[arg(long, short = 'a', default_value = "http://127.0.0.1:50051")]
    addr: String,

    /// Path to CA certificate (PEM format) for TLS
    #[arg(long)]
    ca_cert: Option<PathBuf>,

    /// Path to client certificate (PEM format) for mTLS
    #[arg(long)]
    cert: Option<PathBuf>,

    /// Path to client private key (PEM format) for mTLS
    #[arg(long)]
    key: Option<PathBuf>,

    /// Domain name override for certificate validation
    #[arg(long)]
    domain: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the schemes the service supports
    Schemes,

    /// Stage a file, run a job over it, and retrieve its stdout
    Run(RunArgs),

    /// Probe whether a scheduler can be created for a scheme
    Probe {
        /// The scheme to probe (e.g. "local", "ssh")
        scheme: String,

        /// Scheduler location (e.g. "host" or "host:port")
        #[arg(default_value = "")]
        location: String,
    },
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Local file to stage to the remote filesystem
    input: String,

    /// Local path the job's stdout is retrieved to
    #[arg(long, default_value = "stdout.txt")]
    destination: String,

    /// Remote filesystem scheme
    #[arg(long, default_value = "sftp")]
    remote_scheme: String,

    /// Remote filesystem location
    #[arg(long, default_value = "localhost")]
    remote_location: String,

    /// Scheduler scheme
    #[arg(long, default_value = "ssh")]
    scheduler_scheme: String,

    /// Scheduler location
    #[arg(long, default_value = "localhost")]
    scheduler_location: String,

    /// Remote working directory for the run
    #[arg(long, default_value = "/tmp/stagelink-run")]
    workdir: String,

    /// Executable to run; the staged input path is appended as the final
    /// argument
    #[arg(long, default_value = "wc")]
    executable: String,

    /// Arguments for the executable (repeatable)
    #[arg(long = "arg")]
    arguments: Option<Vec<String>>,

    /// File name for the job's redirected stdout
    #[arg(long, default_value = "stdout.txt")]
    stdout_name: String,

    /// Username for the remote filesystem and scheduler
    #[arg(long)]
    username: Option<String>,

    /// Password for the remote filesystem and scheduler
    #[arg(long)]
    password: Option<String>,
}

#[derive(Serialize)]
struct SchemesOutput {
    schemes: Vec<String>,
}

#[derive(Serialize)]
struct RunOutput {
    job_id: String,
    exit_code: i32,
    staged_input: String,
    destination: String,
}

#[derive(Serialize)]
struct ProbeOutput {
    scheme: String,
    ok: bool,
    code: Option<String>,
    message: Option<String>,
}

fn client_config(args: &ClientArgs) -> ClientConfig {
    let mut config = ClientConfig::new(args.addr.clone());
    if let Some(ref ca) = args.ca_cert {
        config = config.with_ca_cert(ca.clone());
    }
    if let (Some(cert), Some(key)) = (&args.cert, &args.key) {
        config = config.with_identity(cert.clone(), key.clone());
    }
    if let Some(ref domain) = args.domain {
        config = config.with_domain_name(domain.clone());
    }
    config
}

async fn handle_schemes(
    jobs: &mut JobsClient,
    output_format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let schemes: Vec<String> = jobs.get_schemes().await?.into_iter().collect();

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&SchemesOutput { schemes })?);
        }
        OutputFormat::Table => {
            if schemes.is_empty() {
                println!("No schemes supported.");
            } else {
                println!("Supported schemes:");
                for scheme in schemes {
                    println!("  {}", scheme);
                }
            }
        }
    }
    Ok(())
}

async fn handle_run(
    jobs: &mut JobsClient,
    files: &mut FilesClient,
    args: RunArgs,
    output_format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let credential = match (args.username, args.password) {
        (Some(username), Some(password)) => Some(Credential::password(username, password)),
        _ => None,
    };

    let run = StagingRun {
        local_scheme: "file".to_string(),
        remote_scheme: args.remote_scheme,
        remote_location: args.remote_location,
        remote_credential: credential.clone(),
        scheduler_scheme: args.scheduler_scheme,
        scheduler_location: args.scheduler_location,
        scheduler_credential: credential,
        workdir: args.workdir,
        input: args.input,
        executable: args.executable,
        arguments: args.arguments.unwrap_or_else(|| vec!["-c".to_string()]),
        stdout_name: args.stdout_name,
        destination: args.destination,
    };

    let outcome = run_job(jobs, files, &run).await?;

    match output_format {
        OutputFormat::Json => {
            let output = RunOutput {
                job_id: outcome.job_id,
                exit_code: outcome.exit_code,
                staged_input: outcome.staged_input,
                destination: outcome.destination,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            println!("Job {} finished with exit code {}", outcome.job_id, outcome.exit_code);
            println!("Output retrieved to {}", outcome.destination);
        }
    }
    Ok(())
}

async fn handle_probe(
    jobs: &mut JobsClient,
    scheme: String,
    location: String,
    output_format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = diagnostics::probe_scheduler(jobs, &scheme, &location).await?;

    match output_format {
        OutputFormat::Json => {
            let output = ProbeOutput {
                scheme,
                ok: report.is_none(),
                code: report.as_ref().map(|r| format!("{:?}", r.code)),
                message: report.as_ref().map(|r| r.message.clone()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => match report {
            None => println!("Scheduler for scheme '{}' can be created.", scheme),
            Some(report) => {
                println!("Scheduler for scheme '{}' failed: {:?}", scheme, report.code);
                println!("  {}", report.message);
            }
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = client_config(&args.client);

    let channel = channel::connect(&config).await?;
    let mut jobs = JobsClient::new(channel.clone());
    let mut files = FilesClient::new(channel);

    match args.command {
        Commands::Schemes => {
            handle_schemes(&mut jobs, &args.client.output).await?;
        }
        Commands::Run(run_args) => {
            handle_run(&mut jobs, &mut files, run_args, &args.client.output).await?;
        }
        Commands::Probe { scheme, location } => {
            handle_probe(&mut jobs, scheme, location, &args.client.output).await?;
        }
    }

    Ok(())
}

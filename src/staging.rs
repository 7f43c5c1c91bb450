//! The scripted staging workflow: stage a file to a remote filesystem, run a
//! job over it, retrieve the job's stdout, and tear down every handle.
//!
//! The sequence is strictly sequential; each call blocks until its response
//! arrives. The first failing call propagates immediately and skips all
//! remaining steps, including cleanup: handles created before the failure
//! are left for the service to reap. Release is an explicit, ordered tail of
//! the happy path, matching the exactly-once close contract.

use std::path::Path;

use crate::client::{Credential, FilesClient, JobsClient};
use crate::description::JobDescription;
use crate::error::Result;

/// Parameters for one staging run.
#[derive(Debug, Clone)]
pub struct StagingRun {
    /// Scheme for the local filesystem handle
    pub local_scheme: String,
    /// Scheme for the remote filesystem handle
    pub remote_scheme: String,
    /// Location of the remote filesystem, e.g. `host` or `host:port`
    pub remote_location: String,
    pub remote_credential: Option<Credential>,
    /// Scheme for the scheduler, e.g. `local` or `ssh`
    pub scheduler_scheme: String,
    pub scheduler_location: String,
    pub scheduler_credential: Option<Credential>,
    /// Working directory on the remote filesystem; created if missing
    pub workdir: String,
    /// Local path of the file to stage in
    pub input: String,
    pub executable: String,
    /// Arguments for the executable; the staged input path is appended as
    /// the final argument
    pub arguments: Vec<String>,
    /// File name for the job's redirected stdout, inside the workdir
    pub stdout_name: String,
    /// Local path the retrieved stdout is copied to
    pub destination: String,
}

impl StagingRun {
    /// A run with the demonstration defaults: stage `input`, run
    /// `wc -c <staged input>` with stdout redirected to `stdout.txt`, and
    /// retrieve it next to the destination path.
    pub fn new(input: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            local_scheme: "file".to_string(),
            remote_scheme: "sftp".to_string(),
            remote_location: "localhost".to_string(),
            remote_credential: None,
            scheduler_scheme: "ssh".to_string(),
            scheduler_location: "localhost".to_string(),
            scheduler_credential: None,
            workdir: "/tmp/stagelink-run".to_string(),
            input: input.into(),
            executable: "wc".to_string(),
            arguments: vec!["-c".to_string()],
            stdout_name: "stdout.txt".to_string(),
            destination: destination.into(),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub job_id: String,
    pub exit_code: i32,
    /// Path of the staged input on the remote filesystem
    pub staged_input: String,
    /// Local path the job's stdout was retrieved to
    pub destination: String,
}

/// Join a name onto a remote working directory using `/` separators.
fn join_remote(workdir: &str, name: &str) -> String {
    format!("{}/{}", workdir.trim_end_matches('/'), name)
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Execute the full staging sequence.
///
/// 1. Open the local and remote filesystems.
/// 2. Create the remote working directory and stage the input file in.
/// 3. Open a scheduler and submit the job, stdout redirected into the
///    working directory.
/// 4. Block until the job is done; a non-zero exit code becomes
///    `StageError::JobFailed` with the status's error message.
/// 5. Retrieve the redirected stdout to the local destination.
/// 6. Cleanup, in order: delete the remote working directory, close the
///    remote filesystem, close the local filesystem, delete the job record,
///    close the scheduler.
pub async fn run_job(
    jobs: &mut JobsClient,
    files: &mut FilesClient,
    run: &StagingRun,
) -> Result<RunOutcome> {
    let local_fs = files
        .new_file_system(&run.local_scheme, "", None)
        .await?;
    let remote_fs = files
        .new_file_system(
            &run.remote_scheme,
            &run.remote_location,
            run.remote_credential.clone(),
        )
        .await?;

    files.create_directories(&remote_fs, &run.workdir).await?;

    let staged_input = join_remote(&run.workdir, &file_name(&run.input));
    tracing::info!(input = %run.input, staged = %staged_input, "Staging input file");
    files
        .copy(&local_fs, &run.input, &remote_fs, &staged_input)
        .await?;

    let scheduler = jobs
        .new_scheduler(
            &run.scheduler_scheme,
            &run.scheduler_location,
            run.scheduler_credential.clone(),
        )
        .await?;

    let stdout_path = join_remote(&run.workdir, &run.stdout_name);
    let description = JobDescription::new(&run.executable)
        .args(run.arguments.iter().cloned())
        .arg(&staged_input)
        .stdout(&stdout_path);

    let job = jobs.submit_job(&scheduler, &description).await?;
    let job_id = job.id().to_string();

    tracing::info!(job_id = %job_id, "Waiting for job to finish");
    let status = jobs.wait_until_done(&job).await?;
    let status = status.require_success()?;
    let exit_code = status.exit_code.unwrap_or(0);

    tracing::info!(stdout = %stdout_path, destination = %run.destination, "Retrieving job output");
    files
        .copy(&remote_fs, &stdout_path, &local_fs, &run.destination)
        .await?;

    files.delete(&remote_fs, &run.workdir, true).await?;
    files.close_file_system(remote_fs).await?;
    files.close_file_system(local_fs).await?;
    jobs.delete_job(job).await?;
    jobs.close_scheduler(scheduler).await?;

    Ok(RunOutcome {
        job_id,
        exit_code,
        staged_input,
        destination: run.destination.clone(),
    })
}

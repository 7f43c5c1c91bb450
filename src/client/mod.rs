//! Typed wrappers over the generated service stubs.
//!
//! Handles are opaque identifiers minted by the remote service. The client
//! never inspects them; it only passes them back on subsequent calls. Every
//! handle must be closed (or deleted) exactly once, after all operations
//! referencing it have completed. The close/delete methods consume the
//! handle to make double release a compile error, but use-after-close via a
//! stale clone is still only detected remotely.

pub mod files;
pub mod jobs;

pub use files::FilesClient;
pub use jobs::JobsClient;

use crate::error::{Result, StageError};
use crate::proto;

/// A remote-service-side binding to a job backend (e.g. `ssh@host`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerHandle {
    id: String,
}

impl SchedulerHandle {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A remote-service-side binding to a scheme+location (e.g. `sftp@host`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemHandle {
    id: String,
}

impl FileSystemHandle {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A submitted unit of work, tracked by the service until deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    id: String,
}

impl JobHandle {
    pub fn id(&self) -> &str {
        &self.id
    }
}

pub(crate) fn scheduler_handle(id: String) -> SchedulerHandle {
    SchedulerHandle { id }
}

pub(crate) fn filesystem_handle(id: String) -> FileSystemHandle {
    FileSystemHandle { id }
}

pub(crate) fn job_handle(id: String) -> JobHandle {
    JobHandle { id }
}

/// Credential presented when opening a scheduler or filesystem.
#[derive(Debug, Clone)]
pub enum Credential {
    Password {
        username: String,
        password: String,
    },
    Certificate {
        certificate_file: String,
        passphrase: String,
    },
}

impl Credential {
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credential::Password {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn certificate(certificate_file: impl Into<String>, passphrase: impl Into<String>) -> Self {
        Credential::Certificate {
            certificate_file: certificate_file.into(),
            passphrase: passphrase.into(),
        }
    }

    pub(crate) fn split(
        credential: Option<Credential>,
    ) -> (
        Option<proto::PasswordCredential>,
        Option<proto::CertificateCredential>,
    ) {
        match credential {
            Some(Credential::Password { username, password }) => (
                Some(proto::PasswordCredential { username, password }),
                None,
            ),
            Some(Credential::Certificate {
                certificate_file,
                passphrase,
            }) => (
                None,
                Some(proto::CertificateCredential {
                    certificate_file,
                    passphrase,
                }),
            ),
            None => (None, None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Completed,
    Failed,
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobState::Pending => write!(f, "pending"),
            JobState::Running => write!(f, "running"),
            JobState::Completed => write!(f, "completed"),
            JobState::Failed => write!(f, "failed"),
        }
    }
}

/// Immutable snapshot of a job's state as reported by the service.
#[derive(Debug, Clone)]
pub struct JobStatus {
    pub state: JobState,
    pub running: bool,
    pub done: bool,
    pub exit_code: Option<i32>,
    pub error_message: Option<String>,
}

impl JobStatus {
    pub(crate) fn from_proto(response: proto::JobStatusResponse) -> Self {
        let state = match response.state() {
            proto::JobState::Running => JobState::Running,
            proto::JobState::Completed => JobState::Completed,
            proto::JobState::Failed => JobState::Failed,
            // The service never reports UNSPECIFIED for a tracked job
            proto::JobState::Pending | proto::JobState::Unspecified => JobState::Pending,
        };
        Self {
            state,
            running: response.running,
            done: response.done,
            exit_code: response.exit_code,
            error_message: if response.error_message.is_empty() {
                None
            } else {
                Some(response.error_message)
            },
        }
    }

    /// Convert a terminal status into a result: a non-zero exit code becomes
    /// `StageError::JobFailed` carrying the status's error message.
    pub fn require_success(self) -> Result<JobStatus> {
        match self.exit_code {
            Some(code) if code != 0 => Err(StageError::JobFailed {
                exit_code: code,
                message: self.error_message.unwrap_or_default(),
            }),
            _ => Ok(self),
        }
    }
}

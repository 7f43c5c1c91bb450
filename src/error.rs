use thiserror::Error;

use crate::tls::TlsError;

#[derive(Error, Debug)]
pub enum StageError {
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("RPC failed: {0}")]
    Rpc(#[from] tonic::Status),

    #[error("TLS error: {0}")]
    Tls(#[from] TlsError),

    #[error("Job exited with code {exit_code}: {message}")]
    JobFailed { exit_code: i32, message: String },
}

pub type Result<T> = std::result::Result<T, StageError>;

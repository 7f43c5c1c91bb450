use std::collections::HashMap;

use crate::proto;

/// Specification of a single remotely-executed process invocation.
///
/// Paths in the description (working directory, stdout/stderr redirection)
/// are interpreted on the scheduler's host, not locally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobDescription {
    pub executable: String,
    pub arguments: Vec<String>,
    pub queue: Option<String>,
    pub working_directory: Option<String>,
    pub stdout_path: Option<String>,
    pub stderr_path: Option<String>,
    pub environment: HashMap<String, String>,
}

impl JobDescription {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            ..Default::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn queue(mut self, queue: impl Into<String>) -> Self {
        self.queue = Some(queue.into());
        self
    }

    pub fn working_directory(mut self, dir: impl Into<String>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn stdout(mut self, path: impl Into<String>) -> Self {
        self.stdout_path = Some(path.into());
        self
    }

    pub fn stderr(mut self, path: impl Into<String>) -> Self {
        self.stderr_path = Some(path.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub(crate) fn to_proto(&self) -> proto::JobDescription {
        proto::JobDescription {
            executable: self.executable.clone(),
            arguments: self.arguments.clone(),
            queue: self.queue.clone().unwrap_or_default(),
            working_directory: self.working_directory.clone().unwrap_or_default(),
            stdout_path: self.stdout_path.clone().unwrap_or_default(),
            stderr_path: self.stderr_path.clone().unwrap_or_default(),
            environment: self.environment.clone(),
        }
    }
}

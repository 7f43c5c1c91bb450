use std::collections::BTreeSet;

use tonic::transport::Channel;

use crate::client::{
    job_handle, scheduler_handle, Credential, JobHandle, JobStatus, SchedulerHandle,
};
use crate::description::JobDescription;
use crate::error::Result;
use crate::proto;
use crate::proto::jobs_service_client::JobsServiceClient;

/// Client for the jobs service: schedulers and the job lifecycle.
///
/// Cheaply cloneable (tonic's `Channel` is an `Arc` internally). Every method
/// is a single unary call that blocks until its response arrives; there is no
/// retry, caching or pipelining.
#[derive(Clone)]
pub struct JobsClient {
    inner: JobsServiceClient<Channel>,
}

impl JobsClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: JobsServiceClient::new(channel),
        }
    }

    /// The set of schemes the service currently supports, order-independent.
    pub async fn get_schemes(&mut self) -> Result<BTreeSet<String>> {
        let response = self
            .inner
            .get_schemes(proto::GetSchemesRequest {})
            .await?
            .into_inner();
        Ok(response.schemes.into_iter().collect())
    }

    pub async fn new_scheduler(
        &mut self,
        scheme: &str,
        location: &str,
        credential: Option<Credential>,
    ) -> Result<SchedulerHandle> {
        let (password, certificate) = Credential::split(credential);
        let response = self
            .inner
            .new_scheduler(proto::NewSchedulerRequest {
                scheme: scheme.to_string(),
                location: location.to_string(),
                password,
                certificate,
                properties: Default::default(),
            })
            .await?
            .into_inner();

        tracing::debug!(scheme, location, scheduler_id = %response.scheduler_id, "Scheduler created");
        Ok(scheduler_handle(response.scheduler_id))
    }

    pub async fn list_schedulers(&mut self) -> Result<Vec<SchedulerHandle>> {
        let response = self
            .inner
            .list_schedulers(proto::ListSchedulersRequest {})
            .await?
            .into_inner();
        Ok(response
            .scheduler_ids
            .into_iter()
            .map(scheduler_handle)
            .collect())
    }

    pub async fn default_queue(&mut self, scheduler: &SchedulerHandle) -> Result<String> {
        let response = self
            .inner
            .get_default_queue(proto::GetDefaultQueueRequest {
                scheduler_id: scheduler.id().to_string(),
            })
            .await?
            .into_inner();
        Ok(response.queue)
    }

    pub async fn queues(&mut self, scheduler: &SchedulerHandle) -> Result<Vec<String>> {
        let response = self
            .inner
            .get_queues(proto::GetQueuesRequest {
                scheduler_id: scheduler.id().to_string(),
            })
            .await?
            .into_inner();
        Ok(response.queues)
    }

    pub async fn is_open(&mut self, scheduler: &SchedulerHandle) -> Result<bool> {
        let response = self
            .inner
            .is_open(proto::IsOpenRequest {
                scheduler_id: scheduler.id().to_string(),
            })
            .await?
            .into_inner();
        Ok(response.open)
    }

    pub async fn submit_job(
        &mut self,
        scheduler: &SchedulerHandle,
        description: &JobDescription,
    ) -> Result<JobHandle> {
        let response = self
            .inner
            .submit_job(proto::SubmitJobRequest {
                scheduler_id: scheduler.id().to_string(),
                description: Some(description.to_proto()),
            })
            .await?
            .into_inner();

        tracing::info!(job_id = %response.job_id, executable = %description.executable, "Job submitted");
        Ok(job_handle(response.job_id))
    }

    pub async fn job_status(&mut self, job: &JobHandle) -> Result<JobStatus> {
        let response = self
            .inner
            .get_job_status(proto::GetJobStatusRequest {
                job_id: job.id().to_string(),
            })
            .await?
            .into_inner();
        Ok(JobStatus::from_proto(response))
    }

    /// Block until the job is running (or already past running).
    pub async fn wait_until_running(&mut self, job: &JobHandle) -> Result<JobStatus> {
        let response = self
            .inner
            .wait_until_running(proto::WaitRequest {
                job_id: job.id().to_string(),
            })
            .await?
            .into_inner();
        Ok(JobStatus::from_proto(response))
    }

    /// Block until the job reaches a terminal state. No client-side timeout
    /// or cancellation is exposed.
    pub async fn wait_until_done(&mut self, job: &JobHandle) -> Result<JobStatus> {
        let response = self
            .inner
            .wait_until_done(proto::WaitRequest {
                job_id: job.id().to_string(),
            })
            .await?
            .into_inner();
        Ok(JobStatus::from_proto(response))
    }

    pub async fn cancel_job(&mut self, job: &JobHandle) -> Result<JobStatus> {
        let response = self
            .inner
            .cancel_job(proto::CancelJobRequest {
                job_id: job.id().to_string(),
            })
            .await?
            .into_inner();
        Ok(JobStatus::from_proto(response))
    }

    /// Release the service-side job record. Consumes the handle.
    pub async fn delete_job(&mut self, job: JobHandle) -> Result<()> {
        self.inner
            .delete_job(proto::DeleteJobRequest {
                job_id: job.id().to_string(),
            })
            .await?;
        Ok(())
    }

    /// Close the scheduler binding. Consumes the handle.
    pub async fn close_scheduler(&mut self, scheduler: SchedulerHandle) -> Result<()> {
        self.inner
            .close_scheduler(proto::CloseSchedulerRequest {
                scheduler_id: scheduler.id().to_string(),
            })
            .await?;
        Ok(())
    }
}

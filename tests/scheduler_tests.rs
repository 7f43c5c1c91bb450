
use stagelink::client::JobState;
use stagelink::description::JobDescription;
use stagelink::error::StageError;
use test_backend::TestServer;

#[tokio::test]
async fn scheduler_queue_introspection() {
    let server = TestServer::spawn().await;
    let (mut jobs, _files) = server.connect().await;

    let scheduler = jobs.new_scheduler("local", "", None).await.unwrap();

    assert!(jobs.is_open(&scheduler).await.unwrap());
    assert_eq!(jobs.default_queue(&scheduler).await.unwrap(), "single");
    let queues = jobs.queues(&scheduler).await.unwrap();
    assert!(queues.contains(&"single".to_string()));

    let stale = scheduler.clone();
    jobs.close_scheduler(scheduler).await.unwrap();
    assert!(!jobs.is_open(&stale).await.unwrap());
}

#[tokio::test]
async fn list_schedulers_reflects_open_handles() {
    let server = TestServer::spawn().await;
    let (mut jobs, _files) = server.connect().await;

    assert!(jobs.list_schedulers().await.unwrap().is_empty());
    let scheduler = jobs.new_scheduler("local", "", None).await.unwrap();
    assert_eq!(jobs.list_schedulers().await.unwrap().len(), 1);
    jobs.close_scheduler(scheduler).await.unwrap();
    assert!(jobs.list_schedulers().await.unwrap().is_empty());
}

#[tokio::test]
async fn successful_job_reports_completed_state() {
    let server = TestServer::spawn().await;
    let (mut jobs, _files) = server.connect().await;

    let scheduler = jobs.new_scheduler("local", "", None).await.unwrap();
    let description = JobDescription::new("true");
    let job = jobs.submit_job(&scheduler, &description).await.unwrap();

    // The job is already past running, so this returns immediately.
    let status = jobs.wait_until_running(&job).await.unwrap();
    assert!(status.done);

    let status = jobs.wait_until_done(&job).await.unwrap();
    assert_eq!(status.state, JobState::Completed);
    assert!(status.done);
    assert_eq!(status.exit_code, Some(0));
    assert!(status.error_message.is_none());

    let polled = jobs.job_status(&job).await.unwrap();
    assert_eq!(polled.state, JobState::Completed);

    jobs.delete_job(job).await.unwrap();
    jobs.close_scheduler(scheduler).await.unwrap();
}

#[tokio::test]
async fn cancelling_a_finished_job_returns_its_terminal_status() {
    let server = TestServer::spawn().await;
    let (mut jobs, _files) = server.connect().await;

    let scheduler = jobs.new_scheduler("local", "", None).await.unwrap();
    let job = jobs
        .submit_job(&scheduler, &JobDescription::new("true"))
        .await
        .unwrap();

    let status = jobs.cancel_job(&job).await.unwrap();
    assert!(status.done);
    assert_eq!(status.exit_code, Some(0));
}

#[tokio::test]
async fn status_of_a_deleted_job_is_not_found() {
    let server = TestServer::spawn().await;
    let (mut jobs, _files) = server.connect().await;

    let scheduler = jobs.new_scheduler("local", "", None).await.unwrap();
    let job = jobs
        .submit_job(&scheduler, &JobDescription::new("true"))
        .await
        .unwrap();
    let stale = job.clone();

    jobs.delete_job(job).await.unwrap();
    let err = jobs.job_status(&stale).await.unwrap_err();
    match err {
        StageError::Rpc(status) => assert_eq!(status.code(), tonic::Code::NotFound),
        other => panic!("expected Rpc error, got {other:?}"),
    }
}

#[tokio::test]
async fn submitting_to_an_unknown_scheduler_is_not_found() {
    let server = TestServer::spawn().await;
    let (mut jobs, _files) = server.connect().await;

    let scheduler = jobs.new_scheduler("local", "", None).await.unwrap();
    let stale = scheduler.clone();
    jobs.close_scheduler(scheduler).await.unwrap();

    let err = jobs
        .submit_job(&stale, &JobDescription::new("true"))
        .await
        .unwrap_err();
    match err {
        StageError::Rpc(status) => assert_eq!(status.code(), tonic::Code::NotFound),
        other => panic!("expected Rpc error, got {other:?}"),
    }
}

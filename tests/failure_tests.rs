
use std::sync::atomic::Ordering;

use stagelink::client::Credential;
use stagelink::description::JobDescription;
use stagelink::diagnostics::probe_scheduler;
use stagelink::error::StageError;
use test_backend::TestServer;

#[tokio::test]
async fn unknown_scheduler_scheme_is_a_precondition_failure() {
    let server = TestServer::spawn().await;
    let (mut jobs, _files) = server.connect().await;

    let err = jobs.new_scheduler("sfdfdsh", "", None).await.unwrap_err();
    match err {
        StageError::Rpc(status) => {
            assert_eq!(status.code(), tonic::Code::FailedPrecondition);
            assert!(
                status
                    .message()
                    .contains("Could not find adaptor for scheme sfdfdsh"),
                "unexpected detail: {:?}",
                status.message()
            );
        }
        other => panic!("expected Rpc error, got {other:?}"),
    }
}

#[tokio::test]
async fn ssh_scheduler_without_credentials_reports_auth_cancel() {
    let server = TestServer::spawn().await;
    let (mut jobs, _files) = server.connect().await;

    let err = jobs.new_scheduler("ssh", "localhost", None).await.unwrap_err();
    match err {
        StageError::Rpc(status) => {
            assert_eq!(status.code(), tonic::Code::FailedPrecondition);
            assert!(status.message().contains("Auth cancel"));
        }
        other => panic!("expected Rpc error, got {other:?}"),
    }
}

#[tokio::test]
async fn ssh_scheduler_with_password_succeeds() {
    let server = TestServer::spawn().await;
    let (mut jobs, _files) = server.connect().await;

    let scheduler = jobs
        .new_scheduler("ssh", "localhost", Some(Credential::password("user", "secret")))
        .await
        .unwrap();
    jobs.close_scheduler(scheduler).await.unwrap();
}

#[tokio::test]
async fn job_failure_message_matches_status_error_message() {
    let server = TestServer::spawn().await;
    let (mut jobs, _files) = server.connect().await;

    let scheduler = jobs.new_scheduler("local", "", None).await.unwrap();
    let description = JobDescription::new("sh").arg("-c").arg("echo nope >&2; exit 2");
    let job = jobs.submit_job(&scheduler, &description).await.unwrap();

    let status = jobs.wait_until_done(&job).await.unwrap();
    assert!(status.done);
    let expected = status.error_message.clone().expect("failed job has a message");

    let err = status.require_success().unwrap_err();
    match err {
        StageError::JobFailed { exit_code, message } => {
            assert_eq!(exit_code, 2);
            assert_eq!(message, expected);
        }
        other => panic!("expected JobFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn probe_reports_failure_without_recovering() {
    let server = TestServer::spawn().await;
    let (mut jobs, _files) = server.connect().await;

    let report = probe_scheduler(&mut jobs, "sfdfdsh", "")
        .await
        .unwrap()
        .expect("probe of an unknown scheme reports a failure");
    assert_eq!(report.code, tonic::Code::FailedPrecondition);
    assert!(report.message.contains("Could not find adaptor for scheme sfdfdsh"));

    let report = probe_scheduler(&mut jobs, "ssh", "localhost")
        .await
        .unwrap()
        .expect("probe without credentials reports a failure");
    assert!(report.message.contains("Auth cancel"));
}

#[tokio::test]
async fn probe_closes_the_scheduler_it_created() {
    let server = TestServer::spawn().await;
    let (mut jobs, _files) = server.connect().await;

    let report = probe_scheduler(&mut jobs, "local", "").await.unwrap();
    assert!(report.is_none());
    assert_eq!(server.counters().schedulers_closed.load(Ordering::SeqCst), 1);
}

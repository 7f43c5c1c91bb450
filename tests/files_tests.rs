
use stagelink::error::StageError;
use test_backend::TestServer;

#[tokio::test]
async fn unknown_filesystem_scheme_is_a_precondition_failure() {
    let server = TestServer::spawn().await;
    let (_jobs, mut files) = server.connect().await;

    let err = files.new_file_system("gopher", "", None).await.unwrap_err();
    match err {
        StageError::Rpc(status) => {
            assert_eq!(status.code(), tonic::Code::FailedPrecondition);
            assert!(status
                .message()
                .contains("Could not find adaptor for scheme gopher"));
        }
        other => panic!("expected Rpc error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_directories_is_idempotent() {
    let server = TestServer::spawn().await;
    let (_jobs, mut files) = server.connect().await;

    let fs = files.new_file_system("sftp", "localhost", None).await.unwrap();
    files.create_directories(&fs, "/a/b/c").await.unwrap();
    files.create_directories(&fs, "/a/b/c").await.unwrap();
    assert!(server.remote_root.join("a/b/c").is_dir());
}

#[tokio::test]
async fn copy_transfers_content_between_filesystems() {
    let server = TestServer::spawn().await;
    let (_jobs, mut files) = server.connect().await;

    std::fs::write(server.local_root.join("data.bin"), b"staged bytes").unwrap();

    let local = files.new_file_system("file", "", None).await.unwrap();
    let remote = files.new_file_system("sftp", "localhost", None).await.unwrap();

    assert!(!files.exists(&remote, "/data.bin").await.unwrap());
    files.copy(&local, "/data.bin", &remote, "/data.bin").await.unwrap();
    assert!(files.exists(&remote, "/data.bin").await.unwrap());

    let copied = std::fs::read(server.remote_root.join("data.bin")).unwrap();
    assert_eq!(copied, b"staged bytes");
}

#[tokio::test]
async fn delete_removes_a_file() {
    let server = TestServer::spawn().await;
    let (_jobs, mut files) = server.connect().await;

    std::fs::write(server.remote_root.join("stale.txt"), b"x").unwrap();

    let remote = files.new_file_system("sftp", "localhost", None).await.unwrap();
    files.delete(&remote, "/stale.txt", false).await.unwrap();
    assert!(!files.exists(&remote, "/stale.txt").await.unwrap());
}

#[tokio::test]
async fn closing_a_filesystem_twice_is_an_error() {
    let server = TestServer::spawn().await;
    let (_jobs, mut files) = server.connect().await;

    let fs = files.new_file_system("sftp", "localhost", None).await.unwrap();
    let stale = fs.clone();

    files.close_file_system(fs).await.unwrap();
    let err = files.close_file_system(stale).await.unwrap_err();
    match err {
        StageError::Rpc(status) => assert_eq!(status.code(), tonic::Code::NotFound),
        other => panic!("expected Rpc error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_file_systems_reflects_open_handles() {
    let server = TestServer::spawn().await;
    let (_jobs, mut files) = server.connect().await;

    assert!(files.list_file_systems().await.unwrap().is_empty());

    let fs = files.new_file_system("sftp", "localhost", None).await.unwrap();
    let listed = files.list_file_systems().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), fs.id());

    files.close_file_system(fs).await.unwrap();
    assert!(files.list_file_systems().await.unwrap().is_empty());
}

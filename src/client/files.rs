use tonic::transport::Channel;

use crate::client::{filesystem_handle, Credential, FileSystemHandle};
use crate::error::Result;
use crate::proto;
use crate::proto::files_service_client::FilesServiceClient;

fn remote_path(filesystem: &FileSystemHandle, path: &str) -> proto::Path {
    proto::Path {
        filesystem_id: filesystem.id().to_string(),
        path: path.to_string(),
    }
}

/// Client for the files service: filesystem handles and path operations.
#[derive(Clone)]
pub struct FilesClient {
    inner: FilesServiceClient<Channel>,
}

impl FilesClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: FilesServiceClient::new(channel),
        }
    }

    pub async fn new_file_system(
        &mut self,
        scheme: &str,
        location: &str,
        credential: Option<Credential>,
    ) -> Result<FileSystemHandle> {
        let (password, certificate) = Credential::split(credential);
        let response = self
            .inner
            .new_file_system(proto::NewFileSystemRequest {
                scheme: scheme.to_string(),
                location: location.to_string(),
                password,
                certificate,
                properties: Default::default(),
            })
            .await?
            .into_inner();

        tracing::debug!(scheme, location, filesystem_id = %response.filesystem_id, "Filesystem created");
        Ok(filesystem_handle(response.filesystem_id))
    }

    pub async fn list_file_systems(&mut self) -> Result<Vec<FileSystemHandle>> {
        let response = self
            .inner
            .list_file_systems(proto::ListFileSystemsRequest {})
            .await?
            .into_inner();
        Ok(response
            .filesystem_ids
            .into_iter()
            .map(filesystem_handle)
            .collect())
    }

    /// Create a directory and any missing parents. Idempotent.
    pub async fn create_directories(
        &mut self,
        filesystem: &FileSystemHandle,
        path: &str,
    ) -> Result<()> {
        self.inner
            .create_directories(proto::CreateDirectoriesRequest {
                path: Some(remote_path(filesystem, path)),
            })
            .await?;
        Ok(())
    }

    pub async fn exists(&mut self, filesystem: &FileSystemHandle, path: &str) -> Result<bool> {
        let response = self
            .inner
            .exists(proto::ExistsRequest {
                path: Some(remote_path(filesystem, path)),
            })
            .await?
            .into_inner();
        Ok(response.exists)
    }

    /// Synchronous full-file copy, possibly across filesystems. Blocks until
    /// the copy is complete.
    pub async fn copy(
        &mut self,
        source_fs: &FileSystemHandle,
        source_path: &str,
        target_fs: &FileSystemHandle,
        target_path: &str,
    ) -> Result<()> {
        tracing::debug!(
            source = source_path,
            target = target_path,
            "Copying between filesystems"
        );
        self.inner
            .copy(proto::CopyRequest {
                source: Some(remote_path(source_fs, source_path)),
                target: Some(remote_path(target_fs, target_path)),
            })
            .await?;
        Ok(())
    }

    pub async fn delete(
        &mut self,
        filesystem: &FileSystemHandle,
        path: &str,
        recursive: bool,
    ) -> Result<()> {
        self.inner
            .delete(proto::DeleteRequest {
                path: Some(remote_path(filesystem, path)),
                recursive,
            })
            .await?;
        Ok(())
    }

    /// Close the filesystem binding. Consumes the handle.
    pub async fn close_file_system(&mut self, filesystem: FileSystemHandle) -> Result<()> {
        self.inner
            .close_file_system(proto::CloseFileSystemRequest {
                filesystem_id: filesystem.id().to_string(),
            })
            .await?;
        Ok(())
    }
}

//! Download report use case.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use stockroom_domain::ReportRequest;
use tokio::fs;
use tracing::{info, warn};

use crate::error::ApplicationResult;
use crate::ports::ReportGateway;

/// Input for downloading a report.
#[derive(Debug, Clone)]
pub struct DownloadReportInput {
    /// Which report to fetch.
    pub request: ReportRequest,
    /// Directory the file is written to.
    pub target_dir: PathBuf,
}

/// Use case for saving a server-rendered report to disk.
pub struct DownloadReport<R: ReportGateway> {
    gateway: Arc<R>,
}

impl<R: ReportGateway> DownloadReport<R> {
    /// Creates a new `DownloadReport` use case.
    pub const fn new(gateway: Arc<R>) -> Self {
        Self { gateway }
    }

    /// Fetches the report and writes it under its conventional name.
    ///
    /// # Errors
    ///
    /// Returns an error if the download or the file write fails.
    pub async fn execute(&self, input: DownloadReportInput) -> ApplicationResult<PathBuf> {
        let bytes = self
            .gateway
            .fetch_report(&input.request)
            .await
            .inspect_err(|error| {
                warn!(%error, path = %input.request.path(), "report download failed");
            })?;

        let path = Self::write(&input.target_dir, &input.request.file_name(), &bytes).await?;
        info!(path = %path.display(), bytes = bytes.len(), "report saved");
        Ok(path)
    }

    async fn write(dir: &Path, file_name: &str, bytes: &[u8]) -> ApplicationResult<PathBuf> {
        fs::create_dir_all(dir).await?;
        let path = dir.join(file_name);
        fs::write(&path, bytes).await?;
        Ok(path)
    }
}

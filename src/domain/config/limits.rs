use serde::Serialize;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
pub const DEFAULT_MAX_BATCH_FILES: usize = 10;

/// Headroom added to the request body limit for multipart boundaries and headers.
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UploadLimits {
    #[serde(rename = "maxFileSize")]
    pub max_file_size: u64,
    #[serde(rename = "maxBatchFiles")]
    pub max_batch_files: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_batch_files: DEFAULT_MAX_BATCH_FILES,
        }
    }
}

impl UploadLimits {
    /// Upper bound for a whole request body; per-file limits are enforced while streaming.
    pub fn request_body_limit(&self) -> usize {
        let total = self
            .max_file_size
            .saturating_mul(self.max_batch_files as u64)
            .saturating_add(MULTIPART_OVERHEAD);
        usize::try_from(total).unwrap_or(usize::MAX)
    }
}

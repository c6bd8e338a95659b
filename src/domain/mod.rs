mod conversion_id;
mod conversion_method;
mod conversion_request;
mod extracted_document;
mod job;
mod job_status;
mod markdown_artifact;
mod storage_key;
mod stored_asset;

pub use conversion_id::ConversionId;
pub use conversion_method::ConversionMethod;
pub use conversion_request::{ConversionInput, ConversionRequest, InputKind};
pub use extracted_document::{CrawledPage, ExtractedDocument, ImageRef, Table, TextSegment};
pub use job::{JobHandle, JobId, JobSnapshot};
pub use job_status::JobStatus;
pub use markdown_artifact::{EmptyArtifact, MarkdownArtifact};
pub use storage_key::StorageKey;
pub use stored_asset::StoredAsset;

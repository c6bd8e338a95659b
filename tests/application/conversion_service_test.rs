use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use docmark::application::ports::{ConversionError, StorageError, StorageSink};
use docmark::application::services::ConversionService;
use docmark::domain::{ConversionMethod, ConversionRequest, StorageKey, StoredAsset};

use crate::support::{
    StubConverter, conversion_service, converters_from, entries_in, memory_sink, memory_storage,
    scratch_in,
};

fn local_markdown() -> Result<String, ConversionError> {
    Ok("# local".to_string())
}

fn managed_markdown() -> Result<String, ConversionError> {
    Ok("# managed".to_string())
}

fn empty_markdown() -> Result<String, ConversionError> {
    Ok("   ".to_string())
}

struct RejectingSink;

#[async_trait]
impl StorageSink for RejectingSink {
    async fn put(&self, _local_path: &Path, _key: &StorageKey) -> Result<StoredAsset, StorageError> {
        Err(StorageError::UploadFailed("bucket unavailable".to_string()))
    }
}

#[tokio::test]
async fn given_managed_method_when_converting_then_dispatches_to_managed_adapter() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = memory_storage();
    let service = conversion_service(
        converters_from(
            StubConverter::returning(local_markdown),
            StubConverter::returning(managed_markdown),
        ),
        storage.sink.clone(),
        scratch_in(scratch.path()),
    );
    let request = ConversionRequest::website("https://example.com", ConversionMethod::Managed);

    let asset = service.convert(&request).await.unwrap();

    assert_eq!(
        asset.key.as_str(),
        format!("{}/example.com.md", request.id.as_uuid())
    );
    assert_eq!(storage.read(&asset.key).await.unwrap(), b"# managed");
}

#[tokio::test]
async fn given_pdf_bytes_when_converting_then_staged_file_is_removed() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = memory_storage();
    let service = conversion_service(
        converters_from(
            StubConverter::returning(local_markdown),
            StubConverter::returning(managed_markdown),
        ),
        storage.sink.clone(),
        scratch_in(scratch.path()),
    );

    let asset = service
        .convert_pdf(b"%PDF-1.4", "paper.pdf", "open-source")
        .await
        .unwrap();

    assert!(asset.url.ends_with("/paper.md"));
    assert_eq!(storage.read(&asset.key).await.unwrap(), b"# local");
    assert_eq!(entries_in(scratch.path()), 0);
}

#[tokio::test]
async fn given_invalid_method_when_converting_then_rejected_before_any_work() {
    let scratch = tempfile::tempdir().unwrap();
    let service = conversion_service(
        converters_from(
            StubConverter::returning(local_markdown),
            StubConverter::returning(managed_markdown),
        ),
        memory_sink(),
        scratch_in(scratch.path()),
    );

    let err = service
        .convert_website("https://example.com", "premium")
        .await
        .unwrap_err();

    assert!(matches!(err, ConversionError::InvalidMethod(_)));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn given_blank_markdown_when_converting_then_empty_result() {
    let scratch = tempfile::tempdir().unwrap();
    let service = conversion_service(
        converters_from(
            StubConverter::returning(empty_markdown),
            StubConverter::returning(managed_markdown),
        ),
        memory_sink(),
        scratch_in(scratch.path()),
    );

    let err = service
        .convert_website("https://example.com", "open-source")
        .await
        .unwrap_err();

    assert!(matches!(err, ConversionError::EmptyResult(_)));
}

#[tokio::test]
async fn given_failing_storage_when_publishing_then_upload_failed_and_scratch_cleaned() {
    let scratch = tempfile::tempdir().unwrap();
    let storage: Arc<dyn StorageSink> = Arc::new(RejectingSink);
    let service = ConversionService::new(
        converters_from(
            StubConverter::returning(local_markdown),
            StubConverter::returning(managed_markdown),
        ),
        storage,
        scratch_in(scratch.path()),
    );

    let err = service
        .convert_pdf(b"%PDF-1.4", "paper.pdf", "open-source")
        .await
        .unwrap_err();

    assert!(matches!(err, ConversionError::UploadFailed(ref m) if m.contains("bucket unavailable")));
    assert_eq!(entries_in(scratch.path()), 0);
}

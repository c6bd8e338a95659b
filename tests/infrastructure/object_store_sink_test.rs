use std::io::Write;

use docmark::application::ports::{StorageError, StorageSink};
use docmark::domain::{ConversionId, StorageKey};
use docmark::infrastructure::storage::ObjectStoreSink;

use crate::support::MemoryStorage;

fn temp_file_with(data: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn given_small_file_when_putting_then_url_joins_base_and_key() {
    let storage = MemoryStorage::new("https://bucket.example/");
    let key = StorageKey::new(&ConversionId::new(), "doc.md");
    let file = temp_file_with(b"# hi");

    let asset = storage.sink.put(file.path(), &key).await.unwrap();

    assert_eq!(asset.url, format!("https://bucket.example/{}", key.as_str()));
    assert_eq!(asset.key, key);
    assert_eq!(storage.read(&key).await.unwrap(), b"# hi");
}

#[tokio::test]
async fn given_file_above_single_put_limit_when_putting_then_uploaded_in_parts() {
    let storage = MemoryStorage::new("memory://test");
    let key = StorageKey::from_raw("big/blob.bin");
    let data: Vec<u8> = (0..9 * 1024 * 1024).map(|i| (i % 251) as u8).collect();
    let file = temp_file_with(&data);

    storage.sink.put(file.path(), &key).await.unwrap();

    assert_eq!(storage.read(&key).await.unwrap(), data);
}

#[tokio::test]
async fn given_missing_local_file_when_putting_then_io_error() {
    let sink = ObjectStoreSink::in_memory("memory://test");
    let key = StorageKey::from_raw("x/y.md");

    let result = sink
        .put(std::path::Path::new("/nonexistent/docmark/file.md"), &key)
        .await;

    assert!(matches!(result, Err(StorageError::Io(_))));
}

#[tokio::test]
async fn given_local_filesystem_sink_when_putting_then_file_lands_under_root() {
    let root = tempfile::tempdir().unwrap();
    let sink = ObjectStoreSink::local(root.path().to_path_buf(), "http://files.local").unwrap();
    let key = StorageKey::from_raw("abc/page1-image1.png");
    let file = temp_file_with(b"png");

    let asset = sink.put(file.path(), &key).await.unwrap();

    assert_eq!(asset.url, "http://files.local/abc/page1-image1.png");
    assert_eq!(
        std::fs::read(root.path().join("abc/page1-image1.png")).unwrap(),
        b"png"
    );
}

#[test]
fn given_s3_without_endpoint_when_building_then_uses_virtual_host_url() {
    let sink = ObjectStoreSink::s3("my-bucket", "eu-west-1", None, None).unwrap();

    assert_eq!(
        sink.url_for(&StorageKey::from_raw("k/doc.md")),
        "https://my-bucket.s3.eu-west-1.amazonaws.com/k/doc.md"
    );
}

#[test]
fn given_s3_with_public_base_url_when_building_then_urls_use_it() {
    let sink = ObjectStoreSink::s3(
        "my-bucket",
        "eu-west-1",
        Some("http://127.0.0.1:9000"),
        Some("https://cdn.example.com/docs/"),
    )
    .unwrap();

    assert_eq!(
        sink.url_for(&StorageKey::from_raw("k/doc.md")),
        "https://cdn.example.com/docs/k/doc.md"
    );
}

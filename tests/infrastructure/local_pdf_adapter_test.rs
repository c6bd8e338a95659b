use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use docmark::application::ports::{PdfConverter, StorageError, StorageSink};
use docmark::application::services::markdown_assembler::NO_IMAGES_SENTINEL;
use docmark::domain::{ConversionId, StorageKey, StoredAsset};
use docmark::infrastructure::extraction::LocalPdfAdapter;
use docmark::infrastructure::extraction::pdf_images::extract_page_images;

use crate::support::{entries_in, memory_sink, memory_storage, scratch_in};

/// One-page PDF with a line of text and, optionally, a 2x2 grayscale image.
fn write_pdf(path: &Path, text: &str, with_image: bool) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 24.into()]),
        Operation::new("Td", vec![72.into(), 700.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ];

    let mut resources = dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    };

    if with_image {
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 2,
                "Height" => 2,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            vec![0, 255, 255, 0],
        ));
        resources.set("XObject", dictionary! { "Im1" => image_id });
        operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![100.into(), 0.into(), 0.into(), 100.into(), 72.into(), 400.into()],
            ),
            Operation::new("Do", vec!["Im1".into()]),
            Operation::new("Q", vec![]),
        ]);
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let resources_id = doc.add_object(resources);
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

struct RejectingSink;

#[async_trait]
impl StorageSink for RejectingSink {
    async fn put(&self, _local_path: &Path, key: &StorageKey) -> Result<StoredAsset, StorageError> {
        Err(StorageError::UploadFailed(format!("refused {key}")))
    }
}

#[tokio::test]
async fn given_text_only_pdf_when_converting_then_sentinel_and_page_text() {
    let work = tempfile::tempdir().unwrap();
    let pdf = work.path().join("hello.pdf");
    write_pdf(&pdf, "Hello World", false);
    let scratch = tempfile::tempdir().unwrap();
    let adapter = LocalPdfAdapter::new(memory_sink(), scratch_in(scratch.path()));

    let artifact = adapter
        .convert(&pdf, "hello.pdf", &ConversionId::new())
        .await
        .unwrap();
    let md = artifact.content();

    assert!(md.starts_with("# Extracted Content from hello.pdf\n"));
    assert!(md.contains(NO_IMAGES_SENTINEL));
    assert!(!md.contains("!["));
    assert!(md.contains("### Page 1\n```\n"));
    assert!(md.contains("Hello"));
    assert!(md.contains("## Extracted Tables"));
}

#[tokio::test]
async fn given_pdf_with_image_when_converting_then_image_is_published_and_linked() {
    let work = tempfile::tempdir().unwrap();
    let pdf = work.path().join("figure.pdf");
    write_pdf(&pdf, "Figure", true);
    let scratch = tempfile::tempdir().unwrap();
    let storage = memory_storage();
    let adapter = LocalPdfAdapter::new(storage.sink.clone(), scratch_in(scratch.path()));
    let id = ConversionId::new();

    let artifact = adapter.convert(&pdf, "figure.pdf", &id).await.unwrap();

    let key = StorageKey::new(&id, "page1-image1.png");
    assert!(
        artifact
            .content()
            .contains(&format!("![Image page 1 - 1](memory://test/{})", key.as_str()))
    );
    assert!(!artifact.content().contains(NO_IMAGES_SENTINEL));
    let png = storage.read(&key).await.unwrap();
    assert!(png.starts_with(b"\x89PNG"));
    assert_eq!(entries_in(scratch.path()), 0);
}

#[tokio::test]
async fn given_image_upload_failure_when_converting_then_image_is_skipped() {
    let work = tempfile::tempdir().unwrap();
    let pdf = work.path().join("figure.pdf");
    write_pdf(&pdf, "Figure", true);
    let scratch = tempfile::tempdir().unwrap();
    let adapter = LocalPdfAdapter::new(Arc::new(RejectingSink), scratch_in(scratch.path()));

    let artifact = adapter
        .convert(&pdf, "figure.pdf", &ConversionId::new())
        .await
        .unwrap();

    assert!(artifact.content().contains(NO_IMAGES_SENTINEL));
    assert_eq!(entries_in(scratch.path()), 0);
}

#[tokio::test]
async fn given_file_that_is_not_a_pdf_when_converting_then_parse_error() {
    let work = tempfile::tempdir().unwrap();
    let pdf = work.path().join("broken.pdf");
    std::fs::write(&pdf, b"plain text, not a pdf").unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let adapter = LocalPdfAdapter::new(memory_sink(), scratch_in(scratch.path()));

    let result = adapter
        .convert(&pdf, "broken.pdf", &ConversionId::new())
        .await;

    assert!(result.is_err());
}

#[test]
fn given_grayscale_image_when_extracting_then_reencoded_as_png() {
    let work = tempfile::tempdir().unwrap();
    let pdf = work.path().join("figure.pdf");
    write_pdf(&pdf, "Figure", true);

    let images = extract_page_images(&pdf).unwrap();

    assert_eq!(images.len(), 1);
    assert_eq!(images[0].page, 1);
    assert_eq!(images[0].index, 1);
    assert_eq!(images[0].extension, "png");
}

use docmark::domain::{ConversionMethod, ConversionRequest, InputKind, StorageKey};

#[test]
fn given_pdf_request_when_naming_artifact_then_uses_file_stem() {
    let request = ConversionRequest::pdf("/tmp/x.pdf", "Annual Report.pdf", ConversionMethod::Local);

    assert_eq!(request.artifact_name(), "Annual_Report.md");
    assert_eq!(request.input.kind(), InputKind::Pdf);
}

#[test]
fn given_website_request_when_naming_artifact_then_uses_host() {
    let request = ConversionRequest::website("https://example.com/a/b?c=d", ConversionMethod::Managed);

    assert_eq!(request.artifact_name(), "example.com.md");
    assert_eq!(request.input.kind(), InputKind::Website);
}

#[test]
fn given_unparseable_url_when_naming_artifact_then_falls_back() {
    let request = ConversionRequest::website("not a url", ConversionMethod::Local);

    assert_eq!(request.artifact_name(), "website.md");
}

#[test]
fn given_two_requests_when_created_then_ids_differ() {
    let a = ConversionRequest::website("https://example.com", ConversionMethod::Local);
    let b = ConversionRequest::website("https://example.com", ConversionMethod::Local);

    assert_ne!(a.id, b.id);
}

#[test]
fn given_request_when_building_storage_key_then_prefixed_by_id() {
    let request = ConversionRequest::website("https://example.com", ConversionMethod::Local);

    let key = StorageKey::new(&request.id, &request.artifact_name());

    assert_eq!(
        key.as_str(),
        format!("{}/example.com.md", request.id.as_uuid())
    );
}

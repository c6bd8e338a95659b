use docmark::application::services::markdown_assembler::{
    NO_IMAGES_SENTINEL, parse_sections, render_crawl_items, render_local_pdf,
    render_managed_pdf, render_markdown_table, render_website,
};
use docmark::domain::{CrawledPage, ExtractedDocument, ImageRef, Table, TextSegment};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn given_pdf_without_images_when_rendering_then_sentinel_and_no_image_lines() {
    let mut doc = ExtractedDocument::new("empty.pdf");
    doc.text.push(TextSegment::on_page(1, "Hello"));

    let md = render_local_pdf(&doc);

    assert!(md.starts_with("# Extracted Content from empty.pdf\n"));
    assert!(md.contains(NO_IMAGES_SENTINEL));
    assert!(!md.contains("!["));
    assert!(md.contains("### Page 1\n```\nHello\n```\n"));
}

#[test]
fn given_pdf_with_images_when_rendering_then_links_each_image_and_omits_sentinel() {
    let mut doc = ExtractedDocument::new("deck.pdf");
    doc.images.push(ImageRef::on_page("https://cdn/x/1.png", 2, 1));
    doc.images.push(ImageRef::on_page("https://cdn/x/2.png", 2, 2));
    doc.tables
        .push(Table::from_rows(vec![row(&["a", "b"]), row(&["1", "2"])]).on_page(3));

    let md = render_local_pdf(&doc);

    assert!(md.contains("![Image page 2 - 1](https://cdn/x/1.png)\n"));
    assert!(md.contains("![Image page 2 - 2](https://cdn/x/2.png)\n"));
    assert!(!md.contains(NO_IMAGES_SENTINEL));
    assert!(md.contains("### Table (Page 3)\n| a | b |\n| 1 | 2 |\n"));
}

#[test]
fn given_managed_extraction_when_rendering_and_reparsing_then_sections_keep_order() {
    let mut doc = ExtractedDocument::new("report.pdf");
    doc.text.push(TextSegment::new("First paragraph"));
    doc.text.push(TextSegment::new("Second paragraph"));
    doc.tables.push(
        Table::from_rows(vec![row(&["Name", "Qty"]), row(&["bolt", "4"])])
            .with_caption("fileoutpart0.xlsx"),
    );
    doc.images.push(ImageRef::new("https://cdn/f/1.png", 1));

    let sections = parse_sections(&render_managed_pdf(&doc));

    let headings: Vec<&str> = sections.iter().map(|s| s.heading.as_str()).collect();
    assert_eq!(
        headings,
        vec![
            "Extracted Text",
            "Extracted Text",
            "Table from fileoutpart0.xlsx",
            "Extracted Images"
        ]
    );
    assert_eq!(sections[0].body, "First paragraph");
    assert_eq!(sections[1].body, "Second paragraph");
    assert_eq!(sections[2].body, "| Name | Qty |\n| --- | --- |\n| bolt | 4 |");
    assert_eq!(sections[3].body, "![Image 1](https://cdn/f/1.png)");
}

#[test]
fn given_website_document_when_rendering_then_sections_follow_fixed_order() {
    let mut doc = ExtractedDocument::new("https://example.com");
    doc.text.push(TextSegment::new("Hello"));
    doc.images.push(ImageRef::new("https://example.com/a.png", 1));
    doc.links.push("https://example.com/about".to_string());
    doc.tables
        .push(Table::from_rows(vec![row(&["A"]), row(&["1"])]).with_promoted_header());

    let md = render_website("https://example.com", &doc);
    let headings: Vec<String> = parse_sections(&md).into_iter().map(|s| s.heading).collect();

    assert_eq!(headings, vec!["Text Content", "Images", "Links", "Tables"]);
    assert!(md.contains("## Text Content\n\nHello\n"));
    assert!(md.contains("![Image](https://example.com/a.png)"));
    assert!(md.contains("- [https://example.com/about](https://example.com/about)"));
    assert!(md.contains("### Table 1\n\n| A |\n| --- |\n| 1 |\n"));
}

#[test]
fn given_headerless_table_when_rendering_then_numbers_columns() {
    let table = Table::from_rows(vec![row(&["x", "y"])]);

    assert_eq!(
        render_markdown_table(&table),
        "| Column 1 | Column 2 |\n| --- | --- |\n| x | y |\n"
    );
}

#[test]
fn given_cell_with_pipe_when_rendering_then_escaped() {
    let table = Table::from_rows(vec![row(&["h"]), row(&["a|b\nc"])]).with_promoted_header();

    assert!(render_markdown_table(&table).contains("| a\\|b c |"));
}

#[test]
fn given_crawl_items_when_rendering_then_one_block_per_page() {
    let pages = vec![
        CrawledPage {
            title: "Home".to_string(),
            url: "https://example.com/".to_string(),
            body: "Welcome".to_string(),
        },
        CrawledPage {
            title: "About".to_string(),
            url: "https://example.com/about".to_string(),
            body: "Us".to_string(),
        },
    ];

    let md = render_crawl_items("https://example.com", &pages);

    assert!(md.starts_with("# Extracted Content from https://example.com\n\n"));
    assert!(md.contains("## Home\n[Source Link](https://example.com/)\n\nWelcome\n\n---\n\n"));
    assert!(md.contains("## About\n[Source Link](https://example.com/about)\n\nUs\n\n---\n\n"));
    assert!(md.find("## Home").unwrap() < md.find("## About").unwrap());
}

#[test]
fn given_code_fence_with_heading_when_parsing_sections_then_not_split() {
    let md = "# T\n\n## Extracted Text\n```\n## not a section\n```\n";

    let sections = parse_sections(md);

    assert_eq!(sections.len(), 1);
    assert!(sections[0].body.contains("## not a section"));
}

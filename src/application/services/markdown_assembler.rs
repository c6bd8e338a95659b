//! Rendering of extracted content into Markdown.
//!
//! Every function here is pure: adapters gather text, tables, images and links
//! into an [`ExtractedDocument`] and pick the layout that matches their source.
//! Section order within each layout is fixed.

use crate::domain::{CrawledPage, ExtractedDocument, Table};

pub const NO_IMAGES_SENTINEL: &str = "**No images found in this PDF.**";
pub const NO_CONTENT_FALLBACK: &str = "No Content Available";

/// A level-two section of a rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

/// Layout for PDFs extracted in-process: images first, then per-page text
/// blocks, then per-page tables.
pub fn render_local_pdf(doc: &ExtractedDocument) -> String {
    let mut md = format!("# Extracted Content from {}\n", doc.title);

    md.push_str("\n## Extracted Images\n");
    if doc.images.is_empty() {
        md.push('\n');
        md.push_str(NO_IMAGES_SENTINEL);
        md.push('\n');
    } else {
        for image in &doc.images {
            let page = image.page.unwrap_or(1);
            md.push_str(&format!(
                "![Image page {} - {}]({})\n",
                page, image.index, image.url
            ));
        }
    }

    md.push_str("\n## Extracted Text\n");
    for segment in &doc.text {
        let page = segment.page.unwrap_or(1);
        md.push_str(&format!("\n### Page {}\n```\n{}\n```\n", page, segment.text));
    }

    md.push_str("\n## Extracted Tables\n");
    for table in &doc.tables {
        let page = table.page.unwrap_or(1);
        md.push_str(&format!("\n### Table (Page {})\n", page));
        md.push_str(&render_pipe_rows(&table.rows));
    }

    md
}

/// Layout for web pages: text, images, links, tables.
pub fn render_website(url: &str, doc: &ExtractedDocument) -> String {
    let mut md = format!("# Extracted Content from {}\n\n", url);

    md.push_str("## Text Content\n\n");
    let text = doc
        .text
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    md.push_str(&text);
    md.push_str("\n\n");

    md.push_str("## Images\n\n");
    for image in &doc.images {
        md.push_str(&format!("![Image]({})\n\n", image.url));
    }

    md.push_str("## Links\n\n");
    for link in &doc.links {
        md.push_str(&format!("- [{}]({})\n", link, link));
    }
    if !doc.links.is_empty() {
        md.push('\n');
    }

    md.push_str("## Tables\n\n");
    for (i, table) in doc.tables.iter().enumerate() {
        md.push_str(&format!("### Table {}\n\n", i + 1));
        md.push_str(&render_markdown_table(table));
        md.push('\n');
    }

    md
}

/// Layout for PDFs processed by the managed extraction service: text
/// elements, then spreadsheet tables, then figures.
pub fn render_managed_pdf(doc: &ExtractedDocument) -> String {
    let mut md = String::from("# Extracted PDF Data\n\n");

    for segment in &doc.text {
        md.push_str(&format!("## Extracted Text\n\n{}\n\n", segment.text));
    }

    for table in &doc.tables {
        let caption = table.caption.as_deref().unwrap_or("table");
        md.push_str(&format!("## Table from {}\n\n", caption));
        md.push_str(&render_sheet_rows(&table.rows));
        md.push('\n');
    }

    if !doc.images.is_empty() {
        md.push_str("## Extracted Images\n");
        for (i, image) in doc.images.iter().enumerate() {
            md.push_str(&format!("![Image {}]({})\n", i + 1, image.url));
        }
        md.push('\n');
    }

    md
}

/// Layout for crawl results, one block per page in dataset order.
pub fn render_crawl_items(url: &str, pages: &[CrawledPage]) -> String {
    let mut md = format!("# Extracted Content from {}\n\n", url);

    for page in pages {
        md.push_str(&format!("## {}\n", page.title));
        md.push_str(&format!("[Source Link]({})\n\n", page.url));
        md.push_str(&format!("{}\n\n---\n\n", page.body));
    }

    md
}

/// One `| a | b |` line per row.
pub fn render_pipe_rows(rows: &[Vec<String>]) -> String {
    rows.iter().map(|row| pipe_line(row)).collect()
}

/// Pipe rows with a `---` separator inserted after the first row.
pub fn render_sheet_rows(rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        out.push_str(&pipe_line(row));
        if i == 0 {
            let dashes = vec!["---".to_string(); row.len()];
            out.push_str(&pipe_line(&dashes));
        }
    }
    out
}

/// GitHub-flavoured table. Tables without a promoted header get numbered
/// column names so that every row stays in the body.
pub fn render_markdown_table(table: &Table) -> String {
    let columns = table.column_count();
    if columns == 0 {
        return String::new();
    }

    let header: Vec<String> = match &table.header {
        Some(h) => pad(h, columns),
        None => (1..=columns).map(|i| format!("Column {}", i)).collect(),
    };

    let mut out = pipe_line(&header);
    out.push_str(&pipe_line(&vec!["---".to_string(); columns]));
    for row in &table.rows {
        out.push_str(&pipe_line(&pad(row, columns)));
    }
    out
}

/// Splits a document into its `## ` sections, in order. Text before the first
/// section (the title) is dropped.
pub fn parse_sections(markdown: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut in_fence = false;

    for line in markdown.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
        }

        if !in_fence && line.starts_with("## ") {
            sections.push(Section {
                heading: line[3..].trim().to_string(),
                body: String::new(),
            });
            continue;
        }

        if let Some(current) = sections.last_mut() {
            current.body.push_str(line);
            current.body.push('\n');
        }
    }

    for section in &mut sections {
        section.body = section.body.trim().to_string();
    }

    sections
}

fn pipe_line(cells: &[String]) -> String {
    let escaped: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
    format!("| {} |\n", escaped.join(" | "))
}

fn pad(row: &[String], columns: usize) -> Vec<String> {
    let mut padded = row.to_vec();
    padded.resize(columns, String::new());
    padded
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace(['\r', '\n'], " ")
}

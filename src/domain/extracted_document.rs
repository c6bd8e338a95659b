/// A run of text pulled out of a source, optionally tied to a PDF page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub page: Option<u32>,
    pub text: String,
}

impl TextSegment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            page: None,
            text: text.into(),
        }
    }

    pub fn on_page(page: u32, text: impl Into<String>) -> Self {
        Self {
            page: Some(page),
            text: text.into(),
        }
    }
}

/// Ordered rows of ordered cells.
///
/// `header` is only set once a row has been promoted out of `rows`; a table
/// built from raw rows keeps every row in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub caption: Option<String>,
    pub page: Option<u32>,
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    /// Promotes the first row to the header when the table has more than one row.
    pub fn with_promoted_header(mut self) -> Self {
        if self.header.is_none() && self.rows.len() > 1 {
            let header = self.rows.remove(0);
            self.header = Some(header);
        }
        self
    }

    pub fn on_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn column_count(&self) -> usize {
        self.header
            .iter()
            .chain(self.rows.iter())
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.rows.iter().all(Vec::is_empty)
    }
}

/// An image already published to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub url: String,
    pub page: Option<u32>,
    /// 1-based position of the image within its page, or within the document
    /// when no page is known.
    pub index: usize,
}

impl ImageRef {
    pub fn new(url: impl Into<String>, index: usize) -> Self {
        Self {
            url: url.into(),
            page: None,
            index,
        }
    }

    pub fn on_page(url: impl Into<String>, page: u32, index: usize) -> Self {
        Self {
            url: url.into(),
            page: Some(page),
            index,
        }
    }
}

/// One page returned by a crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawledPage {
    pub title: String,
    pub url: String,
    pub body: String,
}

/// Everything an adapter pulled out of one source, held in memory for a
/// single conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub title: String,
    pub text: Vec<TextSegment>,
    pub tables: Vec<Table>,
    pub images: Vec<ImageRef>,
    pub links: Vec<String>,
}

impl ExtractedDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

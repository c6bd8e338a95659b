pub mod adobe_client;
pub mod apify_client;
pub mod extract_archive;
mod extractor_factory;
pub mod html_content;
mod local_pdf_adapter;
mod local_website_adapter;
mod managed_pdf_adapter;
mod managed_website_adapter;
pub mod pdf_images;
pub mod pdf_tables;

pub use adobe_client::{AdobeCredentials, AdobePdfServicesClient};
pub use apify_client::ApifyClient;
pub use extractor_factory::{ExtractorFactory, ExtractorFactoryError};
pub use local_pdf_adapter::LocalPdfAdapter;
pub use local_website_adapter::{LocalWebsiteAdapter, parse_page_url};
pub use managed_pdf_adapter::ManagedPdfAdapter;
pub use managed_website_adapter::{ManagedWebsiteAdapter, crawled_page};

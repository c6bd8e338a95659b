mod error;
mod extract;
mod health;

pub use error::{ErrorResponse, conversion_error_response, error_response};
pub use extract::{ExtractResponse, WebsiteForm, extract_pdf_handler, extract_website_handler};
pub use health::{HealthResponse, ServiceInfo, health_handler, root_handler};

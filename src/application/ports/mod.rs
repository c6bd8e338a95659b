mod clock;
mod conversion_error;
mod converters;
mod job_status_source;
mod storage_sink;

pub use clock::Clock;
pub use conversion_error::ConversionError;
pub use converters::{PdfConverter, WebsiteConverter};
pub use job_status_source::JobStatusSource;
pub use storage_sink::{StorageError, StorageSink};

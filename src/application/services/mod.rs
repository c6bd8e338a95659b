mod conversion_service;
mod job_poller;
pub mod markdown_assembler;
mod scratch_space;

pub use conversion_service::{ConversionService, Converters};
pub use job_poller::{
    DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT, JobPoller, PollOutcome, PollPhase, PollPolicy,
};
pub use scratch_space::ScratchSpace;

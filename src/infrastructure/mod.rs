pub mod clock;
pub mod extraction;
pub mod http_client;
pub mod observability;
pub mod storage;

pub use clock::{ManualClock, TokioClock};

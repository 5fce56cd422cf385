pub mod request;

pub use request::{RequestId, RequestSeq, RequestState};

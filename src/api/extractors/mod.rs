//! Custom request extractors.

mod protocol;
mod validated_json;

pub use protocol::Protocol;
pub use validated_json::ValidatedJson;

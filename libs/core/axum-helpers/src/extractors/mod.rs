//! Request extractors that reject bad input with the standard envelope.
//!
//! Handlers using these never see a malformed ObjectId or an invalid body;
//! the rejection is shaped like every other API error.

pub mod object_id_path;
pub mod validated_json;

pub use object_id_path::ObjectIdPath;
pub use validated_json::ValidatedJson;

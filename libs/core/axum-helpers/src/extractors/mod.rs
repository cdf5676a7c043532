//! Extractors that reject with [`AppError`](crate::errors::AppError) responses.

pub mod id_path;
pub mod validated_json;
pub mod validated_query;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;

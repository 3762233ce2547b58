pub mod data;
pub mod error;
pub mod queries;

pub use data::Dataset;
pub use error::{DataError, QueryError};

//! Error types and result alias

mod error;

pub use error::{ClientError, Result};

//! Error handling for subpack operations
//!
//! The error enum lives in `common` next to the configuration types that
//! produce most of its variants. It derives its messages with thiserror.

pub use crate::common::Result;
pub use crate::common::SubpackError;

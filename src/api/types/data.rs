//! The `{data: ...}` envelope around request and response payloads

use serde::{Deserialize, Serialize};

/// Single-field wrapper carried by every non-error body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDto<T> {
    pub data: T,
}

impl<T> DataDto<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Consume the envelope and return the payload
    pub fn into_inner(self) -> T {
        self.data
    }
}

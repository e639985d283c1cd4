//! Parse configuration

use crate::buffer::CancelToken;

/// Options for [`parse_with`](crate::parse_with)
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Name reported in error messages, usually a file path
    pub source_name: Option<String>,
    /// Stops the parse early when cancelled
    pub cancel: Option<CancelToken>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    pub fn cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

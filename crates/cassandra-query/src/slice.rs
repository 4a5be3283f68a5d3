//! One page of a paged result.

use serde::{Deserialize, Serialize};

use crate::statement::PagingState;

/// Results of a single page plus the cursor for the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice<T> {
    content: Vec<T>,
    paging_state: Option<PagingState>,
}

impl<T> Slice<T> {
    #[must_use]
    pub const fn new(content: Vec<T>, paging_state: Option<PagingState>) -> Self {
        Self {
            content,
            paging_state,
        }
    }

    /// Whether the driver reported more rows after this page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.paging_state.is_some()
    }

    #[must_use]
    pub const fn paging_state(&self) -> Option<&PagingState> {
        self.paging_state.as_ref()
    }

    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Map the content, keeping the cursor.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Slice<U> {
        Slice {
            content: self.content.into_iter().map(f).collect(),
            paging_state: self.paging_state,
        }
    }
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self::new(Vec::new(), None)
    }
}

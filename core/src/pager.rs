//! Current-page cursor for next / previous / jump-to-page navigation.
//!
//! The cursor does not own the list; every call takes the current page count
//! so it stays valid across loads and filters.

use crate::error::PageError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    current: usize,
}

impl PageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based index of the page on screen.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn next(&mut self, page_count: usize) -> bool {
        if self.current + 1 < page_count {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to a 1-based page number typed by the user.
    pub fn jump_to(&mut self, input: &str, page_count: usize) -> Result<usize, PageError> {
        let page: usize = input.trim().parse().map_err(|_| PageError::InvalidPage)?;
        if page == 0 || page > page_count {
            return Err(PageError::InvalidPage);
        }
        self.current = page - 1;
        Ok(self.current)
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Page indicator text, e.g. `2/3 page`.
    pub fn title(&self, page_count: usize) -> String {
        format!("{}/{} page", self.current + 1, page_count)
    }
}

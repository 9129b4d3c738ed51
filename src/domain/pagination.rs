//! Review pagination cursor.
//!
//! A fetch returns its page content together with the cursor of the next page.
//! Exhaustion is signalled either by `next == None` or by a page that yields
//! no review items; the collector stops on whichever comes first.

use super::raw_content::RawContent;

/// 1-based page cursor for review listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageToken(u32);

impl PageToken {
    pub fn first() -> Self {
        Self(1)
    }

    /// Cursor for a given page; 0 is clamped to the first page
    pub fn from_page_number(page: u32) -> Self {
        Self(page.max(1))
    }

    pub fn page_number(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for PageToken {
    fn default() -> Self {
        Self::first()
    }
}

/// One fetched page of reviews plus the cursor to continue from
#[derive(Debug, Clone)]
pub struct ReviewPage {
    pub content: RawContent,
    pub next: Option<PageToken>,
}

impl ReviewPage {
    /// Page with no continuation
    pub fn last(content: RawContent) -> Self {
        Self { content, next: None }
    }

    pub fn with_next(content: RawContent, next: PageToken) -> Self {
        Self {
            content,
            next: Some(next),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_advances_from_first_page() {
        let token = PageToken::first();
        assert_eq!(token.page_number(), 1);
        assert_eq!(token.next().page_number(), 2);
        assert_eq!(PageToken::default(), token);
        assert_eq!(PageToken::from_page_number(0), token);
        assert_eq!(PageToken::from_page_number(3).page_number(), 3);
    }
}

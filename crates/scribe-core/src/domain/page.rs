use crate::error::DomainError;

/// Number of posts in one page of the listing.
pub const PAGE_SIZE: u64 = 10;

/// A 1-based page number over posts sorted by descending id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(u64);

impl Page {
    /// Parse the `page` query value. Missing or empty means the first page.
    pub fn parse(raw: Option<&str>) -> Result<Self, DomainError> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(Self(1)),
            Some(raw) => raw,
        };

        let number: i64 = raw
            .parse()
            .map_err(|_| DomainError::InvalidPage(raw.to_string()))?;

        if number < 1 {
            return Err(DomainError::InvalidPage(raw.to_string()));
        }

        Ok(Self(number as u64))
    }

    /// Entries to skip before this page starts.
    pub fn skip(&self) -> u64 {
        (self.0 - 1).saturating_mul(PAGE_SIZE)
    }

    pub fn limit(&self) -> u64 {
        PAGE_SIZE
    }

    /// Number of the last non-empty page for `total` posts; 0 when there are none.
    pub fn last_page(total: u64) -> u64 {
        total.div_ceil(PAGE_SIZE)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_page_is_first() {
        assert_eq!(Page::parse(None).unwrap(), Page::default());
        assert_eq!(Page::parse(Some("")).unwrap(), Page::default());
    }

    #[test]
    fn test_page_below_one_is_rejected() {
        assert!(matches!(Page::parse(Some("0")), Err(DomainError::InvalidPage(_))));
        assert!(matches!(Page::parse(Some("-3")), Err(DomainError::InvalidPage(_))));
        assert!(matches!(Page::parse(Some("two")), Err(DomainError::InvalidPage(_))));
    }

    #[test]
    fn test_skip_and_limit() {
        let page = Page::parse(Some("3")).unwrap();
        assert_eq!(page.skip(), 20);
        assert_eq!(page.limit(), 10);
        assert_eq!(Page::default().skip(), 0);
    }

    #[test]
    fn test_last_page() {
        assert_eq!(Page::last_page(0), 0);
        assert_eq!(Page::last_page(1), 1);
        assert_eq!(Page::last_page(10), 1);
        assert_eq!(Page::last_page(15), 2);
    }
}

use crate::error::Result;

/// Page size used for every listing scan.
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of a listing plus the number of the page that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page: Option<u32>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, next_page: Option<u32>) -> Self {
        Self { items, next_page }
    }

    /// Reads the `X-Next-Page` header value; empty or `0` means no next page.
    #[must_use]
    pub fn parse_next_page(header: Option<&str>) -> Option<u32> {
        header
            .map(str::trim)
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&n| n != 0)
    }
}

/// Lazily fetches pages starting at page 1 until the listing is exhausted.
///
/// A failed fetch is yielded once and ends the sequence. The sequence cannot
/// be rewound; a fresh scan needs a fresh `Pages`.
pub struct Pages<F> {
    fetch: F,
    next: Option<u32>,
}

impl<F> Pages<F> {
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            next: Some(1),
        }
    }
}

impl<T, F> Iterator for Pages<F>
where
    F: FnMut(u32) -> Result<Page<T>>,
{
    type Item = Result<Vec<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.next.take()?;
        match (self.fetch)(page) {
            Ok(result) => {
                self.next = result.next_page;
                Some(Ok(result.items))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

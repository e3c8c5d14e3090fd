//! Page-token pagination.

use std::future::Future;

use crate::error::FetchError;

/// One page of a paginated listing.
pub trait Page {
    /// Item type.
    type Item;

    /// Consumes the page, returning its items and the next page token.
    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

/// Fetches pages until the server stops returning a `nextPageToken`.
///
/// `fetch_page` receives `None` for the first page and the previous token
/// afterwards. An empty token ends the listing.
pub async fn fetch_all_pages<P, F, Fut>(mut fetch_page: F) -> Result<Vec<P::Item>, FetchError>
where
    P: Page,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<P, FetchError>>,
{
    let mut items = Vec::new();
    let mut token = None;
    loop {
        let (page, next) = fetch_page(token).await?.into_parts();
        items.extend(page);
        match next.filter(|next| !next.is_empty()) {
            Some(next) => token = Some(next),
            None => return Ok(items),
        }
    }
}

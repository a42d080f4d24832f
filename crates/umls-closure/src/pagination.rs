//! Page walking for paginated listings.

use std::future::Future;

use tracing::{debug, warn};

use crate::service::Page;
use crate::types::{ClosureResult, PageMode};

/// Reads a paginated listing according to `mode`.
///
/// `fetch` is called with 1-based page numbers. In [`PageMode::AllPages`]
/// pages are requested until the reported `page_count` is reached. In
/// [`PageMode::FirstPage`] only page 1 is read and a warning names the
/// listing when the service reports more.
pub async fn collect_pages<T, F, Fut>(
    mode: PageMode,
    listing: &str,
    mut fetch: F,
) -> ClosureResult<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = ClosureResult<Page<T>>>,
{
    let first = fetch(1).await?;
    let page_count = first.page_count;
    let mut items = first.items;

    if page_count <= 1 {
        return Ok(items);
    }

    match mode {
        PageMode::FirstPage => {
            warn!(
                listing,
                page_count, "Listing has more pages than were read; results truncated"
            );
        }
        PageMode::AllPages => {
            debug!(listing, page_count, "Walking paginated listing");
            for page_number in 2..=page_count {
                let page = fetch(page_number).await?;
                items.extend(page.items);
            }
        }
    }

    Ok(items)
}

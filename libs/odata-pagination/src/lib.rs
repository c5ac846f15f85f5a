// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Next-link pagination for Azure list endpoints
//!
//! Azure list operations return one page at a time together with an opaque
//! `nextLink` URL. This crate turns a page-fetching closure into a stream of
//! pages or items:
//!
//! ```ignore
//! let jobs = odata_pagination::items(|link| {
//!     let client = client.clone();
//!     async move {
//!         match link {
//!             None => client.list_first_page().await,
//!             Some(link) => client.list_next(&link).await,
//!         }
//!     }
//! });
//! ```
//!
//! The closure receives `None` for the first page and the previous page's
//! next link afterwards. The stream ends after the first page without a next
//! link, or right after the first error.

use futures_util::stream::{self, Stream, StreamExt, TryStreamExt};
use std::future::Future;

/// A single page of a paged list result
pub trait Paginated {
    type Item;

    /// Link to the next page, `None` (or empty) on the last page
    fn next_link(&self) -> Option<&str>;

    /// Consume the page, returning its items
    fn into_items(self) -> Vec<Self::Item>;
}

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Stream every page, following next links until exhausted
///
/// A next link identical to the one just fetched ends the stream, so a
/// service that keeps returning the same link cannot loop forever.
pub fn pages<P, E, F, Fut>(fetch: F) -> impl Stream<Item = Result<P, E>>
where
    P: Paginated,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<P, E>>,
{
    stream::unfold((Cursor::Start, fetch), |(cursor, mut fetch)| async move {
        let link = match cursor {
            Cursor::Start => None,
            Cursor::Next(link) => Some(link),
            Cursor::Done => return None,
        };

        match fetch(link.clone()).await {
            Ok(page) => {
                let next = match page.next_link() {
                    Some(next) if !next.trim().is_empty() && Some(next) != link.as_deref() => {
                        Cursor::Next(next.to_string())
                    }
                    _ => Cursor::Done,
                };
                Some((Ok(page), (next, fetch)))
            }
            Err(e) => Some((Err(e), (Cursor::Done, fetch))),
        }
    })
}

/// Stream every item of every page
pub fn items<P, E, F, Fut>(fetch: F) -> impl Stream<Item = Result<P::Item, E>>
where
    P: Paginated,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<P, E>>,
{
    pages(fetch).flat_map(|page| {
        let batch: Vec<Result<P::Item, E>> = match page {
            Ok(page) => page.into_items().into_iter().map(Ok).collect(),
            Err(e) => vec![Err(e)],
        };
        stream::iter(batch)
    })
}

/// Collect every item of every page, stopping at the first error
pub async fn collect_all<P, E, F, Fut>(fetch: F) -> Result<Vec<P::Item>, E>
where
    P: Paginated,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<P, E>>,
{
    items(fetch).try_collect().await
}

//! Cursor-driven walking of list endpoints.
//!
//! Every list response carries `results`, `has_more` and `next_cursor`.
//! [`Pages`] issues one request per page, starting without a cursor and
//! feeding each `next_cursor` into the following request, until the server
//! reports `has_more: false`. Each call owns its own cursor and accumulator;
//! nothing is cached between calls.

use std::collections::HashSet;
use std::marker::PhantomData;
use std::mem;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::response::decode;
use crate::{ClientError, HttpRequest, Transport};

/// One page of a list endpoint.
#[derive(Clone, Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug)]
enum CursorState {
    Start,
    At(String),
    /// The last page was delivered but cannot be continued.
    Stalled(ClientError),
    Exhausted,
}

/// Iterator yielding the `results` of each page in server order.
///
/// A page whose continuation is unusable is still yielded; the stall error
/// follows on the next call. An error is yielded at most once and the
/// iterator is exhausted afterwards.
pub(crate) struct Pages<'a, X: ?Sized, T, F> {
    transport: &'a X,
    make_request: F,
    state: CursorState,
    visited: HashSet<String>,
    fetched: usize,
    _results: PhantomData<fn() -> T>,
}

impl<'a, X, T, F> Pages<'a, X, T, F>
where
    X: Transport + ?Sized,
    T: DeserializeOwned,
    F: FnMut(Option<&str>) -> Result<HttpRequest, ClientError>,
{
    /// `make_request` receives `None` for the first page and the previous
    /// page's `next_cursor` afterwards.
    pub(crate) fn new(transport: &'a X, make_request: F) -> Self {
        Self {
            transport,
            make_request,
            state: CursorState::Start,
            visited: HashSet::new(),
            fetched: 0,
            _results: PhantomData,
        }
    }

    fn fetch(&mut self, cursor: Option<&str>) -> Result<(Vec<T>, CursorState), ClientError> {
        let request = (self.make_request)(cursor)?;
        self.fetched += 1;
        log::debug!(
            "fetching page {} of {} {}",
            self.fetched,
            request.method,
            request.url.path()
        );

        let response = self.transport.send(request)?;
        let page: ListResponse<T> = decode(response.status, &response.body)?;

        let next = if page.has_more {
            self.advance(page.next_cursor)
        } else {
            CursorState::Exhausted
        };
        Ok((page.results, next))
    }

    /// A continuation must be non-empty and never seen before in this walk,
    /// otherwise the next request would restart or cycle through the listing.
    fn advance(&mut self, next: Option<String>) -> CursorState {
        match next {
            Some(next) if !next.is_empty() && self.visited.insert(next.clone()) => {
                CursorState::At(next)
            }
            other => {
                let cursor = other.unwrap_or_default();
                log::debug!("pagination stalled at cursor {cursor:?}");
                CursorState::Stalled(ClientError::StalledPagination { cursor })
            }
        }
    }
}

impl<X, T, F> Iterator for Pages<'_, X, T, F>
where
    X: Transport + ?Sized,
    T: DeserializeOwned,
    F: FnMut(Option<&str>) -> Result<HttpRequest, ClientError>,
{
    type Item = Result<Vec<T>, ClientError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = match mem::replace(&mut self.state, CursorState::Exhausted) {
            CursorState::Exhausted => return None,
            CursorState::Stalled(error) => return Some(Err(error)),
            CursorState::Start => None,
            CursorState::At(cursor) => Some(cursor),
        };

        match self.fetch(cursor.as_deref()) {
            Ok((results, next)) => {
                self.state = next;
                Some(Ok(results))
            }
            Err(error) => Some(Err(error)),
        }
    }
}

/// Walks every page and concatenates the results.
///
/// All-or-nothing: the first failing page discards what was gathered so far.
pub(crate) fn collect_all<X, T, F>(transport: &X, make_request: F) -> Result<Vec<T>, ClientError>
where
    X: Transport + ?Sized,
    T: DeserializeOwned,
    F: FnMut(Option<&str>) -> Result<HttpRequest, ClientError>,
{
    let mut accumulated = Vec::new();
    for page in Pages::new(transport, make_request) {
        accumulated.extend(page?);
    }
    Ok(accumulated)
}

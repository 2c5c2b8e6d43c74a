//! Marker/limit pagination
//!
//! Listing endpoints return one page at a time together with a cursor (the
//! `marker`) for the next page. [`paginate`] turns a page-fetching closure
//! into a lazy stream that only requests the next page once the consumer has
//! drained the current one.

use std::future::Future;

use futures::{Stream, TryStreamExt, stream};

use crate::error::{Error, Result};

/// Query options shared by paginated list calls
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaginationOptions {
    pub limit: Option<u32>,
    pub marker: Option<String>,
    /// Additional provider-specific query parameters (filters, sort keys)
    pub params: Vec<(String, String)>,
}

impl PaginationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = self.params.clone();
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(marker) = &self.marker {
            query.push(("marker".to_string(), marker.clone()));
        }
        query
    }
}

/// One page of results plus the cursor for the next one
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_marker: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_marker: Option<String>) -> Self {
        Self { items, next_marker }
    }

    /// A page that is known to be the last one
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_marker: None,
        }
    }

    pub fn has_next(&self) -> bool {
        self.next_marker.is_some()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::last(Vec::new())
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Lazily walk all pages starting from `options`.
///
/// `fetch` is called with the options for each page; the marker of the
/// previous page replaces `options.marker`. Iteration ends on a page without
/// a next marker or on an empty page.
pub fn paginate<'a, T, F, Fut>(
    options: PaginationOptions,
    fetch: F,
) -> impl Stream<Item = Result<T>> + 'a
where
    T: 'a,
    F: Fn(PaginationOptions) -> Fut + 'a,
    Fut: Future<Output = Result<Page<T>>> + 'a,
{
    stream::try_unfold(Some(options), move |state| {
        let pending = state.map(|opts| (opts.clone(), fetch(opts)));
        async move {
            let Some((opts, fut)) = pending else {
                return Ok::<_, Error>(None);
            };
            let page = fut.await?;
            let next = match page.next_marker {
                Some(marker) if !page.items.is_empty() => Some(opts.marker(marker)),
                _ => None,
            };
            Ok(Some((page.items, next)))
        }
    })
    .map_ok(|items| stream::iter(items.into_iter().map(Ok)))
    .try_flatten()
}

/// Marker for stores whose cursor is the last name of a full page (Swift).
///
/// Returns `None` when fewer than `limit` items came back.
pub fn next_marker_from_last<T>(
    items: &[T],
    limit: Option<u32>,
    name: impl Fn(&T) -> &str,
) -> Option<String> {
    let limit = limit? as usize;
    if items.len() < limit {
        return None;
    }
    items.last().map(|item| name(item).to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn test_to_query() {
        let options = PaginationOptions::new()
            .limit(2)
            .marker("abc")
            .param("sort_key", "name");
        assert_eq!(
            options.to_query(),
            vec![
                ("sort_key".to_string(), "name".to_string()),
                ("limit".to_string(), "2".to_string()),
                ("marker".to_string(), "abc".to_string()),
            ]
        );
    }

    #[test]
    fn test_next_marker_from_last() {
        let names = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            next_marker_from_last(&names, Some(2), |s| s.as_str()),
            Some("b".to_string())
        );
        assert_eq!(next_marker_from_last(&names, Some(3), |s| s.as_str()), None);
        assert_eq!(next_marker_from_last(&names, None, |s| s.as_str()), None);
    }

    #[tokio::test]
    async fn test_paginate_follows_markers_lazily() {
        let calls = Mutex::new(Vec::new());
        let stream = paginate(PaginationOptions::new().limit(2), |opts| {
            calls.lock().unwrap().push(opts.marker.clone());
            async move {
                Ok(match opts.marker.as_deref() {
                    None => Page::new(vec![1, 2], Some("2".to_string())),
                    Some("2") => Page::new(vec![3, 4], Some("4".to_string())),
                    _ => Page::last(vec![5]),
                })
            }
        });

        // Nothing is fetched until the stream is polled
        assert!(calls.lock().unwrap().is_empty());

        let all: Vec<i32> = stream.try_collect().await.unwrap();
        assert_eq!(all, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![None, Some("2".to_string()), Some("4".to_string())]
        );
    }

    #[tokio::test]
    async fn test_paginate_stops_on_empty_page() {
        let stream = paginate(PaginationOptions::new(), |_| async {
            Ok(Page::<i32>::new(Vec::new(), Some("loop".to_string())))
        });
        let all: Vec<i32> = stream.try_collect().await.unwrap();
        assert!(all.is_empty());
    }
}

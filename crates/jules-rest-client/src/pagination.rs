// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Cursor-based pagination shared by all list endpoints

use std::iter::FusedIterator;

use crate::error::RestClientResult;

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Cursor for the following page, passed back unchanged
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub page_token: Option<String>,
    pub page_size: Option<u32>,
}

impl ListOptions {
    pub fn with_page_size(page_size: Option<u32>) -> Self {
        Self {
            page_token: None,
            page_size,
        }
    }

    pub fn query(&self) -> [(&'static str, Option<String>); 2] {
        [
            ("pageToken", self.page_token.clone()),
            ("pageSize", self.page_size.map(|size| size.to_string())),
        ]
    }
}

type FetchPage<'a, T> = Box<dyn FnMut(ListOptions) -> RestClientResult<Page<T>> + 'a>;

/// Lazy iterator over every item of a paginated collection.
///
/// A page is requested only when the buffered one is exhausted, so dropping
/// the iterator early skips the remaining requests. Only the current page is
/// held in memory. After an error is yielded the iterator is finished.
pub struct PageIter<'a, T> {
    fetch: FetchPage<'a, T>,
    page_size: Option<u32>,
    buffer: std::vec::IntoIter<T>,
    next_token: Option<String>,
    started: bool,
    done: bool,
}

impl<'a, T> PageIter<'a, T> {
    pub fn new<F>(page_size: Option<u32>, fetch: F) -> Self
    where
        F: FnMut(ListOptions) -> RestClientResult<Page<T>> + 'a,
    {
        Self {
            fetch: Box::new(fetch),
            page_size,
            buffer: Vec::new().into_iter(),
            next_token: None,
            started: false,
            done: false,
        }
    }

    fn has_more_pages(&self) -> bool {
        !self.started || self.next_token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

impl<T> Iterator for PageIter<'_, T> {
    type Item = RestClientResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }
            if let Some(item) = self.buffer.next() {
                return Some(Ok(item));
            }
            if !self.has_more_pages() {
                self.done = true;
                return None;
            }

            let options = ListOptions {
                page_token: self.next_token.take(),
                page_size: self.page_size,
            };
            self.started = true;
            match (self.fetch)(options) {
                Ok(page) => {
                    self.buffer = page.items.into_iter();
                    self.next_token = page.next_page_token;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<T> FusedIterator for PageIter<'_, T> {}

// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use jules_api_contract::{Source, SourceListResponse};

use crate::client::RestClient;
use crate::error::{RestClientError, RestClientResult};
use crate::pagination::{ListOptions, Page, PageIter};
use crate::paths::resource_path;

/// Connected repositories
#[derive(Debug, Clone, Copy)]
pub struct Sources<'a> {
    client: &'a RestClient,
}

impl<'a> Sources<'a> {
    pub(crate) fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    pub fn list(&self, options: &ListOptions) -> RestClientResult<Page<Source>> {
        let response: SourceListResponse = self.client.get_as("/sources", &options.query())?;
        Ok(Page {
            items: response.sources,
            next_page_token: response.next_page_token,
        })
    }

    pub fn each(&self, page_size: Option<u32>) -> PageIter<'a, Source> {
        let sources = *self;
        PageIter::new(page_size, move |options| sources.list(&options))
    }

    pub fn all(&self) -> RestClientResult<Vec<Source>> {
        self.each(None).collect()
    }

    /// Fetch a source by resource name, e.g. `sources/github/owner/repo`.
    pub fn find(&self, name: &str) -> RestClientResult<Source> {
        if name.trim().is_empty() {
            return Err(RestClientError::InvalidArgument(
                "Source name is required".to_string(),
            ));
        }
        self.client.get_as(&resource_path(name), &[])
    }
}

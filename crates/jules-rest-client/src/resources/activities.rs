// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use jules_api_contract::{Activity, ActivityListResponse};

use crate::client::RestClient;
use crate::error::RestClientResult;
use crate::pagination::{ListOptions, Page, PageIter};
use crate::paths::{resource_path, session_path};

/// Activities of a session, listed oldest first as returned by the server
#[derive(Debug, Clone, Copy)]
pub struct Activities<'a> {
    client: &'a RestClient,
}

impl<'a> Activities<'a> {
    pub(crate) fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    pub fn list(&self, session: &str, options: &ListOptions) -> RestClientResult<Page<Activity>> {
        let path = format!("{}/activities", session_path(session));
        let response: ActivityListResponse = self.client.get_as(&path, &options.query())?;
        Ok(Page {
            items: response.activities,
            next_page_token: response.next_page_token,
        })
    }

    pub fn each(&self, session: &str, page_size: Option<u32>) -> PageIter<'a, Activity> {
        let activities = *self;
        let session = session.to_string();
        PageIter::new(page_size, move |options| activities.list(&session, &options))
    }

    pub fn all(&self, session: &str) -> RestClientResult<Vec<Activity>> {
        self.each(session, None).collect()
    }

    /// Fetch an activity by its full name, e.g. `sessions/1/activities/abc`.
    pub fn find(&self, name: &str) -> RestClientResult<Activity> {
        self.client.get_as(&resource_path(name), &[])
    }
}

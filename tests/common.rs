//! Common test utilities and fixtures
//!
//! Shared fakes for the capability seams plus match/page constructors,
//! used across all test modules.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use pulse::error::{Error, Result};
use pulse::pace::Pacer;
use pulse::ranking::ProgressNotifier;
use pulse::slack::{ChannelInfo, MembershipPage, SearchPage, SlackApi, UserInfo};
use pulse::types::{MatchChannel, MessageMatch};

/// A match posted in a public channel.
pub fn channel_match(id: &str) -> MessageMatch {
    MessageMatch {
        channel: Some(MatchChannel {
            id: id.to_string(),
            is_channel: true,
            is_private: false,
        }),
        ts: None,
        user: None,
    }
}

/// A match posted in a private channel.
pub fn private_match(id: &str) -> MessageMatch {
    MessageMatch {
        channel: Some(MatchChannel {
            id: id.to_string(),
            is_channel: true,
            is_private: true,
        }),
        ts: None,
        user: None,
    }
}

/// A match from a conversation that is not a channel at all.
pub fn dm_match(id: &str) -> MessageMatch {
    MessageMatch {
        channel: Some(MatchChannel {
            id: id.to_string(),
            is_channel: false,
            is_private: false,
        }),
        ts: None,
        user: None,
    }
}

/// `n` public-channel matches for the same channel.
pub fn channel_matches(id: &str, n: usize) -> Vec<MessageMatch> {
    (0..n).map(|_| channel_match(id)).collect()
}

/// A scripted search page.
pub fn search_page(matches: Vec<MessageMatch>, page: u32, page_count: u32) -> SearchPage {
    SearchPage {
        matches,
        page,
        page_count,
    }
}

/// A scripted membership page.
pub fn membership_page(ids: &[&str], next_cursor: Option<&str>) -> MembershipPage {
    MembershipPage {
        channel_ids: ids.iter().map(|s| s.to_string()).collect(),
        next_cursor: next_cursor.map(|s| s.to_string()),
    }
}

/// Scripted [`SlackApi`] fake.
///
/// Search and membership pages are served in order; every request is
/// recorded so tests can assert on page sizes, page numbers, queries,
/// and cursors. Unknown channels and users answer with the API error
/// codes the real service uses.
#[derive(Default)]
pub struct FakeSlack {
    search_pages: Mutex<VecDeque<SearchPage>>,
    membership_pages: Mutex<VecDeque<MembershipPage>>,
    channels: HashMap<String, ChannelInfo>,
    users: HashMap<String, UserInfo>,
    search_error: Option<String>,

    pub search_requests: Mutex<Vec<(String, u32, u32)>>,
    pub membership_cursors: Mutex<Vec<Option<String>>>,
    pub info_requests: Mutex<Vec<String>>,
}

impl FakeSlack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_pages(mut self, pages: Vec<SearchPage>) -> Self {
        self.search_pages = Mutex::new(pages.into());
        self
    }

    pub fn with_membership_pages(mut self, pages: Vec<MembershipPage>) -> Self {
        self.membership_pages = Mutex::new(pages.into());
        self
    }

    pub fn with_channel(mut self, id: &str, creator: Option<&str>, topic: &str) -> Self {
        self.channels.insert(
            id.to_string(),
            ChannelInfo {
                id: id.to_string(),
                creator: creator.map(|s| s.to_string()),
                topic: topic.to_string(),
            },
        );
        self
    }

    pub fn with_user(mut self, id: &str, is_admin: bool) -> Self {
        self.users.insert(
            id.to_string(),
            UserInfo {
                id: id.to_string(),
                is_admin,
            },
        );
        self
    }

    pub fn with_search_error(mut self, code: &str) -> Self {
        self.search_error = Some(code.to_string());
        self
    }

    pub fn search_request_count(&self) -> usize {
        self.search_requests.lock().len()
    }
}

#[async_trait]
impl SlackApi for FakeSlack {
    async fn search_messages(&self, query: &str, count: u32, page: u32) -> Result<SearchPage> {
        self.search_requests
            .lock()
            .push((query.to_string(), count, page));

        if let Some(code) = &self.search_error {
            return Err(Error::api("search.messages", code.clone()));
        }

        Ok(self
            .search_pages
            .lock()
            .pop_front()
            .unwrap_or_else(|| search_page(vec![], page, page)))
    }

    async fn channel_info(&self, channel: &str) -> Result<ChannelInfo> {
        self.info_requests.lock().push(channel.to_string());
        self.channels
            .get(channel)
            .cloned()
            .ok_or_else(|| Error::api("conversations.info", "channel_not_found"))
    }

    async fn user_info(&self, user: &str) -> Result<UserInfo> {
        self.users
            .get(user)
            .cloned()
            .ok_or_else(|| Error::api("users.info", "user_not_found"))
    }

    async fn user_conversations(
        &self,
        _user: &str,
        cursor: Option<&str>,
    ) -> Result<MembershipPage> {
        self.membership_cursors
            .lock()
            .push(cursor.map(|s| s.to_string()));

        Ok(self
            .membership_pages
            .lock()
            .pop_front()
            .unwrap_or_else(|| membership_page(&[], None)))
    }
}

/// Pacer that counts pauses instead of sleeping.
#[derive(Default)]
pub struct CountingPacer {
    pauses: AtomicUsize,
}

impl CountingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

/// Notifier that captures every advisory message.
#[derive(Default)]
pub struct CapturingProgress {
    messages: Mutex<Vec<String>>,
}

impl CapturingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl ProgressNotifier for CapturingProgress {
    async fn notify(&self, text: &str) {
        self.messages.lock().push(text.to_string());
    }
}

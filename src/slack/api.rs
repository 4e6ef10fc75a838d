//! Wire-format response structs for the consumed Web API methods.
//!
//! Every Slack envelope carries `ok` and, on failure, `error`; the client
//! checks those before converting the payload into the typed results in
//! the parent module.

use serde::Deserialize;

use crate::types::MessageMatch;

use super::{ChannelInfo, MembershipPage, SearchPage, UserInfo};

/// `search.messages` response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub messages: Option<SearchResults>,
}

/// The `messages` object of a search response.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResults {
    #[serde(default)]
    pub matches: Vec<MessageMatch>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Pagination block of a search response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_count: u32,
}

impl SearchResults {
    pub(crate) fn into_page(self) -> SearchPage {
        SearchPage {
            matches: self.matches,
            page: self.pagination.page,
            page_count: self.pagination.page_count,
        }
    }
}

/// `conversations.info` response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ConversationsInfoResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub channel: Option<ConversationData>,
}

/// The `channel` object of a conversations.info response.
#[derive(Debug, Deserialize)]
pub(crate) struct ConversationData {
    pub id: String,
    pub creator: Option<String>,
    pub topic: Option<TopicData>,
}

/// Topic block of a conversation.
#[derive(Debug, Deserialize)]
pub(crate) struct TopicData {
    #[serde(default)]
    pub value: String,
}

impl ConversationData {
    pub(crate) fn into_info(self) -> ChannelInfo {
        ChannelInfo {
            id: self.id,
            creator: self.creator,
            topic: self.topic.map(|t| t.value).unwrap_or_default(),
        }
    }
}

/// `users.info` response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct UsersInfoResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub user: Option<UserData>,
}

/// The `user` object of a users.info response.
#[derive(Debug, Deserialize)]
pub(crate) struct UserData {
    pub id: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl UserData {
    pub(crate) fn into_info(self) -> UserInfo {
        UserInfo {
            id: self.id,
            is_admin: self.is_admin,
        }
    }
}

/// `users.conversations` response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct UserConversationsResponse {
    pub ok: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub channels: Vec<ConversationStub>,
    pub response_metadata: Option<ResponseMetadata>,
}

/// Minimal conversation record in a membership listing.
#[derive(Debug, Deserialize)]
pub(crate) struct ConversationStub {
    pub id: String,
}

/// Trailing metadata carrying the pagination cursor.
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMetadata {
    pub next_cursor: Option<String>,
}

impl UserConversationsResponse {
    /// Normalize into a membership page; a blank cursor means last page.
    pub(crate) fn into_page(self) -> MembershipPage {
        let next_cursor = self
            .response_metadata
            .and_then(|m| m.next_cursor)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        MembershipPage {
            channel_ids: self.channels.into_iter().map(|c| c.id).collect(),
            next_cursor,
        }
    }
}

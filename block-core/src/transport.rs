//! The seam between command handlers and the messaging platform.
//!
//! Handlers only ever see [`Transport`]; the gateway binary plugs in
//! [`TwilightTransport`](crate::twilight::TwilightTransport) and tests plug in
//! `MockTransport` (behind the `mock` feature).

use std::time::Duration;

use async_trait::async_trait;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use twilight_model::{
    channel::{ChannelType, message::embed::Embed, permission_overwrite::PermissionOverwrite},
    guild::Permissions,
    id::{
        Id,
        marker::{ApplicationMarker, ChannelMarker, GuildMarker, MessageMarker, RoleMarker, UserMarker},
    },
};

use crate::error::TransportResult;

/// Body of an outgoing message.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Text(String),
    Embed(Box<Embed>),
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn embed(embed: Embed) -> Self {
        Self::Embed(Box::new(embed))
    }

    /// Text content, if this is a plain-text reply.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(content) => Some(content),
            Self::Embed(_) => None,
        }
    }
}

/// A channel message as far as purging cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecentMessage {
    pub id: Id<MessageMarker>,
    /// Unix seconds.
    pub sent_at: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuildSnapshot {
    pub id: Id<GuildMarker>,
    pub name: String,
    pub icon_url: Option<String>,
    /// Approximate member count reported by the platform.
    pub member_count: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub user_id: Id<UserMarker>,
    /// Nickname, else global name, else username.
    pub display_name: String,
    pub bot: bool,
    pub avatar_url: String,
    /// Unix seconds; absent for members the platform did not date.
    pub joined_at: Option<i64>,
    pub role_ids: Vec<Id<RoleMarker>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleSnapshot {
    pub id: Id<RoleMarker>,
    pub name: String,
    pub position: i64,
    pub color: u32,
}

/// Remote operations available to command handlers.
///
/// Every call goes to the platform; nothing is cached.
#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Most recent gateway heartbeat round trip.
    fn latency(&self) -> Option<Duration>;

    /// Send a message, optionally as a reply, returning its id.
    async fn send_message(
        &self,
        channel_id: Id<ChannelMarker>,
        reply_to: Option<Id<MessageMarker>>,
        reply: Reply,
    ) -> TransportResult<Id<MessageMarker>>;

    async fn delete_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> TransportResult<()>;

    /// Bulk-delete 2 to 100 messages younger than two weeks.
    async fn delete_messages(
        &self,
        channel_id: Id<ChannelMarker>,
        message_ids: Vec<Id<MessageMarker>>,
    ) -> TransportResult<()>;

    /// Up to `limit` most recent messages, newest first.
    async fn recent_messages(
        &self,
        channel_id: Id<ChannelMarker>,
        limit: usize,
    ) -> TransportResult<Vec<RecentMessage>>;

    /// Set the per-user rate limit of a channel in seconds.
    async fn set_slowmode(&self, channel_id: Id<ChannelMarker>, seconds: u16)
    -> TransportResult<()>;

    /// Current overwrite for a role in a channel, if any.
    async fn role_overwrite(
        &self,
        channel_id: Id<ChannelMarker>,
        role_id: Id<RoleMarker>,
    ) -> TransportResult<Option<PermissionOverwrite>>;

    async fn set_overwrite(
        &self,
        channel_id: Id<ChannelMarker>,
        overwrite: PermissionOverwrite,
    ) -> TransportResult<()>;

    async fn delete_role_overwrite(
        &self,
        channel_id: Id<ChannelMarker>,
        role_id: Id<RoleMarker>,
    ) -> TransportResult<()>;

    /// Id of the bot's own application.
    async fn application_id(&self) -> TransportResult<Id<ApplicationMarker>>;

    async fn guild(&self, guild_id: Id<GuildMarker>) -> TransportResult<GuildSnapshot>;

    async fn guild_members(&self, guild_id: Id<GuildMarker>)
    -> TransportResult<Vec<MemberSnapshot>>;

    async fn guild_channel_kinds(
        &self,
        guild_id: Id<GuildMarker>,
    ) -> TransportResult<Vec<ChannelType>>;

    /// All roles of a guild, `@everyone` included.
    async fn guild_roles(&self, guild_id: Id<GuildMarker>) -> TransportResult<Vec<RoleSnapshot>>;

    async fn guild_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> TransportResult<MemberSnapshot>;

    /// Effective permissions of a member in one channel.
    async fn member_permissions(
        &self,
        guild_id: Id<GuildMarker>,
        channel_id: Id<ChannelMarker>,
        user_id: Id<UserMarker>,
    ) -> TransportResult<Permissions>;
}

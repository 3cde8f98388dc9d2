use std::{slice, sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::debug;
use twilight_http::{Client, error::ErrorType, response::DeserializeBodyError};
use twilight_model::{
    channel::{
        ChannelType,
        permission_overwrite::{PermissionOverwrite, PermissionOverwriteType},
    },
    guild::{Member, Permissions},
    http::permission_overwrite::{
        PermissionOverwrite as HttpPermissionOverwrite,
        PermissionOverwriteType as HttpPermissionOverwriteType,
    },
    id::{
        Id,
        marker::{ApplicationMarker, ChannelMarker, GuildMarker, MessageMarker, RoleMarker, UserMarker},
    },
};
use twilight_util::permission_calculator::PermissionCalculator;

use block_utils::embed::{avatar_url, guild_icon_url};

use crate::error::{TransportError, TransportErrorKind, TransportResult};
use crate::transport::{
    GuildSnapshot, MemberSnapshot, RecentMessage, Reply, RoleSnapshot, Transport,
};

const HISTORY_PAGE_SIZE: usize = 100;
const MEMBER_PAGE_SIZE: u16 = 1000;

fn error_kind(error_type: &ErrorType) -> TransportErrorKind {
    match error_type {
        ErrorType::Response { status, .. } => TransportErrorKind::from_status(status.get()),
        ErrorType::Unauthorized => TransportErrorKind::Unauthorized,
        ErrorType::RequestTimedOut => TransportErrorKind::TimedOut,
        ErrorType::ServiceUnavailable { .. } => TransportErrorKind::ServerError,
        ErrorType::Json | ErrorType::Parsing { .. } => TransportErrorKind::DecodeError,
        ErrorType::Validation => TransportErrorKind::ValidationError,
        _ => TransportErrorKind::RequestError,
    }
}

impl From<twilight_http::Error> for TransportError {
    fn from(source: twilight_http::Error) -> Self {
        Self::new(error_kind(source.kind()), source.to_string())
    }
}

impl From<DeserializeBodyError> for TransportError {
    fn from(source: DeserializeBodyError) -> Self {
        Self::new(TransportErrorKind::DecodeError, source.to_string())
    }
}

/// Request body for writing back an overwrite read from a channel.
fn http_overwrite(overwrite: &PermissionOverwrite) -> HttpPermissionOverwrite {
    let kind = match overwrite.kind {
        PermissionOverwriteType::Member => HttpPermissionOverwriteType::Member,
        _ => HttpPermissionOverwriteType::Role,
    };

    HttpPermissionOverwrite {
        allow: Some(overwrite.allow),
        deny: Some(overwrite.deny),
        id: overwrite.id,
        kind,
    }
}

/// [`Transport`] over a shared twilight HTTP client.
///
/// Latency comes from the gateway loop, which owns the shard and publishes
/// its heartbeat average into a watch channel.
#[derive(Clone)]
pub struct TwilightTransport {
    http: Arc<Client>,
    latency: watch::Receiver<Option<Duration>>,
}

impl TwilightTransport {
    pub fn new(http: Arc<Client>, latency: watch::Receiver<Option<Duration>>) -> Self {
        Self { http, latency }
    }

    fn member_snapshot(member: Member) -> MemberSnapshot {
        let avatar = member.user.avatar.map(|hash| hash.to_string());
        let display_name = member
            .nick
            .or(member.user.global_name)
            .unwrap_or(member.user.name);

        MemberSnapshot {
            user_id: member.user.id,
            display_name,
            bot: member.user.bot,
            avatar_url: avatar_url(member.user.id, avatar.as_deref()),
            joined_at: member.joined_at.map(|joined| joined.as_secs()),
            role_ids: member.roles,
        }
    }
}

#[async_trait]
impl Transport for TwilightTransport {
    fn latency(&self) -> Option<Duration> {
        *self.latency.borrow()
    }

    async fn send_message(
        &self,
        channel_id: Id<ChannelMarker>,
        reply_to: Option<Id<MessageMarker>>,
        reply: Reply,
    ) -> TransportResult<Id<MessageMarker>> {
        let request = self.http.create_message(channel_id);
        let request = match reply_to {
            Some(message_id) => request.reply(message_id),
            None => request,
        };

        let response = match &reply {
            Reply::Text(content) => request.content(content).await?,
            Reply::Embed(embed) => request.embeds(slice::from_ref(embed.as_ref())).await?,
        };

        Ok(response.model().await?.id)
    }

    async fn delete_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> TransportResult<()> {
        self.http.delete_message(channel_id, message_id).await?;
        Ok(())
    }

    async fn delete_messages(
        &self,
        channel_id: Id<ChannelMarker>,
        message_ids: Vec<Id<MessageMarker>>,
    ) -> TransportResult<()> {
        self.http.delete_messages(channel_id, &message_ids).await?;
        Ok(())
    }

    async fn recent_messages(
        &self,
        channel_id: Id<ChannelMarker>,
        limit: usize,
    ) -> TransportResult<Vec<RecentMessage>> {
        let mut collected: Vec<RecentMessage> = Vec::with_capacity(limit);
        let mut before: Option<Id<MessageMarker>> = None;

        while collected.len() < limit {
            let page_size = (limit - collected.len()).min(HISTORY_PAGE_SIZE);
            let page_size = u16::try_from(page_size).unwrap_or(100);

            let response = match before {
                Some(before_id) => {
                    self.http
                        .channel_messages(channel_id)
                        .before(before_id)
                        .limit(page_size)
                        .await?
                }
                None => self.http.channel_messages(channel_id).limit(page_size).await?,
            };

            let messages = response.model().await?;
            let fetched = messages.len();

            before = messages.last().map(|message| message.id);
            collected.extend(messages.into_iter().map(|message| RecentMessage {
                id: message.id,
                sent_at: message.timestamp.as_secs(),
            }));

            if fetched < usize::from(page_size) {
                break;
            }
        }

        debug!(
            channel_id = channel_id.get(),
            count = collected.len(),
            "fetched recent messages"
        );

        Ok(collected)
    }

    async fn set_slowmode(
        &self,
        channel_id: Id<ChannelMarker>,
        seconds: u16,
    ) -> TransportResult<()> {
        self.http
            .update_channel(channel_id)
            .rate_limit_per_user(seconds)
            .await?;
        Ok(())
    }

    async fn role_overwrite(
        &self,
        channel_id: Id<ChannelMarker>,
        role_id: Id<RoleMarker>,
    ) -> TransportResult<Option<PermissionOverwrite>> {
        let channel = self.http.channel(channel_id).await?.model().await?;

        Ok(channel
            .permission_overwrites
            .unwrap_or_default()
            .into_iter()
            .find(|overwrite| overwrite.id == role_id.cast()))
    }

    async fn set_overwrite(
        &self,
        channel_id: Id<ChannelMarker>,
        overwrite: PermissionOverwrite,
    ) -> TransportResult<()> {
        self.http
            .update_channel_permission(channel_id, &http_overwrite(&overwrite))
            .await?;
        Ok(())
    }

    async fn delete_role_overwrite(
        &self,
        channel_id: Id<ChannelMarker>,
        role_id: Id<RoleMarker>,
    ) -> TransportResult<()> {
        self.http
            .delete_channel_permission(channel_id)
            .role(role_id)
            .await?;
        Ok(())
    }

    async fn application_id(&self) -> TransportResult<Id<ApplicationMarker>> {
        let application = self.http.current_user_application().await?.model().await?;
        Ok(application.id)
    }

    async fn guild(&self, guild_id: Id<GuildMarker>) -> TransportResult<GuildSnapshot> {
        let guild = self
            .http
            .guild(guild_id)
            .with_counts(true)
            .await?
            .model()
            .await?;

        Ok(GuildSnapshot {
            id: guild.id,
            icon_url: guild
                .icon
                .map(|icon| guild_icon_url(guild.id, &icon.to_string())),
            name: guild.name,
            member_count: guild.approximate_member_count.or(guild.member_count),
        })
    }

    async fn guild_members(
        &self,
        guild_id: Id<GuildMarker>,
    ) -> TransportResult<Vec<MemberSnapshot>> {
        let mut collected = Vec::new();
        let mut after: Option<Id<UserMarker>> = None;

        loop {
            let request = self.http.guild_members(guild_id).limit(MEMBER_PAGE_SIZE);
            let request = match after {
                Some(user_id) => request.after(user_id),
                None => request,
            };

            let members = request.await?.model().await?;
            let fetched = members.len();
            after = members.last().map(|member| member.user.id);
            collected.extend(members.into_iter().map(Self::member_snapshot));

            if fetched < usize::from(MEMBER_PAGE_SIZE) {
                break;
            }
        }

        Ok(collected)
    }

    async fn guild_channel_kinds(
        &self,
        guild_id: Id<GuildMarker>,
    ) -> TransportResult<Vec<ChannelType>> {
        let channels = self.http.guild_channels(guild_id).await?.model().await?;
        Ok(channels.into_iter().map(|channel| channel.kind).collect())
    }

    async fn guild_roles(&self, guild_id: Id<GuildMarker>) -> TransportResult<Vec<RoleSnapshot>> {
        let roles = self.http.roles(guild_id).await?.model().await?;

        Ok(roles
            .into_iter()
            .map(|role| RoleSnapshot {
                id: role.id,
                name: role.name,
                position: role.position,
                color: role.color,
            })
            .collect())
    }

    async fn guild_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> TransportResult<MemberSnapshot> {
        let member = self
            .http
            .guild_member(guild_id, user_id)
            .await?
            .model()
            .await?;

        Ok(Self::member_snapshot(member))
    }

    async fn member_permissions(
        &self,
        guild_id: Id<GuildMarker>,
        channel_id: Id<ChannelMarker>,
        user_id: Id<UserMarker>,
    ) -> TransportResult<Permissions> {
        let guild = self.http.guild(guild_id).await?.model().await?;
        let member = self
            .http
            .guild_member(guild_id, user_id)
            .await?
            .model()
            .await?;

        let mut channel = self.http.channel(channel_id).await?.model().await?;
        // Threads carry no overwrites of their own.
        if channel.kind.is_thread()
            && let Some(parent_id) = channel.parent_id
        {
            channel = self.http.channel(parent_id).await?.model().await?;
        }

        let everyone = guild
            .roles
            .iter()
            .find(|role| role.id == guild_id.cast())
            .map_or(Permissions::empty(), |role| role.permissions);

        let member_roles: Vec<(Id<RoleMarker>, Permissions)> = guild
            .roles
            .iter()
            .filter(|role| member.roles.contains(&role.id))
            .map(|role| (role.id, role.permissions))
            .collect();

        let overwrites = channel.permission_overwrites.unwrap_or_default();

        Ok(
            PermissionCalculator::new(guild_id, user_id, everyone, &member_roles)
                .owner_id(guild.owner_id)
                .in_channel(channel.kind, &overwrites),
        )
    }
}

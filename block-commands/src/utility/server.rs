use futures::future::BoxFuture;
use twilight_model::channel::ChannelType;

use crate::{Access, ArgSchema, Args, CommandMeta};
use block_core::transport::{GuildSnapshot, MemberSnapshot};
use block_core::{CommandError, CommandResult, Context, Invocation, Reply};
use block_utils::embed::{SERVER_EMBED_COLOR, field, finish, titled, with_thumbnail};

pub const META: CommandMeta = CommandMeta {
    name: "server",
    aliases: &[],
    desc: "Server stats (members, channels, roles).",
    usage: "bb server",
    access: Access::Everyone,
    args: ArgSchema::None,
    handler,
};

/// Counts shown by the server stats embed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServerStats {
    pub total: u64,
    pub humans: u64,
    pub bots: u64,
    pub text_channels: usize,
    pub voice_channels: usize,
    pub roles: usize,
}

impl ServerStats {
    /// Prefer the platform's member count; the fetched list may be partial.
    pub fn collect(
        guild: &GuildSnapshot,
        members: &[MemberSnapshot],
        channel_kinds: &[ChannelType],
        roles: usize,
    ) -> Self {
        let total = guild.member_count.unwrap_or(members.len() as u64);
        let bots = members.iter().filter(|member| member.bot).count() as u64;

        Self {
            total,
            humans: total.saturating_sub(bots),
            bots,
            text_channels: count_kinds(channel_kinds, |kind| {
                matches!(kind, ChannelType::GuildText | ChannelType::GuildAnnouncement)
            }),
            voice_channels: count_kinds(channel_kinds, |kind| kind == ChannelType::GuildVoice),
            roles,
        }
    }
}

/// Announcement channels count as text channels.
fn count_kinds(kinds: &[ChannelType], wanted: impl Fn(ChannelType) -> bool) -> usize {
    kinds.iter().filter(|kind| wanted(**kind)).count()
}

fn handler<'a>(
    ctx: &'a Context,
    invocation: &'a Invocation,
    _args: Args,
) -> BoxFuture<'a, CommandResult<Option<Reply>>> {
    Box::pin(async move {
        let Some(guild_id) = invocation.guild_id else {
            return Err(CommandError::GuildOnly);
        };

        let transport = &ctx.transport;
        let guild = transport.guild(guild_id).await?;
        let members = transport.guild_members(guild_id).await?;
        let channel_kinds = transport.guild_channel_kinds(guild_id).await?;
        let roles = transport.guild_roles(guild_id).await?;

        let stats = ServerStats::collect(&guild, &members, &channel_kinds, roles.len());

        let mut builder = titled(guild.name.as_str(), SERVER_EMBED_COLOR)
            .field(field(
                "Members",
                format!(
                    "Total **{}** • Humans **{}** • Bots **{}**",
                    stats.total, stats.humans, stats.bots
                ),
                false,
            ))
            .field(field(
                "Channels",
                format!(
                    "Text **{}** • Voice **{}**",
                    stats.text_channels, stats.voice_channels
                ),
                false,
            ))
            .field(field("Roles", stats.roles.to_string(), true));

        if let Some(icon_url) = guild.icon_url.as_deref() {
            builder = with_thumbnail(builder, icon_url)?;
        }

        Ok(Some(Reply::embed(finish(builder)?)))
    })
}

use futures::future::BoxFuture;
use twilight_model::id::{
    Id,
    marker::{GuildMarker, RoleMarker},
};

use crate::{Access, ArgSchema, Args, CommandMeta};
use block_core::transport::{MemberSnapshot, RoleSnapshot};
use block_core::{CommandError, CommandResult, Context, Invocation, Reply, TransportErrorKind};
use block_utils::embed::{
    USER_EMBED_COLOR, field, finish, join_mentions, role_mention, titled, with_thumbnail,
};
use block_utils::time::{relative_timestamp, snowflake_created_secs};

pub const META: CommandMeta = CommandMeta {
    name: "user",
    aliases: &[],
    desc: "User info (join date, roles).",
    usage: "bb user [@member]",
    access: Access::Everyone,
    args: ArgSchema::OptionalUser,
    handler,
};

/// A member's roles resolved against the guild role list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleSummary {
    /// Mention of the highest role, `@everyone` when there is none.
    pub top_role: String,
    /// Mentions in ascending position, `@everyone` excluded.
    pub mentions: Vec<String>,
    /// Color of the highest colored role.
    pub color: Option<u32>,
}

impl RoleSummary {
    pub fn resolve(
        guild_id: Id<GuildMarker>,
        role_ids: &[Id<RoleMarker>],
        roles: &[RoleSnapshot],
    ) -> Self {
        let everyone: Id<RoleMarker> = guild_id.cast();
        let mut held: Vec<&RoleSnapshot> = roles
            .iter()
            .filter(|role| role.id != everyone && role_ids.contains(&role.id))
            .collect();

        // Equal positions: the older role (lower id) ranks higher.
        held.sort_by(|left, right| {
            left.position
                .cmp(&right.position)
                .then_with(|| right.id.cmp(&left.id))
        });

        Self {
            top_role: held
                .last()
                .map_or_else(|| "@everyone".to_owned(), |role| role_mention(role.id)),
            mentions: held.iter().map(|role| role_mention(role.id)).collect(),
            color: held
                .iter()
                .rev()
                .map(|role| role.color)
                .find(|color| *color != 0),
        }
    }
}

fn handler<'a>(
    ctx: &'a Context,
    invocation: &'a Invocation,
    args: Args,
) -> BoxFuture<'a, CommandResult<Option<Reply>>> {
    Box::pin(async move {
        let Some(guild_id) = invocation.guild_id else {
            return Err(CommandError::GuildOnly);
        };

        let Args::User(target) = args else {
            return Err(CommandError::BadArgument);
        };
        let target = target.unwrap_or(invocation.author_id);

        let member = match ctx.transport.guild_member(guild_id, target).await {
            Ok(member) => member,
            Err(source) if source.kind == TransportErrorKind::NotFound => {
                return Err(CommandError::BadArgument);
            }
            Err(source) => return Err(source.into()),
        };
        let roles = ctx.transport.guild_roles(guild_id).await?;
        let summary = RoleSummary::resolve(guild_id, &member.role_ids, &roles);

        let builder = user_embed(&member, &summary);
        let builder = with_thumbnail(builder, &member.avatar_url)?;

        Ok(Some(Reply::embed(finish(builder)?)))
    })
}

fn user_embed(
    member: &MemberSnapshot,
    summary: &RoleSummary,
) -> twilight_util::builder::embed::EmbedBuilder {
    let created_at = snowflake_created_secs(member.user_id.get());
    let created_at = i64::try_from(created_at).unwrap_or(i64::MAX);

    let mut builder = titled(
        member.display_name.as_str(),
        summary.color.unwrap_or(USER_EMBED_COLOR),
    )
    .field(field("ID", member.user_id.get().to_string(), true));

    if let Some(joined_at) = member.joined_at {
        builder = builder.field(field("Joined Server", relative_timestamp(joined_at), true));
    }

    let roles = if summary.mentions.is_empty() {
        "None".to_owned()
    } else {
        join_mentions(&summary.mentions)
    };

    builder
        .field(field("Account Created", relative_timestamp(created_at), true))
        .field(field("Top Role", summary.top_role.as_str(), true))
        .field(field("Roles", roles, false))
}

use futures::future::BoxFuture;
use twilight_model::id::{Id, marker::RoleMarker};

use crate::{Access, ArgSchema, Args, CommandMeta};
use block_core::{CommandError, CommandResult, Context, Invocation, Reply, TransportError};
use block_utils::permissions::locked_overwrite;

pub const META: CommandMeta = CommandMeta {
    name: "lockdown",
    aliases: &[],
    desc: "Lock channel (@everyone cannot send) (mods).",
    usage: "bb lockdown",
    access: Access::Moderator,
    args: ArgSchema::None,
    handler,
};

fn lock_error(source: TransportError) -> CommandError {
    CommandError::channel_edit(source, "Manage Channels", "lock the channel", "lock")
}

/// Deny SEND_MESSAGES to `@everyone` unless it already is.
fn handler<'a>(
    ctx: &'a Context,
    invocation: &'a Invocation,
    _args: Args,
) -> BoxFuture<'a, CommandResult<Option<Reply>>> {
    Box::pin(async move {
        let Some(guild_id) = invocation.guild_id else {
            return Err(CommandError::GuildOnly);
        };
        let everyone: Id<RoleMarker> = guild_id.cast();
        let channel_id = invocation.channel_id;

        let current = ctx
            .transport
            .role_overwrite(channel_id, everyone)
            .await
            .map_err(lock_error)?;

        let Some(next) = locked_overwrite(current.as_ref(), everyone) else {
            return Ok(Some(Reply::text("🔒 Channel is already locked.")));
        };

        ctx.transport
            .set_overwrite(channel_id, next)
            .await
            .map_err(lock_error)?;

        Ok(Some(Reply::text(
            "🔒 Channel locked. `@everyone` cannot send messages.",
        )))
    })
}

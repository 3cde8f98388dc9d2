use futures::future::BoxFuture;

use crate::{Access, ArgSchema, Args, CommandMeta};
use block_core::{CommandError, CommandResult, Context, Invocation, Reply};
use block_utils::parse::clamp_to_u16;

pub const META: CommandMeta = CommandMeta {
    name: "slow",
    aliases: &[],
    desc: "Set slowmode for this channel (mods). `0` disables.",
    usage: "bb slow <seconds>",
    access: Access::Moderator,
    args: ArgSchema::Integer,
    handler,
};

/// Longest per-user rate limit the platform accepts.
pub const MAX_SLOWMODE_SECS: u16 = 21_600;

fn handler<'a>(
    ctx: &'a Context,
    invocation: &'a Invocation,
    args: Args,
) -> BoxFuture<'a, CommandResult<Option<Reply>>> {
    Box::pin(async move {
        let Args::Integer(requested) = args else {
            return Err(CommandError::MissingArgument);
        };

        let seconds = clamp_to_u16(requested, 0, MAX_SLOWMODE_SECS);
        apply_slowmode(ctx, invocation, seconds, "set slowmode").await
    })
}

/// Write the channel rate limit and describe the result.
pub(crate) async fn apply_slowmode(
    ctx: &Context,
    invocation: &Invocation,
    seconds: u16,
    action: &'static str,
) -> CommandResult<Option<Reply>> {
    ctx.transport
        .set_slowmode(invocation.channel_id, seconds)
        .await
        .map_err(|source| {
            CommandError::channel_edit(source, "Manage Channels", "change slowmode", action)
        })?;

    Ok(Some(Reply::text(slowmode_message(seconds))))
}

pub fn slowmode_message(seconds: u16) -> String {
    if seconds == 0 {
        "⏱️ Slowmode disabled.".to_owned()
    } else {
        format!("⏱️ Slowmode set to **{seconds}s**.")
    }
}

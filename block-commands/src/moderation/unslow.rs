use futures::future::BoxFuture;

use crate::moderation::slow::apply_slowmode;
use crate::{Access, ArgSchema, Args, CommandMeta};
use block_core::{CommandResult, Context, Invocation, Reply};

pub const META: CommandMeta = CommandMeta {
    name: "unslow",
    aliases: &["unslow_cmd"],
    desc: "Disable slowmode in this channel (mods).",
    usage: "bb unslow",
    access: Access::Moderator,
    args: ArgSchema::None,
    handler,
};

fn handler<'a>(
    ctx: &'a Context,
    invocation: &'a Invocation,
    _args: Args,
) -> BoxFuture<'a, CommandResult<Option<Reply>>> {
    Box::pin(apply_slowmode(ctx, invocation, 0, "disable slowmode"))
}

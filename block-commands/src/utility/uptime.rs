use futures::future::BoxFuture;

use crate::{Access, ArgSchema, Args, CommandMeta};
use block_core::{CommandResult, Context, Invocation, Reply};
use block_utils::time::format_uptime;

pub const META: CommandMeta = CommandMeta {
    name: "uptime",
    aliases: &[],
    desc: "How long the bot has been online.",
    usage: "bb uptime",
    access: Access::Everyone,
    args: ArgSchema::None,
    handler,
};

fn handler<'a>(
    ctx: &'a Context,
    _invocation: &'a Invocation,
    _args: Args,
) -> BoxFuture<'a, CommandResult<Option<Reply>>> {
    Box::pin(async move {
        let out = format!("Uptime: **{}**", format_uptime(ctx.uptime()));
        Ok(Some(Reply::text(out)))
    })
}

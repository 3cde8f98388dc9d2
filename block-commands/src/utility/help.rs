use futures::future::BoxFuture;
use twilight_model::channel::message::embed::Embed;

use crate::{Access, ArgSchema, Args, COMMANDS, CommandMeta};
use block_core::{CommandResult, Context, Invocation, Reply};
use block_utils::embed::{HELP_EMBED_COLOR, field, finish, titled};
use block_utils::prefix::DISPLAY_PREFIX;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    aliases: &[],
    desc: "Lists out all available commands.",
    usage: "bb help",
    access: Access::Everyone,
    args: ArgSchema::None,
    handler,
};

fn handler<'a>(
    _ctx: &'a Context,
    _invocation: &'a Invocation,
    _args: Args,
) -> BoxFuture<'a, CommandResult<Option<Reply>>> {
    Box::pin(async move { Ok(Some(Reply::embed(help_embed(COMMANDS)?))) })
}

/// Render the command catalog, one field per command in registry order.
pub fn help_embed(commands: &[CommandMeta]) -> anyhow::Result<Embed> {
    let p = DISPLAY_PREFIX;
    let description = format!(
        "**Prefix:** `{p}` (also accepts `{p} ` and `{p}!`)\n\
         Examples: `{p} ping`, `{p} server`, `{p} uptime`, `{p} info`"
    );

    let builder = commands.iter().fold(
        titled("BlockBot — Core Commands", HELP_EMBED_COLOR).description(description),
        |builder, command| builder.field(field(command.usage, command.desc, false)),
    );

    finish(builder)
}

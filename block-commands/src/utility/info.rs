use futures::future::BoxFuture;
use twilight_model::id::{Id, marker::ApplicationMarker};
use twilight_util::builder::embed::EmbedFooterBuilder;

use crate::{Access, ArgSchema, Args, CommandMeta};
use block_core::{CommandResult, Context, Invocation, Reply};
use block_utils::embed::{INFO_EMBED_COLOR, field, finish, titled};

pub const META: CommandMeta = CommandMeta {
    name: "info",
    aliases: &[],
    desc: "Bot info + invite link.",
    usage: "bb info",
    access: Access::Everyone,
    args: ArgSchema::None,
    handler,
};

/// Permissions requested by the invite link.
const INVITE_PERMISSIONS: u64 = 274_877_908_992;
const INVITE_SCOPE: &str = "bot%20applications.commands";

fn handler<'a>(
    ctx: &'a Context,
    _invocation: &'a Invocation,
    _args: Args,
) -> BoxFuture<'a, CommandResult<Option<Reply>>> {
    Box::pin(async move {
        let application_id = ctx.transport.application_id().await?;
        let invite = invite_url(application_id);

        let embed = finish(
            titled("BlockBot Unsupervised", INFO_EMBED_COLOR)
                .field(field("Prefix", "`bb` (also `bb `, `bb!`)", false))
                .field(field("Invite", format!("[Add me to a server]({invite})"), false))
                .footer(EmbedFooterBuilder::new("Doing my best, no promises.").build()),
        )?;

        Ok(Some(Reply::embed(embed)))
    })
}

pub fn invite_url(application_id: Id<ApplicationMarker>) -> String {
    format!(
        "https://discord.com/api/oauth2/authorize?client_id={}&permissions={INVITE_PERMISSIONS}&scope={INVITE_SCOPE}",
        application_id.get()
    )
}

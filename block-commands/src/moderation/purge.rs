use std::time::Duration;

use futures::future::BoxFuture;
use tokio::time::sleep;
use tracing::{debug, error};
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, MessageMarker},
};

use crate::{Access, ArgSchema, Args, CommandMeta};
use block_core::{CommandError, CommandResult, Context, Invocation, Reply};
use block_utils::cleanup::{DeletePlan, plan_deletion};
use block_utils::parse::clamp_to_u16;
use block_utils::time::now_unix_secs;

pub const META: CommandMeta = CommandMeta {
    name: "purge",
    aliases: &[],
    desc: "Bulk delete messages (mods only).",
    usage: "bb purge <1-200>",
    access: Access::Moderator,
    args: ArgSchema::Integer,
    handler,
};

const MIN_PURGE: u16 = 1;
const MAX_PURGE: u16 = 200;
const CONFIRMATION_TTL: Duration = Duration::from_secs(3);

/// Delete the latest messages in this channel, including the invocation.
fn handler<'a>(
    ctx: &'a Context,
    invocation: &'a Invocation,
    args: Args,
) -> BoxFuture<'a, CommandResult<Option<Reply>>> {
    Box::pin(async move {
        let Args::Integer(requested) = args else {
            return Err(CommandError::MissingArgument);
        };

        let amount = clamp_to_u16(requested, MIN_PURGE, MAX_PURGE);
        let channel_id = invocation.channel_id;
        let transport = &ctx.transport;

        // One extra for the command message itself.
        let messages = transport
            .recent_messages(channel_id, usize::from(amount) + 1)
            .await?;
        let plan = plan_deletion(
            messages.iter().map(|message| (message.id, message.sent_at)),
            now_unix_secs(),
        );

        let deleted = delete_planned(ctx, channel_id, plan).await?;

        let confirmation = format!("🧹 Deleted **{}** messages.", deleted.saturating_sub(1));
        let note_id = transport
            .send_message(channel_id, None, Reply::text(confirmation))
            .await?;

        sleep(CONFIRMATION_TTL).await;
        if let Err(source) = transport.delete_message(channel_id, note_id).await {
            debug!(?source, "could not delete purge confirmation");
        }

        Ok(None)
    })
}

fn missing_manage_messages() -> CommandError {
    CommandError::BotMissingPermission {
        capability: "Manage Messages",
        action: "purge messages",
    }
}

/// Execute a delete plan, returning how many messages are gone.
async fn delete_planned(
    ctx: &Context,
    channel_id: Id<ChannelMarker>,
    plan: DeletePlan,
) -> CommandResult<usize> {
    let transport = &ctx.transport;
    let mut deleted = 0_usize;
    let mut single_delete_ids: Vec<Id<MessageMarker>> = plan.single;

    for chunk in plan.bulk {
        let count = chunk.len();
        match transport.delete_messages(channel_id, chunk.clone()).await {
            Ok(()) => deleted = deleted.saturating_add(count),
            Err(source) if source.is_forbidden() => return Err(missing_manage_messages()),
            Err(source) => {
                error!(
                    ?source,
                    channel_id = channel_id.get(),
                    count,
                    "bulk delete failed, falling back to single delete"
                );
                single_delete_ids.extend(chunk);
            }
        }
    }

    for message_id in single_delete_ids {
        match transport.delete_message(channel_id, message_id).await {
            Ok(()) => deleted = deleted.saturating_add(1),
            Err(source) if source.is_forbidden() => return Err(missing_manage_messages()),
            Err(source) => debug!(?source, message_id = message_id.get(), "single delete failed"),
        }
    }

    Ok(deleted)
}

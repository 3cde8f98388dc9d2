use futures::future::BoxFuture;
use tracing::debug;

use crate::{Access, ArgSchema, Args, CommandMeta};
use block_core::{CommandError, CommandResult, Context, Invocation, Reply};

pub const META: CommandMeta = CommandMeta {
    name: "say",
    aliases: &[],
    desc: "Echo a message (mods only).",
    usage: "bb say <text>",
    access: Access::Moderator,
    args: ArgSchema::Text,
    handler,
};

/// Replace the invoking message with the given text.
fn handler<'a>(
    ctx: &'a Context,
    invocation: &'a Invocation,
    args: Args,
) -> BoxFuture<'a, CommandResult<Option<Reply>>> {
    Box::pin(async move {
        let Args::Text(text) = args else {
            return Err(CommandError::MissingArgument);
        };

        if let Err(source) = ctx
            .transport
            .delete_message(invocation.channel_id, invocation.message_id)
            .await
        {
            debug!(?source, "could not delete say invocation, continuing");
        }

        ctx.transport
            .send_message(invocation.channel_id, None, Reply::Text(text))
            .await?;

        Ok(None)
    })
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use mockall::predicate::eq;

    use super::*;
    use crate::dispatch;
    use crate::test_support::*;

    fn expect_echo(transport: &mut block_core::transport::MockTransport, text: &'static str) {
        transport
            .expect_send_message()
            .withf(move |channel_id, reply_to, reply| {
                *channel_id == CHANNEL_ID && reply_to.is_none() && reply.as_text() == Some(text)
            })
            .times(1)
            .returning(|_, _, _| Ok(twilight_model::id::Id::new(501)));
    }

    #[tokio::test]
    async fn deletes_then_echoes() {
        let mut transport = mock_transport();
        let mut seq = Sequence::new();
        as_moderator(&mut transport);
        transport
            .expect_delete_message()
            .with(eq(CHANNEL_ID), eq(MESSAGE_ID))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        transport
            .expect_send_message()
            .withf(|_, reply_to, reply| {
                reply_to.is_none() && reply.as_text() == Some("hello   there")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(twilight_model::id::Id::new(501)));

        dispatch(&context(transport), &invocation("say", "hello   there")).await;
    }

    #[tokio::test]
    async fn failed_delete_is_ignored() {
        let mut transport = mock_transport();
        as_moderator(&mut transport);
        transport
            .expect_delete_message()
            .returning(|_, _| Err(server_error()));
        expect_echo(&mut transport, "still here");

        dispatch(&context(transport), &invocation("say", "still here")).await;
    }

    #[tokio::test]
    async fn empty_text_is_missing_argument() {
        let mut transport = mock_transport();
        as_moderator(&mut transport);
        expect_reply(&mut transport, "Missing argument. Try `bb help`.");

        dispatch(&context(transport), &invocation("say", "")).await;
    }
}

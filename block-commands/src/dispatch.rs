use tracing::{debug, warn};
use twilight_model::gateway::payload::incoming::MessageCreate;

use block_core::{CommandError, CommandResult, Context, Invocation, Reply};
use block_utils::permissions::is_moderator;
use block_utils::prefix::COMMAND_PREFIXES;

use crate::report::report_error;
use crate::{Access, CommandMeta, find_command};

/// What the dispatcher knows about the invoking author.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthorizationContext {
    pub is_moderator: bool,
}

impl AuthorizationContext {
    /// Resolve the author's permissions in the invoking channel.
    ///
    /// Outside a guild nobody is a moderator.
    pub async fn resolve(ctx: &Context, invocation: &Invocation) -> CommandResult<Self> {
        let Some(guild_id) = invocation.guild_id else {
            return Ok(Self {
                is_moderator: false,
            });
        };

        let perms = ctx
            .transport
            .member_permissions(guild_id, invocation.channel_id, invocation.author_id)
            .await?;

        Ok(Self {
            is_moderator: is_moderator(perms),
        })
    }
}

/// Entry point for gateway `MessageCreate` events.
pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) {
    let Some(invocation) = Invocation::from_message(&msg, &COMMAND_PREFIXES) else {
        return;
    };

    dispatch(&ctx, &invocation).await;
}

/// Run one invocation to completion, producing at most one reply.
///
/// Unknown commands are dropped silently; every failure is turned into a
/// reply by the error reporter.
pub async fn dispatch(ctx: &Context, invocation: &Invocation) {
    let Some(command) = find_command(&invocation.command) else {
        debug!(command = %invocation.command, "ignoring unknown command");
        return;
    };

    debug!(
        command = command.name,
        author_id = invocation.author_id.get(),
        channel_id = invocation.channel_id.get(),
        "dispatching command"
    );

    match run_command(ctx, command, invocation).await {
        Ok(Some(reply)) => send_reply(ctx, invocation, reply).await,
        Ok(None) => {}
        Err(err) => report_error(ctx, invocation, command, &err).await,
    }
}

async fn run_command(
    ctx: &Context,
    command: &CommandMeta,
    invocation: &Invocation,
) -> CommandResult<Option<Reply>> {
    if command.access == Access::Moderator {
        let auth = AuthorizationContext::resolve(ctx, invocation).await?;
        if !auth.is_moderator {
            return Err(CommandError::MissingPermission);
        }
    }

    let args = command.args.parse(&invocation.args)?;

    (command.handler)(ctx, invocation, args).await
}

/// Reply to the invoking message, swallowing delivery failures.
pub(crate) async fn send_reply(ctx: &Context, invocation: &Invocation, reply: Reply) {
    if let Err(source) = ctx
        .transport
        .send_message(invocation.channel_id, Some(invocation.message_id), reply)
        .await
    {
        warn!(?source, channel_id = invocation.channel_id.get(), "failed to deliver reply");
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use twilight_model::guild::Permissions;

    use super::*;
    use crate::test_support::*;

    #[tokio::test]
    async fn unknown_command_is_silent() {
        let transport = mock_transport();
        dispatch(&context(transport), &invocation("dance", "")).await;
    }

    #[tokio::test]
    async fn command_names_are_case_insensitive() {
        let mut transport = mock_transport();
        transport.expect_latency().return_const(None);
        expect_reply(&mut transport, "Pong. `n/a`");

        dispatch(&context(transport), &invocation("PiNg", "")).await;
    }

    #[tokio::test]
    async fn non_moderators_cannot_mutate() {
        for (command, args) in [
            ("say", "hello"),
            ("purge", "10"),
            ("slow", "30"),
            ("unslow", ""),
            ("lockdown", ""),
            ("unlock", ""),
        ] {
            let mut transport = mock_transport();
            as_member(&mut transport, Permissions::SEND_MESSAGES | Permissions::KICK_MEMBERS);
            expect_reply(&mut transport, "You don’t have permission for that.");

            dispatch(&context(transport), &invocation(command, args)).await;
        }
    }

    #[tokio::test]
    async fn permission_is_checked_before_arguments() {
        let mut transport = mock_transport();
        as_member(&mut transport, Permissions::empty());
        expect_reply(&mut transport, "You don’t have permission for that.");

        dispatch(&context(transport), &invocation("purge", "lots")).await;
    }

    #[tokio::test]
    async fn moderator_commands_outside_guild_are_denied() {
        let mut transport = mock_transport();
        expect_reply(&mut transport, "You don’t have permission for that.");

        let mut direct = invocation("slow", "10");
        direct.guild_id = None;
        dispatch(&context(transport), &direct).await;
    }

    #[tokio::test]
    async fn bad_and_missing_arguments_get_guidance() {
        let mut transport = mock_transport();
        as_member(&mut transport, Permissions::MANAGE_MESSAGES);
        expect_reply(&mut transport, "Bad argument. Try `bb help`.");
        dispatch(&context(transport), &invocation("slow", "fast")).await;

        let mut transport = mock_transport();
        as_member(&mut transport, Permissions::MANAGE_MESSAGES);
        expect_reply(&mut transport, "Missing argument. Try `bb help`.");
        dispatch(&context(transport), &invocation("purge", "")).await;
    }

    #[tokio::test]
    async fn permission_lookup_failure_is_reported_generically() {
        let mut transport = mock_transport();
        transport
            .expect_member_permissions()
            .returning(|_, _, _| Err(server_error()));
        expect_reply(&mut transport, "Error: `ServerError`");

        dispatch(&context(transport), &invocation("lockdown", "")).await;
    }

    #[tokio::test]
    async fn failed_reply_is_swallowed() {
        let mut transport = mock_transport();
        transport.expect_latency().return_const(None);
        transport
            .expect_send_message()
            .with(eq(CHANNEL_ID), eq(Some(MESSAGE_ID)), mockall::predicate::always())
            .times(1)
            .returning(|_, _, _| Err(server_error()));

        dispatch(&context(transport), &invocation("ping", "")).await;
    }
}

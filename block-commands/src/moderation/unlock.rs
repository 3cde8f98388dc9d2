use futures::future::BoxFuture;
use twilight_model::id::{Id, marker::RoleMarker};

use crate::{Access, ArgSchema, Args, CommandMeta};
use block_core::{CommandError, CommandResult, Context, Invocation, Reply, TransportError};
use block_utils::permissions::{UnlockPlan, unlock_plan};

pub const META: CommandMeta = CommandMeta {
    name: "unlock",
    aliases: &[],
    desc: "Unlock channel (restore default perms) (mods).",
    usage: "bb unlock",
    access: Access::Moderator,
    args: ArgSchema::None,
    handler,
};

fn unlock_error(source: TransportError) -> CommandError {
    CommandError::channel_edit(source, "Manage Channels", "unlock the channel", "unlock")
}

/// Clear the `@everyone` SEND_MESSAGES override so defaults apply.
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
            .map_err(unlock_error)?;

        let written = match unlock_plan(current.as_ref()) {
            UnlockPlan::AlreadyUnlocked => {
                return Ok(Some(Reply::text("🔓 Channel is already unlocked.")));
            }
            UnlockPlan::Update(next) => ctx.transport.set_overwrite(channel_id, next).await,
            UnlockPlan::Delete => ctx.transport.delete_role_overwrite(channel_id, everyone).await,
        };
        written.map_err(unlock_error)?;

        Ok(Some(Reply::text("🔓 Channel unlocked. Defaults restored.")))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use mockall::predicate::eq;
    use twilight_model::channel::permission_overwrite::{
        PermissionOverwrite, PermissionOverwriteType,
    };
    use twilight_model::guild::Permissions;

    use super::*;
    use crate::dispatch;
    use crate::test_support::*;

    fn everyone_overwrite(allow: Permissions, deny: Permissions) -> PermissionOverwrite {
        PermissionOverwrite {
            allow,
            deny,
            id: GUILD_ID.cast(),
            kind: PermissionOverwriteType::Role,
        }
    }

    #[tokio::test]
    async fn second_unlock_is_noop() {
        let mut transport = mock_transport();
        as_moderator(&mut transport);

        let state = Arc::new(Mutex::new(Some(everyone_overwrite(
            Permissions::empty(),
            Permissions::SEND_MESSAGES,
        ))));
        let read = Arc::clone(&state);
        transport
            .expect_role_overwrite()
            .returning(move |_, _| Ok(read.lock().unwrap().clone()));
        let write = Arc::clone(&state);
        transport
            .expect_delete_role_overwrite()
            .with(eq(CHANNEL_ID), eq(GUILD_ID.cast::<RoleMarker>()))
            .times(1)
            .returning(move |_, _| {
                *write.lock().unwrap() = None;
                Ok(())
            });
        expect_reply(&mut transport, "🔓 Channel unlocked. Defaults restored.");
        expect_reply(&mut transport, "🔓 Channel is already unlocked.");

        let ctx = context(transport);
        dispatch(&ctx, &invocation("unlock", "")).await;
        dispatch(&ctx, &invocation("unlock", "")).await;

        assert!(state.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn other_overrides_survive() {
        let mut transport = mock_transport();
        as_moderator(&mut transport);
        transport.expect_role_overwrite().returning(|_, _| {
            Ok(Some(everyone_overwrite(
                Permissions::ADD_REACTIONS,
                Permissions::SEND_MESSAGES,
            )))
        });
        transport
            .expect_set_overwrite()
            .withf(|channel_id, overwrite| {
                *channel_id == CHANNEL_ID
                    && overwrite.allow == Permissions::ADD_REACTIONS
                    && overwrite.deny.is_empty()
            })
            .times(1)
            .returning(|_, _| Ok(()));
        expect_reply(&mut transport, "🔓 Channel unlocked. Defaults restored.");

        dispatch(&context(transport), &invocation("unlock", "")).await;
    }

    #[tokio::test]
    async fn forbidden_asks_for_manage_channels() {
        let mut transport = mock_transport();
        as_moderator(&mut transport);
        transport.expect_role_overwrite().returning(|_, _| {
            Ok(Some(everyone_overwrite(
                Permissions::empty(),
                Permissions::SEND_MESSAGES,
            )))
        });
        transport
            .expect_delete_role_overwrite()
            .returning(|_, _| Err(forbidden()));
        expect_reply(&mut transport, "I need **Manage Channels** to unlock the channel.");

        dispatch(&context(transport), &invocation("unlock", "")).await;
    }
}

//! Shared fixtures for handler and dispatcher tests.

use std::sync::Arc;

use twilight_model::{
    guild::Permissions,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, MessageMarker, UserMarker},
    },
};

use block_core::transport::MockTransport;
use block_core::{Context, Invocation, Reply, TransportError, TransportErrorKind};

pub const GUILD_ID: Id<GuildMarker> = Id::new(1);
pub const CHANNEL_ID: Id<ChannelMarker> = Id::new(10);
pub const MESSAGE_ID: Id<MessageMarker> = Id::new(100);
pub const AUTHOR_ID: Id<UserMarker> = Id::new(1000);

pub fn mock_transport() -> MockTransport {
    MockTransport::new()
}

pub fn context(transport: MockTransport) -> Context {
    Context::new(Arc::new(transport))
}

/// A guild-channel invocation of `command` by [`AUTHOR_ID`].
pub fn invocation(command: &str, args: &str) -> Invocation {
    Invocation {
        message_id: MESSAGE_ID,
        channel_id: CHANNEL_ID,
        guild_id: Some(GUILD_ID),
        author_id: AUTHOR_ID,
        content: format!("bb {command} {args}"),
        prefix: "bb ".to_owned(),
        command: command.to_owned(),
        args: args.to_owned(),
    }
}

/// Give the author `perms` in the invoking channel.
pub fn as_member(transport: &mut MockTransport, perms: Permissions) {
    transport
        .expect_member_permissions()
        .withf(|guild_id, channel_id, user_id| {
            *guild_id == GUILD_ID && *channel_id == CHANNEL_ID && *user_id == AUTHOR_ID
        })
        .returning(move |_, _, _| Ok(perms));
}

pub fn as_moderator(transport: &mut MockTransport) {
    as_member(transport, Permissions::MANAGE_MESSAGES);
}

/// Expect exactly one text reply to the invoking message.
pub fn expect_reply(transport: &mut MockTransport, expected: &'static str) {
    transport
        .expect_send_message()
        .withf(move |channel_id, reply_to, reply| {
            *channel_id == CHANNEL_ID
                && *reply_to == Some(MESSAGE_ID)
                && reply.as_text() == Some(expected)
        })
        .times(1)
        .returning(|_, _, _| Ok(Id::new(500)));
}

/// Capture the single reply to the invoking message.
pub fn capture_reply(transport: &mut MockTransport) -> Arc<std::sync::Mutex<Option<Reply>>> {
    let captured = Arc::new(std::sync::Mutex::new(None));
    let sink = Arc::clone(&captured);
    transport
        .expect_send_message()
        .withf(|channel_id, reply_to, _| *channel_id == CHANNEL_ID && *reply_to == Some(MESSAGE_ID))
        .times(1)
        .returning(move |_, _, reply| {
            *sink.lock().unwrap() = Some(reply);
            Ok(Id::new(500))
        });
    captured
}

pub fn forbidden() -> TransportError {
    TransportError::new(TransportErrorKind::Forbidden, "Missing Permissions")
}

pub fn server_error() -> TransportError {
    TransportError::new(TransportErrorKind::ServerError, "502 Bad Gateway")
}

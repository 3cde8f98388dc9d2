use twilight_model::{
    channel::Message,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, MessageMarker, UserMarker},
    },
};

use block_utils::prefix::parse_command;

/// One prefixed command message, resolved and ready for dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub message_id: Id<MessageMarker>,
    pub channel_id: Id<ChannelMarker>,
    pub guild_id: Option<Id<GuildMarker>>,
    pub author_id: Id<UserMarker>,
    pub content: String,
    pub prefix: String,
    /// Lower-cased command name.
    pub command: String,
    /// Trimmed text after the command name.
    pub args: String,
}

impl Invocation {
    /// Resolve a gateway message against the given prefixes.
    ///
    /// Bot-authored and unprefixed messages yield `None`.
    pub fn from_message(message: &Message, prefixes: &[&str]) -> Option<Self> {
        if message.author.bot {
            return None;
        }

        let parsed = parse_command(prefixes, &message.content)?;

        Some(Self {
            message_id: message.id,
            channel_id: message.channel_id,
            guild_id: message.guild_id,
            author_id: message.author.id,
            prefix: parsed.prefix.to_owned(),
            command: parsed.name,
            args: parsed.args.to_owned(),
            content: message.content.clone(),
        })
    }
}

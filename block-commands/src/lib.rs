pub mod dispatch;
pub mod moderation;
pub mod report;
pub mod utility;

#[cfg(test)]
mod test_support;

use futures::future::BoxFuture;
use twilight_model::id::{Id, marker::UserMarker};

use block_core::{CommandError, CommandResult, Context, Invocation, Reply};
use block_utils::parse::{
    ArgError, parse_integer_arg, parse_optional_user_arg, parse_text_arg,
};

pub use dispatch::{dispatch, handle_message};

/// Who may run a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Everyone,
    Moderator,
}

/// Argument shape a command expects after its name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgSchema {
    /// Anything after the name is ignored.
    None,
    /// A leading signed integer.
    Integer,
    /// The whole remainder, must not be empty.
    Text,
    /// An optional leading user mention or id.
    OptionalUser,
}

/// Arguments after parsing against an [`ArgSchema`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Args {
    None,
    Integer(i64),
    Text(String),
    User(Option<Id<UserMarker>>),
}

impl ArgSchema {
    /// Parse the raw argument string of an invocation.
    pub fn parse(self, raw: &str) -> CommandResult<Args> {
        let parsed = match self {
            Self::None => Ok(Args::None),
            Self::Integer => parse_integer_arg(raw).map(Args::Integer),
            Self::Text => parse_text_arg(raw).map(Args::Text),
            Self::OptionalUser => parse_optional_user_arg(raw).map(Args::User),
        };

        parsed.map_err(|err| match err {
            ArgError::Missing => CommandError::MissingArgument,
            ArgError::Invalid => CommandError::BadArgument,
        })
    }
}

/// Handler entry point. `Ok(Some(reply))` is sent as a reply to the
/// invoking message; `Ok(None)` means the handler already responded.
pub type HandlerFn =
    for<'a> fn(&'a Context, &'a Invocation, Args) -> BoxFuture<'a, CommandResult<Option<Reply>>>;

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub desc: &'static str,
    pub usage: &'static str,
    pub access: Access,
    pub args: ArgSchema,
    pub handler: HandlerFn,
}

impl CommandMeta {
    /// Whether `name` (already lower-cased) refers to this command.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::uptime::META,
    utility::info::META,
    utility::server::META,
    utility::user::META,
    moderation::say::META,
    moderation::purge::META,
    moderation::slow::META,
    moderation::unslow::META,
    moderation::lockdown::META,
    moderation::unlock::META,
    utility::help::META,
    // Add new commands here
];

/// Look up a command by name or alias, ignoring ASCII case.
pub fn find_command(name: &str) -> Option<&'static CommandMeta> {
    let name = name.to_ascii_lowercase();
    COMMANDS.iter().find(|command| command.answers_to(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_aliases_are_unique() {
        let mut seen: Vec<&str> = Vec::new();
        for command in COMMANDS {
            for name in std::iter::once(&command.name).chain(command.aliases) {
                assert!(!seen.contains(name), "duplicate command name {name}");
                assert_eq!(*name, name.to_ascii_lowercase());
                seen.push(name);
            }
        }
    }

    #[test]
    fn lookup_is_case_insensitive_and_knows_aliases() {
        assert_eq!(find_command("PING").map(|c| c.name), Some("ping"));
        assert_eq!(find_command("unslow_cmd").map(|c| c.name), Some("unslow"));
        assert!(find_command("ban").is_none());
    }

    #[test]
    fn moderation_commands_require_moderator() {
        for name in ["say", "purge", "slow", "unslow", "lockdown", "unlock"] {
            assert_eq!(find_command(name).unwrap().access, Access::Moderator, "{name}");
        }
        for name in ["ping", "uptime", "info", "server", "user", "help"] {
            assert_eq!(find_command(name).unwrap().access, Access::Everyone, "{name}");
        }
    }

    #[test]
    fn argument_schemas() {
        assert_eq!(ArgSchema::None.parse("whatever").unwrap(), Args::None);
        assert_eq!(ArgSchema::Integer.parse("12 34").unwrap(), Args::Integer(12));
        assert!(matches!(
            ArgSchema::Integer.parse(""),
            Err(CommandError::MissingArgument)
        ));
        assert!(matches!(
            ArgSchema::Integer.parse("lots"),
            Err(CommandError::BadArgument)
        ));
        assert_eq!(
            ArgSchema::Text.parse("hello there").unwrap(),
            Args::Text("hello there".to_owned())
        );
        assert!(matches!(
            ArgSchema::Text.parse(""),
            Err(CommandError::MissingArgument)
        ));
        assert_eq!(ArgSchema::OptionalUser.parse("").unwrap(), Args::User(None));
        assert!(matches!(
            ArgSchema::OptionalUser.parse("@someone"),
            Err(CommandError::BadArgument)
        ));
    }
}

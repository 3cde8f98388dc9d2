use std::fmt;

use thiserror::Error;

/// Coarse classification of a failed remote call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportErrorKind {
    Forbidden,
    NotFound,
    RateLimited,
    Unauthorized,
    ServerError,
    TimedOut,
    RequestError,
    DecodeError,
    ValidationError,
}

impl TransportErrorKind {
    /// Map an HTTP status code onto a kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError,
            _ => Self::RequestError,
        }
    }

    /// Short label safe to show to users.
    pub fn label(self) -> &'static str {
        match self {
            Self::Forbidden => "Forbidden",
            Self::NotFound => "NotFound",
            Self::RateLimited => "RateLimited",
            Self::Unauthorized => "Unauthorized",
            Self::ServerError => "ServerError",
            Self::TimedOut => "TimedOut",
            Self::RequestError => "RequestError",
            Self::DecodeError => "DecodeError",
            Self::ValidationError => "ValidationError",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A remote call against the messaging platform failed.
///
/// `detail` is for logs only and never reaches a chat reply.
#[derive(Clone, Debug, Error)]
#[error("{kind}: {detail}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub detail: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn is_forbidden(&self) -> bool {
        self.kind == TransportErrorKind::Forbidden
    }
}

pub type TransportResult<T> = Result<T, TransportError>;

/// Every way a command invocation can fail.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("missing argument")]
    MissingArgument,
    #[error("bad argument")]
    BadArgument,
    #[error("author lacks moderator permissions")]
    MissingPermission,
    #[error("command requires a guild")]
    GuildOnly,
    #[error("bot lacks {capability} to {action}")]
    BotMissingPermission {
        capability: &'static str,
        action: &'static str,
    },
    #[error("could not {action}")]
    Action {
        action: &'static str,
        #[source]
        source: TransportError,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CommandError {
    /// Wrap a failed channel edit.
    ///
    /// Forbidden becomes a bot-permission error naming `capability`, anything
    /// else is reported as a failed `action`.
    pub fn channel_edit(
        source: TransportError,
        capability: &'static str,
        denied_action: &'static str,
        action: &'static str,
    ) -> Self {
        if source.is_forbidden() {
            Self::BotMissingPermission {
                capability,
                action: denied_action,
            }
        } else {
            Self::Action { action, source }
        }
    }

    /// Label of the underlying failure, safe to show to users.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::MissingArgument => "MissingArgument",
            Self::BadArgument => "BadArgument",
            Self::MissingPermission => "MissingPermission",
            Self::GuildOnly => "GuildOnly",
            Self::BotMissingPermission { .. } => "BotMissingPermission",
            Self::Action { source, .. } | Self::Transport(source) => source.kind.label(),
            Self::Internal(_) => "InternalError",
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(TransportErrorKind::from_status(403), TransportErrorKind::Forbidden);
        assert_eq!(TransportErrorKind::from_status(404), TransportErrorKind::NotFound);
        assert_eq!(TransportErrorKind::from_status(429), TransportErrorKind::RateLimited);
        assert_eq!(TransportErrorKind::from_status(502), TransportErrorKind::ServerError);
        assert_eq!(TransportErrorKind::from_status(400), TransportErrorKind::RequestError);
    }

    #[test]
    fn forbidden_channel_edit_names_capability() {
        let err = CommandError::channel_edit(
            TransportError::new(TransportErrorKind::Forbidden, "Missing Permissions"),
            "Manage Channels",
            "change slowmode",
            "set slowmode",
        );
        assert!(matches!(
            err,
            CommandError::BotMissingPermission {
                capability: "Manage Channels",
                action: "change slowmode"
            }
        ));
    }

    #[test]
    fn other_channel_edit_failures_keep_kind() {
        let err = CommandError::channel_edit(
            TransportError::new(TransportErrorKind::ServerError, "502 Bad Gateway"),
            "Manage Channels",
            "change slowmode",
            "set slowmode",
        );
        assert_eq!(err.kind_label(), "ServerError");
        assert!(matches!(err, CommandError::Action { action: "set slowmode", .. }));
    }
}

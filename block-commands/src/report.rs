use tracing::{debug, error};

use block_core::{CommandError, Context, Invocation, Reply};
use block_utils::prefix::DISPLAY_PREFIX;

use crate::CommandMeta;
use crate::dispatch::send_reply;

/// User-facing text for a failed invocation.
///
/// Only error-kind labels are ever included, never error detail.
pub fn error_message(err: &CommandError) -> String {
    match err {
        CommandError::MissingArgument => format!("Missing argument. Try `{DISPLAY_PREFIX} help`."),
        CommandError::BadArgument => format!("Bad argument. Try `{DISPLAY_PREFIX} help`."),
        CommandError::MissingPermission => "You don’t have permission for that.".to_owned(),
        CommandError::GuildOnly => "Run this in a server.".to_owned(),
        CommandError::BotMissingPermission { capability, action } => {
            format!("I need **{capability}** to {action}.")
        }
        CommandError::Action { action, source } => {
            format!("Could not {action}: `{}`", source.kind.label())
        }
        CommandError::Transport(source) if source.is_forbidden() => format!(
            "I’m missing permissions here (e.g., **Manage Messages** for `{DISPLAY_PREFIX} purge`)."
        ),
        CommandError::Transport(_) | CommandError::Internal(_) => {
            format!("Error: `{}`", err.kind_label())
        }
    }
}

/// Report a failed invocation back to its channel, best effort.
pub async fn report_error(
    ctx: &Context,
    invocation: &Invocation,
    command: &CommandMeta,
    err: &CommandError,
) {
    match err {
        CommandError::Action { .. } | CommandError::Transport(_) | CommandError::Internal(_) => {
            error!(?err, command = command.name, "command failed");
        }
        _ => debug!(%err, command = command.name, "command rejected"),
    }

    send_reply(ctx, invocation, Reply::text(error_message(err))).await;
}

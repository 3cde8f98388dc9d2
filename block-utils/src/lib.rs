/// Delete planning for purge operations.
pub mod cleanup;
/// Embed builders and CDN helpers shared across commands.
pub mod embed;
/// Pure argument parser helpers.
pub mod parse;
/// Permission helper utilities.
pub mod permissions;
/// Message-command prefix resolution.
pub mod prefix;
/// Shared time helpers.
pub mod time;

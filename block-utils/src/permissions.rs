use twilight_model::{
    channel::permission_overwrite::{PermissionOverwrite, PermissionOverwriteType},
    guild::Permissions,
    id::{Id, marker::RoleMarker},
};

/// Any one of these makes the author a moderator.
pub const MODERATOR_PERMISSIONS: Permissions = Permissions::MANAGE_MESSAGES
    .union(Permissions::MANAGE_GUILD)
    .union(Permissions::ADMINISTRATOR);

/// Check whether a permission set qualifies as moderator.
pub fn is_moderator(perms: Permissions) -> bool {
    perms.intersects(MODERATOR_PERMISSIONS)
}

/// Next state of a role overwrite when locking a channel.
///
/// Returns `None` when SEND_MESSAGES is already explicitly denied.
pub fn locked_overwrite(
    current: Option<&PermissionOverwrite>,
    role_id: Id<RoleMarker>,
) -> Option<PermissionOverwrite> {
    let (allow, deny) = current.map_or((Permissions::empty(), Permissions::empty()), |ow| {
        (ow.allow, ow.deny)
    });

    if deny.contains(Permissions::SEND_MESSAGES) {
        return None;
    }

    Some(PermissionOverwrite {
        allow: allow - Permissions::SEND_MESSAGES,
        deny: deny | Permissions::SEND_MESSAGES,
        id: role_id.cast(),
        kind: PermissionOverwriteType::Role,
    })
}

/// What unlocking a channel has to do to a role overwrite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnlockPlan {
    /// SEND_MESSAGES is already inherited.
    AlreadyUnlocked,
    /// Other overrides remain, write the trimmed overwrite back.
    Update(PermissionOverwrite),
    /// Nothing would be left, drop the overwrite entirely.
    Delete,
}

/// Plan the transition that clears the SEND_MESSAGES override.
pub fn unlock_plan(current: Option<&PermissionOverwrite>) -> UnlockPlan {
    let Some(current) = current else {
        return UnlockPlan::AlreadyUnlocked;
    };

    if !(current.allow | current.deny).contains(Permissions::SEND_MESSAGES) {
        return UnlockPlan::AlreadyUnlocked;
    }

    let allow = current.allow - Permissions::SEND_MESSAGES;
    let deny = current.deny - Permissions::SEND_MESSAGES;

    if allow.is_empty() && deny.is_empty() {
        return UnlockPlan::Delete;
    }

    UnlockPlan::Update(PermissionOverwrite {
        allow,
        deny,
        id: current.id,
        kind: current.kind,
    })
}

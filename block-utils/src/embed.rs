use twilight_model::{
    channel::message::embed::{Embed, EmbedField},
    id::{
        Id,
        marker::{GuildMarker, RoleMarker, UserMarker},
    },
};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, ImageSource};

/// Help embed color (dark gold).
pub const HELP_EMBED_COLOR: u32 = 0xC2_7C_0E;
/// Info embed color (dark teal).
pub const INFO_EMBED_COLOR: u32 = 0x11_80_6A;
/// Server stats embed color (blurple).
pub const SERVER_EMBED_COLOR: u32 = 0x58_65_F2;
/// User embed color when no role carries one; the client draws no accent.
pub const USER_EMBED_COLOR: u32 = 0;

/// Maximum length Discord accepts for an embed field value.
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Build an inline or block embed field.
pub fn field(name: impl Into<String>, value: impl Into<String>, inline: bool) -> EmbedField {
    let builder = EmbedFieldBuilder::new(name, value);
    if inline {
        builder.inline().build()
    } else {
        builder.build()
    }
}

/// Start an embed with the given title and color.
pub fn titled(title: impl Into<String>, color: u32) -> EmbedBuilder {
    EmbedBuilder::new().title(title).color(color)
}

/// Attach a thumbnail image by URL.
pub fn with_thumbnail(builder: EmbedBuilder, url: &str) -> anyhow::Result<EmbedBuilder> {
    Ok(builder.thumbnail(ImageSource::url(url)?))
}

/// Validate and finish an embed.
pub fn finish(builder: EmbedBuilder) -> anyhow::Result<Embed> {
    Ok(builder.validate()?.build())
}

pub fn role_mention(role_id: Id<RoleMarker>) -> String {
    format!("<@&{}>", role_id.get())
}

/// Join mentions with spaces, dropping the tail that would overflow a field.
pub fn join_mentions(mentions: &[String]) -> String {
    const ELLIPSIS: &str = " …";
    let mut out = String::new();

    for mention in mentions {
        let extra = usize::from(!out.is_empty()) + mention.len();
        if out.len() + extra + ELLIPSIS.len() > FIELD_VALUE_LIMIT {
            out.push_str(ELLIPSIS);
            return out;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(mention);
    }

    out
}

/// CDN URL for a user avatar, falling back to the default avatar.
pub fn avatar_url(user_id: Id<UserMarker>, avatar: Option<&str>) -> String {
    match avatar {
        Some(avatar) => format!(
            "https://cdn.discordapp.com/avatars/{}/{}.png?size=128",
            user_id.get(),
            avatar
        ),
        None => {
            let default_avatar_index = (user_id.get() >> 22) % 6;
            format!(
                "https://cdn.discordapp.com/embed/avatars/{}.png",
                default_avatar_index
            )
        }
    }
}

/// CDN URL for a guild icon.
pub fn guild_icon_url(guild_id: Id<GuildMarker>, icon: &str) -> String {
    format!(
        "https://cdn.discordapp.com/icons/{}/{}.png?size=128",
        guild_id.get(),
        icon
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_are_space_joined() {
        let mentions = vec![role_mention(Id::new(1)), role_mention(Id::new(2))];
        assert_eq!(join_mentions(&mentions), "<@&1> <@&2>");
        assert_eq!(join_mentions(&[]), "");
    }

    #[test]
    fn long_mention_lists_are_cut() {
        let mentions: Vec<String> = (1..=200)
            .map(|i| role_mention(Id::new(100_000_000_000_000_000 + i)))
            .collect();
        let joined = join_mentions(&mentions);
        assert!(joined.len() <= FIELD_VALUE_LIMIT);
        assert!(joined.ends_with(" …"));
    }

    #[test]
    fn default_avatar_when_missing() {
        let url = avatar_url(Id::new(175_928_847_299_117_063), None);
        assert!(url.starts_with("https://cdn.discordapp.com/embed/avatars/"));
        let url = avatar_url(Id::new(7), Some("abc"));
        assert_eq!(url, "https://cdn.discordapp.com/avatars/7/abc.png?size=128");
    }

    #[test]
    fn fields_keep_inline_flag() {
        assert!(field("a", "b", true).inline);
        assert!(!field("a", "b", false).inline);
    }
}

use std::sync::LazyLock;

use regex::Regex;

// twitch.tv/<channel> or a bare login name (4-25 word characters)
static CHANNEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?twitch\.tv/([a-zA-Z0-9_]+)$|^([a-zA-Z0-9_]{4,25})$")
        .expect("twitch channel pattern to compile")
});

/// Returns the channel name if `input` is a Twitch channel URL or a bare name.
pub fn match_channel(input: &str) -> Option<&str> {
    let captures = CHANNEL_REGEX.captures(input)?;
    captures.get(1).or_else(|| captures.get(2)).map(|m| m.as_str())
}

pub fn embed_url(channel: &str, parent: &str) -> String {
    format!("https://player.twitch.tv/?channel={channel}&parent={parent}&muted=false&autoplay=true")
}

/// Twitch only plays inside a page served from `localhost`, `127.0.0.1` or a
/// real domain.
pub fn is_valid_parent(host: &str) -> bool {
    host == "localhost" || host == "127.0.0.1" || host.contains('.')
}

pub fn channel_url(channel: &str) -> String {
    format!("https://www.twitch.tv/{channel}")
}

#[cfg(test)]
mod tests {
    use super::{is_valid_parent, match_channel};

    #[test]
    fn urls_and_bare_names_match() {
        assert_eq!(match_channel("https://www.twitch.tv/shroud"), Some("shroud"));
        assert_eq!(match_channel("http://twitch.tv/summit1g"), Some("summit1g"));
        assert_eq!(match_channel("twitch.tv/a"), Some("a"));
        assert_eq!(match_channel("shroud"), Some("shroud"));
        assert_eq!(match_channel("some_name_25_characters_x"), Some("some_name_25_characters_x"));
    }

    #[test]
    fn rejects_out_of_range_or_foreign_input() {
        assert_eq!(match_channel("abc"), None);
        assert_eq!(match_channel("this_name_is_way_too_long_26"), None);
        assert_eq!(match_channel("twitch.tv/shroud/videos"), None);
        assert_eq!(match_channel("kick.com/xqc"), None);
        assert_eq!(match_channel("with-dash"), None);
        assert_eq!(match_channel("ünïcödé"), None);
    }

    #[test]
    fn parent_must_be_local_or_a_domain() {
        assert!(is_valid_parent("localhost"));
        assert!(is_valid_parent("127.0.0.1"));
        assert!(is_valid_parent("strimly.example.com"));
        assert!(!is_valid_parent(""));
        assert!(!is_valid_parent("my-laptop"));
    }
}

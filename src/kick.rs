use std::sync::LazyLock;

use regex::Regex;

// Recorded videos live under /video/ and have no embeddable player.
static VOD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?kick\.com/video/[a-zA-Z0-9-]+$")
        .expect("kick vod pattern to compile")
});

// kick.com/<channel> or a bare slug (3-25 word characters)
static CHANNEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?kick\.com/([a-zA-Z0-9_]+)$|^([a-zA-Z0-9_]{3,25})$")
        .expect("kick channel pattern to compile")
});

pub fn is_vod_url(input: &str) -> bool {
    VOD_REGEX.is_match(input)
}

/// Returns the channel slug if `input` is a Kick channel URL or a bare slug.
pub fn match_channel(input: &str) -> Option<&str> {
    let captures = CHANNEL_REGEX.captures(input)?;
    captures.get(1).or_else(|| captures.get(2)).map(|m| m.as_str())
}

pub fn embed_url(channel: &str) -> String {
    format!("https://player.kick.com/{channel}")
}

pub fn channel_url(channel: &str) -> String {
    format!("https://kick.com/{channel}")
}

#[cfg(test)]
mod tests {
    use super::{is_vod_url, match_channel};

    #[test]
    fn vod_urls_are_detected() {
        assert!(is_vod_url("https://kick.com/video/abc123"));
        assert!(is_vod_url("kick.com/video/0b5e-4f2a-9c"));
        assert!(is_vod_url("https://www.kick.com/video/x"));
        assert!(!is_vod_url("https://kick.com/video/"));
        assert!(!is_vod_url("https://kick.com/xqc"));
        assert!(!is_vod_url("https://kick.com/video/abc?t=1"));
    }

    #[test]
    fn urls_and_bare_slugs_match() {
        assert_eq!(match_channel("https://kick.com/xqc"), Some("xqc"));
        assert_eq!(match_channel("www.kick.com/trainwreckstv"), Some("trainwreckstv"));
        assert_eq!(match_channel("xqc"), Some("xqc"));
        assert_eq!(match_channel("ab"), None);
        assert_eq!(match_channel("https://kick.com/video/abc123"), None);
    }
}

use std::sync::LazyLock;

use regex::Regex;

// Not anchored at the start; trailing query parameters are ignored.
static VIDEO_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([a-zA-Z0-9_-]{11})(?:[&?].*)?$")
        .expect("youtube url pattern to compile")
});

static VIDEO_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z0-9_-]{11})$").expect("youtube id pattern to compile"));

/// Returns the 11-character video id from a watch/short URL or a bare id.
pub fn match_video(input: &str) -> Option<&str> {
    VIDEO_URL_REGEX
        .captures(input)
        .or_else(|| VIDEO_ID_REGEX.captures(input))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}?autoplay=1")
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

#[cfg(test)]
mod tests {
    use super::match_video;

    #[test]
    fn watch_and_short_urls_match() {
        assert_eq!(match_video("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
        assert_eq!(
            match_video("youtube.com/watch?v=dQw4w9WgXcQ&list=PL123&index=2"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(match_video("https://youtu.be/dQw4w9WgXcQ?t=30"), Some("dQw4w9WgXcQ"));
        assert_eq!(match_video("https://youtu.be/a-b_c-d_e-f"), Some("a-b_c-d_e-f"));
    }

    #[test]
    fn bare_ids_match() {
        assert_eq!(match_video("a-b_c-d_e-f"), Some("a-b_c-d_e-f"));
        assert_eq!(match_video("short"), None);
        assert_eq!(match_video("https://youtu.be/tooShort"), None);
        assert_eq!(match_video("https://www.youtube.com/watch?v=dQw4w9WgXcQX"), None);
    }
}

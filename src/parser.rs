use crate::{
    error::ParseError,
    kick,
    stream::StreamRef,
    twitch, youtube,
};

/// Turns free-form user input into a stream reference.
///
/// Checks run in a fixed order and the first match wins: Kick VOD rejection,
/// Twitch, Kick, then YouTube. Bare names are ambiguous between Twitch and
/// Kick, so anything that fits the Twitch name shape is taken as Twitch.
/// Nothing here touches the network, a channel that does not exist still
/// parses.
///
/// # Errors
/// [`ParseError::KickVodUnsupported`] for Kick recorded-video URLs,
/// [`ParseError::InvalidInput`] when no platform pattern matches.
///
/// # Example
/// ```
/// use strimly::{parser::parse, stream::StreamRef};
///
/// assert_eq!(parse(" https://twitch.tv/shroud "), Ok(StreamRef::twitch("shroud")));
/// ```
pub fn parse(text: &str) -> Result<StreamRef, ParseError> {
    let value = text.trim();

    if kick::is_vod_url(value) {
        return Err(ParseError::KickVodUnsupported);
    }
    if let Some(channel) = twitch::match_channel(value) {
        return Ok(StreamRef::twitch(channel));
    }
    if let Some(channel) = kick::match_channel(value) {
        return Ok(StreamRef::kick(channel));
    }
    if let Some(video_id) = youtube::match_video(value) {
        return Ok(StreamRef::youtube(video_id));
    }

    Err(ParseError::InvalidInput)
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::{error::ParseError, stream::StreamRef};

    #[test]
    fn kick_vods_are_rejected_explicitly() {
        assert_eq!(parse("https://kick.com/video/abc123"), Err(ParseError::KickVodUnsupported));
        assert_eq!(parse("kick.com/video/7f3a-11ee-b2"), Err(ParseError::KickVodUnsupported));
        assert_eq!(parse("  www.kick.com/video/abc  "), Err(ParseError::KickVodUnsupported));
    }

    #[test]
    fn twitch_urls_and_names() {
        assert_eq!(parse("https://twitch.tv/shroud"), Ok(StreamRef::twitch("shroud")));
        assert_eq!(parse("https://www.twitch.tv/pokimane"), Ok(StreamRef::twitch("pokimane")));
        assert_eq!(parse("shroud"), Ok(StreamRef::twitch("shroud")));
        assert_eq!(parse("\tshroud\n"), Ok(StreamRef::twitch("shroud")));
    }

    #[test]
    fn kick_urls_and_short_names() {
        assert_eq!(parse("https://kick.com/xqc"), Ok(StreamRef::kick("xqc")));
        assert_eq!(parse("kick.com/trainwreckstv"), Ok(StreamRef::kick("trainwreckstv")));
        // too short for a twitch login
        assert_eq!(parse("xqc"), Ok(StreamRef::kick("xqc")));
    }

    #[test]
    fn youtube_urls_and_ids() {
        assert_eq!(
            parse("https://youtu.be/dQw4w9WgXcQ?t=30"),
            Ok(StreamRef::youtube("dQw4w9WgXcQ"))
        );
        assert_eq!(
            parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            Ok(StreamRef::youtube("dQw4w9WgXcQ"))
        );
        assert_eq!(parse("jNQXAC9IV-w"), Ok(StreamRef::youtube("jNQXAC9IV-w")));
    }

    #[test]
    fn bare_word_ids_fall_to_twitch_first() {
        assert_eq!(parse("dQw4w9WgXcQ"), Ok(StreamRef::twitch("dQw4w9WgXcQ")));
    }

    #[test]
    fn everything_else_is_invalid() {
        for input in ["", "   ", "ab", "https://example.com/shroud", "no spaces allowed", "https://twitch.tv/"] {
            assert_eq!(parse(input), Err(ParseError::InvalidInput), "input: {input:?}");
        }
    }
}

use anyhow::{Context, Result};
use url::{form_urlencoded, Url};

use crate::stream_list::StreamList;

/// Query parameter carrying the compact share payload.
pub static SHARE_PARAM: &str = "s";
/// Query parameter used by older share links: a percent-encoded JSON array of
/// `{platform, id}` objects.
pub static LEGACY_SHARE_PARAM: &str = "streams";

/// Share payloads found in a link, already percent-decoded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShareParams {
    pub compact: Option<String>,
    pub legacy: Option<String>,
}

impl ShareParams {
    pub fn is_empty(&self) -> bool {
        self.compact.is_none() && self.legacy.is_none()
    }
}

/// Reads the share parameters out of a full URL or a bare query string
/// (`?s=...` or `s=...`). Empty values count as absent.
pub fn read_share_params(link: &str) -> ShareParams {
    let link = link.trim();
    let query = match Url::parse(link) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => link.trim_start_matches('?').to_string(),
    };

    let mut params = ShareParams::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        if key == SHARE_PARAM && params.compact.is_none() {
            params.compact = Some(value.into_owned());
        } else if key == LEGACY_SHARE_PARAM && params.legacy.is_none() {
            params.legacy = Some(value.into_owned());
        }
    }
    params
}

/// Builds a link to `base_url` that reproduces the layout of `list`.
///
/// # Errors
/// Fails if `base_url` is not an absolute URL.
pub fn share_url(base_url: &str, list: &StreamList) -> Result<String> {
    let mut url = Url::parse(base_url).with_context(|| format!("invalid share base url {base_url}"))?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SHARE_PARAM && key != LEGACY_SHARE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(kept);
        pairs.append_pair(SHARE_PARAM, &list.serialize_for_sharing());
    }
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::{read_share_params, share_url, ShareParams};
    use crate::{stream::StreamRef, stream_list::StreamList};

    #[test]
    fn share_links_round_trip() {
        let mut list = StreamList::new();
        list.add(StreamRef::twitch("shroud")).unwrap();
        list.add(StreamRef::youtube("jNQXAC9IV-w")).unwrap();

        let link = share_url("http://localhost:8000/", &list).unwrap();
        assert!(link.starts_with("http://localhost:8000/?s="));

        let params = read_share_params(&link);
        assert_eq!(params.legacy, None);
        let mut restored = StreamList::new();
        restored
            .deserialize_from_sharing(params.compact.as_deref().unwrap())
            .unwrap();
        assert_eq!(restored.as_slice(), list.as_slice());
    }

    #[test]
    fn stale_share_params_are_replaced() {
        let list = StreamList::new();
        let link = share_url("https://example.org/app?theme=dark&s=old&streams=older", &list).unwrap();
        assert_eq!(link, "https://example.org/app?theme=dark&s=W10%3D");
    }

    #[test]
    fn relative_base_urls_are_rejected() {
        assert!(share_url("/app", &StreamList::new()).is_err());
    }

    #[test]
    fn legacy_links_are_percent_decoded() {
        let params = read_share_params(
            "https://strimly.example/?streams=%5B%7B%22platform%22%3A%22kick%22%2C%22id%22%3A%22xqc%22%7D%5D",
        );
        assert_eq!(params.compact, None);
        assert_eq!(params.legacy.as_deref(), Some(r#"[{"platform":"kick","id":"xqc"}]"#));
    }

    #[test]
    fn unencoded_plus_in_pasted_links_still_decodes() {
        let params = read_share_params("https://strimly.example/?s=W1sieSIsImE+Pj9iPj4/Yz4+Il1d");
        let mut list = StreamList::new();
        list.deserialize_from_sharing(params.compact.as_deref().unwrap())
            .unwrap();
        assert_eq!(list.as_slice(), [StreamRef::youtube("a>>?b>>?c>>")]);
    }

    #[test]
    fn bare_query_strings_are_accepted() {
        assert_eq!(
            read_share_params("?s=W10%3D&streams="),
            ShareParams {
                compact: Some("W10=".to_string()),
                legacy: None,
            }
        );
        assert!(read_share_params("").is_empty());
        assert!(read_share_params("https://example.org/").is_empty());
    }
}

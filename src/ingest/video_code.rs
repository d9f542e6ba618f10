use url::Url;

/// Derive a video code from an annotation file's `videoURL`.
///
/// `https://youtu.be/<code>` and `https://www.youtube.com/watch?v=<code>` both
/// yield `<code>`; other URLs yield their last non-empty path segment. Anything
/// that does not parse as a URL is taken to already be a code.
pub fn video_code_from_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let Ok(url) = Url::parse(trimmed) else {
        return trimmed.to_string();
    };

    if let Some((_, code)) = url.query_pairs().find(|(key, value)| key == "v" && !value.is_empty()) {
        return code.into_owned();
    }

    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_link() {
        assert_eq!(video_code_from_url("https://youtu.be/dQw4w9WgXcQ"), "dQw4w9WgXcQ");
    }

    #[test]
    fn watch_link_with_extra_params() {
        assert_eq!(
            video_code_from_url("https://www.youtube.com/watch?t=42&v=dQw4w9WgXcQ"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn embed_link_and_trailing_slash() {
        assert_eq!(
            video_code_from_url("https://www.youtube.com/embed/abc123/"),
            "abc123"
        );
    }

    #[test]
    fn bare_code_is_kept() {
        assert_eq!(video_code_from_url("  abc123 "), "abc123");
    }
}

//! URL bar text normalization.

const ALLOWED_SCHEMES: [&str; 3] = ["http://", "https://", "file://"];

/// Turn URL bar text into an absolute URL.
///
/// Text that already starts with `http://`, `https://` or `file://` is
/// returned untouched. Otherwise any leading partial scheme
/// (`https?`, then optional `:`, `/`, `/`) is stripped and replaced with
/// `<scheme>://`, where the scheme is the one that was typed or `http`.
pub fn normalize_url(input: &str) -> String {
    if ALLOWED_SCHEMES.iter().any(|s| input.starts_with(s)) {
        return input.to_string();
    }

    let (scheme, rest) = if let Some(rest) = input.strip_prefix("https") {
        ("https", rest)
    } else if let Some(rest) = input.strip_prefix("http") {
        ("http", rest)
    } else {
        ("http", input)
    };
    let rest = rest.strip_prefix(':').unwrap_or(rest);
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    let rest = rest.strip_prefix('/').unwrap_or(rest);

    format!("{scheme}://{rest}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_url_table() {
        let cases = [
            ("http://google.com", "http://google.com"),
            ("https://google.com", "https://google.com"),
            ("example.com", "http://example.com"),
            (
                "archive.org/http://example.com",
                "http://archive.org/http://example.com",
            ),
            ("://example.com", "http://example.com"),
            ("file:///foo/bar", "file:///foo/bar"),
            ("http:example.com", "http://example.com"),
            ("https:example.com", "https://example.com"),
            (":/example.com", "http://example.com"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_url(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn empty_text_still_produces_a_url() {
        assert_eq!(normalize_url(""), "http://");
    }

    #[test]
    fn hostname_starting_with_http_is_treated_as_scheme() {
        // Same as the regex `^(https?)?:?/?/?`: a bare "httpbin.org" loses its prefix.
        assert_eq!(normalize_url("httpbin.org"), "http://bin.org");
    }
}

//! Image URL rewriting through the same-origin proxy.
//!
//! Remote images referenced by README content are never loaded directly.
//! Their URLs are hex encoded into a path segment under [`PROXY_PREFIX`],
//! and the proxy endpoint decodes the segment back with
//! [`decode_proxy_url`]. Inline `data:image/` payloads are already inert
//! and pass through untouched.

use crate::error::ProxyUrlError;

/// Path prefix of the image proxy endpoint.
pub const PROXY_PREFIX: &str = "/api/proxy/";

const INLINE_IMAGE_PREFIX: &str = "data:image/";

/// Rewrites an image source URL to its proxied form.
///
/// The URL is encoded as lowercase hex of its UTF-8 bytes. For ASCII URLs
/// this is exactly two hex digits per character in original order.
///
/// # Examples
///
/// ```
/// use readme_render::proxy_image_url;
///
/// assert_eq!(proxy_image_url("http://a/b"), "/api/proxy/687474703a2f2f612f62");
/// assert_eq!(proxy_image_url("data:image/png;base64,AAA"), "data:image/png;base64,AAA");
/// ```
pub fn proxy_image_url(url: &str) -> String {
    if url.starts_with(INLINE_IMAGE_PREFIX) {
        return url.to_string();
    }

    format!("{}{}", PROXY_PREFIX, hex::encode(url))
}

/// Decodes a proxy path segment back to the original image URL.
///
/// Accepts either the bare hex segment or a full path starting with
/// [`PROXY_PREFIX`].
///
/// # Errors
///
/// Returns error if the segment is empty, is not valid hex, or does not
/// decode to UTF-8.
pub fn decode_proxy_url(segment: &str) -> Result<String, ProxyUrlError> {
    let segment = segment.strip_prefix(PROXY_PREFIX).unwrap_or(segment);

    if segment.is_empty() {
        return Err(ProxyUrlError::Empty);
    }

    let bytes = hex::decode(segment)?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_data_image_unchanged() {
        // Arrange
        let url = "data:image/png;base64,AAA";

        // Act
        let result = proxy_image_url(url);

        // Assert
        assert_eq!(result, url);
    }

    #[test]
    fn test_remote_url_hex_encoded() {
        // Arrange
        let url = "http://evil.example/x.png";

        // Act
        let result = proxy_image_url(url);

        // Assert
        assert_eq!(
            result,
            "/api/proxy/687474703a2f2f6576696c2e6578616d706c652f782e706e67"
        );
    }

    #[test]
    fn test_non_image_data_uri_is_proxied() {
        // Arrange: only inline images are considered inert
        let url = "data:text/html,<script>alert(1)</script>";

        // Act
        let result = proxy_image_url(url);

        // Assert
        assert!(result.starts_with(PROXY_PREFIX), "Got {}", result);
    }

    #[test]
    fn test_uppercase_data_prefix_is_proxied() {
        assert!(proxy_image_url("DATA:image/png;base64,AAA").starts_with(PROXY_PREFIX));
    }

    #[test]
    fn test_relative_url_proxied() {
        assert_eq!(proxy_image_url("./a.png"), "/api/proxy/2e2f612e706e67");
    }

    #[test]
    fn test_decode_accepts_full_path() {
        // Arrange
        let proxied = proxy_image_url("https://example.com/logo.svg");

        // Act
        let decoded = decode_proxy_url(&proxied).expect("Should decode proxy path");

        // Assert
        assert_eq!(decoded, "https://example.com/logo.svg");
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert!(matches!(decode_proxy_url(""), Err(ProxyUrlError::Empty)));
        assert!(matches!(
            decode_proxy_url(PROXY_PREFIX),
            Err(ProxyUrlError::Empty)
        ));
    }

    #[test]
    fn test_decode_rejects_bad_hex() {
        assert!(matches!(
            decode_proxy_url("zz"),
            Err(ProxyUrlError::Hex(_))
        ));
        assert!(matches!(
            decode_proxy_url("abc"),
            Err(ProxyUrlError::Hex(_))
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert!(matches!(
            decode_proxy_url("ff"),
            Err(ProxyUrlError::Utf8(_))
        ));
    }

    #[test]
    fn test_non_ascii_url_round_trips() {
        // Arrange
        let url = "https://例え.jp/画像.png";

        // Act
        let decoded = decode_proxy_url(&proxy_image_url(url)).expect("Should decode");

        // Assert
        assert_eq!(decoded, url);
    }

    proptest! {
        #[test]
        fn prop_proxied_urls_decode_to_original(url in "[^\\x00]{1,64}") {
            prop_assume!(!url.starts_with("data:image/"));
            let proxied = proxy_image_url(&url);
            prop_assert!(proxied.starts_with(PROXY_PREFIX));
            prop_assert_eq!(decode_proxy_url(&proxied).unwrap(), url);
        }
    }
}

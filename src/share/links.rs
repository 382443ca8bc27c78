//! Share-link builders
//!
//! Only the shared URL itself is percent-encoded. Titles, descriptions,
//! hashtags and the like go into the link as given, so callers that need
//! them encoded must encode them first.

use url::form_urlencoded;

/// Percent-encode a value for a query string.
///
/// Space becomes `+`; only ASCII alphanumerics and `-._` pass through.
pub fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
}

/// Twitter intent; `hashtags` is a comma separated list without `#`
pub fn twitter_share_url(url: &str, text: &str, via: &str, hashtags: &str) -> String {
    format!(
        "https://twitter.com/share?url={}&text={}&via={}&hashtags={}",
        encode(url),
        text,
        via,
        hashtags
    )
}

pub fn facebook_share_url(url: &str) -> String {
    format!("https://www.facebook.com/sharer.php?u={}", encode(url))
}

/// VK share link.
///
/// With `noparse` VK takes title, description and image from the link
/// instead of scraping the page. Without it the light form is used and the
/// other fields are ignored.
pub fn vk_share_url(url: &str, noparse: bool, title: &str, description: &str, image: &str) -> String {
    if noparse {
        format!(
            "https://vk.com/share.php?url={}&title={}&description={}&image={}&noparse=true",
            encode(url),
            title,
            description,
            image
        )
    } else {
        format!("http://vk.com/share.php?url={}", encode(url))
    }
}

pub fn ok_share_url(url: &str) -> String {
    format!("https://connect.ok.ru/offer?url={}", encode(url))
}

/// Moy Mir (my.mail.ru) share link
pub fn moymir_share_url(url: &str, title: &str, description: &str, image: &str) -> String {
    format!(
        "http://connect.mail.ru/share?url={}&title={}&description={}&image_url={}",
        encode(url),
        title,
        description,
        image
    )
}

pub fn pocket_share_url(url: &str) -> String {
    format!("https://getpocket.com/save?url={}", encode(url))
}

/// Interpret a loosely typed boolean flag such as `"true"` or `"1"`
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://example.com/a b?x=1&y=2";
    const ENCODED: &str = "http%3A%2F%2Fexample.com%2Fa+b%3Fx%3D1%26y%3D2";

    #[test]
    fn test_encode() {
        assert_eq!(encode(URL), ENCODED);
        assert_eq!(encode("safe-._"), "safe-._");
        assert_eq!(encode("http://example.com/*star*"), "http%3A%2F%2Fexample.com%2F%2Astar%2A");
    }

    #[test]
    fn test_twitter_share_url() {
        let link = twitter_share_url(URL, "Hello", "acme", "rust,news");
        assert_eq!(
            link,
            format!("https://twitter.com/share?url={ENCODED}&text=Hello&via=acme&hashtags=rust,news")
        );
    }

    #[test]
    fn test_single_parameter_links() {
        assert_eq!(
            facebook_share_url(URL),
            format!("https://www.facebook.com/sharer.php?u={ENCODED}")
        );
        assert_eq!(ok_share_url(URL), format!("https://connect.ok.ru/offer?url={ENCODED}"));
        assert_eq!(pocket_share_url(URL), format!("https://getpocket.com/save?url={ENCODED}"));
    }

    #[test]
    fn test_vk_rich_link() {
        let link = vk_share_url(URL, true, "Title", "Desc", "http://example.com/i.png");
        assert!(link.starts_with("https://vk.com/share.php?url="));
        assert!(link.contains(ENCODED));
        assert!(link.contains("&title=Title"));
        assert!(link.contains("&description=Desc"));
        assert!(link.contains("&image=http://example.com/i.png"));
        assert!(link.ends_with("&noparse=true"));
    }

    #[test]
    fn test_vk_light_link_ignores_metadata() {
        let link = vk_share_url(URL, false, "Title", "Desc", "http://example.com/i.png");
        assert_eq!(link, format!("http://vk.com/share.php?url={ENCODED}"));
        assert!(!link.contains("title="));
        assert!(!link.contains("image="));
    }

    #[test]
    fn test_moymir_share_url_keeps_metadata_verbatim() {
        let link = moymir_share_url(URL, "My title", "Some & more", "http://example.com/i.png");
        assert_eq!(
            link,
            format!(
                "http://connect.mail.ru/share?url={ENCODED}&title=My title&description=Some & more&image_url=http://example.com/i.png"
            )
        );
    }

    #[test]
    fn test_parse_flag() {
        for truthy in ["true", "TRUE", " 1 ", "yes", "on"] {
            assert!(parse_flag(truthy), "{truthy}");
        }
        for falsy in ["", "false", "0", "no", "nope"] {
            assert!(!parse_flag(falsy), "{falsy}");
        }
    }
}

//! Share module for share links and share counters
//!
//! This module provides functionality for:
//! - Building share links for every supported network
//! - Parsing the counter endpoints' JSON/JSONP answers
//! - Fetching share counters, with proxy escalation for Facebook

pub mod counters;
pub mod links;
pub mod parse;

pub use counters::ShareCounter;
pub use links::{
    facebook_share_url, moymir_share_url, ok_share_url, parse_flag, pocket_share_url,
    twitter_share_url, vk_share_url,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported social networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Twitter,
    Facebook,
    Vk,
    Ok,
    MoyMir,
    Pocket,
}

impl Network {
    pub const ALL: [Network; 6] = [
        Network::Twitter,
        Network::Facebook,
        Network::Vk,
        Network::Ok,
        Network::MoyMir,
        Network::Pocket,
    ];

    /// Twitter and Pocket publish no share counter
    pub fn has_counter(self) -> bool {
        !matches!(self, Network::Twitter | Network::Pocket)
    }

    /// Networks whose share counter can be fetched
    pub fn with_counters() -> impl Iterator<Item = Network> {
        Self::ALL.into_iter().filter(|network| network.has_counter())
    }

    /// Build this network's share link for `url`
    pub fn share_url(self, url: &str, meta: &ShareMeta) -> String {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        match self {
            Network::Twitter => {
                twitter_share_url(url, &field(&meta.text), &field(&meta.via), &field(&meta.hashtags))
            }
            Network::Facebook => facebook_share_url(url),
            Network::Vk => vk_share_url(
                url,
                meta.noparse,
                &field(&meta.title),
                &field(&meta.description),
                &field(&meta.image),
            ),
            Network::Ok => ok_share_url(url),
            Network::MoyMir => moymir_share_url(
                url,
                &field(&meta.title),
                &field(&meta.description),
                &field(&meta.image),
            ),
            Network::Pocket => pocket_share_url(url),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Twitter => write!(f, "twitter"),
            Network::Facebook => write!(f, "facebook"),
            Network::Vk => write!(f, "vk"),
            Network::Ok => write!(f, "ok"),
            Network::MoyMir => write!(f, "moymir"),
            Network::Pocket => write!(f, "pocket"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "twitter" | "tw" => Ok(Network::Twitter),
            "facebook" | "fb" => Ok(Network::Facebook),
            "vk" | "vkontakte" => Ok(Network::Vk),
            "ok" | "odnoklassniki" => Ok(Network::Ok),
            "moymir" | "mailru" | "mr" => Ok(Network::MoyMir),
            "pocket" => Ok(Network::Pocket),
            _ => Err(format!(
                "Unknown network: {s}. Use: twitter, facebook, vk, ok, moymir, pocket"
            )),
        }
    }
}

/// Optional metadata for share links.
///
/// Each network reads only the fields it supports; unset fields render
/// as empty parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    /// Tweet text
    pub text: Option<String>,
    /// Twitter account to credit
    pub via: Option<String>,
    /// Comma separated hashtags
    pub hashtags: Option<String>,
    /// VK: take title/description/image from the link
    pub noparse: bool,
}

impl ShareMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_via(mut self, via: impl Into<String>) -> Self {
        self.via = Some(via.into());
        self
    }

    pub fn with_hashtags(mut self, hashtags: impl Into<String>) -> Self {
        self.hashtags = Some(hashtags.into());
        self
    }

    pub fn with_noparse(mut self, noparse: bool) -> Self {
        self.noparse = noparse;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_round_trip_names() {
        for network in Network::ALL {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
        assert_eq!("FB".parse::<Network>().unwrap(), Network::Facebook);
        assert_eq!("mailru".parse::<Network>().unwrap(), Network::MoyMir);
        assert!("myspace".parse::<Network>().is_err());
    }

    #[test]
    fn test_networks_with_counters() {
        let networks: Vec<_> = Network::with_counters().collect();
        assert_eq!(
            networks,
            vec![Network::Facebook, Network::Vk, Network::Ok, Network::MoyMir]
        );
    }

    #[test]
    fn test_share_url_prefixes() {
        let url = "http://example.com/page";
        let encoded = "http%3A%2F%2Fexample.com%2Fpage";
        let meta = ShareMeta::new();
        let prefixes = [
            (Network::Twitter, "https://twitter.com/share?"),
            (Network::Facebook, "https://www.facebook.com/sharer.php?"),
            (Network::Vk, "http://vk.com/share.php?"),
            (Network::Ok, "https://connect.ok.ru/offer?"),
            (Network::MoyMir, "http://connect.mail.ru/share?"),
            (Network::Pocket, "https://getpocket.com/save?"),
        ];

        for (network, prefix) in prefixes {
            let link = network.share_url(url, &meta);
            assert!(link.starts_with(prefix), "{network}: {link}");
            assert!(link.contains(encoded), "{network}: {link}");
        }
    }

    #[test]
    fn test_share_url_uses_meta() {
        let meta = ShareMeta::new()
            .with_title("Title")
            .with_image("http://example.com/i.png")
            .with_text("Read this")
            .with_via("acme")
            .with_hashtags("a,b")
            .with_noparse(true);

        let vk = Network::Vk.share_url("http://example.com", &meta);
        assert!(vk.starts_with("https://vk.com/share.php?"));
        assert!(vk.contains("&title=Title&description=&image=http://example.com/i.png"));

        let tw = Network::Twitter.share_url("http://example.com", &meta);
        assert!(tw.ends_with("&text=Read this&via=acme&hashtags=a,b"));
    }
}

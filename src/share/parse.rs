//! Response grammars of the counter endpoints
//!
//! Each parser is a pure function of the response body. VK and OK.ru answer
//! with a JSONP call whose argument is the count; Moy Mir wraps a JSON object
//! keyed by URL; Facebook returns the Graph API object as plain JSON.

use crate::error::{CountError, CountResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

/// `VK.Share.count(<index>, <count>);`
static VK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)VK\.Share\.count\([0-9]+, ([0-9]+)\);").expect("Invalid VK regex")
});

/// `ODKL.updateCount('pageshares','<count>');`
static OK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)ODKL\.updateCount\('pageshares','([0-9]+)'\);").expect("Invalid OK regex")
});

/// `pageshares(<json>);`
static MOYMIR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)pageshares\((.*)\);").expect("Invalid Moy Mir regex"));

#[derive(Debug, Deserialize)]
struct GraphObject {
    id: Option<String>,
    share: Option<GraphShare>,
}

#[derive(Debug, Deserialize)]
struct GraphShare {
    share_count: Option<u64>,
}

/// Facebook Graph object; only counts when `id` is exactly the requested URL
pub fn parse_facebook(body: &str, url: &str) -> CountResult {
    let object: GraphObject = serde_json::from_str(body)?;

    let id = object.id.ok_or_else(|| CountError::MissingField("id".to_string()))?;
    if id != url {
        return Err(CountError::IdMismatch {
            expected: url.to_string(),
            found: id,
        });
    }

    object
        .share
        .and_then(|share| share.share_count)
        .ok_or_else(|| CountError::MissingField("share.share_count".to_string()))
}

pub fn parse_vk(body: &str) -> CountResult {
    capture_count(&VK_REGEX, body)
}

pub fn parse_ok(body: &str) -> CountResult {
    capture_count(&OK_REGEX, body)
}

/// Moy Mir payload, looked up by the exact requested URL
pub fn parse_moymir(body: &str, url: &str) -> CountResult {
    let payload = MOYMIR_REGEX
        .captures(body)
        .and_then(|caps| caps.get(1))
        .ok_or(CountError::NoMatch)?
        .as_str();

    let data: Value = serde_json::from_str(payload)?;
    data.get(url)
        .and_then(|entry| entry.get("shares"))
        .and_then(Value::as_u64)
        .ok_or_else(|| CountError::MissingField(format!("{url}.shares")))
}

fn capture_count(regex: &Regex, body: &str) -> CountResult {
    let caps = regex.captures(body).ok_or(CountError::NoMatch)?;
    Ok(caps[1].parse()?)
}

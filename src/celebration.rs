//! Celebration GIF selection
//!
//! The overlay tries a Giphy search first and falls back to a fixed list of
//! GIFs when the search is unavailable, empty, or fails. If the chosen image
//! itself fails to load, the overlay shows an emoji line instead.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;

use crate::settings::GifSettings;

/// Shown in place of the GIF when the image fails to load
pub const EMOJI_FALLBACK: &str = "💕🥰💕";

/// Used when the search is unavailable
pub const FALLBACK_GIFS: [&str; 6] = [
    "https://media.giphy.com/media/3o7TKoWXm3okO1kgHC/giphy.gif",
    "https://media.giphy.com/media/l0HlGEX1ZORa0aIvu/giphy.gif",
    "https://media.giphy.com/media/26BRv0ThflsHCqDrG/giphy.gif",
    "https://media.giphy.com/media/l4FGni1RBAR2OWsGk/giphy.gif",
    "https://media.giphy.com/media/xT0GqssRweIhlz209i/giphy.gif",
    "https://media.giphy.com/media/l0MYt5jPR6QX5pnqM/giphy.gif",
];

const SEARCH_ENDPOINT: &str = "https://api.giphy.com/v1/gifs/search";

/// Where the chosen GIF came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GifChoice {
    Search(String),
    Fallback(&'static str),
}

impl GifChoice {
    pub fn url(&self) -> &str {
        match self {
            GifChoice::Search(url) => url.as_str(),
            GifChoice::Fallback(url) => url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    images: HitImages,
}

#[derive(Debug, Deserialize)]
struct HitImages {
    fixed_height: HitImage,
}

#[derive(Debug, Deserialize)]
struct HitImage {
    url: String,
}

/// Search URL, or `None` when no API key is configured
pub fn search_url(gif: &GifSettings) -> Option<String> {
    let key = gif.api_key.as_deref().filter(|k| !k.is_empty())?;
    Some(format!(
        "{}?api_key={}&q={}&limit={}&rating=g",
        SEARCH_ENDPOINT,
        encode_query(key),
        encode_query(&gif.query),
        gif.limit
    ))
}

/// Form-encode a query value the way `URLSearchParams` does: unreserved
/// ASCII passes through, spaces become `+`, every other byte is `%XX`.
/// Used for both targets so native and wasm build the same URL.
fn encode_query(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Random pick from the fallback list
pub fn fallback<R: Rng + ?Sized>(rng: &mut R) -> GifChoice {
    let url = FALLBACK_GIFS.choose(rng).copied().unwrap_or(FALLBACK_GIFS[0]);
    GifChoice::Fallback(url)
}

/// Pick a GIF from a search response body, falling back when it has no hits
/// or cannot be parsed
pub fn choose_from_response<R: Rng + ?Sized>(body: &str, rng: &mut R) -> GifChoice {
    let urls: Vec<String> = match serde_json::from_str::<SearchResponse>(body) {
        Ok(response) => response
            .data
            .into_iter()
            .map(|hit| hit.images.fixed_height.url)
            .filter(|url| !url.is_empty())
            .collect(),
        Err(e) => {
            log::warn!("GIF search response unreadable: {}", e);
            Vec::new()
        }
    };

    match urls.choose(rng) {
        Some(url) => GifChoice::Search(url.clone()),
        None => {
            log::debug!("GIF search returned nothing, using fallback list");
            fallback(rng)
        }
    }
}

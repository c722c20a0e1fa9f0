//! Embed configuration

use lite_dom::MediaQuery;
use serde::{Deserialize, Serialize};

use crate::EmbedError;

/// Page-wide embed settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// CSP nonce copied onto every injected `<style>`
    pub nonce: Option<String>,
    /// Viewport width (in em) at or below which `short` embeds loop inline
    pub short_breakpoint_em: f32,
    /// Delay before the `playVideo` nudge sent to short embeds
    pub short_autoplay_delay_ms: u64,
    /// Script fetched once per page for `events` embeds
    pub player_api_url: String,
    /// Base of the Vimeo oEmbed-style metadata API
    pub vimeo_api_base: String,
    /// User agent for metadata and script requests
    pub user_agent: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            nonce: None,
            short_breakpoint_em: 40.0,
            short_autoplay_delay_ms: 2000,
            player_api_url: "https://www.youtube.com/iframe_api".to_string(),
            vimeo_api_base: "https://vimeo.com/api/v2/video".to_string(),
            user_agent: format!("lite-embed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl EmbedConfig {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, EmbedError> {
        Ok(serde_json::from_str(json)?)
    }

    /// `(max-width: <short_breakpoint_em>em)`
    pub fn short_query(&self) -> MediaQuery {
        MediaQuery::MaxWidthEm(self.short_breakpoint_em)
    }

    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }
}

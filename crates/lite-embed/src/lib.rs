//! lite embed - lazy video embeds
//!
//! `<lite-youtube>` and `<lite-vimeo>` render a poster and a play button in
//! place of the provider's player. The real iframe is only created on
//! click, when the element scrolls into view (`autoload`), or on request,
//! and the provider's origins are preconnected on first pointer hover.

mod attrs;
mod config;
mod embed_url;
mod encode;
mod error;
mod host;
mod net;
mod page;
pub mod player;
mod placeholder;
mod preconnect;
mod template;
mod timers;
mod vimeo;
mod youtube;

pub use attrs::{EmbedDescriptor, PosterLoading};
pub use config::EmbedConfig;
pub use embed_url::{Trigger, YouTubeUrlOptions, vimeo_player_url, youtube_embed_url};
pub use encode::encode_uri_component;
pub use error::EmbedError;
pub use page::{Embed, Page, VimeoElement, YouTubeElement};
pub use placeholder::{PosterUrls, vimeo_image_id};
pub use preconnect::{PreconnectRegistry, Provider, VIMEO_ORIGINS, youtube_origins};
pub use template::ShadowRefs;
pub use timers::{TimerId, TimerManager};
pub use vimeo::{HttpMetadataSource, LiteVimeo, MetadataSource, VimeoVideo, resolve_posters};
pub use youtube::{LOADED_EVENT, LiteYouTube};

/// Attribute names
pub mod attributes {
    pub use crate::attrs::{
        AUTOLOAD, AUTOPAUSE, AUTOPLAY, EVENTS, NOCOOKIE, PARAMS, PLAYLIST_ID, POSTER_LOADING,
        POSTER_QUALITY, SHORT, VIDEO_ID, VIDEO_PLAY, VIDEO_START_AT, VIDEO_TITLE,
    };
}

/// Tag of the YouTube element
pub const YOUTUBE_TAG: &str = "lite-youtube";
/// Tag of the Vimeo element
pub const VIMEO_TAG: &str = "lite-vimeo";

//! Attribute-to-descriptor mapping
//!
//! Attributes are the only source of truth. A descriptor is a snapshot
//! read from the element whenever it is needed, never stored.

use lite_dom::{DomTree, NodeId};

pub const VIDEO_ID: &str = "videoid";
pub const PLAYLIST_ID: &str = "playlistid";
pub const VIDEO_TITLE: &str = "videotitle";
pub const VIDEO_PLAY: &str = "videoplay";
pub const VIDEO_START_AT: &str = "videostartat";
pub const PARAMS: &str = "params";
pub const AUTOLOAD: &str = "autoload";
pub const AUTOPLAY: &str = "autoplay";
pub const AUTOPAUSE: &str = "autopause";
pub const NOCOOKIE: &str = "nocookie";
pub const SHORT: &str = "short";
pub const EVENTS: &str = "events";
pub const POSTER_QUALITY: &str = "posterquality";
pub const POSTER_LOADING: &str = "posterloading";

/// Attributes whose changes re-render a `lite-youtube`
pub const YOUTUBE_OBSERVED: &[&str] = &[VIDEO_ID, PLAYLIST_ID, VIDEO_PLAY, VIDEO_TITLE];

/// Attributes whose changes re-render a `lite-vimeo`
pub const VIMEO_OBSERVED: &[&str] = &[VIDEO_ID];

/// Changing one of these while activated tears the player down
pub const IDENTITY_ATTRIBUTES: &[&str] = &[VIDEO_ID, PLAYLIST_ID];

pub const DEFAULT_TITLE: &str = "Video";
pub const DEFAULT_PLAY: &str = "Play";
pub const DEFAULT_START: &str = "0";
pub const DEFAULT_VIMEO_START: &str = "0s";
pub const DEFAULT_POSTER_QUALITY: &str = "hqdefault";

/// `loading` hint for the fallback poster `<img>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PosterLoading {
    #[default]
    Lazy,
    Eager,
    Auto,
}

impl PosterLoading {
    /// Unknown values fall back to `lazy`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "eager" => Self::Eager,
            "auto" => Self::Auto,
            _ => Self::Lazy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lazy => "lazy",
            Self::Eager => "eager",
            Self::Auto => "auto",
        }
    }
}

/// Everything an embed reads from its attributes
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedDescriptor {
    /// Raw video id; encoded when it lands in a URL
    pub video_id: String,
    /// Present only when set to a non-empty value
    pub playlist_id: Option<String>,
    pub video_title: String,
    pub video_play: String,
    pub video_start_at: String,
    /// Caller-supplied query string, appended verbatim
    pub params: Option<String>,
    pub autoload: bool,
    pub autoplay: bool,
    pub autopause: bool,
    pub nocookie: bool,
    pub short: bool,
    pub events: bool,
    pub poster_quality: String,
    pub poster_loading: PosterLoading,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl EmbedDescriptor {
    /// Snapshot a `lite-youtube` element
    pub fn youtube(tree: &DomTree, element: NodeId) -> Self {
        Self::read(tree, element, DEFAULT_START)
    }

    /// Snapshot a `lite-vimeo` element
    pub fn vimeo(tree: &DomTree, element: NodeId) -> Self {
        Self::read(tree, element, DEFAULT_VIMEO_START)
    }

    fn read(tree: &DomTree, element: NodeId, default_start: &str) -> Self {
        let get = |name: &str| tree.get_attribute(element, name);
        let has = |name: &str| tree.has_attribute(element, name);

        Self {
            video_id: get(VIDEO_ID).unwrap_or_default().to_string(),
            playlist_id: non_empty(get(PLAYLIST_ID)).map(str::to_string),
            video_title: non_empty(get(VIDEO_TITLE)).unwrap_or(DEFAULT_TITLE).to_string(),
            video_play: non_empty(get(VIDEO_PLAY)).unwrap_or(DEFAULT_PLAY).to_string(),
            video_start_at: non_empty(get(VIDEO_START_AT)).unwrap_or(default_start).to_string(),
            params: non_empty(get(PARAMS)).map(str::to_string),
            autoload: has(AUTOLOAD),
            autoplay: has(AUTOPLAY),
            autopause: has(AUTOPAUSE),
            nocookie: has(NOCOOKIE),
            short: has(SHORT),
            events: has(EVENTS),
            poster_quality: non_empty(get(POSTER_QUALITY))
                .unwrap_or(DEFAULT_POSTER_QUALITY)
                .to_string(),
            poster_loading: get(POSTER_LOADING).map(PosterLoading::parse).unwrap_or_default(),
        }
    }

    /// `"{videoplay}: {videotitle}"`, used for the host title, the play
    /// button label and the poster alt text
    pub fn label(&self) -> String {
        format!("{}: {}", self.video_play, self.video_title)
    }

    /// Whether the frame has to accept JS API commands
    pub fn needs_js_api(&self) -> bool {
        self.autopause || self.events
    }
}

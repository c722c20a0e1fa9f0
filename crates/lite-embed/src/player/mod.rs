//! Native player integration
//!
//! `events` embeds load the provider's player API once per page and bind a
//! managed player to their frame. The player drives the frame through the
//! frame command protocol and mirrors its state from the frame's replies.

mod postmessage;

use std::rc::Rc;

use lite_dom::{Document, DomEventType, NodeId};
use smol::lock::OnceCell;

use crate::EmbedError;

pub use postmessage::{FrameCommand, IframePlayer};

/// Provider player states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl PlayerState {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Unstarted),
            0 => Some(Self::Ended),
            1 => Some(Self::Playing),
            2 => Some(Self::Paused),
            3 => Some(Self::Buffering),
            5 => Some(Self::Cued),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Unstarted => -1,
            Self::Ended => 0,
            Self::Playing => 1,
            Self::Paused => 2,
            Self::Buffering => 3,
            Self::Cued => 5,
        }
    }
}

/// Notifications a managed player raises
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    Ready,
    StateChange(PlayerState),
    PlaybackRateChange(f64),
}

impl PlayerEvent {
    /// DOM event re-dispatched on the host, if any
    pub fn dom_event(&self) -> Option<DomEventType> {
        match self {
            Self::Ready => Some(DomEventType::LoadedMetadata),
            Self::StateChange(PlayerState::Playing) => Some(DomEventType::Play),
            Self::StateChange(PlayerState::Paused) => Some(DomEventType::Pause),
            Self::StateChange(PlayerState::Ended) => Some(DomEventType::Ended),
            Self::StateChange(_) => None,
            Self::PlaybackRateChange(_) => Some(DomEventType::RateChange),
        }
    }
}

/// Player control object bound to one frame
pub trait ManagedPlayer {
    /// Frame the player drives
    fn frame(&self) -> NodeId;

    fn play(&mut self, doc: &mut Document) -> bool;
    fn pause(&mut self, doc: &mut Document) -> bool;
    fn seek_to(&mut self, doc: &mut Document, seconds: f64, allow_seek_ahead: bool) -> bool;
    fn set_volume(&mut self, doc: &mut Document, volume: u8) -> bool;
    fn mute(&mut self, doc: &mut Document) -> bool;
    fn unmute(&mut self, doc: &mut Document) -> bool;
    fn set_playback_rate(&mut self, doc: &mut Document, rate: f64) -> bool;

    fn volume(&self) -> u8;
    fn is_muted(&self) -> bool;
    fn playback_rate(&self) -> f64;
    /// Seconds; NaN until the provider reports it
    fn duration(&self) -> f64;
    fn current_time(&self) -> f64;
    fn state(&self) -> PlayerState;

    /// Feed a message the frame posted back; returns what changed
    fn handle_message(&mut self, data: &str) -> Vec<PlayerEvent>;
}

/// A loaded provider player API
pub trait PlayerApi {
    /// Bind a managed player to a jsapi-enabled frame
    fn create_player(&self, doc: &mut Document, frame: NodeId) -> Box<dyn ManagedPlayer>;
}

/// Fetches the provider's player script
#[allow(async_fn_in_trait)]
pub trait ScriptLoader {
    async fn load(&self, url: &str) -> Result<String, EmbedError>;
}

/// Loads scripts over HTTP
#[derive(Debug, Clone)]
pub struct HttpScriptLoader {
    user_agent: String,
}

impl HttpScriptLoader {
    pub fn new(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
        }
    }
}

impl ScriptLoader for HttpScriptLoader {
    async fn load(&self, url: &str) -> Result<String, EmbedError> {
        crate::net::fetch_text(url, &self.user_agent).await
    }
}

/// The YouTube IFrame Player API
#[derive(Debug, Clone)]
pub struct YouTubeIframeApi {
    /// Widget script the loader points at, when it could be found
    widget_script: Option<String>,
}

impl YouTubeIframeApi {
    /// Accept a loaded `iframe_api` script
    pub fn from_script(source: &str) -> Result<Self, EmbedError> {
        if source.trim().is_empty() {
            return Err(EmbedError::ScriptLoad("empty player script".into()));
        }
        let widget_script = find_widget_script(source);
        match &widget_script {
            Some(script) => tracing::info!("player API ready, widget {}", script),
            None => tracing::warn!("player API script names no widget script"),
        }
        Ok(Self { widget_script })
    }

    pub fn widget_script(&self) -> Option<&str> {
        self.widget_script.as_deref()
    }
}

/// `var scriptUrl = '...www-widgetapi.js'` in the loader script
fn find_widget_script(source: &str) -> Option<String> {
    let start = source.find("scriptUrl")?;
    let rest = &source[start..];
    let open = rest.find(['\'', '"'])?;
    let quote = rest[open..].chars().next()?;
    let body = &rest[open + 1..];
    let close = body.find(quote)?;
    Some(body[..close].replace("\\/", "/"))
}

impl PlayerApi for YouTubeIframeApi {
    fn create_player(&self, doc: &mut Document, frame: NodeId) -> Box<dyn ManagedPlayer> {
        tracing::debug!(
            "binding player to {:?} via {}",
            frame,
            self.widget_script().unwrap_or("built-in widget")
        );
        Box::new(IframePlayer::attach(doc, frame))
    }
}

/// The page's player API, loaded at most once
#[derive(Debug)]
pub struct PlayerApiHandle {
    url: String,
    api: OnceCell<Rc<YouTubeIframeApi>>,
}

impl PlayerApiHandle {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            api: OnceCell::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_loaded(&self) -> bool {
        self.api.is_initialized()
    }

    /// Resolve the API, loading it on first use. A failed load is not
    /// remembered; the next call tries again.
    pub async fn get<L: ScriptLoader>(&self, loader: &L) -> Result<Rc<YouTubeIframeApi>, EmbedError> {
        let api = self
            .api
            .get_or_try_init(|| async {
                tracing::info!("loading player API from {}", self.url);
                let source = loader.load(&self.url).await?;
                YouTubeIframeApi::from_script(&source).map(Rc::new)
            })
            .await?;
        Ok(Rc::clone(api))
    }
}

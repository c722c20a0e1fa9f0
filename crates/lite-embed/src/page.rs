//! Page - hosts embeds on a document
//!
//! Owns the document, layout, observers and clock, and routes user input,
//! attribute changes, visibility updates, timers and frame messages to the
//! embed components.

use std::collections::HashMap;
use std::rc::Rc;

use lite_dom::{
    DOMRect, Document, DomEvent, DomEventType, IntersectionObserverManager, LifecycleCallback,
    ListenerId, ListenerOptions, NodeId, ObserverId, Viewport,
};

use crate::attrs::{self, EmbedDescriptor, PosterLoading};
use crate::embed_url::Trigger;
use crate::host::{EmbedHost, Task, Watch, WatchRole};
use crate::player::{ManagedPlayer, PlayerApiHandle, PlayerState, ScriptLoader};
use crate::preconnect::PreconnectRegistry;
use crate::timers::TimerManager;
use crate::vimeo::{LiteVimeo, MetadataSource, resolve_posters};
use crate::youtube::LiteYouTube;
use crate::{EmbedConfig, EmbedError, VIMEO_TAG, YOUTUBE_TAG};

/// A hosted embed
pub enum Embed {
    YouTube(LiteYouTube),
    Vimeo(LiteVimeo),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Warm,
    Activate,
}

/// A page of embeds
pub struct Page {
    document: Document,
    config: EmbedConfig,
    preconnect: Rc<PreconnectRegistry>,
    player_api: PlayerApiHandle,
    observers: IntersectionObserverManager,
    watches: HashMap<ObserverId, Watch>,
    timers: TimerManager<Task>,
    viewport: Viewport,
    layout: HashMap<NodeId, DOMRect>,
    embeds: HashMap<NodeId, Embed>,
    listeners: HashMap<ListenerId, (NodeId, Action)>,
}

/// Borrow the page's services and its embed table separately
macro_rules! split {
    ($page:expr) => {
        (
            &mut $page.embeds,
            EmbedHost {
                document: &mut $page.document,
                observers: &mut $page.observers,
                watches: &mut $page.watches,
                timers: &mut $page.timers,
                viewport: $page.viewport,
                config: &$page.config,
            },
        )
    };
}

impl Page {
    /// Create a page with both embeds defined
    pub fn new(url: &str, config: EmbedConfig) -> Result<Self, EmbedError> {
        let mut document = Document::new(url);
        document.define(YOUTUBE_TAG, attrs::YOUTUBE_OBSERVED)?;
        document.define(VIMEO_TAG, attrs::VIMEO_OBSERVED)?;

        tracing::info!("page {} ready", url);
        Ok(Self {
            document,
            player_api: PlayerApiHandle::new(&config.player_api_url),
            config,
            preconnect: Rc::new(PreconnectRegistry::new()),
            observers: IntersectionObserverManager::new(),
            watches: HashMap::new(),
            timers: TimerManager::new(),
            viewport: Viewport::default(),
            layout: HashMap::new(),
            embeds: HashMap::new(),
            listeners: HashMap::new(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    pub fn preconnect(&self) -> &PreconnectRegistry {
        &self.preconnect
    }

    pub fn player_api(&self) -> &PlayerApiHandle {
        &self.player_api
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Page clock in milliseconds
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    pub fn embed(&self, node: NodeId) -> Option<&Embed> {
        self.embeds.get(&node)
    }

    pub fn youtube_component(&self, node: NodeId) -> Option<&LiteYouTube> {
        match self.embeds.get(&node) {
            Some(Embed::YouTube(yt)) => Some(yt),
            _ => None,
        }
    }

    pub fn vimeo_component(&self, node: NodeId) -> Option<&LiteVimeo> {
        match self.embeds.get(&node) {
            Some(Embed::Vimeo(vm)) => Some(vm),
            _ => None,
        }
    }

    // --- Element creation ---

    /// Append a `<lite-youtube>` with the given attributes to the body
    pub fn create_youtube(&mut self, attributes: &[(&str, &str)]) -> Result<NodeId, EmbedError> {
        self.create_embed(YOUTUBE_TAG, attributes)
    }

    /// Append a `<lite-vimeo>` with the given attributes to the body
    pub fn create_vimeo(&mut self, attributes: &[(&str, &str)]) -> Result<NodeId, EmbedError> {
        self.create_embed(VIMEO_TAG, attributes)
    }

    /// Create, connect and upgrade an element as a parser would: the
    /// attributes are in place before the component sees them
    fn create_embed(&mut self, tag: &str, attributes: &[(&str, &str)]) -> Result<NodeId, EmbedError> {
        let node = self.document.tree.create_element(tag);
        for (name, value) in attributes {
            self.document.tree.set_attribute(node, name, value)?;
        }
        let body = self.document.body();
        self.document.append_child(body, node)?;

        let preconnect = Rc::clone(&self.preconnect);
        let (embeds, mut ctx) = split!(self);
        let embed = match tag {
            YOUTUBE_TAG => Embed::YouTube(LiteYouTube::upgrade(node, &mut ctx, preconnect)?),
            _ => Embed::Vimeo(LiteVimeo::upgrade(node, &mut ctx, preconnect)?),
        };
        embeds.insert(node, embed);

        // Upgrade reports every observed attribute already present
        let present: Vec<(String, String)> = self
            .document
            .tree
            .element(node)
            .map(|el| {
                el.attrs
                    .iter()
                    .filter(|a| self.document.registry().is_observed(tag, &a.name))
                    .map(|a| (a.name.clone(), a.value.clone()))
                    .collect()
            })
            .unwrap_or_default();
        for (name, value) in present {
            self.attribute_changed(node, &name, None, Some(&value));
        }

        self.process_callbacks();
        Ok(node)
    }

    // --- Attributes ---

    /// Set an attribute, run any resulting `attributeChanged`, then let
    /// freshly armed observers report
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), EmbedError> {
        self.document.set_attribute(node, name, value)?;
        self.process_callbacks();
        self.update_intersections();
        Ok(())
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        self.document.remove_attribute(node, name);
        self.process_callbacks();
        self.update_intersections();
    }

    /// Set or remove a presence flag
    pub fn toggle_attribute(&mut self, node: NodeId, name: &str, on: bool) -> Result<(), EmbedError> {
        if on {
            self.set_attribute(node, name, "")
        } else {
            self.remove_attribute(node, name);
            Ok(())
        }
    }

    fn process_callbacks(&mut self) {
        for info in self.document.take_callbacks() {
            match info.callback {
                LifecycleCallback::Connected => self.connected(info.element_id),
                LifecycleCallback::AttributeChanged => {
                    let name = info.attribute_name.unwrap_or_default();
                    self.attribute_changed(
                        info.element_id,
                        &name,
                        info.old_value.as_deref(),
                        info.new_value.as_deref(),
                    );
                }
                LifecycleCallback::Disconnected => {}
            }
        }
    }

    fn connected(&mut self, node: NodeId) {
        if !self.embeds.contains_key(&node) {
            return;
        }

        let warm = self
            .document
            .add_event_listener(node, DomEventType::PointerOver, ListenerOptions::once());
        let click = self
            .document
            .add_event_listener(node, DomEventType::Click, ListenerOptions::default());
        self.listeners.insert(warm, (node, Action::Warm));
        self.listeners.insert(click, (node, Action::Activate));

        let (embeds, mut ctx) = split!(self);
        match embeds.get_mut(&node) {
            Some(Embed::YouTube(yt)) => yt.connected(&mut ctx),
            Some(Embed::Vimeo(vm)) => vm.connected(&mut ctx),
            None => {}
        }
    }

    fn attribute_changed(&mut self, node: NodeId, name: &str, old: Option<&str>, new: Option<&str>) {
        let (embeds, mut ctx) = split!(self);
        match embeds.get_mut(&node) {
            Some(Embed::YouTube(yt)) => yt.attribute_changed(&mut ctx, name, old, new),
            Some(Embed::Vimeo(vm)) => vm.attribute_changed(&mut ctx, name, old, new),
            None => {}
        }
    }

    // --- User input ---

    /// Click `target` (the host or anything in its shadow tree)
    pub fn click(&mut self, target: NodeId) {
        let mut event = DomEvent::new(DomEventType::Click, target);
        event.bubbles = true;
        self.dispatch_input(event);
    }

    /// Move the pointer over `target`
    pub fn pointer_over(&mut self, target: NodeId) {
        let mut event = DomEvent::new(DomEventType::PointerOver, target);
        event.bubbles = true;
        self.dispatch_input(event);
    }

    fn dispatch_input(&mut self, event: DomEvent) {
        let fired = self.document.dispatch_event(event.at(self.timers.now() as f64));
        for id in fired {
            let Some(&(node, action)) = self.listeners.get(&id) else {
                continue;
            };
            match action {
                Action::Warm => {
                    self.listeners.remove(&id);
                    self.warm(node);
                }
                Action::Activate => {
                    self.activate_with(node, Trigger::User);
                }
            }
        }
    }

    fn warm(&mut self, node: NodeId) {
        let (embeds, mut ctx) = split!(self);
        match embeds.get(&node) {
            Some(Embed::YouTube(yt)) => yt.warm(&mut ctx),
            Some(Embed::Vimeo(vm)) => vm.warm(&mut ctx),
            None => {}
        }
    }

    /// Programmatic load; plays like a click would
    pub fn activate(&mut self, node: NodeId) -> bool {
        self.activate_with(node, Trigger::User)
    }

    fn activate_with(&mut self, node: NodeId, trigger: Trigger) -> bool {
        let (embeds, mut ctx) = split!(self);
        match embeds.get_mut(&node) {
            Some(Embed::YouTube(yt)) => yt.activate(&mut ctx, trigger),
            Some(Embed::Vimeo(vm)) => vm.activate(&mut ctx, trigger),
            None => false,
        }
    }

    // --- Layout and visibility ---

    /// Resize or scroll the viewport, then deliver intersection changes
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.update_intersections();
    }

    /// Place an element, then deliver intersection changes
    pub fn set_layout(&mut self, node: NodeId, rect: DOMRect) {
        self.layout.insert(node, rect);
        self.update_intersections();
    }

    /// Run every observer against the current layout
    pub fn update_intersections(&mut self) {
        let now = self.timers.now() as f64;
        let results = self.observers.process(&self.viewport, &self.layout, now);

        for (observer, entries) in results {
            for entry in entries {
                let Some(watch) = self.watches.get(&observer).copied() else {
                    continue;
                };
                let (embeds, mut ctx) = split!(self);
                match (embeds.get_mut(&watch.target), watch.role) {
                    (Some(Embed::YouTube(yt)), WatchRole::Activate) => yt.on_visible(&mut ctx, observer, &entry),
                    (Some(Embed::YouTube(yt)), WatchRole::Pause) => yt.on_pause_watch(&mut ctx, &entry),
                    (Some(Embed::Vimeo(vm)), WatchRole::Activate) => vm.on_visible(&mut ctx, observer, &entry),
                    _ => {}
                }
            }
        }
    }

    // --- Time ---

    /// Advance the page clock and run due timers
    pub fn advance_time(&mut self, ms: u64) {
        for task in self.timers.advance(ms) {
            match task {
                Task::ShortAutoplay(node) => {
                    let (embeds, mut ctx) = split!(self);
                    if let Some(Embed::YouTube(yt)) = embeds.get_mut(&node) {
                        yt.on_short_autoplay(&mut ctx);
                    }
                }
            }
        }
    }

    // --- Players ---

    /// A player frame posted `data` back to the page
    pub fn deliver_player_message(&mut self, frame: NodeId, data: &str) {
        let (embeds, mut ctx) = split!(self);
        for embed in embeds.values_mut() {
            if let Embed::YouTube(yt) = embed {
                if yt.player().is_some_and(|p| p.frame() == frame) {
                    yt.on_player_message(&mut ctx, data);
                    return;
                }
            }
        }
        tracing::trace!("message from unbound frame {:?}", frame);
    }

    /// Load the player API (once per page) and bind players to every
    /// activated `events` embed; returns how many were bound
    pub async fn settle_players<L: ScriptLoader>(&mut self, loader: &L) -> Result<usize, EmbedError> {
        let waiting: Vec<NodeId> = self
            .embeds
            .iter()
            .filter_map(|(node, embed)| match embed {
                Embed::YouTube(yt) if yt.is_awaiting_player() => Some(*node),
                _ => None,
            })
            .collect();
        if waiting.is_empty() {
            return Ok(0);
        }

        let api = match self.player_api.get(loader).await {
            Ok(api) => api,
            Err(err) => {
                tracing::warn!("player API unavailable: {}", err);
                return Err(err);
            }
        };

        let (embeds, mut ctx) = split!(self);
        let mut bound = 0;
        for node in waiting {
            if let Some(Embed::YouTube(yt)) = embeds.get_mut(&node) {
                yt.bind_player(&mut ctx, api.as_ref());
                if yt.player().is_some() {
                    bound += 1;
                }
            }
        }
        Ok(bound)
    }

    /// Fetch and apply posters for every `lite-vimeo` that needs one.
    /// Failures leave that placeholder without a poster; the last one is
    /// returned after all requests ran.
    pub async fn settle_posters<S: MetadataSource>(&mut self, source: &S) -> Result<usize, EmbedError> {
        let requests: Vec<(NodeId, String)> = self
            .embeds
            .iter_mut()
            .filter_map(|(node, embed)| match embed {
                Embed::Vimeo(vm) => vm.take_poster_request().map(|id| (*node, id)),
                _ => None,
            })
            .collect();

        let mut applied = 0;
        let mut last_err = None;
        for (node, video_id) in requests {
            match resolve_posters(source, &video_id).await {
                Ok(posters) => {
                    let (embeds, mut ctx) = split!(self);
                    if let Some(Embed::Vimeo(vm)) = embeds.get_mut(&node) {
                        vm.apply_posters(&mut ctx, &posters);
                        applied += 1;
                    }
                }
                Err(err) => {
                    tracing::warn!("no poster for vimeo {}: {}", video_id, err);
                    last_err = Some(err);
                }
            }
        }

        match last_err {
            Some(err) => Err(err),
            None => Ok(applied),
        }
    }

    // --- Typed element access ---

    /// Typed accessor over a `<lite-youtube>`
    pub fn youtube(&mut self, node: NodeId) -> Option<YouTubeElement<'_>> {
        matches!(self.embeds.get(&node), Some(Embed::YouTube(_)))
            .then_some(YouTubeElement { page: self, node })
    }

    /// Typed accessor over a `<lite-vimeo>`
    pub fn vimeo(&mut self, node: NodeId) -> Option<VimeoElement<'_>> {
        matches!(self.embeds.get(&node), Some(Embed::Vimeo(_)))
            .then_some(VimeoElement { page: self, node })
    }
}

/// Typed view of a `<lite-youtube>`: getters read attributes with their
/// defaults, setters write attributes back
pub struct YouTubeElement<'a> {
    page: &'a mut Page,
    node: NodeId,
}

impl YouTubeElement<'_> {
    pub fn node(&self) -> NodeId {
        self.node
    }

    fn descriptor(&self) -> EmbedDescriptor {
        EmbedDescriptor::youtube(&self.page.document.tree, self.node)
    }

    fn component(&self) -> Option<&LiteYouTube> {
        self.page.youtube_component(self.node)
    }

    fn set(&mut self, name: &str, value: &str) {
        if let Err(err) = self.page.set_attribute(self.node, name, value) {
            tracing::warn!("could not set {}: {}", name, err);
        }
    }

    fn flag(&mut self, name: &str, on: bool) {
        if let Err(err) = self.page.toggle_attribute(self.node, name, on) {
            tracing::warn!("could not toggle {}: {}", name, err);
        }
    }

    pub fn video_id(&self) -> String {
        self.descriptor().video_id
    }

    pub fn set_video_id(&mut self, id: &str) {
        self.set(attrs::VIDEO_ID, id);
    }

    /// Empty when no playlist is set
    pub fn playlist_id(&self) -> String {
        self.descriptor().playlist_id.unwrap_or_default()
    }

    pub fn set_playlist_id(&mut self, id: &str) {
        self.set(attrs::PLAYLIST_ID, id);
    }

    pub fn video_title(&self) -> String {
        self.descriptor().video_title
    }

    pub fn set_video_title(&mut self, title: &str) {
        self.set(attrs::VIDEO_TITLE, title);
    }

    pub fn video_play(&self) -> String {
        self.descriptor().video_play
    }

    pub fn set_video_play(&mut self, label: &str) {
        self.set(attrs::VIDEO_PLAY, label);
    }

    pub fn video_start_at(&self) -> String {
        self.descriptor().video_start_at
    }

    pub fn set_video_start_at(&mut self, start: &str) {
        self.set(attrs::VIDEO_START_AT, start);
    }

    /// `start={videoStartAt}` plus any extra parameters
    pub fn params(&self) -> String {
        let desc = self.descriptor();
        match desc.params {
            Some(extra) => format!("start={}&{}", desc.video_start_at, extra),
            None => format!("start={}", desc.video_start_at),
        }
    }

    pub fn set_params(&mut self, params: &str) {
        self.set(attrs::PARAMS, params);
    }

    pub fn poster_quality(&self) -> String {
        self.descriptor().poster_quality
    }

    pub fn set_poster_quality(&mut self, quality: &str) {
        self.set(attrs::POSTER_QUALITY, quality);
    }

    pub fn poster_loading(&self) -> PosterLoading {
        self.descriptor().poster_loading
    }

    pub fn set_poster_loading(&mut self, loading: PosterLoading) {
        self.set(attrs::POSTER_LOADING, loading.as_str());
    }

    pub fn autoload(&self) -> bool {
        self.descriptor().autoload
    }

    pub fn set_autoload(&mut self, on: bool) {
        self.flag(attrs::AUTOLOAD, on);
    }

    pub fn autoplay(&self) -> bool {
        self.descriptor().autoplay
    }

    pub fn set_autoplay(&mut self, on: bool) {
        self.flag(attrs::AUTOPLAY, on);
    }

    pub fn short(&self) -> bool {
        self.descriptor().short
    }

    pub fn set_short(&mut self, on: bool) {
        self.flag(attrs::SHORT, on);
    }

    pub fn events(&self) -> bool {
        self.descriptor().events
    }

    pub fn set_events(&mut self, on: bool) {
        self.flag(attrs::EVENTS, on);
    }

    pub fn autopause(&self) -> bool {
        self.descriptor().autopause
    }

    pub fn set_autopause(&mut self, on: bool) {
        self.flag(attrs::AUTOPAUSE, on);
    }

    pub fn no_cookie(&self) -> bool {
        self.descriptor().nocookie
    }

    pub fn set_no_cookie(&mut self, on: bool) {
        self.flag(attrs::NOCOOKIE, on);
    }

    /// Host `title`, kept at `"{videoplay}: {videotitle}"`
    pub fn title(&self) -> Option<String> {
        self.page
            .document
            .tree
            .get_attribute(self.node, "title")
            .map(str::to_string)
    }

    pub fn is_activated(&self) -> bool {
        self.component().is_some_and(LiteYouTube::is_activated)
    }

    pub fn iframe(&self) -> Option<NodeId> {
        self.component().and_then(LiteYouTube::iframe)
    }

    /// `src` of the player frame, if activated
    pub fn iframe_src(&self) -> Option<String> {
        let iframe = self.iframe()?;
        self.page
            .document
            .tree
            .get_attribute(iframe, "src")
            .map(str::to_string)
    }

    /// Load the player now
    pub fn load(&mut self) -> bool {
        self.page.activate(self.node)
    }

    // Player controls; without a bound player they do nothing and the
    // getters return neutral values

    fn with_player<R>(&mut self, default: R, f: impl FnOnce(&mut dyn ManagedPlayer, &mut Document) -> R) -> R {
        let page = &mut *self.page;
        match page.embeds.get_mut(&self.node) {
            Some(Embed::YouTube(yt)) => match yt.player_mut() {
                Some(player) => f(player, &mut page.document),
                None => default,
            },
            _ => default,
        }
    }

    fn read_player<R>(&self, default: R, f: impl FnOnce(&dyn ManagedPlayer) -> R) -> R {
        self.component().and_then(LiteYouTube::player).map(f).unwrap_or(default)
    }

    /// Play, loading the player first if needed
    pub fn play(&mut self) -> bool {
        if !self.is_activated() {
            return self.load();
        }
        self.with_player(false, |p, doc| p.play(doc))
    }

    pub fn pause(&mut self) -> bool {
        self.with_player(false, |p, doc| p.pause(doc))
    }

    pub fn seek_to(&mut self, seconds: f64) -> bool {
        self.with_player(false, |p, doc| p.seek_to(doc, seconds, true))
    }

    pub fn set_volume(&mut self, volume: u8) -> bool {
        self.with_player(false, |p, doc| p.set_volume(doc, volume))
    }

    pub fn volume(&self) -> u8 {
        self.read_player(0, |p| p.volume())
    }

    pub fn mute(&mut self) -> bool {
        self.with_player(false, |p, doc| p.mute(doc))
    }

    pub fn unmute(&mut self) -> bool {
        self.with_player(false, |p, doc| p.unmute(doc))
    }

    pub fn is_muted(&self) -> bool {
        self.read_player(false, |p| p.is_muted())
    }

    pub fn set_playback_rate(&mut self, rate: f64) -> bool {
        self.with_player(false, |p, doc| p.set_playback_rate(doc, rate))
    }

    pub fn playback_rate(&self) -> f64 {
        self.read_player(1.0, |p| p.playback_rate())
    }

    /// NaN until a player reports a duration
    pub fn duration(&self) -> f64 {
        self.read_player(f64::NAN, |p| p.duration())
    }

    pub fn current_time(&self) -> f64 {
        self.read_player(0.0, |p| p.current_time())
    }

    pub fn player_state(&self) -> PlayerState {
        self.read_player(PlayerState::Unstarted, |p| p.state())
    }
}

/// Typed view of a `<lite-vimeo>`
pub struct VimeoElement<'a> {
    page: &'a mut Page,
    node: NodeId,
}

impl VimeoElement<'_> {
    pub fn node(&self) -> NodeId {
        self.node
    }

    fn descriptor(&self) -> EmbedDescriptor {
        EmbedDescriptor::vimeo(&self.page.document.tree, self.node)
    }

    fn component(&self) -> Option<&LiteVimeo> {
        self.page.vimeo_component(self.node)
    }

    fn set(&mut self, name: &str, value: &str) {
        if let Err(err) = self.page.set_attribute(self.node, name, value) {
            tracing::warn!("could not set {}: {}", name, err);
        }
    }

    fn flag(&mut self, name: &str, on: bool) {
        if let Err(err) = self.page.toggle_attribute(self.node, name, on) {
            tracing::warn!("could not toggle {}: {}", name, err);
        }
    }

    pub fn video_id(&self) -> String {
        self.descriptor().video_id
    }

    pub fn set_video_id(&mut self, id: &str) {
        self.set(attrs::VIDEO_ID, id);
    }

    pub fn video_title(&self) -> String {
        self.descriptor().video_title
    }

    pub fn set_video_title(&mut self, title: &str) {
        self.set(attrs::VIDEO_TITLE, title);
    }

    pub fn video_play(&self) -> String {
        self.descriptor().video_play
    }

    pub fn set_video_play(&mut self, label: &str) {
        self.set(attrs::VIDEO_PLAY, label);
    }

    /// `0s` unless set
    pub fn video_start_at(&self) -> String {
        self.descriptor().video_start_at
    }

    pub fn set_video_start_at(&mut self, start: &str) {
        self.set(attrs::VIDEO_START_AT, start);
    }

    pub fn autoload(&self) -> bool {
        self.descriptor().autoload
    }

    pub fn set_autoload(&mut self, on: bool) {
        self.flag(attrs::AUTOLOAD, on);
    }

    pub fn autoplay(&self) -> bool {
        self.descriptor().autoplay
    }

    pub fn set_autoplay(&mut self, on: bool) {
        self.flag(attrs::AUTOPLAY, on);
    }

    pub fn is_activated(&self) -> bool {
        self.component().is_some_and(LiteVimeo::is_activated)
    }

    pub fn iframe(&self) -> Option<NodeId> {
        self.component().and_then(LiteVimeo::iframe)
    }

    pub fn iframe_src(&self) -> Option<String> {
        let iframe = self.iframe()?;
        self.page
            .document
            .tree
            .get_attribute(iframe, "src")
            .map(str::to_string)
    }

    /// Video id whose poster is still to be fetched
    pub fn pending_poster(&self) -> Option<String> {
        self.component()
            .and_then(LiteVimeo::pending_poster)
            .map(str::to_string)
    }

    /// Load the player now
    pub fn load(&mut self) -> bool {
        self.page.activate(self.node)
    }
}

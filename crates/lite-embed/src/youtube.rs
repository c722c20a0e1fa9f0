//! `<lite-youtube>`
//!
//! Shows a poster and play button until the user clicks (or, with
//! `autoload`, until the element scrolls into view), then swaps in the
//! YouTube player iframe.
//!
//! States: idle (no `iframe`) and activated (`iframe` present). Activation
//! is idempotent. Changing `videoid` or `playlistid` while activated tears
//! the player down and returns to idle.

use std::rc::Rc;

use lite_dom::{
    DomError, DomEvent, EventDetail, IntersectionObserverEntry, IntersectionObserverOptions,
    NodeId, ObserverId, get_outer_html,
};

use crate::attrs::{self, EmbedDescriptor};
use crate::embed_url::{Trigger, YouTubeUrlOptions, youtube_embed_url};
use crate::encode::encode_uri_component;
use crate::host::{EmbedHost, Task, WatchRole};
use crate::placeholder::{self, PosterUrls};
use crate::player::{FrameCommand, ManagedPlayer, PlayerApi};
use crate::preconnect::PreconnectRegistry;
use crate::template::{self, ShadowRefs};
use crate::timers::TimerId;

/// Custom event fired once per activation, detail `{ videoId }` (encoded
/// as in the player URL)
pub const LOADED_EVENT: &str = "liteYoutubeIframeLoaded";

const IFRAME_ALLOW: &str = "accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture";

/// Build a detached player `<iframe>`
pub(crate) fn create_iframe(
    doc: &mut lite_dom::Document,
    title: &str,
    src: &str,
    allow: &str,
) -> Result<NodeId, DomError> {
    let iframe = doc.tree.create_element("iframe");
    doc.tree.set_attribute(iframe, "credentialless", "")?;
    doc.tree.set_attribute(iframe, "frameborder", "0")?;
    doc.tree.set_attribute(iframe, "title", title)?;
    doc.tree.set_attribute(iframe, "allow", allow)?;
    doc.tree.set_attribute(iframe, "allowfullscreen", "")?;
    doc.tree.set_attribute(iframe, "src", src)?;
    Ok(iframe)
}

/// A `<lite-youtube>` element's behavior
pub struct LiteYouTube {
    host: NodeId,
    refs: ShadowRefs,
    preconnect: Rc<PreconnectRegistry>,
    /// Player frame; `Some` exactly while activated
    iframe: Option<NodeId>,
    noscript: Option<NodeId>,
    visibility_watch: Option<ObserverId>,
    pause_watch: Option<ObserverId>,
    short_timer: Option<TimerId>,
    player: Option<Box<dyn ManagedPlayer>>,
    awaiting_player: bool,
    set_up: bool,
}

impl LiteYouTube {
    /// Attach the shadow skeleton to `host`
    pub(crate) fn upgrade(
        host: NodeId,
        ctx: &mut EmbedHost<'_>,
        preconnect: Rc<PreconnectRegistry>,
    ) -> Result<Self, DomError> {
        let refs = template::build_youtube(ctx.document, host, ctx.config.nonce.as_deref())?;
        tracing::debug!("upgraded <lite-youtube> {:?}", host);
        Ok(Self {
            host,
            refs,
            preconnect,
            iframe: None,
            noscript: None,
            visibility_watch: None,
            pause_watch: None,
            short_timer: None,
            player: None,
            awaiting_player: false,
            set_up: false,
        })
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn shadow(&self) -> &ShadowRefs {
        &self.refs
    }

    pub fn is_activated(&self) -> bool {
        self.iframe.is_some()
    }

    pub fn iframe(&self) -> Option<NodeId> {
        self.iframe
    }

    pub fn noscript(&self) -> Option<NodeId> {
        self.noscript
    }

    pub fn player(&self) -> Option<&dyn ManagedPlayer> {
        self.player.as_deref()
    }

    pub fn player_mut(&mut self) -> Option<&mut (dyn ManagedPlayer + 'static)> {
        self.player.as_deref_mut()
    }

    /// Activated in `events` mode with no player bound yet
    pub fn is_awaiting_player(&self) -> bool {
        self.awaiting_player
    }

    fn is_short(&self, desc: &EmbedDescriptor, ctx: &EmbedHost<'_>) -> bool {
        desc.short && ctx.viewport.matches(ctx.config.short_query())
    }

    /// Render posters and labels from the current attributes, arm the
    /// visibility watch if wanted, and refresh the noscript fallback
    pub(crate) fn setup_component(&mut self, ctx: &mut EmbedHost<'_>) {
        let desc = EmbedDescriptor::youtube(&ctx.document.tree, self.host);

        let posters = PosterUrls::youtube(&desc.video_id, &desc.poster_quality);
        placeholder::apply_loading(ctx.document, &self.refs, desc.poster_loading);
        placeholder::apply_posters(ctx.document, &self.refs, &posters);
        placeholder::apply_labels(ctx.document, &self.refs, self.host, &desc.label());

        if desc.autoload || self.is_short(&desc, ctx) || desc.autopause {
            self.arm_visibility_watch(ctx);
        }
        self.inject_noscript(ctx, &desc);
        self.set_up = true;
    }

    pub(crate) fn connected(&mut self, ctx: &mut EmbedHost<'_>) {
        if !self.set_up {
            self.setup_component(ctx);
        }
    }

    pub(crate) fn attribute_changed(
        &mut self,
        ctx: &mut EmbedHost<'_>,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) {
        if old == new {
            return;
        }
        tracing::debug!("{:?} {}: {:?} -> {:?}", self.host, name, old, new);

        if attrs::IDENTITY_ATTRIBUTES.contains(&name) && self.is_activated() {
            self.teardown(ctx);
        }
        self.setup_component(ctx);
    }

    fn arm_visibility_watch(&mut self, ctx: &mut EmbedHost<'_>) {
        if self.is_activated() {
            return;
        }
        if let Some(id) = self.visibility_watch {
            if ctx.is_watching(id, self.host) {
                return;
            }
        }
        let id = ctx.watch(self.host, IntersectionObserverOptions::default(), WatchRole::Activate);
        self.visibility_watch = Some(id);
    }

    /// Keep one `<noscript>` with a passive player as the first light-DOM
    /// child
    fn inject_noscript(&mut self, ctx: &mut EmbedHost<'_>, desc: &EmbedDescriptor) {
        if let Some(old) = self.noscript.take() {
            ctx.document.tree.detach(old);
        }

        let src = youtube_embed_url(desc, YouTubeUrlOptions::default());
        let result = create_iframe(ctx.document, &desc.video_title, &src, IFRAME_ALLOW).and_then(|iframe| {
            let markup = get_outer_html(&ctx.document.tree, iframe);
            let noscript = ctx.document.tree.create_element("noscript");
            ctx.document.tree.set_text_content(noscript, &markup)?;
            ctx.document.tree.prepend_child(self.host, noscript)?;
            Ok(noscript)
        });

        match result {
            Ok(noscript) => self.noscript = Some(noscript),
            Err(err) => tracing::warn!("noscript fallback skipped: {}", err),
        }
    }

    /// Preconnect to the player's origins (once per page)
    pub(crate) fn warm(&self, ctx: &mut EmbedHost<'_>) {
        let nocookie = ctx.document.tree.has_attribute(self.host, attrs::NOCOOKIE);
        if let Err(err) = self.preconnect.warm_youtube(ctx.document, nocookie) {
            tracing::warn!("preconnect failed: {}", err);
        }
    }

    /// Materialize the player; a no-op when already activated
    pub(crate) fn activate(&mut self, ctx: &mut EmbedHost<'_>, trigger: Trigger) -> bool {
        if self.is_activated() {
            tracing::trace!("{:?} already activated", self.host);
            return false;
        }

        let desc = EmbedDescriptor::youtube(&ctx.document.tree, self.host);
        let short = self.is_short(&desc, ctx);
        let src = youtube_embed_url(
            &desc,
            YouTubeUrlOptions {
                autoplay: trigger.autoplay(&desc),
                short,
            },
        );

        let frame = self.refs.frame;
        let inserted = create_iframe(ctx.document, &desc.video_title, &src, IFRAME_ALLOW).and_then(|iframe| {
            ctx.document.append_child(frame, iframe)?;
            Ok(iframe)
        });
        let iframe = match inserted {
            Ok(iframe) => iframe,
            Err(err) => {
                tracing::warn!("player frame not inserted: {}", err);
                return false;
            }
        };

        if let Some(el) = ctx.document.tree.element_mut(frame) {
            el.add_class(self.refs.activated_class);
        }
        self.iframe = Some(iframe);
        tracing::info!("activated {:?} via {:?}: {}", self.host, trigger, src);

        if short {
            let delay = ctx.config.short_autoplay_delay_ms;
            self.short_timer = Some(ctx.timers.set_timeout(Task::ShortAutoplay(self.host), delay));
        }
        if desc.autopause && self.pause_watch.is_none() {
            let id = ctx.watch(
                self.host,
                IntersectionObserverOptions::with_threshold(1.0),
                WatchRole::Pause,
            );
            self.pause_watch = Some(id);
        }
        if desc.events {
            self.awaiting_player = true;
        }

        ctx.dispatch(DomEvent::custom(
            LOADED_EVENT,
            self.host,
            EventDetail::new().with("videoId", &encode_uri_component(&desc.video_id)),
        ));
        true
    }

    /// Remove the player and go back to idle
    fn teardown(&mut self, ctx: &mut EmbedHost<'_>) {
        if let Some(iframe) = self.iframe.take() {
            ctx.document.tree.detach(iframe);
        }
        if let Some(el) = ctx.document.tree.element_mut(self.refs.frame) {
            el.remove_class(self.refs.activated_class);
        }
        if let Some(timer) = self.short_timer.take() {
            ctx.timers.clear(timer);
        }
        self.player = None;
        self.awaiting_player = false;
        tracing::info!("reset {:?} to idle", self.host);
    }

    /// Activation watch: load passively on first sight, then stop watching
    pub(crate) fn on_visible(&mut self, ctx: &mut EmbedHost<'_>, watch: ObserverId, entry: &IntersectionObserverEntry) {
        if !entry.is_intersecting {
            return;
        }
        if !self.is_activated() {
            self.warm(ctx);
            self.activate(ctx, Trigger::Visibility);
        }
        ctx.unwatch(watch);
        if self.visibility_watch == Some(watch) {
            self.visibility_watch = None;
        }
    }

    /// Pause watch: anything short of fully visible pauses the player
    pub(crate) fn on_pause_watch(&mut self, ctx: &mut EmbedHost<'_>, entry: &IntersectionObserverEntry) {
        if entry.intersection_ratio >= 1.0 {
            return;
        }
        if let Some(iframe) = self.iframe {
            if FrameCommand::bare("pauseVideo").post(ctx.document, iframe) {
                tracing::debug!("paused {:?} (ratio {:.2})", self.host, entry.intersection_ratio);
            }
        }
    }

    /// Short-form nudge once the frame had time to boot
    pub(crate) fn on_short_autoplay(&mut self, ctx: &mut EmbedHost<'_>) {
        self.short_timer = None;
        if let Some(iframe) = self.iframe {
            FrameCommand::bare("playVideo").post(ctx.document, iframe);
        }
    }

    /// Bind a managed player to the activated frame
    pub(crate) fn bind_player(&mut self, ctx: &mut EmbedHost<'_>, api: &dyn PlayerApi) {
        let Some(iframe) = self.iframe.filter(|_| self.awaiting_player) else {
            return;
        };
        self.player = Some(api.create_player(ctx.document, iframe));
        self.awaiting_player = false;
        tracing::info!("player bound to {:?}", self.host);
    }

    /// Route a message from the player frame and re-dispatch media events
    pub(crate) fn on_player_message(&mut self, ctx: &mut EmbedHost<'_>, data: &str) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        for event in player.handle_message(data) {
            if let Some(event_type) = event.dom_event() {
                ctx.dispatch(DomEvent::new(event_type, self.host));
            }
        }
    }
}

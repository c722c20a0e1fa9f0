//! `<lite-vimeo>`
//!
//! Same placeholder-then-iframe flow as `<lite-youtube>`, but the poster
//! has to be looked up: the video's metadata names a thumbnail whose image
//! id keys the CDN poster URLs.

use std::rc::Rc;

use lite_dom::{DomError, IntersectionObserverEntry, IntersectionObserverOptions, NodeId, ObserverId};
use serde::Deserialize;

use crate::EmbedError;
use crate::attrs::{self, EmbedDescriptor};
use crate::embed_url::{Trigger, vimeo_player_url};
use crate::host::{EmbedHost, WatchRole};
use crate::placeholder::{self, PosterUrls};
use crate::preconnect::PreconnectRegistry;
use crate::template::{self, ShadowRefs};
use crate::youtube::create_iframe;

const IFRAME_ALLOW: &str = "accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture";

/// One entry of `https://vimeo.com/api/v2/video/{id}.json`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VimeoVideo {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    pub thumbnail_large: String,
}

/// Source of Vimeo video metadata
#[allow(async_fn_in_trait)]
pub trait MetadataSource {
    async fn fetch(&self, video_id: &str) -> Result<Vec<VimeoVideo>, EmbedError>;
}

/// Fetches metadata from the Vimeo v2 API
#[derive(Debug, Clone)]
pub struct HttpMetadataSource {
    base: String,
    user_agent: String,
}

impl HttpMetadataSource {
    pub fn new(base: &str, user_agent: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    pub fn metadata_url(&self, video_id: &str) -> String {
        format!(
            "{}/{}.json",
            self.base,
            crate::encode::encode_uri_component(video_id)
        )
    }
}

impl MetadataSource for HttpMetadataSource {
    async fn fetch(&self, video_id: &str) -> Result<Vec<VimeoVideo>, EmbedError> {
        crate::net::fetch_json(&self.metadata_url(video_id), &self.user_agent).await
    }
}

/// Resolve the poster URLs for a video
pub async fn resolve_posters<S: MetadataSource>(source: &S, video_id: &str) -> Result<PosterUrls, EmbedError> {
    let videos = source.fetch(video_id).await?;
    let video = videos
        .first()
        .ok_or_else(|| EmbedError::Metadata(format!("no entry for video {}", video_id)))?;
    let image_id = placeholder::vimeo_image_id(&video.thumbnail_large)
        .ok_or_else(|| EmbedError::Metadata(format!("unusable thumbnail {}", video.thumbnail_large)))?;
    Ok(PosterUrls::vimeo(image_id))
}

/// A `<lite-vimeo>` element's behavior
pub struct LiteVimeo {
    host: NodeId,
    refs: ShadowRefs,
    preconnect: Rc<PreconnectRegistry>,
    iframe: Option<NodeId>,
    visibility_watch: Option<ObserverId>,
    /// Video id whose poster still has to be fetched
    poster_request: Option<String>,
    set_up: bool,
}

impl LiteVimeo {
    pub(crate) fn upgrade(
        host: NodeId,
        ctx: &mut EmbedHost<'_>,
        preconnect: Rc<PreconnectRegistry>,
    ) -> Result<Self, DomError> {
        let refs = template::build_vimeo(ctx.document, host, ctx.config.nonce.as_deref())?;
        tracing::debug!("upgraded <lite-vimeo> {:?}", host);
        Ok(Self {
            host,
            refs,
            preconnect,
            iframe: None,
            visibility_watch: None,
            poster_request: None,
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

    /// Video id waiting for poster resolution
    pub fn pending_poster(&self) -> Option<&str> {
        self.poster_request.as_deref()
    }

    pub(crate) fn setup_component(&mut self, ctx: &mut EmbedHost<'_>) {
        let desc = EmbedDescriptor::vimeo(&ctx.document.tree, self.host);

        placeholder::apply_labels(ctx.document, &self.refs, self.host, &desc.label());
        self.poster_request = Some(desc.video_id.clone());

        if desc.autoload && !self.is_activated() {
            let armed = match self.visibility_watch {
                Some(id) => ctx.is_watching(id, self.host),
                None => false,
            };
            if !armed {
                let id = ctx.watch(self.host, IntersectionObserverOptions::default(), WatchRole::Activate);
                self.visibility_watch = Some(id);
            }
        }
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
        if old == new || name != attrs::VIDEO_ID {
            return;
        }
        tracing::debug!("{:?} {}: {:?} -> {:?}", self.host, name, old, new);

        if self.is_activated() {
            self.teardown(ctx);
        }
        self.setup_component(ctx);
    }

    pub(crate) fn warm(&self, ctx: &mut EmbedHost<'_>) {
        if let Err(err) = self.preconnect.warm_vimeo(ctx.document) {
            tracing::warn!("preconnect failed: {}", err);
        }
    }

    pub(crate) fn activate(&mut self, ctx: &mut EmbedHost<'_>, trigger: Trigger) -> bool {
        if self.is_activated() {
            tracing::trace!("{:?} already activated", self.host);
            return false;
        }

        let desc = EmbedDescriptor::vimeo(&ctx.document.tree, self.host);
        let src = match vimeo_player_url(&desc.video_id, &desc.video_start_at, trigger.autoplay(&desc)) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!("no player URL for {:?}: {}", self.host, err);
                return false;
            }
        };

        let frame = self.refs.frame;
        let inserted = create_iframe(ctx.document, &desc.video_title, src.as_str(), IFRAME_ALLOW).and_then(|iframe| {
            ctx.document.tree.remove_attribute(iframe, "credentialless");
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
        true
    }

    fn teardown(&mut self, ctx: &mut EmbedHost<'_>) {
        if let Some(iframe) = self.iframe.take() {
            ctx.document.tree.detach(iframe);
        }
        if let Some(el) = ctx.document.tree.element_mut(self.refs.frame) {
            el.remove_class(self.refs.activated_class);
        }
        tracing::info!("reset {:?} to idle", self.host);
    }

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

    /// Take the pending poster request, if any
    pub(crate) fn take_poster_request(&mut self) -> Option<String> {
        self.poster_request.take()
    }

    /// Apply resolved posters, even if the video id changed meanwhile
    pub(crate) fn apply_posters(&mut self, ctx: &mut EmbedHost<'_>, posters: &PosterUrls) {
        placeholder::apply_posters(ctx.document, &self.refs, posters);
        let label = EmbedDescriptor::vimeo(&ctx.document.tree, self.host).label();
        placeholder::apply_labels(ctx.document, &self.refs, self.host, &label);
    }
}

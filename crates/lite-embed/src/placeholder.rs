//! Placeholder posters and labels

use lite_dom::{Document, NodeId};

use crate::attrs::PosterLoading;
use crate::encode::encode_uri_component;
use crate::template::ShadowRefs;

/// Modern and fallback poster candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterUrls {
    pub webp: String,
    pub jpeg: String,
}

impl PosterUrls {
    /// YouTube thumbnails keyed by video id and quality tier
    pub fn youtube(video_id: &str, quality: &str) -> Self {
        let id = encode_uri_component(video_id);
        Self {
            webp: format!("https://i.ytimg.com/vi_webp/{}/{}.webp", id, quality),
            jpeg: format!("https://i.ytimg.com/vi/{}/{}.jpg", id, quality),
        }
    }

    /// Vimeo CDN images keyed by the thumbnail's image id
    pub fn vimeo(image_id: &str) -> Self {
        Self {
            webp: format!("https://i.vimeocdn.com/video/{}.webp?mw=1100&mh=619&q=70", image_id),
            jpeg: format!("https://i.vimeocdn.com/video/{}.jpg?mw=1100&mh=619&q=70", image_id),
        }
    }
}

/// Image id from a Vimeo thumbnail URL: the last path segment up to the
/// first `_` (`.../video/819916979_640.jpg` gives `819916979`)
pub fn vimeo_image_id(thumbnail_url: &str) -> Option<&str> {
    let segment = thumbnail_url.rsplit('/').next()?;
    let id = segment.split('_').next()?;
    // A segment without `_` still carries its extension
    let id = id.split('.').next()?;
    (!id.is_empty()).then_some(id)
}

/// Point the poster sources at `posters`
pub fn apply_posters(doc: &mut Document, refs: &ShadowRefs, posters: &PosterUrls) {
    set(doc, refs.webp, "srcset", &posters.webp);
    set(doc, refs.jpeg, "srcset", &posters.jpeg);
    set(doc, refs.fallback, "src", &posters.jpeg);
}

/// Write the accessible label onto the poster, button and host
pub fn apply_labels(doc: &mut Document, refs: &ShadowRefs, host: NodeId, label: &str) {
    set(doc, refs.fallback, "aria-label", label);
    set(doc, refs.fallback, "alt", label);
    set(doc, refs.play_button, "aria-label", label);
    set(doc, host, "title", label);
}

pub fn apply_loading(doc: &mut Document, refs: &ShadowRefs, loading: PosterLoading) {
    set(doc, refs.fallback, "loading", loading.as_str());
}

/// Shadow nodes that went missing are skipped
fn set(doc: &mut Document, node: NodeId, name: &str, value: &str) {
    if let Err(err) = doc.set_attribute(node, name, value) {
        tracing::trace!("skipped {} on {:?}: {}", name, node, err);
    }
}

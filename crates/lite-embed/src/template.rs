//! Shadow tree skeletons
//!
//! Builds the placeholder markup each embed renders into its shadow root
//! and hands back the nodes the component updates later.

use lite_dom::{Document, DomError, NodeId, ShadowRootMode};

const YOUTUBE_STYLE: &str = r#"
:host {
  --aspect-ratio: var(--lite-youtube-aspect-ratio, 16 / 9);
  --aspect-ratio-short: var(--lite-youtube-aspect-ratio-short, 9 / 16);
  --frame-shadow-visible: var(--lite-youtube-frame-shadow-visible, yes);
  contain: content;
  display: block;
  position: relative;
  width: 100%;
  aspect-ratio: var(--aspect-ratio);
}
@media (max-width: 40em) {
  :host([short]) {
    aspect-ratio: var(--aspect-ratio-short);
  }
}
#frame, #fallbackPlaceholder, iframe {
  position: absolute;
  width: 100%;
  height: 100%;
  left: 0;
}
#frame {
  cursor: pointer;
}
#fallbackPlaceholder {
  object-fit: cover;
}
@container style(--frame-shadow-visible: yes) {
  #frame::before {
    content: '';
    display: block;
    position: absolute;
    top: 0;
    background-image: linear-gradient(180deg, #111 -20%, transparent 90%);
    height: 60px;
    width: 100%;
    z-index: 1;
  }
}
#playButton {
  width: 68px;
  height: 48px;
  background-color: transparent;
  background-image: url('data:image/svg+xml;utf8,<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 68 48"><path d="M66.52 7.74c-.78-2.93-2.49-5.41-5.42-6.19C55.79.13 34 0 34 0S12.21.13 6.9 1.55c-2.93.78-4.63 3.26-5.42 6.19C.06 13.05 0 24 0 24s.06 10.95 1.48 16.26c.78 2.93 2.49 5.41 5.42 6.19C12.21 47.87 34 48 34 48s21.79-.13 27.1-1.55c2.93-.78 4.64-3.26 5.42-6.19C67.94 34.95 68 24 68 24s-.06-10.95-1.48-16.26z" fill="red"/><path d="M45 24 27 14v20" fill="white"/></svg>');
  z-index: 1;
  border: 0;
  border-radius: inherit;
}
#playButton:before {
  content: '';
  border-style: solid;
  border-width: 11px 0 11px 19px;
  border-color: transparent transparent transparent #fff;
}
#playButton,
#playButton:before {
  position: absolute;
  top: 50%;
  left: 50%;
  transform: translate3d(-50%, -50%, 0);
  cursor: inherit;
}
.activated {
  cursor: unset;
}
#frame.activated::before,
#frame.activated > #playButton {
  display: none;
}
"#;

const VIMEO_STYLE: &str = r#"
:host {
  contain: content;
  display: block;
  position: relative;
  width: 100%;
  padding-bottom: calc(100% / (16 / 9));
}
#frame, #fallbackPlaceholder, iframe {
  position: absolute;
  width: 100%;
  height: 100%;
}
#frame {
  cursor: pointer;
}
#fallbackPlaceholder {
  object-fit: cover;
}
.lvo-playbtn {
  width: 6.5em;
  height: 4em;
  background: rgba(23, 35, 34, .75);
  z-index: 1;
  opacity: .8;
  border-radius: .5em;
  transition: all .2s cubic-bezier(0, 0, .2, 1);
  outline: 0;
  border: 0;
  cursor: pointer;
}
#frame:hover .lvo-playbtn {
  background-color: rgb(0, 173, 239);
  opacity: 1;
}
.lvo-playbtn:before {
  content: '';
  border-style: solid;
  border-width: 10px 0 10px 20px;
  border-color: transparent transparent transparent #fff;
}
.lvo-playbtn,
.lvo-playbtn:before {
  position: absolute;
  top: 50%;
  left: 50%;
  transform: translate3d(-50%, -50%, 0);
}
.lvo-activated {
  cursor: unset;
}
#frame.lvo-activated::before,
.lvo-activated .lvo-playbtn {
  display: none;
}
"#;

/// Shadow nodes an embed keeps handles to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowRefs {
    /// Shadow root node
    pub root: NodeId,
    pub frame: NodeId,
    pub webp: NodeId,
    pub jpeg: NodeId,
    pub fallback: NodeId,
    pub play_button: NodeId,
    /// Class put on `#frame` once the player exists
    pub activated_class: &'static str,
}

fn element(doc: &mut Document, tag: &str, attrs: &[(&str, &str)]) -> Result<NodeId, DomError> {
    let id = doc.tree.create_element(tag);
    for (name, value) in attrs {
        doc.tree.set_attribute(id, name, value)?;
    }
    Ok(id)
}

fn style(doc: &mut Document, css: &str, nonce: Option<&str>) -> Result<NodeId, DomError> {
    let style = element(doc, "style", &[])?;
    if let Some(nonce) = nonce {
        doc.tree.set_attribute(style, "nonce", nonce)?;
    }
    doc.tree.set_text_content(style, css)?;
    Ok(style)
}

/// `lite-youtube` shadow tree:
/// `<style>`, `#frame > picture > slot[name=image] > source, source, img`
/// and `button#playButton`
pub fn build_youtube(doc: &mut Document, host: NodeId, nonce: Option<&str>) -> Result<ShadowRefs, DomError> {
    let root = doc.attach_shadow(host, ShadowRootMode::Open)?;

    let style = style(doc, YOUTUBE_STYLE, nonce)?;
    let frame = element(doc, "div", &[("id", "frame")])?;
    let picture = element(doc, "picture", &[])?;
    let slot = element(doc, "slot", &[("name", "image")])?;
    let webp = element(doc, "source", &[("id", "webpPlaceholder"), ("type", "image/webp")])?;
    let jpeg = element(doc, "source", &[("id", "jpegPlaceholder"), ("type", "image/jpeg")])?;
    let fallback = element(
        doc,
        "img",
        &[("id", "fallbackPlaceholder"), ("referrerpolicy", "origin"), ("loading", "lazy")],
    )?;
    let play_button = element(doc, "button", &[("id", "playButton")])?;

    doc.tree.append_child(root, style)?;
    doc.tree.append_child(root, frame)?;
    doc.tree.append_child(frame, picture)?;
    doc.tree.append_child(picture, slot)?;
    doc.tree.append_child(slot, webp)?;
    doc.tree.append_child(slot, jpeg)?;
    doc.tree.append_child(slot, fallback)?;
    doc.tree.append_child(frame, play_button)?;

    Ok(ShadowRefs {
        root,
        frame,
        webp,
        jpeg,
        fallback,
        play_button,
        activated_class: "activated",
    })
}

/// `lite-vimeo` shadow tree: no image slot, a sized async-decoded poster
/// and a `.lvo-playbtn` button
pub fn build_vimeo(doc: &mut Document, host: NodeId, nonce: Option<&str>) -> Result<ShadowRefs, DomError> {
    let root = doc.attach_shadow(host, ShadowRootMode::Open)?;

    let style = style(doc, VIMEO_STYLE, nonce)?;
    let frame = element(doc, "div", &[("id", "frame")])?;
    let picture = element(doc, "picture", &[])?;
    let webp = element(doc, "source", &[("id", "webpPlaceholder"), ("type", "image/webp")])?;
    let jpeg = element(doc, "source", &[("id", "jpegPlaceholder"), ("type", "image/jpeg")])?;
    let fallback = element(
        doc,
        "img",
        &[
            ("id", "fallbackPlaceholder"),
            ("referrerpolicy", "origin"),
            ("width", "1100"),
            ("height", "619"),
            ("decoding", "async"),
            ("loading", "lazy"),
        ],
    )?;
    let play_button = element(doc, "button", &[("class", "lvo-playbtn")])?;

    doc.tree.append_child(root, style)?;
    doc.tree.append_child(root, frame)?;
    doc.tree.append_child(frame, picture)?;
    doc.tree.append_child(picture, webp)?;
    doc.tree.append_child(picture, jpeg)?;
    doc.tree.append_child(picture, fallback)?;
    doc.tree.append_child(frame, play_button)?;

    Ok(ShadowRefs {
        root,
        frame,
        webp,
        jpeg,
        fallback,
        play_button,
        activated_class: "lvo-activated",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_skeleton() {
        let mut doc = Document::default();
        let host = doc.tree.create_element("lite-youtube");
        let refs = build_youtube(&mut doc, host, None).unwrap();

        assert_eq!(doc.shadow_element_by_id(host, "frame"), Some(refs.frame));
        assert_eq!(doc.shadow_element_by_id(host, "playButton"), Some(refs.play_button));
        assert_eq!(doc.tree.get_attribute(refs.fallback, "loading"), Some("lazy"));
        assert_eq!(doc.tree.tag_name(doc.tree.parent(refs.webp).unwrap()), Some("slot"));

        let style = doc.tree.first_by_tag(refs.root, "style").unwrap();
        assert!(!doc.tree.has_attribute(style, "nonce"));
    }

    #[test]
    fn test_style_nonce() {
        let mut doc = Document::default();
        let host = doc.tree.create_element("lite-youtube");
        let refs = build_youtube(&mut doc, host, Some("r4nd0m")).unwrap();

        let style = doc.tree.first_by_tag(refs.root, "style").unwrap();
        assert_eq!(doc.tree.get_attribute(style, "nonce"), Some("r4nd0m"));
        assert!(doc.tree.text_content(style).contains("--lite-youtube-aspect-ratio"));
    }

    #[test]
    fn test_vimeo_skeleton() {
        let mut doc = Document::default();
        let host = doc.tree.create_element("lite-vimeo");
        let refs = build_vimeo(&mut doc, host, None).unwrap();

        assert_eq!(refs.activated_class, "lvo-activated");
        assert_eq!(doc.tree.get_attribute(refs.fallback, "width"), Some("1100"));
        assert!(doc.tree.element(refs.play_button).unwrap().has_class("lvo-playbtn"));
    }

    #[test]
    fn test_second_build_fails() {
        let mut doc = Document::default();
        let host = doc.tree.create_element("lite-youtube");
        build_youtube(&mut doc, host, None).unwrap();
        assert_eq!(
            build_youtube(&mut doc, host, None),
            Err(DomError::ShadowAlreadyAttached(host))
        );
    }
}

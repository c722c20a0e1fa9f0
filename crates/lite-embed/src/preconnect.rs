//! Connection warm-up
//!
//! One registry per page, shared by every embed on it. Each provider's
//! origins are preconnected at most once; the flags are never cleared.

use std::cell::Cell;

use lite_dom::{Document, DomError, NodeId};

/// Video provider whose origins are warmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    YouTube,
    Vimeo,
}

/// Origins a YouTube player loads from
pub fn youtube_origins(nocookie: bool) -> Vec<&'static str> {
    // Poster images, then the player's script host
    let mut origins = vec!["https://i.ytimg.com/", "https://s.ytimg.com"];
    if nocookie {
        origins.push("https://www.youtube-nocookie.com");
    } else {
        origins.extend([
            "https://www.youtube.com",
            "https://www.google.com",
            "https://googleads.g.doubleclick.net",
            "https://static.doubleclick.net",
        ]);
    }
    origins
}

/// Origins a Vimeo player loads from
pub const VIMEO_ORIGINS: &[&str] = &[
    "https://f.vimeocdn.com",
    "https://player.vimeo.com",
    "https://i.vimeocdn.com",
];

/// Page-wide warm-up tracker
#[derive(Debug, Default)]
pub struct PreconnectRegistry {
    youtube: Cell<bool>,
    vimeo: Cell<bool>,
}

impl PreconnectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&self, provider: Provider) -> &Cell<bool> {
        match provider {
            Provider::YouTube => &self.youtube,
            Provider::Vimeo => &self.vimeo,
        }
    }

    pub fn is_preconnected(&self, provider: Provider) -> bool {
        self.flag(provider).get()
    }

    /// Insert `<link rel=preconnect>` for a YouTube embed; returns false if
    /// this page already warmed YouTube
    pub fn warm_youtube(&self, doc: &mut Document, nocookie: bool) -> Result<bool, DomError> {
        self.warm(doc, Provider::YouTube, &youtube_origins(nocookie))
    }

    /// Insert `<link rel=preconnect>` for a Vimeo embed
    pub fn warm_vimeo(&self, doc: &mut Document) -> Result<bool, DomError> {
        self.warm(doc, Provider::Vimeo, VIMEO_ORIGINS)
    }

    fn warm(&self, doc: &mut Document, provider: Provider, origins: &[&str]) -> Result<bool, DomError> {
        let flag = self.flag(provider);
        if flag.get() {
            tracing::trace!("{:?} already preconnected", provider);
            return Ok(false);
        }

        for origin in origins {
            add_prefetch(doc, "preconnect", origin)?;
        }
        flag.set(true);
        tracing::info!("preconnected {} {:?} origins", origins.len(), provider);
        Ok(true)
    }
}

/// Append `<link rel={kind} href={url} crossorigin="true">` to the head
fn add_prefetch(doc: &mut Document, kind: &str, url: &str) -> Result<NodeId, DomError> {
    let link = doc.tree.create_element("link");
    doc.tree.set_attribute(link, "rel", kind)?;
    doc.tree.set_attribute(link, "href", url)?;
    doc.tree.set_attribute(link, "crossorigin", "true")?;
    let head = doc.head();
    doc.append_child(head, link)?;
    Ok(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(doc: &Document) -> Vec<String> {
        doc.tree
            .find_by_tag(doc.head(), "link")
            .into_iter()
            .filter_map(|l| doc.tree.get_attribute(l, "href").map(str::to_string))
            .collect()
    }

    #[test]
    fn test_youtube_origins() {
        assert_eq!(youtube_origins(false).len(), 6);
        let nocookie = youtube_origins(true);
        assert_eq!(nocookie.len(), 3);
        assert!(!nocookie.iter().any(|o| o.contains("doubleclick")));
    }

    #[test]
    fn test_warm_once() {
        let mut doc = Document::default();
        let registry = PreconnectRegistry::new();

        assert!(registry.warm_youtube(&mut doc, false).unwrap());
        assert!(!registry.warm_youtube(&mut doc, true).unwrap());
        assert!(registry.is_preconnected(Provider::YouTube));
        assert!(!registry.is_preconnected(Provider::Vimeo));

        let hrefs = links(&doc);
        assert_eq!(hrefs.len(), 6);
        assert_eq!(hrefs[0], "https://i.ytimg.com/");
        assert!(hrefs.contains(&"https://www.google.com".to_string()));
    }

    #[test]
    fn test_link_attributes() {
        let mut doc = Document::default();
        PreconnectRegistry::new().warm_vimeo(&mut doc).unwrap();

        let link = doc.tree.first_by_tag(doc.head(), "link").unwrap();
        assert_eq!(doc.tree.get_attribute(link, "rel"), Some("preconnect"));
        assert_eq!(doc.tree.get_attribute(link, "crossorigin"), Some("true"));
        assert_eq!(links(&doc).len(), 3);
    }
}

//! Player URL construction

use url::Url;

use crate::EmbedError;
use crate::attrs::EmbedDescriptor;
use crate::encode::encode_uri_component;

/// What asked for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Click or a programmatic load; plays immediately
    User,
    /// The element scrolled into view; loads without playing
    Visibility,
}

impl Trigger {
    /// Autoplay for this trigger, with the `autoplay` attribute upgrading
    /// passive loads
    pub fn autoplay(self, desc: &EmbedDescriptor) -> bool {
        match self {
            Trigger::User => true,
            Trigger::Visibility => desc.autoplay,
        }
    }
}

/// Query parameters forced onto short-form embeds
const SHORT_PARAMS: &str = "loop=1&mute=1&modestbranding=1&playsinline=1&rel=0&enablejsapi=1";

const JS_API_PARAM: &str = "enablejsapi=1";

/// YouTube embed URL options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YouTubeUrlOptions {
    pub autoplay: bool,
    /// Short-form heuristic is active (forces autoplay and looping)
    pub short: bool,
}

/// Build the YouTube player URL:
/// `https://www.youtube[-nocookie].com/embed/{target}autoplay={0|1}&start={t}[&params]`
pub fn youtube_embed_url(desc: &EmbedDescriptor, options: YouTubeUrlOptions) -> String {
    let host = if desc.nocookie { "www.youtube-nocookie.com" } else { "www.youtube.com" };
    let video_id = encode_uri_component(&desc.video_id);

    let target = match &desc.playlist_id {
        Some(list) => format!("?listType=playlist&list={}&", encode_uri_component(list)),
        None => format!("{}?", video_id),
    };

    let autoplay = options.autoplay || options.short;
    let mut query = format!("start={}", encode_uri_component(&desc.video_start_at));

    if options.short {
        query.push('&');
        query.push_str(SHORT_PARAMS);
        query.push_str("&playlist=");
        query.push_str(&video_id);
    } else {
        if let Some(params) = &desc.params {
            query.push('&');
            query.push_str(params);
        }
        let has_js_api = desc.params.as_deref().is_some_and(|p| p.contains(JS_API_PARAM));
        if desc.needs_js_api() && !has_js_api {
            query.push('&');
            query.push_str(JS_API_PARAM);
        }
    }

    format!(
        "https://{}/embed/{}autoplay={}&{}",
        host,
        target,
        u8::from(autoplay),
        query
    )
}

/// Build the Vimeo player URL:
/// `https://player.vimeo.com/video/{id}[?autoplay=1]#t={start}`
pub fn vimeo_player_url(video_id: &str, start_at: &str, autoplay: bool) -> Result<Url, EmbedError> {
    let base = Url::parse("https://player.vimeo.com/")?;
    let mut url = base.join(&format!("/video/{}", encode_uri_component(video_id)))?;
    if autoplay {
        url.set_query(Some("autoplay=1"));
    }
    url.set_fragment(Some(&format!("t={}", start_at)));
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lite_dom::DomTree;

    fn descriptor(attrs: &[(&str, &str)]) -> EmbedDescriptor {
        let mut tree = DomTree::new();
        let el = tree.create_element("lite-youtube");
        for (name, value) in attrs {
            tree.set_attribute(el, name, value).unwrap();
        }
        EmbedDescriptor::youtube(&tree, el)
    }

    fn user() -> YouTubeUrlOptions {
        YouTubeUrlOptions { autoplay: true, short: false }
    }

    #[test]
    fn test_video_url() {
        let desc = descriptor(&[("videoid", "guJLfqTFfIw")]);
        assert_eq!(
            youtube_embed_url(&desc, user()),
            "https://www.youtube.com/embed/guJLfqTFfIw?autoplay=1&start=0"
        );
    }

    #[test]
    fn test_passive_url() {
        let desc = descriptor(&[("videoid", "guJLfqTFfIw"), ("videostartat", "30")]);
        assert_eq!(
            youtube_embed_url(&desc, YouTubeUrlOptions::default()),
            "https://www.youtube.com/embed/guJLfqTFfIw?autoplay=0&start=30"
        );
    }

    #[test]
    fn test_playlist_takes_precedence() {
        let desc = descriptor(&[("videoid", "guJLfqTFfIw"), ("playlistid", "PL123")]);
        assert_eq!(
            youtube_embed_url(&desc, user()),
            "https://www.youtube.com/embed/?listType=playlist&list=PL123&autoplay=1&start=0"
        );
    }

    #[test]
    fn test_nocookie_and_params() {
        let desc = descriptor(&[("videoid", "x"), ("nocookie", ""), ("params", "controls=0&loop=1")]);
        assert_eq!(
            youtube_embed_url(&desc, user()),
            "https://www.youtube-nocookie.com/embed/x?autoplay=1&start=0&controls=0&loop=1"
        );
    }

    #[test]
    fn test_autopause_enables_js_api_once() {
        let desc = descriptor(&[("videoid", "x"), ("autopause", "")]);
        assert!(youtube_embed_url(&desc, user()).ends_with("start=0&enablejsapi=1"));

        let desc = descriptor(&[("videoid", "x"), ("events", ""), ("params", "enablejsapi=1")]);
        assert_eq!(youtube_embed_url(&desc, user()).matches("enablejsapi=1").count(), 1);
    }

    #[test]
    fn test_short_overrides() {
        let desc = descriptor(&[("videoid", "abc"), ("params", "controls=0")]);
        let url = youtube_embed_url(&desc, YouTubeUrlOptions { autoplay: false, short: true });
        assert_eq!(
            url,
            "https://www.youtube.com/embed/abc?autoplay=1&start=0&loop=1&mute=1&modestbranding=1&playsinline=1&rel=0&enablejsapi=1&playlist=abc"
        );
    }

    #[test]
    fn test_identifiers_are_encoded() {
        let desc = descriptor(&[("videoid", "a b&c")]);
        assert!(youtube_embed_url(&desc, user()).contains("/embed/a%20b%26c?"));
    }

    #[test]
    fn test_trigger_autoplay() {
        let plain = descriptor(&[]);
        let autoplay = descriptor(&[("autoplay", "")]);
        assert!(Trigger::User.autoplay(&plain));
        assert!(!Trigger::Visibility.autoplay(&plain));
        assert!(Trigger::Visibility.autoplay(&autoplay));
    }

    #[test]
    fn test_vimeo_url() {
        let url = vimeo_player_url("364402896", "1m3s", true).unwrap();
        assert_eq!(url.as_str(), "https://player.vimeo.com/video/364402896?autoplay=1#t=1m3s");

        let url = vimeo_player_url("364402896", "0s", false).unwrap();
        assert_eq!(url.as_str(), "https://player.vimeo.com/video/364402896#t=0s");
    }
}

//! Frame command protocol
//!
//! Commands go to the frame as `{"event":"command","func":..,"args":..}`
//! with target origin `*`. The frame answers with `onReady`,
//! `onStateChange`, `onPlaybackRateChange` and `infoDelivery` messages.

use lite_dom::{Document, NodeId};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{ManagedPlayer, PlayerEvent, PlayerState};

/// A command posted to a player frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameCommand {
    pub event: &'static str,
    pub func: String,
    pub args: Value,
}

impl FrameCommand {
    pub fn new(func: &str, args: Value) -> Self {
        Self {
            event: "command",
            func: func.to_string(),
            args,
        }
    }

    /// Command without arguments (`"args":""`)
    pub fn bare(func: &str) -> Self {
        Self::new(func, Value::String(String::new()))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Post to `frame`; false when the frame is gone
    pub fn post(&self, doc: &mut Document, frame: NodeId) -> bool {
        doc.post_message(frame, &self.to_json(), "*")
    }
}

/// Message posted back by a player frame
#[derive(Debug, Deserialize)]
struct FrameMessage {
    event: String,
    #[serde(default)]
    info: Value,
}

/// Fields of an `infoDelivery` payload this player tracks
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InfoDelivery {
    player_state: Option<i64>,
    current_time: Option<f64>,
    duration: Option<f64>,
    volume: Option<f64>,
    muted: Option<bool>,
    playback_rate: Option<f64>,
}

/// Managed player speaking the frame command protocol
#[derive(Debug, Clone)]
pub struct IframePlayer {
    frame: NodeId,
    ready: bool,
    state: PlayerState,
    volume: u8,
    muted: bool,
    playback_rate: f64,
    duration: f64,
    current_time: f64,
}

impl IframePlayer {
    /// Bind to `frame` and ask it to start reporting
    pub fn attach(doc: &mut Document, frame: NodeId) -> Self {
        let listening = json!({ "event": "listening", "channel": "widget" }).to_string();
        doc.post_message(frame, &listening, "*");
        Self {
            frame,
            ready: false,
            state: PlayerState::Unstarted,
            volume: 100,
            muted: false,
            playback_rate: 1.0,
            duration: f64::NAN,
            current_time: 0.0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn command(&self, doc: &mut Document, func: &str, args: Value) -> bool {
        FrameCommand::new(func, args).post(doc, self.frame)
    }

    fn set_state(&mut self, state: PlayerState, events: &mut Vec<PlayerEvent>) {
        if state != self.state {
            self.state = state;
            events.push(PlayerEvent::StateChange(state));
        }
    }

    fn set_rate(&mut self, rate: f64, events: &mut Vec<PlayerEvent>) {
        if rate != self.playback_rate {
            self.playback_rate = rate;
            events.push(PlayerEvent::PlaybackRateChange(rate));
        }
    }
}

impl ManagedPlayer for IframePlayer {
    fn frame(&self) -> NodeId {
        self.frame
    }

    fn play(&mut self, doc: &mut Document) -> bool {
        self.command(doc, "playVideo", json!([]))
    }

    fn pause(&mut self, doc: &mut Document) -> bool {
        self.command(doc, "pauseVideo", json!([]))
    }

    fn seek_to(&mut self, doc: &mut Document, seconds: f64, allow_seek_ahead: bool) -> bool {
        let sent = self.command(doc, "seekTo", json!([seconds, allow_seek_ahead]));
        if sent {
            self.current_time = seconds;
        }
        sent
    }

    fn set_volume(&mut self, doc: &mut Document, volume: u8) -> bool {
        let volume = volume.min(100);
        let sent = self.command(doc, "setVolume", json!([volume]));
        if sent {
            self.volume = volume;
        }
        sent
    }

    fn mute(&mut self, doc: &mut Document) -> bool {
        let sent = self.command(doc, "mute", json!([]));
        if sent {
            self.muted = true;
        }
        sent
    }

    fn unmute(&mut self, doc: &mut Document) -> bool {
        let sent = self.command(doc, "unMute", json!([]));
        if sent {
            self.muted = false;
        }
        sent
    }

    fn set_playback_rate(&mut self, doc: &mut Document, rate: f64) -> bool {
        self.command(doc, "setPlaybackRate", json!([rate]))
    }

    fn volume(&self) -> u8 {
        self.volume
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn state(&self) -> PlayerState {
        self.state
    }

    fn handle_message(&mut self, data: &str) -> Vec<PlayerEvent> {
        let Ok(message) = serde_json::from_str::<FrameMessage>(data) else {
            tracing::trace!("ignored non-player message");
            return Vec::new();
        };

        let mut events = Vec::new();
        match message.event.as_str() {
            "onReady" => {
                if !self.ready {
                    self.ready = true;
                    events.push(PlayerEvent::Ready);
                }
            }
            "onStateChange" => {
                if let Some(state) = message.info.as_i64().and_then(PlayerState::from_code) {
                    self.set_state(state, &mut events);
                }
            }
            "onPlaybackRateChange" => {
                if let Some(rate) = message.info.as_f64() {
                    self.set_rate(rate, &mut events);
                }
            }
            "infoDelivery" | "initialDelivery" => {
                let info: InfoDelivery = serde_json::from_value(message.info).unwrap_or_default();
                if let Some(t) = info.current_time {
                    self.current_time = t;
                }
                if let Some(d) = info.duration {
                    self.duration = d;
                }
                if let Some(v) = info.volume {
                    self.volume = v.clamp(0.0, 100.0) as u8;
                }
                if let Some(m) = info.muted {
                    self.muted = m;
                }
                if let Some(state) = info.player_state.and_then(PlayerState::from_code) {
                    self.set_state(state, &mut events);
                }
                if let Some(rate) = info.playback_rate {
                    self.set_rate(rate, &mut events);
                }
            }
            other => tracing::trace!("unhandled player event {}", other),
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected_frame() -> (Document, NodeId) {
        let mut doc = Document::default();
        let iframe = doc.tree.create_element("iframe");
        let body = doc.body();
        doc.append_child(body, iframe).unwrap();
        (doc, iframe)
    }

    #[test]
    fn test_command_json() {
        assert_eq!(
            FrameCommand::bare("pauseVideo").to_json(),
            r#"{"event":"command","func":"pauseVideo","args":""}"#
        );
        assert_eq!(
            FrameCommand::new("seekTo", json!([30.0, true])).to_json(),
            r#"{"event":"command","func":"seekTo","args":[30.0,true]}"#
        );
    }

    #[test]
    fn test_attach_sends_listening() {
        let (mut doc, iframe) = connected_frame();
        let player = IframePlayer::attach(&mut doc, iframe);

        let messages = doc.take_posted_messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].data.contains("\"listening\""));
        assert!(player.duration().is_nan());
        assert_eq!(player.state(), PlayerState::Unstarted);
    }

    #[test]
    fn test_controls_post_commands() {
        let (mut doc, iframe) = connected_frame();
        let mut player = IframePlayer::attach(&mut doc, iframe);
        doc.take_posted_messages();

        assert!(player.play(&mut doc));
        assert!(player.set_volume(&mut doc, 150));
        assert!(player.mute(&mut doc));
        assert!(player.seek_to(&mut doc, 12.5, true));

        let funcs: Vec<String> = doc
            .take_posted_messages()
            .into_iter()
            .map(|m| serde_json::from_str::<Value>(&m.data).unwrap()["func"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(funcs, vec!["playVideo", "setVolume", "mute", "seekTo"]);
        assert_eq!(player.volume(), 100);
        assert!(player.is_muted());
        assert_eq!(player.current_time(), 12.5);
    }

    #[test]
    fn test_detached_frame_drops_commands() {
        let (mut doc, iframe) = connected_frame();
        let mut player = IframePlayer::attach(&mut doc, iframe);
        doc.tree.detach(iframe);

        assert!(!player.pause(&mut doc));
        assert!(!player.mute(&mut doc));
        assert!(!player.is_muted());
    }

    #[test]
    fn test_handle_messages() {
        let (mut doc, iframe) = connected_frame();
        let mut player = IframePlayer::attach(&mut doc, iframe);

        assert_eq!(player.handle_message(r#"{"event":"onReady"}"#), vec![PlayerEvent::Ready]);
        assert!(player.handle_message(r#"{"event":"onReady"}"#).is_empty());

        assert_eq!(
            player.handle_message(r#"{"event":"onStateChange","info":1}"#),
            vec![PlayerEvent::StateChange(PlayerState::Playing)]
        );
        assert_eq!(
            player.handle_message(r#"{"event":"onPlaybackRateChange","info":1.5}"#),
            vec![PlayerEvent::PlaybackRateChange(1.5)]
        );

        let events = player.handle_message(
            r#"{"event":"infoDelivery","info":{"currentTime":3.5,"duration":212.0,"playerState":2,"muted":true}}"#,
        );
        assert_eq!(events, vec![PlayerEvent::StateChange(PlayerState::Paused)]);
        assert_eq!(player.duration(), 212.0);
        assert_eq!(player.current_time(), 3.5);
        assert!(player.is_muted());

        assert!(player.handle_message("not json").is_empty());
        assert!(player.handle_message(r#"{"event":"onStateChange","info":9}"#).is_empty());
    }
}

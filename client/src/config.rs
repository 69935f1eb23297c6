use serde::{Deserialize, Serialize};

use hextanks_shared::{QueueKind, UnknownTerrainPolicy};

pub const CONFIG_STORAGE_KEY: &str = "hextanks_config";

pub const DEFAULT_CANVAS_ID: &str = "game-canvas";
pub const DEFAULT_HEX_SIZE: f64 = 40.0;
pub const DEFAULT_SOCKET_PATH: &str = "/ws";
pub const DEFAULT_MATCH_ROUTE: &str = "/game";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const QUEUE_TICK_MS: u32 = 1_000;

/// Page-level settings. Defaults cover a normal deployment; a JSON object
/// under [`CONFIG_STORAGE_KEY`] in local storage overrides single fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub canvas_id: String,
    pub hex_size: f64,
    pub socket_path: String,
    pub match_route: String,
    pub queue_kind: QueueKind,
    pub unknown_terrain: UnknownTerrainPolicy,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            hex_size: DEFAULT_HEX_SIZE,
            socket_path: DEFAULT_SOCKET_PATH.to_string(),
            match_route: DEFAULT_MATCH_ROUTE.to_string(),
            queue_kind: QueueKind::default(),
            unknown_terrain: UnknownTerrainPolicy::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn load() -> Self {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::get::<ClientConfig>(CONFIG_STORAGE_KEY)
            .unwrap_or_default()
            .sanitized()
    }

    /// Replace unusable overrides with defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.hex_size.is_finite() || self.hex_size <= 0.0 {
            self.hex_size = defaults.hex_size;
        }
        if self.canvas_id.trim().is_empty() {
            self.canvas_id = defaults.canvas_id;
        }
        if self.socket_path.trim().is_empty() {
            self.socket_path = defaults.socket_path;
        }
        if !self.match_route.starts_with('/') {
            self.match_route = defaults.match_route;
        }
        self
    }

    pub fn max_level(&self) -> tracing::Level {
        self.log_level
            .trim()
            .parse::<tracing::Level>()
            .unwrap_or(tracing::Level::INFO)
    }

    /// WebSocket URL for the realtime channel. Absolute `ws:`/`wss:` paths
    /// are used as-is; anything else is resolved against the page origin.
    pub fn socket_url(&self, page_protocol: &str, page_host: &str) -> String {
        let path = self.socket_path.trim();
        if path.starts_with("ws://") || path.starts_with("wss://") {
            return path.to_string();
        }
        let scheme = if page_protocol == "https:" { "wss" } else { "ws" };
        let sep = if path.starts_with('/') { "" } else { "/" };
        format!("{scheme}://{page_host}{sep}{path}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Lobby,
    Match,
}

impl Page {
    pub fn for_path(pathname: &str, match_route: &str) -> Self {
        let trimmed = pathname.trim_end_matches('/');
        if trimmed == match_route.trim_end_matches('/') {
            Page::Match
        } else {
            Page::Lobby
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, DEFAULT_HEX_SIZE, Page};
    use hextanks_shared::{QueueKind, UnknownTerrainPolicy};

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg: ClientConfig = serde_json::from_str(r#"{"hex_size":24,"queue_kind":"ranked"}"#).unwrap();
        assert_eq!(cfg.hex_size, 24.0);
        assert_eq!(cfg.queue_kind, QueueKind::Ranked);
        assert_eq!(cfg.canvas_id, "game-canvas");
        assert_eq!(cfg.match_route, "/game");
        assert_eq!(cfg.unknown_terrain, UnknownTerrainPolicy::Reject);
    }

    #[test]
    fn sanitizes_bad_overrides() {
        let cfg = ClientConfig {
            hex_size: -3.0,
            canvas_id: "  ".into(),
            match_route: "game".into(),
            ..ClientConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.hex_size, DEFAULT_HEX_SIZE);
        assert_eq!(cfg.canvas_id, "game-canvas");
        assert_eq!(cfg.match_route, "/game");
    }

    #[test]
    fn log_level_falls_back_to_info() {
        let mut cfg = ClientConfig::default();
        cfg.log_level = "debug".into();
        assert_eq!(cfg.max_level(), tracing::Level::DEBUG);
        cfg.log_level = "chatty".into();
        assert_eq!(cfg.max_level(), tracing::Level::INFO);
    }

    #[test]
    fn socket_url_follows_page_scheme() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.socket_url("https:", "tanks.example"), "wss://tanks.example/ws");
        assert_eq!(cfg.socket_url("http:", "localhost:5000"), "ws://localhost:5000/ws");

        let absolute = ClientConfig {
            socket_path: "wss://mm.example/queue".into(),
            ..ClientConfig::default()
        };
        assert_eq!(absolute.socket_url("http:", "ignored"), "wss://mm.example/queue");
    }

    #[test]
    fn routes_by_pathname() {
        assert_eq!(Page::for_path("/game", "/game"), Page::Match);
        assert_eq!(Page::for_path("/game/", "/game"), Page::Match);
        assert_eq!(Page::for_path("/", "/game"), Page::Lobby);
        assert_eq!(Page::for_path("/lobby", "/game"), Page::Lobby);
    }
}

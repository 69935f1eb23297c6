use serde::{Deserialize, Serialize};

use crate::tank::Tank;
use crate::terrain::TerrainMap;

/// Messages pushed by the server over the realtime channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    QueueUpdate {
        message: String,
    },
    MatchFound,
    GameState {
        #[serde(default)]
        map: TerrainMap,
        #[serde(default)]
        tanks: Vec<Tank>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueKind {
    #[default]
    Casual,
    Ranked,
}

/// Messages the client sends. Joining the queue is the only one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    JoinQueue {
        #[serde(default)]
        queue_type: QueueKind,
    },
}

/// Map and tanks for one match frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameSnapshot {
    pub map: TerrainMap,
    pub tanks: Vec<Tank>,
}

#[cfg(test)]
mod tests {
    use super::{ClientMessage, QueueKind, ServerEvent};

    #[test]
    fn decodes_queue_update() {
        let event: ServerEvent =
            serde_json::from_str(r#"{"type":"queue_update","message":"Searching casual match..."}"#).unwrap();
        assert_eq!(
            event,
            ServerEvent::QueueUpdate {
                message: "Searching casual match...".to_string()
            }
        );
    }

    #[test]
    fn decodes_bare_match_found() {
        let event: ServerEvent = serde_json::from_str(r#"{"type":"match_found"}"#).unwrap();
        assert_eq!(event, ServerEvent::MatchFound);
    }

    #[test]
    fn decodes_game_state() {
        let raw = r#"{"type":"game_state","map":{"0,0":"grass","1,0":"water"},"tanks":[{"id":1,"playerId":"player2","position":{"q":1,"r":0}}]}"#;
        let ServerEvent::GameState { map, tanks } = serde_json::from_str::<ServerEvent>(raw).unwrap() else {
            panic!("expected game_state");
        };
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("1,0").map(String::as_str), Some("water"));
        assert_eq!(tanks.len(), 1);
    }

    #[test]
    fn rejects_unknown_event_type() {
        assert!(serde_json::from_str::<ServerEvent>(r#"{"type":"game_over"}"#).is_err());
    }

    #[test]
    fn encodes_join_queue() {
        let msg = ClientMessage::JoinQueue {
            queue_type: QueueKind::Ranked,
        };
        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"type":"join_queue","queue_type":"ranked"}"#
        );
    }
}

//! Wire protocol. Events are tagged unions over `type`, with kebab-case
//! event names and camelCase payload fields.
//!
//! Requests that can fail at the membership level (`create-room`,
//! `join-room`) are answered with an `ack`; everything else answers through
//! the broadcasts it triggers, or an `invalid-play` sent only to the caller.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::snapshot::GameStateView;
use crate::domain::state::{GameMode, RoundRecord, TrickPlay};
use crate::domain::Card;
use crate::rooms::room::RoomView;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMsg {
    #[serde(rename_all = "camelCase")]
    CreateRoom {
        player_name: String,
        game_mode: GameMode,
    },
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room_code: String,
        player_name: String,
    },
    #[serde(rename_all = "camelCase")]
    ToggleReady { room_code: String },
    #[serde(rename_all = "camelCase")]
    SetGameMode {
        room_code: String,
        game_mode: GameMode,
    },
    #[serde(rename_all = "camelCase")]
    AssignTeam {
        room_code: String,
        player_name: String,
        team_name: String,
    },
    #[serde(rename_all = "camelCase")]
    UpdateTeams { room_code: String, num_teams: usize },
    #[serde(rename_all = "camelCase")]
    StartGame { room_code: String },
    #[serde(rename_all = "camelCase")]
    NilDecision { room_code: String, go_nil: bool },
    #[serde(rename_all = "camelCase")]
    PlaceBid { room_code: String, bid: u8 },
    #[serde(rename_all = "camelCase")]
    PlayCard { room_code: String, card_id: u8 },
    #[serde(rename_all = "camelCase")]
    NextRound { room_code: String },
    #[serde(rename_all = "camelCase")]
    RestartGame { room_code: String },
    #[serde(rename_all = "camelCase")]
    EndGame { room_code: String },
    #[serde(rename_all = "camelCase")]
    LeaveGame { room_code: String },
    #[serde(rename_all = "camelCase")]
    LeaveRoom { room_code: String },
}

impl ClientMsg {
    /// The wire name, for logs and acks.
    pub fn event_name(&self) -> &'static str {
        match self {
            ClientMsg::CreateRoom { .. } => "create-room",
            ClientMsg::JoinRoom { .. } => "join-room",
            ClientMsg::ToggleReady { .. } => "toggle-ready",
            ClientMsg::SetGameMode { .. } => "set-game-mode",
            ClientMsg::AssignTeam { .. } => "assign-team",
            ClientMsg::UpdateTeams { .. } => "update-teams",
            ClientMsg::StartGame { .. } => "start-game",
            ClientMsg::NilDecision { .. } => "nil-decision",
            ClientMsg::PlaceBid { .. } => "place-bid",
            ClientMsg::PlayCard { .. } => "play-card",
            ClientMsg::NextRound { .. } => "next-round",
            ClientMsg::RestartGame { .. } => "restart-game",
            ClientMsg::EndGame { .. } => "end-game",
            ClientMsg::LeaveGame { .. } => "leave-game",
            ClientMsg::LeaveRoom { .. } => "leave-room",
        }
    }
}

/// Request acknowledgment. `room_code` and `reconnected` are present on
/// successful create/join acks; `error` explains a refusal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AckBody {
    pub request: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconnected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AckBody {
    pub fn ok(request: &str, room_code: &str) -> Self {
        Self {
            request: request.to_string(),
            success: true,
            room_code: Some(room_code.to_string()),
            reconnected: None,
            error: None,
        }
    }

    pub fn rejoined(request: &str, room_code: &str, reconnected: bool) -> Self {
        Self {
            reconnected: Some(reconnected),
            ..Self::ok(request, room_code)
        }
    }

    pub fn err(request: &str, error: impl ToString) -> Self {
        Self {
            request: request.to_string(),
            success: false,
            room_code: None,
            reconnected: None,
            error: Some(error.to_string()),
        }
    }
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMsg {
    Ack(AckBody),

    RoomUpdate(RoomView),

    GameState(GameStateView),

    #[serde(rename_all = "camelCase")]
    TrickResult {
        winner: String,
        winning_card: Card,
        trick: Vec<TrickPlay>,
    },

    #[serde(rename_all = "camelCase")]
    RoundEnd {
        round: u8,
        round_scores: HashMap<String, i32>,
        scores: HashMap<String, i32>,
        penalties: Vec<String>,
        round_history: HashMap<String, Vec<RoundRecord>>,
    },

    #[serde(rename_all = "camelCase")]
    InvalidPlay { message: String },

    GameReset,

    GameEnded,
}

//! A single room: members, lobby configuration and the game in progress.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::state::{Game, GameMode, Team};
use crate::rooms::error::RoomError;

pub const MAX_NAME_LEN: usize = 15;

/// A seat in the room. `name` is the stable identity; `id` is the current
/// session and is rebound when the player reconnects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub ready: bool,
    pub connected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    /// An existing disconnected seat was rebound to the new session.
    Reconnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Lobby departure: the seat is gone.
    Removed { room_empty: bool },
    /// In-game departure: the seat stays, flagged disconnected.
    Disconnected,
    NotMember,
}

/// Result of an explicit mid-game leave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    pub removed_name: Option<String>,
    pub room_empty: bool,
}

#[derive(Debug, Clone)]
pub struct Room {
    pub code: String,
    pub host_id: Uuid,
    pub game_mode: GameMode,
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub started: bool,
    pub game: Option<Game>,
    /// Set when the room is torn down; late events bail out on it.
    pub closed: bool,
}

pub fn validate_name(name: &str) -> Result<(), RoomError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_NAME_LEN {
        return Err(RoomError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl Room {
    pub fn new(code: String, host_id: Uuid, host_name: &str, game_mode: GameMode) -> Self {
        let mut room = Self {
            code,
            host_id,
            game_mode,
            players: vec![Player {
                id: host_id,
                name: host_name.trim().to_string(),
                ready: false,
                connected: true,
            }],
            teams: Vec::new(),
            started: false,
            game: None,
            closed: false,
        };
        // Team rooms open with two empty teams; lobby configuration can
        // reshape them later.
        if game_mode == GameMode::Teams {
            room.rebuild_teams(2);
        }
        room
    }

    pub fn is_host(&self, session_id: Uuid) -> bool {
        self.host_id == session_id
    }

    pub fn player_by_id(&self, session_id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.id == session_id)
    }

    pub fn name_of(&self, session_id: Uuid) -> Option<&str> {
        self.player_by_id(session_id).map(|p| p.name.as_str())
    }

    /// Join a lobby, or rebind a disconnected seat of the same name while a
    /// game is running. A rejoining former host gets the host role back.
    pub fn join(&mut self, session_id: Uuid, name: &str) -> Result<JoinOutcome, RoomError> {
        let name = name.trim();
        if self.started {
            let Some(seat) = self.players.iter_mut().find(|p| p.name == name) else {
                return Err(RoomError::GameAlreadyStarted);
            };
            if seat.connected {
                return Err(RoomError::GameAlreadyStarted);
            }
            let was_host = self.host_id == seat.id;
            seat.id = session_id;
            seat.connected = true;
            if was_host {
                self.host_id = session_id;
            }
            return Ok(JoinOutcome::Reconnected);
        }

        validate_name(name)?;
        if self.players.iter().any(|p| p.name == name) {
            return Err(RoomError::NameTaken);
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(RoomError::RoomFull);
        }
        self.players.push(Player {
            id: session_id,
            name: name.to_string(),
            ready: false,
            connected: true,
        });
        Ok(JoinOutcome::Joined)
    }

    /// Departure or dropped connection. Lobby members are removed outright;
    /// in-game members keep their seat so reconnection preserves identity.
    pub fn leave(&mut self, session_id: Uuid) -> LeaveOutcome {
        let Some(pos) = self.players.iter().position(|p| p.id == session_id) else {
            return LeaveOutcome::NotMember;
        };

        if self.started {
            self.players[pos].connected = false;
            return LeaveOutcome::Disconnected;
        }

        let was_host = self.host_id == self.players[pos].id;
        let departed = self.players.remove(pos);
        self.unassign(&departed.name);

        if self.players.is_empty() {
            return LeaveOutcome::Removed { room_empty: true };
        }
        if was_host {
            self.host_id = self.players[0].id;
        }
        LeaveOutcome::Removed { room_empty: false }
    }

    /// Explicit mid-game leave: drop the seat entirely and pull the name out
    /// of the running game's seating, clamping the turn index.
    pub fn remove_from_game(&mut self, session_id: Uuid) -> RemovalOutcome {
        let Some(pos) = self.players.iter().position(|p| p.id == session_id) else {
            return RemovalOutcome {
                removed_name: None,
                room_empty: self.players.is_empty(),
            };
        };

        let was_host = self.host_id == self.players[pos].id;
        let departed = self.players.remove(pos);
        self.unassign(&departed.name);

        if let Some(game) = self.game.as_mut() {
            if let Some(seat) = game.seat_of(&departed.name) {
                game.player_order.remove(seat);
                let n = game.player_order.len();
                if n > 0 {
                    for index in [
                        &mut game.current_player_index,
                        &mut game.dealer_index,
                        &mut game.bidding_start_index,
                        &mut game.first_lead_index,
                    ] {
                        if *index > seat {
                            *index -= 1;
                        }
                        if *index >= n {
                            *index = 0;
                        }
                    }
                }
            }
        }

        if self.players.is_empty() {
            return RemovalOutcome {
                removed_name: Some(departed.name),
                room_empty: true,
            };
        }
        if was_host {
            self.host_id = self.players[0].id;
        }
        RemovalOutcome {
            removed_name: Some(departed.name),
            room_empty: false,
        }
    }

    pub fn toggle_ready(&mut self, session_id: Uuid) {
        if self.started {
            return;
        }
        if let Some(p) = self.players.iter_mut().find(|p| p.id == session_id) {
            p.ready = !p.ready;
        }
    }

    /// Switching to Teams seeds `players / 2` empty teams; switching back to
    /// Individual clears the team setup.
    pub fn set_game_mode(&mut self, mode: GameMode) {
        if self.started {
            return;
        }
        self.game_mode = mode;
        match mode {
            GameMode::Teams => self.rebuild_teams(self.players.len() / 2),
            GameMode::Individual => self.teams.clear(),
        }
    }

    pub fn update_teams(&mut self, num_teams: usize) {
        if self.started {
            return;
        }
        self.rebuild_teams(num_teams);
    }

    pub fn assign_team(&mut self, player_name: &str, team_name: &str) -> Result<(), RoomError> {
        if !self.players.iter().any(|p| p.name == player_name) {
            return Err(RoomError::InvalidName(player_name.to_string()));
        }
        if !self.teams.iter().any(|t| t.name == team_name) {
            return Err(RoomError::TeamNotFound(team_name.to_string()));
        }
        self.unassign(player_name);
        if let Some(team) = self.teams.iter_mut().find(|t| t.name == team_name) {
            team.members.push(player_name.to_string());
        }
        Ok(())
    }

    pub fn can_start(&self) -> Result<(), RoomError> {
        if self.players.len() < MIN_PLAYERS {
            return Err(RoomError::NotEnoughPlayers);
        }
        if !self.players.iter().all(|p| p.ready) {
            return Err(RoomError::NotAllReady);
        }
        if self.game_mode == GameMode::Teams {
            if self.players.len() % 2 != 0 {
                return Err(RoomError::UnevenPlayers);
            }
            for p in &self.players {
                let assigned = self
                    .teams
                    .iter()
                    .filter(|t| t.members.contains(&p.name))
                    .count();
                if assigned != 1 {
                    return Err(RoomError::PlayerUnassigned(p.name.clone()));
                }
            }
            for t in &self.teams {
                if t.members.is_empty() {
                    return Err(RoomError::EmptyTeam(t.name.clone()));
                }
            }
        }
        Ok(())
    }

    /// Back to the lobby: the game is dropped, ready flags clear, and seats
    /// whose connections are gone are pruned.
    pub fn reset(&mut self) {
        self.started = false;
        self.game = None;
        let stale: Vec<String> = self
            .players
            .iter()
            .filter(|p| !p.connected)
            .map(|p| p.name.clone())
            .collect();
        self.players.retain(|p| p.connected);
        for name in stale {
            self.unassign(&name);
        }
        for p in &mut self.players {
            p.ready = false;
        }
        if !self.players.is_empty() && self.player_by_id(self.host_id).is_none() {
            self.host_id = self.players[0].id;
        }
    }

    pub fn view(&self) -> RoomView {
        RoomView {
            code: self.code.clone(),
            host: self
                .player_by_id(self.host_id)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            game_mode: self.game_mode,
            started: self.started,
            players: self
                .players
                .iter()
                .map(|p| PlayerView {
                    name: p.name.clone(),
                    ready: p.ready,
                    connected: p.connected,
                    is_host: p.id == self.host_id,
                })
                .collect(),
            teams: self.teams.clone(),
        }
    }

    fn rebuild_teams(&mut self, num_teams: usize) {
        self.teams = (1..=num_teams)
            .map(|i| Team {
                name: format!("Team {i}"),
                members: Vec::new(),
            })
            .collect();
    }

    fn unassign(&mut self, player_name: &str) {
        for team in &mut self.teams {
            team.members.retain(|m| m != player_name);
        }
    }
}

/// Membership-level broadcast payload; game data travels separately in
/// per-player snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub code: String,
    pub host: String,
    pub game_mode: GameMode,
    pub started: bool,
    pub players: Vec<PlayerView>,
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub name: String,
    pub ready: bool,
    pub connected: bool,
    pub is_host: bool,
}

//! Per-connection websocket session actor.
//!
//! The actor owns nothing but the connection: every game transition goes
//! through the game-flow service, and everything the server pushes back
//! arrives as an `Outbound` envelope from the registry.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::services::game_flow::GameFlowService;
use crate::state::app_state::AppState;
use crate::ws::hub::{Outbound, SessionRegistry};
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(10);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(
        Uuid::new_v4(),
        app_state.flow.clone(),
        app_state.registry.clone(),
    );
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    flow: Arc<GameFlowService>,
    registry: Arc<SessionRegistry>,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: Uuid, flow: Arc<GameFlowService>, registry: Arc<SessionRegistry>) -> Self {
        Self {
            conn_id,
            flow,
            registry,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "failed to serialize outbound message"),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn dispatch(&self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        let session_id = self.conn_id;
        match cmd {
            ClientMsg::CreateRoom {
                player_name,
                game_mode,
            } => {
                let ack = self.flow.create_room(session_id, &player_name, game_mode);
                Self::send_json(ctx, &ServerMsg::Ack(ack));
            }
            ClientMsg::JoinRoom {
                room_code,
                player_name,
            } => {
                let ack = self.flow.join_room(session_id, &room_code, &player_name);
                Self::send_json(ctx, &ServerMsg::Ack(ack));
            }
            ClientMsg::ToggleReady { room_code } => {
                self.flow.toggle_ready(session_id, &room_code);
            }
            ClientMsg::SetGameMode {
                room_code,
                game_mode,
            } => {
                self.flow.set_game_mode(session_id, &room_code, game_mode);
            }
            ClientMsg::AssignTeam {
                room_code,
                player_name,
                team_name,
            } => {
                self.flow
                    .assign_team(session_id, &room_code, &player_name, &team_name);
            }
            ClientMsg::UpdateTeams {
                room_code,
                num_teams,
            } => {
                self.flow.update_teams(session_id, &room_code, num_teams);
            }
            ClientMsg::StartGame { room_code } => {
                self.flow.start_game(session_id, &room_code);
            }
            ClientMsg::NilDecision { room_code, go_nil } => {
                self.flow.nil_decision(session_id, &room_code, go_nil);
            }
            ClientMsg::PlaceBid { room_code, bid } => {
                self.flow.place_bid(session_id, &room_code, bid);
            }
            ClientMsg::PlayCard { room_code, card_id } => {
                self.flow.play_card(session_id, &room_code, card_id);
            }
            ClientMsg::NextRound { room_code } => {
                self.flow.next_round(session_id, &room_code);
            }
            ClientMsg::RestartGame { room_code } => {
                self.flow.restart_game(session_id, &room_code);
            }
            ClientMsg::EndGame { room_code } => {
                self.flow.end_game(session_id, &room_code);
            }
            ClientMsg::LeaveGame { room_code } => {
                self.flow.leave_game(session_id, &room_code);
            }
            ClientMsg::LeaveRoom { room_code } => {
                self.flow.leave_room(session_id, &room_code);
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "session started");
        self.registry
            .register(self.conn_id, ctx.address().recipient::<Outbound>());
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.registry.unregister(self.conn_id);
        // Membership reacts to the drop: lobby seats vanish, in-game seats
        // flip to disconnected and the auto-progress grace timer starts.
        self.flow.handle_disconnect(self.conn_id);
        info!(conn_id = %self.conn_id, "session stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => {
                        debug!(conn_id = %self.conn_id, event = cmd.event_name(), "client event");
                        self.dispatch(cmd, ctx);
                    }
                    Err(err) => {
                        warn!(conn_id = %self.conn_id, error = %err, "malformed client event");
                        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Invalid)));
                        ctx.stop();
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                warn!(conn_id = %self.conn_id, "binary frames are not part of the protocol");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Unsupported)));
                ctx.stop();
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "websocket protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}

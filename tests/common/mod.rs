//! Shared fixtures: an in-process fake game service and snapshot helpers.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use meta_tictactoe::{CellIndex, ClientError, GameApi, GameState, Outcome, OutcomeObserver, Player};
use meta_tictactoe_protocol::{MoveRequest, NewGameRequest};
use serde_json::json;

/// Builds a snapshot from a 9-character board such as `"X...O...."`.
pub fn state(id: &str, board: &str, current_player: Player) -> GameState {
    let mut cells = [None; 9];
    for (i, c) in board.chars().enumerate().take(9) {
        cells[i] = match c {
            'X' => Some(Player::X),
            'O' => Some(Player::O),
            _ => None,
        };
    }
    let mut state = GameState::fresh(id, current_player);
    state.board = cells;
    state.status = "in progress".to_string();
    state
}

/// Snapshot of a game won by `winner`.
pub fn won(id: &str, board: &str, winner: Player) -> GameState {
    let mut state = state(id, board, winner.opponent());
    state.winner = Some(winner);
    state.status = format!("{} wins", winner);
    state
}

/// Snapshot of a drawn game.
pub fn drawn(id: &str) -> GameState {
    let mut state = state(id, "XOXXOOOXX", Player::O);
    state.is_draw = true;
    state.status = "draw".to_string();
    state
}

/// Observer counting every notification it receives.
#[derive(Debug, Default)]
pub struct CountingObserver {
    pub calls: Mutex<Vec<(usize, Outcome)>>,
}

impl CountingObserver {
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl OutcomeObserver for CountingObserver {
    fn on_outcome(&self, board: usize, outcome: Outcome) {
        self.calls.lock().unwrap().push((board, outcome));
    }
}

/// [`GameApi`] fake answering from queues and recording calls.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    pub creates: Mutex<VecDeque<Result<GameState, ClientError>>>,
    pub moves: Mutex<VecDeque<Result<GameState, ClientError>>>,
    pub create_calls: AtomicUsize,
    pub move_calls: Mutex<Vec<(String, usize)>>,
    /// When set, every call waits here before answering.
    pub gate: Option<Arc<tokio::sync::Notify>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<tokio::sync::Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn push_create(&self, result: Result<GameState, ClientError>) {
        self.creates.lock().unwrap().push_back(result);
    }

    pub fn push_move(&self, result: Result<GameState, ClientError>) {
        self.moves.lock().unwrap().push_back(result);
    }

    pub fn move_count(&self) -> usize {
        self.move_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GameApi for ScriptedApi {
    async fn create_session(&self, starting_player: Player) -> Result<GameState, ClientError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.creates.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(GameState::fresh("scripted", starting_player)))
    }

    async fn submit_move(&self, session_id: &str, index: CellIndex) -> Result<GameState, ClientError> {
        self.move_calls
            .lock()
            .unwrap()
            .push((session_id.to_string(), index.get()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.moves.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(ClientError::network("Move failed: no script")))
    }
}

/// In-process game service with real tic-tac-toe rules.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    games: Arc<Mutex<HashMap<String, GameState>>>,
    next_id: Arc<AtomicUsize>,
    /// Every move body received, as `(session_id, json)`.
    pub move_bodies: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
    /// Every creation body received.
    pub create_bodies: Arc<Mutex<Vec<serde_json::Value>>>,
    /// Answer creation with 503.
    pub fail_create: Arc<AtomicBool>,
}

impl FakeBackend {
    pub fn move_count(&self) -> usize {
        self.move_bodies.lock().unwrap().len()
    }

    pub fn game(&self, id: &str) -> Option<GameState> {
        self.games.lock().unwrap().get(id).cloned()
    }
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

async fn new_game(
    State(backend): State<FakeBackend>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    backend.create_bodies.lock().unwrap().push(body.clone());
    if backend.fail_create.load(Ordering::SeqCst) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let Ok(request) = serde_json::from_value::<NewGameRequest>(body) else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "bad request");
    };

    let id = format!("game-{}", backend.next_id.fetch_add(1, Ordering::SeqCst) + 1);
    let mut game = GameState::fresh(id.clone(), request.starting_player);
    game.status = "in progress".to_string();
    backend.games.lock().unwrap().insert(id, game.clone());
    Json(game).into_response()
}

async fn make_move(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    backend
        .move_bodies
        .lock()
        .unwrap()
        .push((id.clone(), body.clone()));

    if id == "broken" {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let Ok(request) = serde_json::from_value::<MoveRequest>(body) else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "invalid index");
    };

    let mut games = backend.games.lock().unwrap();
    let Some(game) = games.get_mut(&id) else {
        return detail(StatusCode::NOT_FOUND, "game not found");
    };
    if game.is_terminal() {
        return detail(StatusCode::BAD_REQUEST, "game over");
    }
    let index = request.index.get();
    if game.board[index].is_some() {
        return detail(StatusCode::BAD_REQUEST, "cell occupied");
    }

    let mover = game.current_player;
    game.board[index] = Some(mover);
    let wins = LINES
        .iter()
        .any(|line| line.iter().all(|&i| game.board[i] == Some(mover)));
    if wins {
        game.winner = Some(mover);
        game.status = format!("{} wins", mover);
    } else if game.board.iter().all(Option::is_some) {
        game.is_draw = true;
        game.status = "draw".to_string();
    } else {
        game.current_player = mover.opponent();
    }
    Json(game.clone()).into_response()
}

/// Starts the fake service on an ephemeral port and returns its base URL.
pub async fn spawn_backend() -> (String, FakeBackend) {
    let backend = FakeBackend::default();
    let app = Router::new()
        .route("/tictactoe/new", post(new_game))
        .route("/tictactoe/{id}/move", post(make_move))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), backend)
}

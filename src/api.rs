//! Transport to the game-session service.

use async_trait::async_trait;
use meta_tictactoe_protocol::{
    CellIndex, ErrorBody, GameState, MoveRequest, NewGameRequest, Player, move_path,
    new_game_path,
};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientErrorKind};

/// Remote operations a board session needs.
///
/// The service is the only authority on legality; implementations report
/// what it said and never second-guess it.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// Creates a new session with `starting_player` to move first.
    async fn create_session(&self, starting_player: Player) -> Result<GameState, ClientError>;

    /// Submits a move for `session_id` at `index`.
    async fn submit_move(
        &self,
        session_id: &str,
        index: CellIndex,
    ) -> Result<GameState, ClientError>;
}

/// [`GameApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpGameApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGameApi {
    /// Creates a client for the service described by `config`.
    #[instrument(skip(config), fields(api_url = %config.api_url()))]
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::network(format!("Failed to build HTTP client: {}", e)))?;

        info!("Created HTTP game client");
        Ok(Self {
            base_url: config.api_url().clone(),
            client,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Decodes a 2xx body into a snapshot.
    async fn decode_state(response: reqwest::Response, action: &str) -> Result<GameState, ClientError> {
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::network(format!("{} failed: {}", action, e)))?;

        serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, body = %text, "Undecodable game state");
            ClientError::network(format!("{} failed: invalid game state ({})", action, e))
        })
    }
}

#[async_trait]
impl GameApi for HttpGameApi {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn create_session(&self, starting_player: Player) -> Result<GameState, ClientError> {
        info!("Creating session");

        let response = self
            .client
            .post(format!("{}{}", self.base_url, new_game_path()))
            .json(&NewGameRequest { starting_player })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Create request did not complete");
                ClientError::network(format!("Create failed: {}", e))
            })?;

        let status = response.status();
        debug!(status = %status, "Create response");
        if !status.is_success() {
            return Err(ClientError::network(format!("Create failed: {}", status.as_u16())));
        }

        let state = Self::decode_state(response, "Create").await?;
        info!(session_id = %state.id, "Session created");
        Ok(state)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url, index = %index))]
    async fn submit_move(
        &self,
        session_id: &str,
        index: CellIndex,
    ) -> Result<GameState, ClientError> {
        if session_id.is_empty() {
            return Err(ClientError::new(ClientErrorKind::NoActiveSession));
        }

        let Some(path) = move_path(session_id) else {
            warn!(session_id, "Session id cannot be used as a path segment");
            return Err(ClientError::network(format!(
                "Move failed: session id {:?} cannot be addressed",
                session_id
            )));
        };

        info!("Submitting move");

        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&MoveRequest { index })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Move request did not complete");
                ClientError::network(format!("Move failed: {}", e))
            })?;

        let status = response.status();
        debug!(status = %status, "Move response");
        if !status.is_success() {
            // The body is optional; anything unreadable counts as no detail.
            let body: ErrorBody = response.json().await.unwrap_or_default();
            return Err(match body.reason() {
                Some(reason) => {
                    info!(status = %status, reason = %reason, "Move rejected");
                    ClientError::rejected(reason)
                }
                None => ClientError::network(format!("Move failed: {}", status.as_u16())),
            });
        }

        Self::decode_state(response, "Move").await
    }
}

//! TCP server - one shared game, many clients
//!
//! Every client sees the same [`Session`]. A request holds the session lock
//! for its whole resolve cycle, so clicks from different clients never
//! interleave. The sender gets the reply; state changes (load, click,
//! restart) are also pushed to every other connected client.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, Mutex, RwLock};

use crate::core::{CoreError, GameState};
use crate::protocol::{ClientMessage, ErrorCode, EventMessage, ServerMessage, SnapshotMessage};
use crate::types::Position;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seed used when a `load` request does not carry one.
    pub seed: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            seed: 1,
        }
    }
}

impl ServerConfig {
    /// Read `CUBE_BLAST_HOST`, `CUBE_BLAST_PORT` and `CUBE_BLAST_SEED`,
    /// falling back to the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with variables read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = lookup("CUBE_BLAST_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("CUBE_BLAST_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let seed = lookup("CUBE_BLAST_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        Self { host, port, seed }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

/// The shared game and the request handling around it.
#[derive(Debug)]
pub struct Session {
    game: Option<GameState>,
    default_seed: u32,
}

impl Session {
    pub fn new(default_seed: u32) -> Self {
        Self {
            game: None,
            default_seed,
        }
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    /// Apply one request and build the reply.
    pub fn handle(&mut self, msg: ClientMessage) -> ServerMessage {
        match msg {
            ClientMessage::Load { level, seed } => {
                let seed = seed.unwrap_or(self.default_seed);
                match GameState::new(level.to_spec(), seed) {
                    Ok(game) => {
                        info!("session: loaded level {} (seed {})", level.level_number, seed);
                        let reply = snapshot_of(&game);
                        self.game = Some(game);
                        reply
                    }
                    Err(e) => {
                        warn!("session: rejected level {}: {}", level.level_number, e);
                        ServerMessage::error(ErrorCode::MalformedLevel, e.to_string())
                    }
                }
            }
            ClientMessage::Click { seq, x, y } => {
                let Some(game) = self.game.as_mut() else {
                    return no_level();
                };
                match game.click(Position::new(x, y)) {
                    Ok(events) => ServerMessage::Events {
                        seq,
                        events: events.iter().map(EventMessage::from).collect(),
                    },
                    Err(e) => internal(e),
                }
            }
            ClientMessage::Restart => {
                let Some(game) = self.game.as_mut() else {
                    return no_level();
                };
                match game.restart() {
                    Ok(()) => snapshot_of(game),
                    Err(e) => internal(e),
                }
            }
            ClientMessage::Snapshot => match self.game.as_ref() {
                Some(game) => snapshot_of(game),
                None => no_level(),
            },
        }
    }
}

fn snapshot_of(game: &GameState) -> ServerMessage {
    ServerMessage::Snapshot(SnapshotMessage::from(&game.snapshot()))
}

fn no_level() -> ServerMessage {
    ServerMessage::error(ErrorCode::NoLevel, "no level loaded")
}

fn internal(e: CoreError) -> ServerMessage {
    warn!("session: engine error: {}", e);
    ServerMessage::error(ErrorCode::Internal, e.to_string())
}

struct ClientHandle {
    id: usize,
    tx: mpsc::UnboundedSender<String>,
}

/// Shared server state
struct ServerState {
    session: Mutex<Session>,
    clients: RwLock<Vec<ClientHandle>>,
}

impl ServerState {
    fn new(seed: u32) -> Self {
        Self {
            session: Mutex::new(Session::new(seed)),
            clients: RwLock::new(Vec::new()),
        }
    }

    /// Push a line to every client except `origin`.
    async fn broadcast(&self, origin: usize, line: &str) {
        let clients = self.clients.read().await;
        for client in clients.iter().filter(|c| c.id != origin) {
            let _ = client.tx.send(line.to_string());
        }
    }

    /// Handle one request line from `origin`.
    ///
    /// The reply and any broadcast are queued before the session lock is
    /// released, so every client sees resolve cycles in session order.
    /// Returns false once `reply_tx` is closed.
    async fn dispatch(
        &self,
        origin: usize,
        line: &str,
        reply_tx: &mpsc::UnboundedSender<String>,
    ) -> anyhow::Result<bool> {
        let msg = match serde_json::from_str::<ClientMessage>(line) {
            Ok(msg) => msg,
            Err(e) => {
                let reply = ServerMessage::error(ErrorCode::BadRequest, e.to_string());
                return Ok(reply_tx.send(serde_json::to_string(&reply)?).is_ok());
            }
        };
        let changes_state = !matches!(msg, ClientMessage::Snapshot);

        let mut session = self.session.lock().await;
        let reply = session.handle(msg);
        let text = serde_json::to_string(&reply)?;
        if changes_state && !matches!(reply, ServerMessage::Error { .. }) {
            self.broadcast(origin, &text).await;
        }
        let delivered = reply_tx.send(text).is_ok();
        drop(session);
        Ok(delivered)
    }
}

/// Run the server until the listener fails.
///
/// When `ready_tx` is given, the bound address is sent on it once the
/// listener is up (useful with port 0).
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let local_addr = listener.local_addr()?;
    info!("listening on {}", local_addr);

    if let Some(tx) = ready_tx {
        let _ = tx.send(local_addr);
    }

    let state = Arc::new(ServerState::new(config.seed));
    let mut client_id_counter = 0usize;

    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!("client {} connected from {}", client_id, addr);

        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, Arc::clone(&state)).await {
                warn!("client {} error: {:#}", client_id, e);
            }
            state.clients.write().await.retain(|c| c.id != client_id);
            info!("client {} disconnected", client_id);
        });
    }
}

async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut lines = BufReader::new(reader).lines();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    state.clients.write().await.push(ClientHandle {
        id: client_id,
        tx: tx.clone(),
    });

    let write_task = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if writer.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            if writer.write_all(b"\n").await.is_err() {
                break;
            }
        }
    });

    let _ = tx.send(serde_json::to_string(&ServerMessage::welcome())?);

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!("client {} -> {}", client_id, line);

        if !state.dispatch(client_id, line, &tx).await? {
            break;
        }
    }

    // Drop our handle so the writer drains and exits.
    state.clients.write().await.retain(|c| c.id != client_id);
    drop(tx);
    let _ = write_task.await;
    Ok(())
}

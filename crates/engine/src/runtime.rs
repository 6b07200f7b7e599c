//! Engine runtime - the serial execution context of one game.
//!
//! A [`Game`] is moved into a single tokio task. Intents arrive over an
//! unbounded channel and are applied one at a time; the [`TurnTimer`] is
//! polled by the same task, so a timer expiry and a placement never overlap.

use std::fmt;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::core::{
    Game, GameEvent, GamePiece, GameSnapshot, IntentError, PlaceError, Placement,
};
use crate::timer::TurnTimer;
use crate::types::{Coord, Intent};

type Reply<T> = Option<oneshot::Sender<T>>;
type PieceResult = Result<(GamePiece, GamePiece), IntentError>;

/// Command delivered to the engine task.
#[derive(Debug)]
enum Command {
    Start(Reply<bool>),
    PlaceAt {
        x: i32,
        y: i32,
        reply: Reply<Result<Placement, PlaceError>>,
    },
    DropAtAim(Reply<Result<Placement, PlaceError>>),
    Rotate(Reply<PieceResult>),
    Swap(Reply<PieceResult>),
    MoveAim {
        dx: i32,
        dy: i32,
        reply: Reply<Coord>,
    },
    Stop(Reply<bool>),
    Status(oneshot::Sender<EngineStatus>),
}

/// Errors surfaced by [`Engine`] calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The engine task has shut down
    Closed,
    Place(PlaceError),
    Intent(IntentError),
}

impl EngineError {
    pub fn code(self) -> &'static str {
        match self {
            EngineError::Closed => "closed",
            EngineError::Place(e) => e.code(),
            EngineError::Intent(e) => e.code(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Closed => f.write_str("engine task has shut down"),
            EngineError::Place(e) => write!(f, "placement refused: {}", e),
            EngineError::Intent(e) => write!(f, "intent ignored: {}", e),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<PlaceError> for EngineError {
    fn from(value: PlaceError) -> Self {
        EngineError::Place(value)
    }
}

impl From<IntentError> for EngineError {
    fn from(value: IntentError) -> Self {
        EngineError::Intent(value)
    }
}

/// Game snapshot plus the state of the turn timer
#[derive(Debug, Clone, PartialEq)]
pub struct EngineStatus {
    pub snapshot: GameSnapshot,
    pub timer_armed: bool,
    pub timer_remaining: Option<Duration>,
    /// Delay the timer was last armed with (ms)
    pub timer_delay_ms: u32,
}

/// Forward every game notification into a channel.
///
/// Replaces any listeners already registered on `game`.
pub fn event_channel(game: &mut Game) -> mpsc::UnboundedReceiver<GameEvent> {
    let (tx, rx) = mpsc::unbounded_channel::<GameEvent>();
    game.listeners_mut().forward_to(move |event| {
        let _ = tx.send(event);
    });
    rx
}

/// Handle to a running game
pub struct Engine {
    cmd_tx: mpsc::UnboundedSender<Command>,
    task: JoinHandle<Game>,
}

impl Engine {
    /// Move `game` into a new engine task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(game: Game) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<Command>();
        let task = tokio::spawn(run(game, cmd_rx));
        Self { cmd_tx, task }
    }

    fn submit(&self, command: Command) -> Result<(), EngineError> {
        self.cmd_tx.send(command).map_err(|_| EngineError::Closed)
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.submit(make(tx))?;
        rx.await.map_err(|_| EngineError::Closed)
    }

    /// Queue an intent without waiting for its outcome
    pub fn send(&self, intent: Intent) -> Result<(), EngineError> {
        let command = match intent {
            Intent::Start => Command::Start(None),
            Intent::PlaceAt { x, y } => Command::PlaceAt { x, y, reply: None },
            Intent::Rotate => Command::Rotate(None),
            Intent::Swap => Command::Swap(None),
            Intent::MoveAim { dx, dy } => Command::MoveAim {
                dx,
                dy,
                reply: None,
            },
            Intent::DropAtAim => Command::DropAtAim(None),
            Intent::Stop => Command::Stop(None),
        };
        self.submit(command)
    }

    /// Start the game and arm the turn timer. Returns false if already started.
    pub async fn start(&self) -> Result<bool, EngineError> {
        self.request(|tx| Command::Start(Some(tx))).await
    }

    pub async fn place_at(&self, x: i32, y: i32) -> Result<Placement, EngineError> {
        let result = self
            .request(|tx| Command::PlaceAt {
                x,
                y,
                reply: Some(tx),
            })
            .await?;
        Ok(result?)
    }

    pub async fn drop_piece_at_aim(&self) -> Result<Placement, EngineError> {
        let result = self.request(|tx| Command::DropAtAim(Some(tx))).await?;
        Ok(result?)
    }

    pub async fn rotate_current_piece(&self) -> Result<(GamePiece, GamePiece), EngineError> {
        let result = self.request(|tx| Command::Rotate(Some(tx))).await?;
        Ok(result?)
    }

    pub async fn swap_current_piece(&self) -> Result<(GamePiece, GamePiece), EngineError> {
        let result = self.request(|tx| Command::Swap(Some(tx))).await?;
        Ok(result?)
    }

    pub async fn move_aim(&self, dx: i32, dy: i32) -> Result<Coord, EngineError> {
        self.request(|tx| Command::MoveAim {
            dx,
            dy,
            reply: Some(tx),
        })
        .await
    }

    /// End the game and cancel the turn timer. Returns false if already over.
    pub async fn stop(&self) -> Result<bool, EngineError> {
        self.request(|tx| Command::Stop(Some(tx))).await
    }

    pub async fn status(&self) -> Result<EngineStatus, EngineError> {
        self.request(Command::Status).await
    }

    pub async fn snapshot(&self) -> Result<GameSnapshot, EngineError> {
        Ok(self.status().await?.snapshot)
    }

    /// Shut the task down and take the game back
    pub async fn join(self) -> Result<Game, EngineError> {
        let Engine { cmd_tx, task } = self;
        drop(cmd_tx);
        task.await.map_err(|_| EngineError::Closed)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("closed", &self.cmd_tx.is_closed())
            .finish()
    }
}

fn reply<T>(tx: Reply<T>, value: T) {
    if let Some(tx) = tx {
        let _ = tx.send(value);
    }
}

async fn run(mut game: Game, mut cmd_rx: mpsc::UnboundedReceiver<Command>) -> Game {
    let mut timer = TurnTimer::new();
    if game.is_running() {
        timer.arm(game.timer_delay_ms());
    }

    loop {
        tokio::select! {
            biased;

            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => apply(&mut game, &mut timer, cmd),
                None => break,
            },
            _ = timer.expired() => {
                if let Some(expiry) = game.expire_turn() {
                    if !expiry.game_over {
                        timer.arm(game.timer_delay_ms());
                    }
                }
            }
        }

        if game.is_over() && timer.is_armed() {
            timer.cancel();
        }
    }

    log::debug!("Engine task finished");
    game
}

fn apply(game: &mut Game, timer: &mut TurnTimer, cmd: Command) {
    match cmd {
        Command::Start(tx) => {
            let started = game.start();
            if started {
                timer.arm(game.timer_delay_ms());
            }
            reply(tx, started);
        }
        Command::PlaceAt { x, y, reply: tx } => {
            let result = game.place_at(x, y);
            if result.is_ok() && game.is_running() {
                timer.arm(game.timer_delay_ms());
            }
            reply(tx, result);
        }
        Command::DropAtAim(tx) => {
            let result = game.drop_piece_at_aim();
            if result.is_ok() && game.is_running() {
                timer.arm(game.timer_delay_ms());
            }
            reply(tx, result);
        }
        Command::Rotate(tx) => reply(tx, game.rotate_current_piece()),
        Command::Swap(tx) => reply(tx, game.swap_current_piece()),
        Command::MoveAim { dx, dy, reply: tx } => reply(tx, game.move_aim(dx, dy)),
        Command::Stop(tx) => {
            let stopped = game.stop();
            timer.cancel();
            reply(tx, stopped);
        }
        Command::Status(tx) => {
            let _ = tx.send(EngineStatus {
                snapshot: game.snapshot(),
                timer_armed: timer.is_armed(),
                timer_remaining: timer.remaining(),
                timer_delay_ms: timer.delay_ms(),
            });
        }
    }
}

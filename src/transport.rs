use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use tracing::{error, info};

use crate::engine::Engine;
use crate::error::{EngineError, TransportError};
use crate::game::GameLoop;
use crate::types::{Request, Response};

/// The presentation side: sends requests, receives responses.
#[derive(Debug, Clone)]
pub struct ControllerEnd {
    requests: Sender<Request>,
    responses: Receiver<Response>,
}

/// The game-loop side: receives requests, sends responses.
#[derive(Debug)]
pub struct LoopEnd {
    requests: Receiver<Request>,
    responses: Sender<Response>,
}

/// One unbounded FIFO per direction. Requests sent while the loop is busy
/// queue up.
pub fn channel() -> (ControllerEnd, LoopEnd) {
    let (request_tx, request_rx) = unbounded();
    let (response_tx, response_rx) = unbounded();
    (
        ControllerEnd {
            requests: request_tx,
            responses: response_rx,
        },
        LoopEnd {
            requests: request_rx,
            responses: response_tx,
        },
    )
}

impl ControllerEnd {
    pub fn sender(&self) -> Sender<Request> {
        self.requests.clone()
    }

    pub fn send(&self, request: Request) -> Result<(), TransportError> {
        self.requests
            .send(request)
            .map_err(|_| TransportError::GameLoopGone)
    }

    /// Blocks until the next response arrives.
    pub fn recv(&self) -> Result<Response, TransportError> {
        self.responses
            .recv()
            .map_err(|_| TransportError::GameLoopGone)
    }

    pub fn try_recv(&self) -> Result<Option<Response>, TransportError> {
        match self.responses.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(TransportError::GameLoopGone),
        }
    }
}

impl LoopEnd {
    pub fn send(&self, response: Response) -> Result<(), TransportError> {
        self.responses
            .send(response)
            .map_err(|_| TransportError::ControllerGone)
    }
}

/// Brings up an engine and serves requests until the controller hangs up.
///
/// A failed engine is reported once as [`Response::EngineUnavailable`] and
/// nothing else is ever processed.
pub fn run_game_loop<E, F>(make_engine: F, end: LoopEnd) -> Result<(), TransportError>
where
    E: Engine,
    F: FnOnce() -> Result<E, EngineError>,
{
    let engine = match make_engine() {
        Ok(engine) => engine,
        Err(err) => {
            error!(%err, "engine failed to start");
            return end.send(Response::EngineUnavailable);
        }
    };

    let mut game = GameLoop::new(engine);
    end.send(Response::Loaded)?;
    info!("game loop ready");

    for request in end.requests.iter() {
        let mut sent = Ok(());
        game.handle(request, &mut |snapshot| {
            if sent.is_ok() {
                sent = end.send(Response::Snapshot(snapshot));
            }
        });
        sent?;
    }

    info!("controller hung up, game loop stopping");
    Ok(())
}

/// Runs [`run_game_loop`] on its own thread. The engine is built on that
/// thread, so only the factory has to be `Send`.
pub fn spawn_game_loop<E, F>(
    make_engine: F,
) -> Result<(ControllerEnd, JoinHandle<Result<(), TransportError>>), TransportError>
where
    E: Engine,
    F: FnOnce() -> Result<E, EngineError> + Send + 'static,
{
    let (controller, worker) = channel();
    let handle = thread::Builder::new()
        .name("game-loop".into())
        .spawn(move || run_game_loop(make_engine, worker))
        .map_err(|err| TransportError::Spawn {
            message: err.to_string(),
        })?;
    Ok((controller, handle))
}

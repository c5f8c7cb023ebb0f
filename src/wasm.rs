use js_sys::Function;
use serde::Serialize;
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::engine::BitboardEngine;
use crate::game::GameLoop;
use crate::types::{Request, Response};

/// Game loop for a Web Worker script:
///
/// ```js,ignore
/// const game = new WorkerGameLoop(3, 5000);
/// postMessage(WorkerGameLoop.loaded());
/// onmessage = (e) => game.handle(e.data, postMessage);
/// ```
#[wasm_bindgen]
pub struct WorkerGameLoop {
    game: GameLoop<BitboardEngine>,
}

#[wasm_bindgen]
impl WorkerGameLoop {
    /// Fails with a message when the configuration is invalid; the worker
    /// script should then post `unavailable()` instead of `loaded()`.
    #[wasm_bindgen(constructor)]
    pub fn new(level: u8, timeout_ms: u32) -> Result<WorkerGameLoop, JsValue> {
        let config = EngineConfig::new(level, u64::from(timeout_ms)).map_err(to_js_error)?;
        let engine = BitboardEngine::new(config).map_err(to_js_error)?;
        Ok(Self {
            game: GameLoop::new(engine),
        })
    }

    pub fn loaded() -> Result<JsValue, JsValue> {
        to_js(&Response::Loaded)
    }

    pub fn unavailable() -> Result<JsValue, JsValue> {
        to_js(&Response::EngineUnavailable)
    }

    /// Runs one request to completion, calling `post` with every snapshot
    /// as it is produced. A payload that is not a request is answered like
    /// an illegal move: the current snapshot is posted again.
    pub fn handle(&mut self, request: JsValue, post: &Function) -> Result<(), JsValue> {
        let request = match serde_wasm_bindgen::from_value::<Request>(request) {
            Ok(request) => Some(request),
            Err(err) => {
                warn!(%err, "undecodable request");
                None
            }
        };

        let mut posted = Ok(());
        let mut emit = |snapshot| {
            if posted.is_ok() {
                posted = to_js(&Response::Snapshot(snapshot))
                    .and_then(|message| post.call1(&JsValue::NULL, &message).map(|_| ()));
            }
        };

        match request {
            Some(request) => self.game.handle(request, &mut emit),
            None => emit(self.game.snapshot()),
        }
        posted
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

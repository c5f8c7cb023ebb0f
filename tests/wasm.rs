//! Worker surface tests.
//!
//! Run with: wasm-pack test --node

#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Function, Reflect};
use othello::wasm::WorkerGameLoop;
use othello::{GameState, Request, Response};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

/// A `postMessage` stand-in that pushes onto `posts`.
fn collector(posts: &Array) -> Function {
    let push: Function = Reflect::get(posts, &JsValue::from_str("push"))
        .unwrap()
        .into();
    push.bind(posts)
}

fn responses(posts: &Array) -> Vec<Response> {
    posts
        .iter()
        .map(|value| serde_wasm_bindgen::from_value(value).unwrap())
        .collect()
}

fn states(posts: &Array) -> Vec<GameState> {
    responses(posts)
        .into_iter()
        .map(|response| match response {
            Response::Snapshot(snapshot) => snapshot.state,
            other => panic!("unexpected {other:?}"),
        })
        .collect()
}

fn request(request: Request) -> JsValue {
    serde_wasm_bindgen::to_value(&request).unwrap()
}

#[wasm_bindgen_test]
fn lifecycle_messages_decode() {
    let loaded: Response = serde_wasm_bindgen::from_value(WorkerGameLoop::loaded().unwrap()).unwrap();
    let unavailable: Response =
        serde_wasm_bindgen::from_value(WorkerGameLoop::unavailable().unwrap()).unwrap();

    assert_eq!(loaded, Response::Loaded);
    assert_eq!(unavailable, Response::EngineUnavailable);
}

#[wasm_bindgen_test]
fn invalid_level_is_rejected() {
    assert!(WorkerGameLoop::new(0, 1_000).is_err());
    assert!(WorkerGameLoop::new(7, 1_000).is_err());
}

#[wasm_bindgen_test]
fn move_posts_every_snapshot() {
    let mut game = WorkerGameLoop::new(1, 1_000).unwrap();
    let posts = Array::new();
    let post = collector(&posts);

    game.handle(request(Request::NewGame), &post).unwrap();
    game.handle(request(Request::Move { row: 2, col: 3 }), &post).unwrap();

    assert_eq!(
        states(&posts),
        vec![
            GameState::BlackToMove,
            GameState::WhiteToMove,
            GameState::BlackToMove,
        ]
    );
}

#[wasm_bindgen_test]
fn garbage_is_answered_with_current_snapshot() {
    let mut game = WorkerGameLoop::new(1, 1_000).unwrap();
    let posts = Array::new();
    let post = collector(&posts);

    game.handle(request(Request::NewGame), &post).unwrap();
    game.handle(JsValue::from_str("resign"), &post).unwrap();

    let out = responses(&posts);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0], out[1]);
}

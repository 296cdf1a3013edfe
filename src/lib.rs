//! Quoridor rules engine: move legality, wall validation, shortest paths,
//! win detection and a greedy automatic player.

pub mod board;
pub mod error;
pub mod game;
pub mod graph;
pub mod path;
pub mod strategy;
pub mod tournament;
pub mod walls;

pub use board::{Coord, Orientation, WallSet};
pub use error::{QuoridorError, Result};
pub use game::{Player, PlayerState, Quoridor, Snapshot};
pub use strategy::{Action, CandidateOrder, GreedyStrategy, ShortestPathStrategy, Strategy};

// Import wasm-bindgen
use wasm_bindgen::prelude::*;

// Import the getrandom crate with js feature for WebAssembly
extern crate getrandom;

// Log helper
#[wasm_bindgen]
pub fn wasm_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

fn to_js(err: QuoridorError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// WebAssembly-friendly wrapper speaking the JSON snapshot format
#[wasm_bindgen]
pub struct QuoridorGame {
    game_instance: Quoridor,
}

#[wasm_bindgen]
impl QuoridorGame {
    #[wasm_bindgen(constructor)]
    pub fn new(name1: &str, name2: &str) -> Self {
        console_error_panic_hook::set_once();
        Self {
            game_instance: Quoridor::new(name1, name2),
        }
    }

    #[wasm_bindgen(js_name = fromSnapshot)]
    pub fn from_snapshot(json: &str) -> std::result::Result<QuoridorGame, JsValue> {
        console_error_panic_hook::set_once();
        let game_instance = Quoridor::from_json(json).map_err(to_js)?;
        Ok(Self { game_instance })
    }

    #[wasm_bindgen(js_name = movePawn)]
    pub fn move_pawn(&mut self, player: usize, x: i32, y: i32) -> std::result::Result<(), JsValue> {
        self.game_instance.move_pawn(player, (x, y)).map_err(to_js)
    }

    #[wasm_bindgen(js_name = placeWall)]
    pub fn place_wall(
        &mut self,
        player: usize,
        x: i32,
        y: i32,
        orientation: &str,
    ) -> std::result::Result<(), JsValue> {
        let orientation = match orientation {
            "horizontal" => Orientation::Horizontal,
            "vertical" => Orientation::Vertical,
            other => return Err(JsValue::from_str(&format!("unknown orientation '{other}'"))),
        };
        self.game_instance.place_wall(player, (x, y), orientation).map_err(to_js)
    }

    // Plays one greedy action and returns it as JSON
    pub fn play(&mut self, player: usize) -> std::result::Result<String, JsValue> {
        let action = self.game_instance.play(player).map_err(to_js)?;
        serde_json::to_string(&action).map_err(|err| to_js(err.into()))
    }

    // Current snapshot as JSON
    pub fn state(&self) -> std::result::Result<String, JsValue> {
        serde_json::to_string(&self.game_instance.snapshot()).map_err(|err| to_js(err.into()))
    }

    pub fn winner(&self) -> Option<String> {
        self.game_instance.is_finished().map(str::to_string)
    }
}

//! Browser front end for the game.
//!
//! A small axum server owns the engine behind a mutex (floods and previews
//! never interleave), serves the static page, and pushes a fresh board to
//! every connected client over SSE after each mutating move.

mod assets;

use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::{net::TcpListener, sync::broadcast};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};
use tracing::info;

use crate::{
    config::{GameConfig, GameSize},
    engine::Engine,
    error::FloodError,
    grid::TilePos,
    tile::{Marker, TileType},
};

/// A named tile-type-to-color mapping, applied client side.
#[derive(Clone, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub land: &'static str,
    pub shore: &'static str,
    pub water: &'static str,
}

pub const THEMES: &[Theme] = &[
    Theme {
        name: "Default",
        land: "#2f9e44",
        shore: "#f59f00",
        water: "#1971c2",
    },
    Theme {
        name: "Lava",
        land: "#495057",
        shore: "#868e96",
        water: "#e03131",
    },
];

#[derive(Serialize)]
struct TileView {
    #[serde(rename = "type")]
    tile_type: TileType,
    population: u32,
    markers: Vec<Marker>,
}

#[derive(Serialize)]
struct BoardView {
    size: usize,
    tile_side: u32,
    water_count: usize,
    total_tiles: usize,
    total_population: u64,
    floods: u64,
    completed: bool,
    tiles: Vec<TileView>,
}

#[derive(Serialize)]
struct SelectionView {
    tiles: Vec<TilePos>,
}

/// One entry of the size menu, derived from the preset table.
#[derive(Serialize)]
struct SizeView {
    name: String,
    tiles_per_row: usize,
}

fn size_views() -> Vec<SizeView> {
    GameSize::ALL
        .into_iter()
        .map(|size| SizeView {
            name: size.to_string(),
            tiles_per_row: size.tiles_per_row(),
        })
        .collect()
}

struct Session {
    engine: Engine,
    size: GameSize,
}

struct AppState {
    session: std::sync::Mutex<Session>,
    broadcaster: broadcast::Sender<String>,
}

pub async fn run(config: GameConfig) -> Result<()> {
    let engine = Engine::new(config.engine_settings())?;

    let (tx, _) = broadcast::channel::<String>(64);
    let state = Arc::new(AppState {
        session: std::sync::Mutex::new(Session {
            engine,
            size: config.board.size,
        }),
        broadcaster: tx,
    });

    let router = Router::new()
        .route("/", get(index))
        .route("/styles.css", get(styles))
        .route("/app.js", get(script))
        .route("/api/state", get(board_state))
        .route("/api/themes", get(themes))
        .route("/api/sizes", get(sizes))
        .route("/api/selection/:x/:y", get(selection))
        .route("/api/flood/:x/:y", post(flood))
        .route("/api/new", post(new_game))
        .route("/api/size/:name", post(set_size))
        .route("/api/events", get(stream_events))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid server address"))?;
    info!(%addr, "flood board live (Ctrl+C to stop)");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}

async fn index() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

async fn styles() -> impl IntoResponse {
    Response::builder()
        .header(header::CONTENT_TYPE, "text/css; charset=utf-8")
        .body(assets::STYLES_CSS.to_string())
        .unwrap()
}

async fn script() -> impl IntoResponse {
    Response::builder()
        .header(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )
        .body(assets::APP_JS.to_string())
        .unwrap()
}

fn board_view(session: &Session) -> BoardView {
    let engine = &session.engine;
    let tiles = engine
        .grid()
        .tiles()
        .iter()
        .map(|tile| TileView {
            tile_type: tile.tile_type(),
            population: tile.population().total(),
            markers: tile.population().markers().to_vec(),
        })
        .collect();
    BoardView {
        size: engine.size(),
        tile_side: session.size.tile_side(),
        water_count: engine.water_count(),
        total_tiles: engine.total_tiles(),
        total_population: engine.total_population(),
        floods: engine.floods(),
        completed: engine.is_complete(),
        tiles,
    }
}

fn bad_request(err: FloodError) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}

impl AppState {
    fn broadcast_board(&self, view: &BoardView) {
        if let Ok(payload) = serde_json::to_string(view) {
            let _ = self.broadcaster.send(payload);
        }
    }
}

async fn board_state(State(state): State<Arc<AppState>>) -> Json<BoardView> {
    let session = state.session.lock().expect("session lock poisoned");
    Json(board_view(&session))
}

async fn themes() -> Json<Vec<Theme>> {
    Json(THEMES.to_vec())
}

async fn sizes() -> Json<Vec<SizeView>> {
    Json(size_views())
}

async fn selection(
    State(state): State<Arc<AppState>>,
    Path((x, y)): Path<(usize, usize)>,
) -> Result<Json<SelectionView>, (StatusCode, String)> {
    let session = state.session.lock().expect("session lock poisoned");
    let tiles = session.engine.selection(x, y).map_err(bad_request)?;
    Ok(Json(SelectionView { tiles }))
}

async fn flood(
    State(state): State<Arc<AppState>>,
    Path((x, y)): Path<(usize, usize)>,
) -> Result<Json<BoardView>, (StatusCode, String)> {
    let mut session = state.session.lock().expect("session lock poisoned");
    session.engine.start_flood(x, y).map_err(bad_request)?;
    let view = board_view(&session);
    state.broadcast_board(&view);
    Ok(Json(view))
}

async fn new_game(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BoardView>, (StatusCode, String)> {
    let mut session = state.session.lock().expect("session lock poisoned");
    session.engine.reinitialize().map_err(bad_request)?;
    let view = board_view(&session);
    state.broadcast_board(&view);
    Ok(Json(view))
}

async fn set_size(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<BoardView>, (StatusCode, String)> {
    let size: GameSize = name
        .parse()
        .map_err(|msg: String| (StatusCode::BAD_REQUEST, msg))?;
    let mut session = state.session.lock().expect("session lock poisoned");
    session
        .engine
        .resize(size.tiles_per_row())
        .map_err(bad_request)?;
    session.size = size;
    let view = board_view(&session);
    state.broadcast_board(&view);
    Ok(Json(view))
}

async fn stream_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.broadcaster.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(payload) => Some(Ok(Event::default().data(payload))),
        Err(_) => None,
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(2))
            .text("keep-alive"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_menu_lists_every_preset() {
        let views = size_views();
        assert_eq!(views.len(), GameSize::ALL.len());
        let names: Vec<&str> = views.iter().map(|view| view.name.as_str()).collect();
        assert_eq!(names, ["small", "medium", "big", "huge", "overkill"]);
        assert_eq!(views[0].tiles_per_row, 10);
        assert_eq!(views[4].tiles_per_row, 100);
    }
}

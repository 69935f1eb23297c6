use std::cell::RefCell;

use leptos::prelude::*;

use hextanks_shared::{GameSnapshot, ServerEvent};

use crate::canvas::{self, CanvasSurface};
use crate::config::ClientConfig;
use crate::render_loop::RenderScheduler;
use crate::renderer::HexGridRenderer;
use crate::socket::{self, ConnectionStatus};

pub(crate) fn canvas_dimensions() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (800.0, 600.0);
    };
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);
    (w, h)
}

/// Renderer plus the most recent snapshot that has not been painted yet.
struct MatchScene {
    renderer: HexGridRenderer<CanvasSurface>,
    pending: Option<GameSnapshot>,
    scheduler: RenderScheduler,
}

thread_local! {
    static MATCH_SCENE: RefCell<Option<MatchScene>> = const { RefCell::new(None) };
}

fn paint_pending(status: RwSignal<String>) {
    MATCH_SCENE.with(|slot| {
        let Ok(mut slot) = slot.try_borrow_mut() else {
            return;
        };
        let Some(scene) = slot.as_mut() else {
            return;
        };
        let Some(snapshot) = scene.pending.take() else {
            return;
        };
        match scene.renderer.render_frame(&snapshot) {
            Ok(()) => status.set(format!("{} tanks on the field", snapshot.tanks.len())),
            Err(e) => {
                tracing::error!(error = %e, "rejected game state snapshot");
                status.set(e.to_string());
            }
        }
    });
}

fn accept_snapshot(snapshot: GameSnapshot) {
    MATCH_SCENE.with(|slot| {
        if let Some(scene) = slot.borrow_mut().as_mut() {
            scene.pending = Some(snapshot);
            scene.scheduler.mark_dirty();
        }
    });
}

/// Match page: one canvas redrawn from each `game_state` the server pushes.
#[component]
pub fn MatchView(config: ClientConfig) -> impl IntoView {
    let (w, h) = canvas_dimensions();
    let status = RwSignal::new(String::from("Waiting for game state..."));
    let connection = RwSignal::new(ConnectionStatus::Connecting);

    let url = web_sys::window()
        .map(|win| {
            let location = win.location();
            config.socket_url(
                &location.protocol().unwrap_or_default(),
                &location.host().unwrap_or_default(),
            )
        })
        .unwrap_or_else(|| config.socket_path.clone());
    let canvas_id = config.canvas_id.clone();
    let hex_size = config.hex_size;
    let terrain_policy = config.unknown_terrain;

    // Runs after mount, once the canvas element exists.
    Effect::new(move || {
        let renderer = match canvas::configure(&canvas_id, hex_size, terrain_policy) {
            Ok(renderer) => renderer,
            Err(e) => {
                tracing::error!(error = %e, "match view has no render surface");
                status.set(e.to_string());
                return;
            }
        };
        let scheduler = RenderScheduler::new(move || paint_pending(status));
        MATCH_SCENE.with(|slot| {
            *slot.borrow_mut() = Some(MatchScene {
                renderer,
                pending: None,
                scheduler,
            });
        });

        socket::connect(
            &url,
            |event| match event {
                ServerEvent::GameState { map, tanks } => accept_snapshot(GameSnapshot { map, tanks }),
                other => tracing::debug!(event = ?other, "match view ignoring event"),
            },
            move |s| connection.set(s),
        );
        on_cleanup(|| {
            socket::disconnect();
            let scene = MATCH_SCENE.with(|slot| slot.borrow_mut().take());
            drop(scene);
        });
    });

    view! {
        <div class="match">
            <canvas id=config.canvas_id.clone() width={w as u32} height={h as u32} />
            <div class="match-status">
                {move || status.get()}
                {move || (connection.get() == ConnectionStatus::Closed).then(|| " (disconnected)")}
            </div>
        </div>
    }
}

use std::cell::RefCell;

use gloo_timers::callback::Interval;
use leptos::prelude::*;

use hextanks_shared::{ClientMessage, ServerEvent};

use crate::config::{ClientConfig, QUEUE_TICK_MS};
use crate::queue::{Cancel, QueueClient, QueueHost};
use crate::socket::{self, ConnectionStatus};

const INITIAL_STATUS: &str = "Searching for an opponent...";

impl Cancel for Interval {
    fn cancel(self) {
        drop(Interval::cancel(self));
    }
}

/// Signals backing the lobby widget.
#[derive(Clone, Copy)]
struct QueueUi {
    joined: RwSignal<bool>,
    timer_text: RwSignal<String>,
    status_text: RwSignal<String>,
}

struct BrowserQueueHost {
    ui: QueueUi,
}

impl QueueHost for BrowserQueueHost {
    type Ticker = Interval;

    fn start_ticker(&mut self) -> Interval {
        Interval::new(QUEUE_TICK_MS, || with_client(|client| client.tick()))
    }

    fn send(&mut self, message: ClientMessage) {
        if let Err(e) = socket::send(&message) {
            tracing::warn!(error = %e, "join_queue not sent");
        }
    }

    fn show_queue_ui(&mut self) {
        self.ui.joined.set(true);
    }

    fn set_timer_text(&mut self, text: &str) {
        self.ui.timer_text.set(text.to_string());
    }

    fn set_status_text(&mut self, text: &str) {
        self.ui.status_text.set(text.to_string());
    }

    fn navigate(&mut self, route: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(route) {
            tracing::error!(route, error = ?e, "navigation to match view failed");
        }
    }
}

thread_local! {
    static QUEUE_CLIENT: RefCell<Option<QueueClient<BrowserQueueHost>>> = const { RefCell::new(None) };
}

fn with_client(f: impl FnOnce(&mut QueueClient<BrowserQueueHost>)) {
    QUEUE_CLIENT.with(|slot| {
        let Ok(mut slot) = slot.try_borrow_mut() else {
            tracing::warn!("queue client busy, dropping reentrant call");
            return;
        };
        if let Some(client) = slot.as_mut() {
            f(client);
        }
    });
}

fn teardown() {
    // Take the client out before dropping it so its Drop runs outside the borrow.
    let client = QUEUE_CLIENT.with(|slot| slot.borrow_mut().take());
    drop(client);
}

/// Matchmaking widget: a join button, a status line and a queue timer.
#[component]
pub fn Lobby(config: ClientConfig) -> impl IntoView {
    let ui = QueueUi {
        joined: RwSignal::new(false),
        timer_text: RwSignal::new(String::new()),
        status_text: RwSignal::new(INITIAL_STATUS.to_string()),
    };
    let connection = RwSignal::new(ConnectionStatus::Connecting);

    QUEUE_CLIENT.with(|slot| {
        let old = slot.borrow_mut().replace(QueueClient::new(
            BrowserQueueHost { ui },
            config.queue_kind,
            config.match_route.clone(),
        ));
        drop(old);
    });

    let url = web_sys::window()
        .map(|w| {
            let location = w.location();
            config.socket_url(
                &location.protocol().unwrap_or_default(),
                &location.host().unwrap_or_default(),
            )
        })
        .unwrap_or_else(|| config.socket_path.clone());

    Effect::new(move || {
        socket::connect(
            &url,
            |event: ServerEvent| with_client(|client| client.dispatch(event)),
            move |status| connection.set(status),
        );
        on_cleanup(|| {
            teardown();
            socket::disconnect();
        });
    });

    view! {
        <div class="lobby">
            <button
                id="join-queue"
                prop:disabled=move || ui.joined.get()
                on:click=move |_| with_client(|client| client.join())
            >
                "Join queue"
            </button>
            <div id="queue-status" class:hidden=move || !ui.joined.get()>
                <span id="status-text">{move || ui.status_text.get()}</span>
                " "
                <span id="queue-timer" class:hidden=move || !ui.joined.get()>
                    {move || format!("({})", ui.timer_text.get())}
                </span>
            </div>
            {move || (connection.get() == ConnectionStatus::Closed).then(|| view! {
                <div class="connection-lost">"Connection to the matchmaking server was lost."</div>
            })}
        </div>
    }
}

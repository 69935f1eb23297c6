use hextanks_shared::{ClientMessage, QueueKind, ServerEvent};

use crate::time_format::format_mm_ss;

/// Owned handle to a running periodic task. Consuming it stops the task.
pub trait Cancel {
    fn cancel(self);
}

/// Side effects the queue state machine drives.
pub trait QueueHost {
    type Ticker: Cancel;

    /// Start a 1-second recurring tick that ends up in [`QueueClient::tick`].
    fn start_ticker(&mut self) -> Self::Ticker;
    fn send(&mut self, message: ClientMessage);
    /// Disable the join control and reveal the status and timer displays.
    fn show_queue_ui(&mut self);
    fn set_timer_text(&mut self, text: &str);
    fn set_status_text(&mut self, text: &str);
    fn navigate(&mut self, route: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    Idle,
    Queued { elapsed_secs: u32 },
    Matched,
}

/// Client half of the matchmaking handshake: `Idle -> Queued -> Matched`,
/// one way only.
pub struct QueueClient<H: QueueHost> {
    host: H,
    state: QueueState,
    ticker: Option<H::Ticker>,
    queue_kind: QueueKind,
    match_route: String,
}

impl<H: QueueHost> QueueClient<H> {
    pub fn new(host: H, queue_kind: QueueKind, match_route: impl Into<String>) -> Self {
        Self {
            host,
            state: QueueState::Idle,
            ticker: None,
            queue_kind,
            match_route: match_route.into(),
        }
    }

    pub fn state(&self) -> QueueState {
        self.state
    }

    #[cfg(test)]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// User pressed join. Only acts from `Idle`.
    pub fn join(&mut self) {
        if self.state != QueueState::Idle {
            tracing::debug!(state = ?self.state, "join ignored");
            return;
        }
        self.state = QueueState::Queued { elapsed_secs: 0 };
        self.host.show_queue_ui();
        self.host.set_timer_text(&format_mm_ss(0));
        self.ticker = Some(self.host.start_ticker());
        self.host.send(ClientMessage::JoinQueue {
            queue_type: self.queue_kind,
        });
        tracing::info!(queue = ?self.queue_kind, "joined matchmaking queue");
    }

    pub fn tick(&mut self) {
        let QueueState::Queued { elapsed_secs } = &mut self.state else {
            return;
        };
        *elapsed_secs = elapsed_secs.saturating_add(1);
        let text = format_mm_ss(*elapsed_secs);
        self.host.set_timer_text(&text);
    }

    /// Single entry point for inbound channel events.
    pub fn dispatch(&mut self, event: ServerEvent) {
        match (self.state, event) {
            (QueueState::Queued { .. }, ServerEvent::QueueUpdate { message }) => {
                self.host.set_status_text(&message);
            }
            (QueueState::Queued { elapsed_secs }, ServerEvent::MatchFound) => {
                self.stop_ticker();
                self.state = QueueState::Matched;
                tracing::info!(elapsed_secs, route = %self.match_route, "match found");
                self.host.navigate(&self.match_route);
            }
            (state, event) => {
                tracing::debug!(?state, ?event, "queue event ignored");
            }
        }
    }

    /// Stop the tick regardless of state or channel health.
    pub fn teardown(&mut self) {
        self.stop_ticker();
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

impl<H: QueueHost> Drop for QueueClient<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use hextanks_shared::{ClientMessage, QueueKind, ServerEvent};

    use super::{Cancel, QueueClient, QueueHost, QueueState};

    struct FakeTicker {
        live: Rc<Cell<u32>>,
        cancels: Rc<Cell<u32>>,
    }

    impl Cancel for FakeTicker {
        fn cancel(self) {
            self.live.set(self.live.get() - 1);
            self.cancels.set(self.cancels.get() + 1);
        }
    }

    #[derive(Default)]
    struct FakeHost {
        live_tickers: Rc<Cell<u32>>,
        started: u32,
        cancels: Rc<Cell<u32>>,
        sent: Vec<ClientMessage>,
        ui_shown: u32,
        timer_text: Vec<String>,
        status_text: Option<String>,
        navigations: Vec<String>,
    }

    impl QueueHost for FakeHost {
        type Ticker = FakeTicker;

        fn start_ticker(&mut self) -> FakeTicker {
            self.started += 1;
            self.live_tickers.set(self.live_tickers.get() + 1);
            FakeTicker {
                live: self.live_tickers.clone(),
                cancels: self.cancels.clone(),
            }
        }

        fn send(&mut self, message: ClientMessage) {
            self.sent.push(message);
        }

        fn show_queue_ui(&mut self) {
            self.ui_shown += 1;
        }

        fn set_timer_text(&mut self, text: &str) {
            self.timer_text.push(text.to_string());
        }

        fn set_status_text(&mut self, text: &str) {
            self.status_text = Some(text.to_string());
        }

        fn navigate(&mut self, route: &str) {
            self.navigations.push(route.to_string());
        }
    }

    fn client() -> QueueClient<FakeHost> {
        QueueClient::new(FakeHost::default(), QueueKind::Casual, "/game")
    }

    #[test]
    fn starts_idle_with_nothing_running() {
        let c = client();
        assert_eq!(c.state(), QueueState::Idle);
        assert_eq!(c.host().started, 0);
        assert!(c.host().sent.is_empty());
    }

    #[test]
    fn join_enters_queue_and_sends_once() {
        let mut c = client();
        c.join();
        assert_eq!(c.state(), QueueState::Queued { elapsed_secs: 0 });
        assert_eq!(c.host().ui_shown, 1);
        assert_eq!(c.host().started, 1);
        assert_eq!(c.host().timer_text.last().map(String::as_str), Some("00:00"));
        assert_eq!(
            c.host().sent,
            vec![ClientMessage::JoinQueue {
                queue_type: QueueKind::Casual
            }]
        );

        c.join();
        assert_eq!(c.host().started, 1);
        assert_eq!(c.host().sent.len(), 1);
    }

    #[test]
    fn sixty_five_ticks_show_one_minute_five() {
        let mut c = client();
        c.join();
        for _ in 0..65 {
            c.tick();
        }
        assert_eq!(c.state(), QueueState::Queued { elapsed_secs: 65 });
        assert_eq!(c.host().timer_text.last().map(String::as_str), Some("01:05"));
    }

    #[test]
    fn ticks_before_join_do_nothing() {
        let mut c = client();
        c.tick();
        assert_eq!(c.state(), QueueState::Idle);
        assert!(c.host().timer_text.is_empty());
    }

    #[test]
    fn queue_update_sets_status_verbatim() {
        let mut c = client();
        c.join();
        c.dispatch(ServerEvent::QueueUpdate {
            message: "Searching casual match...".into(),
        });
        c.dispatch(ServerEvent::QueueUpdate {
            message: "  2 players waiting ".into(),
        });
        assert_eq!(c.host().status_text.as_deref(), Some("  2 players waiting "));
        assert_eq!(c.state(), QueueState::Queued { elapsed_secs: 0 });
    }

    #[test]
    fn match_found_stops_timer_and_navigates_once() {
        let mut c = client();
        c.join();
        c.tick();
        c.tick();
        c.dispatch(ServerEvent::MatchFound);

        assert_eq!(c.state(), QueueState::Matched);
        assert_eq!(c.host().live_tickers.get(), 0);
        assert_eq!(c.host().cancels.get(), 1);
        assert_eq!(c.host().navigations, vec!["/game".to_string()]);

        let ticks_seen = c.host().timer_text.len();
        c.tick();
        assert_eq!(c.host().timer_text.len(), ticks_seen);

        c.dispatch(ServerEvent::MatchFound);
        c.join();
        assert_eq!(c.host().navigations.len(), 1);
        assert_eq!(c.host().started, 1);
        assert_eq!(c.host().cancels.get(), 1);
    }

    #[test]
    fn events_while_idle_are_ignored() {
        let mut c = client();
        c.dispatch(ServerEvent::MatchFound);
        c.dispatch(ServerEvent::QueueUpdate {
            message: "early".into(),
        });
        assert_eq!(c.state(), QueueState::Idle);
        assert!(c.host().navigations.is_empty());
        assert_eq!(c.host().status_text, None);
    }

    #[test]
    fn drop_cancels_live_timer() {
        let live = Rc::new(Cell::new(0));
        let host = FakeHost {
            live_tickers: live.clone(),
            ..FakeHost::default()
        };
        let mut c = QueueClient::new(host, QueueKind::Ranked, "/game");
        c.join();
        assert_eq!(live.get(), 1);
        drop(c);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn teardown_after_match_does_not_cancel_twice() {
        let mut c = client();
        c.join();
        c.dispatch(ServerEvent::MatchFound);
        c.teardown();
        assert_eq!(c.host().cancels.get(), 1);
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use hextanks_shared::{ClientMessage, ServerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Open,
    Closed,
}

struct SocketConnection {
    ws: WebSocket,
    outbox: Rc<RefCell<Vec<String>>>,
    on_open: Closure<dyn Fn(Event)>,
    on_message: Closure<dyn Fn(MessageEvent)>,
    on_error: Closure<dyn Fn(Event)>,
    on_close: Closure<dyn Fn(CloseEvent)>,
}

impl SocketConnection {
    fn close(self) {
        let _ = self.on_open.as_ref();
        let _ = self.on_message.as_ref();
        let _ = self.on_error.as_ref();
        let _ = self.on_close.as_ref();
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onerror(None);
        self.ws.set_onclose(None);
        self.ws.close().ok();
    }

    fn send_text(&self, text: String) -> Result<(), String> {
        if self.ws.ready_state() == WebSocket::OPEN {
            return self
                .ws
                .send_with_str(&text)
                .map_err(|e| format!("send failed: {e:?}"));
        }
        if self.ws.ready_state() == WebSocket::CONNECTING {
            self.outbox.borrow_mut().push(text);
            return Ok(());
        }
        Err("socket is closed".into())
    }
}

thread_local! {
    static SOCKET: RefCell<Option<SocketConnection>> = const { RefCell::new(None) };
}

/// Decode one text frame. Unknown or malformed frames are dropped.
pub fn decode_event(raw: &str) -> Option<ServerEvent> {
    match serde_json::from_str::<ServerEvent>(raw) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!(error = %e, "dropping unreadable server frame");
            None
        }
    }
}

/// Open the realtime channel and feed decoded events to `on_event`.
/// Replaces any connection already open on this page.
pub fn connect(
    url: &str,
    on_event: impl Fn(ServerEvent) + 'static,
    on_status: impl Fn(ConnectionStatus) + 'static,
) {
    let on_status = Rc::new(on_status);
    on_status(ConnectionStatus::Connecting);

    let ws = match WebSocket::new(url) {
        Ok(ws) => ws,
        Err(e) => {
            tracing::error!(url, error = ?e, "failed to open websocket");
            on_status(ConnectionStatus::Closed);
            return;
        }
    };

    let outbox: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let status = on_status.clone();
    let pending = outbox.clone();
    let socket = ws.clone();
    let on_open = Closure::<dyn Fn(Event)>::new(move |_: Event| {
        tracing::info!("websocket connected");
        for text in pending.borrow_mut().drain(..) {
            if let Err(e) = socket.send_with_str(&text) {
                tracing::warn!(error = ?e, "failed to flush queued message");
            }
        }
        status(ConnectionStatus::Open);
    });
    ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));

    let on_message = Closure::<dyn Fn(MessageEvent)>::new(move |e: MessageEvent| {
        let Some(data) = e.data().as_string() else {
            return;
        };
        if let Some(event) = decode_event(&data) {
            on_event(event);
        }
    });
    ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

    let on_error = Closure::<dyn Fn(Event)>::new(move |_: Event| {
        tracing::warn!("websocket error");
    });
    ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    let status = on_status.clone();
    let on_close = Closure::<dyn Fn(CloseEvent)>::new(move |e: CloseEvent| {
        tracing::info!(code = e.code(), reason = %e.reason(), "websocket closed");
        status(ConnectionStatus::Closed);
    });
    ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));

    SOCKET.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(old) = slot.take() {
            old.close();
        }
        *slot = Some(SocketConnection {
            ws,
            outbox,
            on_open,
            on_message,
            on_error,
            on_close,
        });
    });
}

/// Send a message, holding it until the socket opens if still connecting.
pub fn send(message: &ClientMessage) -> Result<(), String> {
    let text = serde_json::to_string(message).map_err(|e| format!("encode error: {e}"))?;
    SOCKET.with(|slot| match slot.borrow().as_ref() {
        Some(connection) => connection.send_text(text),
        None => Err("socket is not connected".into()),
    })
}

pub fn disconnect() {
    SOCKET.with(|slot| {
        if let Some(connection) = slot.borrow_mut().take() {
            connection.close();
        }
    });
}

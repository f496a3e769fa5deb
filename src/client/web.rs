//! `web_sys` bindings for the chat page.
//!
//! [`start`] runs when the wasm module is instantiated. It waits for the
//! document to be parsed, opens the single chat socket and wires form and
//! socket events to a [`ChatController`].

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlFormElement, HtmlInputElement, MessageEvent, WebSocket,
};

use super::{CHAT_ENDPOINT, ChatController, FORM_ID, FrameSink, INPUT_ID, MESSAGES_ID};
use super::{MessageList, TextInput};

/// Chat socket as a [`FrameSink`].
#[derive(Debug)]
struct SocketSink(WebSocket);

impl FrameSink for SocketSink {
    type Error = JsValue;

    fn send_text(&self, text: &str) -> Result<(), Self::Error> {
        self.0.send_with_str(text)
    }
}

/// Text field; reads as empty when the element is missing.
#[derive(Debug)]
struct InputField(Option<HtmlInputElement>);

impl TextInput for InputField {
    fn value(&self) -> String {
        self.0
            .as_ref()
            .map(HtmlInputElement::value)
            .unwrap_or_default()
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = &self.0 {
            input.set_value(value);
        }
    }
}

/// Messages container; appends `div` blocks with plain text content.
#[derive(Debug)]
struct MessagesContainer {
    document: Document,
    container: Option<Element>,
}

impl MessageList for MessagesContainer {
    fn append_text(&self, text: &str) {
        let Some(container) = &self.container else {
            return;
        };
        let appended = self.document.create_element("div").and_then(|block| {
            block.set_text_content(Some(text));
            container.append_child(&block)
        });
        if let Err(err) = appended {
            tracing::warn!(error = ?err, "failed to append message");
        }
    }
}

type PageController = ChatController<SocketSink, InputField, MessagesContainer>;

/// Module entry point.
///
/// # Errors
///
/// Returns the JS exception if there is no window or document, or if
/// registering the ready listener fails.
#[allow(unsafe_code)]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() != "loading" {
        return mount(&document, WebSocket::new).map(drop);
    }

    let ready_doc = document.clone();
    let on_ready = Closure::once(move |_: Event| {
        if let Err(err) = mount(&ready_doc, WebSocket::new) {
            tracing::error!(error = ?err, "chat page initialization failed");
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

/// Opens the chat socket through `connect` and binds all handlers.
///
/// `connect` is called exactly once, with [`CHAT_ENDPOINT`]. Returns the
/// opened socket.
fn mount<C>(document: &Document, connect: C) -> Result<WebSocket, JsValue>
where
    C: FnOnce(&str) -> Result<WebSocket, JsValue>,
{
    let socket = connect(CHAT_ENDPOINT)?;
    let form = lookup::<HtmlFormElement>(document, FORM_ID);
    let input = lookup::<HtmlInputElement>(document, INPUT_ID);
    let container = lookup::<Element>(document, MESSAGES_ID);

    let controller: Rc<PageController> = Rc::new(ChatController::new(
        SocketSink(socket.clone()),
        InputField(input),
        MessagesContainer {
            document: document.clone(),
            container,
        },
    ));

    if let Some(form) = form {
        let ctl = Rc::clone(&controller);
        let on_submit = Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            ctl.on_submit();
        }) as Box<dyn FnMut(_)>);
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        on_submit.forget();
    }

    let ctl = Rc::clone(&controller);
    let on_open = Closure::wrap(Box::new(move |_: Event| ctl.on_open()) as Box<dyn FnMut(_)>);
    socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
    on_open.forget();

    let ctl = Rc::clone(&controller);
    let on_message =
        Closure::wrap(
            Box::new(move |event: MessageEvent| match event.data().as_string() {
                Some(text) => ctl.on_message(&text),
                None => tracing::debug!("ignoring non-text frame"),
            }) as Box<dyn FnMut(_)>,
        );
    socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    on_message.forget();

    let ctl = Rc::clone(&controller);
    let on_error = Closure::wrap(Box::new(move |event: Event| {
        ctl.on_error(&event.type_());
    }) as Box<dyn FnMut(_)>);
    socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();

    let ctl = controller;
    let on_close = Closure::wrap(Box::new(move |_: Event| ctl.on_close()) as Box<dyn FnMut(_)>);
    socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));
    on_close.forget();

    Ok(socket)
}

/// Looks up an element by id and casts it, logging when it is absent.
fn lookup<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    let found = document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok());
    if found.is_none() {
        tracing::warn!(id, "chat page element not found");
    }
    found
}

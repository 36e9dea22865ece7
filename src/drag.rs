//! Tab drag-and-drop helper.
//!
//! The window system is abstracted behind [`DragBackend`]; the helper keeps
//! the properties the UI binds to and reports every change to its listeners.

use bitflags::bitflags;
use std::collections::VecDeque;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropAction {
    #[default]
    Ignore,
    Copy,
    Move,
    Link,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DropActions: u8 {
        const COPY = 1 << 0;
        const MOVE = 1 << 1;
        const LINK = 1 << 2;
    }
}

impl DropActions {
    pub fn allows(self, action: DropAction) -> bool {
        match action {
            DropAction::Ignore => true,
            DropAction::Copy => self.contains(DropActions::COPY),
            DropAction::Move => self.contains(DropActions::MOVE),
            DropAction::Link => self.contains(DropActions::LINK),
        }
    }
}

/// Actions a dragged tab may end in.
pub const TAB_DRAG_ACTIONS: DropActions = DropActions::COPY.union(DropActions::MOVE);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub mime_type: String,
    pub data: Vec<u8>,
    pub preview_url: Option<String>,
    pub preferred_action: DropAction,
}

pub trait DragBackend {
    /// Run a drag to completion and return the action the drop target chose.
    fn begin_drag(&mut self, payload: &DragPayload, allowed: DropActions) -> DropAction;
}

/// Backend for sessions without a window system. Nothing is ever dropped.
#[derive(Debug, Default)]
pub struct HeadlessDragBackend;

impl DragBackend for HeadlessDragBackend {
    fn begin_drag(&mut self, payload: &DragPayload, _allowed: DropActions) -> DropAction {
        debug!(mime_type = %payload.mime_type, "drag ignored, no window system");
        DropAction::Ignore
    }
}

/// Replays queued drop results and records every payload it was handed.
#[derive(Debug, Default)]
pub struct ScriptedDragBackend {
    responses: VecDeque<DropAction>,
    started: Vec<DragPayload>,
}

impl ScriptedDragBackend {
    pub fn new<I: IntoIterator<Item = DropAction>>(responses: I) -> Self {
        ScriptedDragBackend {
            responses: responses.into_iter().collect(),
            started: Vec::new(),
        }
    }

    pub fn started(&self) -> &[DragPayload] {
        &self.started
    }
}

impl DragBackend for ScriptedDragBackend {
    fn begin_drag(&mut self, payload: &DragPayload, allowed: DropActions) -> DropAction {
        self.started.push(payload.clone());
        let action = self.responses.pop_front().unwrap_or_default();
        if allowed.allows(action) {
            action
        } else {
            DropAction::Ignore
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragProperty {
    Active,
    ExpectedAction,
    MimeType,
    PreviewUrl,
    Source,
}

type Listener = Box<dyn FnMut(DragProperty)>;

pub struct DragHelper<B: DragBackend> {
    backend: B,
    active: bool,
    expected_action: DropAction,
    mime_type: String,
    preview_url: String,
    source: Option<String>,
    listeners: Vec<Listener>,
}

impl<B: DragBackend> DragHelper<B> {
    pub fn new(backend: B) -> Self {
        DragHelper {
            backend,
            active: false,
            expected_action: DropAction::Move,
            mime_type: String::new(),
            preview_url: String::new(),
            source: None,
            listeners: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Register a callback invoked after any property changes value.
    pub fn on_change<F: FnMut(DragProperty) + 'static>(&mut self, listener: F) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, property: DragProperty) {
        for listener in self.listeners.iter_mut() {
            listener(property);
        }
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            self.active = active;
            self.notify(DragProperty::Active);
        }
    }

    pub fn expected_action(&self) -> DropAction {
        self.expected_action
    }

    pub fn set_expected_action(&mut self, action: DropAction) {
        if self.expected_action != action {
            self.expected_action = action;
            self.notify(DragProperty::ExpectedAction);
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn set_mime_type(&mut self, mime_type: &str) {
        if self.mime_type != mime_type {
            self.mime_type = mime_type.to_string();
            self.notify(DragProperty::MimeType);
        }
    }

    pub fn preview_url(&self) -> &str {
        &self.preview_url
    }

    pub fn set_preview_url(&mut self, preview_url: &str) {
        if self.preview_url != preview_url {
            self.preview_url = preview_url.to_string();
            self.notify(DragProperty::PreviewUrl);
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: Option<&str>) {
        if self.source.as_deref() != source {
            self.source = source.map(String::from);
            self.notify(DragProperty::Source);
        }
    }

    /// Drag the tab identified by `tab_id` and report how it was dropped.
    pub fn exec_drag(&mut self, tab_id: &str) -> DropAction {
        if self.active {
            warn!(tab_id = %tab_id, "drag already in progress");
            return DropAction::Ignore;
        }
        if self.mime_type.is_empty() {
            warn!(tab_id = %tab_id, "cannot drag without a mime type");
            return DropAction::Ignore;
        }

        let payload = DragPayload {
            mime_type: self.mime_type.clone(),
            data: tab_id.as_bytes().to_vec(),
            preview_url: Some(self.preview_url.clone()).filter(|u| !u.is_empty()),
            preferred_action: self.expected_action,
        };

        self.set_active(true);
        let action = self.backend.begin_drag(&payload, TAB_DRAG_ACTIONS);
        self.set_active(false);

        debug!(tab_id = %tab_id, action = ?action, "drag finished");
        action
    }
}

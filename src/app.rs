// App state machine and event loop.
// ref: ratatui app patterns, https://ratatui.rs/concepts/application-patterns/

use std::collections::HashSet;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    event::{self, AppEvent, CaptureSnapshot, EventSender},
    model::tree::{flatten, move_cursor, Cursor},
    ops::{self, Target},
    store::Store,
    tmux::{capture, keys, session, TmuxError},
    tui::{self, Tui},
    ui::{self, input::InputState},
};

const TICK_MS: u64 = 100;
const REFRESH_INTERVAL_MS: u64 = 500;
const CAPTURE_LINES: u32 = 200;

// ── Modes ─────────────────────────────────────────────────────────────────────

/// Which key map is active. Every keystroke routes through exactly one mode.
pub enum Mode {
    Normal,
    Dialog(DialogState),
    /// Keystrokes forward to the selected tmux session instead of the app.
    Interact,
    Help,
}

impl Mode {
    pub fn is_interact(&self) -> bool {
        matches!(self, Mode::Interact)
    }
}

pub struct DialogState {
    pub kind: DialogKind,
    pub fields: Vec<InputState>,
    pub focus: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    NewGroup,
    NewSession,
    Rename(Target),
    ConfirmDelete(Target),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Tree,
    Preview,
}

/// One-slot status line. A new notice replaces the previous one.
#[derive(Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// What the key dispatcher hands back to the run loop.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Quit,
    /// Attach needs the terminal, which dispatch does not hold.
    Attach,
}

// ── App ──────────────────────────────────────────────────────────────────────

pub struct App {
    pub store: Store,
    /// Per-group open/closed flag, indexed like `store.data.groups`.
    /// Groups past the end of the vec count as open.
    pub expanded: Vec<bool>,
    pub cursor: Cursor,
    pub panel: Panel,
    pub mode: Mode,
    /// tmux session names that were alive at the last refresh.
    pub live: HashSet<String>,
    /// Pane capture for the selected session, empty until the first snapshot.
    pub pane_content: String,
    pub notice: Option<Notice>,
    pub tree_scroll: usize,
    last_refresh: Instant,
    refresh_in_flight: bool,
    tx: EventSender,
    rx: Receiver<AppEvent>,
}

impl App {
    pub fn new(store: Store) -> Self {
        let (tx, rx) = event::channel();
        let expanded = vec![true; store.data.groups.len()];
        Self {
            store,
            expanded,
            cursor: Cursor::group(0),
            panel: Panel::Tree,
            mode: Mode::Normal,
            live: HashSet::new(),
            pane_content: String::new(),
            notice: None,
            tree_scroll: 0,
            last_refresh: Instant::now(),
            refresh_in_flight: false,
            tx,
            rx,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    pub fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        self.spawn_refresh();
        loop {
            terminal.draw(|frame| ui::render(frame, self))?;

            while let Ok(event) = self.rx.try_recv() {
                self.apply_event(event);
            }

            if !self.refresh_in_flight
                && self.last_refresh.elapsed() >= Duration::from_millis(REFRESH_INTERVAL_MS)
            {
                self.spawn_refresh();
            }

            if let Some(key) = event::poll_key(Duration::from_millis(TICK_MS))? {
                match self.dispatch(key) {
                    Some(Flow::Quit) => break,
                    Some(Flow::Attach) => self.attach_selected(terminal),
                    None => {}
                }
            }
        }
        Ok(())
    }

    // ── Background refresh ────────────────────────────────────────────────────

    /// Poll tmux off the main thread: the live session set, plus a pane
    /// capture when the selected session is alive.
    fn spawn_refresh(&mut self) {
        self.refresh_in_flight = true;
        self.last_refresh = Instant::now();
        let target = self.selected_ident();
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let live = session::list_live();
            let capture = target.filter(|ident| live.contains(ident)).and_then(|ident| {
                capture::capture_pane(&ident, CAPTURE_LINES)
                    .ok()
                    .map(|content| CaptureSnapshot { ident, content })
            });
            tx.send(AppEvent::Refresh { live, capture });
        });
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Refresh { live, capture } => {
                self.refresh_in_flight = false;
                self.live = live;
                if let Some(snap) = capture {
                    // A snapshot for a session the cursor already left is stale.
                    if self.selected_ident().as_deref() == Some(snap.ident.as_str()) {
                        self.pane_content = snap.content;
                    }
                }
                if self.mode.is_interact() && !self.selected_is_live() {
                    self.mode = Mode::Normal;
                    self.set_info("Session ended");
                }
            }
            AppEvent::SendDone(Err(e)) => self.set_info(format!("Send failed: {}", e)),
            AppEvent::SendDone(Ok(())) => {}
        }
    }

    fn spawn_send<F>(&self, send: F)
    where
        F: FnOnce() -> Result<(), TmuxError> + Send + 'static,
    {
        let tx = self.tx.clone();
        std::thread::spawn(move || tx.send(AppEvent::SendDone(send())));
    }

    // ── Key dispatch ──────────────────────────────────────────────────────────

    fn dispatch(&mut self, key: KeyEvent) -> Option<Flow> {
        match self.mode {
            Mode::Normal => self.dispatch_normal(key),
            Mode::Dialog(_) => self.dispatch_dialog(key),
            Mode::Interact => self.dispatch_interact(key),
            Mode::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')
                ) {
                    self.mode = Mode::Normal;
                }
                None
            }
        }
    }

    fn dispatch_normal(&mut self, key: KeyEvent) -> Option<Flow> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Flow::Quit);
            }
            KeyCode::Char('q') => return Some(Flow::Quit),
            KeyCode::Tab => {
                self.panel = match self.panel {
                    Panel::Tree => Panel::Preview,
                    Panel::Preview => Panel::Tree,
                };
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.panel == Panel::Tree {
                    self.nav_move(-1);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.panel == Panel::Tree {
                    self.nav_move(1);
                }
            }
            KeyCode::Enter => return self.action_enter(),
            KeyCode::Char('i') => self.enter_interact(),
            KeyCode::Char('g') => self.open_new_group(),
            KeyCode::Char('n') => self.open_new_session(),
            KeyCode::Char('d') => self.open_delete(),
            KeyCode::Char('r') => self.open_rename(),
            KeyCode::Char('?') => self.mode = Mode::Help,
            _ => {}
        }
        None
    }

    fn action_enter(&mut self) -> Option<Flow> {
        match (self.panel, self.cursor.session) {
            (Panel::Tree, None) => {
                let gi = self.cursor.group;
                if gi < self.store.data.groups.len() {
                    let open = self.expanded.get(gi).copied().unwrap_or(true);
                    self.set_expanded(gi, !open);
                }
                None
            }
            // A session picked in the tree moves focus to its preview.
            (Panel::Tree, Some(_)) => {
                self.panel = Panel::Preview;
                None
            }
            (Panel::Preview, Some(_)) => Some(Flow::Attach),
            (Panel::Preview, None) => None,
        }
    }

    fn enter_interact(&mut self) {
        if self.cursor.session.is_none() {
            return;
        }
        if !self.selected_is_live() {
            self.set_info("Session not running. Press Enter on tree to start.");
            return;
        }
        self.panel = Panel::Preview;
        self.mode = Mode::Interact;
        self.notice = None;
    }

    fn dispatch_interact(&mut self, key: KeyEvent) -> Option<Flow> {
        // The session can die between refreshes; drop out rather than
        // forward keys into a void.
        let Some(ident) = self.selected_ident().filter(|i| self.live.contains(i)) else {
            self.mode = Mode::Normal;
            self.set_info("Session ended");
            return None;
        };
        match keys::translate(key) {
            keys::Forward::Exit => {
                self.mode = Mode::Normal;
                self.set_info("Exited interact mode");
            }
            keys::Forward::Special(name) => {
                self.spawn_send(move || session::send_special(&ident, &name));
            }
            keys::Forward::Text(text) => {
                self.spawn_send(move || session::send_text(&ident, &text));
            }
            keys::Forward::Ignore => {}
        }
        None
    }

    // ── Dialogs ───────────────────────────────────────────────────────────────

    fn open_new_group(&mut self) {
        self.mode = Mode::Dialog(DialogState {
            kind: DialogKind::NewGroup,
            fields: vec![InputState::new("Group Name:", "e.g. Work")],
            focus: 0,
        });
    }

    fn open_new_session(&mut self) {
        if self.store.data.groups.is_empty() {
            self.set_info("Create a group first (press g)");
            return;
        }
        self.mode = Mode::Dialog(DialogState {
            kind: DialogKind::NewSession,
            fields: vec![
                InputState::new("📁 Project Path:", "~/projects/my-app"),
                InputState::new("🔑 Session ID / Rename:", "session id or rename"),
                InputState::new("📝 Display Name (optional):", "e.g. api-refactor"),
            ],
            focus: 0,
        });
    }

    fn open_delete(&mut self) {
        if self.panel != Panel::Tree || self.store.data.groups.is_empty() {
            return;
        }
        self.mode = Mode::Dialog(DialogState {
            kind: DialogKind::ConfirmDelete(self.target_from_cursor()),
            fields: Vec::new(),
            focus: 0,
        });
    }

    fn open_rename(&mut self) {
        if self.panel != Panel::Tree || self.store.data.groups.is_empty() {
            return;
        }
        let target = self.target_from_cursor();
        let (_, current) = self.describe_target(target);
        self.mode = Mode::Dialog(DialogState {
            kind: DialogKind::Rename(target),
            fields: vec![InputState::with_value("New name:", current.clone(), current)],
            focus: 0,
        });
    }

    fn dispatch_dialog(&mut self, key: KeyEvent) -> Option<Flow> {
        let kind = match &self.mode {
            Mode::Dialog(state) => state.kind,
            _ => return None,
        };

        // Delete confirmation takes y/n only; Enter is deliberately inert.
        if let DialogKind::ConfirmDelete(target) = kind {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.mode = Mode::Normal;
                    self.confirm_delete(target);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.mode = Mode::Normal;
                }
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                let mode = std::mem::replace(&mut self.mode, Mode::Normal);
                if let Mode::Dialog(state) = mode {
                    // Validation failures keep the dialog open for another try.
                    if !self.commit_dialog(&state) {
                        self.mode = Mode::Dialog(state);
                    }
                }
            }
            KeyCode::Tab => self.cycle_focus(1),
            KeyCode::BackTab => self.cycle_focus(-1),
            KeyCode::Backspace => self.edit_focused(|field| field.backspace()),
            KeyCode::Left => self.edit_focused(|field| field.cursor_left()),
            KeyCode::Right => self.edit_focused(|field| field.cursor_right()),
            KeyCode::Char(c) => self.edit_focused(move |field| field.insert_char(c)),
            _ => {}
        }
        None
    }

    fn cycle_focus(&mut self, delta: isize) {
        if let Mode::Dialog(state) = &mut self.mode {
            let len = state.fields.len() as isize;
            if len > 1 {
                state.focus = (state.focus as isize + delta).rem_euclid(len) as usize;
            }
        }
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut InputState)) {
        if let Mode::Dialog(state) = &mut self.mode {
            if let Some(field) = state.fields.get_mut(state.focus) {
                edit(field);
            }
        }
    }

    fn commit_dialog(&mut self, state: &DialogState) -> bool {
        match state.kind {
            DialogKind::NewGroup => self.commit_new_group(state),
            DialogKind::NewSession => self.commit_new_session(state),
            DialogKind::Rename(target) => self.commit_rename(state, target),
            // Handled by the y/n path above.
            DialogKind::ConfirmDelete(_) => true,
        }
    }

    fn commit_new_group(&mut self, state: &DialogState) -> bool {
        match ops::create_group(&mut self.store.data, state.fields[0].value()) {
            Ok(gi) => {
                let name = self.store.data.groups[gi].name.clone();
                self.set_expanded(gi, true);
                self.cursor = Cursor::group(gi);
                self.set_info(format!("Created group: {}", name));
                self.persist();
                true
            }
            Err(msg) => {
                self.set_info(msg);
                false
            }
        }
    }

    fn commit_new_session(&mut self, state: &DialogState) -> bool {
        let gi = self.cursor.group;
        match ops::create_session(
            &mut self.store.data,
            gi,
            state.fields[0].value(),
            state.fields[1].value(),
            state.fields[2].value(),
        ) {
            Ok(si) => {
                let name = self.store.data.groups[gi].sessions[si].name.clone();
                self.set_expanded(gi, true);
                self.cursor = Cursor::session(gi, si);
                self.set_info(format!("Created session: {}", name));
                self.persist();
                true
            }
            Err(msg) => {
                self.set_info(msg);
                false
            }
        }
    }

    fn commit_rename(&mut self, state: &DialogState, target: Target) -> bool {
        match ops::rename(&mut self.store.data, target, state.fields[0].value()) {
            Ok(()) => {
                let (_, name) = self.describe_target(target);
                self.set_info(format!("Renamed to: {}", name));
                self.persist();
                true
            }
            Err(msg) => {
                self.set_info(msg);
                false
            }
        }
    }

    fn confirm_delete(&mut self, target: Target) {
        match target {
            Target::Group(gi) => {
                let Some(name) = ops::delete_group(&mut self.store.data, gi) else {
                    return;
                };
                if gi < self.expanded.len() {
                    self.expanded.remove(gi);
                }
                self.cursor = ops::cursor_after_group_delete(&self.store.data, gi);
                self.set_info(format!("Deleted group: {}", name));
                self.persist();
            }
            Target::Session(gi, si) => {
                let Some(name) = ops::delete_session(&mut self.store.data, gi, si) else {
                    return;
                };
                self.cursor = ops::cursor_after_session_delete(&self.store.data, gi, si);
                self.set_info(format!("Deleted session: {}", name));
                self.persist();
            }
        }
        self.pane_content.clear();
    }

    // ── Attach ────────────────────────────────────────────────────────────────

    /// Hand the terminal to `tmux attach` for the selected session,
    /// creating the session first if it is not running.
    fn attach_selected(&mut self, terminal: &mut Tui) {
        let Some((ident, path, token)) = self.selected_attach_args() else {
            return;
        };
        if !session::session_exists(&ident) {
            if let Err(e) = session::create_session(&ident, &ops::expand_path(&path), &token) {
                self.set_error(format!("Error: {}", e));
                return;
            }
        }
        match tui::with_raw_mode_disabled(terminal, || session::attach_foreground(&ident)) {
            Ok(status) if status.success() => self.set_info("Returned from tmux session"),
            Ok(status) => self.set_error(format!("tmux exited with error: {}", status)),
            Err(e) => self.set_error(format!("Error: {}", e)),
        }
    }

    fn selected_attach_args(&self) -> Option<(String, String, String)> {
        let si = self.cursor.session?;
        let group = self.store.data.groups.get(self.cursor.group)?;
        let sess = group.sessions.get(si)?;
        Some((
            session::session_ident(&group.name, &sess.name),
            sess.path.clone(),
            sess.resume_token.clone(),
        ))
    }

    // ── State helpers ─────────────────────────────────────────────────────────

    fn nav_move(&mut self, delta: isize) {
        let flat = flatten(&self.store.data.groups, &self.expanded);
        let next = move_cursor(&flat, self.cursor, delta);
        if next != self.cursor {
            self.cursor = next;
            // The capture on screen belongs to the previous selection.
            self.pane_content.clear();
        }
    }

    fn set_expanded(&mut self, gi: usize, open: bool) {
        if self.expanded.len() <= gi {
            self.expanded.resize(gi + 1, true);
        }
        self.expanded[gi] = open;
    }

    fn target_from_cursor(&self) -> Target {
        match self.cursor.session {
            Some(si) => Target::Session(self.cursor.group, si),
            None => Target::Group(self.cursor.group),
        }
    }

    /// Derived tmux name for the session under the cursor; group headers
    /// have none.
    fn selected_ident(&self) -> Option<String> {
        let si = self.cursor.session?;
        let group = self.store.data.groups.get(self.cursor.group)?;
        let sess = group.sessions.get(si)?;
        Some(session::session_ident(&group.name, &sess.name))
    }

    fn selected_is_live(&self) -> bool {
        self.selected_ident()
            .map(|ident| self.live.contains(&ident))
            .unwrap_or(false)
    }

    /// Kind label and display name for a delete or rename target.
    pub fn describe_target(&self, target: Target) -> (&'static str, String) {
        match target {
            Target::Group(gi) => (
                "group",
                self.store
                    .data
                    .groups
                    .get(gi)
                    .map(|g| g.name.clone())
                    .unwrap_or_default(),
            ),
            Target::Session(gi, si) => (
                "session",
                self.store
                    .data
                    .groups
                    .get(gi)
                    .and_then(|g| g.sessions.get(si))
                    .map(|s| s.name.clone())
                    .unwrap_or_default(),
            ),
        }
    }

    /// How many of a group's sessions have a live tmux session behind them.
    pub fn active_count_for_group(&self, gi: usize) -> usize {
        let Some(group) = self.store.data.groups.get(gi) else {
            return 0;
        };
        group
            .sessions
            .iter()
            .filter(|s| self.live.contains(&session::session_ident(&group.name, &s.name)))
            .count()
    }

    fn set_info(&mut self, msg: impl Into<String>) {
        self.notice = Some(Notice::Info(msg.into()));
    }

    fn set_error(&mut self, msg: impl Into<String>) {
        self.notice = Some(Notice::Error(msg.into()));
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save() {
            self.set_error(e.to_string());
        }
    }
}

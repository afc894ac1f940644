//! Application state and input handling.
//!
//! The app is the host for the core: it owns the [`TreeView`], translates
//! terminal events into view calls, and builds the frame to paint.

use std::ops::Range;

use inspector_lib::clipboard::Clipboard;
use inspector_lib::config::ViewConfig;
use inspector_lib::error::StoreError;
use inspector_lib::keys::{Key, KeyCombo, Keybinds};
use inspector_lib::navigate::NavInput;
use inspector_lib::node::NodeId;
use inspector_lib::present::{MenuExtension, RowFacts, RowPresenter};
use inspector_lib::store::TreeSnapshot;
use inspector_lib::view::TreeView;
use log::{debug, info};

use crate::events::Event;
use crate::menu::PopupMenu;
use crate::render::guide_prefixes;

/// What keyboard input currently drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    /// Typing a query; `previous` is restored on Escape.
    Search {
        input: String,
        previous: Option<String>,
    },
}

/// Rows and text for one frame.
pub struct FrameData {
    pub rows: Vec<RowFacts>,
    pub guides: Vec<String>,
    pub status: String,
}

/// Build the view the terminal host drives: page keys jump to the ends and
/// the context menu gains a "Log node" entry.
pub fn build_view(snapshot: TreeSnapshot, config: &ViewConfig) -> Result<TreeView, StoreError> {
    let mut keybinds = Keybinds::navigation();
    keybinds.bind(KeyCombo::key(Key::PageUp), NavInput::First);
    keybinds.bind(KeyCombo::key(Key::PageDown), NavInput::Last);

    let presenter = RowPresenter::new(config).with_extension(MenuExtension::new(
        "Log node",
        |id| info!("node '{}' picked from the context menu", id),
    ));

    Ok(TreeView::from_snapshot(snapshot, config)?
        .with_presenter(presenter)
        .with_keybinds(keybinds))
}

pub struct App<C: Clipboard> {
    view: TreeView,
    mode: Mode,
    menu: PopupMenu,
    clipboard: C,
    /// Rows shown in the last frame.
    window: Range<usize>,
    quit: bool,
}

impl<C: Clipboard> App<C> {
    pub fn new(mut view: TreeView, clipboard: C) -> Self {
        if let Some(root) = view.root().cloned() {
            view.select(root);
        }
        Self {
            view,
            mode: Mode::Browse,
            menu: PopupMenu::default(),
            clipboard,
            window: 0..0,
            quit: false,
        }
    }

    pub fn view(&self) -> &TreeView {
        &self.view
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn menu(&self) -> &PopupMenu {
        &self.menu
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn is_dirty(&self) -> bool {
        self.view.is_dirty()
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if self.menu.is_open() {
                    self.on_menu_key(&key);
                } else if matches!(self.mode, Mode::Search { .. }) {
                    self.on_search_key(&key);
                } else {
                    self.on_browse_key(&key);
                }
            }
            Event::Hover { row } => {
                let id = self.id_at_screen_row(row);
                self.view.hover(id);
            }
            Event::Click {
                row,
                column,
                modifiers,
            } => {
                self.menu.close();
                let Some(id) = self.id_at_screen_row(row) else {
                    return;
                };
                self.view.select(id.clone());
                if self.is_on_disclosure(&id, column) {
                    self.view
                        .toggle_disclosure(&id, modifiers.shift || modifiers.alt);
                }
            }
            Event::ContextClick { row } => {
                if let Some(id) = self.id_at_screen_row(row) {
                    self.view.select(id.clone());
                    self.view.open_context_menu(&id, &mut self.menu);
                }
            }
            Event::Scroll(amount) => {
                let input = if amount < 0 {
                    NavInput::Previous
                } else {
                    NavInput::Next
                };
                for _ in 0..amount.unsigned_abs() {
                    self.view.handle_input(input, &mut self.clipboard);
                }
            }
            Event::Resize => {}
        }
    }

    fn on_browse_key(&mut self, key: &KeyCombo) {
        let selected = self.view.selection().selected().cloned();
        match (key.key, key.modifiers.ctrl) {
            (Key::Char('q'), _) => self.quit = true,
            (Key::Char('/'), false) => {
                self.mode = Mode::Search {
                    input: self.view.query().unwrap_or_default().to_string(),
                    previous: self.view.query().map(str::to_string),
                };
            }
            (Key::Char('n'), false) => self.select_next_match(),
            (Key::Escape, _) => self.view.set_query(None),
            (Key::Space, false) => {
                if let Some(id) = selected {
                    self.view.toggle_disclosure(&id, false);
                }
            }
            (Key::Char('*'), false) => {
                if let Some(id) = selected {
                    self.view.toggle_disclosure(&id, true);
                }
            }
            (Key::Enter, false) => {
                if let Some(id) = selected {
                    self.view.open_context_menu(&id, &mut self.menu);
                }
            }
            _ => {
                if !self.view.handle_key(key, &mut self.clipboard) {
                    debug!("unhandled key {:?}", key);
                }
            }
        }
    }

    fn on_search_key(&mut self, key: &KeyCombo) {
        let Mode::Search { input, previous } = &mut self.mode else {
            return;
        };
        match key.key {
            Key::Char(c) if !key.modifiers.ctrl => input.push(c),
            Key::Space => input.push(' '),
            Key::Backspace => {
                input.pop();
            }
            Key::Enter => {
                self.mode = Mode::Browse;
                self.select_next_match();
                return;
            }
            Key::Escape => {
                let previous = previous.take();
                self.view.set_query(previous.as_deref());
                self.mode = Mode::Browse;
                return;
            }
            _ => return,
        }
        let query = input.clone();
        self.view.set_query(Some(&query));
    }

    fn on_menu_key(&mut self, key: &KeyCombo) {
        match key.key {
            Key::Up | Key::Char('k') => {
                if let Some(menu) = self.menu.current_mut() {
                    menu.move_cursor(-1);
                }
            }
            Key::Down | Key::Char('j') => {
                if let Some(menu) = self.menu.current_mut() {
                    menu.move_cursor(1);
                }
            }
            Key::Enter | Key::Space => {
                if let Some(action) = self.menu.take_action() {
                    self.view.activate(&action, &mut self.clipboard);
                }
            }
            Key::Escape | Key::Char('q') => self.menu.close(),
            _ => {}
        }
    }

    /// Select the next matching row after the selection, wrapping around.
    fn select_next_match(&mut self) {
        let projection = self.view.projection();
        let len = projection.len();
        if len == 0 {
            return;
        }
        let start = self.view.selected_index().map_or(0, |i| i + 1);
        let found = (0..len)
            .map(|offset| (start + offset) % len)
            .filter_map(|i| projection.row(i))
            .find(|row| self.view.search_results().is_match(&row.id))
            .map(|row| row.id.clone());
        if let Some(id) = found {
            self.view.select(id);
        }
    }

    fn id_at_screen_row(&self, row: u16) -> Option<NodeId> {
        let index = self.window.start + row as usize;
        if index >= self.window.end {
            return None;
        }
        self.view.projection().row(index).map(|r| r.id.clone())
    }

    /// Whether `column` falls on the disclosure glyph of a visible node.
    fn is_on_disclosure(&self, id: &NodeId, column: u16) -> bool {
        let projection = self.view.projection();
        let Some(row) = projection.index_of(id).and_then(|i| projection.row(i)) else {
            return false;
        };
        let start = 2 * (row.level - 1);
        (start..start + 2).contains(&(column as usize))
    }

    /// Build the next frame for a viewport of `height` tree rows.
    pub fn frame(&mut self, height: usize) -> FrameData {
        self.window = self.view.visible_window(height);
        let rows = self.view.rows(self.window.clone());

        let projection = self.view.projection();
        let levels: Vec<usize> = projection.rows().iter().map(|r| r.level).collect();
        let guides = guide_prefixes(&levels, self.view.children_counts(), self.window.clone());

        let status = match self.mode() {
            Mode::Search { input, .. } => format!("/{}", input),
            Mode::Browse if self.menu.is_open() => match self.menu.current() {
                Some(menu) => format!(" menu: {}  | up/down move  enter run  esc close", menu.node),
                None => String::new(),
            },
            Mode::Browse => {
                let matches = match self.view.query() {
                    Some(q) => format!("  \"{}\": {} matches", q, self.view.search_results().len()),
                    None => String::new(),
                };
                format!(
                    " {} rows{}  | / search  n next  space toggle  * deep  enter menu  q quit",
                    projection.len(),
                    matches
                )
            }
        };

        self.view.clear_dirty();
        FrameData {
            rows,
            guides,
            status,
        }
    }
}

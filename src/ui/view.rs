//! Pure projection from session state to what the three panes show.
//!
//! Nothing here touches a terminal, so the whole screen content can be
//! asserted in tests; `render::draw` only adds borders and colour.

use crate::ui::layout::{LayoutConfig, PaneLayout};
use crate::ui::session::{Focus, SessionState, UserStatus, Viewport};

pub const PROMPT_LABEL: &str = "cmd line ";
pub const CURSOR_GLYPH: char = '█';
pub const SELECTION_MARKER: char = '>';
pub const ACTIVE_GLYPH: char = '•';
pub const IDLE_GLYPH: char = '◦';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRow {
    pub name: String,
    pub status: UserStatus,
    pub selected: bool,
}

impl SidebarRow {
    pub fn glyph(&self) -> char {
        match self.status {
            UserStatus::Active => ACTIVE_GLYPH,
            UserStatus::Idle => IDLE_GLYPH,
        }
    }

    pub fn marker(&self) -> char {
        if self.selected {
            SELECTION_MARKER
        } else {
            ' '
        }
    }

    pub fn text(&self) -> String {
        format!("{} {} {}", self.marker(), self.glyph(), self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLineView {
    pub input: String,
    pub show_cursor: bool,
}

impl CommandLineView {
    pub fn text(&self) -> String {
        let mut text = format!("{PROMPT_LABEL}{}", self.input);
        if self.show_cursor {
            text.push(CURSOR_GLYPH);
        }
        text
    }
}

/// One frame's worth of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub viewport: Viewport,
    pub layout: PaneLayout,
    pub sidebar: Vec<SidebarRow>,
    pub main: Vec<String>,
    pub command_line: CommandLineView,
    pub job: Option<String>,
}

impl ScreenView {
    /// Build the frame from scratch; never mutates `state`.
    pub fn project(state: &SessionState, config: &LayoutConfig) -> Self {
        let viewport = state.viewport();
        let layout = PaneLayout::compute(viewport, config);
        let sidebar_focused = state.focus() == Focus::Sidebar;

        let sidebar = state
            .roster()
            .iter()
            .enumerate()
            .map(|(index, user)| SidebarRow {
                name: user.name.clone(),
                status: user.status,
                selected: sidebar_focused && index == state.cursor(),
            })
            .collect();

        let main = state
            .scrollback()
            .tail(usize::from(layout.main_height))
            .map(str::to_string)
            .collect();

        Self {
            viewport,
            layout,
            sidebar,
            main,
            command_line: CommandLineView {
                input: state.command_buffer().to_string(),
                show_cursor: state.focus() == Focus::CommandLine,
            },
            job: state.job().map(|job| job.program.clone()),
        }
    }
}

use crate::ui::session::Viewport;
use ratatui::layout::Rect;

/// Rows reserved below the main pane for the bordered command line.
pub const COMMAND_REGION_HEIGHT: u16 = 3;
/// Rows taken by the outer top and bottom framing.
pub const OUTER_FRAME_HEIGHT: u16 = 2;
/// Rows taken by the main pane's own border.
pub const MAIN_BORDER_HEIGHT: u16 = 2;

/// Pane sizing knobs, normally read from `[ui]` in the config file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub sidebar_min_width: u16,
    pub sidebar_ratio: f32,
    pub main_min_width: u16,
    pub main_min_height: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sidebar_min_width: 15,
            sidebar_ratio: 0.20,
            main_min_width: 30,
            main_min_height: 5,
        }
    }
}

/// Logical pane sizes for a viewport.
///
/// `main_height` counts the scrollback rows that fit inside the main pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    pub sidebar_width: u16,
    pub main_width: u16,
    pub main_height: u16,
}

impl PaneLayout {
    pub fn compute(viewport: Viewport, config: &LayoutConfig) -> Self {
        let scaled = (f32::from(viewport.width) * config.sidebar_ratio).round() as u16;
        let sidebar_width = scaled.max(config.sidebar_min_width);
        let main_width = viewport
            .width
            .saturating_sub(sidebar_width)
            .max(config.main_min_width);
        let main_height = viewport
            .height
            .saturating_sub(COMMAND_REGION_HEIGHT + OUTER_FRAME_HEIGHT + MAIN_BORDER_HEIGHT)
            .max(config.main_min_height);

        Self {
            sidebar_width,
            main_width,
            main_height,
        }
    }
}

/// Screen rectangles for the outer frame and the three panes inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub frame: Rect,
    pub sidebar: Rect,
    pub main: Rect,
    pub command: Rect,
}

/// Place the panes inside `area`, shrinking them when the terminal is
/// smaller than the logical minimums.
pub fn regions(area: Rect, layout: &PaneLayout) -> Regions {
    let frame = area;
    let top = (OUTER_FRAME_HEIGHT / 2).min(area.height);
    let area = Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height: area.height.saturating_sub(OUTER_FRAME_HEIGHT),
    };
    let sidebar_width = layout.sidebar_width.min(area.width);
    let right_width = area.width.saturating_sub(sidebar_width);
    let command_height = COMMAND_REGION_HEIGHT.min(area.height);

    let sidebar = Rect {
        x: area.x,
        y: area.y,
        width: sidebar_width,
        height: area.height,
    };
    let main = Rect {
        x: area.x + sidebar_width,
        y: area.y,
        width: right_width,
        height: area.height.saturating_sub(command_height),
    };
    let command = Rect {
        x: area.x + sidebar_width,
        y: area.y + area.height.saturating_sub(command_height),
        width: right_width,
        height: command_height,
    };

    Regions {
        frame,
        sidebar,
        main,
        command,
    }
}

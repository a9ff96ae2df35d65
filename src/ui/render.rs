use crate::ui::layout::{regions, MAIN_BORDER_HEIGHT};
use crate::ui::session::UserStatus;
use crate::ui::theme::Theme;
use crate::ui::view::{ScreenView, CURSOR_GLYPH, PROMPT_LABEL};
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const APP_TITLE: &str = "pty-terminal";
const SIDEBAR_TITLE: &str = "Users In Session";

pub fn draw(frame: &mut Frame<'_>, view: &ScreenView, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    if view.viewport.is_unknown() {
        frame.render_widget(
            Paragraph::new("Loading...").style(Style::default().fg(theme.text)),
            area,
        );
        return;
    }

    let regions = regions(area, &view.layout);
    let border_style = Style::default().fg(theme.border);
    let title_style = Style::default().fg(theme.title).add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(theme.text);

    let mut status = vec![Span::styled(format!(" {APP_TITLE} "), title_style)];
    if let Some(program) = &view.job {
        status.push(Span::styled(format!("│ running: {program} "), text_style));
    }
    frame.render_widget(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(border_style)
            .title(Line::from(status)),
        regions.frame,
    );

    let rows: Vec<Line> = view
        .sidebar
        .iter()
        .map(|row| {
            let glyph_color = match row.status {
                UserStatus::Active => theme.active,
                UserStatus::Idle => theme.idle,
            };
            let name_style = if row.selected {
                Style::default()
                    .fg(theme.selected)
                    .add_modifier(Modifier::BOLD)
            } else {
                text_style
            };
            Line::from(vec![
                Span::styled(format!("{} ", row.marker()), name_style),
                Span::styled(format!("{} ", row.glyph()), Style::default().fg(glyph_color)),
                Span::styled(row.name.clone(), name_style),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(rows).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(SIDEBAR_TITLE, title_style))
                .title_alignment(Alignment::Center),
        ),
        regions.sidebar,
    );

    // A terminal shorter than the logical minimum clips the main pane; keep
    // the newest lines in the rows that remain.
    let visible = usize::from(regions.main.height.saturating_sub(MAIN_BORDER_HEIGHT));
    let lines: Vec<Line> = view
        .main
        .iter()
        .skip(view.main.len().saturating_sub(visible))
        .map(|line| Line::styled(line.clone(), text_style))
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        ),
        regions.main,
    );

    let mut command = vec![
        Span::styled(
            PROMPT_LABEL,
            Style::default().fg(theme.prompt).add_modifier(Modifier::BOLD),
        ),
        Span::styled(view.command_line.input.clone(), Style::default().fg(theme.input)),
    ];
    if view.command_line.show_cursor {
        command.push(Span::styled(
            CURSOR_GLYPH.to_string(),
            Style::default().fg(theme.cursor),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(command)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        ),
        regions.command,
    );
}

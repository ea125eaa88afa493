use crate::app::{App, View};
use crate::domain::projection::format_clock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

mod delete_dialog;
mod entries_view;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Timer header
            Constraint::Length(3), // Search
            Constraint::Min(5),    // Entries
            Constraint::Length(3), // Status
            Constraint::Length(1), // Controls
        ])
        .split(frame.area());

    render_header(frame, root[0], app);
    render_search(frame, root[1], app);
    entries_view::render_entries(frame, root[2], app);
    render_status(frame, root[3], app);
    render_controls(frame, root[4], app);

    if app.current_view == View::ConfirmDelete {
        delete_dialog::render_delete_confirm_dialog(frame, app);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &mut App) {
    let is_running = app.active_timer.is_some();
    let border_style = if is_running {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Timer ")
        .border_style(border_style)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(inner);

    let line = match (&app.active_timer, app.elapsed_ms()) {
        (Some(timer), Some(elapsed)) => {
            let name = timer
                .task_name
                .clone()
                .or_else(|| timer.task_id.as_ref().map(|id| id.to_string()))
                .unwrap_or_else(|| "(no task)".to_string());
            Line::from(vec![
                Span::styled(
                    format!("{} ⏵ ", format_clock(elapsed)),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::styled(name, Style::default().fg(Color::White)),
            ])
        }
        _ => Line::from(Span::styled(
            "00:00:00 (not running)",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), cols[0]);

    let throbber = throbber_widgets_tui::Throbber::default()
        .label(if app.is_loading { "syncing" } else { "" })
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Empty
        });
    frame.render_stateful_widget(throbber, cols[1], &mut app.throbber_state);
}

fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.current_view == View::Search;
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::raw(app.search_input.value.clone())];
    if editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    } else if app.search_input.value.is_empty() {
        spans.push(Span::styled(
            "press / to search",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let title = if app.options.hide_daily_duplicates {
        " Search · one per task per day "
    } else {
        " Search "
    };
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let text = app.status_message.clone().unwrap_or_default();
    let style = if text.starts_with('✗') {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    };
    let paragraph = Paragraph::new(Span::styled(text, style)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Status ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Yellow);
    let pairs: &[(&str, &str)] = match app.current_view {
        View::Search => &[("Enter", "Done"), ("Esc", "Clear"), ("Ctrl+X", "Clear text")],
        View::ConfirmDelete => &[("y", "Delete"), ("n", "Cancel")],
        View::Entries => &[
            ("t", "Toggle"),
            ("Enter", "Start"),
            ("s", "Stop"),
            ("d", "Delete"),
            ("/", "Search"),
            ("h", "Hide dupes"),
            ("r", "Refresh"),
            ("q", "Quit"),
        ],
    };

    let spans: Vec<Span> = pairs
        .iter()
        .flat_map(|(k, label)| {
            [
                Span::styled(*k, key),
                Span::raw(format!(": {}  ", label)),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

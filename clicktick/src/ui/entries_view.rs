use super::*;
use crate::domain::projection::{format_duration, DayGroup};
use crate::time_utils::pacific_clock;

pub fn render_entries(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            format!(" Recent entries ({}) ", app.visible_count()),
            Style::default().fg(Color::White),
        ))
        .padding(Padding::horizontal(1));

    if app.groups.is_empty() {
        let message = if app.snapshot.entries.is_empty() {
            "No task-backed entries in the lookback window"
        } else {
            "No entries match the current filters"
        };
        let empty = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let (items, selected_row) = build_rows(&app.groups, app.selected_index);
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    let mut state = ListState::default().with_selected(selected_row);
    frame.render_stateful_widget(list, area, &mut state);
}

/// One row per day separator and one per visible entry. Returns the list
/// row of the selected entry.
fn build_rows(groups: &[DayGroup], selected_index: usize) -> (Vec<ListItem<'static>>, Option<usize>) {
    let muted = Style::default().fg(Color::DarkGray);
    let mut rows = Vec::new();
    let mut selected_row = None;
    let mut entry_index = 0;

    for group in groups {
        if let Some(label) = &group.label {
            rows.push(ListItem::new(Line::from(vec![
                Span::styled(format!("── {} ", label), Style::default().fg(Color::Yellow)),
                Span::styled(format!("({})", format_duration(group.total_ms)), muted),
            ])));
        }

        for item in &group.items {
            if entry_index == selected_index {
                selected_row = Some(rows.len());
            }
            entry_index += 1;

            let entry = &item.entry;
            let marker = if item.is_running {
                Span::styled("⏵ ", Style::default().fg(Color::Green))
            } else {
                Span::raw("  ")
            };
            let when = pacific_clock(entry.start_ms).unwrap_or_else(|| "--:--".to_string());
            let name = entry.task_name.clone().unwrap_or_else(|| "(unnamed task)".to_string());
            let task_id = entry.task_id.as_ref().map(|id| id.to_string()).unwrap_or_default();

            let mut spans = vec![
                marker,
                Span::styled(format!("{}  ", when), muted),
                Span::styled(format!("{:>7}  ", format_duration(entry.duration_ms)), Style::default().fg(Color::White)),
                Span::styled(name, Style::default().fg(Color::White)),
                Span::styled(format!("  {}", task_id), muted),
            ];
            if entry.billable {
                spans.push(Span::styled("  $", Style::default().fg(Color::Green)));
            }
            rows.push(ListItem::new(Line::from(spans)));
        }
    }

    (rows, selected_row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TimeEntry;
    use crate::domain::projection::{project, ProjectionOptions};

    #[test]
    fn selected_row_skips_day_separators() {
        let noon = 1_709_668_800_000;
        let day = 24 * 60 * 60 * 1000;
        let entries = vec![
            TimeEntry::normalize("1", noon, noon + 1, 1).with_task(Some("a"), Some("A")),
            TimeEntry::normalize("2", noon - day, noon - day + 1, 1).with_task(Some("b"), Some("B")),
        ];
        let groups = project(&entries, None, &ProjectionOptions::default());

        let (rows, selected) = build_rows(&groups, 1);

        assert_eq!(rows.len(), 4);
        assert_eq!(selected, Some(3));
    }
}

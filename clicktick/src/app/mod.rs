use crate::domain::{
    models::{TaskId, TimerStatus},
    projection::{format_duration, project, running_elapsed_ms, DayGroup, ProjectionOptions, ViewEntry},
    services::Snapshot,
};
use crate::time_utils::{now_ms, pacific_clock};

mod state;
pub use state::{ActiveTimer, DeleteContext, TextInput, View};

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub status_message: Option<String>,

    // Last fetched entries; replaced whole on refresh
    pub snapshot: Snapshot,
    pub active_timer: Option<ActiveTimer>,
    pub last_refresh_ms: Option<i64>,

    // Display projection, rebuilt whenever snapshot or options change
    pub options: ProjectionOptions,
    pub search_input: TextInput,
    pub groups: Vec<DayGroup>,
    pub selected_index: usize,

    pub delete_context: Option<DeleteContext>,

    // Updated by the one-second tick
    pub now_ms: i64,

    // Loading indicator
    pub is_loading: bool,
    pending_requests: usize,
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            current_view: View::Entries,
            status_message: None,
            snapshot: Snapshot::default(),
            active_timer: None,
            last_refresh_ms: None,
            options: ProjectionOptions::default(),
            search_input: TextInput::new(),
            groups: Vec::new(),
            selected_index: 0,
            delete_context: None,
            now_ms: now_ms(),
            is_loading: false,
            pending_requests: 0,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn begin_request(&mut self) {
        self.pending_requests += 1;
        self.is_loading = true;
    }

    /// Called once per finished request, successful or not.
    pub fn finish_request(&mut self) {
        self.pending_requests = self.pending_requests.saturating_sub(1);
        self.is_loading = self.pending_requests > 0;
    }

    pub fn tick(&mut self, now_ms: i64) {
        self.now_ms = now_ms;
    }

    pub fn current_task_id(&self) -> Option<&TaskId> {
        self.active_timer.as_ref().and_then(|t| t.task_id.as_ref())
    }

    pub fn elapsed_ms(&self) -> Option<i64> {
        self.active_timer
            .as_ref()
            .map(|t| running_elapsed_ms(t.since_ms, self.now_ms))
    }

    pub fn apply_snapshot(&mut self, snapshot: Snapshot, fetched_at_ms: i64) {
        self.active_timer = snapshot.current.as_ref().map(|c| ActiveTimer {
            task_id: c.task_id.clone(),
            task_name: c.task_name.clone(),
            since_ms: c.start_ms,
        });
        self.snapshot = snapshot;
        self.last_refresh_ms = Some(fetched_at_ms);
        self.rebuild_view();
    }

    /// Record a timer outcome and update the running task ahead of the next refresh.
    pub fn apply_status(&mut self, status: &TimerStatus) {
        match status {
            TimerStatus::Started { task_id, task_name } => {
                let already_running = self.current_task_id() == Some(task_id);
                if !already_running {
                    self.active_timer = Some(ActiveTimer {
                        task_id: Some(task_id.clone()),
                        task_name: task_name.clone(),
                        since_ms: self.now_ms,
                    });
                }
            }
            TimerStatus::Stopped { .. } => self.active_timer = None,
            TimerStatus::Error { .. } => {}
        }
        self.set_status(status.to_string());
        self.rebuild_view();
    }

    pub fn rebuild_view(&mut self) {
        self.options.search_text = self.search_input.value.clone();
        let current = self.current_task_id().cloned();
        self.groups = project(&self.snapshot.entries, current.as_ref(), &self.options);
        let count = self.visible_count();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    pub fn visible_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn visible_entries(&self) -> impl Iterator<Item = &ViewEntry> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    pub fn selected_entry(&self) -> Option<&ViewEntry> {
        self.visible_entries().nth(self.selected_index)
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.visible_count() {
            self.selected_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn toggle_hide_duplicates(&mut self) {
        self.options.hide_daily_duplicates = !self.options.hide_daily_duplicates;
        self.rebuild_view();
    }

    pub fn search_input_char(&mut self, c: char) {
        self.search_input.insert(c);
        self.selected_index = 0;
        self.rebuild_view();
    }

    pub fn search_input_backspace(&mut self) {
        self.search_input.backspace();
        self.rebuild_view();
    }

    pub fn search_input_clear(&mut self) {
        self.search_input.clear();
        self.rebuild_view();
    }

    pub fn navigate_to(&mut self, view: View) {
        self.current_view = view;
    }

    /// Populate `delete_context` from the selected row and switch to the
    /// confirmation view. Does nothing without a selection.
    pub fn enter_delete_confirm(&mut self) {
        let Some(item) = self.selected_entry() else {
            return;
        };
        let entry = &item.entry;
        let when = pacific_clock(entry.start_ms).unwrap_or_else(|| "--:--".to_string());
        let ctx = DeleteContext {
            entry_id: entry.id.clone(),
            display_label: entry
                .task_name
                .clone()
                .unwrap_or_else(|| "(unnamed task)".to_string()),
            display_detail: format!("{}  ·  {}", when, format_duration(entry.duration_ms)),
        };
        self.delete_context = Some(ctx);
        self.navigate_to(View::ConfirmDelete);
    }

    pub fn cancel_delete(&mut self) {
        self.delete_context = None;
        self.navigate_to(View::Entries);
    }
}

mod action_queue;
mod actions;
mod event_loop;
mod hotkey;
mod views;

pub use event_loop::run_app;
pub use hotkey::spawn_signal_hotkey;

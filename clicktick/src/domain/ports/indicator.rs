/// Something that reflects whether a timer is running: a terminal title, a
/// tray icon, a log line.
///
/// Implementations must tolerate redundant calls with the same value.
pub trait IndicatorSink: Send + Sync + 'static {
    fn set_running(&self, running: bool);
}

use crate::domain::{
    ports::{IndicatorSink, TimeTrackingClient},
    services::TimerService,
};
use anyhow::Result;
use tokio::task::JoinHandle;

/// Toggle the timer whenever the process receives `SIGUSR1`, so a desktop
/// shortcut can run `pkill -USR1 clicktick`. The outcome goes out on the
/// timer's status channel.
#[cfg(unix)]
pub fn spawn_signal_hotkey<C, I>(timer: TimerService<C, I>) -> Result<Option<JoinHandle<()>>>
where
    C: TimeTrackingClient,
    I: IndicatorSink,
{
    use tokio::signal::unix::{signal, SignalKind};

    let mut signals = signal(SignalKind::user_defined1())?;
    let handle = tokio::spawn(async move {
        while signals.recv().await.is_some() {
            tracing::info!("hotkey toggle");
            timer.toggle().await;
        }
    });
    Ok(Some(handle))
}

#[cfg(not(unix))]
pub fn spawn_signal_hotkey<C, I>(_timer: TimerService<C, I>) -> Result<Option<JoinHandle<()>>>
where
    C: TimeTrackingClient,
    I: IndicatorSink,
{
    tracing::debug!("signal hotkey not supported on this platform");
    Ok(None)
}

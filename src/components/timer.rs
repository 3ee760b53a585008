use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::{Rect, Size},
    text::Line,
    widgets::Paragraph,
};
use tokio::{
    task::AbortHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::{debug, info};

use crate::{
    components::Component,
    config::Config,
    framework::Updater,
    reactive::{DestroyRef, Signal, Subscription},
};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Displays the current time, refreshed by a periodic task.
///
/// The refresh task is cancelled through the [`DestroyRef`] the timer was
/// built with, so nothing mutates the clock after teardown.
pub struct Timer {
    current_date: Signal<DateTime<Local>>,
    clock: Arc<dyn Clock>,
    destroy_ref: DestroyRef,
    tick: Duration,
    changes: Arc<AtomicU64>,
    effect: Option<Subscription>,
    ticker: Option<AbortHandle>,
}

impl Timer {
    pub fn new(destroy_ref: DestroyRef, clock: Arc<dyn Clock>) -> Self {
        let current_date = Signal::new(clock.now());
        let changes = Arc::new(AtomicU64::new(0));
        let effect = {
            let changes = Arc::clone(&changes);
            current_date.effect(move |date: &DateTime<Local>| {
                changes.fetch_add(1, Ordering::Relaxed);
                info!("Timer updated: {}", date.format("%H:%M:%S"));
            })
        };
        Self {
            current_date,
            clock,
            destroy_ref,
            tick: Duration::from_millis(Config::default().timer.tick_ms),
            changes,
            effect: Some(effect),
            ticker: None,
        }
    }

    pub fn with_system_clock(destroy_ref: DestroyRef) -> Self {
        Self::new(destroy_ref, Arc::new(SystemClock))
    }

    pub fn current_date(&self) -> DateTime<Local> {
        self.current_date.get()
    }

    /// Number of values the timer's effect has observed, the initial one included.
    pub fn observed_changes(&self) -> u64 {
        self.changes.load(Ordering::Relaxed)
    }

    pub fn version(&self) -> u64 {
        self.current_date.version()
    }

    fn start(&mut self, updater: Updater) {
        if self.ticker.is_some() || self.destroy_ref.is_destroyed() {
            return;
        }
        let current_date = self.current_date.clone();
        let clock = Arc::clone(&self.clock);
        let period = self.tick;
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                if current_date.set(clock.now()) {
                    updater.update();
                }
            }
        });
        let abort = handle.abort_handle();
        self.destroy_ref.on_destroy(move || {
            debug!("Timer::destroy - cancelling refresh task");
            abort.abort();
        });
        self.ticker = Some(handle.abort_handle());
    }

    fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Component for Timer {
    fn component_will_mount(&mut self, config: Config) -> color_eyre::Result<()> {
        self.tick = Duration::from_millis(config.timer.tick_ms.max(1));
        Ok(())
    }

    fn component_did_mount(&mut self, area: Size, updater: Updater) -> color_eyre::Result<()> {
        info!("Timer::componentDidMount - ticking every {:?} in area {:?}", self.tick, area);
        self.start(updater);
        Ok(())
    }

    fn component_will_unmount(&mut self) -> color_eyre::Result<()> {
        if let Some(mut effect) = self.effect.take() {
            effect.unsubscribe();
        }
        self.stop();
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        let date = self.current_date.get();
        let lines = vec![
            Line::from(format!("Time: {}", date.format("%H:%M:%S"))),
            Line::from(format!("Date: {}", date.format("%A, %e %B %Y"))),
            Line::from(""),
            Line::from(format!("updates observed: {}", self.observed_changes())),
        ];
        frame.render_widget(Paragraph::new(lines), area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicI64;

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    use super::*;

    /// Advances one second per call so every tick yields a distinct value.
    struct StepClock {
        seconds: AtomicI64,
    }

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Local> {
            let step = self.seconds.fetch_add(1, Ordering::SeqCst);
            Local
                .timestamp_opt(1_700_000_000 + step, 0)
                .single()
                .unwrap_or_else(Local::now)
        }
    }

    fn step_clock() -> Arc<dyn Clock> {
        Arc::new(StepClock {
            seconds: AtomicI64::new(0),
        })
    }

    fn mounted_timer(destroy_ref: &DestroyRef) -> color_eyre::Result<Timer> {
        let mut timer = Timer::new(destroy_ref.clone(), step_clock());
        let (tx, _rx) = mpsc::unbounded_channel();
        timer.component_will_mount(Config::default())?;
        timer.component_did_mount(Size::new(40, 10), Updater::new(tx))?;
        Ok(timer)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second_while_mounted() -> color_eyre::Result<()> {
        let destroy_ref = DestroyRef::new();
        let timer = mounted_timer(&destroy_ref)?;
        assert_eq!(timer.observed_changes(), 1);

        for expected in 1..=3 {
            tokio::time::sleep(Duration::from_millis(1001)).await;
            assert!(timer.version() >= expected);
        }
        assert_eq!(timer.observed_changes(), timer.version() + 1);
        destroy_ref.destroy();
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn no_mutation_after_teardown() -> color_eyre::Result<()> {
        let destroy_ref = DestroyRef::new();
        let mut timer = mounted_timer(&destroy_ref)?;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        let before = timer.current_date();
        let version = timer.version();
        assert!(version >= 1);

        timer.component_will_unmount()?;
        destroy_ref.destroy();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(timer.version(), version);
        assert_eq!(timer.current_date(), before);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn remounting_runs_a_single_ticker() -> color_eyre::Result<()> {
        let destroy_ref = DestroyRef::new();
        let mut timer = mounted_timer(&destroy_ref)?;
        timer.component_will_unmount()?;
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(timer.version(), 0);

        let (tx, _rx) = mpsc::unbounded_channel();
        timer.component_did_mount(Size::new(40, 10), Updater::new(tx))?;
        tokio::time::sleep(Duration::from_millis(3001)).await;
        assert_eq!(timer.version(), 3);

        timer.component_will_unmount()?;
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(timer.version(), 3);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn mounting_after_destroy_does_not_start_ticking() -> color_eyre::Result<()> {
        let destroy_ref = DestroyRef::new();
        destroy_ref.destroy();
        let timer = mounted_timer(&destroy_ref)?;
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(timer.version(), 0);
        Ok(())
    }
}

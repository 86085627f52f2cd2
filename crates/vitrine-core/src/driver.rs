//! Async host for a [`Page`]
//!
//! The driver owns the page on a single task. Events arrive over an mpsc
//! channel, timers are served by sleeping until the page's next deadline, and
//! a fresh [`PageSnapshot`] is published on a watch channel after every
//! reaction. Page time is measured from the moment `run` starts.

use std::future;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::motion::scroll::ScrollConfigExt;
use crate::page::{Page, PageEvent};
use crate::snapshot::PageSnapshot;

pub struct PageDriver {
    page: Page,
    frame_interval: Duration,
    snapshot_tx: watch::Sender<PageSnapshot>,
}

impl PageDriver {
    /// Wrap a page; the receiver sees a snapshot after every reaction
    pub fn new(page: Page) -> (Self, watch::Receiver<PageSnapshot>) {
        let frame_interval = page.config().scroll.animation_tick_duration();
        let (snapshot_tx, snapshot_rx) = watch::channel(page.snapshot());
        (
            Self {
                page,
                frame_interval,
                snapshot_tx,
            },
            snapshot_rx,
        )
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.page.snapshot());
    }

    /// Run the page until shutdown or until every event sender is dropped
    ///
    /// Returns the stopped page so callers can inspect its final state.
    pub async fn run(
        mut self,
        mut events: mpsc::UnboundedReceiver<PageEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Page {
        let origin = Instant::now();
        self.page.start(Duration::ZERO);
        self.publish();
        info!("Page driver started");

        loop {
            let wake = self.page.next_wake(self.frame_interval);
            let timer = async move {
                match wake {
                    Some(at) => sleep_until(origin + at).await,
                    None => future::pending::<()>().await,
                }
            };

            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Page driver received shutdown signal");
                        break;
                    }
                }

                event = events.recv() => match event {
                    Some(event) => self.page.handle(event, origin.elapsed()),
                    None => {
                        debug!("Event channel closed");
                        break;
                    }
                },

                _ = timer => self.page.advance_to(origin.elapsed()),
            }

            self.publish();
        }

        self.page.stop();
        self.publish();
        info!("Page driver stopped");
        self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{PageCommand, SliderCommand};
    use crate::config::AppConfig;
    use crate::dom::Document;
    use crate::header::HeaderState;
    use crate::layout::PageLayout;
    use crate::snapshot::LoadingState;
    use crate::theme::{MemoryStore, Theme};
    use crate::timers::ms;
    use tokio::time::sleep;

    fn driver() -> (PageDriver, watch::Receiver<PageSnapshot>) {
        let mut config = AppConfig::default();
        config.particles.seed = Some(3);
        let doc = Document::from_layout(&PageLayout::default());
        PageDriver::new(Page::new(doc, config, Box::new(MemoryStore::new())))
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_follow_page_time() {
        let (driver, snapshots) = driver();
        let (_event_tx, event_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(driver.run(event_rx, shutdown_rx));

        sleep(ms(600)).await;
        assert!(snapshots.borrow().hero_entered);
        assert_eq!(snapshots.borrow().loading, LoadingState::Visible);

        sleep(ms(1800)).await;
        assert_eq!(snapshots.borrow().loading, LoadingState::Removed);

        sleep(ms(2700)).await;
        assert_eq!(snapshots.borrow().slide_index, 1);

        shutdown_tx.send(true).unwrap();
        let page = handle.await.unwrap();
        assert!(!page.is_started());
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_are_handled_in_order() {
        let (driver, snapshots) = driver();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(driver.run(event_rx, shutdown_rx));

        event_tx
            .send(PageEvent::Command(PageCommand::Slider(SliderCommand::GoTo(2))))
            .unwrap();
        event_tx.send(PageEvent::Command(PageCommand::ToggleTheme)).unwrap();
        event_tx.send(PageEvent::Scroll(600.0)).unwrap();
        sleep(ms(50)).await;

        {
            let snapshot = snapshots.borrow();
            assert_eq!(snapshot.slide_index, 2);
            assert_eq!(snapshot.theme, Theme::Light);
            assert_eq!(snapshot.header, HeaderState::Raised);
            assert_eq!(snapshot.scroll_top, 600.0);
        }

        drop(event_tx);
        let page = handle.await.unwrap();
        assert_eq!(page.slider().index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_counters_animate_on_frames() {
        let (driver, snapshots) = driver();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(driver.run(event_rx, shutdown_rx));

        event_tx.send(PageEvent::Scroll(1700.0)).unwrap();
        sleep(ms(1000)).await;
        let midway: Vec<String> = snapshots
            .borrow()
            .section("results")
            .map(|s| s.counters.iter().map(|c| c.text.clone()).collect())
            .unwrap_or_default();
        assert_ne!(midway[0], "150+");
        assert_ne!(midway[0], "0+");

        sleep(ms(1500)).await;
        let done: Vec<String> = snapshots
            .borrow()
            .section("results")
            .map(|s| s.counters.iter().map(|c| c.text.clone()).collect())
            .unwrap_or_default();
        assert_eq!(done, vec!["150+", "98%", "24/7"]);

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }
}

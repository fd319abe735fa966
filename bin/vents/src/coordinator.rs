use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use std::time::Duration;

use airtouch::{Controller, Info};
use log::{debug, error, info};
use tokio::time::{self, MissedTickBehavior};

use crate::{Error, Result};

pub trait CoordinatorListener: Send + Sync {
    fn on_coordinator_update(&self) -> Result<()>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Polls the controller and tells every listener when fresh data arrived.
pub struct Coordinator {
    controller: Arc<dyn Controller>,
    update_interval: Duration,
    data: RwLock<Option<Info>>,
    last_update_success: AtomicBool,
    listeners: Mutex<Vec<(ListenerId, Weak<dyn CoordinatorListener>)>>,
    next_listener_id: AtomicU64,
}

impl Coordinator {
    pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(60);

    pub fn new(controller: Arc<dyn Controller>, update_interval: Duration) -> Self {
        Self {
            controller,
            update_interval,
            data: RwLock::new(None),
            last_update_success: AtomicBool::new(false),
            listeners: Mutex::new(vec![]),
            next_listener_id: AtomicU64::new(0),
        }
    }

    pub fn controller(&self) -> Arc<dyn Controller> {
        self.controller.clone()
    }

    pub fn data(&self) -> Option<Info> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_update_success(&self) -> bool {
        self.last_update_success.load(Ordering::Acquire)
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    pub async fn first_refresh(&self) -> Result<()> {
        self.refresh().await.map_err(Error::NotReady)
    }

    pub async fn refresh(&self) -> airtouch::Result<()> {
        let result = self.fetch().await;

        match &result {
            Ok(info) => {
                debug!(
                    "fetched {} groups and {} acs",
                    info.groups.len(),
                    info.acs.len()
                );

                *self.data.write().unwrap_or_else(PoisonError::into_inner) = Some(info.clone());

                if !self.last_update_success.swap(true, Ordering::AcqRel) {
                    info!("airtouch data is available");
                }
            }
            Err(err) => {
                if self.last_update_success.swap(false, Ordering::AcqRel) {
                    error!("airtouch data is unavailable: {err}");
                }
            }
        }

        self.notify_listeners();

        result.map(|_| ())
    }

    async fn fetch(&self) -> airtouch::Result<Info> {
        self.controller.update_info().await?;
        self.controller.info()
    }

    pub async fn run(&self) {
        info!("refreshing airtouch data every {:?}", self.update_interval());

        let mut interval = time::interval(self.update_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // the first tick completes immediately, setup already refreshed
        interval.tick().await;

        loop {
            interval.tick().await;

            if let Err(err) = self.refresh().await {
                error!("Error fetching airtouch data: {err}");
            }
        }
    }
}

impl Coordinator {
    pub fn add_listener(&self, listener: Arc<dyn CoordinatorListener>) -> ListenerId {
        let id = ListenerId(self.next_listener_id.fetch_add(1, Ordering::Relaxed));

        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::downgrade(&listener)));

        id
    }

    pub fn remove_listener(&self, id: ListenerId) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(listener_id, _)| *listener_id != id);
    }

    pub fn listeners_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn notify_listeners(&self) {
        let listeners: Vec<_> = {
            let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            listeners.retain(|(_, listener)| listener.strong_count() > 0);
            listeners.iter().map(|(_, listener)| listener.clone()).collect()
        };

        for listener in listeners.iter().filter_map(Weak::upgrade) {
            if let Err(err) = listener.on_coordinator_update() {
                error!("Error handling coordinator update: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{info, MockAirTouch};

    use std::sync::atomic::AtomicUsize;

    use airtouch::Group;

    #[derive(Default)]
    struct CountingListener {
        calls: AtomicUsize,
    }

    impl CountingListener {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CoordinatorListener for CountingListener {
        fn on_coordinator_update(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn coordinator(controller: MockAirTouch) -> Coordinator {
        Coordinator::new(Arc::new(controller), Coordinator::DEFAULT_UPDATE_INTERVAL)
    }

    #[tokio::test]
    async fn test_refresh_stores_data() {
        let mut controller = MockAirTouch::new();
        controller.expect_update_info().times(1).returning(|| Ok(()));
        controller
            .expect_info()
            .times(1)
            .returning(|| Ok(info(&[Group::new(0, "Kitchen", 50), Group::new(4, "Study", 0)])));

        let coordinator = coordinator(controller);
        assert_eq!(coordinator.data(), None);
        assert!(!coordinator.last_update_success());

        coordinator.refresh().await.unwrap();

        let data = coordinator.data().unwrap();
        assert_eq!(data.group_numbers().collect::<Vec<_>>(), vec![0, 4]);
        assert!(coordinator.last_update_success());
    }

    #[tokio::test]
    async fn test_refresh_keeps_acs() {
        let mut controller = MockAirTouch::new();
        controller.expect_update_info().returning(|| Ok(()));
        controller.expect_info().returning(|| {
            Ok(Info {
                acs: vec![airtouch::Ac {
                    ac_number: 0,
                    is_on: true,
                }],
                groups: vec![],
            })
        });

        let coordinator =
            Coordinator::new(Arc::new(controller), Duration::from_secs(15));
        assert_eq!(coordinator.update_interval(), Duration::from_secs(15));

        coordinator.refresh().await.unwrap();

        assert_eq!(coordinator.data().unwrap().acs.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_data() {
        let mut controller = MockAirTouch::new();
        let mut calls = 0;
        controller.expect_update_info().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(())
            } else {
                Err(airtouch::Error::NotConnected)
            }
        });
        controller
            .expect_info()
            .times(1)
            .returning(|| Ok(info(&[Group::new(0, "Kitchen", 50)])));

        let coordinator = coordinator(controller);

        coordinator.refresh().await.unwrap();
        assert_eq!(
            coordinator.refresh().await,
            Err(airtouch::Error::NotConnected)
        );

        assert!(!coordinator.last_update_success());
        assert_eq!(coordinator.data().unwrap().groups.len(), 1);
    }

    #[tokio::test]
    async fn test_first_refresh_not_ready() {
        let mut controller = MockAirTouch::new();
        controller
            .expect_update_info()
            .returning(|| Err(airtouch::Error::Connection("refused".to_string())));

        let coordinator = coordinator(controller);

        assert!(matches!(
            coordinator.first_refresh().await,
            Err(Error::NotReady(airtouch::Error::Connection(_)))
        ));
    }

    #[tokio::test]
    async fn test_listeners_notified_on_success_and_failure() {
        let mut controller = MockAirTouch::new();
        let mut calls = 0;
        controller.expect_update_info().returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(())
            } else {
                Err(airtouch::Error::NotConnected)
            }
        });
        controller.expect_info().returning(|| Ok(info(&[])));

        let coordinator = coordinator(controller);
        let listener = Arc::new(CountingListener::default());
        coordinator.add_listener(listener.clone());

        coordinator.refresh().await.unwrap();
        coordinator.refresh().await.unwrap_err();

        assert_eq!(listener.calls(), 2);
    }

    #[tokio::test]
    async fn test_removed_listener_not_notified() {
        let mut controller = MockAirTouch::new();
        controller.expect_update_info().returning(|| Ok(()));
        controller.expect_info().returning(|| Ok(info(&[])));

        let coordinator = coordinator(controller);
        let first = Arc::new(CountingListener::default());
        let second = Arc::new(CountingListener::default());

        let first_id = coordinator.add_listener(first.clone());
        let second_id = coordinator.add_listener(second.clone());
        assert_ne!(first_id, second_id);

        coordinator.remove_listener(first_id);
        coordinator.refresh().await.unwrap();

        assert_eq!(first.calls(), 0);
        assert_eq!(second.calls(), 1);
        assert_eq!(coordinator.listeners_count(), 1);
    }

    #[tokio::test]
    async fn test_dropped_listener_is_pruned() {
        let mut controller = MockAirTouch::new();
        controller.expect_update_info().returning(|| Ok(()));
        controller.expect_info().returning(|| Ok(info(&[])));

        let coordinator = coordinator(controller);
        let listener = Arc::new(CountingListener::default());
        coordinator.add_listener(listener.clone());
        drop(listener);

        coordinator.refresh().await.unwrap();

        assert_eq!(coordinator.listeners_count(), 0);
    }
}

use std::sync::Arc;
use std::time::Duration;

use airtouch::Controller;
use cover::{CoverEntity, StateWriter};
use log::{info, warn};

use crate::{Coordinator, GroupVent, ListenerId, Result};

/// A running integration: the coordinator and one vent per group.
pub struct Entry {
    pub coordinator: Arc<Coordinator>,
    pub vents: Vec<Arc<GroupVent>>,
    subscriptions: Vec<ListenerId>,
}

pub async fn setup_entry(
    controller: Arc<dyn Controller>,
    update_interval: Duration,
    writer: StateWriter,
) -> Result<Entry> {
    let coordinator = Arc::new(Coordinator::new(controller, update_interval));
    coordinator.first_refresh().await?;

    let info = coordinator.data().unwrap_or_default();
    if info.groups.is_empty() {
        warn!("controller reported no groups");
    }

    let mut vents = Vec::with_capacity(info.groups.len());
    let mut subscriptions = Vec::with_capacity(info.groups.len());

    for group_number in info.group_numbers() {
        let vent = Arc::new(GroupVent::new(
            coordinator.clone(),
            group_number,
            writer.clone(),
        )?);

        info!("added {} ({})", vent.name(), vent.unique_id());

        subscriptions.push(coordinator.add_listener(vent.clone()));
        vent.write_state();
        vents.push(vent);
    }

    Ok(Entry {
        coordinator,
        vents,
        subscriptions,
    })
}

pub fn unload_entry(entry: Entry) {
    for id in entry.subscriptions {
        entry.coordinator.remove_listener(id);
    }

    info!("unloaded {} vents", entry.vents.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{info, MockAirTouch};
    use crate::Error;

    use airtouch::Group;

    fn controller(groups: Vec<Group>) -> MockAirTouch {
        let mut controller = MockAirTouch::new();
        controller.expect_update_info().returning(|| Ok(()));

        let listed = groups.clone();
        controller
            .expect_info()
            .returning(move || Ok(info(&listed)));
        controller.expect_group_by_group_number().returning(move |number| {
            groups
                .iter()
                .find(|group| group.group_number == number)
                .cloned()
                .ok_or(airtouch::Error::UnknownGroup(number))
        });

        controller
    }

    #[tokio::test]
    async fn test_one_vent_per_group() {
        let controller = controller(vec![
            Group::new(0, "Kitchen", 100),
            Group::new(3, "Living Room", 40),
            Group::new(7, "Bedroom", 0),
        ]);
        let (writer, mut receiver) = StateWriter::channel();

        let entry = setup_entry(Arc::new(controller), Duration::from_secs(60), writer)
            .await
            .unwrap();

        assert_eq!(
            entry
                .vents
                .iter()
                .map(|vent| vent.group_number())
                .collect::<Vec<_>>(),
            vec![0, 3, 7]
        );
        assert_eq!(entry.coordinator.listeners_count(), 3);

        let mut names = vec![];
        while let Ok(state) = receiver.try_recv() {
            names.push(state.name);
        }
        assert_eq!(names, vec!["Kitchen Vent", "Living Room Vent", "Bedroom Vent"]);
    }

    #[tokio::test]
    async fn test_setup_not_ready() {
        let mut controller = MockAirTouch::new();
        controller
            .expect_update_info()
            .returning(|| Err(airtouch::Error::NotConnected));
        let (writer, _receiver) = StateWriter::channel();

        let result = setup_entry(Arc::new(controller), Duration::from_secs(60), writer).await;

        assert!(matches!(result, Err(Error::NotReady(_))));
    }

    #[tokio::test]
    async fn test_unload_unsubscribes_vents() {
        let controller = controller(vec![Group::new(1, "Office", 50), Group::new(2, "Hall", 5)]);
        let (writer, _receiver) = StateWriter::channel();

        let entry = setup_entry(Arc::new(controller), Duration::from_secs(60), writer)
            .await
            .unwrap();
        let coordinator = entry.coordinator.clone();

        unload_entry(entry);

        assert_eq!(coordinator.listeners_count(), 0);
    }
}

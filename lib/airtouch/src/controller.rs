use async_trait::async_trait;

use crate::{Group, Info, Result};

/// Client side of an Airtouch 4 unit.
///
/// `update_info` and `set_group_to_percentage` talk to the device, the rest
/// answer from whatever the last update brought in.
#[async_trait]
pub trait Controller: Send + Sync {
    async fn update_info(&self) -> Result<()>;

    fn info(&self) -> Result<Info>;

    fn group_by_group_number(&self, group_number: u8) -> Result<Group>;

    async fn set_group_to_percentage(&self, group_number: u8, percentage: u8) -> Result<Group>;
}

#[cfg(feature = "stub")]
mod stub {
    use std::sync::{Mutex, PoisonError};

    use async_trait::async_trait;
    use log::info;

    use super::Controller;
    use crate::{Ac, Error, Group, Info, Result};

    pub struct StubController {
        acs: Vec<Ac>,
        groups: Mutex<Vec<Group>>,
    }

    impl StubController {
        pub fn new(groups: Vec<Group>) -> Self {
            Self {
                acs: vec![Ac {
                    ac_number: 0,
                    is_on: true,
                }],
                groups: Mutex::new(groups),
            }
        }
    }

    #[async_trait]
    impl Controller for StubController {
        async fn update_info(&self) -> Result<()> {
            info!("stub update info");
            Ok(())
        }

        fn info(&self) -> Result<Info> {
            let groups = self.groups.lock().unwrap_or_else(PoisonError::into_inner);

            Ok(Info {
                acs: self.acs.clone(),
                groups: groups.iter().map(Into::into).collect(),
            })
        }

        fn group_by_group_number(&self, group_number: u8) -> Result<Group> {
            let groups = self.groups.lock().unwrap_or_else(PoisonError::into_inner);

            groups
                .iter()
                .find(|group| group.group_number == group_number)
                .cloned()
                .ok_or(Error::UnknownGroup(group_number))
        }

        async fn set_group_to_percentage(&self, group_number: u8, percentage: u8) -> Result<Group> {
            info!("stub set group {group_number} to {percentage}%");

            if percentage > 100 {
                return Err(Error::InvalidPercentage(percentage));
            }

            let mut groups = self.groups.lock().unwrap_or_else(PoisonError::into_inner);

            let group = groups
                .iter_mut()
                .find(|group| group.group_number == group_number)
                .ok_or(Error::UnknownGroup(group_number))?;

            *group = group.with_percentage(percentage);

            Ok(group.clone())
        }
    }

}

#[cfg(feature = "stub")]
pub use stub::StubController;

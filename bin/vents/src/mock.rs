use airtouch::{Group, Info};
use async_trait::async_trait;
use mockall::mock;

mock! {
    pub AirTouch {}

    #[async_trait]
    impl airtouch::Controller for AirTouch {
        async fn update_info(&self) -> airtouch::Result<()>;
        fn info(&self) -> airtouch::Result<Info>;
        fn group_by_group_number(&self, group_number: u8) -> airtouch::Result<Group>;
        async fn set_group_to_percentage(
            &self,
            group_number: u8,
            percentage: u8,
        ) -> airtouch::Result<Group>;
    }
}

pub fn info(groups: &[Group]) -> Info {
    Info {
        acs: vec![],
        groups: groups.iter().map(Into::into).collect(),
    }
}

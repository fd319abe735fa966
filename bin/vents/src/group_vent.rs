use std::sync::{Arc, PoisonError, RwLock};

use airtouch::{Controller, Group};
use async_trait::async_trait;
use cover::{BitFlags, CoverEntity, CoverFeature, DeviceClass, DeviceInfo, StateWriter};
use log::debug;

use crate::{Coordinator, CoordinatorListener, Error, Result, DOMAIN};

const MANUFACTURER: &str = "Airtouch";
const MODEL: &str = "Airtouch 4";
const POSITION_STEP: u8 = 5;

/// Damper of a single Airtouch group exposed as a cover.
pub struct GroupVent {
    group_number: u8,
    controller: Arc<dyn Controller>,
    coordinator: Arc<Coordinator>,
    unit: RwLock<Group>,
    writer: StateWriter,
}

impl GroupVent {
    pub fn new(coordinator: Arc<Coordinator>, group_number: u8, writer: StateWriter) -> Result<Self> {
        let controller = coordinator.controller();
        let unit = controller.group_by_group_number(group_number)?;
        ensure_group(group_number, &unit)?;

        Ok(Self {
            group_number,
            controller,
            coordinator,
            unit: RwLock::new(unit),
            writer,
        })
    }

    pub fn group_number(&self) -> u8 {
        self.group_number
    }

    pub fn unit(&self) -> Group {
        self.unit
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn write_state(&self) {
        self.writer.write(self.state());
    }

    fn replace_unit(&self, unit: Group) -> Result<()> {
        ensure_group(self.group_number, &unit)?;
        *self.unit.write().unwrap_or_else(PoisonError::into_inner) = unit;

        Ok(())
    }

    async fn set_percentage(&self, percentage: u8) -> Result<()> {
        debug!("set group {} to {percentage}%", self.group_number);

        let unit = self
            .controller
            .set_group_to_percentage(self.group_number, percentage)
            .await?;
        self.replace_unit(unit)?;
        self.write_state();

        Ok(())
    }
}

fn ensure_group(expected: u8, unit: &Group) -> Result<()> {
    if unit.group_number == expected {
        Ok(())
    } else {
        Err(Error::GroupMismatch {
            expected,
            actual: unit.group_number,
        })
    }
}

/// Nearest multiple of [`POSITION_STEP`], capped at 100.
pub(crate) fn round_position(position: u8) -> u8 {
    let position = position.min(100);
    (position + POSITION_STEP / 2) / POSITION_STEP * POSITION_STEP
}

impl CoordinatorListener for GroupVent {
    fn on_coordinator_update(&self) -> Result<()> {
        let unit = self.controller.group_by_group_number(self.group_number)?;
        self.replace_unit(unit)?;
        self.write_state();

        Ok(())
    }
}

#[async_trait]
impl CoverEntity for GroupVent {
    type Error = Error;

    fn unique_id(&self) -> String {
        format!("{}DAMPER", self.group_number)
    }

    fn name(&self) -> String {
        let unit = self.unit.read().unwrap_or_else(PoisonError::into_inner);
        format!("{} Vent", unit.group_name)
    }

    fn device_info(&self) -> DeviceInfo {
        DeviceInfo::new(DOMAIN, &self.unique_id(), self.name(), MANUFACTURER, MODEL)
    }

    fn device_class(&self) -> Option<DeviceClass> {
        Some(DeviceClass::Damper)
    }

    fn supported_features(&self) -> BitFlags<CoverFeature> {
        CoverFeature::Open | CoverFeature::Close | CoverFeature::SetPosition
    }

    fn available(&self) -> bool {
        self.coordinator.last_update_success()
    }

    fn is_closed(&self) -> bool {
        self.current_position() == Some(0)
    }

    fn current_position(&self) -> Option<u8> {
        let unit = self.unit.read().unwrap_or_else(PoisonError::into_inner);
        Some(unit.open_percentage)
    }

    async fn open(&self) -> Result<()> {
        self.set_percentage(100).await
    }

    async fn close(&self) -> Result<()> {
        self.set_percentage(0).await
    }

    async fn set_position(&self, position: u8) -> Result<()> {
        self.set_percentage(round_position(position)).await
    }
}

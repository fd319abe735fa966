use async_trait::async_trait;
use enumflags2::BitFlags;

use crate::{CoverFeature, CoverState, DeviceClass, DeviceInfo, Status};

/// Contract a cover-like entity exposes to the host platform.
#[async_trait]
pub trait CoverEntity: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn unique_id(&self) -> String;

    fn name(&self) -> String;

    fn device_info(&self) -> DeviceInfo;

    fn device_class(&self) -> Option<DeviceClass> {
        None
    }

    fn supported_features(&self) -> BitFlags<CoverFeature>;

    fn available(&self) -> bool {
        true
    }

    fn is_closed(&self) -> bool;

    /// Position in percent, 0 is closed and 100 is fully open.
    fn current_position(&self) -> Option<u8> {
        None
    }

    async fn open(&self) -> Result<(), Self::Error>;

    async fn close(&self) -> Result<(), Self::Error>;

    async fn set_position(&self, position: u8) -> Result<(), Self::Error>;

    fn state(&self) -> CoverState {
        CoverState {
            unique_id: self.unique_id(),
            name: self.name(),
            device_class: self.device_class(),
            supported_features: self.supported_features().bits(),
            available: self.available(),
            status: if self.is_closed() {
                Status::Closed
            } else {
                Status::Open
            },
            current_position: self.current_position(),
        }
    }
}

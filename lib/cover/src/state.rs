use log::debug;
use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::DeviceClass;

#[derive(Copy, Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    Closed,
}

/// What the host platform records for a cover after every change.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CoverState {
    pub unique_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<DeviceClass>,
    pub supported_features: u8,
    pub available: bool,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_position: Option<u8>,
}

/// Sending half of the "state changed" notifications.
#[derive(Clone, Debug)]
pub struct StateWriter {
    sender: UnboundedSender<CoverState>,
}

impl StateWriter {
    pub fn channel() -> (Self, UnboundedReceiver<CoverState>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn write(&self, state: CoverState) {
        if let Err(err) = self.sender.send(state) {
            debug!("dropped state of {}, nobody listens", err.0.unique_id);
        }
    }
}

mod device;
pub use device::{DeviceClass, DeviceInfo};

mod entity;
pub use entity::CoverEntity;

mod feature;
pub use feature::CoverFeature;

mod state;
pub use state::{CoverState, StateWriter, Status};

pub use enumflags2::BitFlags;

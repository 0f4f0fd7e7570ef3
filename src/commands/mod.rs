pub mod authentication;
pub mod device;
pub mod ptz;
pub mod snapshot;

pub use authentication::Authentication;
pub use device::DeviceInfo;
pub use ptz::{Direction, Ptz};
pub use snapshot::Snapshot;

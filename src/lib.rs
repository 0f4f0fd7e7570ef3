pub mod commands;
pub mod constants;
pub mod error;
pub mod imou;
pub mod protocol;

pub use commands::*;
pub use error::{ImouError, Result};
pub use imou::{AccessToken, Credentials, ImouCam};

//! Data models

pub mod profile;
pub mod card_swipe;
pub mod wifi_association;
pub mod booking;
pub mod library_checkout;
pub mod cctv_frame;
pub mod alert;

pub use profile::*;
pub use card_swipe::*;
pub use wifi_association::*;
pub use booking::*;
pub use library_checkout::*;
pub use cctv_frame::*;
pub use alert::*;

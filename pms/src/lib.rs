pub use capture::*;
pub use decoder::*;
pub use error::*;
pub use frame_parser::*;
pub use packet::*;
pub use poller::*;
pub use reading::*;

pub mod capture;
pub mod decoder;
pub mod error;
pub mod frame_parser;
pub mod packet;
pub mod poller;
pub mod reading;

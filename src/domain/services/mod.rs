pub mod actions;
pub mod events;
mod poller;
mod validator;
mod wizard;

pub use poller::*;
pub use validator::*;
pub use wizard::*;

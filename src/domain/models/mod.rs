mod action;
mod api;
mod candidate;
mod error;
mod event;
mod generation;
mod loading;
mod notice;
mod session;
mod step;
mod textarea;

pub use action::*;
pub use api::*;
pub use candidate::*;
pub use error::*;
pub use event::*;
pub use generation::*;
pub use loading::*;
pub use notice::*;
pub use session::*;
pub use step::*;
pub use textarea::*;

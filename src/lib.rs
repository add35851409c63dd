pub mod args;
pub mod backend;
pub mod error;
pub mod logging;
pub mod model;
pub mod notify;
pub mod storage;

pub mod controller {
    pub mod analysis;
    pub mod practice;
    pub mod profile;
    pub mod round;
}

pub mod mvu {
    pub mod round;
    pub mod runtime;
}

pub use controller::round::{RoundDataController, RoundSnapshot};
pub use mvu::round::{FetchPhase, MAX_FETCH_ATTEMPTS};

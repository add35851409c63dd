pub mod drill;
pub mod goals;
pub mod profile;
pub mod round;

pub use drill::*;
pub use goals::*;
pub use profile::*;
pub use round::*;

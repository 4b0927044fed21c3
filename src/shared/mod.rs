pub mod error;
pub mod macros;
pub mod structs;

pub use error::Accepted;
pub use error::ConfigError;
pub use error::Rejection;
pub use structs::CarState;
pub use structs::Direction;
pub use structs::Phase;

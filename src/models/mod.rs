pub mod annotation;
pub mod group;
pub mod user;

pub use annotation::*;
pub use group::*;
pub use user::*;

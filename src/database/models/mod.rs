pub mod keyword;
pub mod user;

pub use keyword::*;
pub use user::*;

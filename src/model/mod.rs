pub mod creator;
pub mod post;

pub use creator::{Creator, Platform};
pub use post::{Post, PostKind};

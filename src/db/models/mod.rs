mod cart;
mod listing;
mod order;
mod user;

pub use cart::*;
pub use listing::*;
pub use order::*;
pub use user::*;

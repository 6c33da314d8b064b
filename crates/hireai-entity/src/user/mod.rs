//! Local user domain entities.

pub mod model;
pub mod role;
pub mod view;

pub use model::{LocalUser, NewLocalUser, UserChanges};
pub use role::UserRole;
pub use view::UserView;

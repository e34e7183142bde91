//! Address book commands.
//!
//! Add, list, and remove recipient public keys in `.sealcast.toml`.

mod add;
mod list;
mod rm;

pub use add::execute as add;
pub use list::execute as list;
pub use rm::execute as rm;

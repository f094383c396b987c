mod env;
mod info;
mod resolve;

pub use env::cmd_env;
pub use info::cmd_info;
pub use resolve::cmd_resolve;

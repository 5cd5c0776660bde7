pub mod api;
pub mod error;
mod util;

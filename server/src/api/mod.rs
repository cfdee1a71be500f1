pub mod error;
pub mod players;
pub mod server;

pub use server::{router, run_api_server};

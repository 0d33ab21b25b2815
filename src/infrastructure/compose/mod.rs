/// `docker compose` invocations
pub mod compose_client;

pub use compose_client::ComposeClient;

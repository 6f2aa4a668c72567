pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{ContentGateway, GatewayError};
pub use providers::BibleApiGateway;
pub use types::{Book, Translation, Verse, VerseContent};

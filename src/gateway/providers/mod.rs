pub mod bible_api;

pub use bible_api::BibleApiGateway;

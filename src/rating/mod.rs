//! Client side of the rating model: the [`RatingClient`] seam and the Ollama
//! implementation behind it.

pub mod http_client;
pub mod ollama;
pub mod scrub;
pub mod traits;

pub use ollama::OllamaClient;
pub use traits::RatingClient;

pub mod client;
pub mod error;
pub mod fanout;
pub mod prompt;
pub mod utils;

pub use client::LlmClient;
pub use error::LlmError;
pub use fanout::{generate_fanout, normalize_response};
pub use prompt::{build_fanout_prompt, ContractVersion};

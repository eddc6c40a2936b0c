//! LLM adapters

mod openai_client;

pub use openai_client::{OpenAiClientConfig, OpenAiScriptClient};

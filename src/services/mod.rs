pub mod base_url;
pub mod summarization_chain;

pub use base_url::{base_url_for, resolve_base_url};
pub use summarization_chain::{ChainOptions, SummarizationChain, PROMPT_TEMPLATE};

pub mod device;
pub mod embedder;
pub mod llm;
pub mod network;

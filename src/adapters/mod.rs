// Adapters 層：domain ports 的具體實作（目錄檔、操作者確認）

pub mod prompt;
pub mod storage;

pub use prompt::{AutoApprove, StdinPrompt};
pub use storage::JsonCatalogStore;

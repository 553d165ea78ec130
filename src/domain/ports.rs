use crate::domain::model::{CatalogEntry, ChangeSet};
use crate::utils::error::Result;

/// 目錄檔的讀寫。讀取整份、一次重寫整份。
pub trait CatalogStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Vec<CatalogEntry>>> + Send;
    fn save(
        &self,
        entries: &[CatalogEntry],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn location(&self) -> String;
}

/// 寫入前由呼叫端決定是否放行
pub trait ConfirmGate {
    fn confirm(&self, changes: &ChangeSet) -> bool;
}

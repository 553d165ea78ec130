use crate::domain::model::CatalogEntry;
use crate::domain::ports::CatalogStore;
use crate::utils::error::{LinkError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 以 JSON 陣列保存的目錄檔
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// 4 格縮排，與既有檔案格式一致
pub fn to_catalog_json(entries: &[CatalogEntry]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    entries.serialize(&mut serializer)?;
    Ok(buffer)
}

impl CatalogStore for JsonCatalogStore {
    async fn load(&self) -> Result<Vec<CatalogEntry>> {
        let data = fs::read(&self.path)?;
        let entries: Vec<CatalogEntry> =
            serde_json::from_slice(&data).map_err(|e| LinkError::Catalog {
                message: format!("{}: {}", self.path.display(), e),
            })?;
        tracing::debug!("Loaded {} entries from {}", entries.len(), self.path.display());
        Ok(entries)
    }

    async fn save(&self, entries: &[CatalogEntry]) -> Result<()> {
        let data = to_catalog_json(entries)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // 先寫暫存檔再改名，避免寫到一半留下殘缺的目錄
        let temp_path = self.temp_path();
        fs::write(&temp_path, &data)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(
            "Wrote {} entries ({} bytes) to {}",
            entries.len(),
            data.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

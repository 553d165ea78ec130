pub mod tables;
pub mod toml_config;

pub use tables::{Candidate, CatalogTables, PhraseBook, ReplacementPools};
pub use toml_config::{MissingPoolPolicy, ReconcileConfig};

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use crate::app::modes::RunMode;
    use crate::config::tables::CatalogTables;
    use crate::config::toml_config::ReconcileConfig;
    use crate::utils::error::{LinkError, Result};
    use crate::utils::validation::{validate_file_extension, validate_path, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::path::Path;

    /// 明確指定的檔案必須存在，不默默退回預設值
    fn require_file(field: &str, path: &str) -> Result<()> {
        if Path::new(path).is_file() {
            Ok(())
        } else {
            Err(LinkError::MissingConfig {
                field: format!("{} ({})", field, path),
            })
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "mood-links")]
    #[command(about = "Check catalog links and swap dead ones for curated replacements")]
    pub struct CliConfig {
        #[arg(long, default_value = "SentimentSync/Resources/ContentData.json")]
        pub catalog: String,

        #[arg(long, value_enum, default_value_t = RunMode::CheckAll)]
        pub mode: RunMode,

        #[arg(long, help = "TOML file with probe/enrich/run settings")]
        pub config: Option<String>,

        #[arg(long, help = "TOML file with replacement pools and phrases")]
        pub tables: Option<String>,

        #[arg(long, help = "Apply changes without asking")]
        pub yes: bool,

        #[arg(long, help = "Report changes without writing the catalog")]
        pub dry_run: bool,

        #[arg(long, help = "Write the change set as JSON to this path")]
        pub report: Option<String>,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        pub fn load_settings(&self) -> Result<ReconcileConfig> {
            let settings = match &self.config {
                Some(path) => {
                    require_file("--config", path)?;
                    ReconcileConfig::from_file(path)?
                }
                None => ReconcileConfig::default(),
            };
            settings.validate()?;
            Ok(settings)
        }

        pub fn load_tables(&self) -> Result<CatalogTables> {
            match &self.tables {
                Some(path) => {
                    require_file("--tables", path)?;
                    CatalogTables::from_file(path)
                }
                None => CatalogTables::builtin(),
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("catalog", &self.catalog)?;
            validate_file_extension("catalog", &self.catalog, &["json"])?;
            if let Some(report) = &self.report {
                validate_path("report", report)?;
                validate_file_extension("report", report, &["json"])?;
            }
            Ok(())
        }
    }

}

use clap::Parser;
use mood_links::adapters::JsonCatalogStore;
use mood_links::domain::model::CatalogEntry;
use mood_links::domain::ports::CatalogStore;
use mood_links::utils::{logger, validation::Validate};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "regenerate-ids")]
#[command(about = "Assign a fresh UUID to every catalog entry")]
struct Args {
    /// Path to the catalog JSON file
    #[arg(long, default_value = "SentimentSync/Resources/ContentData.json")]
    catalog: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Validate for Args {
    fn validate(&self) -> mood_links::Result<()> {
        mood_links::utils::validation::validate_file_extension("catalog", &self.catalog, &["json"])
    }
}

/// 每筆項目換上新的小寫 UUID v4
fn regenerate(entries: &mut [CatalogEntry]) {
    for entry in entries.iter_mut() {
        entry.id = Uuid::new_v4().to_string();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    if let Err(e) = args.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let store = JsonCatalogStore::new(&args.catalog);
    let mut entries = store.load().await?;
    regenerate(&mut entries);
    store.save(&entries).await?;

    tracing::info!("🆔 Regenerated {} ids in {}", entries.len(), store.location());
    println!("✅ Assigned new ids to {} entries", entries.len());
    Ok(())
}

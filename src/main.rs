use clap::Parser;
use mood_links::adapters::{AutoApprove, JsonCatalogStore, StdinPrompt};
use mood_links::app::{run_mode, AuditReport, RunMode};
use mood_links::core::{CommitOutcome, ReconcileEngine, ReconcileReport};
use mood_links::domain::ports::ConfirmGate;
use mood_links::utils::error::{ErrorSeverity, LinkError};
use mood_links::utils::{logger, validation::Validate};
use mood_links::CliConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting mood-links ({} mode)", config.mode);
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        if e.severity() != ErrorSeverity::Low {
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        }

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(config: &CliConfig) -> Result<(), LinkError> {
    let settings = config.load_settings()?;
    let (pools, phrases) = config.load_tables()?.into_runtime()?;
    tracing::info!("📚 Loaded {} replacement pools", pools.pair_count());

    let store = JsonCatalogStore::new(&config.catalog);
    let mut engine = ReconcileEngine::new(store, settings, Arc::new(pools), Arc::new(phrases))?;

    let report = run_mode(&mut engine, config.mode).await?;
    print_changes(&report);

    if let Some(path) = &config.report {
        AuditReport::new(config.mode, &report).write_to(path)?;
    }

    let gate: Box<dyn ConfirmGate> = if config.yes {
        Box::new(AutoApprove)
    } else {
        Box::new(StdinPrompt::new(config.mode.confirmation_question()))
    };

    match engine.commit(&report, gate.as_ref(), config.dry_run).await? {
        CommitOutcome::NothingToWrite => {
            println!("\n✅ {}", config.mode.nothing_changed_message());
        }
        CommitOutcome::DryRun => {
            println!(
                "\n🔍 Dry run: {} entries would be updated in {}",
                report.changes.len(),
                config.catalog
            );
        }
        CommitOutcome::Written => {
            println!(
                "\n✅ Updated {} entries in {}",
                report.changes.len(),
                config.catalog
            );
        }
    }

    print_summary(config.mode, &report);
    Ok(())
}

/// 每筆變更都列出新舊值以便稽核
fn print_changes(report: &ReconcileReport) {
    if report.changes.is_empty() {
        return;
    }

    println!("\n📋 {} changes:", report.changes.len());
    for record in report.changes.iter() {
        println!(
            "\n- [{}] {} {} ({})",
            record.index, record.emotion, record.content_type, record.id
        );
        if record.url_changed() {
            println!("  Old URL: {}", record.before.url);
            println!("  New URL: {}", record.after.url);
        }
        if record.before.title != record.after.title {
            println!("  Old title: {}", record.before.title);
            println!("  New title: {}", record.after.title);
        }
        if record.before.description != record.after.description {
            println!("  Old description: {}", record.before.description);
            println!("  New description: {}", record.after.description);
        }
    }
}

fn print_summary(mode: RunMode, report: &ReconcileReport) {
    let stats = &report.stats;
    match mode {
        RunMode::Metadata => {
            println!(
                "📊 {} entries examined, {} refreshed",
                stats.examined, stats.refreshed
            );
        }
        _ => {
            println!(
                "📊 {} examined, {} alive, {} dead, {} replaced, {} left broken",
                stats.examined, stats.alive, stats.dead, stats.replaced, stats.left_broken
            );
            println!(
                "   {} probes, {} cached, {} unprobeable",
                stats.probes, stats.cache_hits, stats.unprobeable
            );
        }
    }
}

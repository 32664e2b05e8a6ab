use std::path::Path;

use examroom_api::config::Config;
use examroom_api::services::catalog_loader::load_catalog;
use examroom_api::services::roster_loader::load_roster;
use tracing_subscriber::fmt::init;

/// Loads the question catalog and the officer roster exactly the way the
/// server does and prints a per-chapter summary, so a broken question bank
/// is caught before deployment instead of at server startup.
///
/// An optional first argument overrides the configured catalog directory.
fn main() -> anyhow::Result<()> {
    init();

    let config = Config::load().expect("Failed to load configuration");
    let catalog_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.contest_dir.clone());

    let catalog = load_catalog(Path::new(&catalog_dir))?;
    println!("Catalog loaded successfully!");
    println!("Total subjects: {}", catalog.subject_count());
    for subject in catalog.subjects() {
        println!(
            "Subject {}: {} ({} chapters, {} minutes, {} questions per test)",
            subject.id,
            subject.name,
            subject.chapters.len(),
            subject.duration_minutes,
            subject.quota
        );
        for chapter in &subject.chapters {
            println!(
                "  Chapter {}: {} (draws {} of {} questions)",
                chapter.id,
                chapter.name,
                chapter.quota,
                chapter.questions.len()
            );
        }
    }

    let roster = load_roster(Path::new(&config.roster_path))?;
    println!("Roster loaded: {} officers", roster.len());

    Ok(())
}

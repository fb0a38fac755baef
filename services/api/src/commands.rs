use clap::Args;
use maestro_match::catalog::{CatalogImporter, DuplicateGroup, EntityKind, EntryId, NameCatalog};
use maestro_match::config::AppConfig;
use maestro_match::error::AppError;
use maestro_match::migration::{LegacyMigrator, MigrationReport};
use maestro_match::{normalize, telemetry, MatchReason, NameMatcher};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct NormalizeArgs {
    /// Name to normalize
    pub(crate) name: String,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Stored name
    pub(crate) left: String,
    /// Name to compare against it
    pub(crate) right: String,
}

#[derive(Args, Debug)]
pub(crate) struct LookupArgs {
    /// Catalog CSV export (Kind,Name[,Composer])
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Entity kind to search (composer, conductor, orchestra, soloist, venue, work)
    #[arg(long)]
    pub(crate) kind: EntityKind,
    /// Name to look up
    pub(crate) name: String,
}

#[derive(Args, Debug)]
pub(crate) struct DedupeArgs {
    /// Catalog CSV export (Kind,Name[,Composer])
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Restrict the report to one entity kind
    #[arg(long)]
    pub(crate) kind: Option<EntityKind>,
}

#[derive(Args, Debug)]
pub(crate) struct MigrateArgs {
    /// Legacy concert export with free-text name columns
    #[arg(long)]
    pub(crate) legacy: PathBuf,
    /// Existing catalog to resolve names against
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print every migrated record
    #[arg(long)]
    pub(crate) list_records: bool,
}

pub(crate) fn run_normalize(args: NormalizeArgs) -> Result<(), AppError> {
    println!("{}", normalize(&args.name));
    Ok(())
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let matcher = configured_matcher()?;
    let reason = matcher.explain(&args.left, &args.right);

    println!("Left:  {} ({})", args.left, normalize(&args.left));
    println!("Right: {} ({})", args.right, normalize(&args.right));
    match reason {
        Some(reason) => println!("Match: yes, {}", describe_reason(reason)),
        None => println!("Match: no"),
    }
    Ok(())
}

pub(crate) fn run_lookup(args: LookupArgs) -> Result<(), AppError> {
    let matcher = configured_matcher()?;
    let catalog = CatalogImporter::from_path(&args.catalog, matcher)?;
    let candidates = catalog.candidates(args.kind, &args.name);

    if candidates.is_empty() {
        println!("No {} entries match '{}'", args.kind.label(), args.name);
        return Ok(());
    }

    println!("{} entries matching '{}'", args.kind.label(), args.name);
    for candidate in candidates {
        println!(
            "- {} {} ({})",
            candidate.entry.id,
            candidate.entry.name,
            describe_reason(candidate.reason)
        );
    }
    Ok(())
}

pub(crate) fn run_dedupe(args: DedupeArgs) -> Result<(), AppError> {
    let matcher = configured_matcher()?;
    let catalog = CatalogImporter::from_path(&args.catalog, matcher)?;
    let kinds = match args.kind {
        Some(kind) => vec![kind],
        None => EntityKind::ordered().to_vec(),
    };

    println!("Duplicate report for {}", args.catalog.display());
    for kind in kinds {
        render_duplicate_groups(kind, &catalog.duplicate_groups(kind));
    }
    Ok(())
}

pub(crate) fn run_migrate(args: MigrateArgs) -> Result<(), AppError> {
    let matcher = configured_matcher()?;
    let mut catalog = match &args.catalog {
        Some(path) => CatalogImporter::from_path(path, matcher)?,
        None => NameCatalog::new(matcher),
    };

    let report = LegacyMigrator::from_path(&args.legacy, &mut catalog)?;
    render_migration_report(&catalog, &report, args.list_records);
    Ok(())
}

fn configured_matcher() -> Result<NameMatcher, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(NameMatcher::from_config(&config.matching))
}

fn describe_reason(reason: MatchReason) -> String {
    match reason {
        MatchReason::Fuzzy {
            distance,
            tolerance,
        } => format!("{}, {distance} of {tolerance} edits", reason.label()),
        other => other.label().to_string(),
    }
}

fn render_duplicate_groups(kind: EntityKind, groups: &[DuplicateGroup]) {
    if groups.is_empty() {
        println!("\n{}: no duplicates", kind.label());
        return;
    }

    println!("\n{}", kind.label());
    for group in groups {
        let names: Vec<String> = group
            .members
            .iter()
            .map(|entry| format!("{} {}", entry.id, entry.name))
            .collect();
        println!("- {}", names.join(" | "));
        for link in &group.links {
            println!(
                "    {} ~ {}: {}",
                link.left,
                link.right,
                describe_reason(link.reason)
            );
        }
    }
}

fn render_migration_report(catalog: &NameCatalog, report: &MigrationReport, list_records: bool) {
    println!("Legacy migration");
    println!("Records migrated: {}", report.records.len());

    println!("\nEntries created");
    for kind in EntityKind::ordered() {
        println!("- {}: {}", kind.label(), report.created_for(kind));
    }

    if report.merges.is_empty() {
        println!("\nSpelling variants merged: none");
    } else {
        println!("\nSpelling variants merged");
        for note in &report.merges {
            println!(
                "- {}: '{}' -> '{}' ({})",
                note.kind.label(),
                note.input,
                note.matched,
                describe_reason(note.reason)
            );
        }
    }

    if list_records {
        let name_of = |id: EntryId| {
            catalog
                .get(id)
                .map(|entry| entry.name.clone())
                .unwrap_or_default()
        };

        println!("\nRecords");
        for record in &report.records {
            let date = record
                .date
                .map(|date| date.to_string())
                .unwrap_or_else(|| "undated".to_string());
            let works: Vec<String> = record.works.iter().copied().map(name_of).collect();
            println!(
                "- {} | {} | {} | {} | {}",
                date,
                record.title,
                record.orchestra.map(name_of).unwrap_or_default(),
                record.conductor.map(name_of).unwrap_or_default(),
                works.join(", ")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuzzy_reasons_include_edit_budget() {
        let reason = MatchReason::Fuzzy {
            distance: 1,
            tolerance: 2,
        };
        assert_eq!(describe_reason(reason), "similar spelling, 1 of 2 edits");
        assert_eq!(describe_reason(MatchReason::LastName), "last name");
    }
}

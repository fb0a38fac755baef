use chrono::NaiveDate;
use maestro_match::catalog::{CatalogImporter, EntityKind, NameCatalog};
use maestro_match::migration::{LegacyMigrator, MigrationError};
use maestro_match::{MatchReason, NameMatcher};

fn legacy_export() -> &'static [u8] {
    include_bytes!("data/legacy_concerts.csv")
}

#[test]
fn legacy_export_consolidates_spelling_variants() {
    let mut catalog = NameCatalog::new(NameMatcher::default());
    let report =
        LegacyMigrator::from_reader(legacy_export(), &mut catalog).expect("migration succeeds");

    assert_eq!(report.records.len(), 5);
    assert_eq!(report.created_for(EntityKind::Conductor), 2);
    assert_eq!(report.created_for(EntityKind::Composer), 2);
    assert_eq!(report.created_for(EntityKind::Soloist), 1);
    assert_eq!(report.created_for(EntityKind::Work), 2);

    let first = &report.records[0];
    assert_eq!(first.date, NaiveDate::from_ymd_opt(1987, 5, 12));
    assert_eq!(first.title, "Violinkonzert");
    assert_eq!(first.rating, "Unvergesslich");

    let second = &report.records[1];
    assert_eq!(second.title, "Saisoneröffnung");
    assert_eq!(second.rating, "Sehr gut\nZugabe: Dvořák");

    assert_eq!(report.records[2].conductor, first.conductor);
    assert_eq!(report.records[2].soloists, first.soloists);
    assert_eq!(report.records[2].works, first.works);
    assert_eq!(report.records[3].conductor, second.conductor);
    assert_eq!(report.records[3].works, second.works);

    let empty = &report.records[4];
    assert!(empty.works.is_empty());
    assert!(empty.conductor.is_none());
    assert_eq!(empty.title, "");

    assert!(report.merges.iter().any(|note| note.kind == EntityKind::Composer
        && note.input == "Chaikovsky"
        && note.reason == MatchReason::Normalized));
}

#[test]
fn migration_refuses_catalog_with_works() {
    let mut catalog = CatalogImporter::from_reader(
        &include_bytes!("data/catalog.csv")[..],
        NameMatcher::default(),
    )
    .expect("catalog imports");

    let error = LegacyMigrator::from_reader(legacy_export(), &mut catalog)
        .expect_err("works already present");
    assert!(matches!(error, MigrationError::AlreadyMigrated));
}

#[test]
fn catalog_export_reports_duplicates() {
    let catalog = CatalogImporter::from_reader(
        &include_bytes!("data/catalog.csv")[..],
        NameMatcher::default(),
    )
    .expect("catalog imports");

    assert_eq!(catalog.len(), 13);

    let conductors = catalog.duplicate_groups(EntityKind::Conductor);
    assert_eq!(conductors.len(), 1);
    let names: Vec<&str> = conductors[0]
        .members
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["Herbert von Karajan", "Karajan"]);

    assert!(catalog.duplicate_groups(EntityKind::Venue).is_empty());
    assert!(catalog.duplicate_groups(EntityKind::Work).is_empty());

    let concerto = catalog
        .entries_of(EntityKind::Work)
        .find(|entry| entry.name == "Klavierkonzert Nr. 2")
        .expect("concerto present");
    let composer = concerto.parent.and_then(|id| catalog.get(id)).expect("linked");
    assert_eq!(composer.name, "Sergei Rachmaninoff");
}

#[test]
fn rejected_export_can_be_migrated_after_correction() {
    let broken = "Datum,Komponist,Werk\n2024-01-01,Brahms,Requiem\nbogus,Mahler,Symphonie Nr. 2\n";
    let fixed = "Datum,Komponist,Werk\n2024-01-01,Brahms,Requiem\n2024-02-01,Mahler,Symphonie Nr. 2\n";
    let mut catalog = NameCatalog::default();

    let error = LegacyMigrator::from_reader(broken.as_bytes(), &mut catalog)
        .expect_err("invalid date rejected");
    assert!(matches!(error, MigrationError::InvalidDate { row: 2, .. }));
    assert_eq!(catalog.len(), 0);

    let report =
        LegacyMigrator::from_reader(fixed.as_bytes(), &mut catalog).expect("retry succeeds");
    assert_eq!(report.records.len(), 2);
    assert_eq!(catalog.len(), 4);
}

use tempfile::tempdir;
use uuid::Uuid;

use trackserv_core::storage::BookStorage;
use trackserv_domain::{Client, PaymentPeriod, ProviderBook, ServiceProvider};
use trackserv_storage_json::JsonBookStorage;

fn sample_book() -> ProviderBook {
    let provider = ServiceProvider::new(Uuid::new_v4()).with_business_name("Studio Ana");
    let mut book = ProviderBook::new(provider);
    let provider_id = book.provider.id;
    book.add_client(Client::new(provider_id, "Bruno"));
    book.add_period(PaymentPeriod::open(
        provider_id,
        chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    ));
    book
}

#[test]
fn json_storage_can_save_and_load_book() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(dir.path().join("books"), dir.path().join("backups"))
        .expect("create storage");

    let book = sample_book();
    storage.save_book("Studio Ana", &book).expect("save book");

    let loaded = storage.load_book("Studio Ana").expect("load book");
    assert_eq!(loaded.id, book.id);
    assert_eq!(loaded.provider.business_name.as_deref(), Some("Studio Ana"));
    assert_eq!(loaded.clients.len(), 1);
    assert_eq!(loaded.periods.len(), 1);

    let path = storage.book_path("Studio Ana");
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert!(path.exists());
    assert_eq!(storage.list_books().expect("list"), vec!["studio_ana"]);
}

#[test]
fn json_storage_creates_and_restores_backups() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(dir.path().join("books"), dir.path().join("backups"))
        .expect("create storage");

    let book = sample_book();
    storage.save_book("backup-book", &book).expect("save book");

    let info = storage
        .backup_book("backup-book", &book, Some("before close"))
        .expect("create backup");
    assert!(info.id.contains("before-close"), "got {}", info.id);

    let backups = storage.list_backups("backup-book").expect("list backups");
    assert!(
        backups.iter().any(|entry| entry.id == info.id),
        "backup list should include created backup"
    );

    let restored = storage.restore_backup(&info).expect("restore backup");
    assert_eq!(restored.id, book.id);
}

#[test]
fn overwriting_a_book_keeps_a_backup_of_the_previous_file() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(dir.path().join("books"), dir.path().join("backups"))
        .expect("create storage");

    let mut book = sample_book();
    storage.save_book("studio", &book).expect("first save");
    let provider_id = book.provider.id;
    book.add_client(Client::new(provider_id, "Carla"));
    storage.save_book("studio", &book).expect("second save");

    let backups = storage.list_backups("studio").expect("list backups");
    assert_eq!(backups.len(), 1, "overwrite should leave one backup");

    let reloaded = storage.load_book("studio").expect("reload");
    assert_eq!(reloaded.clients.len(), 2);
}

#[test]
fn retention_prunes_oldest_backups() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::with_retention(
        dir.path().join("books"),
        dir.path().join("backups"),
        2,
    )
    .expect("create storage");

    let book = sample_book();
    // Same-minute timestamps collide in the file name; tag each backup
    // with a distinct note so all three land on disk.
    for note in ["one", "two", "three"] {
        storage
            .backup_book("studio", &book, Some(note))
            .expect("backup");
    }

    let backups = storage.list_backups("studio").expect("list backups");
    assert!(backups.len() <= 2, "retention left {} backups", backups.len());
}

#[test]
fn delete_book_removes_the_file() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(dir.path().join("books"), dir.path().join("backups"))
        .expect("create storage");

    storage.save_book("gone", &sample_book()).expect("save");
    storage.delete_book("gone").expect("delete");
    assert!(storage.list_books().expect("list").is_empty());
    assert!(storage.load_book("gone").is_err());
}

#[test]
fn metadata_listing_counts_entities() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(dir.path().join("books"), dir.path().join("backups"))
        .expect("create storage");

    storage.save_book("studio", &sample_book()).expect("save");
    let metadata = storage.list_book_metadata().expect("metadata");
    assert_eq!(metadata.len(), 1);
    let row = &metadata[0];
    assert_eq!(row.slug, "studio");
    assert_eq!(row.client_count, 1);
    assert_eq!(row.period_count, 1);
    assert_eq!(row.record_count, 0);
    assert!(row.open_totals.is_empty());
}

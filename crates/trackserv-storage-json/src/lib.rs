//! Filesystem-backed JSON persistence for provider books and their
//! backups. One pretty-printed JSON file per book, written atomically;
//! overwrites keep a timestamped backup, pruned to a retention limit.

use std::{
    cmp::Reverse,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};

use trackserv_core::{
    storage::{BookBackupInfo, BookStorage},
    CoreError, SummaryService,
};
use trackserv_domain::{PeriodTotals, ProviderBook};

const BOOK_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const DEFAULT_RETENTION: usize = 5;

/// JSON [`BookStorage`] backend rooted at a books directory and a
/// backups directory.
#[derive(Clone)]
pub struct JsonBookStorage {
    books_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonBookStorage {
    pub fn new(books_dir: PathBuf, backups_dir: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(books_dir, backups_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(
        books_dir: PathBuf,
        backups_dir: PathBuf,
        retention: usize,
    ) -> Result<Self, CoreError> {
        fs::create_dir_all(&books_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            books_dir,
            backups_dir,
            retention: retention.max(1),
        })
    }

    pub fn book_path(&self, name: &str) -> PathBuf {
        self.books_dir
            .join(format!("{}.{}", canonical_name(name), BOOK_EXTENSION))
    }

    pub fn backup_path(&self, name: &str, backup: &str) -> PathBuf {
        self.backup_dir(name).join(backup)
    }

    /// Loads every stored book and summarizes it for listing screens.
    pub fn list_book_metadata(&self) -> Result<Vec<BookMetadata>, CoreError> {
        let mut entries = Vec::new();
        for slug in self.list_books()? {
            let book = self.load_book(&slug)?;
            let open_totals = SummaryService::current_totals(&book);
            entries.push(BookMetadata {
                slug: slug.clone(),
                path: self.book_path(&slug),
                business_name: book.provider.business_name.clone(),
                created_at: book.created_at,
                updated_at: book.updated_at,
                client_count: book.clients.len(),
                period_count: book.periods.len(),
                record_count: book.records.len(),
                open_totals,
            });
        }
        entries.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(entries)
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    fn write_backup_file(
        &self,
        book: &ProviderBook,
        name: &str,
        note: Option<&str>,
    ) -> Result<BookBackupInfo, CoreError> {
        let dir = self.backup_dir(name);
        fs::create_dir_all(&dir)?;
        let slug = canonical_name(name);
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let file_name = match sanitize_backup_note(note) {
            Some(label) => format!("{slug}_{timestamp}_{label}.{BOOK_EXTENSION}"),
            None => format!("{slug}_{timestamp}.{BOOK_EXTENSION}"),
        };
        let path = dir.join(&file_name);
        write_atomic(&path, &serialize_book(book)?)?;
        self.prune_backups(name)?;
        Ok(BookBackupInfo {
            book: slug,
            id: file_name,
            created_at: timestamp,
            path,
        })
    }

    fn backup_existing_file(&self, name: &str, path: &Path) -> Result<(), CoreError> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(name);
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let file_name = format!("{}_{timestamp}.{BOOK_EXTENSION}", canonical_name(name));
        fs::copy(path, dir.join(file_name))?;
        self.prune_backups(name)
    }

    fn prune_backups(&self, name: &str) -> Result<(), CoreError> {
        let mut entries = self.list_backups(name)?;
        entries.sort_by_key(|info| Reverse(parse_backup_timestamp(&info.id)));
        for entry in entries.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

impl BookStorage for JsonBookStorage {
    fn save_book(&self, name: &str, book: &ProviderBook) -> Result<(), CoreError> {
        let path = self.book_path(name);
        if path.exists() {
            self.backup_existing_file(name, &path)?;
        }
        write_atomic(&path, &serialize_book(book)?)
    }

    fn load_book(&self, name: &str) -> Result<ProviderBook, CoreError> {
        load_book_from_path(&self.book_path(name))
    }

    fn list_books(&self) -> Result<Vec<String>, CoreError> {
        if !self.books_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.books_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(BOOK_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_book(&self, name: &str) -> Result<(), CoreError> {
        let path = self.book_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn save_book_to_path(&self, book: &ProviderBook, path: &Path) -> Result<(), CoreError> {
        if path.starts_with(&self.books_dir) {
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                self.backup_existing_file(stem, path)?;
            }
        }
        write_atomic(path, &serialize_book(book)?)
    }

    fn load_book_from_path(&self, path: &Path) -> Result<ProviderBook, CoreError> {
        load_book_from_path(path)
    }

    fn backup_book(
        &self,
        name: &str,
        book: &ProviderBook,
        note: Option<&str>,
    ) -> Result<BookBackupInfo, CoreError> {
        self.write_backup_file(book, name, note)
    }

    fn list_backups(&self, name: &str) -> Result<Vec<BookBackupInfo>, CoreError> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let slug = canonical_name(name);
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BOOK_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(BookBackupInfo {
                    book: slug.clone(),
                    id: file_name.to_string(),
                    created_at: file_name.to_string(),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|info| Reverse(parse_backup_timestamp(&info.id)));
        Ok(entries)
    }

    fn restore_backup(&self, backup: &BookBackupInfo) -> Result<ProviderBook, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let target = self.book_path(&backup.book);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&backup.path, &target)?;
        load_book_from_path(&target)
    }
}

/// Loads a book from the provided filesystem path.
pub fn load_book_from_path(path: &Path) -> Result<ProviderBook, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

/// Listing row for stored books.
#[derive(Debug, Clone)]
pub struct BookMetadata {
    pub slug: String,
    pub path: PathBuf,
    pub business_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub client_count: usize,
    pub period_count: usize,
    pub record_count: usize,
    pub open_totals: PeriodTotals,
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "book".into()
    } else {
        sanitized
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut slug = String::new();
    let mut pending_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(&format!(".{BOOK_EXTENSION}"))?;
    let segments: Vec<&str> = stem.split('_').collect();
    // slug parts may themselves contain underscores; scan for the
    // date/time pair instead of assuming a fixed position.
    for window in segments.windows(2) {
        let (date, time) = (window[0], window[1]);
        if is_digits(date, 8) && is_digits(time, 4) {
            return NaiveDateTime::parse_from_str(&format!("{date}{time}"), "%Y%m%d%H%M")
                .ok()
                .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    None
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.to_path_buf();
    tmp.set_extension(match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.tmp"),
        None => "tmp".to_string(),
    });
    let mut file = fs::File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn serialize_book(book: &ProviderBook) -> Result<String, CoreError> {
    serde_json::to_string_pretty(book).map_err(|err| CoreError::Serde(err.to_string()))
}

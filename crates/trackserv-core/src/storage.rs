use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use trackserv_domain::ProviderBook;

use crate::commission::compute_split;
use crate::error::CoreError;

/// Describes a persisted backup artifact for a provider book.
#[derive(Debug, Clone)]
pub struct BookBackupInfo {
    pub book: String,
    pub id: String,
    pub created_at: String,
    pub path: PathBuf,
}

/// Abstraction over persistence backends capable of storing provider
/// books and backups.
pub trait BookStorage: Send + Sync {
    fn save_book(&self, name: &str, book: &ProviderBook) -> Result<(), CoreError>;
    fn load_book(&self, name: &str) -> Result<ProviderBook, CoreError>;
    fn list_books(&self) -> Result<Vec<String>, CoreError>;
    fn delete_book(&self, name: &str) -> Result<(), CoreError>;
    fn save_book_to_path(&self, book: &ProviderBook, path: &Path) -> Result<(), CoreError>;
    fn load_book_from_path(&self, path: &Path) -> Result<ProviderBook, CoreError>;
    fn backup_book(
        &self,
        name: &str,
        book: &ProviderBook,
        note: Option<&str>,
    ) -> Result<BookBackupInfo, CoreError>;
    fn list_backups(&self, name: &str) -> Result<Vec<BookBackupInfo>, CoreError>;
    fn restore_backup(&self, backup: &BookBackupInfo) -> Result<ProviderBook, CoreError>;
}

/// Detects dangling references and invariant drift within a book snapshot.
pub fn book_warnings(book: &ProviderBook) -> Vec<String> {
    let client_ids: HashSet<_> = book.clients.iter().map(|c| c.id).collect();
    let period_ids: HashSet<_> = book.periods.iter().map(|p| p.id).collect();
    let mut warnings = Vec::new();

    for record in &book.records {
        if !client_ids.contains(&record.client_id) {
            warnings.push(format!(
                "record {} references unknown client {}",
                record.id, record.client_id
            ));
        }
        if !period_ids.contains(&record.payment_period_id) {
            warnings.push(format!(
                "record {} references unknown period {}",
                record.id, record.payment_period_id
            ));
        }
        match compute_split(record.amount_cents, record.commission_rate_percent) {
            Ok(split) => {
                if split.commission_cents != record.commission_amount_cents
                    || split.net_cents != record.net_amount_cents
                {
                    warnings.push(format!(
                        "record {} commission split drifted from its snapshot rate",
                        record.id
                    ));
                }
            }
            Err(_) => warnings.push(format!(
                "record {} carries an invalid amount or rate snapshot",
                record.id
            )),
        }
    }

    let open = book.periods.iter().filter(|p| p.is_open()).count();
    if open > 1 {
        warnings.push(format!("{open} payment periods are open at once"));
    }
    for period in &book.periods {
        if period.is_closed && period.period_end.is_none() {
            warnings.push(format!("closed period {} has no end date", period.id));
        }
    }
    warnings
}

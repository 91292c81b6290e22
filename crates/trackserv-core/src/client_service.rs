//! Business logic helpers for validated client mutations.

use uuid::Uuid;

use trackserv_domain::{Client, ProviderBook};

use crate::error::{CoreError, CoreResult};

/// Provides validated mutations for [`Client`] entities.
pub struct ClientService;

impl ClientService {
    /// Adds a new client after validating name uniqueness.
    pub fn add(book: &mut ProviderBook, client: Client) -> CoreResult<Uuid> {
        Self::validate_name(book, None, &client.name)?;
        Ok(book.add_client(client))
    }

    /// Updates an existing client by applying the provided changeset.
    pub fn edit(book: &mut ProviderBook, id: Uuid, changes: Client) -> CoreResult<()> {
        Self::validate_name(book, Some(id), &changes.name)?;
        let client = book
            .client_mut(id)
            .ok_or_else(|| CoreError::ClientNotFound(id.to_string()))?;
        client.name = changes.name;
        client.phone = changes.phone;
        client.email = changes.email;
        client.touch();
        book.touch();
        Ok(())
    }

    /// Removes a client when no service records reference it.
    pub fn remove(book: &mut ProviderBook, id: Uuid) -> CoreResult<()> {
        if book.records.iter().any(|record| record.client_id == id) {
            return Err(CoreError::InvalidOperation(
                "Client has logged service records".into(),
            ));
        }
        let before = book.clients.len();
        book.clients.retain(|client| client.id != id);
        if book.clients.len() == before {
            return Err(CoreError::ClientNotFound(id.to_string()));
        }
        book.touch();
        Ok(())
    }

    /// Returns the clients newest first, the order the roster is shown in.
    pub fn list(book: &ProviderBook) -> Vec<&Client> {
        let mut clients: Vec<&Client> = book.clients.iter().collect();
        clients.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        clients
    }

    fn validate_name(book: &ProviderBook, exclude: Option<Uuid>, candidate: &str) -> CoreResult<()> {
        let normalized = candidate.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(CoreError::Validation("client name must not be empty".into()));
        }
        let duplicate = book.clients.iter().any(|client| {
            client.name.trim().to_lowercase() == normalized && exclude != Some(client.id)
        });
        if duplicate {
            Err(CoreError::Validation(format!(
                "Client `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackserv_domain::{CommissionSplit, ServiceProvider, ServiceRecord};

    fn sample_book() -> ProviderBook {
        ProviderBook::new(ServiceProvider::new(Uuid::new_v4()))
    }

    #[test]
    fn add_rejects_duplicate_names() {
        let mut book = sample_book();
        let provider_id = book.provider.id;
        ClientService::add(&mut book, Client::new(provider_id, "Ana")).expect("first add succeeds");

        let err = ClientService::add(&mut book, Client::new(provider_id, " ana "))
            .expect_err("duplicate must fail");
        assert!(
            matches!(err, CoreError::Validation(ref message) if message.contains("already exists")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn edit_overwrites_contact_fields() {
        let mut book = sample_book();
        let provider_id = book.provider.id;
        let id = ClientService::add(&mut book, Client::new(provider_id, "Ana")).expect("add");

        let changes = Client::new(provider_id, "Ana Maria").with_phone("+55 11 91234-5678");
        ClientService::edit(&mut book, id, changes).expect("edit succeeds");

        let stored = book.client(id).expect("client exists");
        assert_eq!(stored.name, "Ana Maria");
        assert_eq!(stored.phone.as_deref(), Some("+55 11 91234-5678"));
        assert!(stored.email.is_none());
    }

    #[test]
    fn remove_is_blocked_by_linked_records() {
        let mut book = sample_book();
        let provider_id = book.provider.id;
        let id = ClientService::add(&mut book, Client::new(provider_id, "Ana")).expect("add");
        book.add_record(ServiceRecord::new(
            id,
            Uuid::new_v4(),
            "Cut",
            None,
            1_000,
            0,
            15.0,
            CommissionSplit {
                commission_cents: 150,
                net_cents: 850,
            },
        ));

        let err = ClientService::remove(&mut book, id).expect_err("remove must fail");
        assert!(matches!(err, CoreError::InvalidOperation(_)));

        book.records.clear();
        ClientService::remove(&mut book, id).expect("remove succeeds once unlinked");
        assert!(book.clients.is_empty());
    }

    #[test]
    fn list_orders_newest_first() {
        let mut book = sample_book();
        let provider_id = book.provider.id;
        let mut older = Client::new(provider_id, "First");
        older.created_at = older.created_at - chrono::Duration::days(1);
        ClientService::add(&mut book, older).expect("add older");
        ClientService::add(&mut book, Client::new(provider_id, "Second")).expect("add newer");

        let names: Vec<_> = ClientService::list(&book)
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }
}

//! Process-local [`UserDirectory`] backed by a locked map.
//!
//! Listing returns records in insertion order. Timestamps come from the
//! injected clock so tests can pin them.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{UserRecord, UserRecordId, ValidatedDraft};

#[derive(Debug, Default)]
struct Records {
    by_id: HashMap<UserRecordId, UserRecord>,
    order: Vec<UserRecordId>,
}

impl Records {
    fn insert(&mut self, record: UserRecord) {
        let id = record.id().clone();
        if self.by_id.insert(id.clone(), record).is_none() {
            self.order.push(id);
        }
    }
}

/// In-memory user store shared through `Arc`.
pub struct InMemoryUserDirectory {
    records: RwLock<Records>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserDirectory {
    /// An empty store.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(Records::default()),
            clock,
        }
    }

    /// A store pre-populated with `records`, listed in the given order.
    ///
    /// A later record replaces an earlier one with the same id.
    pub fn seeded(clock: Arc<dyn Clock>, records: impl IntoIterator<Item = UserRecord>) -> Self {
        let mut seeded = Records::default();
        for record in records {
            seeded.insert(record);
        }
        Self {
            records: RwLock::new(seeded),
            clock,
        }
    }

    fn poisoned<T>(_: PoisonError<T>) -> UserDirectoryError {
        UserDirectoryError::transport("in-memory user store lock poisoned")
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, UserDirectoryError> {
        let records = self.records.read().map_err(Self::poisoned)?;
        Ok(records
            .order
            .iter()
            .filter_map(|id| records.by_id.get(id).cloned())
            .collect())
    }

    async fn get_user(&self, id: &UserRecordId) -> Result<UserRecord, UserDirectoryError> {
        let records = self.records.read().map_err(Self::poisoned)?;
        records
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| UserDirectoryError::not_found(id.as_ref()))
    }

    async fn create_user(&self, draft: &ValidatedDraft) -> Result<UserRecord, UserDirectoryError> {
        let now = self.clock.utc();
        let record = UserRecord::new(
            UserRecordId::random(),
            draft.draft().clone(),
            Some(now),
            Some(now),
        );
        let mut records = self.records.write().map_err(Self::poisoned)?;
        records.insert(record.clone());
        Ok(record)
    }

    async fn update_user(
        &self,
        id: &UserRecordId,
        draft: &ValidatedDraft,
    ) -> Result<UserRecord, UserDirectoryError> {
        let now = self.clock.utc();
        let mut records = self.records.write().map_err(Self::poisoned)?;
        let slot = records
            .by_id
            .get_mut(id)
            .ok_or_else(|| UserDirectoryError::not_found(id.as_ref()))?;
        let updated = slot.clone().with_draft(draft.draft().clone(), now);
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete_user(&self, id: &UserRecordId) -> Result<(), UserDirectoryError> {
        let mut records = self.records.write().map_err(Self::poisoned)?;
        records
            .by_id
            .remove(id)
            .ok_or_else(|| UserDirectoryError::not_found(id.as_ref()))?;
        records.order.retain(|kept| kept != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Store semantics against a fixture clock.

    use super::*;
    use crate::domain::{Address, Geo, UserDraft, validate_draft};
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::atomic::{AtomicI64, Ordering};
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0)
            .single()
            .expect("valid timestamp")
    }

    /// Each reading is one minute after the previous one.
    #[fixture]
    fn clock() -> Arc<dyn Clock> {
        let readings = AtomicI64::new(0);
        let mut clock = MockClock::new();
        clock
            .expect_utc()
            .returning(move || at(60 * readings.fetch_add(1, Ordering::SeqCst)));
        Arc::new(clock)
    }

    #[fixture]
    fn draft() -> ValidatedDraft {
        validate_draft(UserDraft {
            name: "Jane Doe".to_owned(),
            email: "jane@example.com".to_owned(),
            phone: "555-123-4567".to_owned(),
            company: "Acme".to_owned(),
            address: Address {
                street: "1 Main St".to_owned(),
                city: "NYC".to_owned(),
                zip: "10001".to_owned(),
                geo: Geo {
                    lat: "40.7128".to_owned(),
                    lng: "-74.0060".to_owned(),
                },
            },
        })
        .expect("valid draft")
    }

    #[rstest]
    #[tokio::test]
    async fn create_then_get_round_trips(clock: Arc<dyn Clock>, draft: ValidatedDraft) {
        let store = InMemoryUserDirectory::new(clock);
        let created = store.create_user(&draft).await.expect("create");
        assert_eq!(created.created_at(), Some(at(0)));
        assert_eq!(created.updated_at(), Some(at(0)));

        let fetched = store.get_user(created.id()).await.expect("get");
        assert_eq!(fetched.draft(), draft.draft());
        assert_eq!(fetched, created);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_then_get_is_not_found(clock: Arc<dyn Clock>, draft: ValidatedDraft) {
        let store = InMemoryUserDirectory::new(clock);
        let created = store.create_user(&draft).await.expect("create");
        store.delete_user(created.id()).await.expect("delete");

        let error = store.get_user(created.id()).await.expect_err("gone");
        assert_eq!(error, UserDirectoryError::not_found(created.id().as_ref()));
        assert!(store.list_users().await.expect("list").is_empty());
        assert!(matches!(
            store.delete_user(created.id()).await,
            Err(UserDirectoryError::NotFound { .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn update_refreshes_only_updated_at(clock: Arc<dyn Clock>, draft: ValidatedDraft) {
        let store = InMemoryUserDirectory::new(clock);
        let created = store.create_user(&draft).await.expect("create");
        let mut changed = draft.draft().clone();
        changed.company = "Globex".to_owned();
        let changed = validate_draft(changed).expect("valid");

        let updated = store
            .update_user(created.id(), &changed)
            .await
            .expect("update");
        assert_eq!(updated.draft().company, "Globex");
        assert_eq!(updated.created_at(), Some(at(0)));
        assert_eq!(updated.updated_at(), Some(at(60)));
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_record_is_not_found(clock: Arc<dyn Clock>, draft: ValidatedDraft) {
        let store = InMemoryUserDirectory::new(clock);
        let id = UserRecordId::new("missing").expect("id");
        let error = store.update_user(&id, &draft).await.expect_err("missing");
        assert_eq!(error.to_string(), "user missing was not found");
    }

    #[rstest]
    #[tokio::test]
    async fn listing_keeps_insertion_order() {
        let record = |id: &str, name: &str| {
            UserRecord::new(
                UserRecordId::new(id).expect("id"),
                UserDraft {
                    name: name.to_owned(),
                    ..UserDraft::default()
                },
                None,
                None,
            )
        };
        let store = InMemoryUserDirectory::seeded(
            Arc::new(MockClock::new()),
            [record("b", "Second"), record("a", "First"), record("b", "Replaced")],
        );
        let names: Vec<String> = store
            .list_users()
            .await
            .expect("list")
            .iter()
            .map(|user| user.name().to_owned())
            .collect();
        assert_eq!(names, ["Replaced", "First"]);
    }
}

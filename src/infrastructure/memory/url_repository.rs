use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry as MapEntry;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::domain::entities::{NewUrl, Url};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Stored record plus its insertion sequence number.
#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    url: Url,
}

/// In-memory Url repository keyed by token.
///
/// The token key gives the same uniqueness guarantee as the Postgres
/// constraint; insertion order is kept with a sequence counter so listings
/// order the same way.
#[derive(Debug, Default)]
pub struct InMemoryUrlRepository {
    storage: DashMap<String, Entry>,
    next_seq: AtomicU64,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_entries(&self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self.storage.iter().map(|e| e.value().clone()).collect();
        entries.sort_by_key(|e| e.seq);
        entries
    }

    fn by_clicks_desc(mut entries: Vec<Entry>) -> Vec<Url> {
        entries.sort_by(|a, b| {
            b.url
                .number_of_clicks
                .cmp(&a.url.number_of_clicks)
                .then(a.seq.cmp(&b.seq))
        });
        entries.into_iter().map(|e| e.url).collect()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, new_url: NewUrl) -> Result<Url, AppError> {
        match self.storage.entry(new_url.token.clone()) {
            MapEntry::Occupied(_) => Err(AppError::TokenCollision {
                token: new_url.token,
            }),
            MapEntry::Vacant(slot) => {
                let url = Url {
                    id: Uuid::new_v4(),
                    long_url: new_url.long_url,
                    token: new_url.token,
                    created_by: new_url.created_by,
                    number_of_clicks: 0,
                    is_active: true,
                    created_at: Utc::now(),
                    expires_at: new_url.expires_at,
                };
                let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                slot.insert(Entry {
                    seq,
                    url: url.clone(),
                });
                Ok(url)
            }
        }
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Url>, AppError> {
        Ok(self.storage.get(token).map(|e| e.url.clone()))
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Url>, AppError> {
        Ok(self
            .storage
            .iter()
            .filter(|e| e.url.long_url == long_url)
            .max_by_key(|e| e.seq)
            .map(|e| e.url.clone()))
    }

    async fn set_click_count(&self, token: &str, clicks: i64) -> Result<(), AppError> {
        if let Some(mut entry) = self.storage.get_mut(token) {
            entry.url.number_of_clicks = clicks;
        }
        Ok(())
    }

    async fn deactivate(&self, token: &str) -> Result<bool, AppError> {
        Ok(match self.storage.get_mut(token) {
            Some(mut entry) => {
                entry.url.is_active = false;
                true
            }
            None => false,
        })
    }

    async fn supersede(&self, superseded_token: &str, new_url: NewUrl) -> Result<Url, AppError> {
        // Insert first so a collision leaves the old record untouched.
        let url = self.insert(new_url).await?;
        self.deactivate(superseded_token).await?;
        Ok(url)
    }

    async fn list_tokens(
        &self,
        active_only: bool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<String>, AppError> {
        Ok(self
            .sorted_entries()
            .into_iter()
            .filter(|e| !active_only || e.url.is_active)
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|e| e.url.token)
            .collect())
    }

    async fn list_by_clicks_desc(&self) -> Result<Vec<Url>, AppError> {
        Ok(Self::by_clicks_desc(self.sorted_entries()))
    }

    async fn list_by_owner_by_clicks_desc(&self, owner: Uuid) -> Result<Vec<Url>, AppError> {
        let owned = self
            .sorted_entries()
            .into_iter()
            .filter(|e| e.url.created_by == owner)
            .collect();
        Ok(Self::by_clicks_desc(owned))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

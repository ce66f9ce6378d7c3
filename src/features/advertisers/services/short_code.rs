use std::future::Future;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::advertisers::repositories::AdvertiserRepository;
use crate::shared::constants::{SHORT_CODE_ALPHABET, SHORT_CODE_LENGTH, SHORT_CODE_MAX_ATTEMPTS};

/// Six random lowercase alphanumerics.
///
/// The leading bytes of a v4 UUID are fully random; the modulo bias over a
/// 36-symbol alphabet is negligible for an identifier of this kind.
pub fn random_short_code() -> String {
    Uuid::new_v4()
        .as_bytes()
        .iter()
        .take(SHORT_CODE_LENGTH)
        .map(|b| SHORT_CODE_ALPHABET[*b as usize % SHORT_CODE_ALPHABET.len()] as char)
        .collect()
}

/// Run `insert` with a fresh short code, drawing another code when the insert
/// itself reports a conflict (a concurrent writer took it after the lookup).
/// Gives up with `Conflict` after `SHORT_CODE_MAX_ATTEMPTS` rejected inserts.
pub async fn insert_with_short_code<T, F, I, Fut>(
    repo: &dyn AdvertiserRepository,
    mut next_code: F,
    mut insert: I,
) -> Result<T>
where
    F: FnMut() -> String,
    I: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;
    loop {
        let code = generate_with(repo, &mut next_code).await?;
        match insert(code).await {
            Err(AppError::Conflict(reason)) if attempt < SHORT_CODE_MAX_ATTEMPTS => {
                tracing::debug!("Insert conflict on attempt {}: {}", attempt, reason);
                attempt += 1;
            }
            other => return other,
        }
    }
}

/// Pick a short code not yet used by any advertiser
async fn generate_with<F>(repo: &dyn AdvertiserRepository, mut next_code: F) -> Result<String>
where
    F: FnMut() -> String,
{
    for attempt in 1..=SHORT_CODE_MAX_ATTEMPTS {
        let code = next_code();
        if !repo.short_code_exists(&code).await? {
            return Ok(code);
        }
        tracing::debug!("Short code collision on attempt {}: {}", attempt, code);
    }

    tracing::error!(
        "Could not allocate a short code after {} attempts",
        SHORT_CODE_MAX_ATTEMPTS
    );
    Err(AppError::Conflict(
        "Could not allocate a unique short code".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::memory::MemoryStore;
    use crate::features::advertisers::models::NewAdvertiser;
    use crate::shared::test_helpers::{advertiser, new_advertiser};
    use crate::shared::validation::SHORT_CODE_REGEX;

    #[test]
    fn test_random_short_code_format() {
        for _ in 0..200 {
            let code = random_short_code();
            assert!(SHORT_CODE_REGEX.is_match(&code), "bad code {}", code);
        }
    }

    #[tokio::test]
    async fn test_retries_on_collision() {
        let store = MemoryStore::new();
        store.seed(advertiser("taken1", &["riyadh"], &["plumbing"]));

        let mut candidates = vec!["fresh1", "taken1"];
        let code = generate_with(&store, || candidates.pop().unwrap().to_string())
            .await
            .unwrap();

        assert_eq!(code, "fresh1");
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_insert_conflict_draws_a_new_code() {
        let store = MemoryStore::new();
        store.seed(advertiser("taken1", &["riyadh"], &["plumbing"]));
        store.set_short_code_lookup_stale(true);

        let mut candidates = vec!["fresh1", "taken1"];
        let mut tried = Vec::new();
        let created = insert_with_short_code(
            &store,
            || candidates.pop().unwrap().to_string(),
            |code| {
                tried.push(code.clone());
                store.create(NewAdvertiser {
                    short_code: code,
                    ..new_advertiser()
                })
            },
        )
        .await
        .unwrap();

        assert_eq!(created.short_code, "fresh1");
        assert_eq!(tried, vec!["taken1".to_string(), "fresh1".to_string()]);
        assert_eq!(store.advertiser_count(), 2);
    }

    #[tokio::test]
    async fn test_insert_conflicts_exhaust_the_budget() {
        let store = MemoryStore::new();
        store.seed(advertiser("taken1", &["riyadh"], &["plumbing"]));
        store.set_short_code_lookup_stale(true);

        let mut inserts = 0;
        let result = insert_with_short_code(
            &store,
            || "taken1".to_string(),
            |code| {
                inserts += 1;
                store.create(NewAdvertiser {
                    short_code: code,
                    ..new_advertiser()
                })
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(inserts, SHORT_CODE_MAX_ATTEMPTS);
        assert_eq!(store.advertiser_count(), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let store = MemoryStore::new();
        store.seed(advertiser("taken1", &["riyadh"], &["plumbing"]));

        let mut calls = 0;
        let result = generate_with(&store, || {
            calls += 1;
            "taken1".to_string()
        })
        .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(calls, SHORT_CODE_MAX_ATTEMPTS);
    }
}

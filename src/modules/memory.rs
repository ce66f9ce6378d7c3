//! In-process implementations of the storage ports, for tests.
//!
//! One [`MemoryStore`] backs both repositories behind a single lock, so
//! approval (request update plus advertiser insert) is atomic the same way
//! the Postgres transaction is. `set_failing(true)` makes every call fail
//! with `BackendUnavailable`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::advertisers::models::{Advertiser, AdvertiserFilter, NewAdvertiser};
use crate::features::advertisers::repositories::AdvertiserRepository;
use crate::features::registrations::models::{
    NewRegistrationRequest, RegistrationRequest, RequestStatus,
};
use crate::features::registrations::repositories::RegistrationRepository;
use crate::modules::storage::MediaStorage;
use crate::shared::types::PageRequest;

#[derive(Default)]
struct State {
    advertisers: Vec<Advertiser>,
    requests: Vec<RegistrationRequest>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    failing: AtomicBool,
    stale_short_codes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make `short_code_exists` always answer `false`, as if another writer
    /// took the code between the lookup and the insert
    pub fn set_short_code_lookup_stale(&self, stale: bool) {
        self.stale_short_codes.store(stale, Ordering::SeqCst);
    }

    /// Insert a fully-formed advertiser, bypassing validation
    pub fn seed(&self, advertiser: Advertiser) -> Advertiser {
        self.lock().advertisers.push(advertiser.clone());
        advertiser
    }

    pub fn advertiser_count(&self) -> usize {
        self.lock().advertisers.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::BackendUnavailable(
                "memory store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

fn build_advertiser(new: NewAdvertiser, now: DateTime<Utc>) -> Advertiser {
    Advertiser {
        id: Uuid::now_v7(),
        short_code: new.short_code,
        business_name: new.business_name,
        phone_number: new.phone_number,
        whatsapp_number: new.whatsapp_number,
        logo_url: new.logo_url,
        is_premium: new.is_premium,
        priority_score: new.priority_score,
        subscription_expiry: new.subscription_expiry,
        targeted_cities: new.targeted_cities,
        targeted_services: new.targeted_services,
        description: new.description,
        gallery: new.gallery,
        reviews: Json(new.reviews),
        is_active: new.is_active,
        created_at: now,
        updated_at: now,
    }
}

fn short_code_conflict(code: &str) -> AppError {
    AppError::Conflict(format!("short code '{}' already taken", code))
}

#[async_trait]
impl AdvertiserRepository for MemoryStore {
    async fn list(
        &self,
        filter: &AdvertiserFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Advertiser>> {
        self.check()?;
        let mut found: Vec<Advertiser> = self
            .lock()
            .advertisers
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(match page {
            Some(page) => page.slice(&found),
            None => found,
        })
    }

    async fn count(&self, filter: &AdvertiserFilter) -> Result<i64> {
        self.check()?;
        let count = self
            .lock()
            .advertisers
            .iter()
            .filter(|a| filter.matches(a))
            .count();
        Ok(count as i64)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Advertiser>> {
        self.check()?;
        Ok(self.lock().advertisers.iter().find(|a| a.id == id).cloned())
    }

    async fn get_by_short_code(&self, short_code: &str) -> Result<Option<Advertiser>> {
        self.check()?;
        if self.stale_short_codes.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(self
            .lock()
            .advertisers
            .iter()
            .find(|a| a.short_code == short_code)
            .cloned())
    }

    async fn short_code_exists(&self, short_code: &str) -> Result<bool> {
        self.check()?;
        Ok(self
            .lock()
            .advertisers
            .iter()
            .any(|a| a.short_code == short_code))
    }

    async fn create(&self, new: NewAdvertiser) -> Result<Advertiser> {
        self.check()?;
        let mut state = self.lock();
        if state.advertisers.iter().any(|a| a.short_code == new.short_code) {
            return Err(short_code_conflict(&new.short_code));
        }
        let advertiser = build_advertiser(new, Utc::now());
        state.advertisers.push(advertiser.clone());
        Ok(advertiser)
    }

    async fn update(&self, advertiser: &Advertiser) -> Result<Option<Advertiser>> {
        self.check()?;
        let mut state = self.lock();
        let Some(slot) = state.advertisers.iter_mut().find(|a| a.id == advertiser.id) else {
            return Ok(None);
        };
        *slot = Advertiser {
            short_code: slot.short_code.clone(),
            created_at: slot.created_at,
            updated_at: Utc::now(),
            ..advertiser.clone()
        };
        Ok(Some(slot.clone()))
    }

    async fn toggle_premium(
        &self,
        id: Uuid,
        expiry_when_enabled: DateTime<Utc>,
    ) -> Result<Option<Advertiser>> {
        self.check()?;
        let mut state = self.lock();
        let Some(slot) = state.advertisers.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        slot.is_premium = !slot.is_premium;
        slot.subscription_expiry = slot.is_premium.then_some(expiry_when_enabled);
        slot.updated_at = Utc::now();
        Ok(Some(slot.clone()))
    }

    async fn toggle_active(&self, id: Uuid) -> Result<Option<Advertiser>> {
        self.check()?;
        let mut state = self.lock();
        let Some(slot) = state.advertisers.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        slot.is_active = !slot.is_active;
        slot.updated_at = Utc::now();
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        self.check()?;
        let mut state = self.lock();
        let before = state.advertisers.len();
        state.advertisers.retain(|a| a.id != id);
        let deleted = state.advertisers.len() < before;
        if deleted {
            for request in state.requests.iter_mut() {
                if request.advertiser_id == Some(id) {
                    request.advertiser_id = None;
                }
            }
        }
        Ok(deleted)
    }
}

#[async_trait]
impl RegistrationRepository for MemoryStore {
    async fn list(
        &self,
        status: Option<RequestStatus>,
        page: PageRequest,
    ) -> Result<Vec<RegistrationRequest>> {
        self.check()?;
        let mut found: Vec<RegistrationRequest> = self
            .lock()
            .requests
            .iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page.slice(&found))
    }

    async fn count(&self, status: Option<RequestStatus>) -> Result<i64> {
        self.check()?;
        let count = self
            .lock()
            .requests
            .iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .count();
        Ok(count as i64)
    }

    async fn get(&self, id: Uuid) -> Result<Option<RegistrationRequest>> {
        self.check()?;
        Ok(self.lock().requests.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, new: NewRegistrationRequest) -> Result<RegistrationRequest> {
        self.check()?;
        let request = RegistrationRequest {
            id: Uuid::now_v7(),
            business_name: new.business_name,
            contact_name: new.contact_name,
            phone_number: new.phone_number,
            whatsapp_number: new.whatsapp_number,
            description: new.description,
            targeted_cities: new.targeted_cities,
            targeted_services: new.targeted_services,
            selected_plan: new.selected_plan,
            logo_url: new.logo_url,
            gallery: new.gallery,
            status: RequestStatus::Pending,
            rejection_reason: None,
            advertiser_id: None,
            created_at: Utc::now(),
            resolved_at: None,
        };
        self.lock().requests.push(request.clone());
        Ok(request)
    }

    async fn approve(
        &self,
        id: Uuid,
        new: NewAdvertiser,
    ) -> Result<Option<(RegistrationRequest, Advertiser)>> {
        self.check()?;
        let mut state = self.lock();

        let Some(index) = state
            .requests
            .iter()
            .position(|r| r.id == id && r.status == RequestStatus::Pending)
        else {
            return Ok(None);
        };
        if state.advertisers.iter().any(|a| a.short_code == new.short_code) {
            return Err(short_code_conflict(&new.short_code));
        }

        let now = Utc::now();
        let advertiser = build_advertiser(new, now);
        state.advertisers.push(advertiser.clone());

        let request = &mut state.requests[index];
        request.status = RequestStatus::Approved;
        request.advertiser_id = Some(advertiser.id);
        request.resolved_at = Some(now);

        Ok(Some((request.clone(), advertiser)))
    }

    async fn reject(
        &self,
        id: Uuid,
        reason: Option<String>,
    ) -> Result<Option<RegistrationRequest>> {
        self.check()?;
        let mut state = self.lock();
        let Some(request) = state
            .requests
            .iter_mut()
            .find(|r| r.id == id && r.status == RequestStatus::Pending)
        else {
            return Ok(None);
        };
        request.status = RequestStatus::Rejected;
        request.rejection_reason = reason;
        request.resolved_at = Some(Utc::now());
        Ok(Some(request.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        self.check()?;
        let mut state = self.lock();
        let before = state.requests.len();
        state.requests.retain(|r| r.id != id);
        Ok(state.requests.len() < before)
    }
}

/// Media storage keeping objects in a map, addressed as `memory://{path}`
#[derive(Default)]
pub struct MemoryMedia {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    failing: AtomicBool,
    failing_fragment: Mutex<Option<String>>,
}

const MEMORY_SCHEME: &str = "memory://";

impl MemoryMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Fail only the stores whose path contains `fragment`
    pub fn fail_paths_containing(&self, fragment: &str) {
        *self
            .failing_fragment
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(fragment.to_string());
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.lock().keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn content_type(&self, path: &str) -> Option<String> {
        self.lock().get(path).map(|(_, ct)| ct.clone())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, (Vec<u8>, String)>> {
        self.objects.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl MediaStorage for MemoryMedia {
    async fn store(&self, data: Vec<u8>, path: &str, content_type: &str) -> Result<String> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::BackendUnavailable(
                "memory media is offline".to_string(),
            ));
        }
        let rejected = self
            .failing_fragment
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_deref()
            .is_some_and(|fragment| path.contains(fragment));
        if rejected {
            return Err(AppError::BackendUnavailable(format!(
                "memory media refused {}",
                path
            )));
        }
        self.lock()
            .insert(path.to_string(), (data, content_type.to_string()));
        Ok(format!("{}{}", MEMORY_SCHEME, path))
    }

    async fn delete(&self, url: &str) -> Result<()> {
        let path = url
            .strip_prefix(MEMORY_SCHEME)
            .ok_or_else(|| AppError::BadRequest(format!("Not a media URL: {}", url)))?;
        self.lock().remove(path);
        Ok(())
    }
}

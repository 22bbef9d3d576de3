//! In-memory entry collection with persist-through mutations.
//!
//! The repository owns the working copy of the entry collection. Its
//! lifecycle is load from storage, mutate via create/update/delete, persist
//! the whole collection after every mutation. A failed persist rolls the
//! mutation back: the in-memory collection is only replaced once the write
//! has succeeded.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::entry::{Entry, EntryFields};
use crate::error::{Error, Result};
use crate::store::Store;

/// The entry repository.
#[derive(Debug)]
pub struct EntryRepository {
    store: Store,
    entries: Vec<Entry>,
}

impl EntryRepository {
    /// Open a repository backed by the given store, loading any persisted
    /// collection.
    ///
    /// Entries that violate the coordinate-pair invariant (one of
    /// latitude/longitude present without the other) have both coordinates
    /// cleared on load.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial read from storage fails.
    pub fn open(store: Store) -> Result<Self> {
        let mut entries = store.load_entries()?;

        for entry in &mut entries {
            if entry.latitude.is_some() != entry.longitude.is_some() {
                warn!(
                    "Entry {} has a lone coordinate component; clearing both",
                    entry.id
                );
                entry.latitude = None;
                entry.longitude = None;
            }
        }

        info!("Repository opened with {} entries", entries.len());
        Ok(Self { store, entries })
    }

    /// List all entries, most recently touched first.
    ///
    /// The sort is recomputed on every call and is stable for entries with
    /// equal timestamps.
    #[must_use]
    pub fn list(&self) -> Vec<Entry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        sorted
    }

    /// Look up a single entry by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Number of entries in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Create a new entry from the given fields.
    ///
    /// Assigns a fresh id and sets both timestamps to now. The collection is
    /// persisted before the new entry is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the business name or address is
    /// empty, or [`Error::Persistence`] if the storage write fails (the
    /// in-memory collection is left untouched).
    pub fn create(&mut self, fields: EntryFields) -> Result<Entry> {
        validate(&fields)?;

        let now = Utc::now();
        let entry = Entry {
            id: Uuid::new_v4(),
            business_name: fields.business_name,
            address: fields.address,
            latitude: fields.coordinates.map(|c| c.latitude),
            longitude: fields.coordinates.map(|c| c.longitude),
            male_code: fields.male_code,
            female_code: fields.female_code,
            first_added: now,
            last_updated: now,
        };

        let mut next = self.entries.clone();
        next.push(entry.clone());
        self.commit(next)?;

        debug!("Created entry {}", entry.id);
        Ok(entry)
    }

    /// Replace the fields of an existing entry.
    ///
    /// `first_added` is preserved and `last_updated` is set to now; every
    /// other field takes the provided value, so an omitted optional field is
    /// cleared rather than retained.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no entry has the given id,
    /// [`Error::Validation`] for an empty business name or address, or
    /// [`Error::Persistence`] if the storage write fails (the mutation is
    /// rolled back).
    pub fn update(&mut self, id: Uuid, fields: EntryFields) -> Result<Entry> {
        validate(&fields)?;

        let mut next = self.entries.clone();
        let slot = next
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(Error::NotFound { id })?;

        let updated = Entry {
            id,
            business_name: fields.business_name,
            address: fields.address,
            latitude: fields.coordinates.map(|c| c.latitude),
            longitude: fields.coordinates.map(|c| c.longitude),
            male_code: fields.male_code,
            female_code: fields.female_code,
            first_added: slot.first_added,
            last_updated: Utc::now(),
        };
        *slot = updated.clone();

        self.commit(next)?;

        debug!("Updated entry {id}");
        Ok(updated)
    }

    /// Delete an entry by id.
    ///
    /// Idempotent: deleting an absent id succeeds without touching storage.
    /// Returns whether an entry was actually removed. Any confirmation
    /// prompt is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the storage write fails (the
    /// mutation is rolled back).
    pub fn delete(&mut self, id: Uuid) -> Result<bool> {
        if !self.entries.iter().any(|e| e.id == id) {
            debug!("Delete of absent entry {id} is a no-op");
            return Ok(false);
        }

        let mut next = self.entries.clone();
        next.retain(|e| e.id != id);
        self.commit(next)?;

        debug!("Deleted entry {id}");
        Ok(true)
    }

    /// Persist a candidate collection, then swap it in.
    ///
    /// On write failure the current collection stays in place, which is the
    /// rollback the contract promises.
    fn commit(&mut self, next: Vec<Entry>) -> Result<()> {
        self.store
            .save_entries(&next)
            .map_err(|err| Error::persistence(err.to_string()))?;
        self.entries = next;
        Ok(())
    }
}

fn validate(fields: &EntryFields) -> Result<()> {
    if fields.business_name.trim().is_empty() {
        return Err(Error::validation("businessName"));
    }
    if fields.address.trim().is_empty() {
        return Err(Error::validation("address"));
    }
    Ok(())
}

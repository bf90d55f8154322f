//! Catalog session: one optional store plus the dump file it persists to.
//!
//! A [`Catalog`] starts with an initialized [`RecordStore`]. After
//! [`Catalog::destroy`] the store is gone and every operation fails with
//! [`StoreError::Uninitialized`] instead of touching freed state.

use std::path::Path;

use tracing::{info, warn};

use crate::config::CatalogConfig;
use crate::dump;
use crate::error::{Result, StoreError};
use crate::record::Processor;
use crate::store::RecordStore;

/// A processor catalog session.
#[derive(Debug)]
pub struct Catalog {
    /// The record store; `None` once destroyed.
    store: Option<RecordStore>,
    /// Session configuration.
    config: CatalogConfig,
}

impl Catalog {
    /// Validates `config` and creates an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`](crate::error::ConfigError) if the config is invalid.
    pub fn open(config: CatalogConfig) -> Result<Self> {
        config.validate()?;
        let store = RecordStore::new(config.capacity)?;

        Ok(Self {
            store: Some(store),
            config,
        })
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Returns the dump file path.
    pub fn dump_path(&self) -> &Path {
        &self.config.dump_path
    }

    /// Returns `true` until [`destroy`](Self::destroy) is called.
    pub fn is_initialized(&self) -> bool {
        self.store.is_some()
    }

    /// Returns the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] after the store was destroyed.
    pub fn store(&self) -> Result<&RecordStore> {
        self.store.as_ref().ok_or_else(|| {
            warn!("store used after destroy");
            StoreError::Uninitialized.into()
        })
    }

    fn store_mut(&mut self) -> Result<&mut RecordStore> {
        self.store.as_mut().ok_or_else(|| {
            warn!("store used after destroy");
            StoreError::Uninitialized.into()
        })
    }

    /// Appends a record. See [`RecordStore::append`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] or any error of the store operation.
    pub fn append(&mut self, record: Processor) -> Result<()> {
        self.store_mut()?.append(record)
    }

    /// Inserts a record at `position`. See [`RecordStore::insert_at`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] or any error of the store operation.
    pub fn insert_at(&mut self, record: Processor, position: usize) -> Result<()> {
        self.store_mut()?.insert_at(record, position)
    }

    /// Inserts a record at the front. See [`RecordStore::insert_front`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] or any error of the store operation.
    pub fn insert_front(&mut self, record: Processor) -> Result<()> {
        self.store_mut()?.insert_front(record)
    }

    /// Removes the record at `position`. See [`RecordStore::remove_at`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] or any error of the store operation.
    pub fn remove_at(&mut self, position: usize) -> Result<Processor> {
        self.store_mut()?.remove_at(position)
    }

    /// Replaces the record at `position`. See [`RecordStore::update_at`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] or any error of the store operation.
    pub fn update_at(&mut self, record: Processor, position: usize) -> Result<Processor> {
        self.store_mut()?.update_at(record, position)
    }

    /// Looks up the record at `position`. See [`RecordStore::get_at`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] or any error of the store operation.
    pub fn get_at(&self, position: usize) -> Result<&Processor> {
        self.store()?.get_at(position)
    }

    /// Number of records in the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] after the store was destroyed.
    pub fn len(&self) -> Result<usize> {
        Ok(self.store()?.len())
    }

    /// Returns `true` if the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] after the store was destroyed.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.store()?.is_empty())
    }

    /// Returns `(position, record)` pairs for listing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] after the store was destroyed.
    pub fn records(&self) -> Result<Vec<(usize, &Processor)>> {
        Ok(self.store()?.iter().collect())
    }

    /// Releases the store. Later operations fail with `Uninitialized`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] if the store was already destroyed.
    pub fn destroy(&mut self) -> Result<()> {
        match self.store.take() {
            Some(store) => {
                store.destroy();
                Ok(())
            }
            None => {
                warn!("destroy called on uninitialized store");
                Err(StoreError::Uninitialized.into())
            }
        }
    }

    /// Writes every record to the dump file. Returns the number written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] or [`DumpError::Write`](crate::error::DumpError::Write).
    pub fn save(&self) -> Result<usize> {
        let store = self.store()?;
        dump::write_dump(&self.config.dump_path, store.iter().map(|(_, record)| record))
            .inspect_err(|e| warn!(error = %e, "dump save failed"))
    }

    /// Returns the dump file contents unchanged, for echoing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uninitialized`] or [`DumpError::Read`](crate::error::DumpError::Read).
    pub fn load(&self) -> Result<String> {
        self.store()?;
        dump::read_dump(&self.config.dump_path)
            .inspect_err(|e| warn!(error = %e, "dump load failed"))
    }

    /// Parses the dump file and appends its records in order.
    ///
    /// Records appended before a failure stay in the store. Returns the
    /// number of records appended.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Uninitialized`] after the store was destroyed
    /// - [`DumpError`](crate::error::DumpError) if the file is unreadable or malformed
    /// - [`StoreError::CapacityExceeded`] if the store fills up mid-restore
    pub fn restore(&mut self) -> Result<usize> {
        self.store()?;
        let records = dump::read_dump(&self.config.dump_path)
            .and_then(|text| dump::parse_dump(&text))
            .inspect_err(|e| warn!(error = %e, "rejected dump restore"))?;

        let store = self.store_mut()?;
        let mut appended = 0;
        for record in records {
            store.append(record)?;
            appended += 1;
        }

        info!(path = %self.config.dump_path.display(), appended, "restored dump");
        Ok(appended)
    }
}

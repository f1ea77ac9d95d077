//! The feature store: canonical list, filter state, and persistence glue.
//!
//! [`FeatureStore`] owns the ordered feature list and the active
//! [`FilterOptions`], and writes through an injected [`Storage`] backend
//! after every mutation. The filtered view and the summary counts are
//! recomputed from current state on every call; nothing is cached.

mod storage;

use chrono::Utc;
use uuid::Uuid;

use crate::models::*;

pub use storage::{JsonFileStorage, MemoryStorage, Storage, StorageError};

pub struct FeatureStore {
    features: Vec<Feature>,
    filters: FilterOptions,
    storage: Box<dyn Storage>,
}

impl FeatureStore {
    /// An empty store over an injected backend. Call [`load`](Self::load) to
    /// pull in whatever the slot holds.
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            features: Vec::new(),
            filters: FilterOptions::default(),
            storage,
        }
    }

    /// A store over the file slot in the platform data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        let path = JsonFileStorage::default_path()?;
        Ok(Self::new(Box::new(JsonFileStorage::new(path))))
    }

    /// A store over a fresh in-process slot.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    /// Replace the list with the slot contents, or seed the demo set into an
    /// empty slot and persist it right away.
    ///
    /// A corrupt slot surfaces as [`StorageError::Corrupt`] and leaves both
    /// the list and the slot untouched; reseeding here would overwrite the
    /// slot on the next save.
    pub fn load(&mut self) -> Result<(), StorageError> {
        match self.storage.load()? {
            Some(features) => {
                tracing::debug!("Loaded {} features from storage", features.len());
                self.features = features;
            }
            None => {
                tracing::info!("Storage slot is empty, seeding sample features");
                self.features = sample_features();
                self.save()?;
            }
        }
        Ok(())
    }

    /// Write the current list to the slot. Mutating operations call this
    /// themselves; it is public for callers that edit records in bulk.
    pub fn save(&self) -> Result<(), StorageError> {
        self.storage.save(&self.features)
    }

    // ============================================================
    // CRUD operations
    // ============================================================

    pub fn add(&mut self, input: CreateFeatureInput) -> Result<Feature, StorageError> {
        let now = Utc::now();
        let feature = Feature {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            priority: input.priority,
            status: input.status,
            category: input.category,
            estimated_hours: input.estimated_hours,
            assignee: input.assignee,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
            matrix: input.matrix,
        };

        self.features.push(feature.clone());
        self.save()?;
        Ok(feature)
    }

    pub fn update(
        &mut self,
        id: &str,
        input: UpdateFeatureInput,
    ) -> Result<Option<Feature>, StorageError> {
        let Some(index) = self.features.iter().position(|f| f.id == id) else {
            return Ok(None);
        };

        let existing = self.features[index].clone();
        let now = Utc::now();
        let updated = Feature {
            id: existing.id,
            title: input.title.unwrap_or(existing.title),
            description: input.description.unwrap_or(existing.description),
            priority: input.priority.unwrap_or(existing.priority),
            status: input.status.unwrap_or(existing.status),
            category: input.category.unwrap_or(existing.category),
            estimated_hours: input.estimated_hours.unwrap_or(existing.estimated_hours),
            assignee: input.assignee.or(existing.assignee),
            due_date: input.due_date.or(existing.due_date),
            created_at: existing.created_at,
            updated_at: now,
            matrix: input.matrix.or(existing.matrix),
        };

        self.features[index] = updated.clone();
        self.save()?;
        Ok(Some(updated))
    }

    pub fn delete(&mut self, id: &str) -> Result<bool, StorageError> {
        let before = self.features.len();
        self.features.retain(|f| f.id != id);
        if self.features.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    // ============================================================
    // Filter state
    // ============================================================

    /// Replace one filter field, leaving the others as they are.
    pub fn set_filter(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Search(search) => self.filters.search = search,
            FilterUpdate::Priority(selector) => self.filters.priority = selector,
            FilterUpdate::Status(selector) => self.filters.status = selector,
            FilterUpdate::Category(selector) => self.filters.category = selector,
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterOptions::default();
    }

    // ============================================================
    // Views
    // ============================================================

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn filters(&self) -> &FilterOptions {
        &self.filters
    }

    /// The features passing the active filter selection, in list order.
    pub fn filtered_features(&self) -> Vec<&Feature> {
        self.features
            .iter()
            .filter(|f| {
                self.filters
                    .matches(&f.title, &f.description, f.priority, f.status, f.category)
            })
            .collect()
    }

    /// Summary counts over the whole list, ignoring filters.
    pub fn stats(&self) -> Stats {
        let count = |status: Status| {
            self.features.iter().filter(|f| f.status == status).count()
        };
        Stats {
            total: self.features.len(),
            in_progress: count(Status::InProgress),
            completed: count(Status::Completed),
            planning: count(Status::Planning),
        }
    }
}

/// The demo records written into an empty slot on first load.
fn sample_features() -> Vec<Feature> {
    let now = Utc::now();
    let sample = |id: &str,
                  title: &str,
                  description: &str,
                  priority: Priority,
                  status: Status,
                  category: Category,
                  estimated_hours: f64,
                  assignee: &str,
                  due_date: Option<&str>| Feature {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        priority,
        status,
        category,
        estimated_hours,
        assignee: Some(assignee.to_string()),
        due_date: due_date.map(str::to_string),
        created_at: now,
        updated_at: now,
        matrix: None,
    };

    vec![
        sample(
            "1",
            "User Authentication System",
            "Implement secure login and registration functionality",
            Priority::High,
            Status::InProgress,
            Category::Backend,
            24.0,
            "John Doe",
            Some("2024-02-15"),
        ),
        sample(
            "2",
            "Responsive Dashboard Design",
            "Create mobile-friendly dashboard interface",
            Priority::Medium,
            Status::Planning,
            Category::Frontend,
            16.0,
            "Jane Smith",
            Some("2024-02-20"),
        ),
        sample(
            "3",
            "API Performance Optimization",
            "Optimize database queries and API response times",
            Priority::High,
            Status::Completed,
            Category::Backend,
            12.0,
            "Bob Wilson",
            None,
        ),
    ]
}

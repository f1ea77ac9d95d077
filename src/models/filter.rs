use super::{Category, Priority, Status};

/// A single-field filter: either admit everything or admit one exact value.
///
/// `All` is the counterpart of the `"all"` sentinel the UI-facing filter
/// controls use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selector<T> {
    /// Whether `value` passes this selector.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl<T> Selector<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// The active filter selection applied to the feature list.
///
/// Fields combine with AND; the default admits every feature. `search` is a
/// case-insensitive substring match over title and description, with the
/// empty string meaning "no text filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub search: String,
    pub priority: Selector<Priority>,
    pub status: Selector<Status>,
    pub category: Selector<Category>,
}

impl FilterOptions {
    /// Whether a feature with these attributes passes the current selection.
    pub fn matches(
        &self,
        title: &str,
        description: &str,
        priority: Priority,
        status: Status,
        category: Category,
    ) -> bool {
        let search_ok = if self.search.is_empty() {
            true
        } else {
            let needle = self.search.to_lowercase();
            title.to_lowercase().contains(&needle)
                || description.to_lowercase().contains(&needle)
        };
        search_ok
            && self.priority.admits(&priority)
            && self.status.admits(&status)
            && self.category.admits(&category)
    }
}

/// A change to exactly one filter field, applied via
/// [`FeatureStore::set_filter`](crate::store::FeatureStore::set_filter).
#[derive(Debug, Clone, PartialEq)]
pub enum FilterUpdate {
    Search(String),
    Priority(Selector<Priority>),
    Status(Selector<Status>),
    Category(Selector<Category>),
}

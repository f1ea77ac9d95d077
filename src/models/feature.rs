use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single roadmap entry: one unit of planned (or shipped) product work.
///
/// Features live in a flat ordered list; there is no hierarchy. The record is
/// mutable in place, with `updated_at` stamped on every change. Identity is
/// the `id` string, which is opaque: freshly created features get a UUID, but
/// stored data may carry any unique string.
///
/// Serialized field names are camelCase so the on-disk JSON matches the
/// storage slot layout exactly (`estimatedHours`, `dueDate`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub category: Category,
    pub estimated_hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Position on the impact/effort matrix, if the feature has been placed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<MatrixPosition>,
}

/// How urgent a feature is.
///
/// Can be set by hand or derived from the feature's matrix position via
/// [`derive_priority_from_matrix`](crate::matrix::derive_priority_from_matrix).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Where a feature sits in its delivery lifecycle.
///
/// - `Planning`: scoped but not started
/// - `InProgress`: actively being built
/// - `Testing`: built, under verification
/// - `Completed`: shipped
/// - `OnHold`: paused indefinitely
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Planning,
    InProgress,
    Testing,
    Completed,
    OnHold,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::InProgress => "in_progress",
            Self::Testing => "testing",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "planning" => Some(Self::Planning),
            "in_progress" => Some(Self::InProgress),
            "testing" => Some(Self::Testing),
            "completed" => Some(Self::Completed),
            "on_hold" => Some(Self::OnHold),
            _ => None,
        }
    }
}

/// Which part of the product a feature belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Frontend,
    Backend,
    Infrastructure,
    Design,
    Research,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Infrastructure => "infrastructure",
            Self::Design => "design",
            Self::Research => "research",
            Self::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "frontend" => Some(Self::Frontend),
            "backend" => Some(Self::Backend),
            "infrastructure" => Some(Self::Infrastructure),
            "design" => Some(Self::Design),
            "research" => Some(Self::Research),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A feature's placement on the impact/effort matrix.
///
/// `impact` and `effort` are scores in 1..=5. `x`/`y` hold a free-form
/// percentage position (0..=100 on each axis) when the feature has been
/// dragged away from its derived grid coordinates; they are display state
/// only and never feed back into the scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MatrixPosition {
    pub impact: u8,
    pub effort: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl MatrixPosition {
    /// Build a position from raw scores, clamping both into 1..=5.
    pub fn new(impact: u8, effort: u8) -> Self {
        Self {
            impact: impact.clamp(1, 5),
            effort: effort.clamp(1, 5),
            x: None,
            y: None,
        }
    }
}

impl Default for MatrixPosition {
    /// The center of the matrix, used when placing a feature for the first time.
    fn default() -> Self {
        Self::new(3, 3)
    }
}

/// Input for creating a new feature. Id and timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFeatureInput {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub category: Category,
    pub estimated_hours: f64,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub matrix: Option<MatrixPosition>,
}

/// Input for updating an existing feature. All fields are optional for
/// partial updates; `None` leaves the current value in place. Optional
/// feature fields (assignee, due date, matrix) can be set or replaced but
/// not cleared through this path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFeatureInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub category: Option<Category>,
    pub estimated_hours: Option<f64>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub matrix: Option<MatrixPosition>,
}

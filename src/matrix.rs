//! Impact/effort prioritization matrix math.
//!
//! Pure functions over (impact, effort) score pairs: priority scoring,
//! quadrant classification with display metadata, and the mapping between
//! scores and 2-D plot coordinates. Out-of-range scores are clamped into
//! 1..=5 rather than rejected.

use serde::{Deserialize, Serialize};

use crate::models::{Feature, MatrixPosition, Priority};

/// A position on the matrix plane, percent of each axis.
///
/// Effort runs left to right on x; impact runs bottom to top, so y is
/// inverted (y = 0 is the highest impact).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

/// Priority score in 1..=25, higher is better: high impact for low effort.
///
/// Formula: `impact * 5 - (effort - 1)`, so (5, 1) scores 25 and (1, 5)
/// scores 1. Monotonic increasing in impact, decreasing in effort.
pub fn priority_score(impact: u8, effort: u8) -> u8 {
    let impact = impact.clamp(1, 5);
    let effort = effort.clamp(1, 5);
    impact * 5 - (effort - 1)
}

/// The four regions of the impact/effort matrix.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    QuickWins,
    MajorProjects,
    FillIns,
    MoneyPit,
}

impl Quadrant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuickWins => "quick_wins",
            Self::MajorProjects => "major_projects",
            Self::FillIns => "fill_ins",
            Self::MoneyPit => "money_pit",
        }
    }

    /// Human-readable quadrant name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::QuickWins => "Quick Wins",
            Self::MajorProjects => "Major Projects",
            Self::FillIns => "Fill-ins",
            Self::MoneyPit => "Money Pit",
        }
    }

    /// One-line guidance for the quadrant.
    pub fn description(&self) -> &'static str {
        match self {
            Self::QuickWins => "High impact, low effort - Do these first!",
            Self::MajorProjects => "High impact, high effort - Plan carefully",
            Self::FillIns => "Low impact, low effort - Fill spare time",
            Self::MoneyPit => "Low impact, high effort - Avoid if possible",
        }
    }

    /// Display color as a hex constant. Values are fixed; callers style by them.
    pub fn color(&self) -> &'static str {
        match self {
            Self::QuickWins => "#10b981",
            Self::MajorProjects => "#3b82f6",
            Self::FillIns => "#f59e0b",
            Self::MoneyPit => "#ef4444",
        }
    }
}

/// Classify a score pair. High impact means `impact >= 4`, low effort means
/// `effort <= 2`; the quadrant is the cross of those two booleans.
pub fn quadrant(impact: u8, effort: u8) -> Quadrant {
    let impact = impact.clamp(1, 5);
    let effort = effort.clamp(1, 5);
    let high_impact = impact >= 4;
    let low_effort = effort <= 2;

    match (high_impact, low_effort) {
        (true, true) => Quadrant::QuickWins,
        (true, false) => Quadrant::MajorProjects,
        (false, true) => Quadrant::FillIns,
        (false, false) => Quadrant::MoneyPit,
    }
}

/// Map scores to plot coordinates: `x = (effort-1)/4*100`, `y = (5-impact)/4*100`.
pub fn to_coordinates(impact: u8, effort: u8) -> Coordinates {
    let impact = impact.clamp(1, 5);
    let effort = effort.clamp(1, 5);
    Coordinates {
        x: f64::from(effort - 1) / 4.0 * 100.0,
        y: f64::from(5 - impact) / 4.0 * 100.0,
    }
}

/// Map plot coordinates back to scores, clamping into the plane first.
///
/// Approximate inverse of [`to_coordinates`]: exact at the 25 grid points,
/// lossy everywhere else because of rounding.
pub fn from_coordinates(x: f64, y: f64) -> MatrixPosition {
    let x = x.clamp(0.0, 100.0);
    let y = y.clamp(0.0, 100.0);
    let effort = (x / 100.0 * 4.0).round() as u8 + 1;
    let impact = ((100.0 - y) / 100.0 * 4.0).round() as u8 + 1;
    MatrixPosition::new(impact, effort)
}

/// The priority level a score pair maps to.
///
/// Thresholds on the [`priority_score`]: `>= 20` critical, `>= 15` high,
/// `>= 10` medium, else low.
pub fn priority_level(impact: u8, effort: u8) -> Priority {
    let score = priority_score(impact, effort);
    if score >= 20 {
        Priority::Critical
    } else if score >= 15 {
        Priority::High
    } else if score >= 10 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Derive a feature's priority from its matrix position.
///
/// Features without a position come back unchanged. Returns the
/// reprioritized record without persisting it.
pub fn derive_priority_from_matrix(feature: Feature) -> Feature {
    let Some(matrix) = feature.matrix else {
        return feature;
    };

    Feature {
        priority: priority_level(matrix.impact, matrix.effort),
        ..feature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Status};
    use chrono::Utc;

    fn make_feature(matrix: Option<MatrixPosition>) -> Feature {
        Feature {
            id: "f1".to_string(),
            title: "Test Feature".to_string(),
            description: "A feature".to_string(),
            priority: Priority::Medium,
            status: Status::Planning,
            category: Category::Backend,
            estimated_hours: 8.0,
            assignee: None,
            due_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            matrix,
        }
    }

    #[test]
    fn test_priority_score_extremes() {
        assert_eq!(priority_score(5, 1), 25);
        assert_eq!(priority_score(1, 5), 1);
    }

    #[test]
    fn test_priority_score_clamps_out_of_range() {
        assert_eq!(priority_score(9, 0), 25);
        assert_eq!(priority_score(0, 9), 1);
    }

    #[test]
    fn test_quadrant_thresholds() {
        assert_eq!(quadrant(4, 2), Quadrant::QuickWins);
        assert_eq!(quadrant(4, 5), Quadrant::MajorProjects);
        assert_eq!(quadrant(2, 1), Quadrant::FillIns);
        assert_eq!(quadrant(1, 5), Quadrant::MoneyPit);
    }

    #[test]
    fn test_quadrant_metadata() {
        assert_eq!(Quadrant::QuickWins.as_str(), "quick_wins");
        assert_eq!(Quadrant::QuickWins.name(), "Quick Wins");
        assert_eq!(Quadrant::QuickWins.color(), "#10b981");
        assert_eq!(
            Quadrant::QuickWins.description(),
            "High impact, low effort - Do these first!"
        );
        assert_eq!(Quadrant::MoneyPit.as_str(), "money_pit");
        assert_eq!(Quadrant::MoneyPit.name(), "Money Pit");
        assert_eq!(Quadrant::MoneyPit.color(), "#ef4444");
    }

    #[test]
    fn test_to_coordinates_corners_and_center() {
        assert_eq!(to_coordinates(5, 1), Coordinates { x: 0.0, y: 0.0 });
        assert_eq!(to_coordinates(1, 5), Coordinates { x: 100.0, y: 100.0 });
        assert_eq!(to_coordinates(3, 3), Coordinates { x: 50.0, y: 50.0 });
    }

    #[test]
    fn test_coordinates_round_trip_exact_on_grid() {
        for impact in 1..=5u8 {
            for effort in 1..=5u8 {
                let coords = to_coordinates(impact, effort);
                let pos = from_coordinates(coords.x, coords.y);
                assert_eq!((pos.impact, pos.effort), (impact, effort));
            }
        }
    }

    #[test]
    fn test_from_coordinates_lossy_off_grid() {
        // (30, 30) snaps to the nearest grid scores, which plot at (25, 25).
        let pos = from_coordinates(30.0, 30.0);
        assert_eq!((pos.impact, pos.effort), (4, 2));
        let coords = to_coordinates(pos.impact, pos.effort);
        assert_eq!(coords, Coordinates { x: 25.0, y: 25.0 });
    }

    #[test]
    fn test_from_coordinates_clamps_into_plane() {
        let pos = from_coordinates(-50.0, 250.0);
        assert_eq!((pos.impact, pos.effort), (1, 1));
        let pos = from_coordinates(150.0, -10.0);
        assert_eq!((pos.impact, pos.effort), (5, 5));
    }

    #[test]
    fn test_priority_level_boundaries() {
        assert_eq!(priority_level(4, 1), Priority::Critical); // score 20
        assert_eq!(priority_level(4, 2), Priority::High); // score 19
        assert_eq!(priority_level(3, 1), Priority::High); // score 15
        assert_eq!(priority_level(3, 2), Priority::Medium); // score 14
        assert_eq!(priority_level(2, 1), Priority::Medium); // score 10
        assert_eq!(priority_level(2, 2), Priority::Low); // score 9
    }

    #[test]
    fn test_derive_priority_thresholds() {
        let critical = derive_priority_from_matrix(make_feature(Some(MatrixPosition::new(4, 1))));
        assert_eq!(critical.priority, Priority::Critical);

        let high = derive_priority_from_matrix(make_feature(Some(MatrixPosition::new(3, 1))));
        assert_eq!(high.priority, Priority::High);

        let medium = derive_priority_from_matrix(make_feature(Some(MatrixPosition::new(3, 3))));
        assert_eq!(medium.priority, Priority::Medium);

        let low = derive_priority_from_matrix(make_feature(Some(MatrixPosition::new(2, 5))));
        assert_eq!(low.priority, Priority::Low);
    }

    #[test]
    fn test_derive_priority_without_matrix_is_unchanged() {
        let feature = make_feature(None);
        let before = feature.clone();
        let after = derive_priority_from_matrix(feature);
        assert_eq!(after.priority, before.priority);
        assert_eq!(after.updated_at, before.updated_at);
    }

    #[test]
    fn test_derive_priority_keeps_other_fields() {
        let feature = make_feature(Some(MatrixPosition::new(5, 1)));
        let before = feature.clone();
        let after = derive_priority_from_matrix(feature);
        assert_eq!(after.priority, Priority::Critical);
        assert_eq!(after.id, before.id);
        assert_eq!(after.title, before.title);
        assert_eq!(after.status, before.status);
        assert_eq!(after.matrix, before.matrix);
    }

    #[test]
    fn test_default_position_is_center() {
        let pos = MatrixPosition::default();
        assert_eq!((pos.impact, pos.effort), (3, 3));
        assert_eq!(priority_score(pos.impact, pos.effort), 13);
    }
}

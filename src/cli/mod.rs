//! Command handlers for the `rdmp` binary.
//!
//! Each subcommand has a `cmd_*` handler taking the store and its parsed
//! arguments. Human output (tables, detail views, the board) goes to stdout;
//! `--json` switches the query commands to pretty-printed JSON. Failures come
//! back as errors so the binary exits nonzero.

pub mod board;

use anyhow::{anyhow, bail, Result};
use clap::Args;

use crate::matrix;
use crate::models::*;
use crate::store::FeatureStore;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Feature title
    #[arg(value_name = "TITLE")]
    pub title: String,

    /// What the feature does
    #[arg(long, default_value = "")]
    pub description: String,

    /// Priority: low, medium, high, critical
    #[arg(long, default_value = "medium")]
    pub priority: String,

    /// Status: planning, in_progress, testing, completed, on_hold
    #[arg(long, default_value = "planning")]
    pub status: String,

    /// Category: frontend, backend, infrastructure, design, research, other
    #[arg(long, default_value = "other")]
    pub category: String,

    /// Estimated hours of work
    #[arg(long, default_value_t = 0.0)]
    pub hours: f64,

    /// Who the feature is assigned to
    #[arg(long)]
    pub assignee: Option<String>,

    /// Due date, e.g. 2024-02-15
    #[arg(long)]
    pub due: Option<String>,

    /// Impact score 1-5 for the matrix position
    #[arg(long)]
    pub impact: Option<u8>,

    /// Effort score 1-5 for the matrix position
    #[arg(long)]
    pub effort: Option<u8>,

    /// Derive the priority from the matrix position
    #[arg(long)]
    pub auto_priority: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only features whose title or description contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Priority filter: all, low, medium, high, critical
    #[arg(long)]
    pub priority: Option<String>,

    /// Status filter: all, planning, in_progress, testing, completed, on_hold
    #[arg(long)]
    pub status: Option<String>,

    /// Category filter: all, frontend, backend, infrastructure, design, research, other
    #[arg(long)]
    pub category: Option<String>,

    /// Print the matching features as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Feature id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Print the raw record as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Feature id
    #[arg(value_name = "ID")]
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New priority: low, medium, high, critical
    #[arg(long)]
    pub priority: Option<String>,

    /// New status: planning, in_progress, testing, completed, on_hold
    #[arg(long)]
    pub status: Option<String>,

    /// New category: frontend, backend, infrastructure, design, research, other
    #[arg(long)]
    pub category: Option<String>,

    /// New estimate in hours
    #[arg(long)]
    pub hours: Option<f64>,

    /// New assignee
    #[arg(long)]
    pub assignee: Option<String>,

    /// New due date
    #[arg(long)]
    pub due: Option<String>,

    /// Impact score 1-5; the other score keeps its current value
    #[arg(long)]
    pub impact: Option<u8>,

    /// Effort score 1-5; the other score keeps its current value
    #[arg(long)]
    pub effort: Option<u8>,

    /// Re-derive the priority from the matrix position
    #[arg(long)]
    pub auto_priority: bool,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Feature id
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Print the counts as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================
// Command handlers
// ============================================================

pub fn cmd_add(store: &mut FeatureStore, args: AddArgs) -> Result<()> {
    let mut priority = parse_priority(&args.priority)?;
    let status = parse_status(&args.status)?;
    let category = parse_category(&args.category)?;
    let hours = parse_hours(args.hours)?;
    let matrix = matrix_from_flags(args.impact, args.effort, MatrixPosition::default());

    // Derived before the add; a fresh record keeps created_at == updated_at.
    if args.auto_priority {
        if let Some(position) = matrix {
            priority = matrix::priority_level(position.impact, position.effort);
        }
    }

    let created = store.add(CreateFeatureInput {
        title: args.title,
        description: args.description,
        priority,
        status,
        category,
        estimated_hours: hours,
        assignee: args.assignee,
        due_date: args.due,
        matrix,
    })?;

    println!("Added feature {}", created.id);
    print!("{}", render_feature_detail(&created));
    Ok(())
}

pub fn cmd_list(store: &mut FeatureStore, args: ListArgs) -> Result<()> {
    if let Some(search) = args.search {
        store.set_filter(FilterUpdate::Search(search));
    }
    if let Some(priority) = args.priority.as_deref() {
        store.set_filter(FilterUpdate::Priority(parse_priority_selector(priority)?));
    }
    if let Some(status) = args.status.as_deref() {
        store.set_filter(FilterUpdate::Status(parse_status_selector(status)?));
    }
    if let Some(category) = args.category.as_deref() {
        store.set_filter(FilterUpdate::Category(parse_category_selector(category)?));
    }

    let features = store.filtered_features();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&features)?);
    } else if features.is_empty() {
        println!("No features match the current filters");
    } else {
        print!("{}", render_feature_table(&features));
    }
    Ok(())
}

pub fn cmd_show(store: &FeatureStore, args: ShowArgs) -> Result<()> {
    let Some(feature) = store.get(&args.id) else {
        bail!("Feature not found: {}", args.id);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(feature)?);
    } else {
        print!("{}", render_feature_detail(feature));
    }
    Ok(())
}

pub fn cmd_edit(store: &mut FeatureStore, args: EditArgs) -> Result<()> {
    let priority = args.priority.as_deref().map(parse_priority).transpose()?;
    let status = args.status.as_deref().map(parse_status).transpose()?;
    let category = args.category.as_deref().map(parse_category).transpose()?;
    let hours = args.hours.map(parse_hours).transpose()?;

    let base = store.get(&args.id).and_then(|f| f.matrix).unwrap_or_default();
    let matrix = matrix_from_flags(args.impact, args.effort, base);

    let input = UpdateFeatureInput {
        title: args.title,
        description: args.description,
        priority,
        status,
        category,
        estimated_hours: hours,
        assignee: args.assignee,
        due_date: args.due,
        matrix,
    };

    let Some(updated) = store.update(&args.id, input)? else {
        bail!("Feature not found: {}", args.id);
    };

    let updated = if args.auto_priority {
        apply_auto_priority(store, updated)?
    } else {
        updated
    };

    println!("Updated feature {}", updated.id);
    print!("{}", render_feature_detail(&updated));
    Ok(())
}

pub fn cmd_delete(store: &mut FeatureStore, args: DeleteArgs) -> Result<()> {
    if !store.delete(&args.id)? {
        bail!("Feature not found: {}", args.id);
    }
    println!("Deleted feature {}", args.id);
    Ok(())
}

pub fn cmd_stats(store: &FeatureStore, args: StatsArgs) -> Result<()> {
    let stats = store.stats();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Total:        {}", stats.total);
        println!("In progress:  {}", stats.in_progress);
        println!("Completed:    {}", stats.completed);
        println!("Planning:     {}", stats.planning);
    }
    Ok(())
}

pub fn cmd_board(store: &FeatureStore) -> Result<()> {
    let features = store.features();
    if features.iter().all(|f| f.matrix.is_none()) {
        println!("No features have a matrix position yet.");
        println!("Set one with: rdmp edit <id> --impact <1-5> --effort <1-5>");
        return Ok(());
    }

    print!("{}", board::render_board(features));

    let unpositioned: Vec<&Feature> = features.iter().filter(|f| f.matrix.is_none()).collect();
    if !unpositioned.is_empty() {
        println!();
        println!("Not yet positioned:");
        for feature in unpositioned {
            println!("  - {} ({})", feature.title, feature.id);
        }
    }
    Ok(())
}

// ============================================================
// Value parsing
// ============================================================

fn parse_priority(s: &str) -> Result<Priority> {
    Priority::from_str(s).ok_or_else(|| {
        anyhow!(
            "Invalid priority '{}'. Must be: low, medium, high, or critical",
            s
        )
    })
}

fn parse_status(s: &str) -> Result<Status> {
    Status::from_str(s).ok_or_else(|| {
        anyhow!(
            "Invalid status '{}'. Must be: planning, in_progress, testing, completed, or on_hold",
            s
        )
    })
}

fn parse_category(s: &str) -> Result<Category> {
    Category::from_str(s).ok_or_else(|| {
        anyhow!(
            "Invalid category '{}'. Must be: frontend, backend, infrastructure, design, research, or other",
            s
        )
    })
}

// Non-finite estimates would serialize as JSON null and fail the next load.
fn parse_hours(hours: f64) -> Result<f64> {
    if hours.is_finite() && hours >= 0.0 {
        Ok(hours)
    } else {
        Err(anyhow!(
            "Invalid hours '{}'. Must be a non-negative number",
            hours
        ))
    }
}

fn parse_priority_selector(s: &str) -> Result<Selector<Priority>> {
    if s == "all" {
        return Ok(Selector::All);
    }
    Priority::from_str(s).map(Selector::Only).ok_or_else(|| {
        anyhow!(
            "Invalid priority filter '{}'. Must be: all, low, medium, high, or critical",
            s
        )
    })
}

fn parse_status_selector(s: &str) -> Result<Selector<Status>> {
    if s == "all" {
        return Ok(Selector::All);
    }
    Status::from_str(s).map(Selector::Only).ok_or_else(|| {
        anyhow!(
            "Invalid status filter '{}'. Must be: all, planning, in_progress, testing, completed, or on_hold",
            s
        )
    })
}

fn parse_category_selector(s: &str) -> Result<Selector<Category>> {
    if s == "all" {
        return Ok(Selector::All);
    }
    Category::from_str(s).map(Selector::Only).ok_or_else(|| {
        anyhow!(
            "Invalid category filter '{}'. Must be: all, frontend, backend, infrastructure, design, research, or other",
            s
        )
    })
}

/// Build a matrix position from `--impact`/`--effort`, taking whichever score
/// was not given from `base`. Neither flag means no position at all.
fn matrix_from_flags(
    impact: Option<u8>,
    effort: Option<u8>,
    base: MatrixPosition,
) -> Option<MatrixPosition> {
    if impact.is_none() && effort.is_none() {
        return None;
    }
    Some(MatrixPosition::new(
        impact.unwrap_or(base.impact),
        effort.unwrap_or(base.effort),
    ))
}

/// Re-derive the feature's priority from its matrix position and persist it.
fn apply_auto_priority(store: &mut FeatureStore, feature: Feature) -> Result<Feature> {
    if feature.matrix.is_none() {
        return Ok(feature);
    }

    let derived = matrix::derive_priority_from_matrix(feature);
    let id = derived.id.clone();
    let updated = store.update(
        &id,
        UpdateFeatureInput {
            priority: Some(derived.priority),
            ..Default::default()
        },
    )?;
    Ok(updated.unwrap_or(derived))
}

// ============================================================
// Rendering
// ============================================================

fn render_feature_table(features: &[&Feature]) -> String {
    let id_width = features.iter().fold("ID".len(), |w, f| w.max(f.id.len()));
    let title_width = features
        .iter()
        .fold("TITLE".len(), |w, f| w.max(f.title.len()));
    let priority_width = features
        .iter()
        .fold("PRIORITY".len(), |w, f| w.max(f.priority.as_str().len()));
    let status_width = features
        .iter()
        .fold("STATUS".len(), |w, f| w.max(f.status.as_str().len()));
    let category_width = features
        .iter()
        .fold("CATEGORY".len(), |w, f| w.max(f.category.as_str().len()));

    let mut out = format!(
        "{:<id_width$}  {:<title_width$}  {:<priority_width$}  {:<status_width$}  {:<category_width$}  HOURS\n",
        "ID", "TITLE", "PRIORITY", "STATUS", "CATEGORY",
    );
    for f in features {
        out.push_str(&format!(
            "{:<id_width$}  {:<title_width$}  {:<priority_width$}  {:<status_width$}  {:<category_width$}  {}\n",
            f.id,
            f.title,
            f.priority.as_str(),
            f.status.as_str(),
            f.category.as_str(),
            f.estimated_hours,
        ));
    }
    out
}

fn render_feature_detail(feature: &Feature) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", feature.title, feature.id));
    out.push_str(&format!("  Description:  {}\n", feature.description));
    out.push_str(&format!("  Priority:     {}\n", feature.priority.as_str()));
    out.push_str(&format!("  Status:       {}\n", feature.status.as_str()));
    out.push_str(&format!("  Category:     {}\n", feature.category.as_str()));
    out.push_str(&format!(
        "  Estimated:    {} hours\n",
        feature.estimated_hours
    ));
    if let Some(assignee) = &feature.assignee {
        out.push_str(&format!("  Assignee:     {}\n", assignee));
    }
    if let Some(due) = &feature.due_date {
        out.push_str(&format!("  Due date:     {}\n", due));
    }
    out.push_str(&format!(
        "  Created:      {}\n",
        feature.created_at.to_rfc3339()
    ));
    out.push_str(&format!(
        "  Updated:      {}\n",
        feature.updated_at.to_rfc3339()
    ));

    if let Some(m) = feature.matrix {
        let score = matrix::priority_score(m.impact, m.effort);
        let quad = matrix::quadrant(m.impact, m.effort);
        out.push_str(&format!(
            "  Matrix:       impact {}, effort {}\n",
            m.impact, m.effort
        ));
        out.push_str(&format!("    Score:      {}\n", score));
        out.push_str(&format!(
            "    Quadrant:   {} ({})\n",
            quad.name(),
            quad.description()
        ));
        let position = match (m.x, m.y) {
            (Some(x), Some(y)) => format!("x={}, y={} (custom)", x, y),
            _ => {
                let coords = matrix::to_coordinates(m.impact, m.effort);
                format!("x={}, y={}", coords.x, coords.y)
            }
        };
        out.push_str(&format!("    Position:   {}\n", position));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;
    use chrono::{TimeZone, Utc};

    fn make_add_args(title: &str) -> AddArgs {
        AddArgs {
            title: title.to_string(),
            description: String::new(),
            priority: "medium".to_string(),
            status: "planning".to_string(),
            category: "other".to_string(),
            hours: 0.0,
            assignee: None,
            due: None,
            impact: None,
            effort: None,
            auto_priority: false,
        }
    }

    fn make_edit_args(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            title: None,
            description: None,
            priority: None,
            status: None,
            category: None,
            hours: None,
            assignee: None,
            due: None,
            impact: None,
            effort: None,
            auto_priority: false,
        }
    }

    fn make_feature(
        id: &str,
        title: &str,
        priority: Priority,
        status: Status,
        category: Category,
        estimated_hours: f64,
    ) -> Feature {
        Feature {
            id: id.to_string(),
            title: title.to_string(),
            description: "Login flow".to_string(),
            priority,
            status,
            category,
            estimated_hours,
            assignee: None,
            due_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            matrix: None,
        }
    }

    #[test]
    fn test_table_aligns_columns_to_contents() {
        let first = make_feature(
            "1",
            "User Auth",
            Priority::High,
            Status::InProgress,
            Category::Backend,
            24.0,
        );
        let second = make_feature(
            "2",
            "Dark Mode",
            Priority::Low,
            Status::Planning,
            Category::Frontend,
            8.5,
        );
        let output = render_feature_table(&[&first, &second]);
        let expected = concat!(
            "ID  TITLE      PRIORITY  STATUS       CATEGORY  HOURS\n",
            "1   User Auth  high      in_progress  backend   24\n",
            "2   Dark Mode  low       planning     frontend  8.5\n",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_detail_includes_matrix_interpretation() {
        let mut feature = make_feature(
            "1",
            "User Auth",
            Priority::High,
            Status::InProgress,
            Category::Backend,
            24.0,
        );
        feature.assignee = Some("John Doe".to_string());
        feature.due_date = Some("2024-02-15".to_string());
        feature.matrix = Some(MatrixPosition::new(4, 2));

        let output = render_feature_detail(&feature);
        let expected = concat!(
            "User Auth (1)\n",
            "  Description:  Login flow\n",
            "  Priority:     high\n",
            "  Status:       in_progress\n",
            "  Category:     backend\n",
            "  Estimated:    24 hours\n",
            "  Assignee:     John Doe\n",
            "  Due date:     2024-02-15\n",
            "  Created:      2024-01-15T10:00:00+00:00\n",
            "  Updated:      2024-01-15T10:00:00+00:00\n",
            "  Matrix:       impact 4, effort 2\n",
            "    Score:      19\n",
            "    Quadrant:   Quick Wins (High impact, low effort - Do these first!)\n",
            "    Position:   x=25, y=25\n",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_detail_prefers_custom_position() {
        let mut feature = make_feature(
            "1",
            "User Auth",
            Priority::High,
            Status::InProgress,
            Category::Backend,
            24.0,
        );
        feature.matrix = Some(MatrixPosition {
            impact: 4,
            effort: 2,
            x: Some(30.0),
            y: Some(30.0),
        });

        let output = render_feature_detail(&feature);
        assert!(output.contains("    Position:   x=30, y=30 (custom)\n"));
    }

    #[test]
    fn test_selector_parsing_accepts_all_sentinel() {
        assert_eq!(parse_priority_selector("all").unwrap(), Selector::All);
        assert_eq!(
            parse_priority_selector("high").unwrap(),
            Selector::Only(Priority::High)
        );
        assert!(parse_priority_selector("urgent").is_err());

        assert_eq!(parse_status_selector("all").unwrap(), Selector::All);
        assert_eq!(
            parse_category_selector("backend").unwrap(),
            Selector::Only(Category::Backend)
        );
        assert!(parse_category_selector("misc").is_err());
    }

    #[test]
    fn test_matrix_from_flags_merges_with_base() {
        assert_eq!(matrix_from_flags(None, None, MatrixPosition::new(2, 5)), None);
        assert_eq!(
            matrix_from_flags(Some(4), None, MatrixPosition::new(2, 5)),
            Some(MatrixPosition::new(4, 5))
        );
        assert_eq!(
            matrix_from_flags(None, Some(1), MatrixPosition::default()),
            Some(MatrixPosition::new(3, 1))
        );
    }

    #[test]
    fn test_parse_hours_rejects_non_finite_and_negative() {
        assert_eq!(parse_hours(24.0).unwrap(), 24.0);
        assert_eq!(parse_hours(0.0).unwrap(), 0.0);
        assert!(parse_hours(f64::NAN).is_err());
        assert!(parse_hours(f64::INFINITY).is_err());
        assert!(parse_hours(f64::NEG_INFINITY).is_err());
        assert!(parse_hours(-1.0).is_err());
    }

    #[test]
    fn test_add_rejects_non_finite_hours() {
        let storage = MemoryStorage::new();
        let mut store = FeatureStore::new(Box::new(storage.clone()));

        let mut args = make_add_args("Bad Estimate");
        args.hours = f64::NAN;

        assert!(cmd_add(&mut store, args).is_err());
        assert!(store.features().is_empty());
        assert!(storage.contents().is_none());
    }

    #[test]
    fn test_edit_rejects_non_finite_hours() {
        let mut store = FeatureStore::in_memory();
        let mut args = make_add_args("Estimated Work");
        args.hours = 12.0;
        cmd_add(&mut store, args).expect("Add failed");
        let id = store.features()[0].id.clone();

        let mut edit = make_edit_args(&id);
        edit.hours = Some(f64::INFINITY);

        assert!(cmd_edit(&mut store, edit).is_err());
        let kept = store.get(&id).expect("Feature should still exist");
        assert_eq!(kept.estimated_hours, 12.0);
    }

    #[test]
    fn test_add_auto_priority_derives_before_storing() {
        let mut store = FeatureStore::in_memory();
        let mut args = make_add_args("Instant Win");
        args.priority = "low".to_string();
        args.impact = Some(5);
        args.effort = Some(1);
        args.auto_priority = true;
        cmd_add(&mut store, args).expect("Add failed");

        let feature = &store.features()[0];
        assert_eq!(feature.priority, Priority::Critical);
        assert_eq!(feature.matrix, Some(MatrixPosition::new(5, 1)));
        assert_eq!(feature.created_at, feature.updated_at);
    }
}

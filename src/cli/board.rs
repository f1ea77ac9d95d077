//! ASCII board rendering for the impact/effort matrix.

use crate::matrix::{priority_score, quadrant};
use crate::models::{Feature, MatrixPosition};

const COLUMN_HEADER: &str = "         1     2     3     4     5";
const TOP_BORDER: &str = "      ┌─────┬─────┬─────┬─────┬─────┐";
const ROW_SEPARATOR: &str = "      ├─────┼─────┼─────┼─────┼─────┤";
const BOTTOM_BORDER: &str = "      └─────┴─────┴─────┴─────┴─────┘";

/// Render the 5x5 impact/effort board with a legend of positioned features.
///
/// Columns are effort (low on the left), rows are impact (high at the top).
/// Features with a matrix position get a number marker in their cell and a
/// legend line; features without one are skipped.
///
/// Example output:
/// ```text
///          1     2     3     4     5
///       ┌─────┬─────┬─────┬─────┬─────┐
///     5 │     │     │     │     │     │
///       ├─────┼─────┼─────┼─────┼─────┤
///     4 │     │  1  │     │     │     │
///       ├─────┼─────┼─────┼─────┼─────┤
///     3 │     │     │     │     │     │
///       ├─────┼─────┼─────┼─────┼─────┤
///     2 │     │     │     │     │     │
///       ├─────┼─────┼─────┼─────┼─────┤
///     1 │     │     │     │     │  2  │
///       └─────┴─────┴─────┴─────┴─────┘
///
///  1. Quick win  [impact 4, effort 2]  score 19  Quick Wins
///  2. Long shot  [impact 1, effort 5]  score 1  Money Pit
/// ```
pub fn render_board(features: &[Feature]) -> String {
    let positioned: Vec<(usize, &Feature, MatrixPosition)> = features
        .iter()
        .filter_map(|f| f.matrix.map(|m| (f, m)))
        .enumerate()
        .map(|(i, (f, m))| (i + 1, f, m))
        .collect();

    let mut cells: Vec<Vec<Vec<usize>>> = vec![vec![Vec::new(); 5]; 5];
    for (marker, _, position) in &positioned {
        let row = (position.impact.clamp(1, 5) - 1) as usize;
        let col = (position.effort.clamp(1, 5) - 1) as usize;
        cells[row][col].push(*marker);
    }

    let mut output = String::new();
    output.push_str(COLUMN_HEADER);
    output.push('\n');
    output.push_str(TOP_BORDER);
    output.push('\n');

    for impact in (1..=5u8).rev() {
        let row = &cells[(impact - 1) as usize];
        let mut line = format!("{:>5} │", impact);
        for markers in row {
            line.push_str(&format_cell(markers));
            line.push('│');
        }
        output.push_str(&line);
        output.push('\n');

        let divider = if impact > 1 { ROW_SEPARATOR } else { BOTTOM_BORDER };
        output.push_str(divider);
        output.push('\n');
    }

    if !positioned.is_empty() {
        output.push('\n');
        for (marker, feature, position) in &positioned {
            let score = priority_score(position.impact, position.effort);
            let quad = quadrant(position.impact, position.effort);
            output.push_str(&format!(
                "{:>2}. {}  [impact {}, effort {}]  score {}  {}\n",
                marker,
                feature.title,
                position.impact,
                position.effort,
                score,
                quad.name()
            ));
        }
    }

    output
}

/// A cell's marker list as exactly five characters.
fn format_cell(markers: &[usize]) -> String {
    if markers.is_empty() {
        return "     ".to_string();
    }
    let mut joined = markers
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(",");
    if joined.len() > 5 {
        joined.truncate(4);
        joined.push('+');
    }
    format!("{:^5}", joined)
}

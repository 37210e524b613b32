//! Header hierarchy resolution
//!
//! Reads the leading header rows of a grid and produces one outer-to-inner
//! [`HeaderPath`] per column. A cell spanning several columns contributes
//! its label to each of them at that depth; a label repeated across stacked
//! depths (a cell spanning the full column range twice) is collapsed.

use fxhash::FxHashMap;

use super::grid::Grid;
use crate::model::table::HeaderPath;
use crate::utils::error::Warning;
use crate::utils::text::normalize_whitespace;

/// Resolve one header path per grid column
///
/// Columns whose header labels are all empty fall back to a positional
/// `col_N` label. Identical paths on different columns (usually an authoring
/// error merging a group header across a span) are disambiguated with a
/// 1-based positional suffix and reported.
pub fn resolve_header_paths(grid: &Grid, warnings: &mut Vec<Warning>) -> Vec<HeaderPath> {
    let mut paths = Vec::with_capacity(grid.cols());

    for col in 0..grid.cols() {
        let mut labels: Vec<String> = Vec::new();
        let mut prev_label: Option<String> = None;

        for depth in 0..grid.header_rows() {
            let label = normalize_whitespace(grid.text(depth, col));
            // Skip empties and labels identical to the previous depth
            if !label.is_empty() && prev_label.as_deref() != Some(label.as_str()) {
                labels.push(label.clone());
            }
            prev_label = Some(label);
        }

        if labels.is_empty() {
            labels.push(format!("col_{}", col));
        }

        paths.push(HeaderPath::new(labels));
    }

    disambiguate_duplicates(&mut paths, warnings);
    paths
}

/// Append "#2", "#3", ... to later occurrences of an already-seen path
fn disambiguate_duplicates(paths: &mut [HeaderPath], warnings: &mut Vec<Warning>) {
    let mut seen: FxHashMap<Vec<String>, usize> = FxHashMap::default();

    for (col, path) in paths.iter_mut().enumerate() {
        let key = path.labels().to_vec();
        let count = seen.entry(key).or_insert(0);
        *count += 1;

        if *count > 1 {
            warnings.push(
                Warning::new(format!(
                    "duplicate header path '{}'; appended positional suffix #{}",
                    path.labels().join(" / "),
                    *count
                ))
                .at_column(col),
            );
            path.disambiguate(*count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::source::{SourceCell, SourceTable};

    fn h(text: &str) -> SourceCell {
        SourceCell::header(text)
    }

    fn d(text: &str) -> SourceCell {
        SourceCell::data(text)
    }

    fn resolve(rows: Vec<Vec<SourceCell>>) -> (Vec<HeaderPath>, Vec<Warning>) {
        let grid = Grid::build(&SourceTable { caption: None, rows });
        let mut warnings = Vec::new();
        let paths = resolve_header_paths(&grid, &mut warnings);
        (paths, warnings)
    }

    fn labels(paths: &[HeaderPath]) -> Vec<Vec<&str>> {
        paths
            .iter()
            .map(|p| p.labels().iter().map(|s| s.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_two_level_group_headers() {
        let (paths, warnings) = resolve(vec![
            vec![
                h(""),
                h("All cases").with_colspan(2),
                h("ANE").with_colspan(2),
            ],
            vec![h("Characteristic"), h("n/N"), h("%"), h("n/N"), h("%")],
            vec![d("Total"), d("109"), d("100"), d("44"), d("40.4")],
        ]);

        assert_eq!(
            labels(&paths),
            vec![
                vec!["Characteristic"],
                vec!["All cases", "n/N"],
                vec!["All cases", "%"],
                vec!["ANE", "n/N"],
                vec!["ANE", "%"],
            ]
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_stacked_identical_labels_collapse() {
        // A cell spanning the column at both depths repeats its label; the
        // path keeps it once
        let (paths, _) = resolve(vec![
            vec![h("Cases"), h("Deaths")],
            vec![h("Cases"), h("n")],
            vec![d("1"), d("2")],
        ]);

        assert_eq!(labels(&paths), vec![vec!["Cases"], vec!["Deaths", "n"]]);
    }

    #[test]
    fn test_rowspan_header_contributes_once() {
        let (paths, _) = resolve(vec![
            vec![h("Characteristic").with_rowspan(2), h("2023").with_colspan(2)],
            vec![h("n"), h("%")],
            vec![d("Total"), d("10"), d("50%")],
        ]);

        assert_eq!(
            labels(&paths),
            vec![
                vec!["Characteristic"],
                vec!["2023", "n"],
                vec!["2023", "%"],
            ]
        );
    }

    #[test]
    fn test_duplicate_paths_get_positional_suffix() {
        let (paths, warnings) = resolve(vec![
            vec![h("Total"), h("Total")],
            vec![d("1"), d("2")],
        ]);

        assert_eq!(labels(&paths), vec![vec!["Total"], vec!["Total#2"]]);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("duplicate header path") && w.column == Some(1)));
    }

    #[test]
    fn test_triplicate_paths() {
        let (paths, warnings) = resolve(vec![
            vec![h("n"), h("n"), h("n")],
            vec![d("1"), d("2"), d("3")],
        ]);

        assert_eq!(labels(&paths), vec![vec!["n"], vec!["n#2"], vec!["n#3"]]);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_all_empty_column_gets_positional_label() {
        let (paths, _) = resolve(vec![
            vec![h(""), h("Cases")],
            vec![d("Total"), d("5")],
        ]);

        assert_eq!(labels(&paths), vec![vec!["col_0"], vec!["Cases"]]);
    }
}

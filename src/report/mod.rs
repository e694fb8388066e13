//! Report
//!
//! Renders the solutions of a search as a table: one row per solution, one
//! column per item kind.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{items::groups::ItemGroup, solvers::SolverResult};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Tabular view over a solver result.
#[derive(Debug, Clone, Copy)]
pub struct Report<'r, 'g> {
    group: &'g ItemGroup,
    result: &'r SolverResult<'g>,
}

impl<'r, 'g> Report<'r, 'g> {
    /// Create a report for `result`, with one column per item in `group`.
    pub fn new(group: &'g ItemGroup, result: &'r SolverResult<'g>) -> Self {
        Self { group, result }
    }

    /// Render the solutions table.
    pub fn table(&self) -> String {
        let mut builder = Builder::default();

        push_header(&mut builder, self.group);

        for (idx, solution) in self.result.solutions.iter().enumerate() {
            let mut record = Vec::with_capacity(self.group.len() + 2);

            record.push((idx + 1).to_string());

            for item in self.group.iter() {
                record.push(
                    solution
                        .amount_of(item.kind())
                        .map(|amount| amount.to_string())
                        .unwrap_or_default(),
                );
            }

            record.push(solution.total().to_string());

            builder.push_record(record);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..), Alignment::right());

        table.to_string()
    }

    /// Writes the report.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        let stats = &self.result.stats;

        writeln!(out, "\n{}", self.table()).map_err(|_err| ReportError::IO)?;

        writeln!(out, " Solutions: {}", self.result.len()).map_err(|_err| ReportError::IO)?;

        writeln!(
            out,
            " Leaves evaluated: {}, nodes visited: {}, nodes built: {}",
            stats.leaves_evaluated, stats.nodes_visited, stats.nodes_built
        )
        .map_err(|_err| ReportError::IO)
    }
}

fn push_header(builder: &mut Builder, group: &ItemGroup) {
    let mut header = Vec::with_capacity(group.len() + 2);

    header.push("#".to_string());
    header.extend(group.iter().map(|item| item.kind().to_string()));
    header.push("Total".to_string());

    builder.push_record(header);
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        items::Item,
        solvers::{Solver, tree::TreeSolver},
    };

    use super::*;

    #[test]
    fn table_has_a_column_per_item_and_a_row_per_solution() -> TestResult {
        let group = ItemGroup::new([
            Item::new("Apple", 1),
            Item::new("Banana", 2),
            Item::new("Cat", 3),
        ])?;

        let result = TreeSolver::default().solve(&group, 2)?;
        let table = Report::new(&group, &result).table();

        for kind in ["Apple", "Banana", "Cat", "Total"] {
            assert!(table.contains(kind), "missing column {kind}");
        }

        // Header plus one line per solution, between the top and bottom borders
        assert_eq!(table.lines().count(), 2 + 1 + 1 + result.len());

        Ok(())
    }

    #[test]
    fn write_to_appends_summary() -> TestResult {
        let group = ItemGroup::new([Item::new("Apple", 2), Item::new("Banana", 2)])?;

        let result = TreeSolver::default().solve(&group, 4)?;
        let mut out = Vec::new();

        Report::new(&group, &result).write_to(&mut out)?;

        let written = String::from_utf8(out)?;

        assert!(written.contains("Solutions: 1"), "summary missing: {written}");
        assert!(written.contains("nodes built: 12"), "stats missing: {written}");

        Ok(())
    }
}

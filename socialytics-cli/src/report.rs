//! Plain-text tables for terminal output.

/// Column-aligned table; every rendered line has the same width
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row; missing cells render blank and extra cells are dropped
    pub fn push<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.headers.len())
            .map(|cell| cell.to_string())
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
        };

        let header = line(&self.headers);
        let separator = "-".repeat(header.chars().count());

        let mut out = vec![header, separator];
        out.extend(self.rows.iter().map(|row| line(row)));
        out.join("\n")
    }
}

/// Milliseconds with three decimals
pub fn millis(value: f64) -> String {
    format!("{:.3} ms", value)
}

/// Relative change from `before` to `after`; `None` when `before` is zero
pub fn speedup(before: f64, after: f64) -> Option<f64> {
    if before <= 0.0 {
        return None;
    }
    Some((before - after) / before * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_render_aligns_columns() {
        let mut table = Table::new(["user", "followers"]);
        table.push(["Alice", "1"]);
        table.push(["Charlie", "12"]);

        let rendered = table.render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "user    | followers");
        assert_eq!(lines[1], "-------------------");
        assert_eq!(lines[2], "Alice   | 1        ");
        assert_eq!(lines[3], "Charlie | 12       ");
    }

    #[test]
    fn test_push_normalizes_row_length() {
        let mut table = Table::new(["a", "b"]);
        table.push(["only"]);
        table.push(["1", "2", "3"]);
        assert_eq!(table.rows[0], vec!["only".to_string(), String::new()]);
        assert_eq!(table.rows[1].len(), 2);
    }

    #[test]
    fn test_speedup() {
        assert_eq!(speedup(0.0, 1.0), None);
        assert_eq!(speedup(2.0, 1.0), Some(50.0));
        assert_eq!(millis(1.23456), "1.235 ms");
    }

    proptest! {
        #[test]
        fn prop_rendered_lines_share_width(
            headers in prop::collection::vec("[a-z]{1,8}", 1..5),
            rows in prop::collection::vec(prop::collection::vec("[a-zA-Z0-9 ]{0,12}", 0..6), 0..10),
        ) {
            let mut table = Table::new(headers.clone());
            for row in &rows {
                table.push(row.clone());
            }

            let rendered = table.render();
            let widths: Vec<_> = rendered.lines().map(|line| line.chars().count()).collect();
            prop_assert_eq!(widths.len(), rows.len() + 2);
            prop_assert!(widths.iter().all(|w| *w == widths[0]));
        }
    }
}

//! Table rendering for CLI listings.

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Columns start as wide as their header and grow with each row.
    pub fn new(headers: &[&str]) -> Self {
        Self {
            columns: headers
                .iter()
                .map(|h| Column {
                    header: h.to_string(),
                    width: h.chars().count(),
                })
                .collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (col, cell) in self.columns.iter_mut().zip(&row) {
            col.width = col.width.max(cell.chars().count());
        }
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        for col in &self.columns {
            out.push_str(&format!("{:<width$}  ", col.header, width = col.width));
        }
        out.push('\n');

        for col in &self.columns {
            out.push_str(&format!("{}  ", "-".repeat(col.width)));
        }
        out.push('\n');

        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&format!("{:<width$}  ", cell, width = col.width));
            }
            out.push('\n');
        }

        out
    }
}

//! The monster table shown to the user.

use std::cmp::Ordering;
use std::fmt;

use crate::extractor::{Alignment, FieldRecord};

pub const NAME: &str = "Name";
pub const ALIGNMENT: &str = "Alignment";
pub const LAWFULNESS: &str = "Lawfulness";
pub const GOODNESS: &str = "Goodness";
pub const RACE: &str = "Race";

/// Column layout shared by every row of a table.
///
/// Configured keywords stay in their configured order; `Alignment` is
/// replaced by the derived `Lawfulness` and `Goodness` columns at the end,
/// and `Name` always comes first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    fields: Vec<String>,
    has_alignment: bool,
}

impl TableSchema {
    pub fn from_keywords<S: AsRef<str>>(keywords: &[S]) -> Self {
        let has_alignment = keywords.iter().any(|k| k.as_ref() == ALIGNMENT);
        let fields = keywords
            .iter()
            .map(|k| k.as_ref())
            .filter(|k| *k != ALIGNMENT)
            .map(str::to_string)
            .collect();
        Self {
            fields,
            has_alignment,
        }
    }

    /// Extracted columns other than `Alignment`.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn has_alignment(&self) -> bool {
        self.has_alignment
    }

    pub fn columns(&self) -> Vec<&str> {
        let mut columns = Vec::with_capacity(self.fields.len() + 3);
        columns.push(NAME);
        columns.extend(self.fields.iter().map(String::as_str));
        if self.has_alignment {
            columns.push(LAWFULNESS);
            columns.push(GOODNESS);
        }
        columns
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterRow {
    name: String,
    fields: Vec<(String, String)>,
    alignment: Option<Alignment>,
}

impl MonsterRow {
    /// Lay a field record out along `schema`. Keys the record lacks become
    /// empty; the alignment is kept only when the schema has one.
    pub fn from_record(
        name: impl Into<String>,
        record: &FieldRecord,
        schema: &TableSchema,
        alignment: Option<Alignment>,
    ) -> Self {
        let fields = schema
            .fields()
            .iter()
            .map(|field| (field.clone(), record.get(field).cloned().unwrap_or_default()))
            .collect();
        let alignment = schema
            .has_alignment()
            .then(|| alignment.unwrap_or_default());

        Self {
            name: name.into(),
            fields,
            alignment,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alignment(&self) -> Option<&Alignment> {
        self.alignment.as_ref()
    }

    /// Value of a column, or `None` when the row's schema lacks it.
    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            NAME => Some(self.name.as_str()),
            LAWFULNESS => self.alignment.as_ref().map(|a| a.lawfulness.as_str()),
            GOODNESS => self.alignment.as_ref().map(|a| a.goodness.as_str()),
            _ => self
                .fields
                .iter()
                .find(|(field, _)| field == column)
                .map(|(_, value)| value.as_str()),
        }
    }

    /// `(Lawfulness, Goodness, Race, Name)`; absent columns sort as empty.
    pub fn sort_key(&self) -> [&str; 4] {
        [
            self.get(LAWFULNESS).unwrap_or_default(),
            self.get(GOODNESS).unwrap_or_default(),
            self.get(RACE).unwrap_or_default(),
            self.name.as_str(),
        ]
    }

    fn cmp_by_key(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Rows sorted by lawfulness, goodness, race, then name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTable {
    schema: TableSchema,
    rows: Vec<MonsterRow>,
}

impl OutputTable {
    pub fn new(schema: TableSchema, mut rows: Vec<MonsterRow>) -> Self {
        rows.sort_by(MonsterRow::cmp_by_key);
        Self { schema, rows }
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[MonsterRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for OutputTable {
    /// Left-aligned columns with a row index, one monster per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.schema.columns();
        let cells: Vec<Vec<&str>> = self
            .rows
            .iter()
            .map(|row| columns.iter().map(|c| row.get(c).unwrap_or_default()).collect())
            .collect();

        let index_width = self.rows.len().saturating_sub(1).to_string().len();
        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain([column.chars().count()])
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        write_line(f, "", index_width, &columns, &widths)?;
        if self.rows.is_empty() {
            return writeln!(f, "(no monsters)");
        }
        for (index, row) in cells.iter().enumerate() {
            write_line(f, &index.to_string(), index_width, row, &widths)?;
        }
        Ok(())
    }
}

fn write_line(
    f: &mut fmt::Formatter<'_>,
    index: &str,
    index_width: usize,
    cells: &[&str],
    widths: &[usize],
) -> fmt::Result {
    let mut line = format!("{index:<index_width$}");
    for (cell, width) in cells.iter().zip(widths) {
        line.push_str("  ");
        line.push_str(&format!("{cell:<width$}"));
    }
    writeln!(f, "{}", line.trim_end())
}

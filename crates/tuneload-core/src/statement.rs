//! Multi-row parameterized INSERT construction.
//!
//! A template names a table and its columns; rendering repeats one `(?,..)`
//! placeholder group per row. Record content only ever travels as bound
//! parameters, never as statement text.

use crate::error::TemplateError;
use crate::store::Param;

/// A row that contributes positional parameters to a bulk insert.
pub trait BulkRow {
    /// Append this row's parameters in the template's column order.
    fn bind(&self, params: &mut Vec<Param>);
}

/// Fixed `INSERT INTO table (cols) VALUES ...` skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertTemplate {
    pub table: &'static str,
    pub columns: &'static [&'static str],
}

impl InsertTemplate {
    /// Parameters contributed by each row.
    pub const fn width(&self) -> usize {
        self.columns.len()
    }

    /// Render the statement text with `groups` value groups.
    pub fn render(&self, groups: usize) -> Result<String, TemplateError> {
        if groups == 0 {
            return Err(TemplateError::NoGroups);
        }
        let group = placeholder_group(self.width());
        let head = format!(
            "INSERT INTO {} ({}) VALUES ",
            self.table,
            self.columns.join(", ")
        );

        let mut sql = String::with_capacity(head.len() + groups * (group.len() + 1));
        sql.push_str(&head);
        for i in 0..groups {
            if i > 0 {
                sql.push(',');
            }
            sql.push_str(&group);
        }
        Ok(sql)
    }
}

/// `(?,?,...,?)` with `width` placeholders
fn placeholder_group(width: usize) -> String {
    let mut group = String::with_capacity(width * 2 + 1);
    group.push('(');
    for i in 0..width {
        if i > 0 {
            group.push(',');
        }
        group.push('?');
    }
    group.push(')');
    group
}

/// Rendered statement plus its flattened parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkStatement {
    pub sql: String,
    pub params: Vec<Param>,
}

/// Build one insert covering `rows`, parameters in row-then-column order.
pub fn build<R: BulkRow>(
    template: &InsertTemplate,
    rows: &[R],
) -> Result<BulkStatement, TemplateError> {
    let sql = template.render(rows.len())?;
    let width = template.width();

    let mut params = Vec::with_capacity(rows.len() * width);
    for row in rows {
        let before = params.len();
        row.bind(&mut params);
        let found = params.len() - before;
        if found != width {
            return Err(TemplateError::Width {
                expected: width,
                found,
            });
        }
    }
    Ok(BulkStatement { sql, params })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIRS: InsertTemplate = InsertTemplate {
        table: "pairs",
        columns: &["a", "b"],
    };

    struct Pair(i64, &'static str);

    impl BulkRow for Pair {
        fn bind(&self, params: &mut Vec<Param>) {
            params.push(self.0.into());
            params.push(self.1.into());
        }
    }

    struct Short;

    impl BulkRow for Short {
        fn bind(&self, params: &mut Vec<Param>) {
            params.push(Param::Null);
        }
    }

    #[test]
    fn render_single_group() {
        assert_eq!(
            PAIRS.render(1).unwrap(),
            "INSERT INTO pairs (a, b) VALUES (?,?)"
        );
    }

    #[test]
    fn render_repeats_groups() {
        assert_eq!(
            PAIRS.render(3).unwrap(),
            "INSERT INTO pairs (a, b) VALUES (?,?),(?,?),(?,?)"
        );
    }

    #[test]
    fn render_zero_groups_rejected() {
        assert_eq!(PAIRS.render(0), Err(TemplateError::NoGroups));
    }

    #[test]
    fn build_flattens_row_then_column() {
        let stmt = build(&PAIRS, &[Pair(1, "x"), Pair(2, "y"), Pair(3, "z")]).unwrap();
        assert_eq!(stmt.sql.matches('?').count(), 6);
        assert_eq!(
            stmt.params,
            vec![
                Param::Int(1),
                Param::from("x"),
                Param::Int(2),
                Param::from("y"),
                Param::Int(3),
                Param::from("z"),
            ]
        );
    }

    #[test]
    fn build_rejects_width_mismatch() {
        let err = build(&PAIRS, &[Short]).unwrap_err();
        assert_eq!(
            err,
            TemplateError::Width {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn placeholder_group_widths() {
        assert_eq!(placeholder_group(1), "(?)");
        assert_eq!(placeholder_group(6), "(?,?,?,?,?,?)");
    }
}

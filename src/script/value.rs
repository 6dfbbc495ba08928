//! Runtime value model: the scalar / row / table rank algebra.
//!
//! Every value is one of three ranks.  A scalar is a single text field with
//! a provenance "marked" flag; a row is an ordered sequence of scalars (a
//! process argument vector); a table is an ordered sequence of rows (a
//! parallel job batch).  Ranks nest strictly — a row's elements are always
//! scalars, never rows — and every value converts totally between ranks.
//!
//! The binary operators are rank-promoting with an asymmetric broadcast: a
//! scalar on the left of `+` is a prefix, on the right a suffix, and the
//! same positional rule selects prefix/suffix matching for `-`, `/`, `%`.

use std::fmt;
use std::path::Path;

use super::error::ErrorKind;

/// Value rank, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Scalar,
    Row,
    Table,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rank::Scalar => "scalar",
            Rank::Row => "row",
            Rank::Table => "table",
        })
    }
}

/// A single text field.
///
/// `marked` is set only by the mark operator and by directory expansion; it
/// survives concatenation as the AND of both operands and affects only the
/// printed form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scalar {
    pub text: String,
    pub marked: bool,
}

impl Scalar {
    pub fn new(text: impl Into<String>) -> Self {
        Scalar {
            text: text.into(),
            marked: false,
        }
    }

    pub fn marked(text: impl Into<String>) -> Self {
        Scalar {
            text: text.into(),
            marked: true,
        }
    }

    /// Glue `s` onto the back; marked flags AND.
    fn append(&mut self, s: &Scalar) {
        self.marked &= s.marked;
        self.text.push_str(&s.text);
    }

    /// Glue `s` onto the front; marked flags AND.
    fn prepend(&mut self, s: &Scalar) {
        self.marked &= s.marked;
        self.text.insert_str(0, &s.text);
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.marked {
            f.write_str("#")?;
        }
        write!(f, "\"{}\"", self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(Scalar),
    Row(Vec<Scalar>),
    Table(Vec<Vec<Scalar>>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Scalar(Scalar::default())
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl Value {
    pub fn rank(&self) -> Rank {
        match self {
            Value::Scalar(_) => Rank::Scalar,
            Value::Row(_) => Rank::Row,
            Value::Table(_) => Rank::Table,
        }
    }

    /// Flatten to a scalar: separator-free concatenation in row order.  The
    /// result carries no mark.
    pub fn into_scalar(self) -> Scalar {
        match self {
            Value::Scalar(s) => s,
            Value::Row(fields) => Scalar::new(join_fields(&fields)),
            Value::Table(rows) => {
                let mut text = String::new();
                for row in &rows {
                    text.push_str(&join_fields(row));
                }
                Scalar::new(text)
            }
        }
    }

    /// Coerce to a row: a scalar becomes a one-field row; a table flattens
    /// to its fields in row order.
    pub fn into_row(self) -> Vec<Scalar> {
        match self {
            Value::Scalar(s) => vec![s],
            Value::Row(fields) => fields,
            Value::Table(rows) => rows.into_iter().flatten().collect(),
        }
    }

    /// Coerce to a table: a scalar becomes one row of one field; each field
    /// of a row becomes its own single-field row.
    pub fn into_table(self) -> Vec<Vec<Scalar>> {
        match self {
            Value::Scalar(s) => vec![vec![s]],
            Value::Row(fields) => fields.into_iter().map(|f| vec![f]).collect(),
            Value::Table(rows) => rows,
        }
    }

    pub fn convert(self, to: Rank) -> Value {
        match to {
            Rank::Scalar => Value::Scalar(self.into_scalar()),
            Rank::Row => Value::Row(self.into_row()),
            Rank::Table => Value::Table(self.into_table()),
        }
    }
}

fn join_fields(fields: &[Scalar]) -> String {
    let mut text = String::with_capacity(fields.iter().map(|f| f.text.len()).sum());
    for f in fields {
        text.push_str(&f.text);
    }
    text
}

// ── Concatenation (`+`) ───────────────────────────────────────────────────────

impl Value {
    /// The `+` operator: rank-promoting concatenation with asymmetric
    /// broadcast.  Total over all nine rank pairs.
    pub fn concat(self, rhs: Value) -> Value {
        match (self, rhs) {
            (Value::Scalar(mut l), Value::Scalar(r)) => {
                l.append(&r);
                Value::Scalar(l)
            }
            // Scalar prefix: glued onto the first field only.
            (Value::Scalar(l), Value::Row(mut r)) => {
                match r.first_mut() {
                    None => r.push(l),
                    Some(first) => first.prepend(&l),
                }
                Value::Row(r)
            }
            // Scalar prefix over a table: first field of every row; a
            // zero-field row gains the scalar as its only field.  An empty
            // table has no rows to prefix and stays empty (asymmetric with
            // table + scalar, which materializes `[[s]]`).
            (Value::Scalar(l), Value::Table(mut rows)) => {
                for row in &mut rows {
                    match row.first_mut() {
                        None => row.push(l.clone()),
                        Some(first) => first.prepend(&l),
                    }
                }
                Value::Table(rows)
            }
            // Scalar suffix: glued onto the last field only.
            (Value::Row(mut l), Value::Scalar(r)) => {
                match l.last_mut() {
                    None => l.push(r),
                    Some(last) => last.append(&r),
                }
                Value::Row(l)
            }
            (Value::Row(mut l), Value::Row(r)) => {
                l.extend(r);
                Value::Row(l)
            }
            // Row prepended onto the front of every row of the table.
            (Value::Row(l), Value::Table(mut rows)) => {
                if rows.is_empty() {
                    rows.push(l);
                } else {
                    for row in &mut rows {
                        row.splice(0..0, l.iter().cloned());
                    }
                }
                Value::Table(rows)
            }
            // Scalar suffix over a table: last field of every row.
            (Value::Table(mut rows), Value::Scalar(r)) => {
                if rows.is_empty() {
                    rows.push(vec![r]);
                } else {
                    for row in &mut rows {
                        match row.last_mut() {
                            None => row.push(r.clone()),
                            Some(last) => last.append(&r),
                        }
                    }
                }
                Value::Table(rows)
            }
            // Row appended onto the end of every row of the table.
            (Value::Table(mut rows), Value::Row(r)) => {
                if rows.is_empty() {
                    rows.push(r);
                } else {
                    for row in &mut rows {
                        row.extend(r.iter().cloned());
                    }
                }
                Value::Table(rows)
            }
            // Row-wise concatenation up to min(row count); surplus rows of
            // the longer side pass through unchanged.
            (Value::Table(mut l), Value::Table(mut r)) => {
                if l.is_empty() {
                    return Value::Table(r);
                }
                if r.is_empty() {
                    return Value::Table(l);
                }
                if l.len() >= r.len() {
                    for (lr, rr) in l.iter_mut().zip(r) {
                        lr.extend(rr);
                    }
                } else {
                    let tail = r.split_off(l.len());
                    for (lr, rr) in l.iter_mut().zip(r) {
                        lr.extend(rr);
                    }
                    l.extend(tail);
                }
                Value::Table(l)
            }
        }
    }
}

// ── Strip (`-`) and filter (`/`, `%`) ─────────────────────────────────────────

/// Which end of a field the pattern is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pos {
    Prefix,
    Suffix,
}

fn field_matches(field: &Scalar, pattern: &str, pos: Pos) -> bool {
    match pos {
        Pos::Prefix => field.text.starts_with(pattern),
        Pos::Suffix => field.text.ends_with(pattern),
    }
}

fn strip_field(field: &mut Scalar, pattern: &str, pos: Pos) {
    if pattern.is_empty() {
        return;
    }
    let stripped = match pos {
        Pos::Prefix => field.text.strip_prefix(pattern),
        Pos::Suffix => field.text.strip_suffix(pattern),
    };
    if let Some(rest) = stripped {
        field.text = rest.to_owned();
    }
}

fn strip_row(row: &mut [Scalar], pattern: &str, pos: Pos) {
    for field in row {
        strip_field(field, pattern, pos);
    }
}

fn filter_row(row: Vec<Scalar>, pattern: &str, pos: Pos, keep: bool) -> Vec<Scalar> {
    row.into_iter()
        .filter(|f| field_matches(f, pattern, pos) == keep)
        .collect()
}

fn filter_table(rows: Vec<Vec<Scalar>>, pattern: &str, pos: Pos, keep: bool) -> Vec<Vec<Scalar>> {
    rows.into_iter()
        .map(|row| filter_row(row, pattern, pos, keep))
        .filter(|row| !row.is_empty())
        .collect()
}

fn drop_empty_rows(rows: Vec<Vec<Scalar>>) -> Vec<Vec<Scalar>> {
    rows.into_iter().filter(|row| !row.is_empty()).collect()
}

impl Value {
    /// The `-` operator: the scalar operand is a pattern stripped off the
    /// matching end of every field of the other operand.  Field and row
    /// counts never change; non-matching fields pass through untouched.
    pub fn strip(self, rhs: Value) -> Result<Value, ErrorKind> {
        match (self, rhs) {
            (Value::Scalar(pat), Value::Row(mut row)) => {
                strip_row(&mut row, &pat.text, Pos::Prefix);
                Ok(Value::Row(row))
            }
            (Value::Scalar(pat), Value::Table(mut rows)) => {
                for row in &mut rows {
                    strip_row(row, &pat.text, Pos::Prefix);
                }
                Ok(Value::Table(rows))
            }
            (Value::Row(mut row), Value::Scalar(pat)) => {
                strip_row(&mut row, &pat.text, Pos::Suffix);
                Ok(Value::Row(row))
            }
            (Value::Table(mut rows), Value::Scalar(pat)) => {
                for row in &mut rows {
                    strip_row(row, &pat.text, Pos::Suffix);
                }
                Ok(Value::Table(rows))
            }
            (l, r) => Err(ErrorKind::UnsupportedOperands {
                op: '-',
                lhs: l.rank(),
                rhs: r.rank(),
            }),
        }
    }

    /// The `/` (keep) and `%` (drop) operators: whole fields are kept or
    /// dropped by the same positional prefix/suffix rule as `-`.  An empty
    /// pattern keeps every field under `/` and discards none under `%`.
    /// Filtering a table always removes zero-field rows, whether the row
    /// was emptied by the filter or arrived empty.
    pub fn filter(self, rhs: Value, keep: bool) -> Result<Value, ErrorKind> {
        let op = if keep { '/' } else { '%' };
        match (self, rhs) {
            (Value::Scalar(pat), Value::Row(row)) => {
                if pat.text.is_empty() {
                    return Ok(Value::Row(row));
                }
                Ok(Value::Row(filter_row(row, &pat.text, Pos::Prefix, keep)))
            }
            (Value::Scalar(pat), Value::Table(rows)) => {
                if pat.text.is_empty() {
                    return Ok(Value::Table(drop_empty_rows(rows)));
                }
                Ok(Value::Table(filter_table(rows, &pat.text, Pos::Prefix, keep)))
            }
            (Value::Row(row), Value::Scalar(pat)) => {
                if pat.text.is_empty() {
                    return Ok(Value::Row(row));
                }
                Ok(Value::Row(filter_row(row, &pat.text, Pos::Suffix, keep)))
            }
            (Value::Table(rows), Value::Scalar(pat)) => {
                if pat.text.is_empty() {
                    return Ok(Value::Table(drop_empty_rows(rows)));
                }
                Ok(Value::Table(filter_table(rows, &pat.text, Pos::Suffix, keep)))
            }
            (l, r) => Err(ErrorKind::UnsupportedOperands {
                op,
                lhs: l.rank(),
                rhs: r.rank(),
            }),
        }
    }
}

// ── Unary operators ───────────────────────────────────────────────────────────

impl Value {
    /// The `#` operator: set the marked flag on every reachable scalar.
    pub fn mark(self) -> Value {
        match self {
            Value::Scalar(mut s) => {
                s.marked = true;
                Value::Scalar(s)
            }
            Value::Row(mut fields) => {
                for f in &mut fields {
                    f.marked = true;
                }
                Value::Row(fields)
            }
            Value::Table(mut rows) => {
                for row in &mut rows {
                    for f in row {
                        f.marked = true;
                    }
                }
                Value::Table(rows)
            }
        }
    }

    /// The `@` operator: treat a scalar's text as a directory path and
    /// return a row of its entry names, sorted bytewise, each marked.
    pub fn expand(self) -> Result<Value, ErrorKind> {
        let s = match self {
            Value::Scalar(s) => s,
            other => {
                return Err(ErrorKind::UnsupportedUnary {
                    op: '@',
                    rank: other.rank(),
                })
            }
        };
        if s.text.is_empty() {
            return Err(ErrorKind::EmptyDirName);
        }
        let entries =
            std::fs::read_dir(Path::new(&s.text)).map_err(|e| ErrorKind::Io(format!("{}: {e}", s.text)))?;
        let mut names: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ErrorKind::Io(format!("{}: {e}", s.text)))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort_unstable();
        Ok(Value::Row(names.into_iter().map(Scalar::marked).collect()))
    }
}

// ── Buffer recycling ──────────────────────────────────────────────────────────

impl Value {
    /// Tear the value down, returning its text buffers to the pool.
    pub fn reclaim(self, pool: &mut crate::pool::BufPool) {
        match self {
            Value::Scalar(s) => pool.reclaim(s.text),
            Value::Row(fields) => {
                for f in fields {
                    pool.reclaim(f.text);
                }
            }
            Value::Table(rows) => {
                for row in rows {
                    for f in row {
                        pool.reclaim(f.text);
                    }
                }
            }
        }
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => write!(f, "{s}"),
            Value::Row(fields) => fmt_row(f, fields),
            Value::Table(rows) => {
                f.write_str("{\n")?;
                for row in rows {
                    f.write_str("  ")?;
                    fmt_row(f, row)?;
                    f.write_str(",\n")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn fmt_row(f: &mut fmt::Formatter<'_>, fields: &[Scalar]) -> fmt::Result {
    f.write_str("[")?;
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{field}")?;
    }
    f.write_str("]")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Value {
        Value::Scalar(Scalar::new(text))
    }

    fn row(fields: &[&str]) -> Value {
        Value::Row(fields.iter().map(|&t| Scalar::new(t)).collect())
    }

    fn table(rows: &[&[&str]]) -> Value {
        Value::Table(
            rows.iter()
                .map(|r| r.iter().map(|&t| Scalar::new(t)).collect())
                .collect(),
        )
    }

    // ── Conversions ───────────────────────────────────────────────────────

    #[test]
    fn scalar_to_row_and_table() {
        assert_eq!(s("x").convert(Rank::Row), row(&["x"]));
        assert_eq!(s("x").convert(Rank::Table), table(&[&["x"]]));
    }

    #[test]
    fn row_to_scalar_concats_without_separator() {
        assert_eq!(row(&["a", "b", "c"]).into_scalar().text, "abc");
    }

    #[test]
    fn flatten_to_scalar_drops_marks() {
        let v = row(&["a", "b"]).mark();
        assert!(!v.into_scalar().marked);
    }

    #[test]
    fn row_to_table_splits_fields() {
        assert_eq!(
            row(&["a", "b"]).convert(Rank::Table),
            table(&[&["a"], &["b"]])
        );
    }

    #[test]
    fn table_to_row_flattens_in_row_order() {
        assert_eq!(
            table(&[&["a", "b"], &["c"]]).convert(Rank::Row),
            row(&["a", "b", "c"])
        );
    }

    #[test]
    fn table_to_scalar_row_major() {
        assert_eq!(table(&[&["a", "b"], &["c"]]).into_scalar().text, "abc");
    }

    #[test]
    fn row_table_row_preserves_order_and_content() {
        let orig = row(&["a", "b", "c"]);
        let back = orig.clone().convert(Rank::Table).convert(Rank::Row);
        assert_eq!(back, orig);
    }

    // ── Concatenation ─────────────────────────────────────────────────────

    #[test]
    fn scalar_scalar_concat() {
        assert_eq!(s("ab").concat(s("cd")), s("abcd"));
    }

    #[test]
    fn scalar_concat_mark_is_and() {
        let both = Value::Scalar(Scalar::marked("a")).concat(Value::Scalar(Scalar::marked("b")));
        assert_eq!(both, Value::Scalar(Scalar::marked("ab")));
        let one = Value::Scalar(Scalar::marked("a")).concat(s("b"));
        assert_eq!(one, s("ab"));
    }

    #[test]
    fn scalar_prefixes_first_field_of_row() {
        assert_eq!(s("p").concat(row(&["a", "b"])), row(&["pa", "b"]));
    }

    #[test]
    fn scalar_into_empty_row() {
        assert_eq!(s("p").concat(row(&[])), row(&["p"]));
    }

    #[test]
    fn scalar_prefixes_every_row_of_table() {
        assert_eq!(
            s("p").concat(table(&[&["a", "x"], &["b"]])),
            table(&[&["pa", "x"], &["pb"]])
        );
    }

    #[test]
    fn scalar_into_zero_field_table_row() {
        let t = Value::Table(vec![vec![], vec![Scalar::new("a")]]);
        assert_eq!(s("p").concat(t), table(&[&["p"], &["pa"]]));
    }

    #[test]
    fn scalar_into_empty_table_stays_empty() {
        assert_eq!(s("p").concat(table(&[])), table(&[]));
        // The asymmetry is deliberate: a scalar suffix on an empty table
        // does materialize a row.
        assert_eq!(table(&[]).concat(s("p")), table(&[&["p"]]));
    }

    #[test]
    fn row_suffixes_last_field() {
        assert_eq!(row(&["a", "b"]).concat(s(".o")), row(&["a", "b.o"]));
    }

    #[test]
    fn row_row_concat() {
        assert_eq!(row(&["a"]).concat(row(&["b", "c"])), row(&["a", "b", "c"]));
    }

    #[test]
    fn row_prepends_to_every_table_row() {
        assert_eq!(
            row(&["cc", "-c"]).concat(table(&[&["a.c"], &["b.c"]])),
            table(&[&["cc", "-c", "a.c"], &["cc", "-c", "b.c"]])
        );
    }

    #[test]
    fn row_into_empty_table() {
        assert_eq!(row(&["a", "b"]).concat(table(&[])), table(&[&["a", "b"]]));
    }

    #[test]
    fn table_suffixes_last_field_of_every_row() {
        assert_eq!(
            table(&[&["a"], &["b", "c"]]).concat(s(".o")),
            table(&[&["a.o"], &["b", "c.o"]])
        );
    }

    #[test]
    fn table_appends_row_to_every_row() {
        assert_eq!(
            table(&[&["a"], &["b"]]).concat(row(&["-o", "out"])),
            table(&[&["a", "-o", "out"], &["b", "-o", "out"]])
        );
    }

    #[test]
    fn table_table_rowwise_with_passthrough() {
        assert_eq!(
            table(&[&["a"], &["b"], &["c"]]).concat(table(&[&["1"], &["2"]])),
            table(&[&["a", "1"], &["b", "2"], &["c"]])
        );
        assert_eq!(
            table(&[&["a"]]).concat(table(&[&["1"], &["2"]])),
            table(&[&["a", "1"], &["2"]])
        );
    }

    // ── Strip ─────────────────────────────────────────────────────────────

    #[test]
    fn scalar_row_strip_is_prefix() {
        let v = s("lib").strip(row(&["libfoo", "bar", "lib"])).unwrap();
        assert_eq!(v, row(&["foo", "bar", ""]));
    }

    #[test]
    fn row_scalar_strip_is_suffix() {
        let v = row(&["foo.c", "bar.h", "baz.c"]).strip(s(".c")).unwrap();
        assert_eq!(v, row(&["foo", "bar.h", "baz"]));
    }

    #[test]
    fn strip_never_changes_counts() {
        let v = s("x").strip(table(&[&["xa", "b"], &["c"]])).unwrap();
        assert_eq!(v, table(&[&["a", "b"], &["c"]]));
    }

    #[test]
    fn strip_empty_pattern_is_identity() {
        let v = row(&["a", "b"]).strip(s("")).unwrap();
        assert_eq!(v, row(&["a", "b"]));
    }

    #[test]
    fn scalar_scalar_strip_unsupported() {
        let e = s("bin").strip(s("in")).unwrap_err();
        assert_eq!(
            e,
            ErrorKind::UnsupportedOperands {
                op: '-',
                lhs: Rank::Scalar,
                rhs: Rank::Scalar
            }
        );
    }

    #[test]
    fn row_row_strip_unsupported() {
        assert!(row(&["a"]).strip(row(&["b"])).is_err());
    }

    // ── Filter ────────────────────────────────────────────────────────────

    #[test]
    fn filter_keep_suffix() {
        let v = row(&["a.c", "b.h", "c.c"]).filter(s(".c"), true).unwrap();
        assert_eq!(v, row(&["a.c", "c.c"]));
    }

    #[test]
    fn filter_drop_suffix() {
        let v = row(&["a.c", "b.h", "c.c"]).filter(s(".c"), false).unwrap();
        assert_eq!(v, row(&["b.h"]));
    }

    #[test]
    fn filter_keep_prefix() {
        let v = s("lib").filter(row(&["liba", "b", "libc"]), true).unwrap();
        assert_eq!(v, row(&["liba", "libc"]));
    }

    #[test]
    fn filter_partitions_row() {
        let r = row(&["a.c", "b.h", "c.c", "d"]);
        let kept = r.clone().filter(s(".c"), true).unwrap().into_row();
        let dropped = r.clone().filter(s(".c"), false).unwrap().into_row();
        assert_eq!(kept.len() + dropped.len(), 4);
        let mut union = kept;
        union.extend(dropped);
        for f in r.into_row() {
            assert!(union.contains(&f));
        }
    }

    #[test]
    fn filter_table_drops_emptied_rows() {
        let v = table(&[&["a.c", "b.h"], &["x.h"]])
            .filter(s(".c"), true)
            .unwrap();
        assert_eq!(v, table(&[&["a.c"]]));
    }

    #[test]
    fn empty_pattern_keeps_all_and_discards_none() {
        let r = row(&["a", "b"]);
        assert_eq!(r.clone().filter(s(""), true).unwrap(), r);
        assert_eq!(r.clone().filter(s(""), false).unwrap(), r);
    }

    #[test]
    fn empty_pattern_still_drops_empty_table_rows() {
        let t = Value::Table(vec![vec![Scalar::new("a")], vec![], vec![Scalar::new("b")]]);
        assert_eq!(t.clone().filter(s(""), true).unwrap(), table(&[&["a"], &["b"]]));
        assert_eq!(t.clone().filter(s(""), false).unwrap(), table(&[&["a"], &["b"]]));
        assert_eq!(s("").filter(t, true).unwrap(), table(&[&["a"], &["b"]]));
    }

    #[test]
    fn filter_scalar_scalar_unsupported() {
        let e = s("a").filter(s("b"), true).unwrap_err();
        assert!(matches!(e, ErrorKind::UnsupportedOperands { op: '/', .. }));
        let e = s("a").filter(s("b"), false).unwrap_err();
        assert!(matches!(e, ErrorKind::UnsupportedOperands { op: '%', .. }));
    }

    // ── Unary ─────────────────────────────────────────────────────────────

    #[test]
    fn mark_is_recursive_and_shape_preserving() {
        let v = table(&[&["a"], &["b", "c"]]).mark();
        match v {
            Value::Table(rows) => {
                assert_eq!(rows.len(), 2);
                assert!(rows.iter().flatten().all(|f| f.marked));
            }
            _ => panic!("shape changed"),
        }
    }

    #[test]
    fn expand_lists_sorted_marked_entries() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.txt", "c"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let v = s(dir.path().to_str().unwrap()).expand().unwrap();
        match v {
            Value::Row(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.text.as_str()).collect();
                assert_eq!(names, ["a.txt", "b.txt", "c"]);
                assert!(fields.iter().all(|f| f.marked));
            }
            _ => panic!("expected row"),
        }
    }

    #[test]
    fn expand_empty_path_fails() {
        assert_eq!(s("").expand().unwrap_err(), ErrorKind::EmptyDirName);
    }

    #[test]
    fn expand_missing_dir_fails() {
        assert!(matches!(
            s("/definitely/not/a/dir").expand().unwrap_err(),
            ErrorKind::Io(_)
        ));
    }

    #[test]
    fn expand_row_unsupported() {
        assert!(matches!(
            row(&["a"]).expand().unwrap_err(),
            ErrorKind::UnsupportedUnary {
                op: '@',
                rank: Rank::Row
            }
        ));
    }

    // ── Display ───────────────────────────────────────────────────────────

    #[test]
    fn display_forms() {
        assert_eq!(s("x").to_string(), "\"x\"");
        assert_eq!(Value::Scalar(Scalar::marked("x")).to_string(), "#\"x\"");
        assert_eq!(row(&["a", "b"]).to_string(), "[\"a\", \"b\"]");
        assert_eq!(
            table(&[&["a"], &["b"]]).to_string(),
            "{\n  [\"a\"],\n  [\"b\"],\n}"
        );
    }
}

//! Row records and the delimited-text codec for backing files.
//!
//! A backing file is plain delimited text: a header line naming the fields,
//! then one line per row. Values that embed the delimiter, a quote, or a
//! line break are quoted, with inner quotes doubled.
//!
//! Insert-time records use a different shape on purpose: a single
//! whitespace-delimited string whose tokens are zipped positionally against
//! the table's declared fields. Values with embedded whitespace are
//! therefore unsupported on the insert path.

use crate::config::{FIELD_DELIMITER, QUOTE};
use crate::error::{Error, Result};

/// One row of a table: an ordered mapping from field name to string value.
///
/// Values stay strings at rest; numeric interpretation happens on demand in
/// the query and aggregation paths. Field order is preserved so joined rows
/// keep a stable shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets `name` to `value`, replacing it in place when present and
    /// appending it otherwise.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, slot)) => *slot = value.into(),
            None => self.fields.push((name.to_string(), value.into())),
        }
    }

    /// Removes `name` and returns its value. Remaining fields keep their
    /// relative order.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.fields.iter().position(|(field, _)| field == name)?;
        Some(self.fields.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        }
    }
}

/// Splits a whitespace-delimited record string and zips the tokens against
/// `fields`. The token count must match the declared field count.
pub fn decode_record(fields: &[String], text: &str) -> Result<Row> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != fields.len() {
        return Err(Error::MalformedRecord(format!(
            "expected {} fields, got {}: '{}'",
            fields.len(),
            tokens.len(),
            text
        )));
    }
    Ok(fields.iter().map(String::as_str).zip(tokens).collect())
}

/// Serializes the full row sequence as delimited text with a header line.
pub fn encode_all(fields: &[String], rows: &[Row]) -> String {
    let mut out = String::new();
    out.push_str(&encode_line(fields.iter().map(String::as_str)));
    out.push('\n');
    for row in rows {
        out.push_str(&encode_line(
            fields.iter().map(|field| row.get(field).unwrap_or("")),
        ));
        out.push('\n');
    }
    out
}

/// Parses a delimited file with header into rows.
///
/// The header must equal the declared field list and every row must carry
/// the declared field count. Blank lines are skipped; an empty file decodes
/// to no rows.
pub fn decode_file(fields: &[String], contents: &str) -> Result<Vec<Row>> {
    let mut lines = contents.lines().filter(|line| !line.trim().is_empty());
    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };

    let header_fields = split_line(header);
    if header_fields != fields {
        return Err(Error::MalformedRecord(format!(
            "header [{}] does not match declared fields [{}]",
            header_fields.join(", "),
            fields.join(", ")
        )));
    }

    let mut rows = Vec::new();
    for line in lines {
        let values = split_line(line);
        if values.len() != fields.len() {
            return Err(Error::MalformedRecord(format!(
                "expected {} fields, got {}: '{}'",
                fields.len(),
                values.len(),
                line
            )));
        }
        rows.push(fields.iter().map(String::as_str).zip(values).collect());
    }
    Ok(rows)
}

fn encode_line<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::new();
    for (i, value) in values.enumerate() {
        if i > 0 {
            line.push(FIELD_DELIMITER);
        }
        line.push_str(&quote_value(value));
    }
    line
}

/// Quotes a value when it embeds the delimiter, a quote, or a line break;
/// inner quotes are doubled.
fn quote_value(value: &str) -> String {
    if value.contains(FIELD_DELIMITER)
        || value.contains(QUOTE)
        || value.contains('\n')
        || value.contains('\r')
    {
        format!("{QUOTE}{}{QUOTE}", value.replace(QUOTE, "\"\""))
    } else {
        value.to_string()
    }
}

fn split_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == QUOTE {
                if chars.peek() == Some(&QUOTE) {
                    chars.next();
                    current.push(QUOTE);
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == QUOTE {
            in_quotes = true;
        } else if ch == FIELD_DELIMITER {
            values.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    values.push(current);
    values
}

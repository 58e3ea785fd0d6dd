use crate::domain::model::PriceRow;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Splits one line on commas outside double quotes. `""` inside a quoted
/// field is a literal quote. Every field is trimmed after unescaping.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields.into_iter().map(|f| f.trim().to_string()).collect()
}

/// Column positions resolved from the header line. A missing column is
/// `None` and reads as empty text (or a zero price) for every row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    pub brand: Option<usize>,
    pub model: Option<usize>,
    pub r#type: Option<usize>,
    pub price: Option<usize>,
}

impl HeaderIndex {
    pub fn resolve(header: &[String]) -> Self {
        let names: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
        let position = |name: &str| names.iter().position(|h| h == name);

        Self {
            brand: position("brand"),
            model: position("model"),
            r#type: position("type"),
            price: position("price"),
        }
    }

    pub fn missing_columns(&self) -> Vec<&'static str> {
        [
            ("brand", self.brand),
            ("model", self.model),
            ("type", self.r#type),
            ("price", self.price),
        ]
        .into_iter()
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    fn read_row(&self, fields: &[String]) -> PriceRow {
        PriceRow::normalize(
            cell(fields, self.brand, ""),
            cell(fields, self.model, ""),
            cell(fields, self.r#type, ""),
            cell(fields, self.price, "0"),
        )
    }
}

fn cell<'a>(fields: &'a [String], idx: Option<usize>, fallback: &'static str) -> &'a str {
    idx.and_then(|i| fields.get(i))
        .map(String::as_str)
        .unwrap_or(fallback)
}

/// Non-blank lines of a document with any of `\n`, `\r\n` or `\r` endings.
fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == '\n' || c == '\r')
        .filter(|line| !line.trim().is_empty())
}

/// Parsing never fails. Blank lines are skipped, the first remaining line is
/// the header, and rows are matched to `brand`, `model`, `type` and `price`
/// by header name.
pub fn parse(text: &str) -> Vec<PriceRow> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let mut lines = content_lines(text);

    let Some(header_line) = lines.next() else {
        tracing::debug!("Empty price sheet, no rows to parse");
        return Vec::new();
    };

    let header = HeaderIndex::resolve(&split_line(header_line));
    let missing = header.missing_columns();
    if !missing.is_empty() {
        tracing::warn!("Price sheet header is missing columns: {}", missing.join(", "));
    }
    tracing::debug!("Resolved header: {:?}", header);

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for line in lines {
        let row = header.read_row(&split_line(line));
        if row.is_degenerate() {
            dropped += 1;
            continue;
        }
        rows.push(row);
    }

    tracing::debug!("Parsed {} rows ({} without brand and model dropped)", rows.len(), dropped);
    rows
}

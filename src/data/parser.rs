use std::collections::HashMap;

/// Numbers read from a free-text or CSV body, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedValues {
    pub values: Vec<f64>,
    /// Labels from a skipped header row, if one was detected.
    pub header: Option<Vec<String>>,
}

/// Candidate field delimiters. Whitespace and the other delimiters still
/// separate tokens inside a field, so `"1 2, 3;4"` reads as four values.
const DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// Parse numeric values separated by commas, semicolons, tabs, spaces or
/// newlines. A first row made only of non-numeric cells is treated as a
/// header and skipped. Lines starting with `#` are ignored.
pub fn parse_values(text: &str) -> Result<ParsedValues, String> {
    let delimiter = detect_delimiter(text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut values = Vec::new();
    let mut header = None;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format!("Cannot read row {}: {e}", row_idx + 1))?;
        let tokens: Vec<&str> = record
            .iter()
            .flat_map(|field| field.split(is_separator))
            .filter(|token| !token.is_empty())
            .collect();
        if tokens.is_empty() {
            continue;
        }

        if row_idx == 0 && values.is_empty() && is_header_row(&tokens) {
            header = Some(tokens.iter().map(|t| t.to_string()).collect());
            continue;
        }

        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(row_idx as u64 + 1);
        for token in tokens {
            let value = token
                .parse::<f64>()
                .map_err(|_| format!("'{token}' on line {line} is not a number"))?;
            values.push(value);
        }
    }

    Ok(ParsedValues { values, header })
}

/// Pick the delimiter that occurs most often, defaulting to a comma.
fn detect_delimiter(text: &str) -> u8 {
    let mut counts: HashMap<u8, usize> = HashMap::new();
    for b in text.bytes() {
        if DELIMITERS.contains(&b) {
            *counts.entry(b).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .max_by_key(|&(d, c)| (c, d == b','))
        .map(|(d, _)| d)
        .unwrap_or(b',')
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || (c.is_ascii() && DELIMITERS.contains(&(c as u8)))
}

fn is_header_row(tokens: &[&str]) -> bool {
    tokens.iter().all(|t| t.parse::<f64>().is_err())
}

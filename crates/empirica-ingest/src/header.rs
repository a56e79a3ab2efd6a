//! Header cell normalization shared by the CSV and spreadsheet readers.

/// Trim header cells, collapse inner whitespace and name blank cells
/// `column_<n>` (1-based position).
pub(crate) fn header_names<'a, I>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    cells
        .into_iter()
        .enumerate()
        .map(|(idx, cell)| {
            let normalized = cell
                .trim()
                .trim_matches('\u{feff}')
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            if normalized.is_empty() {
                format!("column_{}", idx + 1)
            } else {
                normalized
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_headers_get_positional_names() {
        assert_eq!(
            header_names(["  firm id ", "", "year"]),
            vec!["firm id", "column_2", "year"]
        );
    }

    #[test]
    fn inner_whitespace_is_collapsed() {
        assert_eq!(header_names(["total   assets"]), vec!["total assets"]);
    }
}

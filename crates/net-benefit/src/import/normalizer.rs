pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value
        .replace(['\u{feff}', '\u{200b}'], "")
        .replace('\u{ff05}', "%")
        .replace('\u{ff08}', "(")
        .replace('\u{ff09}', ")");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

/// Cell text with spreadsheet artifacts removed. Unicode minus signs become ASCII.
pub(crate) fn normalize_cell(value: &str) -> String {
    value
        .replace(['\u{feff}', '\u{200b}'], "")
        .replace(['\u{2212}', '\u{ff0d}'], "-")
        .trim()
        .to_string()
}

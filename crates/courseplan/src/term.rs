//! Human-readable names for registrar term codes.

/// Returns the display name of a term code such as `"202008"` ->
/// `"Fall 2020"`.
///
/// The first four characters are the year and the rest is the semester
/// number. Unknown semester numbers produce `"Unknown <year>"`.
pub fn semester_name(term: &str) -> String {
    let split = term.char_indices().nth(4).map_or(term.len(), |(i, _)| i);
    let (year, semester) = term.split_at(split);
    format!("{} {}", season(leading_number(semester)), year)
}

fn season(semester: Option<u32>) -> &'static str {
    match semester {
        Some(1) => "Winter",
        Some(2 | 3) => "Spring",
        Some(5 | 6) => "Summer",
        Some(8 | 9) => "Fall",
        _ => "Unknown",
    }
}

/// Parses the leading run of digits after optional whitespace, so `"08"`
/// and `"8x"` both read as 8.
fn leading_number(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(text.len(), |(i, _)| i);
    text[..end].parse().ok()
}

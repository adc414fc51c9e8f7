const QUERY_PREFIX: &str = "professional profile search: ";

/// Build a human-readable description of how a person's profile would be
/// looked up. No request is made; the string only ends up in the report.
///
/// Segments are emitted in a fixed order (name, quoted company, position,
/// `language:` tag) and any absent or empty segment is left out.
pub fn build_search_query(
    name: &str,
    company: Option<&str>,
    position: Option<&str>,
    language: Option<&str>,
) -> String {
    let mut parts = vec![name.to_string()];

    if let Some(company) = company.filter(|c| !c.is_empty()) {
        parts.push(format!("\"{}\"", company));
    }

    if let Some(position) = position.filter(|p| !p.is_empty()) {
        parts.push(position.to_string());
    }

    if let Some(language) = language.filter(|l| !l.is_empty()) {
        parts.push(format!("language:{}", language));
    }

    format!("{}{}", QUERY_PREFIX, parts.join(" "))
}

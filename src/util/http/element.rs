use scraper::Selector;

/// Extracts the text value of an element selected by a given CSS selector.
///
/// Returns `None` when the selector does not parse or matches nothing.
pub fn parse_value(element: &scraper::ElementRef, css_selector: &str) -> Option<String> {
    match Selector::parse(css_selector) {
        Ok(s) => element
            .select(&s)
            .next()
            .map(|v| v.text().collect::<String>()),
        Err(_) => None,
    }
}

/// Like [`parse_value`] but trims the result and never fails.
pub fn parse_to_string(element: &scraper::ElementRef, css_selector: &str) -> String {
    parse_value(element, css_selector)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

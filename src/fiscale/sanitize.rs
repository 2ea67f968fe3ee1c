use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("regex tag HTML"));

/// Sostituisce i caratteri speciali HTML con le rispettive entità.
/// `&` va sostituito per primo, altrimenti le entità prodotte dopo verrebbero riscappate.
pub fn sanitize_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Rimuove tutti i tag `<...>` senza inserire separatori
pub fn strip_html_tags(s: &str) -> String {
    HTML_TAG_RE.replace_all(s, "").into_owned()
}

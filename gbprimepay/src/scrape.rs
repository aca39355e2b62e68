//! Hidden-input scraping.
//!
//! GB Prime Pay answers several calls with an HTML page instead of JSON. The
//! values a caller needs live in `<input type="hidden">` elements of that
//! page. [`HiddenFieldScraper`] pulls them out into a [`FormFields`] bag.
//!
//! Extraction is regex based. Call sites only see [`HiddenFieldScraper`]
//! and the two prepared scrapers, so the strategy can change in one place.

use std::sync::LazyLock;

use regex::Regex;

use crate::form::FormFields;

/// Hidden inputs on the TrueMoney OTP pages: `type`, `name`, `value` in order.
pub static OTP_FORM_SCRAPER: LazyLock<HiddenFieldScraper> = LazyLock::new(|| {
    HiddenFieldScraper::new(
        Regex::new(
            r#"(?im)<input\s+type="hidden"\s+name="(?P<name>[^"]+)"\s+value="(?P<value>[^"]+)"\s*/?>"#,
        )
        .expect("OTP form pattern is valid"),
    )
});

/// Hidden inputs on the Bangkok Bank redirect page.
///
/// Inputs opened directly after `<!--` are commented out and skipped. The
/// `id` attribute between `name` and `value` is optional.
pub static BBL_FORM_SCRAPER: LazyLock<HiddenFieldScraper> = LazyLock::new(|| {
    HiddenFieldScraper::new(
        Regex::new(
            r#"(?im)(?P<comment><!--)?<input\s+type="hidden"\s+name="(?P<name>[^"]+)"(?:\s+id="[^"]*")?\s+value="(?P<value>[^"]+)"\s*/?>"#,
        )
        .expect("BBL form pattern is valid"),
    )
});

/// Collects `name`/`value` pairs from every match of a pattern.
///
/// The pattern must define the named groups `name` and `value`. If it also
/// defines `comment`, matches where that group participates are ignored.
/// Matches are non-overlapping and visited in document order; on duplicate
/// names the last match wins.
#[derive(Debug, Clone)]
pub struct HiddenFieldScraper {
    pattern: Regex,
}

impl HiddenFieldScraper {
    /// Wraps a pattern with `name` and `value` capture groups.
    #[must_use]
    pub const fn new(pattern: Regex) -> Self {
        Self { pattern }
    }

    /// Returns the underlying pattern.
    #[must_use]
    pub const fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Scrapes every matching field out of `body`.
    #[must_use]
    pub fn scrape(&self, body: &str) -> FormFields {
        let mut fields = FormFields::new();
        for captures in self.pattern.captures_iter(body) {
            if captures.name("comment").is_some() {
                continue;
            }
            if let (Some(name), Some(value)) = (captures.name("name"), captures.name("value")) {
                fields.insert(name.as_str(), value.as_str());
            }
        }
        fields
    }
}

/// Scrapes the hidden inputs of a TrueMoney OTP page.
#[must_use]
pub fn scrape_otp_form(body: &str) -> FormFields {
    OTP_FORM_SCRAPER.scrape(body)
}

/// Scrapes the uncommented hidden inputs of a Bangkok Bank redirect page.
#[must_use]
pub fn scrape_bbl_form(body: &str) -> FormFields {
    BBL_FORM_SCRAPER.scrape(body)
}

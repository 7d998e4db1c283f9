//! Greeting message lookup
//!
//! Thin wrapper over the rust-i18n catalog. Every lookup takes the UI
//! culture explicitly; there is no ambient "current locale" to consult, so
//! concurrent requests cannot bleed into each other.

use chrono::{DateTime, Local, Locale};
use rust_i18n::t;

#[derive(Debug, Clone, Default)]
pub struct GreetingService;

impl GreetingService {
    pub fn new() -> Self {
        Self
    }

    /// The localized greeting for the given UI culture.
    pub fn greeting(&self, ui_culture: &str) -> String {
        self.lookup("greeting", ui_culture)
            .unwrap_or_else(|| self.missing_message(ui_culture))
    }

    /// Catalog lookup. `None` when the key exists in no locale.
    pub fn lookup(&self, key: &str, ui_culture: &str) -> Option<String> {
        let text = t!(key, locale = ui_culture);
        // rust-i18n hands the key path back for unknown keys
        if text == key { None } else { Some(text.into_owned()) }
    }

    /// Localized "message unavailable" text shown when a lookup misses.
    pub fn missing_message(&self, ui_culture: &str) -> String {
        t!("greeting_error", locale = ui_culture).into_owned()
    }
}

/// Long-form date in the request's formatting culture, e.g.
/// "Thursday, 6 August 2026" for "en".
pub fn format_long_date(date: DateTime<Local>, culture: &str) -> String {
    date.format_localized("%A, %-d %B %Y", date_locale(culture)).to_string()
}

fn date_locale(culture: &str) -> Locale {
    // chrono knows POSIX-style names ("en_US"); region-less tags map to a
    // representative region, anything else to the neutral POSIX locale.
    let posix = culture.replace('-', "_");
    Locale::try_from(posix.as_str()).unwrap_or_else(|_| {
        match culture.split('-').next().unwrap_or_default() {
            "en" => Locale::en_US,
            "vi" => Locale::vi_VN,
            _ => Locale::POSIX,
        }
    })
}

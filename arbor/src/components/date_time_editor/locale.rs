//! Built-in locales for display formatting.
//!
//! Month, weekday and AM/PM names come from chrono's locale data; each
//! locale here only adds the patterns behind the named formats.

use log::warn;

/// A chrono locale plus the patterns used for named formats.
#[derive(Debug, PartialEq, Eq)]
pub struct Locale {
    pub tag: &'static str,
    pub names: chrono::Locale,
    /// short, medium, long, full
    pub date_formats: [&'static str; 4],
    /// short, medium, long, full
    pub time_formats: [&'static str; 4],
    /// Joins a date (`{1}`) and a time (`{0}`): short, medium, long, full.
    pub date_time_formats: [&'static str; 4],
}

pub static EN_US: Locale = Locale {
    tag: "en-US",
    names: chrono::Locale::en_US,
    date_formats: ["M/d/yy", "MMM d, y", "MMMM d, y", "EEEE, MMMM d, y"],
    time_formats: ["h:mm a", "h:mm:ss a", "h:mm:ss a", "h:mm:ss a"],
    date_time_formats: ["{1}, {0}", "{1}, {0}", "{1} 'at' {0}", "{1} 'at' {0}"],
};

pub static EN_GB: Locale = Locale {
    tag: "en-GB",
    names: chrono::Locale::en_GB,
    date_formats: ["dd/MM/y", "d MMM y", "d MMMM y", "EEEE, d MMMM y"],
    time_formats: ["HH:mm", "HH:mm:ss", "HH:mm:ss", "HH:mm:ss"],
    date_time_formats: ["{1}, {0}", "{1}, {0}", "{1} 'at' {0}", "{1} 'at' {0}"],
};

pub static DE_DE: Locale = Locale {
    tag: "de-DE",
    names: chrono::Locale::de_DE,
    date_formats: ["dd.MM.yy", "dd.MM.y", "d. MMMM y", "EEEE, d. MMMM y"],
    time_formats: ["HH:mm", "HH:mm:ss", "HH:mm:ss", "HH:mm:ss"],
    date_time_formats: ["{1}, {0}", "{1}, {0}", "{1} 'um' {0}", "{1} 'um' {0}"],
};

pub static BG_BG: Locale = Locale {
    tag: "bg-BG",
    names: chrono::Locale::bg_BG,
    date_formats: [
        "d.MM.yy 'г'.",
        "d.MM.y 'г'.",
        "d MMMM y 'г'.",
        "EEEE, d MMMM y 'г'.",
    ],
    time_formats: ["H:mm 'ч'.", "H:mm:ss 'ч'.", "H:mm:ss 'ч'.", "H:mm:ss 'ч'."],
    date_time_formats: ["{1}, {0}", "{1}, {0}", "{1}, {0}", "{1}, {0}"],
};

static LOCALES: [&Locale; 4] = [&EN_US, &EN_GB, &DE_DE, &BG_BG];

impl Locale {
    /// Look up a built-in locale by tag.
    ///
    /// Matching ignores case and accepts `_` as separator. A bare language
    /// (`"de"`) picks the first locale for it. Unknown tags fall back to
    /// `en-US`.
    pub fn from_tag(tag: &str) -> &'static Locale {
        let wanted = tag.replace('_', "-").to_ascii_lowercase();

        if let Some(locale) = LOCALES
            .iter()
            .find(|l| l.tag.to_ascii_lowercase() == wanted)
        {
            return *locale;
        }

        let language = wanted.split('-').next().unwrap_or_default();
        if let Some(locale) = LOCALES.iter().find(|l| {
            l.tag
                .split('-')
                .next()
                .is_some_and(|lang| lang.eq_ignore_ascii_case(language))
        }) {
            return *locale;
        }

        warn!("Unknown locale '{}', falling back to {}", tag, EN_US.tag);
        &EN_US
    }
}

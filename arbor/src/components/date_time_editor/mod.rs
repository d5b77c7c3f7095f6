//! Masked date/time editor.
//!
//! The editor turns a date format such as `dd-MM-yy` into a fixed-width
//! mask (`__-__-__`) and keeps an optional committed value in sync with
//! it. Individual fields are spun with Up/Down or the wheel, typed in
//! overwrite mode, and resolved back into a value on blur.
//!
//! # Example
//!
//! ```
//! use arbor::components::date_time_editor::{DateTimeEditor, DateTimeEditorConfig};
//! use arbor::components::events::ComponentEvents;
//! use chrono::NaiveDate;
//! use spindle::{Key, KeyCombo};
//!
//! let value = NaiveDate::from_ymd_opt(2011, 10, 20)
//!     .unwrap()
//!     .and_hms_opt(0, 0, 0)
//!     .unwrap();
//! let mut editor = DateTimeEditor::new(DateTimeEditorConfig::new("dd-MM-yy").display_format("dd.MM.y"))
//!     .with_value(value);
//!
//! editor.on_focus();
//! assert_eq!(editor.text(), "20-10-11");
//!
//! editor.on_key(&KeyCombo::key(Key::Up));
//! assert_eq!(editor.text(), "21-10-11");
//!
//! editor.on_blur();
//! assert_eq!(editor.text(), "21.10.2011");
//! ```

mod config;
mod date_math;
mod disabled;
mod error;
mod events;
mod format;
mod locale;
mod parse;
mod part;
mod state;

pub use config::DateTimeEditorConfig;
pub use date_math::{
    days_in_month, spin_am_pm, spin_date, spin_hours, spin_minutes, spin_month, spin_seconds,
    spin_year,
};
pub use disabled::{is_date_in_ranges, DateRange};
pub use error::ValidationError;
pub use events::{DateTimeEditorEventArgs, DisabledDateEventArgs};
pub use format::{format_date, resolve_named_format};
pub use locale::{Locale, BG_BG, DE_DE, EN_GB, EN_US};
pub use parse::{parse_date_from_mask, resolve_two_digit_year};
pub use part::{mask_pattern, normalize_format, parse_format, DatePart, DatePartInfo, FormatError};
pub use state::{Clock, DateTimeEditor};

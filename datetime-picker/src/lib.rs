//! Popover date & time picker for the Tessera UI framework.
//!
//! # Usage
//!
//! The crate provides one high-level widget, [`date_time_picker`], built on
//! two reusable pieces: a pure calendar-grid generator ([`calendar`]) and an
//! anchored, dismissable overlay ([`popover`]).
//!
//! ```
//! # use tessera_ui::tessera;
//! # #[tessera]
//! # fn component() {
//! use chrono::NaiveDate;
//! use tessera_datetime_picker::date_time_picker::{DateTimePickerArgs, date_time_picker};
//! # use tessera_components::theme::{MaterialTheme, material_theme};
//!
//! # material_theme(MaterialTheme::default, || {
//! let initial = NaiveDate::from_ymd_opt(2023, 11, 30)
//!     .and_then(|date| date.and_hms_opt(12, 0, 0))
//!     .expect("valid seed value");
//!
//! date_time_picker(
//!     &DateTimePickerArgs::default()
//!         .initial(initial)
//!         .on_change(|value| {
//!             // The composite timestamp: picked day + held HH:MM time.
//!             println!("picked {value}");
//!         }),
//! );
//! # });
//! # }
//! # component();
//! ```
//!
//! The host callback fires on day selection and on "Today"; cancel, pure
//! calendar browsing, and time-only edits do not notify.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod calendar;
pub mod date_time_picker;
pub mod popover;

pub use date_time_picker::{DateTimePickerArgs, DateTimePickerState, date_time_picker};

//! Combined date & time picker widget.
//!
//! ## Usage
//!
//! Drop [`date_time_picker`] into a page to let users pick a calendar date
//! and a clock time as one composite timestamp. The widget opens a popover
//! with a two-month calendar, a year shortcut rail, and an editable `HH:MM`
//! field; the host is notified through `on_change` whenever a day is picked
//! or "Today" is invoked.
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use derive_setters::Setters;
use thiserror::Error;
use tessera_ui::{
    CallbackWith, Color, DimensionValue, Dp, Modifier, State, key, remember, tessera, use_context,
};

use tessera_components::{
    alignment::{Alignment, CrossAxisAlignment, MainAxisAlignment},
    column::{ColumnArgs, column},
    divider::{DividerArgs, horizontal_divider},
    modifier::ModifierExt,
    row::{RowArgs, row},
    scrollable::{ScrollBarBehavior, ScrollBarLayout, ScrollableArgs, scrollable},
    shape_def::Shape,
    spacer::{SpacerArgs, spacer},
    surface::{SurfaceArgs, SurfaceStyle, surface},
    text::{TextArgs, text},
    text_input::{TextInputArgs, text_input},
    theme::MaterialTheme,
};

use crate::{
    calendar::{
        CalendarDay, DAYS_PER_WEEK, WEEKDAY_LABELS, first_of_month, month_grid, month_title,
        shift_months, with_year,
    },
    popover::{
        PopoverAlignment, PopoverAnchorArgs, PopoverController, PopoverProviderArgs,
        popover_anchor, popover_provider,
    },
};

const DAY_CELL_SIZE: Dp = Dp(40.0);
const DAY_CELL_RADIUS: Dp = Dp(10.0);
const GRID_WIDTH: Dp = Dp(280.0);
const CALENDAR_MAX_HEIGHT: Dp = Dp(384.0);
const YEAR_RAIL_WIDTH: Dp = Dp(80.0);
const BODY_GAP: Dp = Dp(12.0);
const SECTION_PADDING: Dp = Dp(16.0);
// Grid + gap + year rail + section padding on both sides.
const OVERLAY_WIDTH: Dp = Dp(404.0);
const FIELD_CORNER_RADIUS: Dp = Dp(10.0);
const MONTH_PAGE_GAP: Dp = Dp(32.0);

/// Selectable years offered by the shortcut rail.
pub const YEAR_SHORTCUTS: [i32; 6] = [2021, 2022, 2023, 2024, 2025, 2026];

const DEFAULT_TIME_TEXT: &str = "12:00";

/// Error raised when a time string does not match the `HH:MM` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeTextError {
    /// The text is not two colon-separated numeric fields.
    #[error("time text must be formatted as HH:MM")]
    Shape,
    /// Hour or minute lies outside the 24-hour clock.
    #[error("time component out of range")]
    OutOfRange,
}

/// Parses 24-hour `HH:MM` text into a clock time.
pub fn parse_time_text(text: &str) -> Result<NaiveTime, TimeTextError> {
    let (hour_text, minute_text) = text.split_once(':').ok_or(TimeTextError::Shape)?;
    let hour: u32 = hour_text.trim().parse().map_err(|_| TimeTextError::Shape)?;
    let minute: u32 = minute_text.trim().parse().map_err(|_| TimeTextError::Shape)?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(TimeTextError::OutOfRange)
}

fn format_time_text(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

// Native format enforcement for the time field: digits and one colon shape,
// never longer than "HH:MM".
fn sanitize_time_text(text: String) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .take(5)
        .collect()
}

/// Holds the picker's composite selection and calendar view state.
pub struct DateTimePickerState {
    selected: NaiveDateTime,
    time_text: String,
    anchor_month: NaiveDate,
    revision: u64,
}

impl DateTimePickerState {
    /// Creates picker state seeded from an initial composite timestamp, or
    /// from the current local instant when none is supplied.
    pub fn new(initial: Option<NaiveDateTime>) -> Self {
        let seeded = initial.unwrap_or_else(|| Local::now().naive_local());
        Self {
            selected: seeded,
            time_text: initial
                .map(|value| format_time_text(value.time()))
                .unwrap_or_else(|| DEFAULT_TIME_TEXT.to_string()),
            anchor_month: first_of_month(seeded.date()),
            revision: 0,
        }
    }

    /// Returns the selected composite timestamp.
    pub fn selected(&self) -> NaiveDateTime {
        self.selected
    }

    /// Returns the first day of the month the calendar is anchored to.
    pub fn anchor_month(&self) -> NaiveDate {
        self.anchor_month
    }

    /// Returns the held time-of-day text.
    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    /// Returns the selected date rendered as `DD/MM/YYYY`.
    pub fn date_text(&self) -> String {
        self.selected.format("%d/%m/%Y").to_string()
    }

    /// Merges `date` with the held time-of-day into a new composite
    /// timestamp and selects it. Malformed held text falls back to the
    /// previously selected time, so the merge never resets the other
    /// component.
    pub fn select_day(&mut self, date: NaiveDate) -> NaiveDateTime {
        let time = parse_time_text(&self.time_text).unwrap_or_else(|_| self.selected.time());
        self.selected = NaiveDateTime::new(date, time);
        self.selected
    }

    /// Updates only the held time-of-day text.
    pub fn edit_time(&mut self, text: String) {
        self.time_text = text;
    }

    /// Sets selection, anchor month, and time text from the current local
    /// instant and returns it.
    pub fn jump_to_today(&mut self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        self.apply_instant(now);
        now
    }

    /// Replaces the anchor month's year, preserving its month-of-year.
    pub fn select_year(&mut self, year: i32) {
        self.anchor_month = with_year(self.anchor_month, year);
    }

    fn apply_instant(&mut self, instant: NaiveDateTime) {
        self.selected = instant;
        self.anchor_month = first_of_month(instant.date());
        self.time_text = format_time_text(instant.time());
        // Re-keys the time editor so it picks up the replaced text.
        self.revision += 1;
    }

    fn snapshot(&self) -> PickerSnapshot {
        PickerSnapshot {
            selected: self.selected,
            time_text: self.time_text.clone(),
            anchor_month: self.anchor_month,
            revision: self.revision,
        }
    }
}

impl Default for DateTimePickerState {
    fn default() -> Self {
        Self::new(None)
    }
}

#[derive(Clone, PartialEq)]
struct PickerSnapshot {
    selected: NaiveDateTime,
    time_text: String,
    anchor_month: NaiveDate,
    revision: u64,
}

/// Arguments for the [`date_time_picker`] component.
#[derive(Clone, PartialEq, Setters)]
pub struct DateTimePickerArgs {
    /// Optional modifier chain applied to the widget.
    pub modifier: Modifier,
    /// Initial composite timestamp; the current instant when absent.
    #[setters(strip_option)]
    pub initial: Option<NaiveDateTime>,
    /// Invoked with the new composite timestamp when the user selects a day
    /// or jumps to today. Cancel, time-only edits, and calendar browsing do
    /// not notify.
    #[setters(skip)]
    pub on_change: Option<CallbackWith<NaiveDateTime, ()>>,
    /// Optional external picker state.
    #[setters(skip)]
    pub state: Option<State<DateTimePickerState>>,
}

impl Default for DateTimePickerArgs {
    fn default() -> Self {
        Self {
            modifier: Modifier::new()
                .constrain(Some(DimensionValue::WRAP), Some(DimensionValue::WRAP)),
            initial: None,
            on_change: None,
            state: None,
        }
    }
}

impl DateTimePickerArgs {
    /// Sets the change notifier.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(NaiveDateTime) + Send + Sync + 'static,
    {
        self.on_change = Some(CallbackWith::new(on_change));
        self
    }

    /// Sets the change notifier using a shared callback.
    pub fn on_change_shared(
        mut self,
        on_change: impl Into<CallbackWith<NaiveDateTime>>,
    ) -> Self {
        self.on_change = Some(on_change.into());
        self
    }

    /// Sets an external picker state.
    pub fn state(mut self, state: State<DateTimePickerState>) -> Self {
        self.state = Some(state);
        self
    }
}

/// # date_time_picker
///
/// Render a popover-based picker for one composite date & time value.
///
/// ## Usage
///
/// Use when a page needs a single timestamp chosen through a calendar plus a
/// clock-time field, reported to the host as one value.
///
/// ## Parameters
///
/// - `args` — initial value, change notifier, and optional external state;
///   see [`DateTimePickerArgs`].
///
/// ## Examples
///
/// ```
/// # use tessera_ui::tessera;
/// # #[tessera]
/// # fn component() {
/// use tessera_datetime_picker::date_time_picker::{DateTimePickerArgs, date_time_picker};
/// # use tessera_components::theme::{MaterialTheme, material_theme};
///
/// # material_theme(MaterialTheme::default, || {
/// date_time_picker(&DateTimePickerArgs::default().on_change(|value| {
///     println!("picked {value}");
/// }));
/// # });
/// # }
/// # component();
/// ```
#[tessera]
pub fn date_time_picker(args: &DateTimePickerArgs) {
    let mut args: DateTimePickerArgs = args.clone();
    let initial = args.initial;
    let state = args
        .state
        .unwrap_or_else(|| remember(move || DateTimePickerState::new(initial)));
    args.state = Some(state);
    date_time_picker_node(&args);
}

#[tessera]
fn date_time_picker_node(args: &DateTimePickerArgs) {
    let state = args
        .state
        .expect("date_time_picker_node requires state to be set");
    let args = args.clone();
    let popover = remember(|| PopoverController::new(false));
    let snapshot = state.with(|s| s.snapshot());
    let on_change = args.on_change.clone();

    let modifier = args.modifier;
    let page_snapshot = snapshot.clone();
    let overlay_snapshot = snapshot;
    let overlay_on_change = on_change.clone();

    modifier.run(move || {
        let page_snapshot = page_snapshot.clone();
        let overlay_snapshot = overlay_snapshot.clone();
        let overlay_on_change = overlay_on_change.clone();
        popover_provider(
            &PopoverProviderArgs::default()
                .controller(popover)
                .alignment(PopoverAlignment::Start)
                .main_content(move || {
                    trigger_and_fields(popover, page_snapshot.clone());
                })
                .overlay_content(move || {
                    overlay_body(
                        state,
                        popover,
                        overlay_snapshot.clone(),
                        overlay_on_change.clone(),
                    );
                }),
        );
    });
}

fn trigger_and_fields(popover: State<PopoverController>, snapshot: PickerSnapshot) {
    column(
        ColumnArgs::default().cross_axis_alignment(CrossAxisAlignment::Start),
        move |scope| {
            scope.child(move || {
                popover_anchor(&PopoverAnchorArgs::new(popover).child(trigger_button));
            });
            scope.child(|| {
                spacer(&SpacerArgs::new(Modifier::new().height(SECTION_PADDING)));
            });
            let field_snapshot = snapshot.clone();
            scope.child(move || {
                field_row(field_snapshot.clone());
            });
        },
    );
}

fn trigger_button() {
    let scheme = use_context::<MaterialTheme>()
        .expect("MaterialTheme must be provided")
        .get()
        .color_scheme;
    surface(&SurfaceArgs::with_child(
        SurfaceArgs::default()
            .style(SurfaceStyle::Filled {
                color: scheme.primary,
            })
            .shape(Shape::capsule())
            .modifier(Modifier::new().padding_symmetric(Dp(24.0), Dp(12.0)))
            .content_alignment(Alignment::Center),
        move || {
            text(
                &TextArgs::default()
                    .text("Add Date and Time")
                    .size(Dp(16.0))
                    .color(
                        use_context::<MaterialTheme>()
                            .expect("MaterialTheme must be provided")
                            .get()
                            .color_scheme
                            .on_primary,
                    ),
            );
        },
    ));
}

/// Read-only date/time display row shown on the page under the trigger.
fn field_row(snapshot: PickerSnapshot) {
    let date_text = snapshot.selected.format("%d/%m/%Y").to_string();
    let time_text = snapshot.time_text.clone();
    row(RowArgs::default(), move |scope| {
        let date_text = date_text.clone();
        scope.child(move || {
            display_field(date_text.clone());
        });
        scope.child(|| {
            spacer(&SpacerArgs::new(Modifier::new().width(SECTION_PADDING)));
        });
        let time_text = time_text.clone();
        scope.child(move || {
            display_field(time_text.clone());
        });
    });
}

fn display_field(value: String) {
    let scheme = use_context::<MaterialTheme>()
        .expect("MaterialTheme must be provided")
        .get()
        .color_scheme;
    surface(&SurfaceArgs::with_child(
        SurfaceArgs::default()
            .style(SurfaceStyle::Filled {
                color: scheme.surface_variant,
            })
            .shape(Shape::rounded_rectangle(FIELD_CORNER_RADIUS))
            .modifier(Modifier::new().padding_symmetric(Dp(16.0), Dp(8.0)))
            .content_alignment(Alignment::Center),
        move || {
            text(
                &TextArgs::default()
                    .text(value.clone())
                    .size(Dp(14.0))
                    .color(scheme.on_surface),
            );
        },
    ));
}

fn overlay_body(
    state: State<DateTimePickerState>,
    popover: State<PopoverController>,
    snapshot: PickerSnapshot,
    on_change: Option<CallbackWith<NaiveDateTime>>,
) {
    column(
        ColumnArgs::default().modifier(
            Modifier::new().constrain(
                Some(DimensionValue::Fixed(OVERLAY_WIDTH.to_px())),
                Some(DimensionValue::WRAP),
            ),
        ),
        move |scope| {
            let header_snapshot = snapshot.clone();
            scope.child(move || {
                header_fields(state, header_snapshot.clone());
            });
            scope.child(|| horizontal_divider(DividerArgs::default()));

            let body_snapshot = snapshot.clone();
            let body_on_change = on_change.clone();
            scope.child(move || {
                calendar_and_years(state, body_snapshot.clone(), body_on_change.clone());
            });
            scope.child(|| horizontal_divider(DividerArgs::default()));

            let footer_on_change = on_change.clone();
            scope.child(move || {
                footer_actions(state, popover, footer_on_change.clone());
            });
        },
    );
}

/// Header row inside the popover: read-only date display plus the editable
/// `HH:MM` field.
fn header_fields(state: State<DateTimePickerState>, snapshot: PickerSnapshot) {
    let date_text = snapshot.selected.format("%d/%m/%Y").to_string();
    let time_text = snapshot.time_text.clone();
    let revision = snapshot.revision;
    row(
        RowArgs::default()
            .modifier(Modifier::new().padding_all(SECTION_PADDING))
            .cross_axis_alignment(CrossAxisAlignment::Center),
        move |scope| {
            let date_text = date_text.clone();
            scope.child(move || {
                display_field(date_text.clone());
            });
            scope.child(|| {
                spacer(&SpacerArgs::new(Modifier::new().width(SECTION_PADDING)));
            });
            let time_text = time_text.clone();
            scope.child(move || {
                time_field(state, time_text.clone(), revision);
            });
        },
    );
}

fn time_field(state: State<DateTimePickerState>, time_text: String, revision: u64) {
    // Re-keyed whenever the held text is replaced programmatically (Today),
    // so the editor restarts from the new value.
    key(revision, move || {
        text_input(
            &TextInputArgs::default()
                .initial_text(time_text.clone())
                .min_width(Dp(64.0))
                .font_size(Dp(14.0))
                .input_transform(sanitize_time_text)
                .on_change(move |text: String| {
                    state.with_mut(|s| s.edit_time(text.clone()));
                    text
                }),
        );
    });
}

fn calendar_and_years(
    state: State<DateTimePickerState>,
    snapshot: PickerSnapshot,
    on_change: Option<CallbackWith<NaiveDateTime>>,
) {
    let anchor = snapshot.anchor_month;
    let selected_date = snapshot.selected.date();
    row(
        RowArgs::default().modifier(Modifier::new().padding_all(SECTION_PADDING)),
        move |scope| {
            let pages_on_change = on_change.clone();
            scope.child(move || {
                let pages_on_change = pages_on_change.clone();
                scrollable(
                    &ScrollableArgs::default()
                        .modifier(Modifier::new().constrain(
                            Some(DimensionValue::Fixed(GRID_WIDTH.to_px())),
                            Some(DimensionValue::Wrap {
                                min: None,
                                max: Some(CALENDAR_MAX_HEIGHT.into()),
                            }),
                        ))
                        .scrollbar_behavior(ScrollBarBehavior::AutoHide)
                        .scrollbar_layout(ScrollBarLayout::Overlay)
                        .child(move || {
                            month_pages(state, anchor, selected_date, pages_on_change.clone());
                        }),
                );
            });
            scope.child(|| {
                spacer(&SpacerArgs::new(Modifier::new().width(BODY_GAP)));
            });
            scope.child(move || {
                year_rail(state, anchor.year());
            });
        },
    );
}

/// Two consecutive month pages generated from the same anchor.
fn month_pages(
    state: State<DateTimePickerState>,
    anchor: NaiveDate,
    selected_date: NaiveDate,
    on_change: Option<CallbackWith<NaiveDateTime>>,
) {
    let today = Local::now().date_naive();
    column(ColumnArgs::default(), move |scope| {
        for offset in 0..2 {
            let page_anchor = shift_months(anchor, offset);
            let page_on_change = on_change.clone();
            scope.child(move || {
                month_page(state, page_anchor, selected_date, today, page_on_change.clone());
            });
            if offset == 0 {
                scope.child(|| {
                    spacer(&SpacerArgs::new(Modifier::new().height(MONTH_PAGE_GAP)));
                });
            }
        }
    });
}

fn month_page(
    state: State<DateTimePickerState>,
    anchor: NaiveDate,
    selected_date: NaiveDate,
    today: NaiveDate,
    on_change: Option<CallbackWith<NaiveDateTime>>,
) {
    let title = month_title(anchor);
    column(
        ColumnArgs::default().cross_axis_alignment(CrossAxisAlignment::Center),
        move |scope| {
            let title = title.clone();
            scope.child(move || {
                text(
                    &TextArgs::default()
                        .text(title.clone())
                        .size(Dp(18.0))
                        .color(
                            use_context::<MaterialTheme>()
                                .expect("MaterialTheme must be provided")
                                .get()
                                .color_scheme
                                .on_surface,
                        ),
                );
            });
            scope.child(|| {
                spacer(&SpacerArgs::new(Modifier::new().height(Dp(12.0))));
            });
            scope.child(|| weekday_header());
            scope.child(|| {
                spacer(&SpacerArgs::new(Modifier::new().height(Dp(4.0))));
            });

            let grid = month_grid(anchor, selected_date, today);
            for week in grid.chunks(DAYS_PER_WEEK) {
                let week = week.to_vec();
                let week_on_change = on_change.clone();
                scope.child(move || {
                    let week = week.clone();
                    let week_on_change = week_on_change.clone();
                    row(RowArgs::default(), move |row_scope| {
                        for day in week.iter().copied() {
                            let cell_on_change = week_on_change.clone();
                            row_scope.child(move || {
                                day_cell(state, day, cell_on_change.clone());
                            });
                        }
                    });
                });
            }
        },
    );
}

fn weekday_header() {
    row(RowArgs::default(), |scope| {
        for label in WEEKDAY_LABELS {
            scope.child(move || {
                let scheme = use_context::<MaterialTheme>()
                    .expect("MaterialTheme must be provided")
                    .get()
                    .color_scheme;
                surface(&SurfaceArgs::with_child(
                    SurfaceArgs::default()
                        .style(SurfaceStyle::Filled {
                            color: Color::TRANSPARENT,
                        })
                        .modifier(Modifier::new().size(DAY_CELL_SIZE, Dp(24.0)))
                        .content_alignment(Alignment::Center),
                    move || {
                        text(
                            &TextArgs::default()
                                .text(label)
                                .size(Dp(12.0))
                                .color(scheme.on_surface_variant),
                        );
                    },
                ));
            });
        }
    });
}

fn day_cell(
    state: State<DateTimePickerState>,
    day: CalendarDay,
    on_change: Option<CallbackWith<NaiveDateTime>>,
) {
    let scheme = use_context::<MaterialTheme>()
        .expect("MaterialTheme must be provided")
        .get()
        .color_scheme;
    let (style, text_color) = if day.is_selected {
        (
            SurfaceStyle::Filled {
                color: scheme.primary,
            },
            scheme.on_primary,
        )
    } else if day.is_today {
        (
            SurfaceStyle::Outlined {
                color: scheme.primary,
                width: Dp(1.0),
            },
            scheme.on_surface,
        )
    } else {
        (
            SurfaceStyle::Filled {
                color: Color::TRANSPARENT,
            },
            if day.in_anchor_month {
                scheme.on_surface
            } else {
                scheme.on_surface_variant.with_alpha(0.4)
            },
        )
    };

    let mut surface_args = SurfaceArgs::default()
        .style(style)
        .shape(Shape::rounded_rectangle(DAY_CELL_RADIUS))
        .modifier(Modifier::new().size(DAY_CELL_SIZE, DAY_CELL_SIZE))
        .content_alignment(Alignment::Center);

    // Filler cells from adjacent months are rendered but not interactive.
    if day.in_anchor_month {
        surface_args = surface_args.on_click(move || {
            let value = state.with_mut(|s| s.select_day(day.date));
            tracing::debug!(%value, "day selected");
            if let Some(on_change) = on_change.as_ref() {
                on_change.call(value);
            }
        });
    }

    let label = day.date.day().to_string();
    surface(&SurfaceArgs::with_child(surface_args, move || {
        text(
            &TextArgs::default()
                .text(label.clone())
                .size(Dp(14.0))
                .color(text_color),
        );
    }));
}

fn year_rail(state: State<DateTimePickerState>, anchor_year: i32) {
    scrollable(
        &ScrollableArgs::default()
            .modifier(Modifier::new().constrain(
                Some(DimensionValue::Fixed(YEAR_RAIL_WIDTH.to_px())),
                Some(DimensionValue::Wrap {
                    min: None,
                    max: Some(CALENDAR_MAX_HEIGHT.into()),
                }),
            ))
            .scrollbar_behavior(ScrollBarBehavior::AutoHide)
            .scrollbar_layout(ScrollBarLayout::Overlay)
            .child(move || {
                column(
                    ColumnArgs::default()
                        .modifier(Modifier::new().fill_max_width())
                        .cross_axis_alignment(CrossAxisAlignment::Center),
                    move |scope| {
                        for year in YEAR_SHORTCUTS {
                            scope.child(move || {
                                year_button(state, year, year == anchor_year);
                            });
                        }
                    },
                );
            }),
    );
}

fn year_button(state: State<DateTimePickerState>, year: i32, is_current: bool) {
    let scheme = use_context::<MaterialTheme>()
        .expect("MaterialTheme must be provided")
        .get()
        .color_scheme;
    let color = if is_current {
        scheme.primary
    } else {
        scheme.on_surface_variant
    };
    surface(&SurfaceArgs::with_child(
        SurfaceArgs::default()
            .style(SurfaceStyle::Filled {
                color: Color::TRANSPARENT,
            })
            .shape(Shape::capsule())
            .modifier(Modifier::new().padding_symmetric(Dp(12.0), Dp(6.0)))
            .content_alignment(Alignment::Center)
            .on_click(move || {
                tracing::debug!(year, "year shortcut selected");
                state.with_mut(|s| s.select_year(year));
            }),
        move || {
            text(
                &TextArgs::default()
                    .text(year.to_string())
                    .size(Dp(14.0))
                    .color(color),
            );
        },
    ));
}

fn footer_actions(
    state: State<DateTimePickerState>,
    popover: State<PopoverController>,
    on_change: Option<CallbackWith<NaiveDateTime>>,
) {
    row(
        RowArgs::default()
            .modifier(
                Modifier::new()
                    .fill_max_width()
                    .padding_symmetric(SECTION_PADDING, Dp(8.0)),
            )
            .main_axis_alignment(MainAxisAlignment::SpaceBetween)
            .cross_axis_alignment(CrossAxisAlignment::Center),
        move |scope| {
            let today_on_change = on_change.clone();
            scope.child(move || {
                let today_on_change = today_on_change.clone();
                action_text_button("Today", move || {
                    let value = state.with_mut(|s| s.jump_to_today());
                    tracing::debug!(%value, "jumped to today");
                    if let Some(on_change) = today_on_change.as_ref() {
                        on_change.call(value);
                    }
                    popover.with_mut(|c| c.close());
                });
            });
            scope.child(move || {
                action_text_button("Cancel", move || {
                    popover.with_mut(|c| c.close());
                });
            });
        },
    );
}

fn action_text_button(label: &'static str, on_click: impl Fn() + Send + Sync + 'static) {
    let scheme = use_context::<MaterialTheme>()
        .expect("MaterialTheme must be provided")
        .get()
        .color_scheme;
    surface(&SurfaceArgs::with_child(
        SurfaceArgs::default()
            .style(SurfaceStyle::Filled {
                color: Color::TRANSPARENT,
            })
            .shape(Shape::capsule())
            .modifier(Modifier::new().padding_symmetric(Dp(12.0), Dp(8.0)))
            .content_alignment(Alignment::Center)
            .on_click(on_click),
        move || {
            text(
                &TextArgs::default()
                    .text(label)
                    .size(Dp(14.0))
                    .color(scheme.primary),
            );
        },
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("test datetimes are valid")
    }

    #[test]
    fn seeds_from_initial_value() {
        let state = DateTimePickerState::new(Some(datetime(2023, 11, 30, 12, 0)));
        assert_eq!(state.selected(), datetime(2023, 11, 30, 12, 0));
        assert_eq!(state.time_text(), "12:00");
        assert_eq!(
            state.anchor_month(),
            NaiveDate::from_ymd_opt(2023, 11, 1).expect("valid date")
        );
        assert_eq!(state.date_text(), "30/11/2023");
    }

    #[test]
    fn seeds_without_initial_value() {
        let state = DateTimePickerState::new(None);
        assert_eq!(state.time_text(), DEFAULT_TIME_TEXT);
        assert_eq!(state.anchor_month(), first_of_month(state.selected().date()));
        assert_eq!(state.anchor_month().day(), 1);
    }

    #[test]
    fn selecting_a_day_merges_the_held_time() {
        let mut state = DateTimePickerState::new(Some(datetime(2023, 11, 30, 12, 0)));
        state.edit_time("14:30".to_string());
        let merged = state.select_day(NaiveDate::from_ymd_opt(2023, 12, 5).expect("valid date"));
        assert_eq!(merged, datetime(2023, 12, 5, 14, 30));
        assert_eq!(state.selected(), merged);
    }

    #[test]
    fn malformed_time_text_keeps_the_previous_time() {
        let mut state = DateTimePickerState::new(Some(datetime(2023, 11, 30, 9, 45)));
        state.edit_time("9:".to_string());
        let merged = state.select_day(NaiveDate::from_ymd_opt(2023, 11, 2).expect("valid date"));
        assert_eq!(merged, datetime(2023, 11, 2, 9, 45));
    }

    #[test]
    fn editing_time_alone_changes_nothing_else() {
        let mut state = DateTimePickerState::new(Some(datetime(2023, 11, 30, 12, 0)));
        state.edit_time("08:15".to_string());
        assert_eq!(state.selected(), datetime(2023, 11, 30, 12, 0));
        assert_eq!(state.time_text(), "08:15");
        assert_eq!(
            state.anchor_month(),
            NaiveDate::from_ymd_opt(2023, 11, 1).expect("valid date")
        );
    }

    #[test]
    fn selecting_a_year_moves_only_the_anchor() {
        let mut state = DateTimePickerState::new(Some(datetime(2023, 3, 10, 12, 0)));
        state.select_year(2025);
        assert_eq!(
            state.anchor_month(),
            NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date")
        );
        assert_eq!(state.selected(), datetime(2023, 3, 10, 12, 0));
    }

    #[test]
    fn applying_an_instant_aligns_all_three_components() {
        let mut state = DateTimePickerState::new(Some(datetime(2021, 1, 1, 0, 0)));
        let before = state.revision;
        state.apply_instant(datetime(2024, 6, 20, 16, 5));
        assert_eq!(state.selected(), datetime(2024, 6, 20, 16, 5));
        assert_eq!(
            state.anchor_month(),
            NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
        );
        assert_eq!(state.time_text(), "16:05");
        assert_eq!(state.revision, before + 1);
    }

    #[test]
    fn cancel_closes_without_mutating_state() {
        let mut popover = PopoverController::new(true);
        let mut state = DateTimePickerState::new(Some(datetime(2023, 11, 30, 12, 0)));
        state.edit_time("14:30".to_string());

        popover.close();

        assert!(!popover.is_open());
        assert_eq!(state.selected(), datetime(2023, 11, 30, 12, 0));
        assert_eq!(state.time_text(), "14:30");
        assert_eq!(
            state.anchor_month(),
            NaiveDate::from_ymd_opt(2023, 11, 1).expect("valid date")
        );
    }

    #[test]
    fn parses_well_formed_time_text() {
        let expected = NaiveTime::from_hms_opt(14, 30, 0).expect("valid time");
        assert_eq!(parse_time_text("14:30"), Ok(expected));
        let midnight = NaiveTime::from_hms_opt(0, 0, 0).expect("valid time");
        assert_eq!(parse_time_text("00:00"), Ok(midnight));
    }

    #[test]
    fn rejects_malformed_time_text() {
        assert_eq!(parse_time_text("noon"), Err(TimeTextError::Shape));
        assert_eq!(parse_time_text("14"), Err(TimeTextError::Shape));
        assert_eq!(parse_time_text("14:"), Err(TimeTextError::Shape));
        assert_eq!(parse_time_text("25:00"), Err(TimeTextError::OutOfRange));
        assert_eq!(parse_time_text("12:60"), Err(TimeTextError::OutOfRange));
    }

    #[test]
    fn sanitizer_enforces_the_field_shape() {
        assert_eq!(sanitize_time_text("14:30".to_string()), "14:30");
        assert_eq!(sanitize_time_text("14a:3b0".to_string()), "14:30");
        assert_eq!(sanitize_time_text("123456789".to_string()), "12345");
    }
}

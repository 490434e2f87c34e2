use chrono::{NaiveDate, NaiveDateTime};
use tessera_ui::{Dp, Modifier, remember, tessera, use_context};

use tessera_components::{
    alignment::{Alignment, CrossAxisAlignment},
    column::{ColumnArgs, column},
    modifier::ModifierExt,
    spacer::{SpacerArgs, spacer},
    surface::{SurfaceArgs, surface},
    text::{TextArgs, text},
    theme::{MaterialTheme, material_theme},
};
use tessera_datetime_picker::{DateTimePickerArgs, date_time_picker};

fn seed_value() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 11, 30)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("seed value is a valid timestamp")
}

#[tessera]
pub fn app() {
    material_theme(MaterialTheme::default, || {
        page();
    });
}

#[tessera]
fn page() {
    let reported = remember(|| Option::<NaiveDateTime>::None);
    let scheme = use_context::<MaterialTheme>()
        .expect("MaterialTheme must be provided")
        .get()
        .color_scheme;

    surface(&SurfaceArgs::with_child(
        SurfaceArgs::default()
            .style(scheme.surface.into())
            .modifier(Modifier::new().fill_max_size())
            .content_alignment(Alignment::Center),
        move || {
            column(
                ColumnArgs::default().cross_axis_alignment(CrossAxisAlignment::Start),
                move |scope| {
                    scope.child(move || {
                        date_time_picker(
                            &DateTimePickerArgs::default()
                                .initial(seed_value())
                                .on_change(move |value| {
                                    tracing::info!(%value, "picker reported a value");
                                    reported.with_mut(|slot| *slot = Some(value));
                                }),
                        );
                    });
                    scope.child(|| {
                        spacer(&SpacerArgs::new(Modifier::new().height(Dp(24.0))));
                    });
                    scope.child(move || {
                        let line = reported.with(|slot| {
                            slot.map(|value| {
                                format!("Reported value: {}", value.format("%d/%m/%Y %H:%M"))
                            })
                        });
                        let scheme = use_context::<MaterialTheme>()
                            .expect("MaterialTheme must be provided")
                            .get()
                            .color_scheme;
                        text(
                            &TextArgs::default()
                                .text(line.unwrap_or_else(|| "No value reported yet".to_string()))
                                .size(Dp(14.0))
                                .color(scheme.on_surface_variant),
                        );
                    });
                },
            );
        },
    ));
}

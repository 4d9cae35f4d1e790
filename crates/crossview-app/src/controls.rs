//! Slider panel for the composite parameters.
//!
//! The panel edits a copy of the parameters; the caller hands the copy to the
//! session only when something actually moved.

use crossview_core::decode::MAX_SCALE_PERCENT;
use crossview_core::{ChannelOffsets, CompositeParameters, Side, MAX_SPACING};
use eframe::egui;

/// Draw every slider and return the edited parameters when any changed.
pub fn parameter_panel(
    ui: &mut egui::Ui,
    current: &CompositeParameters,
) -> Option<CompositeParameters> {
    let mut edited = *current;
    let mut changed = false;

    ui.horizontal_top(|ui| {
        for side in [Side::Left, Side::Right] {
            ui.vertical(|ui| {
                changed |= side_group(ui, side, &mut edited);
            });
            ui.add_space(24.0);
        }
    });

    ui.add_space(8.0);
    changed |= ui
        .add(egui::Slider::new(&mut edited.spacing, 0..=MAX_SPACING).text("Spacing (px)"))
        .changed();

    changed.then_some(edited)
}

fn side_group(ui: &mut egui::Ui, side: Side, params: &mut CompositeParameters) -> bool {
    let side_params = params.side_mut(side);
    let mut changed = false;

    ui.heading(format!("{} image", side.label()));
    ui.label(format!("Tilt: {:+.1}°", side_params.rotation_degrees));

    changed |= ui
        .add(
            egui::Slider::new(&mut side_params.scale_percent, 0..=MAX_SCALE_PERCENT)
                .text("Scale (%)"),
        )
        .changed();

    let offsets = &mut side_params.offsets;
    for (value, name) in [
        (&mut offsets.red, "Red offset"),
        (&mut offsets.green, "Green offset"),
        (&mut offsets.blue, "Blue offset"),
    ] {
        changed |= ui
            .add(egui::Slider::new(value, ChannelOffsets::MIN..=ChannelOffsets::MAX).text(name))
            .changed();
    }

    changed
}

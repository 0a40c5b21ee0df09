//! Input widgets bound to a value. They hold no state and run no validation.

use eframe::egui;
use shared::domain::{ErrorSet, ProfileField};

pub const ERROR_TEXT_COLOR: egui::Color32 = egui::Color32::from_rgb(237, 66, 69);

/// Labelled single-line input; renders the field's error line underneath when
/// `errors` carries one.
pub fn text_input(
    ui: &mut egui::Ui,
    field: ProfileField,
    value: &mut String,
    errors: Option<&ErrorSet>,
    hint: &str,
) -> egui::Response {
    ui.label(egui::RichText::new(field.label()).strong());
    let edit = egui::TextEdit::singleline(value)
        .id_salt(field.key())
        .hint_text(
            egui::RichText::new(hint).color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
        )
        .desired_width(f32::INFINITY);

    let response = ui.add_sized([ui.available_width(), 30.0], edit);

    if let Some(error) = errors.and_then(|errors| errors.get(field)) {
        ui.colored_label(ERROR_TEXT_COLOR, error.message.as_str());
    }

    response
}

pub fn checkbox_input(ui: &mut egui::Ui, label: &str, checked: &mut bool) -> egui::Response {
    ui.checkbox(checked, label)
}

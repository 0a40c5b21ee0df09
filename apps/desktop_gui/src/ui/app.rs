use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::ProfileField;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::submit_form, reducer::FormController};
use crate::ui::widgets::{checkbox_input, text_input};

const PHONE_HINT: &str = "99882233";
const PHONE_TITLE: &str = "A valid phone number (8 characters), for example 99882233";
const PHONE_DESCRIPTION: &str = "8 characters, for example 99882233";

fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

fn field_hint(field: ProfileField) -> &'static str {
    match field {
        ProfileField::FirstName => "Ann",
        ProfileField::LastName => "Lee",
        ProfileField::PhoneNumber => PHONE_HINT,
    }
}

pub struct ProfileFormApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    form: FormController,
}

impl ProfileFormApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        form: FormController,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            form,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.form.apply(event);
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.form.banner().cloned() else {
            return;
        };

        egui::Frame::new()
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(banner.banner_text()).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.form.dismiss_banner();
                        }
                    });
                });
            });
        ui.add_space(6.0);
    }

    /// Returns true when Enter was pressed inside the field.
    fn show_text_field(&mut self, ui: &mut egui::Ui, field: ProfileField) -> bool {
        let mut buf = self.form.values().text(field).to_string();
        let mut response = text_input(ui, field, &mut buf, self.form.errors(), field_hint(field));
        if field == ProfileField::PhoneNumber {
            response = response.on_hover_text(PHONE_TITLE);
        }

        if response.changed() {
            self.form.edit_text(field, buf);
        }

        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
    }

    fn show_form(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(360.0, 480.0);
            ui.add_space((avail.y * 0.06).clamp(12.0, 48.0));

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);

                egui::Frame::new()
                    .fill(lighten_color(ui.visuals().panel_fill, 0.04))
                    .corner_radius(egui::CornerRadius::same(14))
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(8.0, 8.0);
                        ui.heading("Edit profile");
                        ui.add_space(4.0);
                        self.show_status_banner(ui);

                        let mut submit = false;
                        for field in ProfileField::ALL {
                            submit |= self.show_text_field(ui, field);
                            if field == ProfileField::PhoneNumber {
                                ui.small(egui::RichText::new(PHONE_DESCRIPTION).weak());
                            }
                            ui.add_space(4.0);
                        }

                        let mut receive_newsletter = self.form.values().receive_newsletter;
                        if checkbox_input(ui, "Receive newsletter?", &mut receive_newsletter)
                            .changed()
                        {
                            self.form.edit_checkbox(receive_newsletter);
                        }

                        ui.add_space(8.0);
                        let button =
                            egui::Button::new(egui::RichText::new("Save changes").strong())
                                .min_size(egui::vec2(ui.available_width(), 36.0));
                        if ui.add_enabled(!self.form.is_pending(), button).clicked() {
                            submit = true;
                        }

                        if submit {
                            submit_form(&mut self.form, &self.cmd_tx);
                        }

                        ui.add_space(6.0);
                        ui.separator();
                        ui.horizontal_wrapped(|ui| {
                            if self.form.is_pending() {
                                ui.spinner();
                            }
                            ui.small("Status:");
                            ui.small(egui::RichText::new(self.form.status()).weak());
                        });
                    });
            });
        });
    }
}

impl eframe::App for ProfileFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_form(ctx);

        if self.form.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

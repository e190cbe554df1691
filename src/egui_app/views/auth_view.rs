use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;

const INPUT_WIDTH: f32 = 280.0;
const LABEL_WIDTH: f32 = 90.0;

fn field(ui: &mut egui::Ui, offset: f32, label: &str, value: &mut String, password: bool) -> egui::Response {
    ui.horizontal(|ui| {
        ui.add_space(offset);
        ui.add_sized(
            [LABEL_WIDTH, 24.0],
            egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
        );
        ui.add_sized(
            [INPUT_WIDTH, 28.0],
            egui::TextEdit::singleline(value).password(password),
        )
    })
    .inner
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let available_rect = ui.available_rect_before_wrap();
    ui.painter().rect_filled(available_rect, 0.0, colors::BG_DARK);

    ui.scope_builder(egui::UiBuilder::new().max_rect(available_rect), |ui| {
        ui.vertical_centered(|ui| {
            let total_height = if state.is_register_mode { 420.0 } else { 280.0 };
            ui.add_space((available_rect.height() - total_height).max(0.0) / 2.0);

            ui.label(egui::RichText::new("Taskboard").size(32.0).strong().color(colors::TEXT_LIGHT));
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new(if state.is_register_mode { "Create Account" } else { "Welcome Back" })
                    .size(24.0)
                    .color(colors::TEXT_LIGHT),
            );
            ui.add_space(20.0);

            // local validation first, then the server's answer
            let session = state.session.snapshot();
            if let Some(error) = state.form_error.as_ref().or(session.error.as_ref()) {
                ui.label(egui::RichText::new(error).color(colors::ERROR));
                ui.add_space(10.0);
            }

            let offset = ((available_rect.width() - INPUT_WIDTH - LABEL_WIDTH - 20.0) / 2.0).max(0.0);
            let mut submitted = false;
            if state.is_register_mode {
                let form = &mut state.register_form;
                field(ui, offset, "Email:", &mut form.email, false);
                ui.add_space(8.0);
                field(ui, offset, "Username:", &mut form.username, false);
                ui.add_space(8.0);
                field(ui, offset, "Full name:", &mut form.full_name, false);
                ui.add_space(8.0);
                field(ui, offset, "Password:", &mut form.password, true);
                ui.add_space(8.0);
                let confirm = field(ui, offset, "Confirm:", &mut form.confirm_password, true);
                submitted |= confirm.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            } else {
                let form = &mut state.login_form;
                field(ui, offset, "Email:", &mut form.email, false);
                ui.add_space(8.0);
                let password = field(ui, offset, "Password:", &mut form.password, true);
                submitted |= password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            }
            ui.add_space(20.0);

            ui.horizontal(|ui| {
                let button_width = 130.0;
                ui.add_space(((available_rect.width() - button_width * 2.0 - 10.0) / 2.0).max(0.0));

                let primary = egui::Button::new(
                    egui::RichText::new(if state.is_register_mode { "Sign Up" } else { "Login" })
                        .color(colors::TEXT_LIGHT),
                )
                .fill(colors::ACCENT);
                if ui.add_enabled_ui(!session.is_loading, |ui| ui.add_sized([button_width, 32.0], primary))
                    .inner
                    .clicked()
                {
                    submitted = true;
                }

                ui.add_space(10.0);

                let secondary = egui::Button::new(
                    egui::RichText::new(if state.is_register_mode { "Back to Login" } else { "Create Account" })
                        .color(colors::TEXT_SECONDARY),
                );
                if ui.add_sized([button_width, 32.0], secondary).clicked() {
                    state.toggle_auth_mode();
                }
            });

            if submitted && !session.is_loading {
                if state.is_register_mode {
                    state.submit_register();
                } else {
                    state.submit_login();
                }
            }

            if session.is_loading {
                ui.add_space(15.0);
                ui.horizontal(|ui| {
                    ui.add_space(((available_rect.width() - 100.0) / 2.0).max(0.0));
                    ui.label(egui::RichText::new("Loading...").color(colors::TEXT_LIGHT));
                    ui.spinner();
                });
            }
        });
    });
}

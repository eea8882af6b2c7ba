//! eframe shell for the employee screen. Rendering reads the controller and
//! records `ViewAction`s; the actions are applied once the frame is drawn.

use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use eframe::egui;
use shared::{
    domain::{Employee, EmployeeId},
    form::{AddEmployeeForm, FormField},
};

use crate::controller::{
    events::UiEvent,
    view_state::{EmptyKind, ListPhase, ListScreen, ModalState, Submission, Toast, ToastSeverity},
    EmployeeViewController,
};

const REPAINT_INTERVAL: Duration = Duration::from_millis(100);
const SUBTITLE: &str = "Manage your employee records";
const SEARCH_HINT: &str = "Search by name, ID, or email...";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ViewAction {
    Retry,
    SetSearch(String),
    PreviousPage,
    NextPage,
    OpenAddForm,
    SetField(FormField, String),
    SubmitAddForm,
    RequestDelete(EmployeeId),
    ConfirmDelete,
    CloseModal,
    DismissToast,
}

pub struct AdminApp {
    controller: EmployeeViewController,
    ui_rx: Receiver<UiEvent>,
    search_input: String,
}

impl AdminApp {
    pub fn new(controller: EmployeeViewController, ui_rx: Receiver<UiEvent>) -> Self {
        let search_input = controller.search().to_string();
        Self {
            controller,
            ui_rx,
            search_input,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.apply_event(event);
        }
    }

    fn apply(&mut self, action: ViewAction) {
        let controller = &mut self.controller;
        match action {
            ViewAction::Retry => controller.retry(),
            ViewAction::SetSearch(term) => controller.set_search(term),
            ViewAction::PreviousPage => {
                controller.previous_page();
            }
            ViewAction::NextPage => {
                controller.next_page();
            }
            ViewAction::OpenAddForm => controller.open_add_form(),
            ViewAction::SetField(field, value) => controller.set_form_field(field, value),
            ViewAction::SubmitAddForm => {
                controller.submit_add_form();
            }
            ViewAction::RequestDelete(id) => {
                controller.request_delete_by_id(id);
            }
            ViewAction::ConfirmDelete => {
                controller.confirm_delete();
            }
            ViewAction::CloseModal => controller.close_modal(),
            ViewAction::DismissToast => controller.dismiss_toast(),
        }
    }
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.controller.tick(Instant::now());

        let mut actions = Vec::new();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(egui::RichText::new(self.controller.status()).weak());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            show_header(ui, &self.controller, &mut self.search_input, &mut actions);
            ui.add_space(12.0);
            show_list(ui, &self.controller, &mut actions);
        });

        match self.controller.modal() {
            ModalState::Closed => {}
            ModalState::AddEmployee { form, submission } => {
                show_add_window(ctx, form, *submission, &mut actions);
            }
            ModalState::ConfirmDelete { target, submission } => {
                show_delete_window(ctx, target, *submission, &mut actions);
            }
        }

        if let Some(toast) = self.controller.toast() {
            show_toast(ctx, toast, &mut actions);
        }

        for action in actions {
            self.apply(action);
        }

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}

fn show_header(
    ui: &mut egui::Ui,
    controller: &EmployeeViewController,
    search_input: &mut String,
    actions: &mut Vec<ViewAction>,
) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading("Employees");
            ui.label(egui::RichText::new(SUBTITLE).weak());
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Add Employee").clicked() {
                actions.push(ViewAction::OpenAddForm);
            }
            if controller.is_create_pending() {
                ui.spinner();
                ui.label(egui::RichText::new("Adding employee...").weak());
            }
        });
    });
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(search_input)
                .hint_text(SEARCH_HINT)
                .desired_width(320.0),
        );
        if response.changed() {
            actions.push(ViewAction::SetSearch(search_input.clone()));
        }
        // The full-page state has its own indicator.
        if matches!(controller.list_phase(), ListPhase::Loading { initial: false }) {
            ui.spinner();
        }
    });
}

fn show_list(ui: &mut egui::Ui, controller: &EmployeeViewController, actions: &mut Vec<ViewAction>) {
    match controller.screen() {
        ListScreen::FullPageLoading => {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.spinner();
                ui.label("Loading employees...");
            });
        }
        ListScreen::Error { message } => {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.label(egui::RichText::new("Failed to load employees").strong());
                ui.colored_label(ui.visuals().error_fg_color, message);
                if ui.button("Try Again").clicked() {
                    actions.push(ViewAction::Retry);
                }
            });
        }
        ListScreen::Empty(kind) => show_empty_state(ui, kind, actions),
        ListScreen::Table(rows) => {
            show_table(ui, controller, rows, actions);
            ui.add_space(8.0);
            show_pagination(ui, controller, actions);
        }
    }
}

fn show_empty_state(ui: &mut egui::Ui, kind: EmptyKind, actions: &mut Vec<ViewAction>) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.label(egui::RichText::new(kind.title()).strong().size(16.0));
        ui.label(egui::RichText::new(kind.description()).weak());
        if let Some(label) = kind.action_label() {
            ui.add_space(8.0);
            if ui.button(label).clicked() {
                actions.push(ViewAction::OpenAddForm);
            }
        }
    });
}

fn show_table(
    ui: &mut egui::Ui,
    controller: &EmployeeViewController,
    rows: &[Employee],
    actions: &mut Vec<ViewAction>,
) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("employees_table")
            .striped(true)
            .num_columns(5)
            .spacing([24.0, 10.0])
            .show(ui, |ui| {
                for heading in ["Employee", "Email", "Department", "Joined", ""] {
                    ui.label(egui::RichText::new(heading).strong());
                }
                ui.end_row();

                for employee in rows {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(employee.initial().to_string())
                                .strong()
                                .monospace(),
                        );
                        ui.vertical(|ui| {
                            ui.label(&employee.name);
                            ui.small(egui::RichText::new(&employee.employee_id).weak());
                        });
                    });
                    ui.label(&employee.email);
                    ui.label(&employee.department);
                    ui.label(joined_label(employee));
                    let deleting = controller.is_delete_pending(employee.id);
                    let label = if deleting { "Deleting..." } else { "Delete" };
                    if ui
                        .add_enabled(!deleting, egui::Button::new(label).small())
                        .clicked()
                    {
                        actions.push(ViewAction::RequestDelete(employee.id));
                    }
                    ui.end_row();
                }
            });
    });
}

fn show_pagination(ui: &mut egui::Ui, controller: &EmployeeViewController, actions: &mut Vec<ViewAction>) {
    let page = controller.page();
    let pages = controller.page_count().max(1);

    ui.horizontal(|ui| {
        if let Some((first, last)) = controller.showing_range() {
            ui.label(format!(
                "Showing {first}\u{2013}{last} of {}",
                controller.total()
            ));
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.add_enabled(page < pages, egui::Button::new("Next")).clicked() {
                actions.push(ViewAction::NextPage);
            }
            ui.label(format!("Page {page} of {pages}"));
            if ui.add_enabled(page > 1, egui::Button::new("Previous")).clicked() {
                actions.push(ViewAction::PreviousPage);
            }
        });
    });
}

fn show_add_window(
    ctx: &egui::Context,
    form: &AddEmployeeForm,
    submission: Submission,
    actions: &mut Vec<ViewAction>,
) {
    let idle = submission == Submission::Idle;

    egui::Window::new("Add New Employee")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            for field in FormField::ALL {
                ui.label(egui::RichText::new(field.label()).strong());
                let mut value = form.value(field).to_string();
                let response = ui.add_enabled(
                    idle,
                    egui::TextEdit::singleline(&mut value)
                        .hint_text(field.placeholder())
                        .desired_width(300.0),
                );
                if response.changed() {
                    actions.push(ViewAction::SetField(field, value));
                }
                if let Some(error) = form.error(field) {
                    ui.colored_label(ui.visuals().error_fg_color, error);
                }
                ui.add_space(6.0);
            }

            ui.separator();
            ui.horizontal(|ui| {
                let label = if idle { "Add Employee" } else { "Adding..." };
                if ui.add_enabled(idle, egui::Button::new(label)).clicked() {
                    actions.push(ViewAction::SubmitAddForm);
                }
                if ui.button("Cancel").clicked() {
                    actions.push(ViewAction::CloseModal);
                }
            });
        });
}

fn show_delete_window(
    ctx: &egui::Context,
    target: &Employee,
    submission: Submission,
    actions: &mut Vec<ViewAction>,
) {
    let idle = submission == Submission::Idle;

    egui::Window::new("Delete Employee")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(delete_prompt(&target.name));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let label = if idle { "Delete" } else { "Deleting..." };
                if ui.add_enabled(idle, egui::Button::new(label)).clicked() {
                    actions.push(ViewAction::ConfirmDelete);
                }
                if ui.button("Cancel").clicked() {
                    actions.push(ViewAction::CloseModal);
                }
            });
        });
}

fn show_toast(ctx: &egui::Context, toast: &Toast, actions: &mut Vec<ViewAction>) {
    let (fill, stroke) = match toast.severity {
        ToastSeverity::Success => (
            egui::Color32::from_rgb(38, 94, 62),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(86, 160, 116)),
        ),
        ToastSeverity::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
        ),
    };

    egui::Area::new(egui::Id::new("toast"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -36.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&toast.message).color(egui::Color32::WHITE));
                        if ui.small_button("x").clicked() {
                            actions.push(ViewAction::DismissToast);
                        }
                    });
                });
        });
}

fn delete_prompt(name: &str) -> String {
    format!("Are you sure you want to permanently delete {name}? This action cannot be undone.")
}

fn joined_label(employee: &Employee) -> String {
    employee
        .joined_on()
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(joining_date: Option<&str>) -> Employee {
        Employee {
            id: EmployeeId(1),
            name: "Ada Lovelace".to_string(),
            email: "ada@corp.io".to_string(),
            department: "Engineering".to_string(),
            employee_id: "EMP-1".to_string(),
            joining_date: joining_date.map(str::to_string),
            status: None,
        }
    }

    #[test]
    fn copy_matches_record_wording() {
        assert_eq!(SUBTITLE, "Manage your employee records");
        assert_eq!(SEARCH_HINT, "Search by name, ID, or email...");
        assert_eq!(
            delete_prompt("Ada Lovelace"),
            "Are you sure you want to permanently delete Ada Lovelace? This action cannot be undone."
        );
    }

    #[test]
    fn joined_dates_render_day_first_or_na() {
        assert_eq!(joined_label(&employee(Some("2024-03-05"))), "05/03/2024");
        assert_eq!(joined_label(&employee(Some("not a date"))), "N/A");
        assert_eq!(joined_label(&employee(None)), "N/A");
    }
}

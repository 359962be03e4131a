use std::time::Duration;

use anyhow::{Context, Result};
use eframe::egui;
use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{info, warn};

use crate::analysis::{AnalysisClient, AnalysisMode, error_details};
use crate::config::AnalyzerSettings;

pub mod charts;
pub mod controller;
pub mod events;
pub mod renderer;
pub mod style;
pub mod widgets;
pub mod word_cloud;

use self::controller::{DashboardController, DashboardView, SubmitOutcome};
use self::events::{DashboardCommand, DashboardEvent};
use self::style::{BRAND_PRIMARY, MUTED_TEXT, NEGATIVE_COLOR};

const APP_TITLE: &str = "SocialSense AI";
const HEADER_SUBTITLE: &str = "AI-powered social listening for brands, videos and competitors";

pub fn run_dashboard(settings: &AnalyzerSettings) -> Result<()> {
    let runtime_handle = Handle::try_current().context("dashboard requires a tokio runtime")?;

    let (command_tx, command_rx) = unbounded_channel::<DashboardCommand>();
    let (event_tx, event_rx) = unbounded_channel::<DashboardEvent>();

    spawn_runtime_worker(
        &runtime_handle,
        AnalysisClient::from_settings(settings),
        command_rx,
        event_tx,
    );
    info!(model = %settings.model, "starting native dashboard");

    eframe::run_native(
        APP_TITLE,
        eframe::NativeOptions::default(),
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(DashboardApp::new(command_tx, event_rx)))
        }),
    )
    .map_err(|error| anyhow::anyhow!("dashboard UI exited with error: {error}"))
}

/// Runs analyses one at a time in submission order.
fn spawn_runtime_worker(
    handle: &Handle,
    client: AnalysisClient,
    mut command_rx: UnboundedReceiver<DashboardCommand>,
    event_tx: UnboundedSender<DashboardEvent>,
) {
    let _task = handle.spawn(async move {
        while let Some(command) = command_rx.recv().await {
            match command {
                DashboardCommand::Analyze { ticket, request } => {
                    let event = match client.analyze(&request).await {
                        Ok(result) => DashboardEvent::AnalysisCompleted { ticket, result },
                        Err(error) => DashboardEvent::AnalysisFailed {
                            ticket,
                            error: error_details(&error),
                        },
                    };
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
                DashboardCommand::Shutdown => break,
            }
        }
    });
}

struct DashboardApp {
    command_tx: UnboundedSender<DashboardCommand>,
    event_rx: UnboundedReceiver<DashboardEvent>,
    controller: DashboardController,
    runtime_disconnected: bool,
}

impl DashboardApp {
    fn new(
        command_tx: UnboundedSender<DashboardCommand>,
        event_rx: UnboundedReceiver<DashboardEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_rx,
            controller: DashboardController::new(),
            runtime_disconnected: false,
        }
    }

    fn drain_events(&mut self) {
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => {
                    let (ticket, outcome) = event.into_outcome();
                    self.controller.apply_result(ticket, outcome);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.runtime_disconnected {
                        warn!("dashboard runtime worker disconnected");
                    }
                    self.runtime_disconnected = true;
                    break;
                }
            }
        }
    }

    fn submit(&mut self) {
        let SubmitOutcome::Dispatch { ticket, request } = self.controller.submit() else {
            return;
        };

        if let Err(error) = self
            .command_tx
            .send(DashboardCommand::Analyze { ticket, request })
        {
            self.runtime_disconnected = true;
            self.controller
                .apply_result(ticket, Err(format!("runtime worker unavailable: {error}")));
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.heading(
                egui::RichText::new(APP_TITLE)
                    .color(BRAND_PRIMARY)
                    .strong()
                    .size(26.0),
            );
            ui.label(egui::RichText::new(HEADER_SUBTITLE).color(MUTED_TEXT));
        });
        ui.add_space(8.0);
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for mode in AnalysisMode::ALL {
                let selected = self.controller.mode() == mode;
                if ui.selectable_label(selected, mode.tab_label()).clicked() {
                    self.controller.set_mode(mode);
                }
            }
        });
        ui.add_space(8.0);

        let mode = self.controller.mode();
        let mut submit_requested = false;
        ui.horizontal(|ui| {
            let primary = ui.add(
                egui::TextEdit::singleline(self.controller.primary_input_mut())
                    .hint_text(primary_placeholder(mode))
                    .desired_width(360.0),
            );
            submit_requested |= entered(ui, &primary);

            if mode.needs_secondary_input() {
                let secondary = ui.add(
                    egui::TextEdit::singleline(self.controller.secondary_input_mut())
                        .hint_text(SECONDARY_PLACEHOLDER)
                        .desired_width(360.0),
                );
                submit_requested |= entered(ui, &secondary);
            }

            let loading = self.controller.is_loading();
            let label = if loading { "Analyzing..." } else { "Analyze Now" };
            let enabled = !loading && !self.runtime_disconnected;
            if ui
                .add_enabled(enabled, egui::Button::new(label).fill(BRAND_PRIMARY))
                .clicked()
            {
                submit_requested = true;
            }
            if loading {
                ui.spinner();
            }
        });

        if submit_requested && !self.runtime_disconnected {
            self.submit();
        }
        if self.runtime_disconnected {
            ui.colored_label(
                NEGATIVE_COLOR,
                "Runtime worker is disconnected. Restart the dashboard to continue.",
            );
        }
    }

    fn render_view(&self, ui: &mut egui::Ui) {
        match self.controller.view() {
            DashboardView::Welcome => renderer::render_welcome(ui),
            DashboardView::Loading => renderer::render_loading(ui),
            DashboardView::Error(message) => renderer::render_error(ui, message),
            DashboardView::Brand { data, label } => {
                renderer::render_brand_dashboard(ui, data, label);
            }
            DashboardView::Youtube { data, label } => {
                renderer::render_youtube_dashboard(ui, data, label);
            }
            DashboardView::Competitor { data } => renderer::render_competitor_dashboard(ui, data),
        }
    }
}

const SECONDARY_PLACEHOLDER: &str = "Competitor Handle (e.g., @Adidas)";

fn primary_placeholder(mode: AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::Brand => "Enter a brand, product, or topic (e.g., Starlight Coffee)",
        AnalysisMode::Youtube => "Paste a YouTube video URL",
        AnalysisMode::Competitor => "Your Brand Handle (e.g., @Nike)",
    }
}

fn entered(ui: &egui::Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter))
}

impl Drop for DashboardApp {
    fn drop(&mut self) {
        let _ = self.command_tx.send(DashboardCommand::Shutdown);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::TopBottomPanel::top("dashboard_header").show(ctx, |ui| {
            self.render_header(ui);
            self.render_controls(ui);
            ui.add_space(8.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| self.render_view(ui));
        });

        ctx.request_repaint_after(Duration::from_millis(120));
    }
}

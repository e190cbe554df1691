//! Taskboard desktop app entry point.
//!
//! Sets up logging and configuration, starts the tokio runtime the stores
//! run their requests on, then hands control to eframe.

use std::time::Duration;

use eframe::egui;
use tracing::error;
use tracing_subscriber::EnvFilter;

use taskboard::egui_app::{theme, views, AppState};
use taskboard::shared::AppConfig;

/// Repaint interval so finished requests and expiring toasts show up
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskboard=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let state = AppState::new(config, runtime.handle().clone())?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Taskboard",
        options,
        Box::new(|cc| {
            theme::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(TaskboardApp { state }))
        }),
    )
    .inspect_err(|err| error!(error = %err, "window closed with an error"))?;
    Ok(())
}

struct TaskboardApp {
    state: AppState,
}

impl eframe::App for TaskboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_events();

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);
        views::render_notifications(ctx, &self.state);

        ctx.request_repaint_after(POLL_INTERVAL);
    }
}

mod config;
mod domain;
mod error;
mod infrastructure;
mod plugin;
mod ui;

use config::PanelConfig;
use domain::command_service::CommandService;
use infrastructure::shell_command::ShellCommandService;
use ui::bar::Bar;

use gtk4::prelude::*;
use gtk4::{gdk, glib};
use std::sync::Arc;

fn main() -> glib::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = gtk4::Application::builder()
        .application_id("ru.hyprline.emonitor")
        .build();

    app.connect_startup(|_| {
        let provider = gtk4::CssProvider::new();
        provider.load_from_data(include_str!("styles.css"));

        match gdk::Display::default() {
            Some(display) => gtk4::style_context_add_provider_for_display(
                &display,
                &provider,
                gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
            ),
            None => log::error!("No display available, styles are not applied"),
        }
    });

    app.connect_activate(build_ui);

    app.run()
}

fn build_ui(app: &gtk4::Application) {
    // Повторная активация не создаёт вторую панель
    if app.active_window().is_some() {
        return;
    }

    let config = PanelConfig::load();
    let commands: Arc<dyn CommandService + Send + Sync> = Arc::new(ShellCommandService::new());

    let bar = Bar::new(app, &config, commands);
    bar.present();

    app.connect_shutdown(move |_| bar.shutdown());
}

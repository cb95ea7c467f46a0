use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use gtk4::prelude::*;
use gtk4_layer_shell::{Edge, Layer, LayerShell};
use log::{debug, error, info};

use crate::config::{PanelConfig, PanelEdge, PluginEntry, WidgetPosition};
use crate::domain::command_service::CommandService;
use crate::error::EmonitorError;
use crate::plugin::{find_class, PanelPlugin, PluginContext};

pub struct Bar {
    window: gtk4::ApplicationWindow,
    plugins: Rc<RefCell<Vec<Box<dyn PanelPlugin>>>>,
}

impl Bar {
    pub fn new(
        app: &gtk4::Application,
        config: &PanelConfig,
        commands: Arc<dyn CommandService + Send + Sync>,
    ) -> Self {
        let window = gtk4::ApplicationWindow::new(app);

        window.init_layer_shell();
        window.set_title(Some("Bar - emonitor"));
        window.set_layer(Layer::Top);

        let edge = match config.edge {
            PanelEdge::Top => Edge::Top,
            PanelEdge::Bottom => Edge::Bottom,
        };
        window.set_anchor(edge, true);
        window.set_anchor(Edge::Left, true);
        window.set_anchor(Edge::Right, true);
        window.auto_exclusive_zone_enable();
        window.add_css_class("window");

        // Создаём три зоны
        let left_box = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
        left_box.add_css_class("zone-left");
        left_box.set_halign(gtk4::Align::Start);

        let center_box = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
        center_box.add_css_class("zone-center");
        center_box.set_halign(gtk4::Align::Center);
        center_box.set_hexpand(true);

        let right_box = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
        right_box.add_css_class("zone-right");
        right_box.set_halign(gtk4::Align::End);

        let main_box = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
        main_box.add_css_class("line");
        main_box.append(&left_box);
        main_box.append(&center_box);
        main_box.append(&right_box);

        let mut plugins = Vec::new();
        for (position, target_box) in [
            (WidgetPosition::Left, &left_box),
            (WidgetPosition::Center, &center_box),
            (WidgetPosition::Right, &right_box),
        ] {
            for entry in config.plugins_for_position(position) {
                // Плагин с ошибкой конфигурации отключается, остальные продолжают работу
                match Self::load_plugin(entry, &commands) {
                    Ok(plugin) => {
                        target_box.append(plugin.widget());
                        plugins.push(plugin);
                    }
                    Err(e) => error!("{}: {}, plugin disabled", entry.plugin_type, e),
                }
            }
        }
        info!("Loaded {} of {} plugins", plugins.len(), config.plugins.len());

        window.set_child(Some(&main_box));

        let plugins = Rc::new(RefCell::new(plugins));

        // При закрытии панели вызываем деструкторы плагинов
        let plugins_on_close = plugins.clone();
        window.connect_close_request(move |_| {
            Self::destruct_plugins(&plugins_on_close);
            gtk4::glib::Propagation::Proceed
        });

        Self { window, plugins }
    }

    fn load_plugin(
        entry: &PluginEntry,
        commands: &Arc<dyn CommandService + Send + Sync>,
    ) -> Result<Box<dyn PanelPlugin>, EmonitorError> {
        let class = find_class(&entry.plugin_type)?;
        debug!(
            "Constructing {} v{} ({}): {}",
            class.name, class.version, class.type_name, class.description
        );
        let context = PluginContext {
            config: entry.config_lines(),
            commands: commands.clone(),
        };
        (class.constructor)(&context)
    }

    fn destruct_plugins(plugins: &Rc<RefCell<Vec<Box<dyn PanelPlugin>>>>) {
        for mut plugin in plugins.borrow_mut().drain(..) {
            plugin.destruct();
        }
    }

    /// Деструкторы плагинов при завершении приложения
    pub fn shutdown(&self) {
        Self::destruct_plugins(&self.plugins);
    }

    pub fn present(&self) {
        self.window.present();
    }
}

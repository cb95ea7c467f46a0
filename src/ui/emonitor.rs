use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::thread;

use gtk4::prelude::*;
use gtk4::{glib, pango};
use log::{debug, info};

use crate::config::EmonitorConfig;
use crate::domain::click_handler::ClickHandler;
use crate::domain::status_poller::{PollOutcome, StatusPoller};
use crate::error::EmonitorError;
use crate::plugin::{PanelPlugin, PluginClass, PluginContext};

pub static EMONITOR_PLUGIN_CLASS: PluginClass = PluginClass {
    type_name: "emonitor",
    name: "External monitor",
    version: "0.1",
    description: "Show output of external program",
    constructor: EmonitorPlugin::construct,
};

/// Виджет, показывающий первую строку вывода внешней команды
pub struct EmonitorPlugin {
    container: gtk4::Box,
    widget: gtk4::Widget,
    timer: Option<glib::SourceId>,
    receiver: Option<glib::JoinHandle<()>>,
}

impl EmonitorPlugin {
    pub fn new(config: EmonitorConfig, context: &PluginContext) -> Self {
        let container = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
        container.add_css_class("emonitor");

        let label = gtk4::Label::new(None);
        label.add_css_class("emonitor-label");
        label.set_halign(gtk4::Align::Center);
        label.set_valign(gtk4::Align::Center);
        if let Some(width) = config.width {
            label.set_size_request(width, -1);
        }
        container.append(&label);

        // Клик любой кнопкой запускает OnClickCommand
        let click_handler = ClickHandler::new(config.on_click_command.clone(), context.commands.clone());
        let gesture = gtk4::GestureClick::new();
        gesture.set_button(0);
        gesture.connect_pressed(move |gesture, _, _, _| {
            click_handler.handle();
            gesture.set_state(gtk4::EventSequenceState::Claimed);
        });
        container.add_controller(gesture);

        let poller = Rc::new(RefCell::new(StatusPoller::new(
            config.external_command.clone(),
            context.commands.clone(),
        )));
        let busy = Rc::new(Cell::new(false));
        let (tx, rx) = async_channel::unbounded::<PollOutcome>();

        // Результаты опроса применяются в главном потоке GTK
        let receiver = {
            let poller = poller.clone();
            let busy = busy.clone();
            let label = label.clone();
            glib::spawn_future_local(async move {
                while let Ok(outcome) = rx.recv().await {
                    if Self::accept_status(&poller, &busy, outcome) {
                        Self::set_status(&label, poller.borrow().status());
                    }
                }
            })
        };

        // Первоначальное обновление
        Self::request_status(&poller, &busy, &tx);

        let timer = glib::timeout_add_local(config.update_interval, move || {
            Self::request_status(&poller, &busy, &tx);
            glib::ControlFlow::Continue
        });

        info!(
            "emonitor: polling {:?} every {:?}",
            config.external_command, config.update_interval
        );

        let widget = container.clone().upcast::<gtk4::Widget>();
        Self {
            container,
            widget,
            timer: Some(timer),
            receiver: Some(receiver),
        }
    }

    /// Конструктор для реестра плагинов панели
    pub fn construct(context: &PluginContext) -> Result<Box<dyn PanelPlugin>, EmonitorError> {
        let config = EmonitorConfig::from_lines(&context.config)?;
        Ok(Box::new(Self::new(config, context)))
    }

    /// Запускает команду в рабочем потоке, если предыдущий запуск уже завершился
    fn request_status(
        poller: &Rc<RefCell<StatusPoller>>,
        busy: &Rc<Cell<bool>>,
        tx: &async_channel::Sender<PollOutcome>,
    ) {
        if busy.replace(true) {
            debug!("emonitor: previous poll still running, skipping tick");
            return;
        }

        let job = poller.borrow().fetch_job();
        let tx = tx.clone();
        thread::spawn(move || {
            let _ = tx.send_blocking(job());
        });
    }

    /// Принимает результат рабочего потока и разрешает следующий запуск.
    /// Возвращает true, если текст статуса изменился.
    fn accept_status(poller: &RefCell<StatusPoller>, busy: &Cell<bool>, outcome: PollOutcome) -> bool {
        busy.set(false);
        poller.borrow_mut().apply(outcome)
    }

    /// Показывает статус как Pango-разметку, невалидная разметка выводится как текст
    fn set_status(label: &gtk4::Label, status: &str) {
        if is_valid_markup(status) {
            label.set_markup(status);
        } else {
            label.set_text(status);
        }
    }
}

fn is_valid_markup(text: &str) -> bool {
    pango::parse_markup(text, '\0').is_ok()
}

impl PanelPlugin for EmonitorPlugin {
    fn widget(&self) -> &gtk4::Widget {
        &self.widget
    }

    fn destruct(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.remove();
        }
        if let Some(receiver) = self.receiver.take() {
            receiver.abort();
        }
        if let Some(parent) = self.container.parent().and_downcast::<gtk4::Box>() {
            parent.remove(&self.container);
        }
    }
}

impl Drop for EmonitorPlugin {
    fn drop(&mut self) {
        self.destruct();
    }
}

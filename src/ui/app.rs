use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::{LocaleCategory, setlocale, textdomain};
use gio::SimpleAction;
use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;
use tracing::{error, warn};

use crate::config::GameConfig;
use crate::game::RoundController;
use crate::records::Scoreboard;

use super::dialogs::{show_about_dialog, show_instructions_dialog};
use super::host::{GameLink, GtkHost, SharedGame, records_path};

pub const APP_ID: &str = "io.github.memory.Memory";
const GETTEXT_PACKAGE: &str = "memory";
const CONTENT_MARGIN: i32 = 12;

const STYLE: &str = "
.memory-board { background-color: #1d3b2a; }
.memory-card { padding: 0; border-radius: 10px; transition: transform 150ms ease-in-out; }
.memory-card.flipping { transform: scale(0.05, 1); }
.memory-time { color: #ffffff; font-size: 28px; font-weight: bold; }
";

fn load_css() {
    let Some(display) = gtk::gdk::Display::default() else {
        return;
    };
    let provider = gtk::CssProvider::new();
    #[allow(deprecated)]
    provider.load_from_data(STYLE);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn add_app_actions(app: &adw::Application, link: &GameLink) {
    let restart_action = SimpleAction::new("restart", None);
    restart_action.connect_activate({
        let link = link.clone();
        move |_, _| {
            link.dispatch(|game| {
                if let Err(err) = game.restart() {
                    warn!(error = %err, "restart ignored");
                }
            });
        }
    });
    app.add_action(&restart_action);

    let instructions_action = SimpleAction::new("instructions", None);
    instructions_action.connect_activate({
        let app = app.clone();
        move |_, _| {
            show_instructions_dialog(&app);
        }
    });
    app.add_action(&instructions_action);

    let about_action = SimpleAction::new("about", None);
    about_action.connect_activate({
        let app = app.clone();
        move |_, _| {
            show_about_dialog(&app);
        }
    });
    app.add_action(&about_action);

    let quit_action = SimpleAction::new("quit", None);
    quit_action.connect_activate({
        let app = app.clone();
        move |_, _| app.quit()
    });
    app.add_action(&quit_action);

    app.set_accels_for_action("app.restart", &["<Control>r"]);
    app.set_accels_for_action("app.quit", &["<Control>q"]);
}

fn build_header(title: &adw::WindowTitle) -> adw::HeaderBar {
    let header = adw::HeaderBar::builder().title_widget(title).build();
    header.add_css_class("flat");

    let restart_button = gtk::Button::builder()
        .icon_name("view-refresh-symbolic")
        .tooltip_text("Deal again")
        .action_name("app.restart")
        .build();
    header.pack_start(&restart_button);

    let menu = gio::Menu::new();
    menu.append(Some("How to Play"), Some("app.instructions"));
    menu.append(Some("About Memory"), Some("app.about"));
    menu.append(Some("Quit"), Some("app.quit"));
    let menu_button = gtk::MenuButton::builder()
        .icon_name("open-menu-symbolic")
        .menu_model(&menu)
        .build();
    header.pack_end(&menu_button);
    header
}

fn build_window(app: &adw::Application, config: &GameConfig) {
    load_css();

    let viewport = config.board.viewport();
    let board = gtk::Fixed::new();
    board.set_size_request(viewport.width as i32, viewport.height as i32);
    board.set_overflow(gtk::Overflow::Hidden);
    board.set_halign(gtk::Align::Center);
    board.set_valign(gtk::Align::Center);

    let title = adw::WindowTitle::new("Memory", "");
    let link = GameLink::default();
    let host = GtkHost::new(
        link.clone(),
        board.clone(),
        title.clone(),
        viewport,
        config.board.card(),
    );

    let game: SharedGame = match RoundController::new(config.clone(), host) {
        Ok(game) => Rc::new(RefCell::new(
            game.with_scoreboard(Scoreboard::load_or_default(records_path())),
        )),
        Err(err) => {
            error!(error = %err, "cannot set up the board");
            app.quit();
            return;
        }
    };
    link.attach(&game);
    add_app_actions(app, &link);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 0);
    content.set_margin_top(CONTENT_MARGIN);
    content.set_margin_bottom(CONTENT_MARGIN);
    content.set_margin_start(CONTENT_MARGIN);
    content.set_margin_end(CONTENT_MARGIN);
    content.append(&board);

    let toolbar = adw::ToolbarView::new();
    toolbar.add_top_bar(&build_header(&title));
    toolbar.set_content(Some(&content));

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Memory")
        .content(&toolbar)
        .build();

    {
        let mut game = game.borrow_mut();
        game.start();
        game.host().refresh_records(game.round(), game.scoreboard());
    }

    // The window owns the controller; callbacks only hold weak links.
    window.connect_close_request(move |_| {
        if let Ok(game) = game.try_borrow() {
            if let Err(err) = game.scoreboard().save(records_path()) {
                warn!(error = %err, "failed to save records");
            }
        }
        glib::Propagation::Proceed
    });
    window.present();
}

pub fn run(config: GameConfig) -> glib::ExitCode {
    setlocale(LocaleCategory::LcAll, "");
    if let Err(err) = textdomain(GETTEXT_PACKAGE) {
        warn!(error = %err, "translations unavailable");
    }

    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();
    app.connect_activate(move |app| build_window(app, &config));
    app.run_with_args::<&str>(&[])
}

use gettextrs::gettext;
use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let body = gettext(
        "Flip two cards at a time and find every pair.\n\
Mismatched cards turn back over.\n\
Clear the board before the clock runs out or the cards are dealt again.",
    );
    let dialog = adw::AlertDialog::new(Some(gettext("How to Play").as_str()), Some(body.as_str()));
    dialog.add_response("ok", &gettext("Got it"));
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Memory")
        .application_icon(super::app::APP_ID)
        .version(env!("CARGO_PKG_VERSION"))
        .comments(gettext("Find the pairs before time runs out."))
        .build();
    dialog.add_legal_section("Memory", None, gtk::License::MitX11, None);
    dialog.present(app.active_window().as_ref());
    dialog
}

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use pangocairo::pango;

use crate::game::Size;
use crate::game::card::BACK_TEXTURE;

/// One card sprite on the board.
pub(super) struct CardWidget {
    pub button: gtk::Button,
    area: gtk::DrawingArea,
    texture: Rc<RefCell<String>>,
    pub depth: i32,
    /// Id of the move that currently owns the sprite's position.
    pub motion: Rc<Cell<u64>>,
}

impl CardWidget {
    pub fn set_texture(&self, texture: &str) {
        *self.texture.borrow_mut() = texture.to_string();
        self.area.queue_draw();
    }

    pub fn texture_handle(&self) -> Rc<RefCell<String>> {
        self.texture.clone()
    }

    pub fn area(&self) -> gtk::DrawingArea {
        self.area.clone()
    }
}

fn label_for(texture: &str) -> &str {
    if texture == BACK_TEXTURE {
        return "?";
    }
    texture.strip_prefix(BACK_TEXTURE).unwrap_or(texture)
}

fn draw_card_label(cr: &cairo::Context, fg: gtk::gdk::RGBA, text: &str, width: i32, height: i32) {
    let min_dim = width.min(height) as f64;
    let is_back = text == "?";

    cr.set_antialias(cairo::Antialias::Best);
    let layout = pangocairo::functions::create_layout(cr);
    let mut font_desc = pango::FontDescription::new();
    font_desc.set_family("Cantarell, Noto Sans, sans");
    if is_back {
        font_desc.set_weight(pango::Weight::Bold);
    }
    let font_size = if is_back { min_dim * 0.34 } else { min_dim * 0.40 };
    font_desc.set_size((font_size * pango::SCALE as f64) as i32);
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);

    cr.set_source_rgba(
        fg.red() as f64,
        fg.green() as f64,
        fg.blue() as f64,
        fg.alpha() as f64,
    );
    let (text_width, text_height) = layout.pixel_size();
    cr.move_to(
        (width as f64 - text_width as f64) / 2.0,
        (height as f64 - text_height as f64) / 2.0,
    );
    pangocairo::functions::show_layout(cr, &layout);
}

pub(super) fn build_card_widget(
    texture: &str,
    size: Size,
    on_click: impl Fn() + 'static,
) -> CardWidget {
    let button = gtk::Button::builder()
        .css_classes(vec!["memory-card"])
        .build();
    button.set_size_request(size.width as i32, size.height as i32);

    let area = gtk::DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .build();
    area.add_css_class("memory-card-label");

    let texture = Rc::new(RefCell::new(texture.to_string()));
    let texture_draw = texture.clone();
    area.set_draw_func(move |area, cr, width, height| {
        let current = texture_draw.borrow();
        #[allow(deprecated)]
        let fg = area.style_context().color();
        draw_card_label(cr, fg, label_for(&current), width, height);
    });

    button.set_child(Some(&area));
    button.connect_clicked(move |_| on_click());

    CardWidget {
        button,
        area,
        texture,
        depth: 0,
        motion: Rc::new(Cell::new(0)),
    }
}

/// Top-left corner for a sprite centred on `(x, y)`.
pub(super) fn top_left(x: f64, y: f64, size: Size) -> (f64, f64) {
    (x - size.width / 2.0, y - size.height / 2.0)
}

pub(super) fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(2)
}

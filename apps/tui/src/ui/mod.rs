// UI module for the neighborhood map terminal UI
// Handles all rendering

pub mod screens;
pub mod widgets;

use crate::app::App;
use neighborhood_map_core::TextDirection;
use ratatui::layout::Alignment;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::main::render_main(app, f);

    if app.controller.map().open_popup_content().is_some() {
        screens::location::render_location_popup(app, f);
    }

    if app.show_help {
        screens::main::render_help_popup(app, f);
    }
}

/// Right-to-left languages read from the right edge.
pub const fn text_alignment(direction: TextDirection) -> Alignment {
    match direction {
        TextDirection::Rtl => Alignment::Right,
        TextDirection::Ltr => Alignment::Left,
    }
}

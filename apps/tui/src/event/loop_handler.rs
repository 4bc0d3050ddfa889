use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use neighborhood_map_core::map::MarkerLayer;
use neighborhood_map_core::{Controller, LocationId, SidebarView};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;

use crate::app::{handle_input, App};
use crate::ui;

/// Print the filtered listing without starting the UI
pub fn run_headless(controller: &Controller<MarkerLayer>, json: bool) -> Result<()> {
    let report = build_headless_report(controller);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_headless_text(&report));
    }
    Ok(())
}

fn render_headless_text(report: &HeadlessReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", report.title));
    out.push_str(&format!("{}\n", "=".repeat(report.title.chars().count())));
    out.push_str(&format!(
        "Language: {} ({})\n",
        report.language, report.direction
    ));
    out.push_str(&format!("Category: {}\n", report.category_label));
    if !report.search.is_empty() {
        out.push_str(&format!("Search: {}\n", report.search));
    }
    out.push_str(&format!(
        "Showing {} of {} locations\n",
        report.visible_locations, report.total_locations
    ));

    if let Some(message) = &report.message {
        out.push_str(&format!("\n{message}\n"));
        return out;
    }

    for group in &report.groups {
        out.push_str(&format!("\n{} ({}):\n", group.label, group.locations.len()));
        for location in &group.locations {
            out.push_str(&format!(
                "- {} | {} | {:.4}, {:.4}\n  {}\n",
                location.id,
                location.name,
                location.coordinates[0],
                location.coordinates[1],
                location.summary
            ));
        }
    }
    out
}

fn build_headless_report(controller: &Controller<MarkerLayer>) -> HeadlessReport {
    let state = controller.state();
    let strings = controller.strings();

    let (groups, message) = match controller.sidebar() {
        SidebarView::Groups(groups) => (
            groups
                .iter()
                .map(|group| HeadlessGroup {
                    category: group.category.as_str().to_string(),
                    label: group.heading.clone(),
                    locations: group
                        .items
                        .iter()
                        .map(|item| HeadlessLocation {
                            id: item.id,
                            name: item.title.clone(),
                            summary: item.summary.clone(),
                            coordinates: controller
                                .catalog()
                                .get(item.id)
                                .map_or([0.0, 0.0], |record| {
                                    [record.coordinates.lat, record.coordinates.lon]
                                }),
                            image: popup_image(controller, item.id),
                        })
                        .collect(),
                })
                .collect(),
            None,
        ),
        SidebarView::NoResults { message } => (Vec::new(), Some(message.clone())),
        SidebarView::Pending => (Vec::new(), None),
    };

    HeadlessReport {
        title: strings.title.to_string(),
        language: state.language().code().to_string(),
        direction: state.language().direction().as_str().to_string(),
        category: state.category_filter().as_str().to_string(),
        category_label: state.category_filter().label(strings).to_string(),
        search: state.search_text().to_string(),
        total_locations: controller.catalog().len(),
        visible_locations: controller.sidebar().item_count(),
        groups,
        message,
    }
}

fn popup_image(controller: &Controller<MarkerLayer>, id: LocationId) -> Option<String> {
    let marker = controller.sync().marker_for(id)?;
    controller
        .map()
        .marker(marker)?
        .popup
        .as_ref()
        .map(|popup| popup.image.clone())
}

#[derive(Debug, serde::Serialize)]
struct HeadlessReport {
    title: String,
    language: String,
    direction: String,
    category: String,
    category_label: String,
    search: String,
    total_locations: usize,
    visible_locations: usize,
    groups: Vec<HeadlessGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Debug, serde::Serialize)]
struct HeadlessGroup {
    category: String,
    label: String,
    locations: Vec<HeadlessLocation>,
}

#[derive(Debug, serde::Serialize)]
struct HeadlessLocation {
    id: LocationId,
    name: String,
    summary: String,
    coordinates: [f64; 2],
    image: Option<String>,
}

/// Run the main application event loop
pub fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    while app.running {
        // Advance animations and fire due searches
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    handle_input(app, key.code);
                }
                Ok(Event::Resize(width, height)) => {
                    tracing::debug!(width, height, "terminal resized");
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "failed to read terminal event"),
            }
        }
    }
    tracing::info!("event loop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use neighborhood_map_core::{
        Catalog, Category, CategoryFilter, ControllerOptions, Language, ViewState,
    };

    fn controller(initial: ViewState) -> Controller<MarkerLayer> {
        Controller::new(
            Catalog::embedded().expect("embedded catalog"),
            MarkerLayer::default(),
            ControllerOptions {
                initial,
                ..ControllerOptions::default()
            },
        )
    }

    #[test]
    fn report_lists_grouped_locations() {
        let mut state = ViewState::new();
        state.set_category_filter(CategoryFilter::Only(Category::Sport));
        let report = build_headless_report(&controller(state));

        assert_eq!(report.visible_locations, 3);
        assert_eq!(report.total_locations, 15);
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].label, "Sports");
        let ids: Vec<_> = report.groups[0].locations.iter().map(|l| l.id).collect();
        assert_eq!(ids, [7, 8, 9]);
        assert_eq!(report.groups[0].locations[2].image.as_deref(), Some("gym.png"));
    }

    #[test]
    fn empty_report_carries_localized_message() {
        let mut state = ViewState::new();
        state.set_language(Language::Ar);
        state.set_category_filter(CategoryFilter::Only(Category::Company));
        let report = build_headless_report(&controller(state));

        assert!(report.groups.is_empty());
        assert_eq!(report.direction, "rtl");
        assert_eq!(report.message.as_deref(), Some("لا توجد أماكن تطابق بحثك."));
        assert!(render_headless_text(&report).ends_with("لا توجد أماكن تطابق بحثك.\n"));
    }

    #[test]
    fn json_report_has_stable_shape() {
        let mut state = ViewState::new();
        state.set_search_text("coffee");
        let report = build_headless_report(&controller(state));
        let value = serde_json::to_value(&report).expect("serializable");

        assert_eq!(value["search"], "coffee");
        assert_eq!(value["groups"][0]["category"], "coffeeshop");
        assert_eq!(value["groups"][0]["locations"][0]["id"], 10);
        assert!(value.get("message").is_none());
    }

    #[test]
    fn text_report_shows_each_location() {
        let report = build_headless_report(&controller(ViewState::new()));
        let text = render_headless_text(&report);
        assert!(text.contains("Showing 15 of 15 locations"));
        assert!(text.contains("- 5 | Tripoli Train Station |"));
    }
}

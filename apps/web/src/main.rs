mod clock;
mod input;
mod view;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use neighborhood_map_core::{Catalog, Controller, ControllerOptions, MarkerLayer};
use ratzilla::ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::input::{handle_key, WebApp};

const CATALOG_URL: &str = "locations.json";

fn main() -> io::Result<()> {
    let app = Rc::new(RefCell::new(None::<WebApp>));
    let started = js_sys::Date::now();

    spawn_local(load_catalog(app.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let app = app.clone();
        move |event| {
            let now = clock::elapsed_since(started, js_sys::Date::now());
            if let Some(app) = app.borrow_mut().as_mut() {
                handle_key(app, event.code, event.alt, now);
            }
        }
    });

    terminal.draw_web(move |f| {
        let area = f.area();
        let now = clock::elapsed_since(started, js_sys::Date::now());
        let mut app = app.borrow_mut();
        if let Some(app) = app.as_mut() {
            app.tick(now);
            view::render(app, f, area);
        } else {
            let paragraph = Paragraph::new("Loading locations...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            f.render_widget(paragraph, area);
        }
    });

    Ok(())
}

/// Falls back to the catalog compiled into the binary when the served file
/// is missing or broken.
async fn load_catalog(store: Rc<RefCell<Option<WebApp>>>) {
    let catalog = match fetch_catalog().await {
        Ok(catalog) => catalog,
        Err(message) => {
            web_sys::console::error_1(&message.into());
            match Catalog::embedded() {
                Ok(catalog) => catalog,
                Err(error) => {
                    web_sys::console::error_1(
                        &format!("Failed to load embedded catalog: {error}").into(),
                    );
                    return;
                }
            }
        }
    };

    let controller = Controller::new(catalog, MarkerLayer::default(), ControllerOptions::default());
    *store.borrow_mut() = Some(WebApp::new(controller));
}

async fn fetch_catalog() -> Result<Catalog, String> {
    let window = web_sys::window().ok_or("No window")?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(CATALOG_URL, &opts)
        .map_err(|_| format!("Failed to build request for {CATALOG_URL}"))?;

    let response_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| format!("Failed to fetch {CATALOG_URL}"))?;

    let response = response_value
        .dyn_into::<Response>()
        .map_err(|_| "Failed to read response".to_string())?;
    if !response.ok() {
        return Err(format!("{CATALOG_URL} returned {}", response.status()));
    }

    let body = response
        .json()
        .map_err(|_| format!("Failed to read {CATALOG_URL} body"))?;
    let json = wasm_bindgen_futures::JsFuture::from(body)
        .await
        .map_err(|_| format!("Failed to read {CATALOG_URL} body"))?;

    let value = serde_wasm_bindgen::from_value::<serde_json::Value>(json)
        .map_err(|error| format!("Failed to parse {CATALOG_URL}: {error}"))?;
    Catalog::from_value(value).map_err(|error| format!("Invalid {CATALOG_URL}: {error}"))
}

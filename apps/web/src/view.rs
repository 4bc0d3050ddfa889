use neighborhood_map_core::map::Marker;
use neighborhood_map_core::popup::Popup;
use neighborhood_map_core::{
    Category, CategoryFilter, Language, LocationId, SidebarView, TextDirection,
};
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{
        canvas::{Canvas, Circle},
        Block, Borders, Clear, Paragraph, Wrap,
    },
    Frame,
};

use crate::input::WebApp;

const fn category_color(category: Category) -> Color {
    match category {
        Category::Home => Color::Rgb(231, 76, 60),
        Category::Telecom => Color::Rgb(52, 152, 219),
        Category::Retail => Color::Rgb(155, 89, 182),
        Category::Abandoned => Color::Rgb(127, 140, 141),
        Category::Sport => Color::Rgb(46, 204, 113),
        Category::Coffeeshop => Color::Rgb(230, 126, 34),
        Category::Health => Color::Rgb(26, 188, 156),
        Category::Company => Color::Rgb(241, 196, 15),
    }
}

const fn alignment(direction: TextDirection) -> Alignment {
    match direction {
        TextDirection::Ltr => Alignment::Left,
        TextDirection::Rtl => Alignment::Right,
    }
}

/// Splits `area` into a leading and a trailing part, mirrored for RTL.
fn split_by_direction(area: Rect, lead: u16, direction: TextDirection) -> (Rect, Rect) {
    let constraints = if direction.is_rtl() {
        [Constraint::Percentage(100 - lead), Constraint::Percentage(lead)]
    } else {
        [Constraint::Percentage(lead), Constraint::Percentage(100 - lead)]
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    if direction.is_rtl() {
        (chunks[1], chunks[0])
    } else {
        (chunks[0], chunks[1])
    }
}

pub fn render(app: &WebApp, f: &mut Frame<'_>, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(app, f, layout[0]);
    render_controls(app, f, layout[1]);

    let direction = app.controller.direction();
    let (sidebar_area, map_area) = split_by_direction(layout[2], 35, direction);
    render_sidebar(app, f, sidebar_area);
    render_map(app, f, map_area);
    render_footer(app, f, layout[3]);

    if let Some(popup) = app.controller.map().open_popup_content() {
        render_popup(popup, f, map_area);
    }
}

fn render_header(app: &WebApp, f: &mut Frame<'_>, area: Rect) {
    let strings = app.controller.strings();
    let direction = app.controller.direction();
    let active = app.controller.language();

    let mut switch = Vec::new();
    for language in Language::ALL {
        let style = if language == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        switch.push(Span::styled(format!(" {} ", language.native_name()), style));
    }

    let text = Text::from(vec![
        TextLine::from(Span::styled(
            strings.title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(switch),
    ]);
    f.render_widget(Paragraph::new(text).alignment(alignment(direction)), area);
}

fn render_controls(app: &WebApp, f: &mut Frame<'_>, area: Rect) {
    let strings = app.controller.strings();
    let direction = app.controller.direction();
    let (search_area, filter_area) = split_by_direction(area, 60, direction);

    let input = app.controller.search_input();
    let search = if input.is_empty() {
        Span::styled(strings.search_placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(input.to_string())
    };
    f.render_widget(
        Paragraph::new(TextLine::from(search))
            .alignment(alignment(direction))
            .block(Block::default().borders(Borders::ALL)),
        search_area,
    );

    let filter = app.controller.state().category_filter();
    let style = match filter {
        CategoryFilter::All => Style::default().fg(Color::White),
        CategoryFilter::Only(category) => Style::default()
            .fg(category_color(category))
            .add_modifier(Modifier::BOLD),
    };
    f.render_widget(
        Paragraph::new(Span::styled(format!("◀ {} ▶", filter.label(strings)), style))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        filter_area,
    );
}

fn sidebar_lines(
    view: &SidebarView,
    selected: usize,
    is_highlighted: impl Fn(LocationId) -> bool,
) -> Vec<TextLine<'static>> {
    let mut lines = Vec::new();
    let mut index = 0;
    for group in view.groups() {
        lines.push(TextLine::from(Span::styled(
            group.heading.clone(),
            Style::default()
                .fg(category_color(group.category))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )));
        for item in &group.items {
            let style = if index == selected {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else if is_highlighted(item.id) {
                Style::default().bg(Color::Yellow).fg(Color::Black)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(TextLine::from(Span::styled(item.title.clone(), style)));
            lines.push(TextLine::from(Span::styled(
                item.summary.clone(),
                Style::default().fg(Color::Gray),
            )));
            index += 1;
        }
    }
    lines
}

fn render_sidebar(app: &WebApp, f: &mut Frame<'_>, area: Rect) {
    let strings = app.controller.strings();
    let direction = app.controller.direction();
    let view = app.controller.sidebar();

    let block = Block::default()
        .title(format!(" {} ", strings.sidebar_title))
        .title_alignment(alignment(direction))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = match view {
        SidebarView::Pending => vec![TextLine::from("…")],
        SidebarView::NoResults { message } => vec![TextLine::from(message.clone())],
        SidebarView::Groups(_) => {
            sidebar_lines(view, app.selected, |id| app.controller.is_highlighted(id))
        }
    };

    // rough scroll: keep the selected title in the lower half
    let selected_line = 2 * app.selected + 1;
    let offset = selected_line.saturating_sub(usize::from(inner.height) / 2);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .alignment(alignment(direction))
            .scroll((offset, 0)),
        inner,
    );
}

fn marker_radius(marker: &Marker, now: std::time::Duration, span: f64) -> f64 {
    if marker.is_bouncing(now) {
        span * 0.012
    } else {
        span * 0.007
    }
}

fn render_map(app: &WebApp, f: &mut Frame<'_>, area: Rect) {
    let layer = app.controller.map();
    let viewport = layer.viewport();
    let block = Block::default()
        .title(format!(
            " {:.4}, {:.4} ",
            viewport.center.lat, viewport.center.lon
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let aspect = f64::from(inner.width) / (f64::from(inner.height) * 2.0);
    let (x_bounds, y_bounds) = viewport.bounds(aspect);
    let span = viewport.lon_span();
    let now = layer.now();
    let highlighted = app
        .controller
        .sync()
        .highlight()
        .and_then(|highlight| app.controller.sync().marker_for(highlight.location));

    f.render_widget(
        Canvas::default()
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                for (id, marker) in layer.visible_markers() {
                    ctx.draw(&Circle {
                        x: marker.coordinates.lon,
                        y: marker.coordinates.lat,
                        radius: marker_radius(marker, now, span),
                        color: category_color(marker.icon.category),
                    });
                    if Some(id) == highlighted {
                        ctx.draw(&Circle {
                            x: marker.coordinates.lon,
                            y: marker.coordinates.lat,
                            radius: span * 0.016,
                            color: Color::White,
                        });
                    }
                }
            }),
        inner,
    );
}

fn popup_lines(popup: &Popup) -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(Span::styled(
            popup.category_label.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        TextLine::from(popup.description.clone()),
        TextLine::from(""),
    ];
    for (label, value) in popup.plain_details() {
        lines.push(TextLine::from(vec![
            Span::styled(
                format!("{label}: "),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(value),
        ]));
    }
    lines.push(TextLine::from(Span::styled(
        popup.footer.clone(),
        Style::default().fg(Color::Gray),
    )));
    lines
}

fn render_popup(popup: &Popup, f: &mut Frame<'_>, map_area: Rect) {
    let width = map_area.width.saturating_sub(4).min(60);
    let height = map_area.height.saturating_sub(2).min(16);
    let area = Rect {
        x: map_area.x + (map_area.width - width) / 2,
        y: map_area.y + (map_area.height - height) / 2,
        width,
        height,
    };

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(Text::from(popup_lines(popup)))
            .alignment(alignment(popup.direction()))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(format!(" {} ", popup.title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            ),
        area,
    );
}

fn render_footer(app: &WebApp, f: &mut Frame<'_>, area: Rect) {
    let hint = TextLine::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" select  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" show  "),
        Span::styled("←/→", Style::default().fg(Color::Yellow)),
        Span::raw(" category  "),
        Span::styled("Alt+L", Style::default().fg(Color::Yellow)),
        Span::raw(" language  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" close / clear  "),
        Span::styled(
            app.controller.strings().credit_line(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(hint), area);
}

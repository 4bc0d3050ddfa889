use crate::app::{App, Focus};
use neighborhood_map_core::Category;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

/// Marker colors, matching the legend.
pub const fn category_color(category: Category) -> Color {
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

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Canvas area width over height, in map units.
pub fn canvas_aspect(area: Rect) -> f64 {
    if area.height == 0 {
        return 1.0;
    }
    f64::from(area.width) / (f64::from(area.height) * CELL_ASPECT)
}

/// Vertical lift of a bouncing marker, in degrees of latitude.
fn bounce_lift(span: f64, elapsed_secs: f64) -> f64 {
    (elapsed_secs * 12.0).sin().abs() * span * 0.015
}

pub fn render_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    let layer = app.controller.map();
    let viewport = layer.viewport();
    let focused = app.focus == Focus::Map;

    let block = Block::default()
        .title(TextLine::from(vec![
            Span::styled(
                " Map ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "{:.4}, {:.4} · z{:.1} ",
                    viewport.center.lat, viewport.center.lon, viewport.zoom
                ),
                Style::default().fg(Color::Gray),
            ),
        ]))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 4 || inner.height < 2 {
        return;
    }

    let (x_bounds, y_bounds) = viewport.bounds(canvas_aspect(inner));
    let span = viewport.lon_span();
    let now = layer.now();
    let elapsed_secs = now.as_secs_f64();
    let open = layer.open_marker();
    let cursor = app
        .marker_cursor
        .and_then(|id| app.controller.sync().marker_for(id));
    let highlighted = app
        .controller
        .sync()
        .highlight()
        .and_then(|highlight| app.controller.sync().marker_for(highlight.location));
    let language = app.controller.language();

    let canvas = Canvas::default()
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            // street grid
            let step = span / 8.0;
            let mut lon = (x_bounds[0] / step).floor() * step;
            while lon <= x_bounds[1] {
                ctx.draw(&CanvasLine {
                    x1: lon,
                    y1: y_bounds[0],
                    x2: lon,
                    y2: y_bounds[1],
                    color: Color::Rgb(40, 40, 40),
                });
                lon += step;
            }
            let mut lat = (y_bounds[0] / step).floor() * step;
            while lat <= y_bounds[1] {
                ctx.draw(&CanvasLine {
                    x1: x_bounds[0],
                    y1: lat,
                    x2: x_bounds[1],
                    y2: lat,
                    color: Color::Rgb(40, 40, 40),
                });
                lat += step;
            }
            ctx.layer();

            for (id, marker) in layer.visible_markers() {
                let x = marker.coordinates.lon;
                let lift = if marker.is_bouncing(now) {
                    bounce_lift(span, elapsed_secs)
                } else {
                    0.0
                };
                let y = marker.coordinates.lat + lift;
                let color = category_color(marker.icon.category);

                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color,
                });
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: span * 0.006,
                    color,
                });

                if Some(id) == cursor || Some(id) == highlighted {
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: span * 0.014,
                        color: Color::White,
                    });
                }

                if Some(id) == open || Some(id) == cursor {
                    if let Some(popup) = &marker.popup {
                        ctx.print(
                            x + span * 0.02,
                            y,
                            TextLine::from(Span::styled(
                                popup.title.clone(),
                                Style::default()
                                    .fg(Color::White)
                                    .add_modifier(Modifier::BOLD),
                            )),
                        );
                    }
                }
            }
        });

    f.render_widget(canvas, inner);

    if layer.visible_markers().next().is_none() {
        let message = language.strings().no_results;
        let hint = ratatui::widgets::Paragraph::new(message)
            .alignment(ratatui::layout::Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(
            hint,
            Rect {
                y: inner.y + inner.height / 2,
                height: 1,
                ..inner
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_distinct_color() {
        let colors: std::collections::HashSet<_> = Category::ALL
            .into_iter()
            .map(|category| format!("{:?}", category_color(category)))
            .collect();
        assert_eq!(colors.len(), Category::ALL.len());
    }

    #[test]
    fn aspect_accounts_for_tall_cells() {
        let aspect = canvas_aspect(Rect::new(0, 0, 80, 20));
        assert!((aspect - 2.0).abs() < f64::EPSILON);
        assert!((canvas_aspect(Rect::new(0, 0, 80, 0)) - 1.0).abs() < f64::EPSILON);
    }
}

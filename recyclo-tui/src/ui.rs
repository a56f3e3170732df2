use ratatui::{
    layout::Flex,
    prelude::*,
    symbols::Marker,
    widgets::{
        Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
        canvas::{Canvas, Map, MapResolution, Points},
    },
};
use recyclo_core::{
    model::{OpeningHours, RecyclingCenter, Region},
    text::Expandable,
};

use crate::app::{App, Modal};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new(header_text(app))
        .block(Block::default().borders(Borders::ALL).title("Recyclo"));
    frame.render_widget(header, *header_area);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(*content_area);
    if let [map_area, list_area] = content_chunks.as_ref() {
        draw_map(frame, app, *map_area);
        draw_center_list(frame, app, *list_area);
    }

    draw_status(frame, app, *status_area);

    if app.search.is_dialog_open() {
        draw_search_dialog(frame, app, area);
        return;
    }
    match &app.modal {
        Some(Modal::Filter) => draw_filter_dialog(frame, area),
        Some(Modal::Detail(_)) => {
            if let Some(center) = app.detail_center() {
                draw_detail_dialog(frame, center, app.expanded, area);
            }
        }
        None => {}
    }
}

fn header_text(app: &App) -> String {
    let keyword = app.search.committed().trim();
    if keyword.is_empty() {
        "recyclo – recycling centers near you".to_owned()
    } else {
        format!("recyclo – where to recycle “{keyword}”")
    }
}

fn draw_status(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let nav_hint = if app.search.is_dialog_open() {
        "Type an item · Enter search · Esc close (empty clears)"
    } else {
        match app.modal {
            Some(Modal::Filter) => "Esc close",
            Some(Modal::Detail(_)) => "m more/less · d directions · Esc close",
            None => "↑/↓ move · Enter details · / search · x clear · f filters · q quit",
        }
    };

    let (status_text, status_style) = if app.centers.is_loading() {
        (
            format!("Loading… · {nav_hint}"),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (nav_hint.to_owned(), Style::default())
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, area);
}

fn draw_map(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Map");

    let Some(region) = app.region else {
        let paragraph = Paragraph::new("Waiting for your location…")
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let centers = app.centers.centers();
    let (x_bounds, y_bounds) = view_bounds(&region, centers);
    let markers: Vec<(f64, f64)> = centers
        .iter()
        .map(|center| (center.location.longitude, center.location.latitude))
        .collect();
    let selected = app
        .selected_center()
        .map(|center| (center.location.longitude, center.location.latitude));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &markers,
                color: Color::Green,
            });
            ctx.print(
                region.center.longitude,
                region.center.latitude,
                Span::styled("✚", Style::default().fg(Color::Cyan)),
            );
            if let Some((longitude, latitude)) = selected {
                ctx.print(
                    longitude,
                    latitude,
                    Span::styled(
                        "◉",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    frame.render_widget(canvas, area);
}

/// Visible map window: the region's span, widened until every marker fits.
///
/// Returns `(longitude bounds, latitude bounds)`.
pub(crate) fn view_bounds(region: &Region, centers: &[RecyclingCenter]) -> ([f64; 2], [f64; 2]) {
    let half_lng = region.longitude_delta / 2.0;
    let half_lat = region.latitude_delta / 2.0;

    let mut west = region.center.longitude - half_lng;
    let mut east = region.center.longitude + half_lng;
    let mut south = region.center.latitude - half_lat;
    let mut north = region.center.latitude + half_lat;

    for center in centers {
        west = west.min(center.location.longitude);
        east = east.max(center.location.longitude);
        south = south.min(center.location.latitude);
        north = north.max(center.location.latitude);
    }

    // keep edge markers off the border
    let pad_lng = (east - west) * 0.05;
    let pad_lat = (north - south) * 0.05;
    (
        [west - pad_lng, east + pad_lng],
        [south - pad_lat, north + pad_lat],
    )
}

fn draw_center_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let centers = app.centers.centers();

    let title = if app.centers.is_loading() {
        "Recycling centers (loading…)".to_owned()
    } else {
        format!("Recycling centers ({})", centers.len())
    };

    let items = if centers.is_empty() {
        let hint = if app.centers.is_loading() {
            "Looking for recycling centers…"
        } else {
            "No recycling centers found. Press / to search for an item."
        };
        vec![ListItem::new(hint)]
    } else {
        centers
            .iter()
            .map(|center| {
                let mut name = vec![Span::styled(
                    center.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )];
                if let Some(rating) = center.rating {
                    name.push(Span::raw(format!("  ★ {rating:.1}")));
                }
                ListItem::new(Text::from(vec![
                    Line::from(name),
                    Line::styled(center.address.clone(), Style::default().fg(Color::Gray)),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_symbol("> ")
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !centers.is_empty() {
        state.select(Some(app.list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

fn draw_search_dialog(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let popup = popup_area(area, 60, 20);
    let draft = app.search.draft();

    let text = if draft.is_empty() {
        Line::from(vec![
            Span::styled("e.g. batteries, paint, tires", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![Span::raw(draft.to_owned()), Span::raw("▏")])
    };

    let dialog = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search by item (Enter search, Esc close)"),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup);
    frame.render_widget(dialog, popup);
}

fn draw_filter_dialog(frame: &mut Frame<'_>, area: Rect) {
    let popup = popup_area(area, 50, 30);
    let dialog = Paragraph::new("Filters are not available yet.\n\nPress Esc to close.")
        .block(Block::default().borders(Borders::ALL).title("Filters"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup);
    frame.render_widget(dialog, popup);
}

fn draw_detail_dialog(
    frame: &mut Frame<'_>,
    center: &RecyclingCenter,
    expanded: Expandable,
    area: Rect,
) {
    let popup = popup_area(area, 70, 80);

    let mut lines = vec![
        Line::styled(
            center.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(center.address.clone()),
        Line::default(),
    ];

    if let Some(hours) = &center.opening_hours {
        lines.extend(hours_lines(hours));
        lines.push(Line::default());
    }

    if let Some(rating) = center.rating {
        lines.push(Line::raw(format!("Rating: {rating:.1} / 5")));
        lines.push(Line::default());
    }

    if let Some(description) = &center.description {
        lines.push(Line::raw(expanded.render(description).into_owned()));
        if Expandable::is_collapsible(description) {
            let toggle = if expanded.is_expanded() {
                "m: show less"
            } else {
                "m: show more"
            };
            lines.push(Line::styled(toggle, Style::default().fg(Color::Cyan)));
        }
        lines.push(Line::default());
    }

    lines.push(Line::styled(
        "d: Get Directions · Esc: close",
        Style::default().fg(Color::Yellow),
    ));

    let dialog = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup);
    frame.render_widget(dialog, popup);
}

fn hours_lines(hours: &OpeningHours) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(hours.weekday_text.len() + 1);
    match hours.open_now {
        Some(true) => lines.push(Line::styled("Open now", Style::default().fg(Color::Green))),
        Some(false) => lines.push(Line::styled("Closed", Style::default().fg(Color::Red))),
        None => {}
    }
    lines.extend(hours.weekday_text.iter().cloned().map(Line::raw));
    lines
}

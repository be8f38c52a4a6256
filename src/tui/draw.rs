//! All drawing / rendering functions.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};

use crate::controller::MediaState;
use crate::media::{MediaKind, Platform};
use crate::session::SessionStatus;

use super::app::App;

pub fn draw(frame: &mut ratatui::Frame, app: &mut App) {
    draw_main(frame, app);
    if let Some(notice) = app.notice {
        draw_notice_popup(frame, notice.message());
    }
}

fn draw_main(frame: &mut ratatui::Frame, app: &mut App) {
    let area = frame.area();

    let outer = Block::default()
        .title(format!(" grabdeck | {} ", app.controller.platform().label()))
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Link input bar
            Constraint::Min(5),    // Variant content
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Controls bar
        ])
        .split(inner);

    // --- Link input bar ---
    let placeholder = match app.controller.platform() {
        Platform::YouTube => " Paste YouTube link: ",
        Platform::Instagram => " Paste Instagram link (post, reel, story): ",
    };
    let link_input = Paragraph::new(app.controller.link())
        .block(
            Block::default()
                .title(placeholder)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White));
    frame.render_widget(link_input, chunks[0]);

    // --- Variant content ---
    draw_content(frame, app, chunks[1]);

    // --- Status line ---
    let status_line =
        Paragraph::new(Line::from(build_status_line(app))).style(Style::default().fg(Color::White));
    frame.render_widget(status_line, chunks[2]);

    // --- Controls bar ---
    let controls = match app.controller.platform() {
        Platform::YouTube => {
            "Enter:fetch  Tab:platform  \u{2191}\u{2193}:select  ^T:video/audio  ^D:download  Esc:clear/quit"
        }
        Platform::Instagram => {
            "Enter:fetch  Tab:platform  \u{2190}\u{2192}:carousel  ^S:post/reel/story  ^D:download  Esc:clear/quit"
        }
    };
    let controls_bar = Paragraph::new(controls)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(controls_bar, chunks[3]);
}

fn build_status_line(app: &App) -> Vec<Span<'_>> {
    let mut spans = Vec::new();

    if app.controller.platform() == Platform::Instagram {
        spans.push(Span::styled(
            format!(" {}", app.controller.sub_kind().label()),
            Style::default().fg(Color::Magenta),
        ));
    } else {
        spans.push(Span::styled(
            format!(" {}", app.controller.media_kind().label()),
            Style::default().fg(Color::Magenta),
        ));
    }

    if app.controller.session().is_loading() {
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            app.controller.platform().loading_label(),
            Style::default().fg(Color::Yellow),
        ));
    }

    if !app.status.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            app.status.as_str(),
            Style::default().fg(Color::Cyan),
        ));
    }

    spans
}

fn draw_content(frame: &mut ratatui::Frame, app: &mut App, area: Rect) {
    match app.controller.status() {
        SessionStatus::Loading => {
            let loading = Paragraph::new(app.controller.platform().loading_label())
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(loading, area);
        }
        SessionStatus::Error => {
            let message = app.controller.session().error().unwrap_or_default();
            let error = Paragraph::new(message)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red));
            frame.render_widget(error, area);
        }
        SessionStatus::Idle | SessionStatus::Success => match app.controller.media() {
            MediaState::None => {
                let hint = Paragraph::new("Paste a link and press Enter")
                    .block(Block::default().borders(Borders::ALL))
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray));
                frame.render_widget(hint, area);
            }
            MediaState::Encodings(_) => draw_encodings(frame, app, area),
            MediaState::Carousel { .. } => draw_carousel(frame, app, area),
        },
    }
}

fn draw_encodings(frame: &mut ratatui::Frame, app: &mut App, area: Rect) {
    let MediaState::Encodings(info) = app.controller.media() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title / channel / duration
            Constraint::Min(3),    // Format list
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            info.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Channel: {}", info.channel)),
        Line::from(format!("Duration: {}", info.duration_label())),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let kind = app.controller.media_kind();
    let formats = app.controller.visible_formats();
    let items: Vec<ListItem> = if formats.is_empty() {
        let empty = match kind {
            MediaKind::Video => "No video formats found.",
            MediaKind::Audio => "No audio formats found.",
        };
        vec![ListItem::new(empty).style(Style::default().fg(Color::DarkGray))]
    } else {
        formats
            .iter()
            .map(|f| {
                let label = match kind {
                    MediaKind::Video => f.video_label(),
                    MediaKind::Audio => f.audio_label(),
                };
                ListItem::new(format!(" {label:<24} {}", f.detail()))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" {} formats ", kind.label()))
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_stateful_widget(list, chunks[1], &mut app.format_list);
}

fn draw_carousel(frame: &mut ratatui::Frame, app: &mut App, area: Rect) {
    let preview = app.controller.preview();
    let MediaState::Carousel { set, cursor } = app.controller.media() else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Instagram {}", app.controller.sub_kind().label()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(set.title.clone()),
        Line::from(Span::styled(
            set.count_label(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
    ];

    if let Some(item) = set.items.get(cursor.index()) {
        lines.push(Line::from(format!(
            "Item {}/{} ({:?})",
            cursor.index() + 1,
            set.items.len(),
            item.kind
        )));
        lines.push(match preview {
            Some(url) => Line::from(format!("Preview: {url}")),
            None => Line::from(Span::styled(
                "No preview available",
                Style::default().fg(Color::DarkGray),
            )),
        });
        if set.items.len() > 1 {
            let dots: String = (0..set.items.len())
                .map(|i| if i == cursor.index() { "\u{25cf} " } else { "\u{25cb} " })
                .collect();
            lines.push(Line::from(dots.trim_end().to_string()));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "No media items",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn draw_notice_popup(frame: &mut ratatui::Frame, message: &str) {
    let area = centered_rect(40, 5, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Notice ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let body = Paragraph::new(vec![
        Line::from(message),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(body, inner);
}

/// Returns a centered rectangle of the given size within `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

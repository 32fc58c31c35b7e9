//! Post-detail view rendering.

use quill_core::session::Session;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::{Controls, DetailPhase, PostDetailState, controls};
use crate::common::format;

/// Renders the detail view into `area`.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    state: &PostDetailState,
    session: &Session,
    images_url: &str,
) {
    let block = Block::default().borders(Borders::ALL).title(" Post ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match &state.phase {
        DetailPhase::Loading => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Loading...",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        DetailPhase::Loaded { post, liked } => {
            let mut lines = vec![
                Line::from(Span::styled(
                    post.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("{}/{}", images_url, post.photo),
                    Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
                )),
                Line::from(""),
                Line::from(post.desc.clone()),
                Line::from(""),
                Line::from(vec![
                    Span::styled("by ", Style::default().fg(Color::DarkGray)),
                    Span::raw(post.user_id.username.clone()),
                    Span::styled(
                        format!("  ·  {}", format::relative(post.created_at)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("{} views  ·  {} likes", post.views, post.likes.len()),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
            ];
            lines.push(hints_line(controls(post, session), *liked));
            lines
        }
    };

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

fn hints_line(controls: Controls, liked: bool) -> Line<'static> {
    let hints = match controls {
        Controls::Author => "e edit  d delete  o photo  esc back  q quit".to_string(),
        Controls::Reader => {
            let like = if liked { "l unlike" } else { "l like" };
            format!("{like}  o photo  esc back  q quit")
        }
    };
    Line::from(Span::styled(hints, Style::default().fg(Color::Cyan)))
}

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, SectionFrame};
use crate::story::Section;

/// Columns of horizontal shear per row, per degree of skew
const SHEAR_PER_DEGREE: f64 = 0.2;
/// Cells a section moves per degree of lean towards the pointer
const LEAN_COLUMNS_PER_DEGREE: f64 = 0.25;
const LEAN_ROWS_PER_DEGREE: f64 = 0.125;
/// Rows a line rises while it is revealed
const REVEAL_RISE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Title,
    Body,
}

/// A line of section text at its position in the story area
#[derive(Debug, Clone, PartialEq)]
struct PlacedLine<'a> {
    x: i32,
    y: i32,
    text: &'a str,
    kind: LineKind,
    opacity: f64,
}

pub struct StoryViewWidget;

impl StoryViewWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let skew = app.skew();
        let buf = frame.buffer_mut();
        for section_frame in app.section_frames() {
            if section_frame.opacity <= 0.0 {
                continue;
            }
            let Some(section) = app.story.sections.get(section_frame.index) else {
                continue;
            };

            let accent = section.accent.unwrap_or(theme.accent);
            for line in place_lines(section, &section_frame, skew, area.width, area.height) {
                if line.opacity <= 0.0 {
                    continue;
                }
                // Background comes from the glow layer underneath
                let style = match line.kind {
                    LineKind::Title => Style::default()
                        .fg(theme.fade(accent, line.opacity))
                        .add_modifier(Modifier::BOLD),
                    LineKind::Body => {
                        Style::default().fg(theme.fade(theme.foreground, line.opacity))
                    }
                };
                draw_clipped(buf, area, line.x, line.y, line.text, style);
            }
        }
    }
}

/// Position every line of `section` for this frame
///
/// The text block is centered in the section, moved by the parallax offset,
/// leaned towards the pointer and sheared around its middle row by `skew`
/// degrees. Only the title carries the glitch jitter. Each line rises into
/// place and fades in with its own reveal.
fn place_lines<'a>(
    section: &'a Section,
    frame: &SectionFrame,
    skew: f64,
    width: u16,
    height: u16,
) -> Vec<PlacedLine<'a>> {
    let mut lines = vec![(section.title.as_str(), LineKind::Title)];
    if !section.body.is_empty() {
        lines.push(("", LineKind::Body));
        lines.extend(section.body.iter().map(|l| (l.as_str(), LineKind::Body)));
    }

    let (lean_x, lean_y) = frame.tilt;
    let text_height = lines.len() as f64;
    let block_top = frame.top + ((height as f64 - text_height) / 2.0).floor() + frame.offset
        - lean_y * LEAN_ROWS_PER_DEGREE;
    let middle = (text_height - 1.0) / 2.0;
    let lean = (lean_x * LEAN_COLUMNS_PER_DEGREE).round() as i32;

    lines
        .into_iter()
        .enumerate()
        .filter(|(_, (text, _))| !text.is_empty())
        .map(|(i, (text, kind))| {
            // The separator row has no reveal of its own
            let reveal_index = i.saturating_sub(1);
            let reveal = frame.reveal.get(reveal_index).copied().unwrap_or(1.0);
            let shear = (skew * SHEAR_PER_DEGREE * (i as f64 - middle)).round() as i32;
            let jitter = match kind {
                LineKind::Title => frame.jitter.round() as i32,
                LineKind::Body => 0,
            };
            let centered = (width as i32 - text.width() as i32) / 2;
            let rise = (1.0 - reveal) * REVEAL_RISE;
            PlacedLine {
                x: centered + shear + jitter + lean,
                y: (block_top + i as f64 + rise).round() as i32,
                text,
                kind,
                opacity: frame.opacity * reveal.clamp(0.0, 1.0),
            }
        })
        .collect()
}

/// Draw `text` at a position relative to `area`, cutting whatever falls
/// outside it
fn draw_clipped(buf: &mut Buffer, area: Rect, x: i32, y: i32, text: &str, style: Style) {
    if y < 0 || y >= area.height as i32 {
        return;
    }

    let mut column = x;
    let mut first = None;
    let mut visible = String::new();
    for ch in text.chars() {
        if column >= 0 {
            first.get_or_insert(column);
            visible.push(ch);
        }
        column += ch.width().unwrap_or(0) as i32;
    }

    let Some(first) = first else {
        return;
    };
    if first >= area.width as i32 {
        return;
    }

    let max_width = (area.width as i32 - first) as usize;
    buf.set_stringn(area.x + first as u16, area.y + y as u16, visible, max_width, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> Section {
        Section {
            id: "s".to_string(),
            title: "Hi".to_string(),
            body: vec!["abcd".to_string()],
            accent: None,
            pulse: false,
        }
    }

    fn still() -> SectionFrame {
        SectionFrame {
            index: 0,
            top: 0.0,
            progress: 0.5,
            opacity: 1.0,
            offset: 0.0,
            jitter: 0.0,
            reveal: vec![1.0, 1.0],
            tilt: (0.0, 0.0),
            pulse: 0.0,
        }
    }

    #[test]
    fn test_lines_centered() {
        let section = section();
        let lines = place_lines(&section, &still(), 0.0, 20, 10);
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].x, lines[0].y), (9, 3));
        assert_eq!(lines[0].kind, LineKind::Title);
        assert_eq!((lines[1].x, lines[1].y), (8, 5));
    }

    #[test]
    fn test_offset_jitter_and_shear() {
        let section = section();
        let frame = SectionFrame {
            top: -4.0,
            offset: 2.0,
            jitter: -2.0,
            ..still()
        };
        let lines = place_lines(&section, &frame, 5.0, 20, 10);
        // Title: one row above the middle, sheared left and jittered
        assert_eq!((lines[0].x, lines[0].y), (6, 1));
        // Body: one row below the middle, sheared right
        assert_eq!((lines[1].x, lines[1].y), (9, 3));
    }

    #[test]
    fn test_reveal_rises_and_fades_each_line() {
        let section = section();
        let frame = SectionFrame {
            opacity: 0.8,
            reveal: vec![0.5, 0.0],
            ..still()
        };
        let lines = place_lines(&section, &frame, 0.0, 20, 10);
        assert_eq!(lines[0].y, 4);
        assert!((lines[0].opacity - 0.4).abs() < 1e-9);
        assert_eq!(lines[1].y, 7);
        assert_eq!(lines[1].opacity, 0.0);
    }

    #[test]
    fn test_lean_towards_pointer() {
        let section = section();
        let frame = SectionFrame {
            tilt: (8.0, 8.0),
            ..still()
        };
        let lines = place_lines(&section, &frame, 0.0, 20, 10);
        assert_eq!((lines[0].x, lines[0].y), (11, 2));
        assert_eq!((lines[1].x, lines[1].y), (10, 4));
    }

    #[test]
    fn test_draw_clipped() {
        let area = Rect::new(0, 0, 5, 2);
        let mut buf = Buffer::empty(area);
        draw_clipped(&mut buf, area, -2, 0, "abcdefg", Style::default());
        draw_clipped(&mut buf, area, 3, 1, "xyz", Style::default());
        draw_clipped(&mut buf, area, 0, 2, "hidden", Style::default());

        assert_eq!(buf[(0, 0)].symbol(), "c");
        assert_eq!(buf[(4, 0)].symbol(), "g");
        assert_eq!(buf[(3, 1)].symbol(), "x");
        assert_eq!(buf[(4, 1)].symbol(), "y");
        assert_eq!(buf[(0, 1)].symbol(), " ");
    }
}

//! Price board popup

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::prices_state::PricesState;
use super::types::TokenPrice;
use crate::widgets::popup;

const POPUP_WIDTH: u16 = 48;
const POPUP_HEIGHT: u16 = 18;
const SYMBOL_WIDTH: usize = 10;
const PRICE_WIDTH: usize = 16;

/// `$1.23` for prices of a dollar or more, six decimals below that
pub fn format_price(price: f64) -> String {
    if price >= 1.0 {
        format!("${:.2}", price)
    } else {
        format!("${:.6}", price)
    }
}

pub fn format_change(change: f64) -> String {
    format!("{:+.2}%", change)
}

fn change_style(change: f64) -> Style {
    if change > 0.0 {
        Style::default().fg(Color::Green)
    } else if change < 0.0 {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn price_line(token: &TokenPrice) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {:<width$}", token.symbol, width = SYMBOL_WIDTH),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "{:>width$}",
            format_price(token.price),
            width = PRICE_WIDTH
        )),
        Span::raw("  "),
        Span::styled(
            format_change(token.price_change_24h),
            change_style(token.price_change_24h),
        ),
    ])
}

pub fn build_price_lines(state: &PricesState) -> Vec<Line<'static>> {
    if state.entries().is_empty() {
        let message = if state.is_loading() {
            " Loading prices..."
        } else {
            " No prices available"
        };
        return vec![Line::from(Span::styled(
            message,
            Style::default().fg(Color::DarkGray),
        ))];
    }

    state.entries().iter().map(price_line).collect()
}

pub fn render_price_popup(state: &mut PricesState, frame: &mut Frame, area: Rect) {
    if !state.is_visible() {
        return;
    }

    let popup_area = popup::centered_popup(area, POPUP_WIDTH, POPUP_HEIGHT);
    popup::clear_area(frame, popup_area);

    let title = if state.is_loading() && !state.entries().is_empty() {
        " Token Prices (refreshing) "
    } else {
        " Token Prices "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(
            Line::from(Span::styled(
                " Ctrl+R refresh | Esc close ",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        )
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(popup_area);
    let lines = build_price_lines(state);
    state.scroll.update_bounds(lines.len(), inner.height);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((state.scroll.offset, 0));
    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(3.14159), "$3.14");
        assert_eq!(format_price(0.0123456789), "$0.012346");
        assert_eq!(format_price(0.0), "$0.000000");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(1.5), "+1.50%");
        assert_eq!(format_change(-0.25), "-0.25%");
    }

    #[test]
    fn test_change_style_colors() {
        assert_eq!(change_style(1.0).fg, Some(Color::Green));
        assert_eq!(change_style(-1.0).fg, Some(Color::Red));
        assert_eq!(change_style(0.0).fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_empty_board_message() {
        let state = PricesState::new();
        let lines = build_price_lines(&state);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].to_string().contains("No prices available"));
    }
}

//! Swap popup rendering

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::swap_state::{SwapPopup, SwapQuote};
use crate::prices::PricesState;
use crate::wallet::format_balance;
use crate::widgets::popup;

const POPUP_WIDTH: u16 = 46;
const POPUP_HEIGHT: u16 = 12;

fn label_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn amount_line(amount: String, symbol: &str, usd: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {} {}", amount, symbol),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  (${})", usd), label_style()),
    ])
}

/// Popup body; `from_balance` is the formatted balance of the input token
/// once the wallet lookup has answered
pub fn build_swap_lines(
    quote: &SwapQuote,
    loading: bool,
    wallet_connected: bool,
    from_balance: Option<&str>,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        amount_line(quote.amount.to_string(), &quote.from_symbol, quote.usd_value()),
        Line::from(Span::styled("   ↓", Style::default().fg(Color::Blue))),
        amount_line(
            quote.estimated_output(),
            &quote.to_symbol,
            quote.estimated_output_usd(),
        ),
        Line::from(""),
        Line::from(Span::styled(" Exchange Rate:", label_style())),
        Line::from(format!(
            " 1 {} = {} {}",
            quote.from_symbol,
            quote.exchange_rate(),
            quote.to_symbol
        )),
        Line::from(""),
    ];

    if wallet_connected {
        let balance = match from_balance {
            Some(balance) => format!(" {} {}", balance, quote.from_symbol),
            None => " ...".to_string(),
        };
        lines.push(Line::from(vec![
            Span::styled(" Balance:", label_style()),
            Span::raw(balance),
        ]));
    }

    if loading && !quote.is_priced() {
        lines.push(Line::from(Span::styled(" Loading...", label_style())));
    } else if !wallet_connected {
        lines.push(Line::from(Span::styled(
            " Connect a wallet to swap",
            Style::default().fg(Color::Yellow),
        )));
    }

    lines
}

pub fn render_swap_popup(
    swap: &SwapPopup,
    prices: &PricesState,
    wallet_connected: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let popup_area = popup::centered_popup(area, POPUP_WIDTH, POPUP_HEIGHT);
    popup::clear_area(frame, popup_area);

    let quote = swap.quote(prices.entries());
    let from_balance = prices.find(&swap.intent.from_symbol).and_then(|token| {
        prices
            .balance(&token.coin_type)
            .map(|raw| format_balance(raw, token.decimals))
    });
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Swap ")
        .title_bottom(Line::from(Span::styled(" Esc close ", label_style())).centered())
        .border_style(Style::default().fg(Color::Blue));

    let lines = build_swap_lines(
        &quote,
        prices.is_loading(),
        wallet_connected,
        from_balance.as_deref(),
    );
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, popup_area);
}

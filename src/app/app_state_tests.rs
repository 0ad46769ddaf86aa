//! Tests for app state and background wiring

use super::*;
use crate::conversation::{BotReply, DialogSender, ResponseStatus};
use crate::prices::SUI_COIN_TYPE;
use crate::test_utils::test_helpers::{
    FakeChatBackend, FakePriceService, ManualClock, test_app, test_app_with_wallet, tick_until,
};

#[test]
fn test_new_app_focuses_input() {
    let app = test_app();

    assert_eq!(app.focus, Focus::Input);
    assert!(app.composer.is_focused());
    assert!(!app.input_read_only());
    assert!(!app.should_quit());
    assert!(app.swap_popup.is_none());
}

#[test]
fn test_wallet_from_config() {
    let app = test_app_with_wallet("0x1234567890abcdef");
    assert!(app.wallet.is_connected());
    assert_eq!(app.wallet.display_address().unwrap(), "0x1234...cdef");

    assert!(!test_app().wallet.is_connected());
}

#[test]
fn test_submit_without_workers_records_error() {
    let mut app = test_app();

    assert_eq!(app.submit("hello"), SubmitOutcome::Failed);

    let dialogs = app.conversation.store.dialogs();
    assert_eq!(dialogs.len(), 2);
    assert!(dialogs[1].is_error);
    assert!(!app.input_read_only());
}

#[test]
fn test_round_trip_through_chat_worker() {
    let mut app = test_app();
    app.connect_chat(FakeChatBackend::replying("gm"), Duration::from_secs(5));

    assert_eq!(app.submit("hello"), SubmitOutcome::Sent(1));
    assert!(app.input_read_only());

    assert!(tick_until(&mut app, |app| {
        app.conversation.status() == ResponseStatus::Waiting
    }));

    let dialogs = app.conversation.store.dialogs();
    assert_eq!(dialogs.len(), 2);
    assert_eq!(dialogs[1].sender, DialogSender::Assistant);
    assert_eq!(dialogs[1].message, "gm");
    assert!(app.composer.is_focused());
}

#[test]
fn test_swap_reply_opens_popup() {
    let mut app = test_app();
    let reply = BotReply {
        text: "Swapping".to_string(),
        action: Some("swap".to_string()),
        params: serde_json::json!({"from": "SUI", "to": "mSEND", "amount": "2"}),
    };
    app.connect_chat(FakeChatBackend::with_reply(reply), Duration::from_secs(5));
    app.connect_prices(PriceCache::with_clock(
        FakePriceService::new(),
        ManualClock::new(),
        Duration::from_secs(90),
    ));

    app.submit("swap 2 SUI to mSEND");

    assert!(tick_until(&mut app, |app| app.swap_popup.is_some()));
    let popup = app.swap_popup.as_ref().unwrap();
    assert_eq!(popup.intent.amount, 2.0);

    assert!(tick_until(&mut app, |app| !app.prices.entries().is_empty()));
    let quote = app
        .swap_popup
        .as_ref()
        .unwrap()
        .quote(app.prices.entries());
    // 2 SUI at 3.5 over mSEND at 0.8
    assert_eq!(quote.usd_value(), "7.00");
    assert_eq!(quote.exchange_rate(), "4.375000");
}

#[test]
fn test_swap_popup_fetches_wallet_balance() {
    let mut app = test_app_with_wallet("0x1234567890abcdef");
    let reply = BotReply {
        text: "Swapping".to_string(),
        action: Some("swap".to_string()),
        params: serde_json::json!({"from": "sui", "to": "mSEND", "amount": "1"}),
    };
    app.connect_chat(FakeChatBackend::with_reply(reply), Duration::from_secs(5));
    app.connect_prices(PriceCache::with_clock(
        FakePriceService::new().with_balance(SUI_COIN_TYPE, "2500000000"),
        ManualClock::new(),
        Duration::from_secs(90),
    ));

    app.submit("swap 1 SUI to mSEND");

    assert!(tick_until(&mut app, |app| {
        app.prices.balance(SUI_COIN_TYPE).is_some()
    }));
    assert_eq!(app.prices.balance(SUI_COIN_TYPE), Some("2500000000"));
}

#[test]
fn test_swap_popup_skips_balance_without_wallet() {
    let mut app = test_app();
    let reply = BotReply {
        text: "Swapping".to_string(),
        action: Some("swap".to_string()),
        params: serde_json::json!({"from": "SUI", "to": "mSEND", "amount": "1"}),
    };
    app.connect_chat(FakeChatBackend::with_reply(reply), Duration::from_secs(5));
    app.connect_prices(PriceCache::with_clock(
        FakePriceService::new().with_balance(SUI_COIN_TYPE, "2500000000"),
        ManualClock::new(),
        Duration::from_secs(90),
    ));

    app.submit("swap 1 SUI to mSEND");

    assert!(tick_until(&mut app, |app| !app.prices.entries().is_empty()));
    app.tick(Instant::now());
    assert_eq!(app.prices.balance(SUI_COIN_TYPE), None);
}

#[test]
fn test_tick_without_activity_changes_nothing() {
    let mut app = test_app();
    assert!(!app.tick(Instant::now()));
}

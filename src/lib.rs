//! flyfish: a terminal chat assistant for Sui wallets
//!
//! The input pane recognises trigger words such as `swap` or `balance` and
//! offers a template the user can accept with Tab. Messages go to a chat
//! backend on a worker thread; token prices come from a TTL-cached price
//! service.

pub mod app;
pub mod composer;
pub mod config;
pub mod conversation;
pub mod error;
pub mod keywords;
pub mod prices;
pub mod scroll;
pub mod suggestion;
pub mod swap;
pub mod wallet;
pub mod widgets;

//! Display formatting: relative times, keys, money, and the view DTOs the
//! front end renders.

mod format;
mod time;
mod views;

pub use format::{format_money, format_pub_key, format_quantity};
pub use time::{time_since, time_since_at};
pub use views::{
    AccountInfoView, OrderRowView, PositionDirection, PositionRowView, ProductHeaderView,
    ProductPricesView,
};

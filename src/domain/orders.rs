//! Order annotation boundary.
//!
//! The surrounding harness turns position deltas into order stubs; this
//! module stamps each stub with the fixed execution instructions the
//! placement collaborator expects. Pure field assignment, no conditional
//! logic.

use chrono::NaiveDate;

pub const ROUTE: &str = "SMART";
pub const ORDER_TYPE: &str = "MOC";
pub const TIME_IN_FORCE: &str = "DAY";

#[derive(Debug, Clone, PartialEq)]
pub struct OrderStub {
    pub code: String,
    pub date: NaiveDate,
    /// Signed share quantity; negative sells.
    pub quantity: f64,
    pub exchange: Option<String>,
    pub order_type: Option<String>,
    pub tif: Option<String>,
}

impl OrderStub {
    pub fn new(code: &str, date: NaiveDate, quantity: f64) -> Self {
        Self {
            code: code.to_string(),
            date,
            quantity,
            exchange: None,
            order_type: None,
            tif: None,
        }
    }
}

/// Stamp every stub with the primary route, market-on-close order type and
/// day-only time-in-force.
pub fn annotate_orders(orders: Vec<OrderStub>) -> Vec<OrderStub> {
    orders
        .into_iter()
        .map(|mut order| {
            order.exchange = Some(ROUTE.to_string());
            order.order_type = Some(ORDER_TYPE.to_string());
            order.tif = Some(TIME_IN_FORCE.to_string());
            order
        })
        .collect()
}

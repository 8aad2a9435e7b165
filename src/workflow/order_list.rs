//! Order list: load, show and delete previously created orders

use chrono::NaiveDate;
use tracing::{error, info};

use super::operator::Confirm;
use crate::backend::Backend;
use crate::{Order, OrderId, OrderStatus, PanelError};

pub const DELETE_PROMPT: &str = "Delete order?";

/// Display row for one order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderRow {
    pub id: OrderId,
    pub status: OrderStatus,
    pub created_on: NaiveDate,
    pub item_count: usize,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            status: order.status.clone(),
            created_on: order.created_at.date_naive(),
            item_count: order.items.len(),
        }
    }
}

#[derive(Debug)]
pub struct OrderListController {
    orders: Vec<Order>,
    loading: bool,
}

impl Default for OrderListController {
    fn default() -> Self { Self::new() }
}

impl OrderListController {
    /// Starts in the loading state until the first refresh settles.
    pub fn new() -> Self { Self { orders: Vec::new(), loading: true } }

    pub fn orders(&self) -> &[Order] { &self.orders }
    pub fn is_loading(&self) -> bool { self.loading }

    pub fn rows(&self) -> Vec<OrderRow> {
        self.orders.iter().map(OrderRow::from).collect()
    }

    /// Replaces the list with the backend's current orders.
    /// On failure the previous list stays in place.
    pub async fn refresh(&mut self, backend: &dyn Backend) {
        match backend.list_orders().await {
            Ok(orders) => {
                info!(count = orders.len(), "order list refreshed");
                self.orders = orders;
            }
            Err(e) => error!(error = %e, "failed to fetch orders"),
        }
        self.loading = false;
    }

    /// Deletes an order after the operator confirms, then refreshes.
    ///
    /// Returns `Ok(false)` if the operator declined. A failed delete is logged
    /// and returned; the list is left as it was.
    pub async fn delete_order(
        &mut self,
        id: OrderId,
        backend: &dyn Backend,
        confirm: &dyn Confirm,
    ) -> Result<bool, PanelError> {
        if !confirm.confirm(DELETE_PROMPT).await {
            return Ok(false);
        }

        if let Err(e) = backend.delete_order(id).await {
            error!(order_id = %id, error = %e, "failed to delete order");
            return Err(PanelError::Deletion(e));
        }

        info!(order_id = %id, "order deleted");
        self.refresh(backend).await;
        Ok(true)
    }
}

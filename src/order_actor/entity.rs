use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderId, OrderStatus};

impl Entity for Order {
    type Id = OrderId;
    type CreateParams = OrderCreate;
    type Update = (); // Orders are immutable once confirmed
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// Creates a confirmed Order. An order without items is rejected.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, String> {
        if params.items.is_empty() {
            return Err("order has no items".to_string());
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            items: params.items,
            total_amount: params.total_amount,
            status: OrderStatus::Confirmed,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, _update: ()) -> Result<(), String> {
        Err(format!("order {} cannot be modified", self.id))
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}

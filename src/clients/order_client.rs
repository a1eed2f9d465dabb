use std::time::Duration;

use tracing::{debug, error, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{Cart, Order, OrderCreate, OrderId, UserId};
use crate::order_actor::OrderError;

/// Client for the order book. Placing an order simulates the remote
/// confirmation round-trip.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    latency: Duration,
}

impl_client_methods!(OrderClient, Order, OrderId, OrderError, order);

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self {
            inner,
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[instrument(skip(self, cart), fields(lines = cart.lines().len(), total = %cart.total()))]
    pub async fn place_order(&self, user_id: UserId, cart: &Cart) -> Result<Order, OrderError> {
        info!("Processing place_order request");
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        tokio::time::sleep(self.latency).await;

        let id = self
            .inner
            .create(OrderCreate::from_cart(user_id, cart))
            .await
            .map_err(|e| match e {
                FrameworkError::Rejected(reason) => OrderError::Rejected(reason),
                other => OrderError::ActorCommunicationError(other.to_string()),
            })?;

        match self.get_order(id).await? {
            Some(order) => {
                info!(order_id = %order.id, "Order confirmed");
                Ok(order)
            }
            None => {
                error!(order_id = %id, "Order missing right after creation");
                Err(OrderError::Rejected(format!("order {id} was not recorded")))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        Ok(self
            .list_orders()
            .await?
            .into_iter()
            .filter(|order| order.user_id == user_id)
            .collect())
    }
}

use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Ord + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Update: Send + Sync + Debug;

    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and creation parameters.
    /// Returning `Err` rejects the create without touching the store.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }
    fn on_update(&mut self, update: Self::Update) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> {
        Ok(())
    }

    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

/// Errors produced by the resource actor plumbing itself.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns a collection of entities keyed by id. Items are kept ordered by id so
/// `List` answers in creation order when ids come from a counter.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    /// Preload items before the actor starts serving. Lifecycle hooks are
    /// not run for seeded items.
    pub fn with_seed(mut self, items: impl IntoIterator<Item = T>) -> Self {
        for item in items {
            self.store.insert(item.id().clone(), item);
        }
        self
    }

    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let id = (self.next_id_fn)();
                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create() {
                                let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update) {
                            let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                            continue;
                        }
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete() {
                            let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                            continue;
                        }
                        self.store.remove(&id);
                        let _ = respond_to.send(Ok(()));
                    } else {
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item.handle_action(action).map_err(FrameworkError::Rejected);
                        let _ = respond_to.send(result);
                    } else {
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.store.values().cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Coupon {
        id: u64,
        code: String,
        redeemed: bool,
    }

    #[derive(Debug)]
    struct CouponCreate {
        code: String,
    }

    #[derive(Debug)]
    struct CouponUpdate {
        code: Option<String>,
    }

    #[derive(Debug)]
    enum CouponAction {
        Redeem,
    }

    impl Entity for Coupon {
        type Id = u64;
        type CreateParams = CouponCreate;
        type Update = CouponUpdate;
        type Action = CouponAction;
        type ActionResult = bool;

        fn id(&self) -> &u64 {
            &self.id
        }

        fn from_create_params(id: u64, params: CouponCreate) -> Result<Self, String> {
            if params.code.is_empty() {
                return Err("code required".to_string());
            }
            Ok(Self {
                id,
                code: params.code,
                redeemed: false,
            })
        }

        fn on_update(&mut self, update: CouponUpdate) -> Result<(), String> {
            if let Some(code) = update.code {
                self.code = code;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: CouponAction) -> Result<bool, String> {
            match action {
                CouponAction::Redeem if self.redeemed => Err("already redeemed".to_string()),
                CouponAction::Redeem => {
                    self.redeemed = true;
                    Ok(true)
                }
            }
        }
    }

    fn spawn_coupons() -> ResourceClient<Coupon> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || counter.fetch_add(1, Ordering::SeqCst);
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = spawn_coupons();

        let id = client
            .create(CouponCreate { code: "SPRING".into() })
            .await
            .unwrap();

        let redeemed = client.perform_action(id, CouponAction::Redeem).await.unwrap();
        assert!(redeemed);

        let coupon = client.get(id).await.unwrap().unwrap();
        assert!(coupon.redeemed);

        let again = client.perform_action(id, CouponAction::Redeem).await;
        assert_eq!(again, Err(FrameworkError::Rejected("already redeemed".into())));
    }

    #[tokio::test]
    async fn test_rejected_create_is_not_stored() {
        let client = spawn_coupons();

        let result = client.create(CouponCreate { code: String::new() }).await;
        assert_eq!(result, Err(FrameworkError::Rejected("code required".into())));
        assert!(client.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id_and_delete_reports_missing() {
        let client = spawn_coupons();
        for code in ["A", "B", "C"] {
            client.create(CouponCreate { code: code.into() }).await.unwrap();
        }

        client.delete(2).await.unwrap();
        let codes: Vec<String> = client
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.code)
            .collect();
        assert_eq!(codes, vec!["A", "C"]);

        assert_eq!(client.delete(2).await, Err(FrameworkError::NotFound("2".into())));
        let updated = client
            .update(3, CouponUpdate { code: Some("Z".into()) })
            .await
            .unwrap();
        assert_eq!(updated.code, "Z");
    }

    #[tokio::test]
    async fn test_seeded_items_are_visible() {
        let (actor, client) = ResourceActor::<Coupon>::new(10, || 100);
        let actor = actor.with_seed(vec![Coupon {
            id: 7,
            code: "SEED".into(),
            redeemed: false,
        }]);
        tokio::spawn(actor.run());

        let coupon = client.get(7).await.unwrap();
        assert_eq!(coupon.map(|c| c.code), Some("SEED".to_string()));
    }
}

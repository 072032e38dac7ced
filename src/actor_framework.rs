use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;
use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    /// Domain refusal raised by hooks and actions.
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, Self::Error>;

    /// Secondary key that must be unique across the collection (codes, slugs).
    fn unique_key(&self) -> Option<&str> { None }

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> { Ok(()) }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Errors surfaced by [`ResourceClient`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("{0}")]
    Entity(E),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Change notification published after every successful mutation.
#[derive(Debug, Clone)]
pub enum Change<T: Entity> {
    Created(T),
    Updated(T),
    Deleted(T::Id),
}

/// Filter, sort and limit applied by the actor to its collection.
pub struct Query<T: Entity> {
    filter: Option<Box<dyn Fn(&T) -> bool + Send + Sync>>,
    order_by: Option<Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>>,
    limit: Option<usize>,
}

impl<T: Entity> Query<T> {
    pub fn all() -> Self {
        Self { filter: None, order_by: None, limit: None }
    }

    pub fn filter(mut self, f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Box::new(f));
        self
    }

    pub fn order_by(mut self, f: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        self.order_by = Some(Box::new(f));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn matches(&self, item: &T) -> bool {
        self.filter.as_ref().map_or(true, |f| f(item))
    }

    /// Runs the query over any iterator of entities.
    pub fn apply<'a>(&self, items: impl Iterator<Item = &'a T>) -> Vec<T> {
        let mut result: Vec<T> = items.filter(|item| self.matches(item)).cloned().collect();
        if let Some(order_by) = &self.order_by {
            result.sort_by(|a, b| order_by(a, b));
        }
        if let Some(limit) = self.limit {
            result.truncate(limit);
        }
        result
    }
}

impl<T: Entity> Debug for Query<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("filtered", &self.filter.is_some())
            .field("ordered", &self.order_by.is_some())
            .field("limit", &self.limit)
            .finish()
    }
}

/// One operation inside a batched write.
#[derive(Debug)]
pub enum BatchOp<T: Entity> {
    Insert { id: T::Id, payload: T::CreatePayload },
    Delete { id: T::Id },
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T::Id, T::Error>,
    },
    Insert {
        id: T::Id,
        payload: T::CreatePayload,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    Query {
        query: Query<T>,
        respond_to: Response<Vec<T>, T::Error>,
    },
    Batch {
        ops: Vec<BatchOp<T>>,
        respond_to: Response<usize, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    changes: broadcast::Sender<Change<T>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (changes, _) = broadcast::channel(buffer_size.max(16));
        let actor = Self {
            receiver,
            store: HashMap::new(),
            changes: changes.clone(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender, changes);
        (actor, client)
    }

    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let id = (self.next_id_fn)();
                    let _ = respond_to.send(self.insert(id, payload));
                }
                ResourceRequest::Insert { id, payload, respond_to } => {
                    let _ = respond_to.send(self.insert(id, payload));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.delete(&id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.act(id, action));
                }
                ResourceRequest::Query { query, respond_to } => {
                    let _ = respond_to.send(Ok(query.apply(self.store.values())));
                }
                ResourceRequest::Batch { ops, respond_to } => {
                    let _ = respond_to.send(self.batch(ops));
                }
            }
        }
        debug!("Resource actor stopped, all clients dropped");
    }

    fn insert(&mut self, id: T::Id, payload: T::CreatePayload) -> Result<T::Id, FrameworkError<T::Error>> {
        let item = Self::admit(&self.store, id.clone(), payload)?;
        self.store.insert(id.clone(), item.clone());
        self.publish(Change::Created(item));
        Ok(id)
    }

    /// Builds a new item and checks it against `store` without storing it.
    fn admit(store: &HashMap<T::Id, T>, id: T::Id, payload: T::CreatePayload) -> Result<T, FrameworkError<T::Error>> {
        if store.contains_key(&id) {
            return Err(FrameworkError::AlreadyExists(id.to_string()));
        }
        let mut item = T::from_create(id, payload).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        if let Some(key) = item.unique_key() {
            if store.values().any(|other| other.unique_key() == Some(key)) {
                return Err(FrameworkError::AlreadyExists(key.to_string()));
            }
        }
        Ok(item)
    }

    fn update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        let item = self.store.get_mut(&id).ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        // Hooks mutate a copy so a refused patch leaves the stored item untouched.
        let mut updated = item.clone();
        updated.on_update(patch).map_err(FrameworkError::Entity)?;
        *item = updated.clone();
        self.publish(Change::Updated(updated.clone()));
        Ok(updated)
    }

    fn delete(&mut self, id: &T::Id) -> Result<(), FrameworkError<T::Error>> {
        let item = self.store.get(id).ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete().map_err(FrameworkError::Entity)?;
        self.store.remove(id);
        self.publish(Change::Deleted(id.clone()));
        Ok(())
    }

    fn act(&mut self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        let item = self.store.get_mut(&id).ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let mut updated = item.clone();
        let result = updated.handle_action(action).map_err(FrameworkError::Entity)?;
        *item = updated.clone();
        self.publish(Change::Updated(updated));
        Ok(result)
    }

    /// Applies every op or none. Changes are published only after the commit.
    fn batch(&mut self, ops: Vec<BatchOp<T>>) -> Result<usize, FrameworkError<T::Error>> {
        let mut staged = self.store.clone();
        let mut changes = Vec::with_capacity(ops.len());
        for op in ops {
            match op {
                BatchOp::Insert { id, payload } => {
                    let item = Self::admit(&staged, id.clone(), payload)?;
                    staged.insert(id, item.clone());
                    changes.push(Change::Created(item));
                }
                // Deleting a missing document is a no-op inside a batch.
                BatchOp::Delete { id } => {
                    if let Some(item) = staged.get(&id) {
                        item.on_delete().map_err(FrameworkError::Entity)?;
                        staged.remove(&id);
                        changes.push(Change::Deleted(id));
                    }
                }
            }
        }
        self.store = staged;
        let applied = changes.len();
        for change in changes {
            self.publish(change);
        }
        Ok(applied)
    }

    fn publish(&self, change: Change<T>) {
        // No subscribers is the common case and not an error.
        if self.changes.receiver_count() > 0 && self.changes.send(change).is_err() {
            warn!("Change notification dropped");
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    changes: broadcast::Sender<Change<T>>,
}

macro_rules! request {
    ($self:ident, $variant:ident { $($field:ident),* }) => {{
        let (respond_to, response) = oneshot::channel();
        $self.sender.send(ResourceRequest::$variant { $($field,)* respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }};
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>, changes: broadcast::Sender<Change<T>>) -> Self {
        Self { sender, changes }
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError<T::Error>> {
        request!(self, Create { payload })
    }

    pub async fn insert(&self, id: T::Id, payload: T::CreatePayload) -> Result<T::Id, FrameworkError<T::Error>> {
        request!(self, Insert { id, payload })
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        request!(self, Get { id })
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        request!(self, Update { id, patch })
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        request!(self, Delete { id })
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        request!(self, Action { id, action })
    }

    pub async fn query(&self, query: Query<T>) -> Result<Vec<T>, FrameworkError<T::Error>> {
        request!(self, Query { query })
    }

    pub async fn batch(&self, ops: Vec<BatchOp<T>>) -> Result<usize, FrameworkError<T::Error>> {
        request!(self, Batch { ops })
    }

    /// Subscribe to every change made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Change<T>> {
        self.changes.subscribe()
    }

    /// A handle that does not keep the actor alive.
    pub fn downgrade(&self) -> WeakResourceClient<T> {
        WeakResourceClient { sender: self.sender.downgrade() }
    }
}

/// Read-only handle for background watchers.
pub struct WeakResourceClient<T: Entity> {
    sender: mpsc::WeakSender<ResourceRequest<T>>,
}

impl<T: Entity> WeakResourceClient<T> {
    pub async fn query(&self, query: Query<T>) -> Result<Vec<T>, FrameworkError<T::Error>> {
        let sender = self.sender.upgrade().ok_or(FrameworkError::ActorClosed)?;
        let (respond_to, response) = oneshot::channel();
        sender.send(ResourceRequest::Query { query, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

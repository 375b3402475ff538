//! Synchronous change observation.
//!
//! [`Observers`] is the subscription half of an observable store: the store
//! registers callbacks once, then calls [`Observers::emit`] after every leaf
//! mutation. Callbacks run inline, in registration order, before the
//! mutating call returns. There is no batching and no deduplication; whoever
//! emits decides what counts as a change.

/// Boxed observer callback.
type Callback<C> = Box<dyn FnMut(&C) + Send>;

/// An ordered registry of change observers.
///
/// Callbacks must not call back into the emitting store: emission happens
/// while the registry is borrowed, and consumers are expected to be strict
/// read-side reactions (a renderer, a logger).
///
/// # Example
///
/// ```
/// use formwork::Observers;
///
/// let mut observers: Observers<&str> = Observers::new();
/// observers.subscribe(|change| println!("changed: {change}"));
/// observers.emit(&"fields.email");
/// ```
pub struct Observers<C> {
    callbacks: Vec<Callback<C>>,
}

impl<C> Observers<C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Register a callback. Callbacks fire in registration order.
    pub fn subscribe(&mut self, callback: impl FnMut(&C) + Send + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Invoke every callback with `change`, in registration order.
    pub fn emit(&mut self, change: &C) {
        for callback in &mut self.callbacks {
            callback(change);
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<C> Default for Observers<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for Observers<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

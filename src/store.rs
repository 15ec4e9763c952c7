//! Draft persistence seam for the UI layer.
//!
//! Form drafts survive navigation through an explicit [`Store`] trait
//! injected into whoever needs it, with [`MemoryStore`] as the in-process
//! implementation; a platform port supplies its own backing. Nothing in the
//! calculation modules touches this.

/// Change listener, called with the new value on every `set`.
pub type Subscriber<T> = Box<dyn FnMut(&T)>;

/// A single persisted draft value.
pub trait Store<T: Clone> {
    /// Last stored value, if any.
    fn get(&self) -> Option<T>;

    /// Store a value and notify all subscribers.
    fn set(&mut self, value: T);

    /// Drop the stored value (a submitted or abandoned draft).
    fn clear(&mut self);

    /// Register a listener for subsequent `set` calls.
    fn subscribe(&mut self, subscriber: Subscriber<T>);
}

/// In-memory [`Store`] with no persistence across restarts.
#[derive(Default)]
pub struct MemoryStore<T> {
    value: Option<T>,
    subscribers: Vec<Subscriber<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self { value: None, subscribers: Vec::new() }
    }
}

impl<T: Clone> Store<T> for MemoryStore<T> {
    fn get(&self) -> Option<T> {
        self.value.clone()
    }

    fn set(&mut self, value: T) {
        for subscriber in &mut self.subscribers {
            subscriber(&value);
        }
        self.value = Some(value);
    }

    fn clear(&mut self) {
        self.value = None;
    }

    fn subscribe(&mut self, subscriber: Subscriber<T>) {
        self.subscribers.push(subscriber);
    }
}

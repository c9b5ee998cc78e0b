//! Observer lists for surface notifications.

/// Handle returned by [`Notifier::subscribe`], used to unsubscribe.
pub type ListenerId = usize;

/// A list of listeners called synchronously, in subscription order.
pub struct Notifier<T: ?Sized> {
    listeners: Vec<(ListenerId, Box<dyn FnMut(&T)>)>,
    next_id: ListenerId,
}

impl<T: ?Sized> Default for Notifier<T> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T: ?Sized> Notifier<T> {
    /// Adds a listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Calls every listener with `value`.
    pub fn notify(&mut self, value: &T) {
        for (_, listener) in &mut self.listeners {
            listener(value);
        }
    }

    /// Number of subscribed listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

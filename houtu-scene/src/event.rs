use std::fmt;

/// Handle returned by [`Event::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&T) + Send + Sync>;

/// A typed publish/subscribe channel. Listeners run synchronously, in
/// subscription order, when the event is raised.
pub struct Event<T> {
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_id: u64,
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("number_of_listeners", &self.listeners.len())
            .finish()
    }
}

impl<T> Event<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&T) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let len = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != len
    }

    pub fn number_of_listeners(&self) -> usize {
        self.listeners.len()
    }

    pub fn raise_event(&mut self, args: &T) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(args);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn raise_reaches_every_listener() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut event = Event::new();
        let first = seen.clone();
        event.add_event_listener(move |value: &i32| first.lock().unwrap().push(*value));
        let second = seen.clone();
        event.add_event_listener(move |value: &i32| second.lock().unwrap().push(value * 10));
        event.raise_event(&3);
        assert_eq!(*seen.lock().unwrap(), vec![3, 30]);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let count = Arc::new(Mutex::new(0));
        let mut event = Event::new();
        let counter = count.clone();
        let id = event.add_event_listener(move |_: &()| *counter.lock().unwrap() += 1);
        assert_eq!(event.number_of_listeners(), 1);
        assert!(event.remove_event_listener(id));
        assert!(!event.remove_event_listener(id));
        event.raise_event(&());
        assert_eq!(*count.lock().unwrap(), 0);
        assert_eq!(event.number_of_listeners(), 0);
    }
}

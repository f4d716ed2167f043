use std::cell::RefCell;
use std::rc::Rc;

type Listener<T> = Rc<dyn Fn(&T)>;

/// Single-threaded state cell that notifies listeners after every update.
///
/// Controllers keep their state here; components subscribe and mirror
/// snapshots into signals.
pub struct Observable<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<Listener<T>>>,
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value.borrow_mut());
        self.notify();
        result
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn notify(&self) {
        let snapshot = self.get();
        // listeners may update again, so iterate over a copy
        let listeners: Vec<Listener<T>> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_update_notifies_with_new_value() {
        let cell = Observable::new(1);
        let seen = Rc::new(Cell::new(0));
        let s = seen.clone();
        cell.subscribe(move |v| s.set(*v));

        let previous = cell.update(|v| {
            let old = *v;
            *v = 5;
            old
        });
        assert_eq!(previous, 1);
        assert_eq!(seen.get(), 5);
        assert_eq!(cell.get(), 5);
        assert_eq!(cell.with(|v| v * 2), 10);
    }
}

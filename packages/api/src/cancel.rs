//! View-scoped cancellation.
//!
//! A [`CancelScope`] belongs to one view, which calls [`CancelScope::cancel`]
//! when it goes away. Two kinds of work run under it:
//!
//! - reads go through [`CancelScope::run`] and are aborted on cancel;
//! - writes go through [`CancelScope::run_to_completion`], which always drives
//!   the operation to the end and only reports afterwards whether the view is
//!   still there to show the result.
//!
//! Either way a cancelled scope yields [`Cancelled`] and the caller must not
//! touch view state.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};

/// The scope was cancelled before the operation settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation cancelled")]
pub struct Cancelled;

#[derive(Clone, Default)]
pub struct CancelScope {
    inner: Rc<Inner>,
}

#[derive(Default)]
struct Inner {
    handles: RefCell<Vec<(u64, AbortHandle)>>,
    next_id: Cell<u64>,
    cancelled: Cell<bool>,
}

/// Removes a run's abort handle once the run settles or is dropped.
struct Registration<'a> {
    inner: &'a Inner,
    id: u64,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.inner
            .handles
            .borrow_mut()
            .retain(|(id, _)| *id != self.id);
    }
}

impl CancelScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `future` unless the scope is, or becomes, cancelled.
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, Cancelled> {
        if self.is_cancelled() {
            return Err(Cancelled);
        }
        let (handle, abort_registration) = AbortHandle::new_pair();
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id.wrapping_add(1));
        self.inner.handles.borrow_mut().push((id, handle));
        let _registration = Registration {
            inner: &self.inner,
            id,
        };

        Abortable::new(future, abort_registration)
            .await
            .map_err(|_| Cancelled)
    }

    /// Drive `future` to the end even if the scope is cancelled meanwhile.
    ///
    /// The output is handed back only while the scope is still live; a
    /// cancelled scope still lets side effects inside `future` land.
    pub async fn run_to_completion<F: Future>(&self, future: F) -> Result<F::Output, Cancelled> {
        if self.is_cancelled() {
            return Err(Cancelled);
        }
        let output = future.await;
        if self.is_cancelled() {
            return Err(Cancelled);
        }
        Ok(output)
    }

    pub fn cancel(&self) {
        self.inner.cancelled.set(true);
        let handles = std::mem::take(&mut *self.inner.handles.borrow_mut());
        for (_, handle) in handles {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.inner.handles.borrow().len()
    }
}

use std::collections::VecDeque;

use crate::error::{TuneError, TuneResult};

/// A fixed ring of candidate values with a "current" pointer.
///
/// Values are rotated front to back, so advancing `len()` times restores both
/// the original order and the original current value.
#[derive(Clone, Debug)]
pub struct CyclicSequence<T> {
    values: VecDeque<T>,
    current: T,
}

impl<T: Clone> CyclicSequence<T> {
    /// Loads the cycle. The current value starts at the first element.
    pub fn new(values: impl IntoIterator<Item = T>) -> TuneResult<Self> {
        let mut values: VecDeque<T> = values.into_iter().collect();
        let first = values.pop_front().ok_or(TuneError::EmptyCycle)?;
        // the first value is "already returned", so it goes to the back
        values.push_back(first.clone());

        Ok(Self {
            values,
            current: first,
        })
    }

    /// Steps to the next value, wrapping after the last one.
    pub fn advance(&mut self) -> T {
        if let Some(next) = self.values.pop_front() {
            self.values.push_back(next.clone());
            self.current = next;
        }
        self.current.clone()
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false, a cycle cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

//! Test doubles for spec bodies
//!
//! A [`Spy`] records every call made through it and answers with a configured behaviour: a fixed value,
//! a queue of values, a fake function, or an error.
//!
//! ```
//! use specreport::doubles::Spy;
//!
//! let spy: Spy<(i32, i32), i32> = Spy::named("add").calls_fake(|(a, b)| a + b);
//! assert_eq!(spy.call((2, 3)).ok(), Some(5));
//! assert!(spy.was_called_with(&(2, 3)));
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

/// Errors returned by [`Spy::call`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpyError {
    /// Configured with [`Spy::fails_with`]
    #[error("{0}")]
    Failed(String),

    /// Called with no behaviour configured, or after a `returns_each` queue ran dry
    #[error("spy '{0}' has no behaviour configured")]
    NoBehaviour(String),
}

type Fake<A, R> = Arc<dyn Fn(&A) -> R + Send + Sync>;

enum Behaviour<A, R> {
    Unset,
    Returns(R),
    ReturnsEach(VecDeque<R>),
    Fake(Fake<A, R>),
    Fails(String),
}

enum Answer<A, R> {
    Ready(Result<R, SpyError>),
    Fake(Fake<A, R>),
}

struct SpyState<A, R> {
    calls: Vec<A>,
    behaviour: Behaviour<A, R>,
}

/// Records calls with arguments `A` and answers with values of type `R`.
pub struct Spy<A, R> {
    name: String,
    state: Mutex<SpyState<A, R>>,
}

impl<A: Clone, R: Clone> Spy<A, R> {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(SpyState {
                calls: Vec::new(),
                behaviour: Behaviour::Unset,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, SpyState<A, R>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Always answer with `value`
    pub fn returns(self, value: R) -> Self {
        self.state().behaviour = Behaviour::Returns(value);
        self
    }

    /// Answer with each value in turn
    pub fn returns_each(self, values: impl IntoIterator<Item = R>) -> Self {
        self.state().behaviour = Behaviour::ReturnsEach(values.into_iter().collect());
        self
    }

    /// Delegate to `fake`. The call is recorded before `fake` runs, and the spy is unlocked while it runs.
    pub fn calls_fake(self, fake: impl Fn(&A) -> R + Send + Sync + 'static) -> Self {
        self.state().behaviour = Behaviour::Fake(Arc::new(fake));
        self
    }

    /// Fail every call with `message`
    pub fn fails_with(self, message: impl Into<String>) -> Self {
        self.state().behaviour = Behaviour::Fails(message.into());
        self
    }

    /// Record the call and produce the configured answer.
    pub fn call(&self, args: A) -> Result<R, SpyError> {
        let fake = {
            let mut state = self.state();
            let answer = match &mut state.behaviour {
                Behaviour::Unset => Answer::Ready(Err(SpyError::NoBehaviour(self.name.clone()))),
                Behaviour::Returns(value) => Answer::Ready(Ok(value.clone())),
                Behaviour::ReturnsEach(queue) => {
                    Answer::Ready(queue.pop_front().ok_or_else(|| SpyError::NoBehaviour(self.name.clone())))
                }
                Behaviour::Fake(fake) => Answer::Fake(Arc::clone(fake)),
                Behaviour::Fails(message) => Answer::Ready(Err(SpyError::Failed(message.clone()))),
            };
            match answer {
                Answer::Ready(result) => {
                    state.calls.push(args);
                    return result;
                }
                Answer::Fake(fake) => {
                    state.calls.push(args.clone());
                    fake
                }
            }
        };
        Ok(fake(&args))
    }

    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }

    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Arguments of the `index`th call (zero-based)
    pub fn args_for(&self, index: usize) -> Option<A> {
        self.state().calls.get(index).cloned()
    }

    pub fn all_args(&self) -> Vec<A> {
        self.state().calls.clone()
    }

    pub fn most_recent_args(&self) -> Option<A> {
        self.state().calls.last().cloned()
    }

    /// Forget recorded calls; the behaviour is kept.
    pub fn reset(&self) {
        self.state().calls.clear();
    }
}

impl<A: Clone + PartialEq, R: Clone> Spy<A, R> {
    pub fn was_called_with(&self, args: &A) -> bool {
        self.state().calls.iter().any(|a| a == args)
    }
}

impl<A, R> std::fmt::Debug for Spy<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spy").field("name", &self.name).finish_non_exhaustive()
    }
}

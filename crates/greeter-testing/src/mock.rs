//! Call-expectation controller for hand-written mocks.
//!
//! A mock registers itself with [`MockController::receiver`] and forwards each
//! trait method to [`MockController::call`]. Tests program it beforehand with
//! [`MockController::record_call`], usually through a recorder returned by the
//! mock's `expect()` method:
//!
//! ```ignore
//! let ctrl = MockController::new();
//! let client = MockDataClient::new(&ctrl);
//! client.expect().do_something().returning(|| Ok("fake data".to_owned()));
//! // ... exercise code that calls `client.do_something()` once ...
//! ctrl.finish();
//! ```
//!
//! Expectations default to exactly one call. Unmet expectations and calls the
//! controller could not dispatch fail the test in [`MockController::finish`],
//! or when the last handle to the controller state is dropped. A call made on a
//! spawned task therefore still fails the test after that task's panic is
//! swallowed.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Producer<R> = Arc<dyn Fn() -> R + Send + Sync>;

/// Failure while dispatching a mocked call.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CallError {
    #[error("unexpected call to {0}")]
    Unexpected(String),
    #[error("{0} called more times than expected")]
    Exhausted(String),
    #[error("no return value configured for {0}")]
    MissingReturn(String),
    #[error("return type of {0} does not match the recorded expectation")]
    ReturnTypeMismatch(String),
}

/// Verification failure reported by [`MockController::try_finish`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("unsatisfied expectations: {}", .0.join("; "))]
    Unsatisfied(Vec<String>),
    /// Failed dispatches first, then any unmet expectations.
    #[error("unexpected calls: {}", .0.join("; "))]
    Unexpected(Vec<String>),
}

/// Identity of one mock instance registered with a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    id: usize,
    name: String,
}

impl Receiver {
    pub fn name(&self) -> &str {
        &self.name
    }
}

struct Expectation {
    receiver: usize,
    label: String,
    method: &'static str,
    returns: Option<Box<dyn Any + Send>>,
    min: usize,
    max: usize,
    calls: usize,
}

impl Expectation {
    fn describe_shortfall(&self) -> String {
        if self.min == self.max {
            format!(
                "{}: expected {} call(s), got {}",
                self.label, self.min, self.calls
            )
        } else {
            format!(
                "{}: expected at least {} call(s), got {}",
                self.label, self.min, self.calls
            )
        }
    }
}

#[derive(Default)]
struct State {
    expectations: Mutex<Vec<Expectation>>,
    failures: Mutex<Vec<String>>,
    next_receiver: AtomicUsize,
    finished: AtomicBool,
}

impl State {
    fn lock(&self) -> MutexGuard<'_, Vec<Expectation>> {
        // A panicking test may poison the lock; the list itself stays consistent.
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn failures(&self) -> MutexGuard<'_, Vec<String>> {
        self.failures.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn unsatisfied(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|e| e.calls < e.min)
            .map(Expectation::describe_shortfall)
            .collect()
    }

    fn verify(&self) -> Result<(), ControllerError> {
        let missing = self.unsatisfied();
        let mut failures = self.failures().clone();
        if !failures.is_empty() {
            failures.extend(missing);
            return Err(ControllerError::Unexpected(failures));
        }
        if !missing.is_empty() {
            return Err(ControllerError::Unsatisfied(missing));
        }
        Ok(())
    }
}

impl Drop for State {
    fn drop(&mut self) {
        if self.finished.load(Ordering::SeqCst) || std::thread::panicking() {
            return;
        }
        if let Err(e) = self.verify() {
            panic!("{e}");
        }
    }
}

/// Owns the expectation list shared by every mock created from it.
///
/// Cloning yields another handle to the same list.
#[derive(Clone, Default)]
pub struct MockController {
    state: Arc<State>,
}

impl MockController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mock instance. `name` only appears in failure messages.
    pub fn receiver(&self, name: impl Into<String>) -> Receiver {
        Receiver {
            id: self.state.next_receiver.fetch_add(1, Ordering::SeqCst),
            name: name.into(),
        }
    }

    /// Append an expectation for `receiver.method` and return its builder.
    ///
    /// Expectations for the same method are consumed in recording order.
    pub fn record_call<R: 'static>(&self, receiver: &Receiver, method: &'static str) -> Call<R> {
        let label = format!("{}.{}", receiver.name, method);
        tracing::debug!(call = %label, "expectation recorded");

        let mut expectations = self.state.lock();
        expectations.push(Expectation {
            receiver: receiver.id,
            label,
            method,
            returns: None,
            min: 1,
            max: 1,
            calls: 0,
        });
        Call {
            state: Arc::clone(&self.state),
            index: expectations.len() - 1,
            _returns: PhantomData,
        }
    }

    /// Dispatch a mocked call, panicking on anything the test did not expect.
    pub fn call<R: 'static>(&self, receiver: &Receiver, method: &'static str) -> R {
        match self.try_call(receiver, method) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }

    /// Dispatch a mocked call, reporting mismatches as [`CallError`].
    ///
    /// Mismatches are also kept by the controller and fail verification, even
    /// when the call happened on another thread or task.
    pub fn try_call<R: 'static>(
        &self,
        receiver: &Receiver,
        method: &'static str,
    ) -> Result<R, CallError> {
        self.dispatch(receiver, method).inspect_err(|e| {
            tracing::debug!(error = %e, "mock call failed");
            self.state.failures().push(e.to_string());
        })
    }

    fn dispatch<R: 'static>(
        &self,
        receiver: &Receiver,
        method: &'static str,
    ) -> Result<R, CallError> {
        let producer = {
            let mut expectations = self.state.lock();
            let mut seen = false;
            let mut matched = None;
            for exp in expectations
                .iter_mut()
                .filter(|e| e.receiver == receiver.id && e.method == method)
            {
                seen = true;
                if exp.calls < exp.max {
                    matched = Some(exp);
                    break;
                }
            }

            let label = || format!("{}.{}", receiver.name, method);
            let exp = match matched {
                Some(exp) => exp,
                None if seen => return Err(CallError::Exhausted(label())),
                None => return Err(CallError::Unexpected(label())),
            };

            exp.calls += 1;
            tracing::debug!(call = %exp.label, calls = exp.calls, "expectation matched");

            let returns = exp
                .returns
                .as_ref()
                .ok_or_else(|| CallError::MissingReturn(label()))?;
            returns
                .downcast_ref::<Producer<R>>()
                .cloned()
                .ok_or_else(|| CallError::ReturnTypeMismatch(label()))?
        };

        // Invoked outside the lock so a producer may call other mocks.
        Ok(producer())
    }

    /// Number of calls matched so far by expectations on `receiver.method`.
    pub fn calls(&self, receiver: &Receiver, method: &str) -> usize {
        self.state
            .lock()
            .iter()
            .filter(|e| e.receiver == receiver.id && e.method == method)
            .map(|e| e.calls)
            .sum()
    }

    /// Check that no call failed to dispatch and every expectation reached
    /// its minimum call count.
    ///
    /// Marks the controller finished, so dropping it afterwards no longer verifies.
    pub fn try_finish(&self) -> Result<(), ControllerError> {
        self.state.finished.store(true, Ordering::SeqCst);
        self.state.verify()
    }

    /// Like [`try_finish`](Self::try_finish) but panics on failure.
    pub fn finish(&self) {
        if let Err(e) = self.try_finish() {
            panic!("{e}");
        }
    }
}

/// Builder for one recorded expectation.
#[must_use = "an expectation without a return value panics when called"]
pub struct Call<R> {
    state: Arc<State>,
    index: usize,
    _returns: PhantomData<fn() -> R>,
}

impl<R: 'static> Call<R> {
    fn update(self, f: impl FnOnce(&mut Expectation)) -> Self {
        if let Some(exp) = self.state.lock().get_mut(self.index) {
            f(exp);
        }
        self
    }

    /// Produce the return value with `f` on every matched call.
    pub fn returning<F>(self, f: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        let producer: Producer<R> = Arc::new(f);
        self.update(|exp| exp.returns = Some(Box::new(producer)))
    }

    /// Expect exactly `n` calls.
    pub fn times(self, n: usize) -> Self {
        self.update(|exp| {
            exp.min = n;
            exp.max = n;
        })
    }

    pub fn at_least(self, n: usize) -> Self {
        self.update(|exp| {
            exp.min = n;
            exp.max = usize::MAX;
        })
    }

    pub fn at_most(self, n: usize) -> Self {
        self.update(|exp| {
            exp.min = 0;
            exp.max = n;
        })
    }

    pub fn any_times(self) -> Self {
        self.at_least(0)
    }
}

impl<R: Clone + Send + Sync + 'static> Call<R> {
    /// Return a clone of `value` on every matched call.
    pub fn return_const(self, value: R) -> Self {
        self.returning(move || value.clone())
    }
}

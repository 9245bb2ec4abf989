//! Host size observation.
//!
//! Hosts lay out rendered elements and report their sizes back. The
//! [`ResizeObserver`] trait is the host-side service a renderer attaches to
//! its element; the host calls the [`SizeReporter`] it was given whenever
//! the element's size changes.
//!
//! [`HeadlessResizeObserver`] implements the trait without a layout engine:
//! sizes are reported explicitly. It backs the CLI and the tests.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use indexmap::IndexMap;
use log::trace;
use thiserror::Error;

use vantage_core::geometry::Size;

use crate::element::ElementRef;

/// Failures reported by a host service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("element {0} is not attached to the host")]
    Detached(ElementRef),

    #[error("host call failed: {0}")]
    Call(String),
}

/// Host service that watches element sizes.
pub trait ResizeObserver {
    /// Starts reporting size changes of `element` to `reporter`.
    fn observe(&self, element: ElementRef, reporter: SizeReporter) -> Result<(), HostError>;

    /// Stops reporting size changes of `element`.
    fn unobserve(&self, element: ElementRef) -> Result<(), HostError>;
}

pub(crate) type SizeSink = Rc<dyn Fn(Size)>;

/// Callback handle given to the host.
///
/// The handle does not keep the renderer alive. Once the renderer is
/// disposed, reports through the handle are ignored.
#[derive(Clone)]
pub struct SizeReporter {
    sink: Weak<dyn Fn(Size)>,
}

impl SizeReporter {
    pub(crate) fn new(sink: &SizeSink) -> Self {
        Self {
            sink: Rc::downgrade(sink),
        }
    }

    /// Delivers a screen-space size. Returns `false` if the handle was released.
    pub fn report(&self, size: Size) -> bool {
        match self.sink.upgrade() {
            Some(sink) => {
                sink(size);
                true
            }
            None => false,
        }
    }

    /// Returns true once the owning renderer released the handle
    pub fn is_released(&self) -> bool {
        self.sink.strong_count() == 0
    }
}

impl fmt::Debug for SizeReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeReporter")
            .field("released", &self.is_released())
            .finish()
    }
}

/// A [`ResizeObserver`] driven by explicit size reports.
#[derive(Debug, Default)]
pub struct HeadlessResizeObserver {
    observed: RefCell<IndexMap<ElementRef, SizeReporter>>,
    fail_next: Cell<bool>,
}

impl HeadlessResizeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `observe` or `unobserve` call fail.
    pub fn fail_next_call(&self) {
        self.fail_next.set(true);
    }

    /// Returns whether `element` is currently observed
    pub fn is_observing(&self, element: ElementRef) -> bool {
        self.observed.borrow().contains_key(&element)
    }

    /// Returns the number of observed elements
    pub fn observed_count(&self) -> usize {
        self.observed.borrow().len()
    }

    /// Reports a screen-space size for `element`.
    ///
    /// Returns `false` if the element is not observed or its reporter was released.
    pub fn report(&self, element: ElementRef, size: Size) -> bool {
        // Clone out of the map so the callback may observe or unobserve
        let Some(reporter) = self.observed.borrow().get(&element).cloned() else {
            trace!(element:% = element; "Size report for unobserved element");
            return false;
        };
        reporter.report(size)
    }

    fn check_failure(&self) -> Result<(), HostError> {
        if self.fail_next.replace(false) {
            return Err(HostError::Call("injected failure".to_string()));
        }
        Ok(())
    }
}

impl ResizeObserver for HeadlessResizeObserver {
    fn observe(&self, element: ElementRef, reporter: SizeReporter) -> Result<(), HostError> {
        self.check_failure()?;
        trace!(element:% = element; "Observing element");
        self.observed.borrow_mut().insert(element, reporter);
        Ok(())
    }

    fn unobserve(&self, element: ElementRef) -> Result<(), HostError> {
        self.check_failure()?;
        if self.observed.borrow_mut().shift_remove(&element).is_none() {
            return Err(HostError::Detached(element));
        }
        trace!(element:% = element; "Stopped observing element");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_sink() -> (Rc<RefCell<Vec<Size>>>, SizeSink) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink: SizeSink = {
            let seen = Rc::clone(&seen);
            Rc::new(move |size: Size| seen.borrow_mut().push(size))
        };
        (seen, sink)
    }

    #[test]
    fn test_reporter_delivers_until_released() {
        let (seen, sink) = recording_sink();
        let reporter = SizeReporter::new(&sink);

        assert!(reporter.report(Size::new(1.0, 2.0)));
        assert!(!reporter.is_released());

        drop(sink);
        assert!(reporter.is_released());
        assert!(!reporter.report(Size::new(3.0, 4.0)));

        assert_eq!(*seen.borrow(), vec![Size::new(1.0, 2.0)]);
    }

    #[test]
    fn test_headless_observe_and_report() {
        let observer = HeadlessResizeObserver::new();
        let (seen, sink) = recording_sink();
        let element = ElementRef::allocate();

        observer
            .observe(element, SizeReporter::new(&sink))
            .expect("observe should succeed");
        assert!(observer.is_observing(element));
        assert!(observer.report(element, Size::new(10.0, 10.0)));

        observer.unobserve(element).expect("unobserve should succeed");
        assert!(!observer.report(element, Size::new(20.0, 20.0)));
        assert_eq!(observer.observed_count(), 0);

        assert_eq!(*seen.borrow(), vec![Size::new(10.0, 10.0)]);
    }

    #[test]
    fn test_headless_unobserve_unknown_element() {
        let observer = HeadlessResizeObserver::new();
        let element = ElementRef::allocate();

        assert_eq!(observer.unobserve(element), Err(HostError::Detached(element)));
    }

    #[test]
    fn test_headless_injected_failure_is_one_shot() {
        let observer = HeadlessResizeObserver::new();
        let (_, sink) = recording_sink();
        let element = ElementRef::allocate();

        observer.fail_next_call();
        assert!(observer.observe(element, SizeReporter::new(&sink)).is_err());
        assert!(observer.observe(element, SizeReporter::new(&sink)).is_ok());
    }
}

//! Test doubles shared across the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use signup_client::{Error, NewUser, UserGateway};
use signup_form::{Field, FieldMap, FormView};

/// What a [`RecordingView`] currently displays.
///
/// Models the host view tree honestly: error elements are a list per field
/// so duplicate-element bugs show up as `len() > 1`.
#[derive(Debug, Default)]
pub struct ViewDoc {
    pub inputs: FieldMap<String>,
    pub error_elements: FieldMap<Vec<String>>,
    pub invalid_marker: FieldMap<bool>,
    pub submit_enabled: bool,
    pub container: Option<String>,
    pub detached: bool,
}

/// A [`FormView`] that records every write into a shared [`ViewDoc`].
///
/// Clone it before handing it to the renderer and keep the clone for
/// assertions.
#[derive(Clone, Default)]
pub struct RecordingView {
    doc: Arc<Mutex<ViewDoc>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn doc(&self) -> MutexGuard<'_, ViewDoc> {
        self.doc.lock().unwrap()
    }

    /// Simulate the host tearing the form down mid-flight.
    pub fn tear_down(&self) {
        self.doc().detached = true;
    }
}

impl FormView for RecordingView {
    fn set_input_value(&mut self, field: Field, value: &str) {
        *self.doc().inputs.get_mut(field) = value.to_string();
    }

    fn set_field_error(&mut self, field: Field, message: &str) {
        let mut doc = self.doc();
        *doc.invalid_marker.get_mut(field) = true;
        let elements = doc.error_elements.get_mut(field);
        match elements.first_mut() {
            Some(existing) => *existing = message.to_string(),
            None => elements.push(message.to_string()),
        }
    }

    fn clear_field_error(&mut self, field: Field) {
        let mut doc = self.doc();
        *doc.invalid_marker.get_mut(field) = false;
        doc.error_elements.get_mut(field).clear();
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.doc().submit_enabled = enabled;
    }

    fn show_terminal_message(&mut self, message: &str) {
        let mut doc = self.doc();
        doc.container = Some(message.to_string());
        doc.detached = true;
    }

    fn show_submission_error(&mut self, message: &str) {
        self.doc().container = Some(message.to_string());
    }

    fn is_attached(&self) -> bool {
        !self.doc().detached
    }
}

/// A [`UserGateway`] with a scripted outcome and a call log.
#[derive(Clone, Default)]
pub struct StubGateway {
    fail: Arc<AtomicBool>,
    calls: Arc<Mutex<Vec<NewUser>>>,
}

impl StubGateway {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let gateway = Self::default();
        gateway.set_failing(true);
        gateway
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<NewUser> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserGateway for StubGateway {
    async fn create_user(&self, user: &NewUser) -> Result<(), Error> {
        self.calls.lock().unwrap().push(user.clone());
        if self.fail.load(Ordering::SeqCst) {
            Err(Error::http(500, "internal error"))
        } else {
            Ok(())
        }
    }
}

/// A gateway that parks until released, for in-flight submission tests.
#[derive(Clone, Default)]
pub struct PendingGateway {
    release: Arc<tokio::sync::Notify>,
    calls: Arc<Mutex<usize>>,
}

impl PendingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl UserGateway for PendingGateway {
    async fn create_user(&self, _user: &NewUser) -> Result<(), Error> {
        *self.calls.lock().unwrap() += 1;
        self.release.notified().await;
        Ok(())
    }
}

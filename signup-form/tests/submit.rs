mod common;

use std::sync::Arc;

use common::{PendingGateway, RecordingView, StubGateway};
use signup_client::NewUser;
use signup_form::{
    Controller, Field, FormEvent, FormStore, NETWORK_ERROR, Renderer, SubmissionState,
    USER_CREATED, signup_schema,
};

fn wired<G: signup_client::UserGateway>(gateway: G) -> (Controller<G>, RecordingView) {
    let store = FormStore::new(signup_schema());
    let view = RecordingView::new();
    Renderer::bind(&store, view.clone());
    (Controller::new(store, gateway), view)
}

async fn fill_valid<G: signup_client::UserGateway>(controller: &Controller<G>) {
    for (field, value) in [
        (Field::Name, "Petya"),
        (Field::Email, "support@hexlet.io"),
        (Field::Password, "qwerty"),
        (Field::PasswordConfirmation, "qwerty"),
    ] {
        controller
            .handle(FormEvent::Input {
                field,
                value: value.to_string(),
            })
            .await;
    }
}

// ============================================================================
// End-to-end flows
// ============================================================================

#[tokio::test]
async fn test_successful_signup_end_to_end() {
    let gateway = StubGateway::succeeding();
    let (controller, view) = wired(gateway.clone());

    fill_valid(&controller).await;
    assert!(controller.store().is_valid());
    assert!(view.doc().submit_enabled);

    controller.handle(FormEvent::Submit).await;

    assert_eq!(controller.store().submission(), SubmissionState::Sent);
    let doc = view.doc();
    assert_eq!(doc.container.as_deref(), Some(USER_CREATED));
    assert!(doc.detached);

    // The confirmation never reaches the wire.
    assert_eq!(
        gateway.calls(),
        vec![NewUser::new("Petya", "support@hexlet.io", "qwerty")]
    );
}

#[tokio::test]
async fn test_failed_signup_keeps_the_form_alive() {
    let gateway = StubGateway::failing();
    let (controller, view) = wired(gateway.clone());

    fill_valid(&controller).await;
    controller.handle(FormEvent::Submit).await;

    assert_eq!(
        controller.store().submission(),
        SubmissionState::Error(NETWORK_ERROR.to_string())
    );
    {
        let doc = view.doc();
        assert_eq!(doc.container.as_deref(), Some(NETWORK_ERROR));
        assert!(doc.submit_enabled, "failure re-enables submit");
        assert!(!doc.detached);
        // Entered values survive the failure.
        assert_eq!(doc.inputs.get(Field::Email), "support@hexlet.io");
        assert_eq!(doc.inputs.get(Field::Password), "qwerty");
    }

    // No automatic retry: resubmitting is the user's move, and it works.
    gateway.set_failing(false);
    controller.handle(FormEvent::Submit).await;

    assert_eq!(controller.store().submission(), SubmissionState::Sent);
    assert_eq!(view.doc().container.as_deref(), Some(USER_CREATED));
    assert_eq!(gateway.calls().len(), 2);
}

// ============================================================================
// Submit gating
// ============================================================================

#[tokio::test]
async fn test_submit_ignored_while_invalid() {
    let gateway = StubGateway::succeeding();
    let (controller, view) = wired(gateway.clone());

    controller
        .handle(FormEvent::Input {
            field: Field::Email,
            value: "wrong-email".to_string(),
        })
        .await;
    controller.handle(FormEvent::Submit).await;

    assert!(gateway.calls().is_empty());
    assert_eq!(controller.store().submission(), SubmissionState::Filling);
    assert!(!view.doc().submit_enabled);
}

#[tokio::test]
async fn test_second_submit_while_sending_is_ignored() {
    let gateway = PendingGateway::new();
    let (controller, _view) = wired(gateway.clone());
    fill_valid(&controller).await;

    let controller = Arc::new(controller);
    let in_flight = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.handle(FormEvent::Submit).await }
    });

    // Let the first submit reach the gateway and park there.
    while gateway.call_count() == 0 {
        tokio::task::yield_now().await;
    }
    assert_eq!(controller.store().submission(), SubmissionState::Sending);

    controller.handle(FormEvent::Submit).await;
    assert_eq!(gateway.call_count(), 1, "no concurrent second request");

    gateway.release();
    in_flight.await.unwrap();
    assert_eq!(controller.store().submission(), SubmissionState::Sent);
}

#[tokio::test]
async fn test_submit_after_sent_is_ignored() {
    let gateway = StubGateway::succeeding();
    let (controller, _view) = wired(gateway.clone());

    fill_valid(&controller).await;
    controller.handle(FormEvent::Submit).await;
    controller.handle(FormEvent::Submit).await;

    assert_eq!(gateway.calls().len(), 1);
}

// ============================================================================
// Teardown mid-flight
// ============================================================================

#[tokio::test]
async fn test_late_response_never_writes_to_a_torn_down_view() {
    let gateway = PendingGateway::new();
    let (controller, view) = wired(gateway.clone());
    fill_valid(&controller).await;

    let controller = Arc::new(controller);
    let in_flight = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.handle(FormEvent::Submit).await }
    });
    while gateway.call_count() == 0 {
        tokio::task::yield_now().await;
    }

    // The host removes the form while the request is in flight.
    view.tear_down();

    gateway.release();
    in_flight.await.unwrap();

    // The store still records the outcome; the view stays untouched.
    assert_eq!(controller.store().submission(), SubmissionState::Sent);
    assert_eq!(view.doc().container, None);
}

// ============================================================================
// Input handling
// ============================================================================

#[tokio::test]
async fn test_input_values_are_trimmed() {
    let gateway = StubGateway::succeeding();
    let (controller, _view) = wired(gateway);

    controller
        .handle(FormEvent::Input {
            field: Field::Name,
            value: "  Petya  ".to_string(),
        })
        .await;

    assert_eq!(controller.store().value(Field::Name), "Petya");
}

#[tokio::test]
async fn test_blur_touches_and_validates_an_untouched_field() {
    let gateway = StubGateway::succeeding();
    let (controller, view) = wired(gateway);

    controller.handle(FormEvent::Blur { field: Field::Name }).await;

    assert!(controller.store().touched(Field::Name));
    assert_eq!(
        controller.store().error(Field::Name).as_deref(),
        Some("name is a required field")
    );
    assert_eq!(
        *view.doc().error_elements.get(Field::Name),
        vec!["name is a required field".to_string()]
    );
}

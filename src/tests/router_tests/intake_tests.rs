// src/tests/router_tests/intake_tests.rs

use crate::leads::intake::DEFAULT_GENERIC_MESSAGE;
use crate::leads::model::{BudgetRange, LeadDetails, LeadStatus, PropertyType};
use crate::router::handle;
use crate::tests::utils::{body_string, post_form, test_app, wait_for_leads};

#[test]
fn generic_form_submission_creates_a_new_lead() {
    let app = test_app();

    let body = "full_name=John+Doe&email=John%40Example.COM&phone=%28555%29+123-4567\
                &company=Acme+Inc.&message=";
    let resp = handle(post_form("/leads", body), &app).expect("submit failed");
    assert_eq!(resp.status(), 200);

    let html = body_string(resp);
    assert!(html.contains("Thank You"));
    // Partial response for htmx, not a full document.
    assert!(!html.contains("<!DOCTYPE html>"));

    wait_for_leads(&app, 1);
    let view = app.feed.view();
    let lead = &view.leads[0];
    assert_eq!(lead.full_name, "John Doe");
    assert_eq!(lead.email, "john@example.com");
    assert_eq!(lead.phone, "(555) 123-4567");
    assert_eq!(lead.effective_status(), LeadStatus::New);
    assert!(lead.created_at.is_some());
    // Blank message gets the site default.
    assert_eq!(lead.message, DEFAULT_GENERIC_MESSAGE);
    assert_eq!(
        lead.details,
        LeadDetails::Generic {
            company: Some("Acme Inc.".into())
        }
    );
}

#[test]
fn invalid_generic_submission_re_renders_the_form_with_the_error() {
    let app = test_app();

    let body = "full_name=John+Doe&email=not-an-email&phone=5551234567";
    let resp = handle(post_form("/leads", body), &app).expect("submit failed");
    assert_eq!(resp.status(), 200);

    let html = body_string(resp);
    assert!(html.contains("Please enter a valid email address"));
    // The visitor's input is preserved in the re-rendered form.
    assert!(html.contains("John Doe"));
    assert!(html.contains("not-an-email"));

    // Nothing was stored.
    wait_for_leads(&app, 0);
    assert!(app.feed.view().leads.is_empty());
}

#[test]
fn realestate_enquiry_round_trips_all_fields() {
    let app = test_app();

    let body = "full_name=Jane+Doe&email=jane%40example.com&phone=%2B91+98765+43210\
                &property_type=buy&budget=1cr-2cr&preferred_location=Whitefield\
                &message=Looking+for+a+3BHK";
    let resp = handle(post_form("/realestate/leads", body), &app).expect("submit failed");
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Thank You"));

    wait_for_leads(&app, 1);
    let view = app.feed.view();
    let lead = &view.leads[0];
    assert_eq!(lead.full_name, "Jane Doe");
    match &lead.details {
        LeadDetails::RealEstate {
            property_type,
            budget,
            preferred_location,
        } => {
            assert_eq!(*property_type, Some(PropertyType::Buy));
            assert_eq!(*budget, Some(BudgetRange::Cr1ToCr2));
            assert_eq!(preferred_location.as_deref(), Some("Whitefield"));
        }
        other => panic!("expected real-estate details, got {other:?}"),
    }
}

#[test]
fn enquiry_without_required_selects_is_rejected() {
    let app = test_app();

    let body = "full_name=Jane+Doe&email=jane%40example.com&phone=9876543210\
                &property_type=&budget=&message=";
    let resp = handle(post_form("/realestate/leads", body), &app).expect("submit failed");
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Please select a property type"));
    assert!(app.feed.view().leads.is_empty());
}

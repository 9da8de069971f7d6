// src/tests/router_tests/dashboard_tests.rs

use std::time::{Duration, Instant};

use crate::leads::model::LeadStatus;
use crate::router::handle;
use crate::tests::utils::{
    body_string, get, get_with_cookie, post_form, post_form_with_cookie, sign_in, test_app,
    wait_for_leads,
};

fn submit_generic(app: &crate::app::App, name: &str, email: &str) {
    let body = format!(
        "full_name={}&email={}&phone=5551234567&message=hello",
        name.replace(' ', "+"),
        email.replace('@', "%40")
    );
    let resp = handle(post_form("/leads", &body), app).expect("submit failed");
    assert_eq!(resp.status(), 200);
}

fn submit_enquiry(app: &crate::app::App, name: &str, property_type: &str) {
    let body = format!(
        "full_name={}&email=re%40example.com&phone=9876543210&property_type={property_type}\
         &budget=2cr-5cr&preferred_location=Indiranagar&message=",
        name.replace(' ', "+"),
    );
    let resp = handle(post_form("/realestate/leads", &body), app).expect("submit failed");
    assert_eq!(resp.status(), 200);
}

#[test]
fn dashboard_lists_leads_newest_first() {
    let app = test_app();
    let session = sign_in(&app);

    submit_generic(&app, "First Lead", "first@example.com");
    wait_for_leads(&app, 1);
    submit_generic(&app, "Second Lead", "second@example.com");
    wait_for_leads(&app, 2);

    let resp = handle(get_with_cookie("/admin/leads", &session), &app).unwrap();
    let html = body_string(resp);

    let first = html.find("First Lead").expect("first lead missing");
    let second = html.find("Second Lead").expect("second lead missing");
    assert!(
        second < first,
        "newest lead should render above the older one"
    );
    assert!(html.contains("Showing 2 of 2 leads"));
}

#[test]
fn search_filters_the_table_case_insensitively() {
    let app = test_app();
    let session = sign_in(&app);

    submit_generic(&app, "John Doe", "john@example.com");
    submit_generic(&app, "Jane Smith", "jane@example.com");
    wait_for_leads(&app, 2);

    let resp = handle(get_with_cookie("/admin/leads?q=DOE", &session), &app).unwrap();
    let html = body_string(resp);
    assert!(html.contains("John Doe"));
    assert!(!html.contains("Jane Smith"));
    assert!(html.contains("Showing 1 of 2 leads"));
}

#[test]
fn status_update_flows_through_the_store_and_back_into_the_mirror() {
    let app = test_app();
    let session = sign_in(&app);

    submit_generic(&app, "John Doe", "john@example.com");
    wait_for_leads(&app, 1);
    let id = app.feed.view().leads[0].id.clone();

    let body = format!("id={id}&status=Contacted");
    let resp = handle(
        post_form_with_cookie("/admin/leads/status", &body, &session),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    // The mirror catches up via the pushed snapshot, not a local mutation.
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        let view = app.feed.view();
        if view.leads[0].effective_status() == LeadStatus::Contacted {
            assert!(view.leads[0].updated_at >= view.leads[0].created_at);
            break;
        }
        assert!(Instant::now() < deadline, "mirror never saw the update");
        std::thread::sleep(Duration::from_millis(5));
    }

    // Status filter picks it up.
    let resp = handle(
        get_with_cookie("/admin/leads?status=Contacted", &session),
        &app,
    )
    .unwrap();
    let html = body_string(resp);
    assert!(html.contains("John Doe"));
    assert!(html.contains("Showing 1 of 1 leads"));
}

#[test]
fn site_visit_is_rejected_on_the_generic_dashboard() {
    let app = test_app();
    let session = sign_in(&app);

    submit_generic(&app, "John Doe", "john@example.com");
    wait_for_leads(&app, 1);
    let id = app.feed.view().leads[0].id.clone();

    let body = format!("id={id}&status=Site+Visit");
    let result = handle(
        post_form_with_cookie("/admin/leads/status", &body, &session),
        &app,
    );
    assert!(result.is_err(), "Site Visit must not be assignable here");

    // And the stored record is untouched.
    assert_eq!(app.feed.view().leads[0].effective_status(), LeadStatus::New);
}

#[test]
fn realestate_dashboard_shows_property_details_and_site_visit() {
    let app = test_app();
    let session = sign_in(&app);

    submit_enquiry(&app, "Ravi Kumar", "buy");
    wait_for_leads(&app, 1);
    let id = app.feed.view().leads[0].id.clone();

    let resp = handle(get_with_cookie("/realestate-admin", &session), &app).unwrap();
    let html = body_string(resp);
    assert!(html.contains("Ravi Kumar"));
    assert!(html.contains("Buy"));
    assert!(html.contains("₹2 Cr - ₹5 Cr"));
    assert!(html.contains("Indiranagar"));
    assert!(html.contains("Site Visit")); // status option exists here

    // Site Visit is a legal transition on this dashboard.
    let body = format!("id={id}&status=Site+Visit");
    let resp = handle(
        post_form_with_cookie("/realestate-admin/leads/status", &body, &session),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        if app.feed.view().leads[0].effective_status() == LeadStatus::SiteVisit {
            break;
        }
        assert!(Instant::now() < deadline, "mirror never saw the update");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn property_type_filter_narrows_the_realestate_table() {
    let app = test_app();
    let session = sign_in(&app);

    submit_enquiry(&app, "Buyer One", "buy");
    submit_enquiry(&app, "Renter Two", "rent");
    wait_for_leads(&app, 2);

    let resp = handle(
        get_with_cookie("/realestate-admin/leads?property_type=rent", &session),
        &app,
    )
    .unwrap();
    let html = body_string(resp);
    assert!(html.contains("Renter Two"));
    assert!(!html.contains("Buyer One"));
}

#[test]
fn stats_count_the_full_mirror_even_when_filtered() {
    let app = test_app();
    let session = sign_in(&app);

    submit_generic(&app, "John Doe", "john@example.com");
    submit_generic(&app, "Jane Smith", "jane@example.com");
    wait_for_leads(&app, 2);

    // Filter down to one row; the Total card still says 2.
    let resp = handle(get_with_cookie("/admin/leads?q=john", &session), &app).unwrap();
    let html = body_string(resp);
    assert!(html.contains("Total Leads"));
    assert!(html.contains("Showing 1 of 2 leads"));
}

#[test]
fn export_returns_a_spreadsheet() {
    let app = test_app();
    let session = sign_in(&app);

    submit_generic(&app, "John Doe", "john@example.com");
    wait_for_leads(&app, 1);

    let resp = handle(get_with_cookie("/admin/leads/export", &session), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp
        .headers()
        .get("Content-Type")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("spreadsheetml"));
    assert!(resp
        .headers()
        .get("Content-Disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("leads_generic.xlsx"));
}

#[test]
fn root_and_typo_routes_redirect_to_the_realestate_site() {
    let app = test_app();

    for path in ["/", "/realstate", "/real-estate"] {
        let resp = handle(get(path), &app).unwrap();
        assert_eq!(resp.status(), 303, "{path}");
        assert_eq!(resp.headers().get("Location").unwrap(), "/realestate");
    }

    // Catch-all goes home.
    let resp = handle(get("/no-such-page"), &app).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), "/");
}

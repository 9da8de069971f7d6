// src/tests/router_tests/auth_flow_tests.rs

use crate::router::handle;
use crate::tests::utils::{
    body_string, get, get_with_cookie, post_form, post_form_with_cookie, sign_in, test_app,
    TEST_ADMIN_EMAIL,
};

#[test]
fn login_page_loads_successfully() {
    let app = test_app();

    let resp = handle(get("/login"), &app).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Sign In"));
    assert!(body.contains("form"));
    assert!(body.contains("password"));
}

#[test]
fn admin_pages_redirect_anonymous_visitors_to_their_login() {
    let app = test_app();

    for (path, login) in [
        ("/admin", "/login"),
        ("/admin/leads", "/login"),
        ("/realestate-admin", "/realestate-login"),
        ("/realestate-admin/leads", "/realestate-login"),
    ] {
        let resp = handle(get(path), &app).expect("Failed to handle request");
        assert_eq!(resp.status(), 303, "{path} should redirect");
        assert_eq!(resp.headers().get("Location").unwrap(), login);
    }
}

#[test]
fn seeded_credentials_sign_in_and_open_the_dashboard() {
    let app = test_app();

    let session = sign_in(&app);
    let resp = handle(get_with_cookie("/admin", &session), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Leads Management"));
    assert!(body.contains(TEST_ADMIN_EMAIL));
}

#[test]
fn wrong_password_re_renders_login_with_an_error() {
    let app = test_app();

    let body = format!("email={TEST_ADMIN_EMAIL}&password=wrong");
    let resp = handle(post_form("/login", &body), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let html = body_string(resp);
    assert!(html.contains("Invalid email or password"));
}

#[test]
fn unknown_email_gets_the_same_error_as_a_bad_password() {
    let app = test_app();

    let resp = handle(
        post_form("/login", "email=nobody%40example.com&password=whatever"),
        &app,
    )
    .unwrap();
    let html = body_string(resp);
    assert!(html.contains("Invalid email or password"));
}

#[test]
fn logout_revokes_the_session() {
    let app = test_app();
    let session = sign_in(&app);

    let resp = handle(post_form_with_cookie("/logout", "", &session), &app).unwrap();
    assert_eq!(resp.status(), 303);
    let cleared = resp
        .headers()
        .get("Set-Cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cleared.contains("Max-Age=0"));

    // The old token is dead server-side, not just in the browser.
    let resp = handle(get_with_cookie("/admin", &session), &app).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), "/login");
}

#[test]
fn realestate_login_opens_the_realestate_dashboard() {
    let app = test_app();

    let body = format!(
        "email={}&password={}",
        TEST_ADMIN_EMAIL,
        crate::tests::utils::TEST_ADMIN_PASSWORD
    );
    let resp = handle(post_form("/realestate-login", &body), &app).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "/realestate-admin"
    );
}

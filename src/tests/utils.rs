use std::io::Read;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use astra::{Body, Request, Response};
use http::Method;

use crate::app::App;
use crate::config::AppConfig;
use crate::router::handle;

pub const TEST_ADMIN_EMAIL: &str = "admin@example.com";
pub const TEST_ADMIN_PASSWORD: &str = "correct-horse-battery";

/// Build a fresh app over a throwaway database file, using the production
/// schema and boot path.
pub fn test_app() -> App {
    let path = std::env::temp_dir().join(format!(
        "leadsite_test_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let config = AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        db_path: path.to_string_lossy().into_owned(),
        admin_email: TEST_ADMIN_EMAIL.to_string(),
        admin_password: TEST_ADMIN_PASSWORD.to_string(),
        mail: None,
    };
    let app = App::build(&config).expect("failed to build test app");
    wait_for_leads(&app, 0);
    app
}

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

pub fn get(path: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_cookie(path: &str, session: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(path)
        .header("Cookie", format!("session={session}"))
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(path: &str, body: &str) -> Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.as_bytes().to_vec()))
        .unwrap()
}

pub fn post_form_with_cookie(path: &str, body: &str, session: &str) -> Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("Cookie", format!("session={session}"))
        .body(Body::from(body.as_bytes().to_vec()))
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    body
}

/// Sign in with the seeded credentials and return the raw session token.
pub fn sign_in(app: &App) -> String {
    let body = format!(
        "email={}&password={}",
        TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD
    );
    let resp = handle(post_form("/login", &body), app).expect("login request failed");
    assert_eq!(resp.status(), 303, "expected login redirect");

    let set_cookie = resp
        .headers()
        .get("Set-Cookie")
        .expect("no session cookie set")
        .to_str()
        .unwrap();
    let token = set_cookie
        .strip_prefix("session=")
        .and_then(|rest| rest.split(';').next())
        .expect("malformed session cookie");
    token.to_string()
}

/// Block until the live feed mirrors at least `count` leads (the store push
/// is asynchronous relative to the request that wrote the lead).
pub fn wait_for_leads(app: &App, count: usize) {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        let view = app.feed.view();
        if view.synced && view.leads.len() >= count {
            return;
        }
        if Instant::now() > deadline {
            panic!(
                "feed never reached {count} leads (synced={}, len={})",
                view.synced,
                view.leads.len()
            );
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

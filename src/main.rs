use std::net::SocketAddr;

use astra::Server;

use crate::app::App;
use crate::config::AppConfig;
use crate::router::handle;

mod app;
mod auth;
mod config;
mod dashboard;
mod db;
mod errors;
mod leads;
mod mailer;
mod responses;
mod router;
mod spreadsheets;
mod store;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    // 1️⃣ Read configuration
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {e}");
            eprintln!("📝 Set ADMIN_EMAIL and ADMIN_PASSWORD before starting the server.");
            std::process::exit(1);
        }
    };

    // 2️⃣ Wire the app: database, store, live feed, updater
    let app = match App::build(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("❌ Startup failed: {e}");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    let addr: SocketAddr = match config.bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("❌ Bad BIND_ADDR {:?}: {e}", config.bind_addr);
            std::process::exit(1);
        }
    };
    println!("Starting server at http://{addr}");
    println!("   LeadGen Pro:     http://{addr}/home");
    println!("   EliteProperties: http://{addr}/realestate");

    let server = Server::bind(&addr).max_workers(8);

    // 4️⃣ Serve requests, passing the app handle into the closure
    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => crate::responses::error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}

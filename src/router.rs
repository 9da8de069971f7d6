use std::collections::HashMap;
use std::io::Read;

use astra::Request;
use chrono::{Local, Utc};

use crate::app::App;
use crate::auth::guard::{require_admin, SessionContext};
use crate::auth::{password, sessions};
use crate::db::admins;
use crate::errors::ServerError;
use crate::leads::filter::{filter_leads, LeadQuery, PropertyTypeFilter, StatusFilter};
use crate::leads::intake::{self, GenericIntake, RealEstateIntake};
use crate::leads::model::{LeadStatus, SiteVariant};
use crate::leads::stats::compute_stats;
use crate::mailer::notify_new_lead;
use crate::responses::{
    clear_session_cookie_header, html_response, redirect, redirect_with_cookie,
    session_cookie_header, ResultResp,
};
use crate::spreadsheets::export_leads_xlsx;
use crate::templates::pages::admin::{
    admin_page, leads_partial, DashboardPaths, DashboardVm, GENERIC_DASHBOARD,
    REALESTATE_DASHBOARD,
};
use crate::templates::pages::home::{home_page, lead_capture_form, lead_submitted_panel};
use crate::templates::pages::login::login_page;
use crate::templates::pages::realestate_home::{
    enquiry_form, enquiry_submitted_panel, realestate_home_page,
};
use crate::templates::SiteChrome;

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let now = Utc::now().timestamp();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => Ok(redirect("/realestate")),
        ("GET", "/home") => html_response(home_page()),
        ("GET", "/realestate") => html_response(realestate_home_page()),
        // Redirect common typos
        ("GET", "/realstate") | ("GET", "/real-estate") => Ok(redirect("/realestate")),

        ("POST", "/leads") => submit_generic_lead(&mut req, app),
        ("POST", "/realestate/leads") => submit_realestate_lead(&mut req, app),

        ("GET", "/login") => {
            html_response(login_page(SiteChrome::LeadGenPro, "/login", None))
        }
        ("POST", "/login") => sign_in(&mut req, app, SiteChrome::LeadGenPro, &GENERIC_DASHBOARD, now),
        ("GET", "/realestate-login") => html_response(login_page(
            SiteChrome::EliteProperties,
            "/realestate-login",
            None,
        )),
        ("POST", "/realestate-login") => sign_in(
            &mut req,
            app,
            SiteChrome::EliteProperties,
            &REALESTATE_DASHBOARD,
            now,
        ),
        ("POST", "/logout") => sign_out(&req, app, now),

        ("GET", "/admin") => dashboard_page(&req, app, SiteVariant::Generic, now),
        ("GET", "/admin/leads") => dashboard_partial(&req, app, SiteVariant::Generic, now),
        ("POST", "/admin/leads/status") => {
            update_status(&mut req, app, SiteVariant::Generic, now)
        }
        ("GET", "/admin/leads/export") => export_leads(&req, app, SiteVariant::Generic, now),

        ("GET", "/realestate-admin") => dashboard_page(&req, app, SiteVariant::RealEstate, now),
        ("GET", "/realestate-admin/leads") => {
            dashboard_partial(&req, app, SiteVariant::RealEstate, now)
        }
        ("POST", "/realestate-admin/leads/status") => {
            update_status(&mut req, app, SiteVariant::RealEstate, now)
        }
        ("GET", "/realestate-admin/leads/export") => {
            export_leads(&req, app, SiteVariant::RealEstate, now)
        }

        ("GET", p) if p.starts_with("/static/") => serve_static(p),

        // Catch-all: back to the landing page.
        _ => Ok(redirect("/")),
    }
}

// ---------- intake ----------

fn submit_generic_lead(req: &mut Request, app: &App) -> ResultResp {
    let form = read_form(req)?;
    let input = GenericIntake {
        full_name: field(&form, "full_name"),
        email: field(&form, "email"),
        phone: field(&form, "phone"),
        company: field(&form, "company"),
        message: field(&form, "message"),
    };

    let lead = match intake::validate_generic(&input) {
        Ok(lead) => lead,
        Err(err) => {
            return html_response(lead_capture_form(Some(&user_message(err)), &input));
        }
    };

    match app.store.create("leads", &lead) {
        Ok(id) => {
            println!("✅ New lead {id} from {}", lead.email);
            notify_new_lead(&app.mailer, &lead, "LeadGen Pro");
            html_response(lead_submitted_panel())
        }
        Err(err) => {
            eprintln!("❌ Lead create failed: {err}");
            html_response(lead_capture_form(
                Some("Failed to submit your message. Please try again."),
                &input,
            ))
        }
    }
}

fn submit_realestate_lead(req: &mut Request, app: &App) -> ResultResp {
    let form = read_form(req)?;
    let input = RealEstateIntake {
        full_name: field(&form, "full_name"),
        email: field(&form, "email"),
        phone: field(&form, "phone"),
        property_type: field(&form, "property_type"),
        budget: field(&form, "budget"),
        preferred_location: field(&form, "preferred_location"),
        message: field(&form, "message"),
    };

    let lead = match intake::validate_real_estate(&input) {
        Ok(lead) => lead,
        Err(err) => {
            return html_response(enquiry_form(Some(&user_message(err)), &input));
        }
    };

    match app.store.create("leads", &lead) {
        Ok(id) => {
            println!("✅ New enquiry {id} from {}", lead.email);
            notify_new_lead(&app.mailer, &lead, "EliteProperties");
            html_response(enquiry_submitted_panel())
        }
        Err(err) => {
            eprintln!("❌ Enquiry create failed: {err}");
            html_response(enquiry_form(
                Some("An unexpected error occurred. Please try again or contact us directly."),
                &input,
            ))
        }
    }
}

// ---------- auth ----------

fn sign_in(
    req: &mut Request,
    app: &App,
    chrome: SiteChrome,
    paths: &'static DashboardPaths,
    now: i64,
) -> ResultResp {
    let form = read_form(req)?;
    let email = field(&form, "email").trim().to_lowercase();
    let password_input = field(&form, "password");

    let invalid = || {
        html_response(login_page(
            chrome,
            paths.login,
            Some("Invalid email or password. Please check your credentials."),
        ))
    };

    if email.is_empty() || password_input.is_empty() {
        return invalid();
    }

    let admin = app.db.with_conn(|conn| admins::find_by_email(conn, &email))?;
    let Some(admin) = admin else {
        return invalid();
    };
    if !password::verify_password(&password_input, &admin.password_salt, &admin.password_hash) {
        return invalid();
    }

    let token = app.db.with_conn(|conn| {
        admins::touch_last_login(conn, admin.id, now)?;
        sessions::create_session(conn, admin.id, now)
    })?;

    println!("🔐 {} signed in", admin.email);
    Ok(redirect_with_cookie(
        paths.page,
        &session_cookie_header(&token),
    ))
}

fn sign_out(req: &Request, app: &App, now: i64) -> ResultResp {
    let ctx = SessionContext::resolve(&app.db, req, now)?;
    if let Some(token) = ctx.token() {
        app.db
            .with_conn(|conn| sessions::revoke_session(conn, token, now))?;
    }
    Ok(redirect_with_cookie("/", &clear_session_cookie_header()))
}

// ---------- dashboard ----------

fn dashboard_page(req: &Request, app: &App, site: SiteVariant, now: i64) -> ResultResp {
    let paths = paths_for(site);
    let ctx = SessionContext::resolve(&app.db, req, now)?;
    let admin = match require_admin(&ctx, paths.login) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    let query = lead_query(&query_params(req), site);
    let view = app.feed.view();
    let vm = DashboardVm {
        site,
        paths,
        operator_email: &admin.email,
        synced: view.synced,
        feed_error: view.error.clone(),
        update_banner: app.updater.banner(now),
        stats: compute_stats(&view.leads, Local::now()),
        filtered: filter_leads(&view.leads, &query),
        total_count: view.leads.len(),
        query: &query,
    };
    html_response(admin_page(&vm))
}

fn dashboard_partial(req: &Request, app: &App, site: SiteVariant, now: i64) -> ResultResp {
    let paths = paths_for(site);
    let ctx = SessionContext::resolve(&app.db, req, now)?;
    let admin = match require_admin(&ctx, paths.login) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    let query = lead_query(&query_params(req), site);
    render_partial(app, site, paths, &admin.email, &query, now)
}

fn update_status(req: &mut Request, app: &App, site: SiteVariant, now: i64) -> ResultResp {
    let paths = paths_for(site);
    let ctx = SessionContext::resolve(&app.db, req, now)?;
    let admin = match require_admin(&ctx, paths.login) {
        Ok(admin) => admin.clone(),
        Err(resp) => return Ok(resp),
    };

    let form = read_form(req)?;
    let id = field(&form, "id");
    if id.is_empty() {
        return Err(ServerError::BadRequest("missing lead id".into()));
    }
    let status = LeadStatus::from_str(field(&form, "status").as_str())
        .ok_or_else(|| ServerError::BadRequest("unknown status".into()))?;
    if !site.allowed_statuses().contains(&status) {
        return Err(ServerError::BadRequest(format!(
            "status {:?} is not available on this dashboard",
            status.as_str()
        )));
    }

    // Busy and Failed both fall through to a re-render: the single-flight
    // rule rejects the duplicate silently, and a failure shows its banner.
    let outcome = app.updater.update_status(&id, status, now);
    println!("🔄 Status update {id} -> {} ({outcome:?})", status.as_str());

    let query = lead_query(&form, site);
    render_partial(app, site, paths, &admin.email, &query, now)
}

fn export_leads(req: &Request, app: &App, site: SiteVariant, now: i64) -> ResultResp {
    let paths = paths_for(site);
    let ctx = SessionContext::resolve(&app.db, req, now)?;
    if let Err(resp) = require_admin(&ctx, paths.login) {
        return Ok(resp);
    }

    let query = lead_query(&query_params(req), site);
    let view = app.feed.view();
    let filtered = filter_leads(&view.leads, &query);
    export_leads_xlsx(&filtered, site.as_str())
}

fn render_partial(
    app: &App,
    site: SiteVariant,
    paths: &'static DashboardPaths,
    operator_email: &str,
    query: &LeadQuery,
    now: i64,
) -> ResultResp {
    let view = app.feed.view();
    let vm = DashboardVm {
        site,
        paths,
        operator_email,
        synced: view.synced,
        feed_error: view.error.clone(),
        update_banner: app.updater.banner(now),
        stats: compute_stats(&view.leads, Local::now()),
        filtered: filter_leads(&view.leads, query),
        total_count: view.leads.len(),
        query,
    };
    html_response(leads_partial(&vm))
}

fn paths_for(site: SiteVariant) -> &'static DashboardPaths {
    match site {
        SiteVariant::Generic => &GENERIC_DASHBOARD,
        SiteVariant::RealEstate => &REALESTATE_DASHBOARD,
    }
}

fn lead_query(params: &HashMap<String, String>, site: SiteVariant) -> LeadQuery {
    LeadQuery {
        search: params.get("q").cloned().unwrap_or_default(),
        status: params
            .get("status")
            .map(|s| StatusFilter::parse(s))
            .unwrap_or(StatusFilter::All),
        property_type: match site {
            SiteVariant::RealEstate => params
                .get("property_type")
                .map(|s| PropertyTypeFilter::parse(s))
                .unwrap_or(PropertyTypeFilter::All),
            SiteVariant::Generic => PropertyTypeFilter::All,
        },
    }
}

// ---------- request plumbing ----------

fn field(form: &HashMap<String, String>, name: &str) -> String {
    form.get(name).cloned().unwrap_or_default()
}

fn user_message(err: ServerError) -> String {
    match err {
        ServerError::BadRequest(msg) => msg,
        other => other.to_string(),
    }
}

fn read_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut body = String::new();
    req.body_mut()
        .reader()
        .read_to_string(&mut body)
        .map_err(|_| ServerError::BadRequest("unreadable request body".into()))?;
    Ok(url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect())
}

fn query_params(req: &Request) -> HashMap<String, String> {
    match req.uri().query() {
        Some(q) => url::form_urlencoded::parse(q.as_bytes())
            .into_owned()
            .collect(),
        None => HashMap::new(),
    }
}

fn serve_static(path: &str) -> ResultResp {
    use astra::{Body, ResponseBuilder};

    let rel = path.trim_start_matches("/static/");
    if rel.is_empty() || rel.contains("..") {
        return Err(ServerError::NotFound);
    }
    let file = std::path::Path::new("static").join(rel);
    let bytes = std::fs::read(&file).map_err(|_| ServerError::NotFound)?;

    let content_type = match file.extension().and_then(|e| e.to_str()) {
        Some("css") => mime::TEXT_CSS.as_ref(),
        Some("js") => mime::TEXT_JAVASCRIPT.as_ref(),
        Some("svg") => mime::IMAGE_SVG.as_ref(),
        Some("ico") => "image/x-icon",
        _ => mime::APPLICATION_OCTET_STREAM.as_ref(),
    };

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .body(Body::from(bytes))
        .map_err(|_| ServerError::InternalError)
}

// src/db/leads.rs
//
// Row-level access to the leads table. Returns raw rusqlite errors so the
// store gateway can classify them; nothing outside src/store should call
// these directly.

use rusqlite::{params, Connection, Row};

use crate::leads::model::{
    BudgetRange, Lead, LeadDetails, LeadStatus, NewLead, PropertyType, SiteVariant,
};
use crate::store::gateway::OrderDirection;

const LEAD_COLUMNS: &str = "id, site, full_name, email, phone, message, company, \
     property_type, budget, preferred_location, status, created_at, updated_at";

pub fn insert_lead(conn: &Connection, id: &str, lead: &NewLead, now: i64) -> rusqlite::Result<()> {
    let site = lead.details.site();
    let (company, property_type, budget, preferred_location) = match &lead.details {
        LeadDetails::Generic { company } => (company.as_deref(), None, None, None),
        LeadDetails::RealEstate {
            property_type,
            budget,
            preferred_location,
        } => (
            None,
            property_type.map(|p| p.as_str()),
            budget.map(|b| b.as_str()),
            preferred_location.as_deref(),
        ),
    };

    conn.execute(
        r#"
        insert into leads (
            id, site, full_name, email, phone, message,
            company, property_type, budget, preferred_location,
            status, created_at, updated_at
        ) values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
        "#,
        params![
            id,
            site.as_str(),
            lead.full_name,
            lead.email,
            lead.phone,
            lead.message,
            company,
            property_type,
            budget,
            preferred_location,
            LeadStatus::New.as_str(),
            now,
            now,
        ],
    )?;
    Ok(())
}

/// Single-field merge: status plus the refreshed updated_at.
/// Returns the number of rows touched (0 means unknown id).
pub fn update_lead_status(
    conn: &Connection,
    id: &str,
    status: LeadStatus,
    now: i64,
) -> rusqlite::Result<usize> {
    conn.execute(
        "update leads set status = ?1, updated_at = ?2 where id = ?3",
        params![status.as_str(), now, id],
    )
}

/// The full record set in snapshot order. rowid breaks created_at ties so
/// two inserts in the same second still have a stable order.
pub fn list_leads(conn: &Connection, direction: OrderDirection) -> rusqlite::Result<Vec<Lead>> {
    let sql = match direction {
        OrderDirection::Desc => format!(
            "select {LEAD_COLUMNS} from leads order by created_at desc, rowid desc"
        ),
        OrderDirection::Asc => format!(
            "select {LEAD_COLUMNS} from leads order by created_at asc, rowid asc"
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], lead_from_row)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn lead_from_row(row: &Row) -> rusqlite::Result<Lead> {
    let site: String = row.get(1)?;
    let company: Option<String> = row.get(6)?;
    let property_type: Option<String> = row.get(7)?;
    let budget: Option<String> = row.get(8)?;
    let preferred_location: Option<String> = row.get(9)?;

    // Unknown site tags read as generic rather than failing the whole
    // snapshot; the row keeps rendering with its base fields.
    let details = match SiteVariant::from_str(&site) {
        Some(SiteVariant::RealEstate) => LeadDetails::RealEstate {
            property_type: property_type.as_deref().and_then(PropertyType::from_str),
            budget: budget.as_deref().and_then(BudgetRange::from_str),
            preferred_location,
        },
        _ => LeadDetails::Generic { company },
    };

    let status: Option<String> = row.get(10)?;

    Ok(Lead {
        id: row.get(0)?,
        full_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        message: row.get(5)?,
        status: status.as_deref().and_then(LeadStatus::from_str),
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
        details,
    })
}

use crate::errors::ServerError;
use crate::leads::model::{Lead, LeadDetails};
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use crate::templates::components::format_date;
use rust_xlsxwriter::Workbook;

/// Export the currently displayed (filtered) lead list as a spreadsheet.
pub fn export_leads_xlsx(leads: &[&Lead], filename_tag: &str) -> ResultResp {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let headers = [
        "Name",
        "Email",
        "Phone",
        "Company",
        "Property Type",
        "Budget",
        "Preferred Location",
        "Message",
        "Status",
        "Created",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{header}': {e}"))
            })?;
    }

    for (i, lead) in leads.iter().enumerate() {
        let r = (i + 1) as u32;

        let (company, property_type, budget, location) = match &lead.details {
            LeadDetails::Generic { company } => {
                (company.as_deref().unwrap_or(""), "", "", "")
            }
            LeadDetails::RealEstate {
                property_type,
                budget,
                preferred_location,
            } => (
                "",
                property_type.map(|p| p.label()).unwrap_or(""),
                budget.map(|b| b.label()).unwrap_or(""),
                preferred_location.as_deref().unwrap_or(""),
            ),
        };

        let created = format_date(lead.created_at);
        let cells: [(u16, &str); 10] = [
            (0, lead.full_name.as_str()),
            (1, lead.email.as_str()),
            (2, lead.phone.as_str()),
            (3, company),
            (4, property_type),
            (5, budget),
            (6, location),
            (7, lead.message.as_str()),
            (8, lead.effective_status().as_str()),
            (9, created.as_str()),
        ];

        for (col, value) in cells {
            worksheet.write_string(r, col, value).map_err(|e| {
                ServerError::XlsxError(format!("Failed to write row {r} col {col}: {e}"))
            })?;
        }
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))?;

    xlsx_response(buffer, &format!("leads_{filename_tag}.xlsx"))
}

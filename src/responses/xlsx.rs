// responses/xlsx.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Serve a generated workbook as a download.
pub fn xlsx_response(buffer: Vec<u8>, filename: &str) -> ResultResp {
    attachment_response(buffer, filename, XLSX_MIME)
}

fn attachment_response(buffer: Vec<u8>, filename: &str, content_type: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(buffer))
        .map_err(|_| ServerError::InternalError)
}

//! Routes for the ticket form

use crate::form::{render_page, TicketForm};
use crate::AppState;
use actix_web::cookie::Cookie;
use actix_web::http::header::{ContentDisposition, ContentType, SET_COOKIE};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use ticket::{TicketError, TicketRecord};

/// Cookie names holding the last submitted trip details
pub const LAST_DATE: &str = "last_date";
pub const LAST_FROM: &str = "last_from";
pub const LAST_TO: &str = "last_to";
pub const LAST_TIME: &str = "last_time";

fn page_response(status: StatusCode, values: &TicketForm, error: Option<&str>) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(render_page(values, error))
}

/// `Set-Cookie` value with the name and value percent-encoded.
///
/// Form values are free text, so `;` and control characters must not reach
/// the header unescaped. Request cookies are percent-decoded on the way back in.
fn last_cookie(cookie_name: &'static str, value: &str) -> String {
    Cookie::build(cookie_name, value)
        .path("/")
        .finish()
        .encoded()
        .to_string()
}

/// GET / - the form, pre-filled from the last submission's cookies
pub async fn index(req: HttpRequest) -> HttpResponse {
    let cookie = |name: &str| req.cookie(name).map(|c| c.value().to_string());
    let values = TicketForm::from_last_submission(
        cookie(LAST_DATE),
        cookie(LAST_FROM),
        cookie(LAST_TO),
        cookie(LAST_TIME),
    );
    page_response(StatusCode::OK, &values, None)
}

/// POST / - render the ticket and return it as a download
pub async fn submit(state: web::Data<AppState>, form: web::Form<TicketForm>) -> HttpResponse {
    let form = form.into_inner();

    let record = match form.clone().into_record() {
        Ok(record) => record,
        Err(e) => {
            log::warn!("Rejected ticket form: {}", e);
            return page_response(StatusCode::BAD_REQUEST, &form, Some(&e.to_string()));
        }
    };

    let worker_state = state.clone();
    let worker_record = record.clone();
    let result = web::block(move || {
        worker_state
            .generator
            .render_to_dir(&worker_record, &worker_state.config.output_dir)
    })
    .await;

    match result {
        Ok(Ok((ticket, _path))) => download_response(&record, ticket.filename, ticket.bytes),
        Ok(Err(e @ TicketError::ResourceNotFound(_))) => {
            log::error!("A required file was not found: {}", e);
            let message = format!(
                "Server Error: A required file is missing. Please contact support. Details: {}",
                e
            );
            page_response(StatusCode::INTERNAL_SERVER_ERROR, &form, Some(&message))
        }
        Ok(Err(e)) => unexpected(&form, &e),
        Err(e) => unexpected(&form, &e),
    }
}

fn unexpected(form: &TicketForm, err: &dyn std::fmt::Display) -> HttpResponse {
    log::error!("An unexpected error occurred: {}", err);
    let message = format!("An unexpected error occurred during PDF generation: {}", err);
    page_response(StatusCode::INTERNAL_SERVER_ERROR, form, Some(&message))
}

fn download_response(record: &TicketRecord, filename: String, bytes: Vec<u8>) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    builder
        .content_type("application/pdf")
        .insert_header(ContentDisposition::attachment(filename));
    for (name, value) in [
        (LAST_DATE, &record.date),
        (LAST_FROM, &record.from_location),
        (LAST_TO, &record.to_location),
        (LAST_TIME, &record.dep_time),
    ] {
        builder.append_header((SET_COOKIE, last_cookie(name, value)));
    }
    builder.body(bytes)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(index))
            .route(web::post().to(submit)),
    );
}

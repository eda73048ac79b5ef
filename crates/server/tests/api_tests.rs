//! HTTP tests for the ticket form routes

use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, SET_COOKIE};
use actix_web::http::StatusCode;
use actix_web::{cookie::Cookie, test, web, App};
use lopdf::Document;
use pdf_core::testing::{minimal_ttf, solid_png};
use std::path::Path;
use ticket_server::config::AppConfig;
use ticket_server::{handlers, AppState};

const FORM: [(&str, &str); 8] = [
    ("passenger_name", "Ahmed Ibrahim"),
    ("date", "2024-05-01"),
    ("from_location", "Male"),
    ("to_location", "Hulhumale"),
    ("dep_time", "10:30"),
    ("deck", "MAIN"),
    ("seat_no", "A12"),
    ("price", "50"),
];

fn test_config(root: &Path) -> AppConfig {
    let font_path = root.join("faruma.ttf");
    let emblem_path = root.join("static").join("crown.png");
    std::fs::create_dir_all(root.join("static")).unwrap();
    std::fs::write(&font_path, minimal_ttf(&['ތ', 'ާ', 'ރ', 'ީ', 'ޚ', 'ް'])).unwrap();
    std::fs::write(&emblem_path, solid_png(16, 10, [212, 175, 55, 255])).unwrap();

    AppConfig {
        output_dir: root.join("generated_tickets"),
        font_path,
        emblem_path,
        ..AppConfig::default()
    }
}

macro_rules! init_app {
    ($config:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new($config).unwrap()))
                .configure(handlers::config),
        )
        .await
    };
}

fn page_content(bytes: &[u8]) -> String {
    let doc = Document::load_mem(bytes).unwrap();
    let page_id = *doc.get_pages().get(&1).unwrap();
    String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
}

#[actix_web::test]
async fn test_get_form() {
    let dir = tempfile::tempdir().unwrap();
    let app = init_app!(test_config(dir.path()));

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains(r#"<form method="post" action="/">"#));
    assert!(body.contains(r#"name="passenger_name""#));
    assert!(!body.contains("alert"));
}

#[actix_web::test]
async fn test_get_form_prefilled_from_cookies() {
    let dir = tempfile::tempdir().unwrap();
    let app = init_app!(test_config(dir.path()));

    let req = test::TestRequest::get()
        .uri("/")
        .cookie(Cookie::new("last_date", "2024-05-01"))
        .cookie(Cookie::new("last_from", "Male"))
        .cookie(Cookie::new("last_time", "10:30"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();

    assert!(body.contains(r#"name="date" value="2024-05-01""#));
    assert!(body.contains(r#"name="from_location" value="Male""#));
    assert!(body.contains(r#"name="to_location" value="""#));
    assert!(body.contains(r#"name="dep_time" value="10:30""#));
}

#[actix_web::test]
async fn test_submit_returns_pdf_download() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let output_dir = config.output_dir.clone();
    let app = init_app!(config);

    let req = test::TestRequest::post().uri("/").set_form(FORM).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap(),
        "application/pdf"
    );

    let disposition = resp
        .headers()
        .get(CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("AI_2024_05_01_Male_to_Hulhumale.pdf"));

    let cookies: Vec<(String, String)> = resp
        .response()
        .cookies()
        .map(|c| (c.name().to_string(), c.value().to_string()))
        .collect();
    for (name, value) in [
        ("last_date", "2024-05-01"),
        ("last_from", "Male"),
        ("last_to", "Hulhumale"),
        ("last_time", "10:30"),
    ] {
        assert!(
            cookies.contains(&(name.to_string(), value.to_string())),
            "missing cookie {name}"
        );
    }

    let body = test::read_body(resp).await;
    let content = page_content(&body);
    assert!(content.contains("(MVR 50) Tj"));
    // One check mark, on the MAIN row
    assert_eq!(content.matches("(3) Tj").count(), 1);
    assert!(content.contains("339.84 137.52 Td"));

    let saved = std::fs::read(output_dir.join("AI_2024_05_01_Male_to_Hulhumale.pdf")).unwrap();
    assert_eq!(saved, body.to_vec());
}

#[actix_web::test]
async fn test_cookie_values_are_encoded_and_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let app = init_app!(config);

    let to = "Hulhumale; Path=/admin";
    let time = "10:30\r\nX-Injected: 1";
    let mut form = FORM;
    form[3] = ("to_location", to);
    form[4] = ("dep_time", time);

    let req = test::TestRequest::post().uri("/").set_form(form).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let raw: Vec<String> = resp
        .headers()
        .get_all(SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(raw.len(), 4);
    assert!(raw.contains(&"last_to=Hulhumale%3B%20Path%3D%2Fadmin; Path=/".to_string()));
    assert!(raw.iter().all(|v| v.matches("Path=").count() == 1));
    assert!(resp.headers().get("x-injected").is_none());

    let cookies: Vec<Cookie<'static>> = resp.response().cookies().map(Cookie::into_owned).collect();
    let value = |name: &str| {
        cookies
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.value().to_string())
            .unwrap()
    };
    assert_eq!(value("last_to"), to);
    assert_eq!(value("last_time"), time);

    // Sent back by the browser, the values pre-fill the form unchanged
    let req = test::TestRequest::get()
        .uri("/")
        .cookie(Cookie::new("last_to", value("last_to")))
        .to_request();
    let body = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    assert!(body.contains(r#"name="to_location" value="Hulhumale; Path=/admin""#));
}

#[actix_web::test]
async fn test_submit_missing_field() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let output_dir = config.output_dir.clone();
    let app = init_app!(config);

    let req = test::TestRequest::post()
        .uri("/")
        .set_form(&FORM[..7])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Missing form field: price"));
    assert!(body.contains(r#"value="Ahmed Ibrahim""#));
    assert!(!output_dir.exists());
}

#[actix_web::test]
async fn test_submit_missing_font() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::remove_file(&config.font_path).unwrap();
    let app = init_app!(config);

    let req = test::TestRequest::post().uri("/").set_form(FORM).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.headers().get(CONTENT_DISPOSITION).is_none());

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Server Error: A required file is missing. Please contact support. Details:"));
    assert!(body.contains("faruma.ttf"));
}

#[actix_web::test]
async fn test_unknown_deck_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let app = init_app!(test_config(dir.path()));

    let mut form = FORM;
    form[5] = ("deck", "middle");
    let req = test::TestRequest::post().uri("/").set_form(form).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let content = page_content(&test::read_body(resp).await);
    assert_eq!(content.matches("(3) Tj").count(), 0);
}

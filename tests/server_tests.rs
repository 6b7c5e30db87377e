use actix_web::{App, test, web};
use serde_json::{Value, json};

use jadwal::config::ServerConfig;
use jadwal::server::{AppState, configure};

fn catalog_body() -> Value {
    json!({
        "courses": [
            {"code": "A", "name": "Algebra", "sectionId": "A1", "type": "نظري", "creditHours": "3", "status": "مفتوحة",
             "schedule": {"sessions": [{"day": 1, "startTime": "08:00", "endTime": "09:00", "room": "R1"}]}},
            {"code": "A", "name": "Algebra", "sectionId": "A2", "type": "نظري", "creditHours": "3", "status": "مغلقة",
             "schedule": {"sessions": [{"day": 1, "startTime": "10:00", "endTime": "11:00", "room": "R1"}]}},
            {"code": "B", "name": "Biology", "sectionId": "B1", "type": "نظري", "creditHours": "3", "status": "مفتوحة",
             "schedule": {"sessions": [{"day": 1, "startTime": "08:30", "endTime": "09:30", "room": "R2"}]}}
        ],
        "dayMapping": {"1": "الأحد", "2": "الاثنين", "3": "الثلاثاء", "4": "الأربعاء", "5": "الخميس"}
    })
}

fn state() -> web::Data<AppState> {
    let config = ServerConfig { max_concurrent: 2, catalog_cache: 4, ..ServerConfig::default() };
    web::Data::new(AppState::new(&config))
}

#[actix_web::test]
async fn test_health_y_help() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["availableSlots"], 2);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/help").to_request()).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert!(body["generate_example"]["courses"].is_array());
}

#[actix_web::test]
async fn test_cargar_catalogo_y_generar() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post().uri("/catalog").set_json(catalog_body()).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["catalogId"].as_str().unwrap().to_string();
    assert_eq!(body["cached"], false);
    assert_eq!(body["summary"]["totalSections"], 3);
    assert_eq!(body["courses"].as_array().unwrap().len(), 2);
    assert_eq!(body["courses"][0]["units"], 2);

    // el mismo contenido sale de la caché
    let req = test::TestRequest::post().uri("/catalog").set_json(catalog_body()).to_request();
    let again: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(again["catalogId"], id.as_str());
    assert_eq!(again["cached"], true);

    let req = test::TestRequest::post()
        .uri("/generate")
        .set_json(json!({
            "catalogId": id,
            "courses": ["A", "B"],
            "minCredits": 0,
            "maxCredits": 99,
            "includeClosed": true,
            "allowPartial": false
        }))
        .to_request();
    let result: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result["schedulesCount"], 1);
    assert_eq!(result["stopReason"], "exhausted");
    let units = result["schedules"][0]["units"].as_array().unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0]["type"], "theoretical");
    assert_eq!(units[0]["theoretical"]["sectionId"], "A2");
    assert_eq!(units[1]["theoretical"]["sectionId"], "B1");
    assert_eq!(result["schedules"][0]["totalCredits"], 6);
}

#[actix_web::test]
async fn test_generar_con_catalogo_en_linea() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/generate")
        .set_json(json!({"catalog": catalog_body(), "courses": ["A"], "registeredSections": "A2"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let result: Value = test::read_body_json(resp).await;
    // A2 cerrada pero inscrita: primera
    assert_eq!(result["schedulesCount"], 2);
    assert_eq!(result["schedules"][0]["score"], 200);
}

#[actix_web::test]
async fn test_errores_http() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/generate")
        .set_json(json!({"catalogId": "nope", "courses": ["A"]}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 404);

    let req = test::TestRequest::post().uri("/generate").set_json(json!({"courses": ["A"]})).to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 400);

    let req = test::TestRequest::post()
        .uri("/generate")
        .set_json(json!({"catalog": catalog_body(), "courses": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("at least one course"));

    let req = test::TestRequest::post()
        .uri("/generate")
        .set_json(json!({"catalog": catalog_body(), "courses": ["A"], "days": [9]}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_comprobar_inscritas() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/registered/check")
        .set_json(json!({"catalog": catalog_body(), "registeredSections": "A1, B2"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["allKnown"], false);
    assert_eq!(body["known"][0]["sectionId"], "A1");
    assert_eq!(body["unknown"][0]["sectionId"], "B2");
}

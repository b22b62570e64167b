use actix_web::{test, App};
use personal_tools::server::configure;
use serde_json::{json, Value};

#[actix_web::test]
async fn test_health() {
    let app = test::init_service(App::new().configure(configure)).await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp, json!({"status": "ok"}));
}

#[actix_web::test]
async fn test_rut_normalizar_endpoint() {
    let app = test::init_service(App::new().configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/rut/normalizar?valor=19.838.046-6").to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["rut"], json!("19838046-6"));

    let req = test::TestRequest::get().uri("/api/rut/normalizar?valor=rut").to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["rut"], Value::Null);

    let req = test::TestRequest::get().uri("/api/rut/normalizar").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_rut_extraer_endpoint() {
    let app = test::init_service(App::new().configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/api/rut/extraer")
        .set_json(json!({"texto": "Contrato-12.345.678-k.pdf"}))
        .to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["rut"], json!("12345678-K"));
}

#[actix_web::test]
async fn test_exportacion_normalizar_endpoint() {
    let app = test::init_service(App::new().configure(configure)).await;
    let body = json!({
        "rows": [
            {"A": "Listado de Empleados", "B": null},
            {"A": "Rut", "B": "Nombre"},
            {"A": "19.838.046-6", "B": "Ana"}
        ],
        "filtrar_rut": true
    });
    let req = test::TestRequest::post().uri("/api/exportacion/normalizar").set_json(body).to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp["count"], 1);
    assert_eq!(resp["mapeo"], json!({"A": "Rut", "B": "Nombre"}));
    assert_eq!(resp["rows"], json!([{"Rut": "19.838.046-6", "Nombre": "Ana"}]));
}

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use crate::excel::{normalizar_filas, OpcionesNormalizacion};
use crate::models::Fila;
use crate::rut::{extraer_rut, normalizar_rut};

#[derive(Deserialize)]
struct ExtraerRequest {
    texto: String,
}

#[derive(Deserialize)]
struct NormalizarRequest {
    rows: Vec<Fila>,
    header_row: Option<usize>,
    columna_rut: Option<String>,
    #[serde(default)]
    filtrar_rut: bool,
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

/// GET /api/rut/normalizar?valor=19.838.046-6
async fn rut_normalizar_handler(query: web::Query<HashMap<String, String>>) -> impl Responder {
    let qm = query.into_inner();
    let valor = match qm.get("valor") {
        Some(v) => v.clone(),
        None => return HttpResponse::BadRequest().json(json!({"error": "valor query parameter is required"})),
    };
    let rut = normalizar_rut(&valor);
    HttpResponse::Ok().json(json!({"valor": valor, "rut": rut}))
}

/// POST /api/rut/extraer  { "texto": "Contrato-19.838.046-6.pdf" }
async fn rut_extraer_handler(body: web::Json<ExtraerRequest>) -> impl Responder {
    let rut = extraer_rut(&body.texto);
    HttpResponse::Ok().json(json!({"rut": rut}))
}

/// POST /api/exportacion/normalizar
/// Recibe filas crudas (claves por letra de columna) y devuelve el mapeo
/// aplicado y las filas normalizadas. No toca disco.
async fn exportacion_normalizar_handler(body: web::Json<NormalizarRequest>) -> impl Responder {
    let req = body.into_inner();
    let mut opciones = OpcionesNormalizacion::default();
    if let Some(h) = req.header_row {
        opciones.fila_encabezado = h;
    }
    if let Some(c) = req.columna_rut.filter(|c| !c.trim().is_empty()) {
        opciones.columna_rut = c;
    }
    if req.filtrar_rut {
        opciones = opciones.filtrando_rut();
    }

    let (mapeo, filas) = normalizar_filas(&req.rows, &opciones);
    HttpResponse::Ok().json(json!({"count": filas.len(), "mapeo": mapeo, "rows": filas}))
}

/// Registra las rutas del router auxiliar. Separado de `run_server` para
/// poder montarlo en pruebas con `actix_web::test`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_handler))
        .route("/api/rut/normalizar", web::get().to(rut_normalizar_handler))
        .route("/api/rut/extraer", web::post().to(rut_extraer_handler))
        .route("/api/exportacion/normalizar", web::post().to(exportacion_normalizar_handler));
}

pub async fn run_server(bind_addr: &str) -> std::io::Result<()> {
    tracing::info!(bind = bind_addr, "iniciando router auxiliar");
    HttpServer::new(|| {
        App::new()
            .wrap(Cors::permissive())
            .configure(configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}

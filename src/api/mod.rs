//! Cliente delgado para el backend externo de personal.
//!
//! Respuestas esperadas: `{ "success": bool, "data": ..., "message"?: str }`.
//! Un estado no-2xx o `success: false` se convierte en `AppError::Api`; nunca
//! se reintenta.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};

/// Endpoints consultados por la verificación de humo.
pub const ENDPOINTS_VERIFICACION: &[&str] = &[
    "/api/documentos/tipos",
    "/api/personal",
    "/api/cursos",
    "/api/programacion-optimizada",
    "/api/prerrequisitos",
];

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get_json(&self, path: &str) -> Result<Value> {
        debug!(endpoint = path, "GET");
        let resp = self.http.get(self.url(path)).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        interpretar_respuesta(path, status, &body)
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        debug!(endpoint = path, "POST");
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        interpretar_respuesta(path, status, &text)
    }

    /// `GET /api/documentos/tipos` -> nombres de tipos de documento
    pub async fn tipos_documento(&self) -> Result<Vec<String>> {
        let v = self.get_json("/api/documentos/tipos").await?;
        Ok(datos(&v)
            .as_array()
            .map(|a| a.iter().filter_map(|t| t.as_str().map(|s| s.to_string())).collect())
            .unwrap_or_default())
    }

    /// `GET /api/personal` -> registros del personal
    pub async fn listar_personal(&self) -> Result<Vec<Value>> {
        let v = self.get_json("/api/personal").await?;
        Ok(datos(&v).as_array().cloned().unwrap_or_default())
    }
}

/// Interpreta estado + cuerpo de una respuesta del backend.
pub fn interpretar_respuesta(endpoint: &str, status: u16, body: &str) -> Result<Value> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if !(200..300).contains(&status) {
        let mensaje = parsed
            .as_ref()
            .and_then(mensaje_de)
            .unwrap_or_else(|| body.trim().chars().take(200).collect());
        return Err(AppError::Api { endpoint: endpoint.to_string(), status: Some(status), mensaje });
    }

    let v = parsed.ok_or_else(|| AppError::Api {
        endpoint: endpoint.to_string(),
        status: Some(status),
        mensaje: "respuesta no es JSON".to_string(),
    })?;

    if v.get("success").and_then(Value::as_bool) == Some(false) {
        let mensaje = mensaje_de(&v).unwrap_or_else(|| "success=false".to_string());
        return Err(AppError::Api { endpoint: endpoint.to_string(), status: Some(status), mensaje });
    }
    Ok(v)
}

/// Contenido útil de una respuesta: `data` si existe, si no la respuesta completa.
pub fn datos(v: &Value) -> &Value {
    v.get("data").unwrap_or(v)
}

fn mensaje_de(v: &Value) -> Option<String> {
    ["message", "error", "mensaje"]
        .iter()
        .find_map(|k| v.get(*k).and_then(Value::as_str))
        .map(|s| s.to_string())
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultadoVerificacion {
    pub endpoint: String,
    pub ok: bool,
    pub detalle: String,
}

/// Consulta cada endpoint en orden y reporta el resultado. Los fallos no
/// interrumpen la verificación.
pub async fn verificar_endpoints(cliente: &ApiClient, endpoints: &[&str]) -> Vec<ResultadoVerificacion> {
    let mut resultados = Vec::with_capacity(endpoints.len());
    for ep in endpoints {
        let r = match cliente.get_json(ep).await {
            Ok(v) => {
                let detalle = match datos(&v) {
                    Value::Array(a) => format!("{} elementos", a.len()),
                    Value::Object(o) => format!("objeto con {} campos", o.len()),
                    otro => otro.to_string(),
                };
                info!(endpoint = ep, %detalle, "ok");
                ResultadoVerificacion { endpoint: ep.to_string(), ok: true, detalle }
            }
            Err(e) => {
                warn!(endpoint = ep, error = %e, "falló");
                ResultadoVerificacion { endpoint: ep.to_string(), ok: false, detalle: e.to_string() }
            }
        };
        resultados.push(r);
    }
    resultados
}

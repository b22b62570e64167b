//! Configuración explícita de las utilidades.
//!
//! Se lee desde variables de entorno (cargando `.env` si existe) y cada
//! comando de la CLI puede sobrescribir los valores. No existe ruta por
//! defecto para el directorio de documentos: debe indicarse siempre.

use std::env;
use std::path::PathBuf;

use crate::error::{AppError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_HEADER_ROW: usize = 1;
pub const DEFAULT_RUT_FIELD: &str = "Rut";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// URL base del backend de personal (`GA_API_BASE_URL`)
    pub api_base_url: String,
    /// Directorio con los documentos del personal (`GA_DOCS_DIR`)
    pub docs_dir: Option<PathBuf>,
    /// Índice de la fila de encabezados en las exportaciones (`GA_HEADER_ROW`)
    pub header_row: usize,
    /// Campo que contiene el RUT tras normalizar (`GA_RUT_FIELD`)
    pub rut_field: String,
    /// Dirección del router auxiliar (`GA_BIND`)
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            docs_dir: None,
            header_row: DEFAULT_HEADER_ROW,
            rut_field: DEFAULT_RUT_FIELD.to_string(),
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Config {
    /// Carga `.env` (si existe) y construye la configuración desde el entorno.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Construye la configuración consultando `lookup` por cada variable.
    /// Separado de `from_env` para poder probarlo sin tocar el entorno.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = Config::default();

        if let Some(url) = non_empty("GA_API_BASE_URL") {
            cfg.api_base_url = url.trim_end_matches('/').to_string();
        }
        cfg.docs_dir = non_empty("GA_DOCS_DIR").map(PathBuf::from);
        if let Some(row) = non_empty("GA_HEADER_ROW") {
            cfg.header_row = row
                .parse::<usize>()
                .map_err(|_| AppError::Config(format!("GA_HEADER_ROW no es un índice válido: '{}'", row)))?;
        }
        if let Some(field) = non_empty("GA_RUT_FIELD") {
            cfg.rut_field = field;
        }
        if let Some(bind) = non_empty("GA_BIND") {
            cfg.bind = bind;
        }
        Ok(cfg)
    }

    /// Directorio de documentos, o error si no fue configurado.
    pub fn require_docs_dir(&self) -> Result<PathBuf> {
        self.docs_dir
            .clone()
            .ok_or_else(|| AppError::Config("falta el directorio de documentos (GA_DOCS_DIR o --dir)".to_string()))
    }
}

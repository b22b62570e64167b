use std::fmt;

/// Errores de las operaciones con efectos (lectura de planillas, archivos,
/// llamadas a la API externa). Las transformaciones puras nunca fallan:
/// señalan entradas inválidas devolviendo `None`.
#[derive(Debug)]
pub enum AppError {
    /// Archivo, hoja o directorio inexistente
    NotFound(String),
    Io(String),
    Excel(String),
    Json(String),
    /// La API externa respondió con estado no-2xx o `success: false`
    Api { endpoint: String, status: Option<u16>, mensaje: String },
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "no encontrado: {}", msg),
            AppError::Io(msg) => write!(f, "error de IO: {}", msg),
            AppError::Excel(msg) => write!(f, "error leyendo planilla: {}", msg),
            AppError::Json(msg) => write!(f, "JSON inválido: {}", msg),
            AppError::Api { endpoint, status: Some(s), mensaje } => {
                write!(f, "API {} respondió {}: {}", endpoint, s, mensaje)
            }
            AppError::Api { endpoint, status: None, mensaje } => {
                write!(f, "API {} falló: {}", endpoint, mensaje)
            }
            AppError::Config(msg) => write!(f, "configuración inválida: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(err.to_string())
        } else {
            AppError::Io(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err.to_string())
    }
}

impl From<calamine::Error> for AppError {
    fn from(err: calamine::Error) -> Self {
        AppError::Excel(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Api {
            endpoint: err.url().map(|u| u.path().to_string()).unwrap_or_default(),
            status: err.status().map(|s| s.as_u16()),
            mensaje: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

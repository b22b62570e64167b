// Biblioteca raíz del crate `personal_tools`.
// Utilidades alrededor del backend de personal: normalización de RUT,
// exportación y normalización de planillas, asociación de documentos por
// RUT, cliente de la API externa y un router auxiliar.
pub mod error;
pub mod config;
pub mod models;
pub mod rut;
pub mod excel;
pub mod api;
pub mod server;

/// Ejecuta el router HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
pub use error::{AppError, Result};
pub use config::Config;

//! Módulo `excel` dividido en submódulos para mantener el código organizado.
//!
//! Submódulos:
//! - `io`: lectura de hojas con calamine y helpers de celdas/columnas
//! - `normalizar`: mapeo de encabezados, renombrado y filtro por RUT
//! - `exportacion`: planilla -> JSON, respaldo y normalización en disco

pub mod io;
pub mod normalizar;
pub mod exportacion;

pub use io::{leer_hoja, index_to_column_letters};
pub use normalizar::{aplicar_mapeo, construir_mapeo_encabezados, filtrar_filas_validas};
pub use exportacion::{
    escribir_exportacion, exportar_hoja, leer_exportacion, normalizar_exportacion, normalizar_filas,
    respaldar, ruta_respaldo, OpcionesNormalizacion, ResumenNormalizacion,
};

//! Orquestación de exportaciones: planilla -> JSON, respaldo y normalización
//! en el mismo archivo.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::{AppError, Result};
use crate::excel::io::leer_hoja;
use crate::excel::normalizar::{aplicar_mapeo, construir_mapeo_encabezados, filtrar_filas_validas, COLUMNA_RUT, ETIQUETA_RUT, FILA_ENCABEZADO};
use crate::models::{Exportacion, Fila, MapeoEncabezados};

/// Lee la hoja indicada (o la primera) y arma el documento de exportación.
pub fn exportar_hoja<P: AsRef<Path>>(path: P, hoja: Option<&str>) -> Result<Exportacion> {
    let path = path.as_ref();
    let (hoja_usada, filas) = leer_hoja(path, hoja)?;
    let source = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    info!(source = %source, hoja = %hoja_usada, filas = filas.len(), "hoja exportada");
    Ok(Exportacion::new(source, Some(hoja_usada), filas))
}

pub fn escribir_exportacion<P: AsRef<Path>>(path: P, exportacion: &Exportacion) -> Result<()> {
    let contenido = serde_json::to_string_pretty(exportacion)?;
    fs::write(path, contenido)?;
    Ok(())
}

/// Lee un JSON de exportación. Acepta también un arreglo de filas sin
/// envoltorio; en ese caso `source` es el nombre del archivo.
pub fn leer_exportacion<P: AsRef<Path>>(path: P) -> Result<Exportacion> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(AppError::NotFound(format!("exportación {:?}", path)));
    }
    let contenido = fs::read_to_string(path)?;
    if let Ok(exp) = serde_json::from_str::<Exportacion>(&contenido) {
        return Ok(exp);
    }
    let filas: Vec<Fila> = serde_json::from_str(&contenido)?;
    let source = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(Exportacion::new(source, None, filas))
}

/// `<dir>/<nombre-sin-extensión>_bak_<unix-millis>.json`
pub fn ruta_respaldo(path: &Path, millis: i64) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "export".to_string());
    let nombre = format!("{}_bak_{}.json", stem, millis);
    match path.parent() {
        Some(dir) => dir.join(nombre),
        None => PathBuf::from(nombre),
    }
}

/// Copia `path` tal cual a su ruta de respaldo y devuelve esa ruta.
pub fn respaldar(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(AppError::NotFound(format!("archivo a respaldar {:?}", path)));
    }
    let destino = ruta_respaldo(path, chrono::Utc::now().timestamp_millis());
    fs::copy(path, &destino)?;
    info!(origen = %path.display(), respaldo = %destino.display(), "respaldo creado");
    Ok(destino)
}

#[derive(Debug, Clone)]
pub struct OpcionesNormalizacion {
    pub fila_encabezado: usize,
    pub columna_rut: String,
    /// Si se indica, se descartan las filas cuyo campo no es un RUT válido
    pub filtrar_por: Option<String>,
}

impl Default for OpcionesNormalizacion {
    fn default() -> Self {
        OpcionesNormalizacion {
            fila_encabezado: FILA_ENCABEZADO,
            columna_rut: COLUMNA_RUT.to_string(),
            filtrar_por: None,
        }
    }
}

impl OpcionesNormalizacion {
    pub fn filtrando_rut(mut self) -> Self {
        self.filtrar_por = Some(ETIQUETA_RUT.to_string());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumenNormalizacion {
    pub respaldo: PathBuf,
    pub filas_antes: usize,
    pub filas_despues: usize,
    pub mapeo: MapeoEncabezados,
}

/// Pasos puros de la normalización: mapeo + renombrado + filtro opcional.
pub fn normalizar_filas(filas: &[Fila], opciones: &OpcionesNormalizacion) -> (MapeoEncabezados, Vec<Fila>) {
    let mapeo = construir_mapeo_encabezados(filas, opciones.fila_encabezado, &opciones.columna_rut);
    let normalizadas = aplicar_mapeo(filas, &mapeo);
    let resultado = match &opciones.filtrar_por {
        Some(campo) => filtrar_filas_validas(&normalizadas, campo),
        None => normalizadas,
    };
    (mapeo, resultado)
}

/// Normaliza una exportación en el mismo archivo. El respaldo se crea antes
/// de escribir; la escritura en sí no es atómica.
pub fn normalizar_exportacion<P: AsRef<Path>>(path: P, opciones: &OpcionesNormalizacion) -> Result<ResumenNormalizacion> {
    let path = path.as_ref();
    let original = leer_exportacion(path)?;
    let respaldo = respaldar(path)?;

    let (mapeo, filas) = normalizar_filas(&original.rows, opciones);
    let resumen = ResumenNormalizacion {
        respaldo,
        filas_antes: original.rows.len(),
        filas_despues: filas.len(),
        mapeo,
    };

    let salida = Exportacion::new(original.source, original.sheet, filas);
    escribir_exportacion(path, &salida)?;
    info!(
        archivo = %path.display(),
        antes = resumen.filas_antes,
        despues = resumen.filas_despues,
        "exportación normalizada"
    );
    Ok(resumen)
}

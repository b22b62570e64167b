use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{AppError, Result};
use super::{extraer_rut, normalizar_rut};

/// Resultado de asociar un listado de archivos con los RUT de los registros.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Asociacion {
    /// RUT canónico -> archivos, en el orden del listado
    pub por_rut: BTreeMap<String, Vec<String>>,
    /// Archivos cuyo nombre no contiene un RUT válido
    pub sin_rut: Vec<String>,
    /// Archivos con RUT válido que no corresponde a ningún registro
    pub sin_registro: Vec<String>,
}

impl Asociacion {
    pub fn total_asociados(&self) -> usize {
        self.por_rut.values().map(|v| v.len()).sum()
    }
}

/// Asocia cada archivo al RUT contenido en su nombre, siempre que ese RUT
/// exista entre `ruts` (valores crudos de los registros, se normalizan aquí).
///
/// Los archivos que no se pueden asociar no generan error; quedan listados
/// en `sin_rut` o `sin_registro`.
pub fn asociar_archivos_por_rut<A, R>(archivos: &[A], ruts: &[R]) -> Asociacion
where
    A: AsRef<str>,
    R: AsRef<str>,
{
    let conocidos: HashSet<String> = ruts.iter().filter_map(|r| normalizar_rut(r.as_ref())).collect();
    let mut resultado = Asociacion::default();

    for archivo in archivos {
        let nombre = archivo.as_ref();
        let rut = match extraer_rut(nombre).and_then(|r| normalizar_rut(&r)) {
            Some(r) => r,
            None => {
                resultado.sin_rut.push(nombre.to_string());
                continue;
            }
        };

        if conocidos.contains(&rut) {
            resultado.por_rut.entry(rut).or_default().push(nombre.to_string());
        } else {
            debug!(archivo = nombre, rut = %rut, "RUT sin registro");
            resultado.sin_registro.push(nombre.to_string());
        }
    }

    info!(
        asociados = resultado.total_asociados(),
        ruts = resultado.por_rut.len(),
        sin_rut = resultado.sin_rut.len(),
        sin_registro = resultado.sin_registro.len(),
        "asociación de archivos completada"
    );
    resultado
}

/// Lista los nombres de los archivos regulares de `dir`, ordenados.
/// Ignora ocultos y temporales de editor (`.x`, `~$x`, `x~`).
pub fn listar_archivos(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(AppError::NotFound(format!("directorio {:?}", dir)));
    }

    let mut nombres = Vec::new();
    for entry in fs::read_dir(dir)?.flatten() {
        let p = entry.path();
        if !p.is_file() {
            continue;
        }
        let nombre = match p.file_name().and_then(|s| s.to_str()) {
            Some(s) => s.to_string(),
            None => continue,
        };
        if nombre.starts_with('.') || nombre.starts_with('~') || nombre.ends_with('~') {
            continue;
        }
        nombres.push(nombre);
    }
    nombres.sort();
    Ok(nombres)
}

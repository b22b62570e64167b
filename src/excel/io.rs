use calamine::{open_workbook_auto, Data, Reader};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::models::Fila;

/// Convierte un `Data` de calamine a String (versión genérica para celdas)
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Celda como valor JSON: texto, o nulo si está vacía.
pub fn cell_to_value(c: &Data) -> Value {
    let s = cell_to_string(c);
    if s.is_empty() { Value::Null } else { Value::String(s) }
}

/// Índice de columna 0-based a letras (0 -> "A", 27 -> "AB")
pub fn index_to_column_letters(idx: usize) -> String {
    let mut n = idx + 1;
    let mut letras = Vec::new();
    while n > 0 {
        let resto = (n - 1) % 26;
        letras.push((b'A' + resto as u8) as char);
        n = (n - 1) / 26;
    }
    letras.iter().rev().collect()
}

/// Lee una hoja del libro y la devuelve como filas con claves por letra de
/// columna (`A`, `B`, ...). Devuelve también el nombre de la hoja usada.
///
/// - Si `sheet_name` es `None` o no existe en el libro, se usa la primera hoja.
/// - Las celdas vacías quedan como `null`; toda fila tiene todas las columnas.
/// - Las filas completamente vacías se omiten.
pub fn leer_hoja<P: AsRef<Path>>(path: P, sheet_name: Option<&str>) -> Result<(String, Vec<Fila>)> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(AppError::NotFound(format!("planilla {:?}", path)));
    }
    let mut workbook = open_workbook_auto(path)?;

    // Preferir la hoja con el nombre solicitado; si no existe, tomar la primera
    let names = workbook.sheet_names().to_owned();
    let primera = names
        .first()
        .cloned()
        .ok_or_else(|| AppError::Excel(format!("{:?} no tiene hojas", path)))?;
    let sheet_to_use = match sheet_name {
        Some(n) if names.iter().any(|s| s == n) => n.to_string(),
        Some(n) => {
            warn!(solicitada = n, usada = %primera, "hoja no encontrada, usando la primera");
            primera
        }
        None => primera,
    };

    let range = workbook.worksheet_range(&sheet_to_use)?;
    let col_inicio = range.start().map(|(_, c)| c as usize).unwrap_or(0);

    let mut filas: Vec<Fila> = Vec::new();
    for r in range.rows() {
        if r.iter().all(|c| cell_to_string(c).is_empty()) {
            continue;
        }
        let mut fila = Fila::new();
        for (i, cell) in r.iter().enumerate() {
            fila.insert(index_to_column_letters(col_inicio + i), cell_to_value(cell));
        }
        filas.push(fila);
    }

    debug!(hoja = %sheet_to_use, filas = filas.len(), "hoja leída");
    Ok((sheet_to_use, filas))
}

//! Normalización de filas exportadas: de claves por letra de columna a
//! claves por etiqueta de encabezado.

use serde_json::Value;

use crate::models::{Fila, MapeoEncabezados};
use crate::rut::normalizar_rut_valor;

/// Índice de la fila de encabezados por defecto. La fila 0 suele ser el
/// título de la planilla (celdas combinadas).
pub const FILA_ENCABEZADO: usize = 1;
/// Columna que se trata como columna de RUT al construir el mapeo.
pub const COLUMNA_RUT: &str = "A";
pub const ETIQUETA_RUT: &str = "Rut";

/// Construye el mapeo clave -> etiqueta desde la fila `indice_encabezado`.
///
/// Cada clave de la fila de encabezados se mapea a su texto recortado, o a
/// sí misma si la celda está vacía. Si la etiqueta de `columna_rut` contiene
/// "rut" (sin importar mayúsculas) se fuerza a `"Rut"`. Si dos columnas
/// resuelven a la misma etiqueta, la posterior queda como
/// `"<etiqueta> (<clave>)"`. Un índice fuera de rango produce un mapeo vacío.
pub fn construir_mapeo_encabezados(filas: &[Fila], indice_encabezado: usize, columna_rut: &str) -> MapeoEncabezados {
    let mut mapeo = MapeoEncabezados::new();
    let encabezado = match filas.get(indice_encabezado) {
        Some(f) => f,
        None => return mapeo,
    };

    for (clave, valor) in encabezado {
        let texto = match valor {
            Value::String(s) => s.trim().to_string(),
            Value::Null => String::new(),
            otro => otro.to_string(),
        };

        let mut etiqueta = if texto.is_empty() { clave.clone() } else { texto };
        if clave == columna_rut && etiqueta.to_lowercase().contains("rut") {
            etiqueta = ETIQUETA_RUT.to_string();
        }
        if mapeo.contiene_etiqueta(&etiqueta) {
            etiqueta = format!("{} ({})", etiqueta, clave);
        }
        mapeo.insert(clave.clone(), etiqueta);
    }

    mapeo
}

/// Renombra las claves de cada fila según `mapeo`. Las columnas del mapeo
/// van primero y en el orden del encabezado (con `null` si la fila no trae
/// esa celda); después siguen las claves sin mapeo, sin cambios. Una clave
/// sin mapeo que coincide con una etiqueta queda como `"<clave> (<clave>)"`.
/// No modifica `filas`.
pub fn aplicar_mapeo(filas: &[Fila], mapeo: &MapeoEncabezados) -> Vec<Fila> {
    filas
        .iter()
        .map(|fila| {
            let mut nueva = Fila::new();
            for (clave, etiqueta) in mapeo.iter() {
                let valor = fila.get(clave).cloned().unwrap_or(Value::Null);
                nueva.insert(etiqueta.to_string(), valor);
            }
            for (clave, valor) in fila {
                if mapeo.get(clave).is_some() {
                    continue;
                }
                let mut destino = clave.clone();
                if nueva.contains_key(&destino) {
                    destino = format!("{} ({})", clave, clave);
                }
                nueva.insert(destino, valor.clone());
            }
            nueva
        })
        .collect()
}

/// Conserva sólo las filas cuyo `campo` es un RUT válido. Mantiene el orden
/// y no modifica el valor almacenado.
pub fn filtrar_filas_validas(filas: &[Fila], campo: &str) -> Vec<Fila> {
    filas
        .iter()
        .filter(|f| f.get(campo).and_then(normalizar_rut_valor).is_some())
        .cloned()
        .collect()
}

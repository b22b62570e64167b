//! Extracción y normalización de RUT (Rol Único Tributario).
//!
//! Forma canónica: dígitos sin puntos, guion y dígito verificador en
//! mayúscula (`19838046-6`, `12345678-K`). Dos RUT son iguales si y sólo si
//! sus formas canónicas son idénticas.
//!
//! Submódulos:
//! - `asociacion`: agrupa archivos de un directorio por el RUT de su nombre

pub mod asociacion;

pub use asociacion::{asociar_archivos_por_rut, listar_archivos, Asociacion};

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static SEGMENTO_RUT: OnceLock<Regex> = OnceLock::new();
static RUT_CANONICO: OnceLock<Regex> = OnceLock::new();

fn segmento_rut() -> &'static Regex {
    SEGMENTO_RUT.get_or_init(|| Regex::new(r"-([0-9.kK-]+)").expect("regex de segmento RUT"))
}

fn rut_canonico() -> &'static Regex {
    RUT_CANONICO.get_or_init(|| Regex::new(r"^[0-9]+-[0-9K]$").expect("regex de RUT canónico"))
}

/// Extrae el RUT de un texto libre (nombre de archivo, celda).
///
/// Busca un guion seguido de una secuencia de dígitos, puntos, guiones o `K`.
/// Si hay varias coincidencias gana la **última**; como la secuencia es
/// codiciosa, `Contrato-19.838.046-6.pdf` produce una sola coincidencia
/// (`19.838.046-6.`). Al resultado se le quitan los puntos y se pasa a
/// mayúsculas. Devuelve `None` si no hay coincidencia o si queda vacío.
pub fn extraer_rut(texto: &str) -> Option<String> {
    let captura = segmento_rut()
        .captures_iter(texto)
        .last()
        .and_then(|c| c.get(1))?;

    let limpio: String = captura
        .as_str()
        .chars()
        .filter(|c| *c != '.')
        .collect::<String>()
        .to_uppercase();

    if limpio.is_empty() { None } else { Some(limpio) }
}

/// Valida y normaliza un RUT en texto. Nunca falla: cualquier valor que no
/// pueda convertirse en un RUT canónico devuelve `None`, por lo que puede
/// usarse directamente como predicado sobre filas no confiables.
pub fn normalizar_rut(raw: &str) -> Option<String> {
    let recortado = raw.trim();
    if recortado.is_empty() {
        return None;
    }

    // filas de encabezado o de título que se cuelan entre los datos
    let minus = recortado.to_lowercase();
    if minus == "rut" || minus.contains("listado") {
        return None;
    }

    let mut rut: String = recortado
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .collect();

    // dígito verificador pegado sin guion: 198380466 -> 19838046-6
    if !rut.contains('-') && rut.chars().count() > 1 {
        let ultimo = rut.pop()?;
        rut.push('-');
        rut.push(ultimo);
    }

    if rut.ends_with('k') {
        rut.pop();
        rut.push('K');
    }

    if rut_canonico().is_match(&rut) { Some(rut) } else { None }
}

/// Igual que `normalizar_rut` pero sobre un escalar JSON (texto, número o nulo).
pub fn normalizar_rut_valor(valor: &Value) -> Option<String> {
    match valor {
        Value::String(s) => normalizar_rut(s),
        Value::Number(n) => entero_de_numero(n).and_then(|u| normalizar_rut(&u.to_string())),
        _ => None,
    }
}

/// Número JSON como entero no negativo. Los flotantes sólo se aceptan sin
/// parte fraccionaria (`198380466.0`); su texto decimal no sirve como RUT.
fn entero_de_numero(n: &serde_json::Number) -> Option<u64> {
    if let Some(u) = n.as_u64() {
        return Some(u);
    }
    let f = n.as_f64()?;
    if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

/// Compara dos valores como RUT; ambos deben ser válidos.
pub fn mismo_rut(a: &str, b: &str) -> bool {
    match (normalizar_rut(a), normalizar_rut(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

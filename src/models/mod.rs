// Estructuras de datos principales

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Fila de una planilla: columna (letra o etiqueta) -> valor (texto o nulo).
/// El orden de las claves es el de las columnas.
pub type Fila = Map<String, Value>;

/// Mapeo ordenado clave original -> etiqueta resuelta, construido una vez a
/// partir de la fila de encabezados.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapeoEncabezados {
    pares: Vec<(String, String)>,
}

impl MapeoEncabezados {
    pub fn new() -> Self {
        MapeoEncabezados { pares: Vec::new() }
    }

    /// Agrega (o reemplaza) la etiqueta de `clave` manteniendo su posición.
    pub fn insert(&mut self, clave: String, etiqueta: String) {
        match self.pares.iter_mut().find(|(k, _)| *k == clave) {
            Some(par) => par.1 = etiqueta,
            None => self.pares.push((clave, etiqueta)),
        }
    }

    pub fn get(&self, clave: &str) -> Option<&str> {
        self.pares.iter().find(|(k, _)| k == clave).map(|(_, v)| v.as_str())
    }

    /// ¿Alguna clave ya resolvió a `etiqueta`?
    pub fn contiene_etiqueta(&self, etiqueta: &str) -> bool {
        self.pares.iter().any(|(_, v)| v == etiqueta)
    }

    pub fn etiquetas(&self) -> Vec<String> {
        self.pares.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pares.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pares.is_empty()
    }
}

impl Serialize for MapeoEncabezados {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pares.len()))?;
        for (k, v) in &self.pares {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Documento JSON escrito por la exportación:
/// `{ timestamp, source, sheet?, count, rows }`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct Exportacion {
    pub timestamp: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    pub count: usize,
    pub rows: Vec<Fila>,
}

impl Exportacion {
    pub fn new(source: String, sheet: Option<String>, rows: Vec<Fila>) -> Self {
        Exportacion {
            timestamp: chrono::Utc::now().to_rfc3339(),
            source,
            sheet,
            count: rows.len(),
            rows,
        }
    }
}

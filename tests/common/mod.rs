#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde_json::{json, Value};
use personal_tools::models::Fila;

pub enum Celda<'a> {
    Texto(&'a str),
    Numero(f64),
}

/// Escribe un .xlsx mínimo (sin estilos ni sharedStrings, textos inline)
/// con las hojas indicadas. Cada hoja es una lista de filas; cada fila una
/// lista de (columna, celda).
pub fn escribir_xlsx(path: &Path, hojas: &[(&str, Vec<Vec<(&str, Celda)>>)]) {
    let file = File::create(path).expect("crear xlsx");
    let mut zip = zip::ZipWriter::new(file);
    let opts = zip::write::FileOptions::default();

    let mut overrides = String::new();
    let mut sheets = String::new();
    let mut rels = String::new();
    for (i, (nombre, _)) in hojas.iter().enumerate() {
        let n = i + 1;
        overrides.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));
        sheets.push_str(&format!(r#"<sheet name="{nombre}" sheetId="{n}" r:id="rId{n}"/>"#));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
        ));
    }

    zip.start_file("[Content_Types].xml", opts).unwrap();
    write!(
        zip,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>{overrides}</Types>"#
    )
    .unwrap();

    zip.start_file("_rels/.rels", opts).unwrap();
    write!(
        zip,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
    )
    .unwrap();

    zip.start_file("xl/workbook.xml", opts).unwrap();
    write!(
        zip,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{sheets}</sheets></workbook>"#
    )
    .unwrap();

    zip.start_file("xl/_rels/workbook.xml.rels", opts).unwrap();
    write!(
        zip,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
    )
    .unwrap();

    for (i, (_, filas)) in hojas.iter().enumerate() {
        let mut data = String::new();
        for (r, fila) in filas.iter().enumerate() {
            let nfila = r + 1;
            data.push_str(&format!(r#"<row r="{nfila}">"#));
            for (col, celda) in fila {
                match celda {
                    Celda::Texto(t) => data.push_str(&format!(
                        r#"<c r="{col}{nfila}" t="inlineStr"><is><t>{t}</t></is></c>"#
                    )),
                    Celda::Numero(n) => data.push_str(&format!(r#"<c r="{col}{nfila}"><v>{n}</v></c>"#)),
                }
            }
            data.push_str("</row>");
        }
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), opts).unwrap();
        write!(
            zip,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{data}</sheetData></worksheet>"#
        )
        .unwrap();
    }

    zip.finish().unwrap();
}

/// Planilla de personal típica: título en la fila 1, encabezados en la 2.
pub fn planilla_personal(path: &Path) {
    escribir_xlsx(
        path,
        &[
            ("Portada", vec![vec![("A", Celda::Texto("Portada"))]]),
            (
                "Personal",
                vec![
                    vec![("A", Celda::Texto("Listado de Empleados"))],
                    vec![("A", Celda::Texto("RUT Trabajador")), ("B", Celda::Texto(" Nombre "))],
                    vec![("A", Celda::Texto("19.838.046-6")), ("B", Celda::Texto("Ana")), ("C", Celda::Texto("x"))],
                    vec![("A", Celda::Texto("rut")), ("B", Celda::Texto("Repetido"))],
                    vec![("A", Celda::Texto("12345678k")), ("B", Celda::Texto("Luis")), ("C", Celda::Numero(42.0))],
                ],
            ),
        ],
    );
}

/// Construye una fila a partir de un objeto JSON literal.
pub fn fila(v: Value) -> Fila {
    match v {
        Value::Object(m) => m,
        otro => panic!("se esperaba un objeto, llegó {}", otro),
    }
}

pub fn filas_ejemplo() -> Vec<Fila> {
    vec![
        fila(json!({"A": "Listado de Empleados"})),
        fila(json!({"A": "Rut"})),
        fila(json!({"A": "19.838.046-6"})),
    ]
}

use std::fs;

use personal_tools::rut::{asociar_archivos_por_rut, listar_archivos};
use personal_tools::AppError;

#[test]
fn test_asociar_agrupa_por_rut_en_orden() {
    let archivos = vec![
        "Contrato-19.838.046-6.pdf",
        "Licencia-12345678-k.pdf",
        "Anexo-198380466.pdf",
        "foto.png",
        "Contrato-11111111-1.pdf",
    ];
    let ruts = vec!["19838046-6", "12.345.678-K", "Listado de Empleados"];

    let a = asociar_archivos_por_rut(&archivos, &ruts);

    assert_eq!(a.por_rut.len(), 2);
    assert_eq!(
        a.por_rut.get("19838046-6").unwrap(),
        &vec!["Contrato-19.838.046-6.pdf".to_string(), "Anexo-198380466.pdf".to_string()]
    );
    assert_eq!(a.por_rut.get("12345678-K").unwrap(), &vec!["Licencia-12345678-k.pdf".to_string()]);
    assert_eq!(a.sin_rut, vec!["foto.png".to_string()]);
    assert_eq!(a.sin_registro, vec!["Contrato-11111111-1.pdf".to_string()]);
    assert_eq!(a.total_asociados(), 3);
}

#[test]
fn test_asociar_sin_registros() {
    let archivos = vec!["Contrato-19838046-6.pdf"];
    let ruts: Vec<String> = Vec::new();
    let a = asociar_archivos_por_rut(&archivos, &ruts);
    assert!(a.por_rut.is_empty());
    assert_eq!(a.sin_registro.len(), 1);
}

#[test]
fn test_asociar_serializa_reporte() {
    let a = asociar_archivos_por_rut(&["x-1-9.pdf"], &["1-9"]);
    let v = serde_json::to_value(&a).unwrap();
    assert_eq!(v["por_rut"]["1-9"][0], "x-1-9.pdf");
    assert!(v["sin_rut"].as_array().unwrap().is_empty());
}

#[test]
fn test_listar_archivos_ordenados_sin_ocultos() {
    let dir = tempfile::tempdir().unwrap();
    for n in ["b-2-7.pdf", "a-1-9.pdf", ".oculto", "~$temporal.xlsx", "respaldo~"] {
        fs::write(dir.path().join(n), b"x").unwrap();
    }
    fs::create_dir(dir.path().join("subdir-3-5")).unwrap();

    let nombres = listar_archivos(dir.path()).unwrap();
    assert_eq!(nombres, vec!["a-1-9.pdf", "b-2-7.pdf"]);
}

#[test]
fn test_listar_archivos_directorio_inexistente() {
    let dir = tempfile::tempdir().unwrap();
    let res = listar_archivos(&dir.path().join("no-existe"));
    assert!(matches!(res, Err(AppError::NotFound(_))));
}

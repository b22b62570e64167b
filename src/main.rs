// --- Utilidades de personal - CLI ---

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use personal_tools::api::{verificar_endpoints, ApiClient, ENDPOINTS_VERIFICACION};
use personal_tools::excel::{escribir_exportacion, exportar_hoja, leer_exportacion, normalizar_exportacion, OpcionesNormalizacion};
use personal_tools::rut::{asociar_archivos_por_rut, listar_archivos, normalizar_rut, normalizar_rut_valor};
use personal_tools::{run_server, Config};

#[derive(Parser)]
#[command(name = "personal-tools", version, about = "Utilidades para planillas y documentos del personal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Exporta una hoja de la planilla a JSON (claves por letra de columna)
    Exportar {
        archivo: PathBuf,
        #[arg(long)]
        hoja: Option<String>,
        /// Por defecto `<archivo>.json` junto a la planilla
        #[arg(long)]
        salida: Option<PathBuf>,
    },
    /// Respalda y normaliza una exportación JSON en el mismo archivo
    Normalizar {
        archivo: PathBuf,
        #[arg(long)]
        fila_encabezado: Option<usize>,
        #[arg(long, default_value = "A")]
        columna_rut: String,
        /// Descarta las filas sin RUT válido
        #[arg(long)]
        filtrar_rut: bool,
        #[arg(long)]
        campo_rut: Option<String>,
    },
    /// Normaliza uno o más RUT
    Rut {
        #[arg(required = true)]
        valores: Vec<String>,
    },
    /// Asocia los archivos de un directorio al RUT de los registros
    Asociar {
        #[arg(long)]
        dir: Option<PathBuf>,
        /// JSON con los registros; si se omite se consulta /api/personal
        #[arg(long)]
        registros: Option<PathBuf>,
        #[arg(long, default_value = "rut")]
        campo: String,
        #[arg(long)]
        api: Option<String>,
        #[arg(long)]
        salida: Option<PathBuf>,
    },
    /// Verifica que los endpoints del backend respondan
    Verificar {
        #[arg(long)]
        api: Option<String>,
    },
    /// Levanta el router auxiliar
    Servir {
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).with_target(false).init();

    let cli = Cli::parse();
    ejecutar(cli.command, &Config::from_env).await
}

/// Ejecuta un comando. La configuración se carga sólo si el comando la
/// necesita y no la recibió por argumentos.
async fn ejecutar(command: Command, cargar_config: &dyn Fn() -> personal_tools::Result<Config>) -> Result<()> {
    match command {
        Command::Exportar { archivo, hoja, salida } => {
            let exp = exportar_hoja(&archivo, hoja.as_deref())
                .with_context(|| format!("no se pudo exportar {}", archivo.display()))?;
            let salida = salida.unwrap_or_else(|| archivo.with_extension("json"));
            escribir_exportacion(&salida, &exp)?;
            println!("✅ {} filas de '{}' -> {}", exp.count, exp.sheet.as_deref().unwrap_or(""), salida.display());
        }
        Command::Normalizar { archivo, fila_encabezado, columna_rut, filtrar_rut, campo_rut } => {
            let opciones = OpcionesNormalizacion {
                fila_encabezado: match fila_encabezado {
                    Some(f) => f,
                    None => cargar_config()?.header_row,
                },
                columna_rut,
                filtrar_por: match (filtrar_rut, campo_rut) {
                    (false, _) => None,
                    (true, Some(c)) => Some(c),
                    (true, None) => Some(cargar_config()?.rut_field),
                },
            };
            let resumen = normalizar_exportacion(&archivo, &opciones)
                .with_context(|| format!("no se pudo normalizar {}", archivo.display()))?;
            println!("💾 respaldo: {}", resumen.respaldo.display());
            println!("✅ {} -> {} filas, columnas: {}", resumen.filas_antes, resumen.filas_despues, resumen.mapeo.etiquetas().join(", "));
        }
        Command::Rut { valores } => {
            for v in valores {
                match normalizar_rut(&v) {
                    Some(r) => println!("{}\t{}", v, r),
                    None => println!("{}\tinválido", v),
                }
            }
        }
        Command::Asociar { dir, registros, campo, api, salida } => {
            let dir = match dir {
                Some(d) => d,
                None => cargar_config()?.require_docs_dir()?,
            };
            let archivos = listar_archivos(&dir)?;

            let filas: Vec<Value> = match registros {
                Some(path) => leer_exportacion(&path)?.rows.into_iter().map(Value::Object).collect(),
                None => {
                    let base = match api {
                        Some(a) => a,
                        None => cargar_config()?.api_base_url,
                    };
                    ApiClient::new(&base).listar_personal().await.context("no se pudo obtener /api/personal")?
                }
            };
            let ruts: Vec<String> = filas.iter().filter_map(|f| f.get(&campo).and_then(normalizar_rut_valor)).collect();
            info!(archivos = archivos.len(), registros = ruts.len(), "asociando");

            let asociacion = asociar_archivos_por_rut(&archivos, &ruts);
            let json = serde_json::to_string_pretty(&asociacion)?;
            match salida {
                Some(p) => {
                    std::fs::write(&p, json)?;
                    println!("✅ {} archivos asociados -> {}", asociacion.total_asociados(), p.display());
                }
                None => println!("{}", json),
            }
        }
        Command::Verificar { api } => {
            let base = match api {
                Some(a) => a,
                None => cargar_config()?.api_base_url,
            };
            let cliente = ApiClient::new(&base);
            println!("=== Verificando {} ===", cliente.base_url());
            let resultados = verificar_endpoints(&cliente, ENDPOINTS_VERIFICACION).await;
            for r in &resultados {
                let marca = if r.ok { "✅" } else { "❌" };
                println!("{} {} - {}", marca, r.endpoint, r.detalle);
            }
            let fallidos = resultados.iter().filter(|r| !r.ok).count();
            println!("{} de {} endpoints con error", fallidos, resultados.len());
        }
        Command::Servir { bind } => {
            let bind = match bind {
                Some(b) => b,
                None => cargar_config()?.bind,
            };
            println!("Iniciando router en http://{}", bind);
            run_server(&bind).await?;
        }
    }

    Ok(())
}

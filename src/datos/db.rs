use rusqlite::Connection;
use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

// carga .env si está presente
fn cargar_dotenv() {
    let _ = dotenv::dotenv();
}

/// Ruta de la base de reseñas. Expuesta para que los módulos hermanos abran
/// conexiones de vida corta. Honra CATEDRAS_DB_PATH / CATEDRAS_DB_URL.
pub fn ruta_base_datos() -> PathBuf {
    cargar_dotenv();
    if let Ok(p) = env::var("CATEDRAS_DB_PATH") {
        PathBuf::from(p)
    } else if let Ok(url) = env::var("CATEDRAS_DB_URL") {
        // se aceptan sqlite:// y file://; para otros esquemas se cae a la
        // ruta por defecto
        if url.starts_with("sqlite://") {
            PathBuf::from(url.trim_start_matches("sqlite://"))
        } else if url.starts_with("file://") {
            PathBuf::from(url.trim_start_matches("file://"))
        } else {
            PathBuf::from("datos/catedras.db")
        }
    } else {
        PathBuf::from("datos/catedras.db")
    }
}

/// Crea el directorio y el esquema de la base si no existen. Idempotente.
pub fn inicializar_db(ruta: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = ruta.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }

    let conn = Connection::open(ruta)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS materia (
            codigo INTEGER PRIMARY KEY,
            nombre TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS cuatrimestre (
            codigo INTEGER PRIMARY KEY AUTOINCREMENT,
            numero INTEGER NOT NULL,
            anio INTEGER NOT NULL,
            UNIQUE (numero, anio)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS docente (
            codigo INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL,
            rol TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS catedra (
            codigo INTEGER PRIMARY KEY AUTOINCREMENT,
            codigo_materia INTEGER NOT NULL REFERENCES materia(codigo)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS catedra_docente (
            codigo_catedra INTEGER NOT NULL REFERENCES catedra(codigo),
            codigo_docente INTEGER NOT NULL REFERENCES docente(codigo),
            PRIMARY KEY (codigo_catedra, codigo_docente)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS calificacion (
            codigo INTEGER PRIMARY KEY AUTOINCREMENT,
            codigo_docente INTEGER NOT NULL REFERENCES docente(codigo),
            ts TEXT NOT NULL,
            acepta_critica REAL NOT NULL,
            asistencia REAL NOT NULL,
            buen_trato REAL NOT NULL,
            claridad REAL NOT NULL,
            clase_organizada REAL NOT NULL,
            cumple_horarios REAL NOT NULL,
            fomenta_participacion REAL NOT NULL,
            panorama_amplio REAL NOT NULL,
            responde_mails REAL NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS comentario (
            codigo INTEGER PRIMARY KEY AUTOINCREMENT,
            codigo_docente INTEGER NOT NULL REFERENCES docente(codigo),
            codigo_cuatrimestre INTEGER NOT NULL REFERENCES cuatrimestre(codigo),
            codigo_calificacion INTEGER REFERENCES calificacion(codigo),
            contenido TEXT NOT NULL,
            ts TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS prioridad_rol (
            rol TEXT PRIMARY KEY,
            prioridad INTEGER NOT NULL
        )",
        [],
    )?;

    Ok(())
}

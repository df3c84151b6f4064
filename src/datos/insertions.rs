use crate::models::NuevaCalificacion;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::error::Error;
use std::path::Path;

/// Valores admitidos en cada dimensión: 0 a 5 en pasos de 0.5.
pub const VALORES_VALIDOS: [f64; 11] = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0];

/// Largo mínimo de un comentario no vacío.
pub const LARGO_MINIMO_COMENTARIO: usize = 20;

pub fn es_valor_valido(valor: f64) -> bool {
    VALORES_VALIDOS.iter().any(|v| (*v - valor).abs() < f64::EPSILON)
}

/// Valida el payload antes de tocar la base: cada dimensión dentro del
/// conjunto admitido y comentario vacío o de al menos 20 caracteres.
pub fn validar_calificacion(nueva: &NuevaCalificacion) -> Result<(), String> {
    for valor in nueva.calificacion.dimensiones() {
        if !es_valor_valido(valor) {
            return Err(format!("valor de calificación inválido: {}", valor));
        }
    }
    if let Some(contenido) = &nueva.comentario {
        let recortado = contenido.trim();
        if !recortado.is_empty() && recortado.chars().count() < LARGO_MINIMO_COMENTARIO {
            return Err(format!(
                "el comentario debe estar vacío o tener al menos {} caracteres",
                LARGO_MINIMO_COMENTARIO
            ));
        }
    }
    Ok(())
}

/// Registra una calificación y, si vino con texto, el comentario asociado,
/// todo en una única transacción. Devuelve el código de la calificación
/// creada.
pub fn registrar_calificacion(ruta: &Path, nueva: &NuevaCalificacion) -> Result<i64, Box<dyn Error>> {
    validar_calificacion(nueva)?;

    let mut conn = Connection::open(ruta)?;

    let docente_existe: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM docente WHERE codigo = ?1)",
        params![nueva.codigo_docente],
        |row| row.get(0),
    )?;
    if !docente_existe {
        return Err(format!("docente {} inexistente", nueva.codigo_docente).into());
    }

    let cuatrimestre_existe: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM cuatrimestre WHERE codigo = ?1)",
        params![nueva.codigo_cuatrimestre],
        |row| row.get(0),
    )?;
    if !cuatrimestre_existe {
        return Err(format!("cuatrimestre {} inexistente", nueva.codigo_cuatrimestre).into());
    }

    let ts = Utc::now().to_rfc3339();
    let c = &nueva.calificacion;

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO calificacion (
            codigo_docente, ts, acepta_critica, asistencia, buen_trato,
            claridad, clase_organizada, cumple_horarios, fomenta_participacion,
            panorama_amplio, responde_mails
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            nueva.codigo_docente,
            ts,
            c.acepta_critica,
            c.asistencia,
            c.buen_trato,
            c.claridad,
            c.clase_organizada,
            c.cumple_horarios,
            c.fomenta_participacion,
            c.panorama_amplio,
            c.responde_mails,
        ],
    )?;
    let codigo_calificacion = tx.last_insert_rowid();

    if let Some(contenido) = &nueva.comentario {
        let recortado = contenido.trim();
        if !recortado.is_empty() {
            tx.execute(
                "INSERT INTO comentario (
                    codigo_docente, codigo_cuatrimestre, codigo_calificacion,
                    contenido, ts
                ) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    nueva.codigo_docente,
                    nueva.codigo_cuatrimestre,
                    codigo_calificacion,
                    recortado,
                    ts,
                ],
            )?;
        }
    }
    tx.commit()?;

    Ok(codigo_calificacion)
}

/// Alta de una materia con el código propio de la universidad.
pub fn crear_materia(ruta: &Path, codigo: i64, nombre: &str) -> Result<(), Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    conn.execute(
        "INSERT INTO materia (codigo, nombre) VALUES (?1, ?2)",
        params![codigo, nombre],
    )?;
    Ok(())
}

pub fn crear_docente(ruta: &Path, nombre: &str, rol: Option<&str>) -> Result<i64, Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    conn.execute(
        "INSERT INTO docente (nombre, rol) VALUES (?1, ?2)",
        params![nombre, rol],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn crear_catedra(ruta: &Path, codigo_materia: i64) -> Result<i64, Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    conn.execute(
        "INSERT INTO catedra (codigo_materia) VALUES (?1)",
        params![codigo_materia],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn asignar_docente(ruta: &Path, codigo_catedra: i64, codigo_docente: i64) -> Result<(), Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    conn.execute(
        "INSERT INTO catedra_docente (codigo_catedra, codigo_docente) VALUES (?1, ?2)",
        params![codigo_catedra, codigo_docente],
    )?;
    Ok(())
}

/// Alta de un cuatrimestre. Rechaza números que no sean 1 o 2.
pub fn crear_cuatrimestre(ruta: &Path, numero: u8, anio: i32) -> Result<i64, Box<dyn Error>> {
    if numero != 1 && numero != 2 {
        return Err(format!("número de cuatrimestre inválido: {}", numero).into());
    }
    let conn = Connection::open(ruta)?;
    conn.execute(
        "INSERT INTO cuatrimestre (numero, anio) VALUES (?1, ?2)",
        params![numero, anio],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn definir_prioridad_rol(ruta: &Path, rol: &str, prioridad: u32) -> Result<(), Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    conn.execute(
        "INSERT OR REPLACE INTO prioridad_rol (rol, prioridad) VALUES (?1, ?2)",
        params![rol, prioridad],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Calificacion;

    fn nueva_de_prueba(comentario: Option<&str>) -> NuevaCalificacion {
        NuevaCalificacion {
            codigo_docente: 1,
            codigo_cuatrimestre: 1,
            calificacion: Calificacion {
                acepta_critica: 4.0,
                asistencia: 4.5,
                buen_trato: 5.0,
                claridad: 3.5,
                clase_organizada: 4.0,
                cumple_horarios: 5.0,
                fomenta_participacion: 3.0,
                panorama_amplio: 4.0,
                responde_mails: 2.5,
            },
            comentario: comentario.map(|c| c.to_string()),
        }
    }

    #[test]
    fn test_valores_validos() {
        assert!(es_valor_valido(0.0));
        assert!(es_valor_valido(2.5));
        assert!(es_valor_valido(5.0));
        assert!(!es_valor_valido(3.7));
        assert!(!es_valor_valido(-0.5));
        assert!(!es_valor_valido(5.5));
    }

    #[test]
    fn test_validar_payload_correcto() {
        assert!(validar_calificacion(&nueva_de_prueba(None)).is_ok());
        assert!(validar_calificacion(&nueva_de_prueba(Some("una cursada exigente pero muy bien llevada"))).is_ok());
    }

    #[test]
    fn test_validar_dimension_fuera_de_escala() {
        let mut nueva = nueva_de_prueba(None);
        nueva.calificacion.claridad = 3.7;
        assert!(validar_calificacion(&nueva).is_err());
    }

    #[test]
    fn test_validar_comentario_corto() {
        // menos de 20 caracteres no vacíos se rechaza
        let nueva = nueva_de_prueba(Some("muy bueno"));
        assert!(validar_calificacion(&nueva).is_err());
    }

    #[test]
    fn test_validar_comentario_en_blanco_se_acepta() {
        // vacío o solo espacios cuenta como ausencia de comentario
        assert!(validar_calificacion(&nueva_de_prueba(Some(""))).is_ok());
        assert!(validar_calificacion(&nueva_de_prueba(Some("   "))).is_ok());
    }
}

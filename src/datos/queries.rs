use crate::models::{
    Calificacion, CatedraConDocentes, Comentario, Cuatrimestre, CuatrimestreRegistrado,
    DocenteCatedra, Materia,
};
use crate::ranking::catedra::PrioridadesRol;
use rusqlite::{params, Connection};
use serde_json::json;
use std::error::Error;
use std::path::Path;

pub fn listar_materias(ruta: &Path) -> Result<Vec<Materia>, Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    let mut stmt = conn.prepare("SELECT codigo, nombre FROM materia ORDER BY codigo")?;
    let filas = stmt.query_map([], |row| {
        Ok(Materia { codigo: row.get(0)?, nombre: row.get(1)? })
    })?;
    let mut materias = Vec::new();
    for fila in filas {
        materias.push(fila?);
    }
    Ok(materias)
}

pub fn obtener_materia(ruta: &Path, codigo: i64) -> Result<Option<Materia>, Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    let mut stmt = conn.prepare("SELECT codigo, nombre FROM materia WHERE codigo = ?1")?;
    let mut filas = stmt.query(params![codigo])?;
    if let Some(row) = filas.next()? {
        Ok(Some(Materia { codigo: row.get(0)?, nombre: row.get(1)? }))
    } else {
        Ok(None)
    }
}

pub fn existe_catedra(ruta: &Path, codigo: i64) -> Result<bool, Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    let existe: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM catedra WHERE codigo = ?1)",
        params![codigo],
        |row| row.get(0),
    )?;
    Ok(existe)
}

pub fn existe_docente(ruta: &Path, codigo: i64) -> Result<bool, Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    let existe: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM docente WHERE codigo = ?1)",
        params![codigo],
        |row| row.get(0),
    )?;
    Ok(existe)
}

pub fn existe_cuatrimestre(ruta: &Path, codigo: i64) -> Result<bool, Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    let existe: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM cuatrimestre WHERE codigo = ?1)",
        params![codigo],
        |row| row.get(0),
    )?;
    Ok(existe)
}

fn calificaciones_de_docente(conn: &Connection, codigo_docente: i64) -> Result<Vec<Calificacion>, Box<dyn Error>> {
    let mut stmt = conn.prepare(
        "SELECT acepta_critica, asistencia, buen_trato, claridad,
                clase_organizada, cumple_horarios, fomenta_participacion,
                panorama_amplio, responde_mails
         FROM calificacion WHERE codigo_docente = ?1",
    )?;
    let filas = stmt.query_map(params![codigo_docente], |row| {
        Ok(Calificacion {
            acepta_critica: row.get(0)?,
            asistencia: row.get(1)?,
            buen_trato: row.get(2)?,
            claridad: row.get(3)?,
            clase_organizada: row.get(4)?,
            cumple_horarios: row.get(5)?,
            fomenta_participacion: row.get(6)?,
            panorama_amplio: row.get(7)?,
            responde_mails: row.get(8)?,
        })
    })?;
    let mut calificaciones = Vec::new();
    for fila in filas {
        calificaciones.push(fila?);
    }
    Ok(calificaciones)
}

fn docentes_con_calificaciones(conn: &Connection, codigo_catedra: i64) -> Result<Vec<DocenteCatedra>, Box<dyn Error>> {
    let mut stmt = conn.prepare(
        "SELECT d.codigo, d.nombre, d.rol
         FROM docente d
         JOIN catedra_docente cd ON cd.codigo_docente = d.codigo
         WHERE cd.codigo_catedra = ?1",
    )?;
    let filas = stmt.query_map(params![codigo_catedra], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
        ))
    })?;
    let mut basicos = Vec::new();
    for fila in filas {
        basicos.push(fila?);
    }

    let mut docentes = Vec::new();
    for (codigo, nombre, rol) in basicos {
        let calificaciones = calificaciones_de_docente(conn, codigo)?;
        docentes.push(DocenteCatedra { codigo, nombre, rol, calificaciones });
    }
    Ok(docentes)
}

/// Instantánea de las cátedras de una materia con docentes y calificaciones,
/// tal como la consume el núcleo de ranking.
pub fn catedras_de_materia(ruta: &Path, codigo_materia: i64) -> Result<Vec<CatedraConDocentes>, Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    let mut stmt = conn.prepare("SELECT codigo FROM catedra WHERE codigo_materia = ?1")?;
    let filas = stmt.query_map(params![codigo_materia], |row| row.get::<_, i64>(0))?;
    let mut codigos = Vec::new();
    for fila in filas {
        codigos.push(fila?);
    }

    let mut catedras = Vec::new();
    for codigo in codigos {
        let docentes = docentes_con_calificaciones(&conn, codigo)?;
        catedras.push(CatedraConDocentes { codigo, docentes });
    }
    Ok(catedras)
}

pub fn docentes_de_catedra(ruta: &Path, codigo_catedra: i64) -> Result<Vec<DocenteCatedra>, Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    docentes_con_calificaciones(&conn, codigo_catedra)
}

/// Comentarios de un docente con su cuatrimestre ya resuelto. El orden de
/// presentación lo pone el núcleo de ranking, no la consulta.
pub fn comentarios_de_docente(ruta: &Path, codigo_docente: i64) -> Result<Vec<Comentario>, Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    let mut stmt = conn.prepare(
        "SELECT c.codigo, c.contenido, q.numero, q.anio
         FROM comentario c
         JOIN cuatrimestre q ON q.codigo = c.codigo_cuatrimestre
         WHERE c.codigo_docente = ?1",
    )?;
    let filas = stmt.query_map(params![codigo_docente], |row| {
        Ok(Comentario {
            codigo: row.get(0)?,
            contenido: row.get(1)?,
            cuatrimestre: Cuatrimestre { numero: row.get(2)?, anio: row.get(3)? },
        })
    })?;
    let mut comentarios = Vec::new();
    for fila in filas {
        comentarios.push(fila?);
    }
    Ok(comentarios)
}

pub fn listar_cuatrimestres(ruta: &Path) -> Result<Vec<CuatrimestreRegistrado>, Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    let mut stmt = conn.prepare("SELECT codigo, numero, anio FROM cuatrimestre")?;
    let filas = stmt.query_map([], |row| {
        Ok(CuatrimestreRegistrado {
            codigo: row.get(0)?,
            cuatrimestre: Cuatrimestre { numero: row.get(1)?, anio: row.get(2)? },
        })
    })?;
    let mut cuatrimestres = Vec::new();
    for fila in filas {
        cuatrimestres.push(fila?);
    }
    Ok(cuatrimestres)
}

pub fn prioridades_rol(ruta: &Path) -> Result<PrioridadesRol, Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    let mut stmt = conn.prepare("SELECT rol, prioridad FROM prioridad_rol")?;
    let filas = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
    })?;
    let mut pares = Vec::new();
    for fila in filas {
        pares.push(fila?);
    }
    Ok(PrioridadesRol::desde_pares(pares))
}

fn contar_filas(conn: &Connection, tabla: &str) -> Result<i64, rusqlite::Error> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", tabla), [], |row| row.get(0))
}

/// Conteos globales de la base, como objeto JSON listo para responder.
pub fn estadisticas(ruta: &Path) -> Result<serde_json::Value, Box<dyn Error>> {
    let conn = Connection::open(ruta)?;
    Ok(json!({
        "materias": contar_filas(&conn, "materia")?,
        "catedras": contar_filas(&conn, "catedra")?,
        "docentes": contar_filas(&conn, "docente")?,
        "cuatrimestres": contar_filas(&conn, "cuatrimestre")?,
        "calificaciones": contar_filas(&conn, "calificacion")?,
        "comentarios": contar_filas(&conn, "comentario")?,
    }))
}

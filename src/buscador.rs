// Búsqueda difusa de materias por código o nombre.

use crate::models::Materia;
use crate::ranking::catedra::normalizar;
use std::cmp::Ordering;
use strsim::jaro_winkler;

/// Similitud mínima para que una materia entre en los resultados.
pub const UMBRAL_SIMILITUD: f64 = 0.7;

/// Similitud entre la consulta ya normalizada y una materia: la contención
/// textual cuenta como coincidencia plena; si no hay contención se usa
/// jaro-winkler contra el nombre normalizado y contra el código.
fn similitud(consulta: &str, materia: &Materia) -> f64 {
    let nombre = normalizar(&materia.nombre);
    let codigo = materia.codigo.to_string();
    if nombre.contains(consulta) || codigo.contains(consulta) {
        return 1.0;
    }
    let por_nombre = jaro_winkler(consulta, &nombre);
    let por_codigo = jaro_winkler(consulta, &codigo);
    if por_nombre >= por_codigo {
        por_nombre
    } else {
        por_codigo
    }
}

/// Busca materias parecidas a la consulta. Devuelve de mayor a menor
/// similitud y, a igual similitud, conserva la posición original de la
/// lista. Consulta en blanco: sin resultados.
pub fn buscar_materias(materias: &[Materia], consulta: &str, limite: usize) -> Vec<Materia> {
    let consulta = normalizar(consulta);
    if consulta.is_empty() {
        return Vec::new();
    }

    let mut puntuadas: Vec<(usize, f64)> = Vec::new();
    for (posicion, materia) in materias.iter().enumerate() {
        let puntaje = similitud(&consulta, materia);
        if puntaje >= UMBRAL_SIMILITUD {
            puntuadas.push((posicion, puntaje));
        }
    }

    puntuadas.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        otro => otro,
    });

    puntuadas
        .into_iter()
        .take(limite)
        .map(|(posicion, _)| materias[posicion].clone())
        .collect()
}

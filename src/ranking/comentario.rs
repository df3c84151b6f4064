// Orden de presentación de los comentarios.

use crate::models::Comentario;
use crate::ranking::cuatrimestre::comparar_cuatrimestres;
use std::cmp::Ordering;

/// Ordena comentarios del cuatrimestre más reciente al más antiguo; dentro
/// del mismo cuatrimestre va primero el código más alto (la fila más nueva),
/// así la salida queda determinista.
pub fn ordenar_comentarios(comentarios: &mut Vec<Comentario>) {
    comentarios.sort_by(|a, b| {
        match comparar_cuatrimestres(&a.cuatrimestre, &b.cuatrimestre) {
            Ordering::Equal => b.codigo.cmp(&a.codigo),
            otro => otro,
        }
    });
}

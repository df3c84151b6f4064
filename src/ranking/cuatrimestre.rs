// Orden total de cuatrimestres: el más reciente primero.

use crate::models::{Cuatrimestre, CuatrimestreRegistrado};
use std::cmp::Ordering;

/// Comparador de cuatrimestres para cualquier sort en memoria: año
/// descendente y, a igual año, número descendente (el 2Q de un año va antes
/// que su 1Q). Compara los enteros ya parseados; nunca las formas en texto,
/// que ordenan mal años de distinto largo.
pub fn comparar_cuatrimestres(a: &Cuatrimestre, b: &Cuatrimestre) -> Ordering {
    match b.anio.cmp(&a.anio) {
        Ordering::Equal => b.numero.cmp(&a.numero),
        otro => otro,
    }
}

/// Ordena una lista de cuatrimestres persistidos del más reciente al más
/// antiguo.
pub fn ordenar_cuatrimestres(cuatrimestres: &mut Vec<CuatrimestreRegistrado>) {
    cuatrimestres.sort_by(|a, b| comparar_cuatrimestres(&a.cuatrimestre, &b.cuatrimestre));
}

/// Parsea la etiqueta legada "NQYYYY" (por ejemplo "1Q2024"). Devuelve None
/// si el texto no tiene esa forma o si el número no es 1 ni 2.
pub fn parsear_cuatrimestre(texto: &str) -> Option<Cuatrimestre> {
    let mut partes = texto.trim().splitn(2, 'Q');
    let numero: u8 = partes.next()?.parse().ok()?;
    let anio: i32 = partes.next()?.parse().ok()?;
    if numero != 1 && numero != 2 {
        return None;
    }
    Some(Cuatrimestre { numero, anio })
}

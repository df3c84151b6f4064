// Promedios compuestos de docentes a partir de sus calificaciones.

use crate::models::{Calificacion, DocenteCatedra, DocentePromediado};

/// Cantidad fija de dimensiones de una calificación.
pub const CANTIDAD_DIMENSIONES: usize = 9;

/// Promedio aritmético de las 9 dimensiones de una calificación.
pub fn promedio_calificacion(calificacion: &Calificacion) -> f64 {
    let suma: f64 = calificacion.dimensiones().iter().sum();
    suma / CANTIDAD_DIMENSIONES as f64
}

/// Promedio compuesto de un docente: media de los promedios por calificación.
/// Sin calificaciones el promedio es exactamente 0.0; el caso vacío se corta
/// acá y nunca llega a una división por cero.
pub fn promedio_docente(calificaciones: &[Calificacion]) -> f64 {
    if calificaciones.is_empty() {
        return 0.0;
    }
    let suma: f64 = calificaciones.iter().map(promedio_calificacion).sum();
    suma / calificaciones.len() as f64
}

/// Deriva la fila promediada de un docente leído de la base.
pub fn promediar_docente(docente: &DocenteCatedra) -> DocentePromediado {
    DocentePromediado {
        codigo: docente.codigo,
        nombre: docente.nombre.clone(),
        rol: docente.rol.clone(),
        promedio: promedio_docente(&docente.calificaciones),
        cantidad_calificaciones: docente.calificaciones.len(),
    }
}

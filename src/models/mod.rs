// Estructuras de datos del dominio de reseñas

use std::fmt;

/// Cuatrimestre académico: número 1 o 2 y año calendario.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Cuatrimestre {
    pub numero: u8,
    pub anio: i32,
}

impl fmt::Display for Cuatrimestre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.numero, self.anio)
    }
}

/// Fila de cuatrimestre tal como queda persistida (clave propia más el par).
#[derive(Debug, Clone, serde::Serialize)]
pub struct CuatrimestreRegistrado {
    pub codigo: i64,
    pub cuatrimestre: Cuatrimestre,
}

/// Calificación de un docente: exactamente 9 dimensiones numéricas.
/// Los valores admitidos van de 0 a 5 en pasos de 0.5; eso se valida al
/// registrar, no acá.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Calificacion {
    pub acepta_critica: f64,
    pub asistencia: f64,
    pub buen_trato: f64,
    pub claridad: f64,
    pub clase_organizada: f64,
    pub cumple_horarios: f64,
    pub fomenta_participacion: f64,
    pub panorama_amplio: f64,
    pub responde_mails: f64,
}

impl Calificacion {
    /// Las 9 dimensiones en orden fijo, para promediar y validar.
    pub fn dimensiones(&self) -> [f64; 9] {
        [
            self.acepta_critica,
            self.asistencia,
            self.buen_trato,
            self.claridad,
            self.clase_organizada,
            self.cumple_horarios,
            self.fomenta_participacion,
            self.panorama_amplio,
            self.responde_mails,
        ]
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Materia {
    pub codigo: i64,
    pub nombre: String,
}

/// Docente de una cátedra con sus calificaciones, tal como se leyó de la base.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DocenteCatedra {
    pub codigo: i64,
    pub nombre: String,
    pub rol: Option<String>,
    pub calificaciones: Vec<Calificacion>,
}

/// Docente con su promedio compuesto ya derivado.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DocentePromediado {
    pub codigo: i64,
    pub nombre: String,
    pub rol: Option<String>,
    pub promedio: f64,
    pub cantidad_calificaciones: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CatedraConDocentes {
    pub codigo: i64,
    pub docentes: Vec<DocenteCatedra>,
}

/// Cátedra con nombre compuesto y calificación, lista para rankear.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CatedraRankeada {
    pub codigo: i64,
    pub nombre: String,
    pub calificacion: f64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Comentario {
    pub codigo: i64,
    pub contenido: String,
    pub cuatrimestre: Cuatrimestre,
}

/// Payload que llega del formulario de calificación.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NuevaCalificacion {
    pub codigo_docente: i64,
    pub codigo_cuatrimestre: i64,
    pub calificacion: Calificacion,
    pub comentario: Option<String>,
}

//! Núcleo puro de agregación y orden: promedios compuestos de docentes,
//! nombre y calificación de cátedras, ranking con desempates fijos y orden de
//! cuatrimestres y comentarios. Sin estado compartido ni E/S: cada función es
//! determinista sobre las instantáneas que recibe y nunca entra en pánico;
//! las entradas degeneradas resuelven al 0 documentado.

pub mod catedra;
pub mod comentario;
pub mod cuatrimestre;
pub mod promedio;

pub use catedra::{
    calificacion_catedra, componer_nombre, normalizar, ordenar_docentes, rankear_catedras,
    resumir_catedra, PrioridadesRol, SEPARADOR_NOMBRE,
};
pub use comentario::ordenar_comentarios;
pub use cuatrimestre::{comparar_cuatrimestres, ordenar_cuatrimestres, parsear_cuatrimestre};
pub use promedio::{promediar_docente, promedio_calificacion, promedio_docente};

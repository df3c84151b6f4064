//! Capa de persistencia SQLite: conexiones de vida corta por operación,
//! esquema creado al arrancar y lecturas que entregan instantáneas al núcleo
//! de ranking.

pub mod db;
pub mod insertions;
pub mod queries;

pub use db::{inicializar_db, ruta_base_datos};
pub use insertions::{registrar_calificacion, validar_calificacion};

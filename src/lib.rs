// Biblioteca raíz del crate `catedrank`.
// Reexporta los módulos principales y proporciona una función de conveniencia
// `run_server` que levanta la API HTTP.
pub mod buscador;
pub mod datos;
pub mod models;
pub mod ranking;
pub mod server;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;

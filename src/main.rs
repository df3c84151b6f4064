// --- API de Reseñas de Cátedras - Archivo principal ---

use catedrank::run_server;
use catedrank::server::direccion_bind;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    println!("=== API de Reseñas de Cátedras (catedrank) ===");
    let bind = direccion_bind();
    println!("Iniciando servidor en http://{}", bind);
    run_server(&bind).await
}

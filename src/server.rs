use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde_json::json;
use std::sync::{Arc, OnceLock};
use tokio::sync::Semaphore;

use crate::buscador::buscar_materias;
use crate::datos::{self, queries};
use crate::models::{CatedraRankeada, Materia, NuevaCalificacion};
use crate::ranking;

/// Dirección de escucha del servidor. Honra CATEDRAS_BIND, cargando antes el
/// .env si está presente, igual que la ruta de la base.
pub fn direccion_bind() -> String {
    let _ = dotenv::dotenv();
    std::env::var("CATEDRAS_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string())
}

/// Límite global de agregaciones simultáneas (una por procesador).
fn semaforo_global() -> Arc<Semaphore> {
    static SEMAFORO: OnceLock<Arc<Semaphore>> = OnceLock::new();
    SEMAFORO
        .get_or_init(|| {
            let procesadores = num_cpus::get();
            Arc::new(Semaphore::new(std::cmp::max(1, procesadores)))
        })
        .clone()
}

/// GET /materias
/// Lista todas las materias cargadas.
async fn materias_handler() -> impl Responder {
    let ruta = datos::ruta_base_datos();
    let resultado = tokio::task::spawn_blocking(move || -> Result<Vec<Materia>, String> {
        queries::listar_materias(&ruta).map_err(|e| format!("fallo al listar materias: {}", e))
    })
    .await;

    match resultado {
        Ok(Ok(materias)) => {
            HttpResponse::Ok().json(json!({"cantidad": materias.len(), "materias": materias}))
        }
        Ok(Err(e)) => HttpResponse::InternalServerError().json(json!({"error": e})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("task join error: {}", e)})),
    }
}

/// GET /materias/buscar?q=algebra&limite=10
/// Búsqueda difusa sobre el listado de materias.
async fn buscar_materias_handler(
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let qm = query.into_inner();
    let consulta = match qm.get("q").and_then(|s| if s.trim().is_empty() { None } else { Some(s.clone()) }) {
        Some(c) => c,
        None => return HttpResponse::BadRequest().json(json!({"error": "falta el parámetro q"})),
    };
    let limite = qm.get("limite").and_then(|s| s.parse::<usize>().ok()).unwrap_or(10);

    let ruta = datos::ruta_base_datos();
    let resultado = tokio::task::spawn_blocking(move || -> Result<Vec<Materia>, String> {
        let materias = queries::listar_materias(&ruta)
            .map_err(|e| format!("fallo al listar materias: {}", e))?;
        Ok(buscar_materias(&materias, &consulta, limite))
    })
    .await;

    match resultado {
        Ok(Ok(encontradas)) => {
            HttpResponse::Ok().json(json!({"cantidad": encontradas.len(), "materias": encontradas}))
        }
        Ok(Err(e)) => HttpResponse::InternalServerError().json(json!({"error": e})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("task join error: {}", e)})),
    }
}

/// GET /materias/{codigo}/catedras
/// Cátedras de la materia con nombre compuesto y calificación, rankeadas.
async fn catedras_materia_handler(path: web::Path<i64>) -> impl Responder {
    let codigo_materia = path.into_inner();

    let sem = semaforo_global();
    let permit = match sem.acquire_owned().await {
        Ok(p) => p,
        Err(_) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": "failed to acquire semaphore"}))
        }
    };

    let ruta = datos::ruta_base_datos();
    let handle = tokio::task::spawn_blocking(
        move || -> Result<Option<(Materia, Vec<CatedraRankeada>)>, String> {
            let _permit = permit;
            let materia = match queries::obtener_materia(&ruta, codigo_materia)
                .map_err(|e| format!("fallo al leer la materia: {}", e))?
            {
                Some(m) => m,
                None => return Ok(None),
            };

            let catedras = queries::catedras_de_materia(&ruta, codigo_materia)
                .map_err(|e| format!("fallo al leer cátedras: {}", e))?;
            let prioridades = queries::prioridades_rol(&ruta)
                .map_err(|e| format!("fallo al leer prioridades: {}", e))?;

            let mut resumidas: Vec<CatedraRankeada> = Vec::new();
            for catedra in catedras {
                let promediados = catedra.docentes.iter().map(ranking::promediar_docente).collect();
                resumidas.push(ranking::resumir_catedra(catedra.codigo, promediados, &prioridades));
            }
            Ok(Some((materia, ranking::rankear_catedras(resumidas))))
        },
    );

    let resultado = match handle.await {
        Ok(res) => res,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("task join error: {}", e)}))
        }
    };

    match resultado {
        Ok(Some((materia, rankeadas))) => HttpResponse::Ok().json(json!({
            "materia": materia,
            "cantidad": rankeadas.len(),
            "catedras": rankeadas,
        })),
        Ok(None) => HttpResponse::BadRequest()
            .json(json!({"error": format!("materia {} inexistente", codigo_materia)})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": e})),
    }
}

/// GET /catedras/{codigo}/docentes
/// Docentes de la cátedra con promedio, cantidad de calificaciones y
/// comentarios ordenados por cuatrimestre.
async fn docentes_catedra_handler(path: web::Path<i64>) -> impl Responder {
    let codigo_catedra = path.into_inner();

    let sem = semaforo_global();
    let permit = match sem.acquire_owned().await {
        Ok(p) => p,
        Err(_) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": "failed to acquire semaphore"}))
        }
    };

    let ruta = datos::ruta_base_datos();
    let handle = tokio::task::spawn_blocking(move || -> Result<Option<serde_json::Value>, String> {
        let _permit = permit;
        let existe = queries::existe_catedra(&ruta, codigo_catedra)
            .map_err(|e| format!("fallo al leer la cátedra: {}", e))?;
        if !existe {
            return Ok(None);
        }

        let instantanea = queries::docentes_de_catedra(&ruta, codigo_catedra)
            .map_err(|e| format!("fallo al leer docentes: {}", e))?;
        let prioridades = queries::prioridades_rol(&ruta)
            .map_err(|e| format!("fallo al leer prioridades: {}", e))?;

        let mut promediados: Vec<_> = instantanea.iter().map(ranking::promediar_docente).collect();
        ranking::ordenar_docentes(&mut promediados, &prioridades);
        let nombre = ranking::componer_nombre(&promediados);
        let calificacion = ranking::calificacion_catedra(&promediados);

        let mut docentes_json: Vec<serde_json::Value> = Vec::new();
        for docente in &promediados {
            let mut comentarios = queries::comentarios_de_docente(&ruta, docente.codigo)
                .map_err(|e| format!("fallo al leer comentarios: {}", e))?;
            ranking::ordenar_comentarios(&mut comentarios);
            let comentarios_json: Vec<serde_json::Value> = comentarios
                .iter()
                .map(|c| {
                    json!({
                        "codigo": c.codigo,
                        "contenido": c.contenido,
                        "cuatrimestre": c.cuatrimestre.to_string(),
                    })
                })
                .collect();
            docentes_json.push(json!({
                "codigo": docente.codigo,
                "nombre": docente.nombre,
                "rol": docente.rol,
                "promedio": docente.promedio,
                "cantidad_calificaciones": docente.cantidad_calificaciones,
                "comentarios": comentarios_json,
            }));
        }

        Ok(Some(json!({
            "catedra": {
                "codigo": codigo_catedra,
                "nombre": nombre,
                "calificacion": calificacion,
            },
            "docentes": docentes_json,
        })))
    });

    let resultado = match handle.await {
        Ok(res) => res,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("task join error: {}", e)}))
        }
    };

    match resultado {
        Ok(Some(cuerpo)) => HttpResponse::Ok().json(cuerpo),
        Ok(None) => HttpResponse::BadRequest()
            .json(json!({"error": format!("cátedra {} inexistente", codigo_catedra)})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": e})),
    }
}

/// GET /cuatrimestres
/// Cuatrimestres registrados, del más reciente al más antiguo.
async fn cuatrimestres_handler() -> impl Responder {
    let ruta = datos::ruta_base_datos();
    let resultado = tokio::task::spawn_blocking(move || -> Result<Vec<serde_json::Value>, String> {
        let mut cuatrimestres = queries::listar_cuatrimestres(&ruta)
            .map_err(|e| format!("fallo al listar cuatrimestres: {}", e))?;
        ranking::ordenar_cuatrimestres(&mut cuatrimestres);
        let filas = cuatrimestres
            .iter()
            .map(|c| {
                json!({
                    "codigo": c.codigo,
                    "numero": c.cuatrimestre.numero,
                    "anio": c.cuatrimestre.anio,
                    "etiqueta": c.cuatrimestre.to_string(),
                })
            })
            .collect();
        Ok(filas)
    })
    .await;

    match resultado {
        Ok(Ok(filas)) => {
            HttpResponse::Ok().json(json!({"cantidad": filas.len(), "cuatrimestres": filas}))
        }
        Ok(Err(e)) => HttpResponse::InternalServerError().json(json!({"error": e})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("task join error: {}", e)})),
    }
}

/// GET /estadisticas
/// Conteos globales de la base.
async fn estadisticas_handler() -> impl Responder {
    let ruta = datos::ruta_base_datos();
    let resultado = tokio::task::spawn_blocking(move || -> Result<serde_json::Value, String> {
        queries::estadisticas(&ruta).map_err(|e| format!("fallo al leer estadísticas: {}", e))
    })
    .await;

    match resultado {
        Ok(Ok(cuerpo)) => HttpResponse::Ok().json(cuerpo),
        Ok(Err(e)) => HttpResponse::InternalServerError().json(json!({"error": e})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("task join error: {}", e)})),
    }
}

/// POST /calificaciones
/// Registra una calificación (y su comentario opcional) enviada por el
/// formulario. El payload inválido se rechaza antes de tocar la base.
async fn registrar_calificacion_handler(body: web::Json<NuevaCalificacion>) -> impl Responder {
    let nueva = body.into_inner();

    if let Err(e) = datos::validar_calificacion(&nueva) {
        return HttpResponse::BadRequest().json(json!({"error": e}));
    }

    let ruta = datos::ruta_base_datos();
    let handle = tokio::task::spawn_blocking(move || -> Result<Result<i64, String>, String> {
        let docente_existe = queries::existe_docente(&ruta, nueva.codigo_docente)
            .map_err(|e| format!("fallo al verificar docente: {}", e))?;
        if !docente_existe {
            return Ok(Err(format!("docente {} inexistente", nueva.codigo_docente)));
        }
        let cuatrimestre_existe = queries::existe_cuatrimestre(&ruta, nueva.codigo_cuatrimestre)
            .map_err(|e| format!("fallo al verificar cuatrimestre: {}", e))?;
        if !cuatrimestre_existe {
            return Ok(Err(format!("cuatrimestre {} inexistente", nueva.codigo_cuatrimestre)));
        }
        let codigo = datos::registrar_calificacion(&ruta, &nueva)
            .map_err(|e| format!("fallo al registrar: {}", e))?;
        Ok(Ok(codigo))
    });

    let resultado = match handle.await {
        Ok(res) => res,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("task join error: {}", e)}))
        }
    };

    match resultado {
        Ok(Ok(codigo)) => {
            println!("Calificación {} registrada", codigo);
            HttpResponse::Ok().json(json!({"status": "ok", "codigo": codigo}))
        }
        Ok(Err(rechazo)) => HttpResponse::BadRequest().json(json!({"error": rechazo})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": e})),
    }
}

/// GET /help
async fn help_handler() -> impl Responder {
    // Ejemplo de payload para POST /calificaciones
    let ejemplo = json!({
        "codigo_docente": 1,
        "codigo_cuatrimestre": 3,
        "calificacion": {
            "acepta_critica": 4.0,
            "asistencia": 4.5,
            "buen_trato": 5.0,
            "claridad": 3.5,
            "clase_organizada": 4.0,
            "cumple_horarios": 5.0,
            "fomenta_participacion": 3.0,
            "panorama_amplio": 4.0,
            "responde_mails": 2.5
        },
        "comentario": "Excelente cursada, los parciales se corrigen rápido."
    });

    let help = json!({
        "description": "API de reseñas de cátedras: materias, cátedras rankeadas por calificación compuesta, docentes con promedios y comentarios, y registro de calificaciones nuevas.",
        "endpoints": {
            "GET /materias": "lista de materias",
            "GET /materias/buscar?q=algebra&limite=10": "búsqueda difusa por nombre o código",
            "GET /materias/{codigo}/catedras": "cátedras de la materia, rankeadas",
            "GET /catedras/{codigo}/docentes": "docentes con promedio y comentarios ordenados",
            "GET /cuatrimestres": "cuatrimestres del más reciente al más antiguo",
            "GET /estadisticas": "conteos globales",
            "POST /calificaciones": "registra una calificación de 9 dimensiones (ver post_example)"
        },
        "post_example": ejemplo,
        "note": "Las dimensiones aceptan valores de 0 a 5 en pasos de 0.5. El comentario es opcional: vacío o de al menos 20 caracteres.",
    });

    HttpResponse::Ok().json(help)
}

pub async fn run_server(bind_addr: &str) -> std::io::Result<()> {
    let ruta = datos::ruta_base_datos();
    if let Err(e) = datos::inicializar_db(&ruta) {
        eprintln!("No se pudo inicializar la base en {}: {}", ruta.display(), e);
    }

    HttpServer::new(|| {
        App::new()
            .wrap(Cors::permissive())
            .route("/help", web::get().to(help_handler))
            .route("/materias", web::get().to(materias_handler))
            .route("/materias/buscar", web::get().to(buscar_materias_handler))
            .route("/materias/{codigo}/catedras", web::get().to(catedras_materia_handler))
            .route("/catedras/{codigo}/docentes", web::get().to(docentes_catedra_handler))
            .route("/cuatrimestres", web::get().to(cuatrimestres_handler))
            .route("/estadisticas", web::get().to(estadisticas_handler))
            .route("/calificaciones", web::post().to(registrar_calificacion_handler))
    })
    .bind(bind_addr)?
    .run()
    .await
}

use catedrank::models::{Calificacion, CatedraRankeada, Comentario, Cuatrimestre, DocenteCatedra};
use catedrank::ranking::{
    ordenar_comentarios, promediar_docente, rankear_catedras, resumir_catedra, PrioridadesRol,
};

fn calificacion_uniforme(valor: f64) -> Calificacion {
    Calificacion {
        acepta_critica: valor,
        asistencia: valor,
        buen_trato: valor,
        claridad: valor,
        clase_organizada: valor,
        cumple_horarios: valor,
        fomenta_participacion: valor,
        panorama_amplio: valor,
        responde_mails: valor,
    }
}

fn docente(codigo: i64, nombre: &str, rol: &str, valores: &[f64]) -> DocenteCatedra {
    DocenteCatedra {
        codigo,
        nombre: nombre.to_string(),
        rol: Some(rol.to_string()),
        calificaciones: valores.iter().map(|v| calificacion_uniforme(*v)).collect(),
    }
}

fn prioridades() -> PrioridadesRol {
    PrioridadesRol::desde_pares(vec![("Titular".to_string(), 1), ("Ayudante".to_string(), 2)])
}

#[test]
fn test_pipeline_de_una_materia() {
    // dos cátedras de la misma materia, desde las filas crudas hasta el ranking
    let catedra_a = vec![
        docente(1, "Buchwald", "Titular", &[4.5, 4.0]),
        docente(2, "Genender", "Ayudante", &[5.0]),
    ];
    let catedra_b = vec![
        docente(3, "Wachenchauzer", "Titular", &[3.0]),
        docente(4, "Essaya", "Ayudante", &[]),
    ];

    let prioridades = prioridades();
    let resumen_a = resumir_catedra(
        1,
        catedra_a.iter().map(promediar_docente).collect(),
        &prioridades,
    );
    let resumen_b = resumir_catedra(
        2,
        catedra_b.iter().map(promediar_docente).collect(),
        &prioridades,
    );

    assert_eq!(resumen_a.nombre, "Buchwald-Genender");
    // Buchwald promedia 4.25 y Genender 5.0
    assert!((resumen_a.calificacion - 4.625).abs() < 1e-9);

    // Essaya no tiene calificaciones: figura en el nombre pero no diluye
    assert_eq!(resumen_b.nombre, "Wachenchauzer-Essaya");
    assert!((resumen_b.calificacion - 3.0).abs() < 1e-9);

    let rankeadas = rankear_catedras(vec![resumen_b, resumen_a]);
    let codigos: Vec<i64> = rankeadas.iter().map(|c| c.codigo).collect();
    assert_eq!(codigos, vec![1, 2]);
}

#[test]
fn test_promedio_compuesto_de_calificaciones_mixtas() {
    let primera = Calificacion {
        acepta_critica: 4.0,
        asistencia: 4.5,
        buen_trato: 5.0,
        claridad: 3.5,
        clase_organizada: 4.0,
        cumple_horarios: 5.0,
        fomenta_participacion: 3.0,
        panorama_amplio: 4.0,
        responde_mails: 2.5,
    };
    let segunda = Calificacion {
        acepta_critica: 3.0,
        asistencia: 3.5,
        buen_trato: 4.0,
        claridad: 4.0,
        clase_organizada: 2.5,
        cumple_horarios: 3.0,
        fomenta_participacion: 3.5,
        panorama_amplio: 4.5,
        responde_mails: 5.0,
    };
    let fila = DocenteCatedra {
        codigo: 1,
        nombre: "Podberezski".to_string(),
        rol: Some("Titular".to_string()),
        calificaciones: vec![primera, segunda],
    };

    let promediado = promediar_docente(&fila);
    // las dimensiones suman 35.5 y 33.0; la media de medias es 68.5/18
    assert!((promediado.promedio - 68.5 / 18.0).abs() < 1e-9);
    assert_eq!(promediado.cantidad_calificaciones, 2);
}

#[test]
fn test_ranking_desempata_nombres_compuestos() {
    let catedras = vec![
        CatedraRankeada { codigo: 1, nombre: "Ávalos-Suárez".to_string(), calificacion: 4.0 },
        CatedraRankeada { codigo: 2, nombre: "Acosta-Zapata".to_string(), calificacion: 4.0 },
    ];
    let rankeadas = rankear_catedras(catedras);
    // a igual calificación ordena el nombre sin acentos: Acosta antes que Ávalos
    assert_eq!(rankeadas[0].nombre, "Acosta-Zapata");
    assert_eq!(rankeadas[1].nombre, "Ávalos-Suárez");
}

#[test]
fn test_roles_sin_prioridad_van_al_final_del_nombre() {
    let filas = vec![
        docente(1, "Marulanda", "Invitado", &[4.0]),
        docente(2, "Benítez", "Titular", &[4.0]),
    ];
    let resumen = resumir_catedra(
        7,
        filas.iter().map(promediar_docente).collect(),
        &prioridades(),
    );
    // "Invitado" no figura en la tabla de prioridades
    assert_eq!(resumen.nombre, "Benítez-Marulanda");
}

#[test]
fn test_comentarios_de_varias_cursadas() {
    let mut comentarios = vec![
        Comentario {
            codigo: 4,
            contenido: "La cursada del 1Q fue muy llevadera.".to_string(),
            cuatrimestre: Cuatrimestre { numero: 1, anio: 2024 },
        },
        Comentario {
            codigo: 9,
            contenido: "En el 2Q cambió el régimen de parciales.".to_string(),
            cuatrimestre: Cuatrimestre { numero: 2, anio: 2024 },
        },
        Comentario {
            codigo: 6,
            contenido: "Otro comentario del mismo 1Q.".to_string(),
            cuatrimestre: Cuatrimestre { numero: 1, anio: 2024 },
        },
        Comentario {
            codigo: 1,
            contenido: "Cursada vieja, otro plan de estudios.".to_string(),
            cuatrimestre: Cuatrimestre { numero: 2, anio: 2019 },
        },
    ];

    ordenar_comentarios(&mut comentarios);

    let codigos: Vec<i64> = comentarios.iter().map(|c| c.codigo).collect();
    // 2Q2024 primero; dentro de 1Q2024 el código más alto; 2019 al final
    assert_eq!(codigos, vec![9, 6, 4, 1]);
}

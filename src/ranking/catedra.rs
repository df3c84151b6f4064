// Composición de nombre, puntaje y ranking de cátedras.

use crate::models::{CatedraRankeada, DocentePromediado};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Separador fijo entre los nombres de los docentes en el nombre de la
/// cátedra.
pub const SEPARADOR_NOMBRE: &str = "-";

/// Prioridad de orden por rol docente (tabla `prioridad_rol`). Se pasa
/// explícita a las funciones de orden para que los tests puedan sustituirla
/// por fixtures. Un rol ausente o sin entrada ordena al final.
#[derive(Debug, Clone, Default)]
pub struct PrioridadesRol {
    mapa: HashMap<String, u32>,
}

impl PrioridadesRol {
    pub fn nueva() -> Self {
        PrioridadesRol { mapa: HashMap::new() }
    }

    pub fn desde_pares(pares: Vec<(String, u32)>) -> Self {
        PrioridadesRol { mapa: pares.into_iter().collect() }
    }

    /// Prioridad de un rol: menor ordena primero. Sin rol o sin entrada en la
    /// tabla: u32::MAX.
    pub fn prioridad(&self, rol: Option<&str>) -> u32 {
        rol.and_then(|r| self.mapa.get(r)).copied().unwrap_or(u32::MAX)
    }
}

/// Clave de ordenamiento para nombres: minúsculas, sin acentos, puntuación a
/// espacio y espacios colapsados.
pub fn normalizar(texto: &str) -> String {
    let mut clave = String::with_capacity(texto.len());
    let mut espacio_previo = true;
    for ch in texto.chars() {
        // mapa simple de acentos comunes en español
        let plano = match ch {
            'Á' | 'À' | 'Ä' | 'Â' | 'Ã' | 'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
            'É' | 'È' | 'Ë' | 'Ê' | 'é' | 'è' | 'ë' | 'ê' => 'e',
            'Í' | 'Ì' | 'Ï' | 'Î' | 'í' | 'ì' | 'ï' | 'î' => 'i',
            'Ó' | 'Ò' | 'Ö' | 'Ô' | 'Õ' | 'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
            'Ú' | 'Ù' | 'Ü' | 'Û' | 'ú' | 'ù' | 'ü' | 'û' => 'u',
            'Ñ' | 'ñ' => 'n',
            'Ç' | 'ç' => 'c',
            otro => otro,
        };
        if plano.is_alphanumeric() {
            for minuscula in plano.to_lowercase() {
                clave.push(minuscula);
            }
            espacio_previo = false;
        } else if !espacio_previo {
            clave.push(' ');
            espacio_previo = true;
        }
    }
    while clave.ends_with(' ') {
        clave.pop();
    }
    clave
}

/// Ordena docentes por prioridad de rol ascendente y, a igual prioridad, por
/// nombre normalizado; el nombre crudo desempata al final para que el orden
/// quede fijo ante cualquier permutación de entrada.
pub fn ordenar_docentes(docentes: &mut Vec<DocentePromediado>, prioridades: &PrioridadesRol) {
    docentes.sort_by(|a, b| {
        let pa = prioridades.prioridad(a.rol.as_deref());
        let pb = prioridades.prioridad(b.rol.as_deref());
        match pa.cmp(&pb) {
            Ordering::Equal => match normalizar(&a.nombre).cmp(&normalizar(&b.nombre)) {
                Ordering::Equal => a.nombre.cmp(&b.nombre),
                otro => otro,
            },
            otro => otro,
        }
    });
}

/// Nombre de la cátedra: los nombres de sus docentes, ya ordenados, unidos
/// con el separador fijo.
pub fn componer_nombre(docentes_ordenados: &[DocentePromediado]) -> String {
    docentes_ordenados
        .iter()
        .map(|d| d.nombre.as_str())
        .collect::<Vec<_>>()
        .join(SEPARADOR_NOMBRE)
}

/// Calificación de la cátedra: promedio de los promedios compuestos contando
/// solo a los docentes con al menos una calificación. Sin docentes
/// calificados la calificación es exactamente 0.0.
pub fn calificacion_catedra(docentes: &[DocentePromediado]) -> f64 {
    let calificados: Vec<&DocentePromediado> = docentes
        .iter()
        .filter(|d| d.cantidad_calificaciones > 0)
        .collect();
    if calificados.is_empty() {
        return 0.0;
    }
    let suma: f64 = calificados.iter().map(|d| d.promedio).sum();
    suma / calificados.len() as f64
}

/// Arma la fila rankeable de una cátedra: ordena sus docentes, compone el
/// nombre y calcula la calificación.
pub fn resumir_catedra(
    codigo: i64,
    mut docentes: Vec<DocentePromediado>,
    prioridades: &PrioridadesRol,
) -> CatedraRankeada {
    ordenar_docentes(&mut docentes, prioridades);
    CatedraRankeada {
        codigo,
        nombre: componer_nombre(&docentes),
        calificacion: calificacion_catedra(&docentes),
    }
}

/// Ordena cátedras de mayor a menor calificación; a igual calificación
/// desempata el nombre compuesto ascendente (normalizado y luego crudo).
pub fn rankear_catedras(mut catedras: Vec<CatedraRankeada>) -> Vec<CatedraRankeada> {
    catedras.sort_by(|a, b| {
        // las calificaciones nunca son NaN: los casos degenerados resuelven a 0.0
        match b.calificacion.total_cmp(&a.calificacion) {
            Ordering::Equal => match normalizar(&a.nombre).cmp(&normalizar(&b.nombre)) {
                Ordering::Equal => a.nombre.cmp(&b.nombre),
                otro => otro,
            },
            otro => otro,
        }
    });
    catedras
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docente(nombre: &str, rol: Option<&str>, promedio: f64, cantidad: usize) -> DocentePromediado {
        DocentePromediado {
            codigo: 0,
            nombre: nombre.to_string(),
            rol: rol.map(|r| r.to_string()),
            promedio,
            cantidad_calificaciones: cantidad,
        }
    }

    fn prioridades_de_prueba() -> PrioridadesRol {
        PrioridadesRol::desde_pares(vec![
            ("Titular".to_string(), 1),
            ("Adjunto".to_string(), 2),
            ("Ayudante".to_string(), 3),
        ])
    }

    #[test]
    fn test_normalizar() {
        assert_eq!(normalizar("Álvarez"), "alvarez");
        assert_eq!(normalizar("  Muñoz,   Núñez "), "munoz nunez");
        assert_eq!(normalizar("GARCÍA-LÓPEZ"), "garcia lopez");
    }

    #[test]
    fn test_prioridad_de_rol_desconocido() {
        let prioridades = prioridades_de_prueba();
        assert_eq!(prioridades.prioridad(Some("Titular")), 1);
        assert_eq!(prioridades.prioridad(Some("Emérito")), u32::MAX);
        assert_eq!(prioridades.prioridad(None), u32::MAX);
    }

    #[test]
    fn test_ordenar_docentes_por_prioridad_y_nombre() {
        let prioridades = prioridades_de_prueba();
        let mut docentes = vec![
            docente("Zapata", Some("Ayudante"), 3.0, 1),
            docente("Gómez", Some("Titular"), 4.0, 2),
            docente("Álvarez", Some("Adjunto"), 2.0, 1),
            docente("Acosta", Some("Adjunto"), 1.0, 1),
        ];
        ordenar_docentes(&mut docentes, &prioridades);
        let nombres: Vec<&str> = docentes.iter().map(|d| d.nombre.as_str()).collect();
        // a igual prioridad ordena el nombre sin acentos: Acosta antes que Álvarez
        assert_eq!(nombres, vec!["Gómez", "Acosta", "Álvarez", "Zapata"]);
    }

    #[test]
    fn test_rol_desconocido_ordena_al_final() {
        let prioridades = prioridades_de_prueba();
        let mut docentes = vec![
            docente("Aguirre", Some("Emérito"), 5.0, 3),
            docente("Zapata", Some("Ayudante"), 3.0, 1),
        ];
        ordenar_docentes(&mut docentes, &prioridades);
        let nombres: Vec<&str> = docentes.iter().map(|d| d.nombre.as_str()).collect();
        assert_eq!(nombres, vec!["Zapata", "Aguirre"]);
    }

    #[test]
    fn test_resumen_excluye_no_calificados_del_promedio() {
        // A con prioridad 1 y promedio 4.0; B con prioridad 2 y sin
        // calificaciones: el nombre es "A-B" y la calificación 4.0
        let prioridades = prioridades_de_prueba();
        let docentes = vec![
            docente("B", Some("Adjunto"), 0.0, 0),
            docente("A", Some("Titular"), 4.0, 5),
        ];
        let resumen = resumir_catedra(1, docentes, &prioridades);
        assert_eq!(resumen.nombre, "A-B");
        assert!((resumen.calificacion - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_catedra_sin_docentes_calificados() {
        let prioridades = prioridades_de_prueba();
        let docentes = vec![
            docente("A", Some("Titular"), 0.0, 0),
            docente("B", Some("Adjunto"), 0.0, 0),
        ];
        let resumen = resumir_catedra(1, docentes, &prioridades);
        assert_eq!(resumen.calificacion, 0.0);
        assert!(!resumen.calificacion.is_nan());
        assert_eq!(resumen.nombre, "A-B");
    }

    #[test]
    fn test_resumen_estable_ante_permutaciones() {
        let prioridades = prioridades_de_prueba();
        let originales = vec![
            docente("Gómez", Some("Titular"), 4.0, 2),
            docente("Álvarez", Some("Adjunto"), 3.0, 1),
            docente("Zapata", None, 2.0, 1),
        ];
        let mut permutados = originales.clone();
        permutados.reverse();

        let a = resumir_catedra(9, originales, &prioridades);
        let b = resumir_catedra(9, permutados, &prioridades);
        assert_eq!(a.nombre, b.nombre);
        assert!((a.calificacion - b.calificacion).abs() < 1e-9);
    }

    #[test]
    fn test_rankear_desempata_por_nombre() {
        let catedras = vec![
            CatedraRankeada { codigo: 1, nombre: "Gomez".to_string(), calificacion: 3.5 },
            CatedraRankeada { codigo: 2, nombre: "Alvarez".to_string(), calificacion: 3.5 },
            CatedraRankeada { codigo: 3, nombre: "Pérez".to_string(), calificacion: 4.5 },
        ];
        let rankeadas = rankear_catedras(catedras);
        let nombres: Vec<&str> = rankeadas.iter().map(|c| c.nombre.as_str()).collect();
        assert_eq!(nombres, vec!["Pérez", "Alvarez", "Gomez"]);
    }

    #[test]
    fn test_rankear_orden_descendente() {
        let catedras = vec![
            CatedraRankeada { codigo: 1, nombre: "A".to_string(), calificacion: 0.0 },
            CatedraRankeada { codigo: 2, nombre: "B".to_string(), calificacion: 5.0 },
            CatedraRankeada { codigo: 3, nombre: "C".to_string(), calificacion: 2.5 },
        ];
        let rankeadas = rankear_catedras(catedras);
        let codigos: Vec<i64> = rankeadas.iter().map(|c| c.codigo).collect();
        assert_eq!(codigos, vec![2, 3, 1]);
    }

    #[test]
    fn test_rankear_estable_ante_permutaciones() {
        let base = [
            CatedraRankeada { codigo: 1, nombre: "Gomez".to_string(), calificacion: 3.5 },
            CatedraRankeada { codigo: 2, nombre: "Alvarez".to_string(), calificacion: 3.5 },
            CatedraRankeada { codigo: 3, nombre: "Zapata".to_string(), calificacion: 4.5 },
        ];
        let ordenes = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        for orden in ordenes {
            let entrada: Vec<CatedraRankeada> = orden.iter().map(|i| base[*i].clone()).collect();
            let rankeadas = rankear_catedras(entrada);
            let nombres: Vec<&str> = rankeadas.iter().map(|c| c.nombre.as_str()).collect();
            // el empate en 3.5 resuelve igual venga como venga la lista
            assert_eq!(nombres, vec!["Zapata", "Alvarez", "Gomez"]);
        }
    }
}

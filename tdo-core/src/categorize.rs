//! Keyword-based folder suggestions for new tasks.

use serde::Deserialize;

/// A folder and the words that hint a task belongs in it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryRule {
    pub folder: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    fn new(folder: &str, keywords: &[&str]) -> Self {
        Self {
            folder: folder.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// The built-in table. Order matters: the first rule with a hit wins.
pub fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            "Trabajo",
            &["reunión", "proyecto", "cliente", "informe", "email", "correo", "presentación"],
        ),
        CategoryRule::new("Personal", &["amigo", "familia", "cita", "cumpleaños", "regalo"]),
        CategoryRule::new(
            "Estudio",
            &["estudiar", "examen", "curso", "libro", "leer", "aprender"],
        ),
        CategoryRule::new(
            "Hogar",
            &["limpiar", "cocina", "compra", "reparar", "casa", "jardín"],
        ),
        CategoryRule::new(
            "Salud",
            &["médico", "ejercicio", "entrenar", "cita", "medicamento"],
        ),
        CategoryRule::new("Compras", &["comprar", "tienda", "supermercado", "lista"]),
    ]
}

/// Returns the folder of the first rule with a keyword contained in `title`.
///
/// Matching is a case-insensitive substring search, so `"Preparar presentación"` hits
/// `presentación` and `"Comprar pan"` hits `compra`.
///
/// ```
/// # use tdo_core::categorize::{categorize, default_rules};
/// let rules = default_rules();
/// assert_eq!(categorize("Preparar la Reunión", &rules).as_deref(), Some("Trabajo"));
/// assert_eq!(categorize("Pasear", &rules), None);
/// ```
pub fn categorize(title: &str, rules: &[CategoryRule]) -> Option<String> {
    let title = title.to_lowercase();
    rules
        .iter()
        .find(|rule| {
            rule.keywords
                .iter()
                .map(|keyword| keyword.trim().to_lowercase())
                .any(|keyword| !keyword.is_empty() && title.contains(&keyword))
        })
        .map(|rule| rule.folder.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_rule_wins() {
        let rules = default_rules();
        // "cita" is listed both under Personal and Salud.
        assert_eq!(categorize("Cita con el dentista", &rules).as_deref(), Some("Personal"));
        // "compra" (Hogar) comes before "comprar" (Compras).
        assert_eq!(categorize("Comprar pan", &rules).as_deref(), Some("Hogar"));
    }

    #[test]
    fn matching_ignores_case() {
        let rules = default_rules();
        assert_eq!(categorize("ESTUDIAR para el EXAMEN", &rules).as_deref(), Some("Estudio"));
        assert_eq!(categorize("Ir al MÉDICO", &rules).as_deref(), Some("Salud"));
    }

    #[test]
    fn no_hit_returns_none() {
        assert_eq!(categorize("Pasear al perro", &default_rules()), None);
        assert_eq!(categorize("Reunión", &[]), None);
    }

    #[test]
    fn custom_rules_and_blank_keywords() {
        let rules = vec![
            CategoryRule::new("Vacío", &["", "  "]),
            CategoryRule::new("Jardín", &["Regar"]),
        ];
        assert_eq!(categorize("regar las plantas", &rules).as_deref(), Some("Jardín"));
        assert_eq!(categorize("otra cosa", &rules), None);
    }
}

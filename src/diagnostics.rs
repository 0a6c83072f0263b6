//! Suggested-fix heuristics.
//!
//! Hints are chosen by substring match on the error text, first match wins.

use std::fmt;

/// Analysis phase that rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Lexical,
    Syntactic,
    Semantic,
}

impl Phase {
    /// Prefix put in front of the error message reported for this phase.
    pub fn error_prefix(&self) -> &'static str {
        match self {
            Phase::Lexical => "Error léxico: ",
            Phase::Syntactic => "Error sintáctico: ",
            Phase::Semantic => "Error semántico: ",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Lexical => "lexical",
            Phase::Syntactic => "syntactic",
            Phase::Semantic => "semantic",
        };
        f.write_str(name)
    }
}

const SYNTACTIC_HINTS: [(&str, &str); 4] = [
    (
        "Se esperaba '.'",
        "Agrega un punto después de 'db': db.nombreColeccion.funcion()",
    ),
    (
        "Se esperaba '('",
        "Agrega paréntesis después de la función: funcion()",
    ),
    ("Se esperaba ')'", "Cierra los paréntesis: funcion(...)"),
    ("Se esperaba '{'", "Usa llaves para objetos: { campo: valor }"),
];

const SEMANTIC_HINTS: [(&str, &str); 5] = [
    (
        "nombre de la base de datos",
        "Usa un nombre válido para la base de datos (sin caracteres especiales)",
    ),
    (
        "nombre de la colección",
        "Usa un nombre válido para la colección (no puede empezar con '$')",
    ),
    (
        "documento a insertar",
        "El documento debe tener al menos un campo: { campo: valor }",
    ),
    (
        "filtro de actualización",
        "Especifica un filtro: { campo: valor }",
    ),
    (
        "operador válido",
        "Usa operadores como $set: { $set: { campo: nuevoValor } }",
    ),
];

fn first_hint(message: &str, hints: &[(&str, &'static str)], fallback: &'static str) -> &'static str {
    hints
        .iter()
        .find(|(pattern, _)| message.contains(pattern))
        .map(|(_, hint)| *hint)
        .unwrap_or(fallback)
}

pub fn lexical_fix(message: &str) -> &'static str {
    if message.contains("token inválido") {
        "Verifica caracteres especiales. Ejemplo correcto: db.usuarios.find()"
    } else {
        "Revisa la sintaxis del comando"
    }
}

pub fn syntactic_fix(message: &str) -> &'static str {
    first_hint(message, &SYNTACTIC_HINTS, "Revisa la sintaxis del comando MongoDB")
}

/// Hint for a soft parse failure, keyed on its first recorded error.
pub fn syntactic_fix_from_errors(errors: &[String]) -> &'static str {
    match errors.first() {
        Some(first) => syntactic_fix(first),
        None => "Comando sintácticamente incorrecto",
    }
}

pub fn semantic_fix(message: &str) -> &'static str {
    first_hint(message, &SEMANTIC_HINTS, "Revisa la lógica del comando")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntactic_hints_follow_priority() {
        assert_eq!(
            syntactic_fix("Se esperaba '.' después de 'db'"),
            "Agrega un punto después de 'db': db.nombreColeccion.funcion()"
        );
        assert_eq!(
            syntactic_fix("Se esperaba ')' después de find"),
            "Cierra los paréntesis: funcion(...)"
        );
        assert_eq!(
            syntactic_fix("Error en filtro: Se esperaba '{' al inicio del documento"),
            "Usa llaves para objetos: { campo: valor }"
        );
        assert_eq!(
            syntactic_fix("comando no reconocido: foo"),
            "Revisa la sintaxis del comando MongoDB"
        );
    }

    #[test]
    fn missing_errors_have_a_generic_hint() {
        assert_eq!(syntactic_fix_from_errors(&[]), "Comando sintácticamente incorrecto");
    }

    #[test]
    fn semantic_hints_match_substrings() {
        assert_eq!(
            semantic_fix("la actualización debe contener al menos un operador válido ($set, $unset, $inc, etc.)"),
            "Usa operadores como $set: { $set: { campo: nuevoValor } }"
        );
        assert_eq!(
            semantic_fix("el filtro de eliminación no puede estar vacío"),
            "Revisa la lógica del comando"
        );
    }
}

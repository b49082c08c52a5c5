// =============================================================================
// VALUE — Les valeurs feuilles d'un arbre propre
// =============================================================================
//
// Une feuille, c'est ce qu'on lit au bout d'un chemin : la valeur d'un
// attribut ou le résultat d'une méthode. Le moteur ne l'interprète jamais,
// il la recopie telle quelle dans l'arbre propre.
//
// Null a un rôle particulier : c'est ce que devient une feuille absente
// (attribut inconnu, méthode inexistante). L'absence n'est pas une erreur.
//
// =============================================================================

use std::fmt;

use serde::Serialize;

/// Une valeur concrète portée par une feuille.
///
/// La sérialisation est « transparente » : `Value::String("a")` devient `"a"`,
/// `Value::Null` devient `null`. C'est ce qui permet à un sérialiseur externe
/// de transformer un arbre propre sans connaître ce type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Retourne la chaîne si la valeur en est une
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

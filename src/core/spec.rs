// =============================================================================
// SPEC — Compilation des chemins pointés
// =============================================================================
//
// Une Spec dit QUOI garder d'une entité. Elle contient deux listes ordonnées
// de chemins pointés :
//
//   attributes : ["username", "family.last_name", "family.business.name"]
//   methods    : ["readableBirthday", "family.business.contactString"]
//
// Un chemin, c'est une séquence de segments :
//   - tous sauf le dernier sont des NOMS DE RELATION (on descend)
//   - le dernier est la FEUILLE (on lit un attribut ou on appelle une méthode)
//
//   family.business.contactString
//   ──┬─── ───┬──── ──────┬──────
//   relation relation   feuille
//
// La compilation découpe sur `.` et refuse tout segment vide. Elle se fait
// UNE fois, avant toute projection : une Spec compilée est immuable et peut
// être partagée entre threads (`&Spec` suffit).
//
// =============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::SpecError;

/// Nature de la feuille d'un chemin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    /// La feuille est lue avec `SourceNode::attribute`
    Attribute,
    /// La feuille est le résultat de `SourceNode::invoke_method`
    Method,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKind::Attribute => write!(f, "attribute"),
            PathKind::Method => write!(f, "method"),
        }
    }
}

/// Un chemin compilé : au moins un segment, aucun segment vide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Compile un chemin brut. `index` est sa position dans la liste,
    /// reprise dans les erreurs.
    pub fn parse(raw: &str, index: usize) -> Result<Self, SpecError> {
        if raw.is_empty() {
            return Err(SpecError::EmptyPath { index });
        }

        let mut segments = Vec::new();
        for (position, segment) in raw.split('.').enumerate() {
            if segment.is_empty() {
                return Err(SpecError::EmptySegment {
                    path: raw.to_string(),
                    index,
                    position,
                });
            }
            segments.push(segment.to_string());
        }

        Ok(Path { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Les relations à traverser (tout sauf la feuille)
    pub fn relations(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// Le segment feuille
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Nombre de segments (toujours ≥ 1)
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Le chemin désigne-t-il directement une feuille (aucune relation) ?
    pub fn is_leaf(&self) -> bool {
        self.segments.len() == 1
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Compile une liste de chemins bruts, dans l'ordre déclaré.
///
/// Une liste vide est acceptée ; c'est `Spec::compile` qui exige qu'au moins
/// une des deux listes soit remplie.
pub fn compile_paths<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Path>, SpecError> {
    raw.iter()
        .enumerate()
        .map(|(index, path)| Path::parse(path.as_ref(), index))
        .collect()
}

/// Une Spec compilée, immuable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    attribute_paths: Vec<Path>,
    method_paths: Vec<Path>,
}

impl Spec {
    /// Compile les deux listes. Échoue si un chemin est mal formé ou si
    /// les deux listes sont vides.
    pub fn compile<A, M>(attributes: &[A], methods: &[M]) -> Result<Self, SpecError>
    where
        A: AsRef<str>,
        M: AsRef<str>,
    {
        let attribute_paths = compile_paths(attributes)?;
        let method_paths = compile_paths(methods)?;

        if attribute_paths.is_empty() && method_paths.is_empty() {
            return Err(SpecError::EmptySpec);
        }

        Ok(Spec {
            attribute_paths,
            method_paths,
        })
    }

    /// Charge une Spec depuis un document JSON `{ "attributes": [...], "methods": [...] }`.
    pub fn from_json(document: &str) -> Result<Self, SpecError> {
        let raw: RawSpec =
            serde_json::from_str(document).map_err(|e| SpecError::Document(e.to_string()))?;
        raw.compile()
    }

    pub fn attribute_paths(&self) -> &[Path] {
        &self.attribute_paths
    }

    pub fn method_paths(&self) -> &[Path] {
        &self.method_paths
    }

    /// Tous les chemins dans l'ordre d'application :
    /// d'abord les attributs, puis les méthodes.
    pub fn paths(&self) -> impl Iterator<Item = (PathKind, &Path)> + '_ {
        self.attribute_paths
            .iter()
            .map(|p| (PathKind::Attribute, p))
            .chain(self.method_paths.iter().map(|p| (PathKind::Method, p)))
    }

    /// Nombre total de chemins
    pub fn len(&self) -> usize {
        self.attribute_paths.len() + self.method_paths.len()
    }

    /// Retour à la forme brute (chaînes pointées)
    pub fn to_raw(&self) -> RawSpec {
        RawSpec {
            attributes: self.attribute_paths.iter().map(|p| p.to_string()).collect(),
            methods: self.method_paths.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Forme brute d'une Spec, telle qu'un hôte l'écrit dans un fichier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSpec {
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
}

impl RawSpec {
    pub fn compile(&self) -> Result<Spec, SpecError> {
        Spec::compile(&self.attributes, &self.methods)
    }
}

impl TryFrom<RawSpec> for Spec {
    type Error = SpecError;

    fn try_from(raw: RawSpec) -> Result<Self, Self::Error> {
        raw.compile()
    }
}

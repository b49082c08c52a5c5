//! Erreurs du moteur : compilation de la Spec et projection.
//!
//! L'absence d'une feuille n'est jamais une erreur (elle devient `null`).
//! Seules deux familles de problèmes remontent à l'appelant :
//! une Spec mal formée, refusée AVANT toute projection, et un conflit de
//! forme sur une relation, qui interrompt l'appel `project` en cours.

use std::fmt;

use thiserror::Error;

/// Erreurs de compilation d'une Spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// Le chemin est une chaîne vide.
    #[error("Chemin vide à l'index {index}")]
    EmptyPath {
        /// Position du chemin dans sa liste.
        index: usize,
    },

    /// Un segment du chemin est vide (`a..b`, `.a`, `a.`).
    #[error("Segment vide en position {position} dans le chemin '{path}' (index {index})")]
    EmptySegment {
        /// Le chemin brut fautif.
        path: String,
        /// Position du chemin dans sa liste.
        index: usize,
        /// Position du segment vide dans le chemin.
        position: usize,
    },

    /// Ni attribut ni méthode : la Spec ne projetterait rien.
    #[error("Spec vide : aucun chemin d'attribut ni de méthode")]
    EmptySpec,

    /// Le document de Spec n'est pas lisible.
    #[error("Document de Spec illisible : {0}")]
    Document(String),
}

impl SpecError {
    /// Code stable pour ce type d'erreur.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyPath { .. } => "EMPTY_PATH",
            Self::EmptySegment { .. } => "EMPTY_SEGMENT",
            Self::EmptySpec => "EMPTY_SPEC",
            Self::Document(_) => "SPEC_DOCUMENT",
        }
    }
}

/// La forme d'un emplacement dans un nœud propre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotShape {
    Leaf,
    Unresolved,
    Null,
    Singular,
    Collection,
}

impl fmt::Display for SlotShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlotShape::Leaf => "feuille",
            SlotShape::Unresolved => "non résolu",
            SlotShape::Null => "null",
            SlotShape::Singular => "nœud unique",
            SlotShape::Collection => "collection",
        };
        write!(f, "{}", name)
    }
}

/// Erreurs d'une projection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("Spec invalide : {0}")]
    InvalidSpec(#[from] SpecError),

    /// Une relation déjà résolue est revisitée avec une autre forme.
    #[error("Conflit de forme sur '{key}' : déjà {existing}, demandé {requested}")]
    ShapeConflict {
        /// Clé canonique de l'emplacement.
        key: String,
        /// Forme déjà en place.
        existing: SlotShape,
        /// Forme demandée par le chemin courant.
        requested: SlotShape,
    },
}

impl ProjectionError {
    /// Code stable pour ce type d'erreur.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSpec(inner) => inner.code(),
            Self::ShapeConflict { .. } => "SHAPE_CONFLICT",
        }
    }
}

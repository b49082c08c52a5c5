// =============================================================================
// LAUNDROMAT — Projection de graphes d'objets en arbres « propres »
// =============================================================================
//
// Laundromat prend un objet source (une entité, ses relations, ses
// collections) et une Spec déclarative de chemins pointés, et construit un
// NOUVEL arbre qui ne contient QUE ce que la Spec autorise.
//
// Architecture :
//   core/     → Le moteur pur (clés, chemins, arbre propre, projection)
//
// Concepts fondamentaux :
//   Spec       = chemins d'attributs + chemins de méthodes (compilés une fois)
//   SourceNode = l'entité à nettoyer (attributs, méthodes, relations)
//   CleanNode  = l'arbre produit, en lecture par clé canonique ou par alias
//   project    = Spec × SourceNode → CleanNode
//
// =============================================================================

pub mod core;

pub use crate::core::clean::{CleanNode, Field};
pub use crate::core::error::{ProjectionError, SlotShape, SpecError};
pub use crate::core::key::normalize;
pub use crate::core::project::{project, project_all};
pub use crate::core::record::Record;
pub use crate::core::source::{Relation, SourceNode};
pub use crate::core::spec::{compile_paths, Path, PathKind, RawSpec, Spec};
pub use crate::core::value::Value;

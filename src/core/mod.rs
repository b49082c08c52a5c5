// =============================================================================
// CORE — Module principal du moteur de projection
// =============================================================================
//
// Ce module regroupe toute la logique pure :
// pas d'ORM, pas de base de données, pas de format de fil — uniquement
// des chemins, des nœuds sources et des arbres propres.
//
// Architecture (des feuilles vers l'orchestrateur) :
//   value    → les valeurs feuilles (String, Int, Bool, Null...)
//   key      → la normalisation des clés (camelCase → snake_case)
//   error    → les erreurs de compilation et de projection
//   spec     → le compilateur de chemins pointés
//   source   → la capacité lue sur les entités sources (trait SourceNode)
//   record   → un SourceNode en mémoire, pour les hôtes et les tests
//   clean    → l'arbre de sortie et ses emplacements de relation
//   resolve  → la descente récursive le long d'un chemin
//   project  → l'orchestrateur (project, project_all)
//
// =============================================================================

pub mod value;
pub mod key;
pub mod error;
pub mod spec;
pub mod source;
pub mod record;
pub mod clean;
pub mod resolve;
pub mod project;

#[cfg(test)]
pub(crate) mod fixtures;

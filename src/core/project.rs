// =============================================================================
// PROJECT — L'orchestrateur : Spec × SourceNode → CleanNode
// =============================================================================
//
// Une projection, c'est :
//   1. un nœud propre vide (la racine)
//   2. chaque chemin d'ATTRIBUT, dans l'ordre déclaré
//   3. chaque chemin de MÉTHODE, dans l'ordre déclaré
//   4. la racine, rendue à l'appelant qui en devient seul propriétaire
//
// L'ordre compte à un seul endroit : si un attribut et une méthode visent
// la même clé finale, la méthode passe après et gagne.
//
// Rien n'est partagé entre deux appels : chaque appel construit son propre
// arbre, la source n'est lue qu'en `&self`, la Spec n'est qu'empruntée.
// On peut donc projeter en parallèle avec la même Spec.
//
// =============================================================================

use tracing::{debug, warn};

use super::clean::CleanNode;
use super::error::ProjectionError;
use super::resolve::resolve;
use super::source::SourceNode;
use super::spec::Spec;

/// Projette une source selon la Spec.
///
/// Les absences (attribut, méthode, relation) deviennent `null` ;
/// seul un conflit de forme interrompt l'appel.
pub fn project<N>(source: &N, spec: &Spec) -> Result<CleanNode, ProjectionError>
where
    N: SourceNode + ?Sized,
{
    debug!(
        attributes = spec.attribute_paths().len(),
        methods = spec.method_paths().len(),
        "projection"
    );

    let mut root = CleanNode::new();
    for (kind, path) in spec.paths() {
        if let Err(err) = resolve(&mut root, source, path, kind) {
            warn!(%path, %kind, error = %err, "projection interrompue");
            return Err(err);
        }
    }

    debug!(keys = root.len(), "projection terminée");
    Ok(root)
}

/// Projette chaque source, en gardant l'ordre et le nombre d'entrées.
///
/// C'est l'équivalent, pour un lot, de `project` appliqué un à un.
/// Le premier conflit de forme interrompt tout le lot.
pub fn project_all<'a, I, N>(sources: I, spec: &Spec) -> Result<Vec<CleanNode>, ProjectionError>
where
    I: IntoIterator<Item = &'a N>,
    N: SourceNode + ?Sized + 'a,
{
    sources
        .into_iter()
        .map(|source| project(source, spec))
        .collect()
}

// =============================================================================
// RESOLVE — Descente récursive le long d'un chemin
// =============================================================================
//
// On marche UN chemin sur UNE paire (nœud propre, nœud source), en
// descendant les deux arbres en parallèle :
//
//   chemin : family.business.contactString
//
//   source :  user ──family──▶ family ──business──▶ business
//   propre :  {}   ──family──▶ {}     ──business──▶ { contact_string: ... }
//
// Algorithme, pour les segments [s0, s1, ..., feuille] :
//   1. Un seul segment → on lit la feuille (attribut ou méthode), on stocke
//      sous la clé normalisée. Absente → null. Si la clé porte déjà une
//      relation, c'est un conflit de forme (dans un sens comme dans l'autre).
//   2. Sinon s0 est une relation, on interroge la source :
//        - Null   → l'emplacement devient null, on S'ARRÊTE (tout le
//                   sous-arbre s'effondre, quels que soient les chemins
//                   qui passent encore par là)
//        - Many   → l'emplacement devient une séquence ; pour chaque élément
//                   (dans l'ordre source), on descend dans le nœud propre
//                   de même index
//        - One    → l'emplacement devient un nœud ; on descend dedans
//
// La nullité est testée AVANT de descendre, à toutes les profondeurs.
//
// =============================================================================

use tracing::{debug, trace};

use super::clean::CleanNode;
use super::error::ProjectionError;
use super::source::{Relation, SourceNode};
use super::spec::{Path, PathKind};
use super::value::Value;

/// Lit la feuille `leaf` sur la source et la stocke dans le nœud propre.
pub fn resolve_leaf<N>(
    clean: &mut CleanNode,
    source: &N,
    leaf: &str,
    kind: PathKind,
) -> Result<(), ProjectionError>
where
    N: SourceNode + ?Sized,
{
    let value = match kind {
        PathKind::Attribute => source.attribute(leaf).unwrap_or(Value::Null),
        PathKind::Method => {
            if source.has_method(leaf) {
                source.invoke_method(leaf)
            } else {
                Value::Null
            }
        }
    };
    clean.set(leaf, value)
}

/// Résout un chemin compilé à partir de la paire (clean, source).
pub fn resolve<N>(
    clean: &mut CleanNode,
    source: &N,
    path: &Path,
    kind: PathKind,
) -> Result<(), ProjectionError>
where
    N: SourceNode + ?Sized,
{
    resolve_segments(clean, source, path.segments(), kind)
}

/// Résout les segments restants d'un chemin.
///
/// Une liste vide ne fait rien (un `Path` compilé n'est jamais vide).
pub fn resolve_segments<N>(
    clean: &mut CleanNode,
    source: &N,
    segments: &[String],
    kind: PathKind,
) -> Result<(), ProjectionError>
where
    N: SourceNode + ?Sized,
{
    let (relation, remainder) = match segments {
        [] => return Ok(()),
        [leaf] => return resolve_leaf(clean, source, leaf, kind),
        [relation, remainder @ ..] => (relation.as_str(), remainder),
    };

    let target = source.relation(relation);
    trace!(relation, shape = target.shape(), "relation lue sur la source");

    match target {
        Relation::Null => {
            debug!(relation, "relation nulle, sous-arbre court-circuité");
            clean.resolve_as_null(relation)
        }
        Relation::Many(items) => {
            trace!(relation, items = items.len(), "relation multiple");
            let nodes = clean.resolve_as_collection(relation)?;
            for (index, item) in items.into_iter().enumerate() {
                let child = CleanNode::child_at(nodes, index);
                resolve_segments(child, item, remainder, kind)?;
            }
            Ok(())
        }
        Relation::One(target) => {
            let child = clean.resolve_as_singular(relation)?;
            resolve_segments(child, target, remainder, kind)
        }
    }
}

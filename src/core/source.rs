// =============================================================================
// SOURCE — Ce que le moteur lit sur une entité source
// =============================================================================
//
// Le moteur ne connaît AUCUN modèle concret. Il ne voit les entités qu'à
// travers une capacité explicite, par nom :
//
//   attribute(name)     → Some(valeur) | None (attribut inconnu)
//   has_method(name)    → la méthode existe-t-elle ?
//   invoke_method(name) → la valeur calculée
//   relation(name)      → Null | One(nœud) | Many([nœuds])
//
// Chaque type d'entité de l'hôte implémente ce trait (à la main ou via
// `Record`). La lecture est en `&self` : une projection ne modifie jamais
// le graphe source.
//
// PRÉCONDITION : le long d'un chemin, la chaîne de relations est acyclique.
// Ce n'est pas vérifié à l'exécution ; la profondeur est de toute façon
// bornée par la longueur du chemin.
//
// =============================================================================

use super::value::Value;

/// La valeur d'une relation nommée sur un nœud source.
pub enum Relation<'a> {
    /// Relation absente (ou inconnue)
    Null,
    /// Relation vers un seul nœud
    One(&'a dyn SourceNode),
    /// Relation vers une séquence ordonnée de nœuds
    Many(Vec<&'a dyn SourceNode>),
}

impl Relation<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, Relation::Null)
    }

    /// Nom de la forme (champ `shape` des traces de résolution)
    pub fn shape(&self) -> &'static str {
        match self {
            Relation::Null => "null",
            Relation::One(_) => "one",
            Relation::Many(_) => "many",
        }
    }
}

impl std::fmt::Debug for Relation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Null => write!(f, "Null"),
            Relation::One(_) => write!(f, "One(..)"),
            Relation::Many(items) => write!(f, "Many({} items)", items.len()),
        }
    }
}

/// Adaptateur en lecture seule sur une entité de l'hôte.
///
/// Les noms reçus sont les segments de la Spec, tels qu'écrits
/// (pas normalisés) : `readableBirthday` arrive sous cette forme.
pub trait SourceNode {
    /// Valeur d'un attribut, `None` s'il n'existe pas.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// La méthode `name` existe-t-elle sur ce nœud ?
    fn has_method(&self, name: &str) -> bool;

    /// Appelle la méthode `name`. N'est appelée qu'après `has_method`;
    /// une méthode inconnue rend `Value::Null`.
    fn invoke_method(&self, name: &str) -> Value;

    /// La relation `name`. Une relation inconnue est `Relation::Null`.
    fn relation(&self, name: &str) -> Relation<'_>;
}

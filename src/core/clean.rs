// =============================================================================
// CLEAN — L'arbre propre produit par une projection
// =============================================================================
//
// Un CleanNode est une table ordonnée clé canonique → Field.
// Un Field est l'une de ces formes :
//
//   Value(v)    → une feuille (Value::Null si absente sur la source)
//   Unresolved  → emplacement de relation créé, pas encore résolu
//   Null        → relation nulle : tout le sous-arbre s'effondre en null
//   One(node)   → relation vers un seul nœud propre
//   Many(nodes) → relation vers une séquence de nœuds propres
//
// MACHINE À ÉTATS d'un emplacement de relation (transitions à sens unique) :
//
//                  ┌──▶ Null
//   Unresolved ────┼──▶ One(node)
//                  └──▶ Many([...])
//
// Revenir sur une forme résolue avec une AUTRE forme est un conflit
// (ShapeConflict) : on interrompt plutôt que d'écraser en silence.
// Feuille et relation ne partagent jamais une clé, dans un sens comme
// dans l'autre ; entre feuilles, la dernière écriture gagne.
//
// DOUBLE NOMMAGE : toute lecture passe par `normalize`, donc
// `get("readableBirthday")` et `get("readable_birthday")` lisent la même clé.
//
// =============================================================================

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::error::{ProjectionError, SlotShape};
use super::key::normalize;
use super::value::Value;

/// Contenu d'une clé dans un nœud propre.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Value(Value),
    Unresolved,
    Null,
    One(CleanNode),
    Many(Vec<CleanNode>),
}

impl Field {
    pub fn shape(&self) -> SlotShape {
        match self {
            Field::Value(_) => SlotShape::Leaf,
            Field::Unresolved => SlotShape::Unresolved,
            Field::Null => SlotShape::Null,
            Field::One(_) => SlotShape::Singular,
            Field::Many(_) => SlotShape::Collection,
        }
    }

    /// Vrai pour une feuille nulle comme pour une relation nulle
    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null | Field::Value(Value::Null))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&CleanNode> {
        match self {
            Field::One(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_nodes(&self) -> Option<&[CleanNode]> {
        match self {
            Field::Many(nodes) => Some(nodes),
            _ => None,
        }
    }
}

/// Un nœud de l'arbre propre. Les clés gardent leur ordre d'insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanNode {
    entries: Vec<(String, Field)>,
}

impl CleanNode {
    pub fn new() -> Self {
        CleanNode::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    // -------------------------------------------------------------------------
    // Lecture (double nommage)
    // -------------------------------------------------------------------------

    /// Lit une clé par son nom canonique ou par n'importe quel alias
    /// qui se normalise vers lui.
    pub fn get(&self, name: &str) -> Option<&Field> {
        let key = normalize(name);
        self.position(&key).map(|i| &self.entries[i].1)
    }

    /// La feuille sous `name`, si c'en est une
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(Field::as_value)
    }

    /// Le nœud unique sous `name`, si c'en est un
    pub fn node(&self, name: &str) -> Option<&CleanNode> {
        self.get(name).and_then(Field::as_node)
    }

    /// La séquence de nœuds sous `name`, si c'en est une
    pub fn nodes(&self, name: &str) -> Option<&[CleanNode]> {
        self.get(name).and_then(Field::as_nodes)
    }

    /// La clé existe ET vaut null (feuille ou relation)
    pub fn is_null(&self, name: &str) -> bool {
        self.get(name).map(Field::is_null).unwrap_or(false)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Les clés présentes, dans l'ordre d'insertion
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> + '_ {
        self.entries.iter().map(|(k, f)| (k.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // -------------------------------------------------------------------------
    // Écriture
    // -------------------------------------------------------------------------

    /// Stocke une feuille. Entre feuilles, le dernier qui écrit une clé gagne ;
    /// une clé déjà occupée par une relation n'est jamais écrasée.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), ProjectionError> {
        let key = normalize(name);
        match self.position(&key) {
            Some(i) => match &mut self.entries[i].1 {
                Field::Value(existing) => *existing = value,
                relation => return Err(conflict(&key, relation.shape(), SlotShape::Leaf)),
            },
            None => self.entries.push((key, Field::Value(value))),
        }
        Ok(())
    }

    /// Emplacement de relation sous `key` (déjà normalisée) : l'existant, ou
    /// un nouveau `Unresolved`. Une feuille ne devient jamais une relation.
    fn slot(&mut self, key: &str, requested: SlotShape) -> Result<&mut Field, ProjectionError> {
        let index = match self.position(key) {
            Some(i) => i,
            None => {
                self.entries.push((key.to_string(), Field::Unresolved));
                self.entries.len() - 1
            }
        };

        let field = &mut self.entries[index].1;
        if let Field::Value(_) = field {
            return Err(conflict(key, SlotShape::Leaf, requested));
        }
        Ok(field)
    }

    /// Rend l'emplacement de relation `name`, en le créant si besoin.
    /// `requested` est la forme visée, reportée dans un éventuel conflit.
    pub fn relation_slot(
        &mut self,
        name: &str,
        requested: SlotShape,
    ) -> Result<&mut Field, ProjectionError> {
        self.slot(&normalize(name), requested)
    }

    /// Unresolved → Null. Sans effet si déjà Null.
    pub fn resolve_as_null(&mut self, name: &str) -> Result<(), ProjectionError> {
        let key = normalize(name);
        let field = self.slot(&key, SlotShape::Null)?;
        match field.shape() {
            SlotShape::Unresolved | SlotShape::Null => {
                *field = Field::Null;
                Ok(())
            }
            existing => Err(conflict(&key, existing, SlotShape::Null)),
        }
    }

    /// Unresolved → One(nœud vide). Rend le nœud (existant ou nouveau).
    pub fn resolve_as_singular(&mut self, name: &str) -> Result<&mut CleanNode, ProjectionError> {
        let key = normalize(name);
        let field = self.slot(&key, SlotShape::Singular)?;
        if let Field::Unresolved = field {
            *field = Field::One(CleanNode::new());
        }
        match field {
            Field::One(node) => Ok(node),
            other => Err(conflict(&key, other.shape(), SlotShape::Singular)),
        }
    }

    /// Unresolved → Many([]). Sans effet si déjà une séquence.
    pub fn resolve_as_collection(
        &mut self,
        name: &str,
    ) -> Result<&mut Vec<CleanNode>, ProjectionError> {
        let key = normalize(name);
        let field = self.slot(&key, SlotShape::Collection)?;
        if let Field::Unresolved = field {
            *field = Field::Many(Vec::new());
        }
        match field {
            Field::Many(nodes) => Ok(nodes),
            other => Err(conflict(&key, other.shape(), SlotShape::Collection)),
        }
    }

    /// Le nœud à la position `index` d'une séquence, créé si absent
    /// (la séquence grandit jusqu'à `index + 1`).
    pub fn child_at(nodes: &mut Vec<CleanNode>, index: usize) -> &mut CleanNode {
        if nodes.len() <= index {
            nodes.resize_with(index + 1, CleanNode::new);
        }
        &mut nodes[index]
    }
}

fn conflict(key: &str, existing: SlotShape, requested: SlotShape) -> ProjectionError {
    ProjectionError::ShapeConflict {
        key: key.to_string(),
        existing,
        requested,
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => v.serialize(serializer),
            Field::Unresolved | Field::Null => serializer.serialize_none(),
            Field::One(node) => node.serialize(serializer),
            Field::Many(nodes) => nodes.serialize(serializer),
        }
    }
}

impl Serialize for CleanNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, field) in &self.entries {
            map.serialize_entry(key, field)?;
        }
        map.end()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Value(v) => write!(f, "{}", v),
            Field::Unresolved => write!(f, "?"),
            Field::Null => write!(f, "null"),
            Field::One(node) => write!(f, "{}", node),
            Field::Many(nodes) => {
                write!(f, "[")?;
                for (i, node) in nodes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", node)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl fmt::Display for CleanNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, field)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}: {}", key, field)?;
        }
        if !self.entries.is_empty() {
            write!(f, " ")?;
        }
        write!(f, "}}")
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_overwrites() {
        let mut node = CleanNode::new();
        node.set("contact_string", Value::from("attr")).unwrap();
        node.set("contactString", Value::from("method")).unwrap();
        assert_eq!(node.len(), 1);
        assert_eq!(node.value("contact_string"), Some(&Value::from("method")));
    }

    #[test]
    fn test_dual_naming() {
        let mut node = CleanNode::new();
        node.set("readableBirthday", Value::from("Jul 15, 1985")).unwrap();
        assert_eq!(node.keys().collect::<Vec<_>>(), vec!["readable_birthday"]);
        assert_eq!(node.get("readableBirthday"), node.get("readable_birthday"));
        assert!(node.contains_key("ReadableBirthday"));
    }

    #[test]
    fn test_keys_keep_insertion_order() {
        let mut node = CleanNode::new();
        node.set("username", Value::from("bettylou")).unwrap();
        node.resolve_as_null("family").unwrap();
        node.set("favoriteColorString", Value::Null).unwrap();
        assert_eq!(
            node.keys().collect::<Vec<_>>(),
            vec!["username", "family", "favorite_color_string"]
        );
    }

    #[test]
    fn test_relation_slot_is_created_once() {
        let mut node = CleanNode::new();
        assert_eq!(node.relation_slot("family", SlotShape::Singular).unwrap(), &Field::Unresolved);
        assert_eq!(node.relation_slot("family", SlotShape::Singular).unwrap(), &Field::Unresolved);
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn test_singular_transition() {
        let mut node = CleanNode::new();
        node.resolve_as_singular("family")
            .unwrap()
            .set("last_name", Value::from("McGraw"))
            .unwrap();
        // Revisiter avec la même forme rend le même nœud
        node.resolve_as_singular("family")
            .unwrap()
            .set("state", Value::from("Kentucky"))
            .unwrap();

        let family = node.node("family").unwrap();
        assert_eq!(family.len(), 2);
        assert_eq!(family.value("state"), Some(&Value::from("Kentucky")));
    }

    #[test]
    fn test_collection_transition_and_growth() {
        let mut node = CleanNode::new();
        let users = node.resolve_as_collection("users").unwrap();
        CleanNode::child_at(users, 1)
            .set("username", Value::from("littlejohny"))
            .unwrap();
        assert_eq!(users.len(), 2);
        assert!(users[0].is_empty());

        // Sans effet si déjà une séquence
        let users = node.resolve_as_collection("users").unwrap();
        CleanNode::child_at(users, 0).set("username", Value::from("bettylou")).unwrap();
        assert_eq!(node.nodes("users").unwrap().len(), 2);
        assert_eq!(
            node.nodes("users").unwrap()[0].value("username"),
            Some(&Value::from("bettylou"))
        );
    }

    #[test]
    fn test_null_is_idempotent() {
        let mut node = CleanNode::new();
        node.resolve_as_null("family").unwrap();
        node.resolve_as_null("family").unwrap();
        assert!(node.is_null("family"));
        assert_eq!(node.get("family"), Some(&Field::Null));
    }

    #[test]
    fn test_shape_conflicts() {
        let mut node = CleanNode::new();
        node.resolve_as_singular("family").unwrap();
        assert_eq!(
            node.resolve_as_collection("family").unwrap_err(),
            ProjectionError::ShapeConflict {
                key: "family".into(),
                existing: SlotShape::Singular,
                requested: SlotShape::Collection,
            }
        );
        assert!(node.resolve_as_null("family").is_err());

        node.resolve_as_collection("users").unwrap();
        assert!(node.resolve_as_singular("users").is_err());

        node.resolve_as_null("business").unwrap();
        assert!(node.resolve_as_collection("business").is_err());
        assert!(node.resolve_as_singular("business").is_err());
    }

    #[test]
    fn test_leaf_cannot_become_relation() {
        let mut node = CleanNode::new();
        node.set("family", Value::Null).unwrap();
        let err = node.resolve_as_singular("family").unwrap_err();
        assert_eq!(err.code(), "SHAPE_CONFLICT");
        assert_eq!(
            node.relation_slot("family", SlotShape::Collection).unwrap_err(),
            ProjectionError::ShapeConflict {
                key: "family".into(),
                existing: SlotShape::Leaf,
                requested: SlotShape::Collection,
            }
        );
    }

    #[test]
    fn test_relation_cannot_become_leaf() {
        let mut node = CleanNode::new();
        node.resolve_as_singular("family")
            .unwrap()
            .set("last_name", Value::from("McGraw"))
            .unwrap();
        node.resolve_as_collection("users").unwrap();
        node.resolve_as_null("business").unwrap();

        for (name, existing) in [
            ("family", SlotShape::Singular),
            ("users", SlotShape::Collection),
            ("business", SlotShape::Null),
        ] {
            assert_eq!(
                node.set(name, Value::Null).unwrap_err(),
                ProjectionError::ShapeConflict {
                    key: name.into(),
                    existing,
                    requested: SlotShape::Leaf,
                }
            );
        }
        // Le sous-arbre déjà projeté est intact
        assert_eq!(
            node.node("family").unwrap().value("last_name"),
            Some(&Value::from("McGraw"))
        );
    }

    #[test]
    fn test_serialize() {
        let mut node = CleanNode::new();
        node.set("username", Value::from("bettylou")).unwrap();
        node.resolve_as_singular("family")
            .unwrap()
            .set("last_name", Value::from("McGraw"))
            .unwrap();
        let users = node.resolve_as_collection("users").unwrap();
        CleanNode::child_at(users, 0).set("username", Value::from("a")).unwrap();
        node.resolve_as_null("business").unwrap();

        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            serde_json::json!({
                "username": "bettylou",
                "family": { "last_name": "McGraw" },
                "users": [{ "username": "a" }],
                "business": null,
            })
        );
    }

    #[test]
    fn test_display() {
        let mut node = CleanNode::new();
        node.set("username", Value::from("bettylou")).unwrap();
        node.resolve_as_null("family").unwrap();
        assert_eq!(node.to_string(), "{ username: \"bettylou\", family: null }");
        assert_eq!(CleanNode::new().to_string(), "{}");
    }
}

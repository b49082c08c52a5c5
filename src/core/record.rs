// =============================================================================
// RECORD — Une entité source en mémoire
// =============================================================================
//
// Record est l'implémentation de SourceNode fournie avec le moteur. Elle
// sert aux hôtes qui n'ont pas (ou pas encore) d'ORM, au binaire de
// démonstration et aux tests.
//
// Un Record contient :
//   - des ATTRIBUTS   : nom → Value
//   - des MÉTHODES    : nom → fonction calculée à partir du Record
//   - des RELATIONS   : nom → Null | un Record | une séquence de Records
//
// EXEMPLE :
//   User { username: "bettylou", favorite_color: "pink" }
//     ├── favoriteColorString() = "My favorite color is pink"
//     └── family ──▶ Family { last_name: "McGraw" }
//                      └── business ──▶ Business { name: "..." }
//
// Les Records liés sont partagés via Arc : la même famille peut être
// référencée par plusieurs utilisateurs sans copie.
//
// =============================================================================

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::source::{Relation, SourceNode};
use super::value::Value;

/// Une méthode calculée : lit le Record, rend une Value.
pub type Method = Arc<dyn Fn(&Record) -> Value + Send + Sync>;

/// Cible d'une relation stockée dans un Record
#[derive(Clone)]
enum Link {
    Null,
    One(Arc<Record>),
    Many(Vec<Arc<Record>>),
}

/// Entité source en mémoire, construite par chaînage.
#[derive(Clone, Default)]
pub struct Record {
    /// Nom du type d'entité (User, Family...) — purement informatif
    kind: String,
    attributes: HashMap<String, Value>,
    methods: HashMap<String, Method>,
    relations: HashMap<String, Link>,
}

impl Record {
    pub fn new(kind: &str) -> Self {
        Record {
            kind: kind.to_string(),
            ..Record::default()
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Ajoute (ou remplace) un attribut
    pub fn with_attribute(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Ajoute une méthode calculée
    pub fn with_method<F>(mut self, name: &str, method: F) -> Self
    where
        F: Fn(&Record) -> Value + Send + Sync + 'static,
    {
        self.methods.insert(name.to_string(), Arc::new(method));
        self
    }

    /// Relation vers un seul Record
    pub fn with_one(self, name: &str, target: Record) -> Self {
        self.with_shared(name, Arc::new(target))
    }

    /// Relation vers un Record déjà partagé
    pub fn with_shared(mut self, name: &str, target: Arc<Record>) -> Self {
        self.relations.insert(name.to_string(), Link::One(target));
        self
    }

    /// Relation vers une séquence ordonnée de Records
    pub fn with_many(mut self, name: &str, targets: Vec<Record>) -> Self {
        let targets = targets.into_iter().map(Arc::new).collect();
        self.relations.insert(name.to_string(), Link::Many(targets));
        self
    }

    /// Relation déclarée mais vide (ex: FK à NULL)
    pub fn with_null(mut self, name: &str) -> Self {
        self.relations.insert(name.to_string(), Link::Null);
        self
    }

    /// Lecture d'un attribut texte, chaîne vide s'il manque
    pub fn text(&self, name: &str) -> String {
        match self.attributes.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

impl SourceNode for Record {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }

    fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    fn invoke_method(&self, name: &str) -> Value {
        match self.methods.get(name) {
            Some(method) => method(self),
            None => Value::Null,
        }
    }

    fn relation(&self, name: &str) -> Relation<'_> {
        match self.relations.get(name) {
            Some(Link::One(target)) => Relation::One(&**target),
            Some(Link::Many(targets)) => Relation::Many(
                targets
                    .iter()
                    .map(|t| &**t as &dyn SourceNode)
                    .collect(),
            ),
            Some(Link::Null) | None => Relation::Null,
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&String> = self.methods.keys().collect();
        methods.sort();
        let mut relations: Vec<&String> = self.relations.keys().collect();
        relations.sort();

        f.debug_struct("Record")
            .field("kind", &self.kind)
            .field("attributes", &self.attributes)
            .field("methods", &methods)
            .field("relations", &relations)
            .finish()
    }
}

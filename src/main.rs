// =============================================================================
// LAUNDROMAT — Point d'entrée : démonstration du moteur de projection
// =============================================================================
//
// Ce main.rs montre un exemple complet :
//   1. Construire un graphe source (famille, entreprise, utilisateurs)
//   2. Charger deux Specs depuis des documents JSON
//   3. Projeter un utilisateur (relations simples, méthodes)
//   4. Projeter une famille (relation multiple)
//   5. Projeter un lot d'utilisateurs (project_all)
//
// Les logs du moteur sont visibles avec RUST_LOG=laundromat=trace.
//
// =============================================================================

use std::sync::Arc;

use anyhow::Context;
use laundromat::{project, project_all, CleanNode, Record, Spec, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CLEAN_USER: &str = r#"{
    "attributes": ["username", "favorite_color", "family.last_name", "family.business.name"],
    "methods": ["favoriteColorString", "family.placeString", "family.business.contactString"]
}"#;

const CLEAN_FAMILY: &str = r#"{
    "attributes": ["state", "users.username", "business.name"],
    "methods": ["placeString", "users.favoriteColorString"]
}"#;

fn business() -> Record {
    Record::new("Business")
        .with_attribute("name", "Uncanny Creek Banjo and Moonshine Emporium")
        .with_attribute("address", "123 S. River Road")
        .with_attribute("phone_number", "12345678")
        .with_method("contactString", |b| {
            Value::from(format!("{}, {}", b.text("address"), b.text("phone_number")))
        })
}

fn family() -> Record {
    Record::new("Family")
        .with_attribute("last_name", "McGraw")
        .with_attribute("location", "Uncanny Creek")
        .with_attribute("state", "Kentucky")
        .with_one("business", business())
        .with_method("placeString", |f| {
            Value::from(format!("{}, {}", f.text("location"), f.text("state")))
        })
}

fn user(username: &str, ssn: &str, color: &str, family: Arc<Record>) -> Record {
    Record::new("User")
        .with_attribute("username", username)
        .with_attribute("ssn", ssn)
        .with_attribute("favorite_color", color)
        .with_shared("family", family)
        .with_method("favoriteColorString", |u| {
            Value::from(format!("My favorite color is {}", u.text("favorite_color")))
        })
}

fn show(title: &str, node: &CleanNode) -> anyhow::Result<()> {
    println!("--- {} ---", title);
    println!("{}", serde_json::to_string_pretty(node)?);
    println!();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "laundromat=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("╔══════════════════════════════════════════════════╗");
    println!("║      LAUNDROMAT — Projection d'objets propres    ║");
    println!("╚══════════════════════════════════════════════════╝\n");

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 1 : Le graphe source
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 1 : Graphe source ═══\n");

    let shared_family = Arc::new(family());
    let users = vec![
        user("bettylou", "123-45-6789", "pink", Arc::clone(&shared_family)),
        user("littlejohny", "234-56-7890", "black", Arc::clone(&shared_family)),
    ];
    let family_with_users = family().with_many("users", users.clone());

    println!("{:#?}\n", users[0]);

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 2 : Les Specs
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 2 : Specs ═══\n");

    let clean_user = Spec::from_json(CLEAN_USER).context("Spec CleanUser")?;
    let clean_family = Spec::from_json(CLEAN_FAMILY).context("Spec CleanFamily")?;
    println!("CleanUser   : {:?}", clean_user.to_raw());
    println!("CleanFamily : {:?}\n", clean_family.to_raw());

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 3 : Projection d'un utilisateur
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 3 : Projection d'un utilisateur ═══\n");

    let clean = project(&users[0], &clean_user)?;
    show("bettylou", &clean)?;
    println!(
        "Accès par alias : favoriteColorString = {}\n",
        clean
            .value("favoriteColorString")
            .cloned()
            .unwrap_or(Value::Null)
    );

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 4 : Projection d'une famille (relation multiple)
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 4 : Projection d'une famille ═══\n");

    let clean = project(&family_with_users, &clean_family)?;
    show("McGraw", &clean)?;

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 5 : Projection d'un lot
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 5 : Projection d'un lot ═══\n");

    let cleaned = project_all(&users, &clean_user)?;
    for node in &cleaned {
        println!("{}", node);
    }

    println!("\n═══════════════════════════════════════════════════");
    println!("  {} utilisateurs projetés, {} chemins par projection", cleaned.len(), clean_user.len());
    println!("═══════════════════════════════════════════════════");

    Ok(())
}

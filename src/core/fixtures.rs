// =============================================================================
// FIXTURES — Le graphe de test commun (utilisateurs, famille, entreprise)
// =============================================================================
//
//   Family "McGraw" ──business──▶ Business "Uncanny Creek Banjo..."
//      │
//      └──users──▶ [ bettylou, littlejohny ]
//                       │
//                       └──family──▶ Family "McGraw" (sans users)
//
// Le graphe reste acyclique : la famille vue depuis un utilisateur ne
// porte pas la relation `users`.
//
// =============================================================================

use std::sync::Arc;

use super::record::Record;
use super::spec::Spec;
use super::value::Value;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// "1985-07-15" → "Jul 15, 1985"
pub fn formatted_date(iso: &str) -> String {
    let parts: Vec<&str> = iso.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => {
            let month = month
                .parse::<usize>()
                .ok()
                .and_then(|m| MONTHS.get(m.wrapping_sub(1)))
                .copied()
                .unwrap_or("???");
            let day = day.trim_start_matches('0');
            format!("{} {}, {}", month, day, year)
        }
        _ => iso.to_string(),
    }
}

pub fn business() -> Record {
    Record::new("Business")
        .with_attribute("id", 1i64)
        .with_attribute("name", "Uncanny Creek Banjo and Moonshine Emporium")
        .with_attribute("address", "123 S. River Road")
        .with_attribute("phone_number", "12345678")
        .with_attribute("family_id", 1i64)
        .with_method("contactString", |b| {
            Value::from(format!("{}, {}", b.text("address"), b.text("phone_number")))
        })
        .with_method("addressString", |b| {
            Value::from(format!("{}, Located at: {}", b.text("name"), b.text("address")))
        })
}

/// La famille telle que vue depuis un utilisateur (sans `users`)
pub fn family_core() -> Record {
    Record::new("Family")
        .with_attribute("id", 1i64)
        .with_attribute("last_name", "McGraw")
        .with_attribute("location", "Uncanny Creek")
        .with_attribute("state", "Kentucky")
        .with_one("business", business())
        .with_method("placeString", |f| {
            Value::from(format!("{}, {}", f.text("location"), f.text("state")))
        })
}

fn user(id: i64, username: &str, ssn: &str, color: &str, birthday: &str, family: Arc<Record>) -> Record {
    Record::new("User")
        .with_attribute("id", id)
        .with_attribute("username", username)
        .with_attribute("email", format!("{}@example.com", username))
        .with_attribute("ssn", ssn)
        .with_attribute("password", "$2y$10$hash")
        .with_attribute("favorite_color", color)
        .with_attribute("birthday", birthday)
        .with_attribute("family_id", 1i64)
        .with_shared("family", family)
        .with_method("favoriteColorString", |u| {
            Value::from(format!("My favorite color is {}", u.text("favorite_color")))
        })
        .with_method("readableBirthday", |u| Value::from(formatted_date(&u.text("birthday"))))
}

pub fn bettylou() -> Record {
    user(1, "bettylou", "123-45-6789", "pink", "1985-07-15", Arc::new(family_core()))
}

pub fn littlejohny() -> Record {
    user(2, "littlejohny", "234-56-7890", "black", "1987-10-25", Arc::new(family_core()))
}

/// Les utilisateurs de la famille, dans l'ordre de création
pub fn family_users() -> Vec<Record> {
    vec![bettylou(), littlejohny()]
}

pub fn family() -> Record {
    family_core().with_many("users", family_users())
}

/// Un utilisateur dont la famille n'a pas d'entreprise
pub fn user_without_business() -> Record {
    let family = family_core().with_null("business");
    user(3, "loner", "000-00-0000", "grey", "1990-01-02", Arc::new(family))
}

/// Un utilisateur sans famille
pub fn orphan() -> Record {
    Record::new("User")
        .with_attribute("username", "orphan")
        .with_null("family")
}

pub fn clean_user() -> Spec {
    Spec::compile(
        &["username", "favorite_color", "family.last_name", "family.business.name"],
        &[
            "favoriteColorString",
            "readableBirthday",
            "family.placeString",
            "family.business.contactString",
        ],
    )
    .unwrap()
}

pub fn strict_clean_user() -> Spec {
    Spec::compile(
        &["username", "family.business.name", "invalid_property"],
        &["family.business.contactString", "invalidMethod"],
    )
    .unwrap()
}

pub fn broken_clean_user() -> Spec {
    Spec::compile(&["invalidRelationship.property"], &[] as &[&str]).unwrap()
}

pub fn clean_family() -> Spec {
    Spec::compile(
        &["state", "users.username", "users.birthday"],
        &["users.readableBirthday"],
    )
    .unwrap()
}

#[test]
fn test_formatted_date() {
    assert_eq!(formatted_date("1985-07-15"), "Jul 15, 1985");
    assert_eq!(formatted_date("1987-10-25"), "Oct 25, 1987");
    assert_eq!(formatted_date("n/a"), "n/a");
}

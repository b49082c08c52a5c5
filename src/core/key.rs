// =============================================================================
// KEY — Normalisation des clés de l'arbre propre
// =============================================================================
//
// Un segment de chemin peut être écrit en snake_case (`favorite_color`) ou
// « à la méthode » en camelCase (`favoriteColorString`). Dans l'arbre propre,
// on ne stocke qu'UNE forme : la forme canonique snake_case.
//
// La même fonction sert dans les deux sens :
//   - à l'écriture, pour choisir la clé stockée
//   - à la lecture, pour qu'un alias camelCase retrouve la même clé
//
// PROPRIÉTÉ : idempotence. normalize(normalize(x)) == normalize(x).
// Une forme canonique ne contient ni majuscule ni espace, donc elle
// ressort telle quelle.
//
// =============================================================================

/// Canonicalise un segment en clé snake_case.
///
/// - un segment sans majuscule ni espace est rendu tel quel
/// - chaque majuscule qui suit un caractère reçoit un `_` devant elle
///   (sauf si ce caractère est déjà un `_`)
/// - les espaces séparent des mots, comme une majuscule
/// - le tout est mis en minuscules
///
/// ```
/// use laundromat::normalize;
/// assert_eq!(normalize("favoriteColorString"), "favorite_color_string");
/// assert_eq!(normalize("last_name"), "last_name");
/// ```
pub fn normalize(segment: &str) -> String {
    if is_canonical(segment) {
        return segment.to_string();
    }

    let mut out = String::with_capacity(segment.len() + 4);
    let mut new_word = false;

    for c in segment.chars() {
        if c.is_whitespace() {
            new_word = true;
            continue;
        }
        let boundary = c.is_uppercase() || new_word;
        if boundary && !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
        out.extend(c.to_lowercase());
        new_word = false;
    }

    out
}

/// Le segment est-il déjà sous forme canonique ?
pub fn is_canonical(segment: &str) -> bool {
    !segment
        .chars()
        .any(|c| c.is_uppercase() || c.is_whitespace())
}

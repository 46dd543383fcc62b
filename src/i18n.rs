//! Static interface text, keyed by locale then message key.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Locale used when the requested one is unknown or lacks a key.
pub(crate) const FALLBACK_LANGUAGE: &str = "fr";

type Messages = HashMap<&'static str, &'static str>;

const FR: &[(&str, &str)] = &[
    ("title", "Email Finder"),
    ("subtitle", "Trouvez facilement des adresses email professionnelles"),
    ("firstName", "Prénom"),
    ("lastName", "Nom"),
    ("domain", "Domaine"),
    ("addPerson", "Ajouter la personne"),
    ("generateEmails", "Générer les emails"),
    ("peopleList", "Personnes ajoutées"),
    ("noPersonsAdded", "Aucune personne ajoutée. Utilisez le formulaire ci-dessus pour ajouter des personnes."),
    ("removePerson", "Supprimer"),
    ("results", "Suggestions d'emails"),
    ("noResults", "Ajoutez des personnes pour générer des suggestions d'emails."),
    ("fillAllFields", "Veuillez remplir tous les champs."),
    ("invalidDomain", "Le domaine saisi est invalide (ex: entreprise.com)."),
    ("invalidFormat", "Format invalide. Utilisez : Prénom Nom, Prénom Nom @ domaine.com"),
    ("personNotFound", "Personne introuvable."),
    ("copyEmails", "Copier les emails"),
    ("copyAllEmails", "Copier tous les emails"),
    ("copied", "Copié !"),
    ("copyError", "Erreur de copie"),
    ("skippedRecords", "Entrées ignorées"),
    ("openSource", "Projet Open Source"),
    ("copyright", "© 2025 Email Finder"),
];

const EN: &[(&str, &str)] = &[
    ("title", "Email Finder"),
    ("subtitle", "Easily find professional email addresses"),
    ("firstName", "First name"),
    ("lastName", "Last name"),
    ("domain", "Domain"),
    ("addPerson", "Add person"),
    ("generateEmails", "Generate emails"),
    ("peopleList", "Added people"),
    ("noPersonsAdded", "No person added yet. Use the form above to add people."),
    ("removePerson", "Remove"),
    ("results", "Email suggestions"),
    ("noResults", "Add people to generate email suggestions."),
    ("fillAllFields", "Please fill in all fields."),
    ("invalidDomain", "The domain entered is invalid (e.g. company.com)."),
    ("invalidFormat", "Invalid format. Use: First Last, First Last @ domain.com"),
    ("personNotFound", "Person not found."),
    ("copyEmails", "Copy emails"),
    ("copyAllEmails", "Copy all emails"),
    ("copied", "Copied!"),
    ("copyError", "Copy error"),
    ("skippedRecords", "Skipped records"),
    ("openSource", "Open Source Project"),
    ("copyright", "© 2025 Email Finder"),
];

const ES: &[(&str, &str)] = &[
    ("title", "Email Finder"),
    ("subtitle", "Encuentra fácilmente direcciones de correo electrónico profesionales"),
    ("firstName", "Nombre"),
    ("lastName", "Apellido"),
    ("domain", "Dominio"),
    ("addPerson", "Agregar persona"),
    ("generateEmails", "Generar correos"),
    ("peopleList", "Personas agregadas"),
    ("noPersonsAdded", "Ninguna persona agregada. Use el formulario de arriba para agregar personas."),
    ("removePerson", "Eliminar"),
    ("results", "Sugerencias de correo"),
    ("noResults", "Agrega personas para generar sugerencias de correo electrónico."),
    ("fillAllFields", "Por favor complete todos los campos."),
    ("invalidDomain", "El dominio ingresado no es válido (ej: empresa.com)."),
    ("invalidFormat", "Formato inválido. Use: Nombre Apellido, Nombre Apellido @ dominio.com"),
    ("personNotFound", "Persona no encontrada."),
    ("copyEmails", "Copiar correos"),
    ("copyAllEmails", "Copiar todos los correos"),
    ("copied", "¡Copiado!"),
    ("copyError", "Error al copiar"),
    ("skippedRecords", "Registros omitidos"),
    ("openSource", "Proyecto de Código Abierto"),
    ("copyright", "© 2025 Email Finder"),
];

static TRANSLATIONS: Lazy<HashMap<&'static str, Messages>> = Lazy::new(|| {
    [("fr", FR), ("en", EN), ("es", ES)]
        .into_iter()
        .map(|(lang, entries)| (lang, entries.iter().copied().collect()))
        .collect()
});

fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_', '.'])
        .next()
        .unwrap_or("")
        .to_lowercase()
}

/// Maps a language tag ("en-US", "fr_FR.UTF-8", "ES") to a supported locale.
///
/// Only the primary subtag is looked at; anything unsupported falls back to
/// [`FALLBACK_LANGUAGE`].
pub(crate) fn resolve_language(tag: &str) -> &'static str {
    TRANSLATIONS
        .get_key_value(primary_subtag(tag).as_str())
        .map(|(lang, _)| *lang)
        .unwrap_or(FALLBACK_LANGUAGE)
}

/// Whether the primary subtag of `tag` has its own table.
pub(crate) fn is_supported(tag: &str) -> bool {
    TRANSLATIONS.contains_key(primary_subtag(tag).as_str())
}

/// First supported language of an `Accept-Language` header value, if any.
pub(crate) fn language_from_accept_header(header: &str) -> Option<&'static str> {
    header
        .split(',')
        .map(|entry| entry.split(';').next().unwrap_or("").trim())
        .find(|tag| is_supported(tag))
        .map(resolve_language)
}

/// Looks `key` up for `lang`, then in the fallback locale, then returns the key itself.
pub(crate) fn translate<'a>(lang: &str, key: &'a str) -> &'a str {
    let lang = resolve_language(lang);
    TRANSLATIONS
        .get(lang)
        .and_then(|messages| messages.get(key))
        .or_else(|| {
            TRANSLATIONS
                .get(FALLBACK_LANGUAGE)
                .and_then(|messages| messages.get(key))
        })
        .copied()
        .unwrap_or(key)
}

/// Every message of a locale, for clients that render their own interface.
pub(crate) fn messages(lang: &str) -> &'static Messages {
    let lang = resolve_language(lang);
    &TRANSLATIONS[lang]
}

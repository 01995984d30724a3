//! Contact page translations and the checks that compare them to the screen.
//!
//! Each check returns one message per mismatch. A missing element is a
//! mismatch too, reported as `element not found`.

use crate::catalog::Language;
use crate::components::NavigationBar;
use crate::locator::Locator;
use crate::pages::{normalize_whitespace, ContactField, ContactPage};
use crate::result::VitrinaResult;
use crate::session::PageObject;
use crate::validation::found;

/// Leading characters of the attachment warning that must appear on screen
const WARNING_PREFIX_CHARS: usize = 30;
/// Leading characters of the demo notice, compared after whitespace normalization
const INFO_PREFIX_CHARS: usize = 60;

/// Expected contact page texts for one language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactTranslations {
    pub main_heading: &'static str,
    pub home_link: &'static str,
    pub categories_link: &'static str,
    pub contact_link: &'static str,
    pub sign_in_link: &'static str,
    pub first_name_field: &'static str,
    pub last_name_field: &'static str,
    pub email_field: &'static str,
    pub subject_field: &'static str,
    pub message_field: &'static str,
    pub attachment_label: &'static str,
    pub submit_button: &'static str,
    pub warning_label: &'static str,
    pub info_label: &'static str,
    pub first_name_placeholder: &'static str,
    pub last_name_placeholder: &'static str,
    pub email_placeholder: &'static str,
    pub subject_placeholder: &'static str,
}

const EN: ContactTranslations = ContactTranslations {
    main_heading: "Contact",
    home_link: "Home",
    categories_link: "Categories",
    contact_link: "Contact",
    sign_in_link: "Sign in",
    first_name_field: "First name",
    last_name_field: "Last name",
    email_field: "Email address",
    subject_field: "Subject",
    message_field: "Message *",
    attachment_label: "Attachment",
    submit_button: "Send",
    warning_label: "Only files with the txt extension are allowed, and files must be 0kb.",
    info_label: "This is a DEMO application (GitHub repo), used for software testing training purpose.",
    first_name_placeholder: "Your first name *",
    last_name_placeholder: "Your last name *",
    email_placeholder: "Your email *",
    subject_placeholder: "Select a subject *",
};

const DE: ContactTranslations = ContactTranslations {
    main_heading: "Kontakt",
    home_link: "Start",
    categories_link: "Kategorien",
    contact_link: "Kontakt",
    sign_in_link: "Einloggen",
    first_name_field: "Vorname",
    last_name_field: "Nachname",
    email_field: "Email Adresse",
    subject_field: "Betreff",
    message_field: "Nachricht *",
    attachment_label: "Anhang",
    submit_button: "Senden",
    warning_label: "Nur Dateien mit der Endung txt sind erlaubt.",
    info_label: "Das ist eine Demo Applikation (GitHub repo), um Software Test Workshops zu unterstützen.",
    first_name_placeholder: "Ihr Vorname *",
    last_name_placeholder: "Ihr Nachname *",
    email_placeholder: "Ihre EMail *",
    subject_placeholder: "Betreff auswählen *",
};

const ES: ContactTranslations = ContactTranslations {
    main_heading: "Contacto",
    home_link: "Inicio",
    categories_link: "Categorías",
    contact_link: "Contacto",
    sign_in_link: "Iniciar sesión",
    first_name_field: "Nombre",
    last_name_field: "Apellido",
    email_field: "Dirección de correo electrónico",
    subject_field: "Asunto",
    message_field: "Mensaje *",
    attachment_label: "Adjunto",
    submit_button: "Enviar",
    warning_label: "Solo se permiten archivos con la extensión txt, y los archivos deben estar vacíos.",
    info_label: "Esta es una aplicación DEMO (GitHub repo), utilizada para propósitos de formación en pruebas de software.",
    first_name_placeholder: "Tu nombre *",
    last_name_placeholder: "Tu apellido *",
    email_placeholder: "Tu correo electrónico *",
    subject_placeholder: "Selecciona un asunto *",
};

const FR: ContactTranslations = ContactTranslations {
    main_heading: "Contact",
    home_link: "Accueil",
    categories_link: "Catégories",
    contact_link: "Contact",
    sign_in_link: "Se connecter",
    first_name_field: "Prénom",
    last_name_field: "Nom de famille",
    email_field: "Adresse email",
    subject_field: "Sujet",
    message_field: "Message *",
    attachment_label: "Pièce jointe",
    submit_button: "Envoyer",
    warning_label: "Seuls les fichiers avec l'extension txt sont autorisés, et les fichiers doivent être de 0ko.",
    info_label: "Ceci est une application de démonstration (GitHub repo), utilisée à des fins de formation aux tests logiciels.",
    first_name_placeholder: "Votre prénom *",
    last_name_placeholder: "Votre nom de famille *",
    email_placeholder: "Votre email *",
    subject_placeholder: "Sélectionner un sujet *",
};

const NL: ContactTranslations = ContactTranslations {
    main_heading: "Contact",
    home_link: "Home",
    categories_link: "Categorieën",
    contact_link: "Contact",
    sign_in_link: "Inloggen",
    first_name_field: "Voornaam",
    last_name_field: "Achternaam",
    email_field: "E-mailadres",
    subject_field: "Onderwerp",
    message_field: "Bericht *",
    attachment_label: "Bijlage",
    submit_button: "Verzenden",
    warning_label: "Alleen bestanden met de txt extensie zijn toegestaan, en bestanden moeten 0kb zijn.",
    info_label: "Dit is een DEMO-applicatie (GitHub repo), die wordt gebruikt voor trainingsdoeleinden in softwaretesten.",
    first_name_placeholder: "Uw voornaam *",
    last_name_placeholder: "Uw achternaam *",
    email_placeholder: "Uw e-mail *",
    subject_placeholder: "Kies een onderwerp *",
};

const TR: ContactTranslations = ContactTranslations {
    main_heading: "İletişim",
    home_link: "Anasayfa",
    categories_link: "Kategoriler",
    contact_link: "İletişim",
    sign_in_link: "Giriş Yap",
    first_name_field: "Ad",
    last_name_field: "Soyad",
    email_field: "E-posta adresi",
    subject_field: "Konu",
    message_field: "Mesaj *",
    attachment_label: "Ek",
    submit_button: "Gönder",
    warning_label: "Sadece txt uzantılı dosyalara izin verilir ve dosyalar 0kb olmalıdır.",
    info_label: "Bu bir DEMO uygulamasıdır (GitHub repo), yazılım testi eğitimi amacıyla kullanılır.",
    first_name_placeholder: "Adınız *",
    last_name_placeholder: "Soyadınız *",
    email_placeholder: "E-posta adresiniz *",
    subject_placeholder: "Bir konu seçin *",
};

impl ContactTranslations {
    #[must_use]
    pub fn for_language(language: Language) -> &'static Self {
        match language {
            Language::En => &EN,
            Language::De => &DE,
            Language::Es => &ES,
            Language::Fr => &FR,
            Language::Nl => &NL,
            Language::Tr => &TR,
        }
    }

    /// Expected label text of a form field
    #[must_use]
    pub const fn label(&self, field: ContactField) -> &'static str {
        match field {
            ContactField::FirstName => self.first_name_field,
            ContactField::LastName => self.last_name_field,
            ContactField::Email => self.email_field,
            ContactField::Subject => self.subject_field,
            ContactField::Message => self.message_field,
            ContactField::Attachment => self.attachment_label,
        }
    }

    /// Expected placeholder of a text input, for the fields that have one
    #[must_use]
    pub const fn placeholder(&self, field: ContactField) -> Option<&'static str> {
        match field {
            ContactField::FirstName => Some(self.first_name_placeholder),
            ContactField::LastName => Some(self.last_name_placeholder),
            ContactField::Email => Some(self.email_placeholder),
            _ => None,
        }
    }
}

/// First `n` characters, never splitting a code point
fn char_prefix(text: &str, n: usize) -> &str {
    text.char_indices().nth(n).map_or(text, |(i, _)| &text[..i])
}

fn mismatch(what: &str, expected: &str, actual: &str) -> String {
    format!("{what}: expected \"{expected}\", got \"{actual}\"")
}

async fn visible_text(page: &ContactPage, locator: &Locator) -> VitrinaResult<Option<String>> {
    found(page.base().element_text(locator).await)
}

/// Attribute of an attached element; `Some("")` when the attribute is absent
async fn attached_attribute(
    page: &ContactPage,
    locator: &Locator,
    name: &str,
) -> VitrinaResult<Option<String>> {
    let base = page.base();
    let attached = base
        .wait_attached(locator, base.config().timeouts.action_ms)
        .await;
    if found(attached)?.is_none() {
        return Ok(None);
    }
    let value = base.driver().attribute(&locator.clone().pick_first(), name).await;
    Ok(found(value)?.map(|v| v.unwrap_or_default().trim().to_string()))
}

/// Every field label matches its translation
pub async fn validate_contact_form_labels(
    page: &ContactPage,
    expected: &ContactTranslations,
) -> VitrinaResult<Vec<String>> {
    let mut errors = Vec::new();
    for field in ContactField::ALL {
        let what = format!("Label {}", field.id());
        let want = expected.label(field);
        match visible_text(page, &ContactPage::label(field)).await? {
            None => errors.push(format!("{what}: element not found")),
            Some(actual) if actual != want => errors.push(mismatch(&what, want, &actual)),
            Some(_) => {}
        }
    }
    Ok(errors)
}

/// Input placeholders, then the preselected subject option
pub async fn validate_contact_form_placeholders(
    page: &ContactPage,
    expected: &ContactTranslations,
) -> VitrinaResult<Vec<String>> {
    let mut errors = Vec::new();
    for field in ContactField::ALL {
        let (Some(input), Some(want)) = (ContactPage::input(field), expected.placeholder(field))
        else {
            continue;
        };
        let what = format!("Input placeholder {input}");
        match attached_attribute(page, &input, "placeholder").await? {
            None => errors.push(format!("{what}: element not found")),
            Some(actual) if actual != want => errors.push(mismatch(&what, want, &actual)),
            Some(_) => {}
        }
    }

    let option = ContactPage::subject_placeholder();
    let base = page.base();
    let attached = base
        .wait_attached(&option, base.config().timeouts.action_ms)
        .await;
    let text = match found(attached)? {
        Some(()) => found(base.driver().text_content(&option.pick_first()).await)?,
        None => None,
    };
    match text.as_deref().map(str::trim) {
        None => errors.push("Select placeholder: element not found".to_string()),
        Some(actual) if actual != expected.subject_placeholder => errors.push(mismatch(
            "Select placeholder",
            expected.subject_placeholder,
            actual,
        )),
        Some(_) => {}
    }
    Ok(errors)
}

/// The submit control's `value` matches its translation
pub async fn validate_contact_submit_button(
    page: &ContactPage,
    expected: &ContactTranslations,
) -> VitrinaResult<Vec<String>> {
    let what = "Submit button";
    let errors = match attached_attribute(page, &ContactPage::submit_button(), "value").await? {
        None => vec![format!("{what}: element not found")],
        Some(actual) if actual != expected.submit_button => {
            vec![mismatch(what, expected.submit_button, &actual)]
        }
        Some(_) => Vec::new(),
    };
    Ok(errors)
}

/// Labels, placeholders and the submit button, in that order
pub async fn validate_form_translations(
    page: &ContactPage,
    expected: &ContactTranslations,
) -> VitrinaResult<Vec<String>> {
    let mut errors = validate_contact_form_labels(page, expected).await?;
    errors.extend(validate_contact_form_placeholders(page, expected).await?);
    errors.extend(validate_contact_submit_button(page, expected).await?);
    Ok(errors)
}

/// Page heading and the header navigation links
pub async fn validate_navigation_elements(
    page: &ContactPage,
    expected: &ContactTranslations,
) -> VitrinaResult<Vec<String>> {
    let checks = [
        ("Main heading", ContactPage::main_heading(), expected.main_heading),
        ("Home link", NavigationBar::home_link(), expected.home_link),
        ("Categories link", NavigationBar::categories_link(), expected.categories_link),
        ("Contact link", NavigationBar::contact_link(), expected.contact_link),
        ("Sign in link", NavigationBar::sign_in_link(), expected.sign_in_link),
    ];
    let mut errors = Vec::new();
    for (what, locator, want) in checks {
        match visible_text(page, &locator).await? {
            None => errors.push(format!("{what}: element not found")),
            Some(actual) if actual != want => errors.push(mismatch(what, want, &actual)),
            Some(_) => {}
        }
    }
    Ok(errors)
}

/// Attachment warning and demo notice contain the start of their translations
pub async fn validate_labels_and_text(
    page: &ContactPage,
    expected: &ContactTranslations,
) -> VitrinaResult<Vec<String>> {
    let mut errors = Vec::new();

    let warning_prefix = char_prefix(expected.warning_label, WARNING_PREFIX_CHARS);
    match visible_text(page, &ContactPage::warning_label()).await? {
        None => errors.push("Warning label: element not found".to_string()),
        Some(actual) if !actual.contains(warning_prefix) => errors.push(format!(
            "Warning label: expected to contain \"{warning_prefix}\", got \"{actual}\""
        )),
        Some(_) => {}
    }

    let info_prefix = normalize_whitespace(char_prefix(expected.info_label, INFO_PREFIX_CHARS));
    match found(page.normalized_info_text().await)? {
        None => errors.push("Info label: element not found".to_string()),
        Some(actual) if !actual.contains(&info_prefix) => errors.push(format!(
            "Info label: expected to contain \"{info_prefix}\", got \"{actual}\""
        )),
        Some(_) => {}
    }
    Ok(errors)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::SuiteConfig;
    use crate::driver::{MockDriver, MockNode};
    use crate::session::Session;
    use std::sync::Arc;

    /// A contact page rendered in `language`
    fn rendered(language: Language) -> (Arc<MockDriver>, ContactPage) {
        let t = ContactTranslations::for_language(language);
        let driver = Arc::new(MockDriver::new());
        for field in ContactField::ALL {
            driver.set_element(&ContactPage::label(field), MockNode::new(format!(" {} ", t.label(field))));
            if let (Some(input), Some(placeholder)) = (ContactPage::input(field), t.placeholder(field)) {
                driver.set_element(&input, MockNode::input("").with_attribute("placeholder", placeholder));
            }
        }
        driver.set_element(&ContactPage::subject_placeholder(), MockNode::new(t.subject_placeholder));
        driver.set_element(
            &ContactPage::submit_button(),
            MockNode::new("").with_attribute("value", t.submit_button),
        );
        driver.set_element(&ContactPage::main_heading(), MockNode::new(t.main_heading));
        driver.set_element(&NavigationBar::home_link(), MockNode::new(t.home_link));
        driver.set_element(&NavigationBar::categories_link(), MockNode::new(t.categories_link));
        driver.set_element(&NavigationBar::contact_link(), MockNode::new(t.contact_link));
        driver.set_element(&NavigationBar::sign_in_link(), MockNode::new(t.sign_in_link));
        driver.set_element(&ContactPage::warning_label(), MockNode::new(t.warning_label));
        driver.set_element(
            &ContactPage::info_label(),
            MockNode::new(t.info_label.replace(' ', "\n    ")),
        );
        let page = Session::new(driver.clone(), SuiteConfig::fast()).contact();
        (driver, page)
    }

    mod data_tests {
        use super::*;

        #[test]
        fn test_translation_tables_are_complete() {
            for language in Language::ALL {
                let t = ContactTranslations::for_language(language);
                assert!(!t.submit_button.is_empty());
                assert!(t.message_field.ends_with(" *"));
                assert!(t.info_label.contains("(GitHub repo)"));
            }
            assert_eq!(ContactTranslations::for_language(Language::De).home_link, "Start");
        }

        #[test]
        fn test_char_prefix_respects_code_points() {
            assert_eq!(char_prefix("İletişim", 3), "İle");
            assert_eq!(char_prefix("abc", 10), "abc");
        }
    }

    mod form_tests {
        use super::*;

        #[tokio::test]
        async fn test_every_language_passes_when_rendered() {
            for language in Language::ALL {
                let (_driver, page) = rendered(language);
                let t = ContactTranslations::for_language(language);
                assert_eq!(validate_form_translations(&page, t).await.unwrap(), Vec::<String>::new());
                assert!(validate_navigation_elements(&page, t).await.unwrap().is_empty());
                assert!(validate_labels_and_text(&page, t).await.unwrap().is_empty());
            }
        }

        #[tokio::test]
        async fn test_wrong_language_reports_each_label() {
            let (_driver, page) = rendered(Language::En);
            let errors = validate_contact_form_labels(&page, ContactTranslations::for_language(Language::Fr))
                .await
                .unwrap();
            assert!(errors.contains(&"Label first_name: expected \"Prénom\", got \"First name\"".to_string()));
            // "Message *" is the same in both
            assert_eq!(errors.len(), 5);
        }

        #[tokio::test]
        async fn test_missing_elements_are_reported() {
            let (driver, page) = rendered(Language::En);
            let en = ContactTranslations::for_language(Language::En);
            driver.remove_element(&ContactPage::label(ContactField::Email));
            driver.remove_element(&ContactPage::submit_button());
            driver.remove_element(&ContactPage::subject_placeholder());

            let labels = validate_contact_form_labels(&page, en).await.unwrap();
            assert_eq!(labels, vec!["Label email: element not found"]);
            let submit = validate_contact_submit_button(&page, en).await.unwrap();
            assert_eq!(submit, vec!["Submit button: element not found"]);
            let placeholders = validate_contact_form_placeholders(&page, en).await.unwrap();
            assert_eq!(placeholders, vec!["Select placeholder: element not found"]);
        }

        #[tokio::test]
        async fn test_placeholder_mismatch_names_selector() {
            let (driver, page) = rendered(Language::En);
            driver.set_element(
                &Locator::test_id("email"),
                MockNode::input("").with_attribute("placeholder", "Ihre EMail *"),
            );
            let errors = validate_contact_form_placeholders(&page, ContactTranslations::for_language(Language::En))
                .await
                .unwrap();
            assert_eq!(
                errors,
                vec!["Input placeholder [data-test=\"email\"]: expected \"Your email *\", got \"Ihre EMail *\""]
            );
        }
    }

    mod text_tests {
        use super::*;

        #[tokio::test]
        async fn test_navigation_mismatch() {
            let (driver, page) = rendered(Language::En);
            driver.set_element(&NavigationBar::home_link(), MockNode::new("Start"));
            let errors = validate_navigation_elements(&page, ContactTranslations::for_language(Language::En))
                .await
                .unwrap();
            assert_eq!(errors, vec!["Home link: expected \"Home\", got \"Start\""]);
        }

        #[tokio::test]
        async fn test_warning_only_needs_prefix() {
            let (driver, page) = rendered(Language::Nl);
            driver.set_element(
                &ContactPage::warning_label(),
                MockNode::new("Alleen bestanden met de txt extensie zijn toegestaan."),
            );
            let errors = validate_labels_and_text(&page, ContactTranslations::for_language(Language::Nl))
                .await
                .unwrap();
            assert!(errors.is_empty());
        }
    }
}

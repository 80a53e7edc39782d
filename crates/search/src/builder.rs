use doctordork_core::{DoctorIdentity, ResultEntry};
use tracing::debug;

use crate::catalog::Category;
use crate::CONTACT_SEARCH_KEY;

const GOOGLE_SEARCH: &str = "https://www.google.com/search?q=";

/// Percent-encoded identity values, keyed by placeholder name.
///
/// Values are encoded once when the fields are built, so nothing that comes
/// out of [`substitute`] can carry a raw input character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFields {
    doctor_name: String,
    city: String,
    state: String,
    specialty: String,
    first_name: String,
    last_name: String,
}

impl TemplateFields {
    pub fn from_identity(identity: &DoctorIdentity) -> Self {
        let (first_name, last_name) = identity.name_parts();
        Self {
            doctor_name: encode(&identity.doctor_name),
            city: encode(&identity.city),
            state: encode(&identity.state),
            specialty: encode(&identity.specialty),
            first_name: encode(&first_name),
            last_name: encode(&last_name),
        }
    }

    pub fn get(&self, placeholder: &str) -> Option<&str> {
        let value = match placeholder {
            "doctor_name" => &self.doctor_name,
            "city" => &self.city,
            "state" => &self.state,
            "specialty" => &self.specialty,
            "first_name" => &self.first_name,
            "last_name" => &self.last_name,
            _ => return None,
        };
        Some(value.as_str())
    }
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Replaces every `{placeholder}` in `template` with its encoded field value.
/// Unknown tokens and unmatched braces are copied through unchanged.
pub fn substitute(template: &str, fields: &TemplateFields) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let token = &after[..close];
                match fields.get(token) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(token);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Builds one link per platform of `category`, in catalog order.
pub fn build_category(identity: &DoctorIdentity, category: Category) -> Vec<ResultEntry> {
    let fields = TemplateFields::from_identity(identity);
    let entries: Vec<ResultEntry> = category
        .templates()
        .iter()
        .map(|p| ResultEntry::new(category.key(), p.name, substitute(p.url_template, &fields)))
        .collect();
    debug!(category = category.key(), count = entries.len(), "Built category links");
    entries
}

/// The Google query that looks for a practice's contact page.
pub fn contact_dork(identity: &DoctorIdentity) -> String {
    let mut parts = vec![
        "(group:doctor OR group:physician)".to_string(),
        r#"(inurl:contact OR inurl:contact-us OR inurl:"contact us")"#.to_string(),
        format!("\"{}\"", identity.doctor_name),
        format!("\"{}\"", identity.city),
        format!("\"{}\"", identity.state),
    ];
    if !identity.specialty.is_empty() {
        parts.push(format!("\"{}\"", identity.specialty));
    }
    parts.join(" ")
}

pub fn build_contact_search(identity: &DoctorIdentity) -> ResultEntry {
    let url = format!("{}{}", GOOGLE_SEARCH, encode(&contact_dork(identity)));
    ResultEntry::new(CONTACT_SEARCH_KEY, "Google Search", url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john_smith() -> DoctorIdentity {
        DoctorIdentity::new("John Smith", "Boston", "MA", "")
    }

    #[test]
    fn test_review_links_for_john_smith() {
        let entries = build_category(&john_smith(), Category::Reviews);
        assert_eq!(entries.len(), 5);

        let google = &entries[0];
        assert_eq!(google.platform, "Google");
        assert_eq!(google.category, "review_aggregation");
        assert_eq!(
            google.url,
            "https://www.google.com/search?q=John%20Smith+Boston+MA+doctor+reviews"
        );
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let id = DoctorIdentity::new("O'Brien & Sons/#1?", "Winston-Salem", "NC", "Ear, Nose = Throat");
        for category in Category::ALL {
            for entry in build_category(&id, category) {
                let query = entry.url.split_once('?').map(|(_, q)| q).unwrap_or("");
                assert!(!entry.url.contains(' '), "space in {}", entry.url);
                assert!(!query.contains('#'), "raw # in {}", entry.url);
                assert!(!query.contains('/'), "raw / in {}", entry.url);
                assert!(!query.contains('?'), "raw ? in {}", entry.url);
                assert!(!entry.url.contains("& "), "raw & in {}", entry.url);
            }
        }

        let fields = TemplateFields::from_identity(&id);
        assert_eq!(fields.get("doctor_name"), Some("O%27Brien%20%26%20Sons%2F%231%3F"));
        assert_eq!(fields.get("specialty"), Some("Ear%2C%20Nose%20%3D%20Throat"));
    }

    #[test]
    fn test_missing_specialty_substitutes_empty() {
        let entries = build_category(&john_smith(), Category::SocialMedia);
        assert_eq!(
            entries[0].url,
            "https://www.linkedin.com/search/results/all/?keywords=John%20Smith+"
        );
    }

    #[test]
    fn test_npi_registry_uses_name_parts() {
        let id = DoctorIdentity::new("Dr. Mary Ann Jones", "Austin", "tx", "");
        let entries = build_category(&id, Category::Medicare);
        assert_eq!(
            entries[0].url,
            "https://npiregistry.cms.hhs.gov/search?searchType=ind&lastName=Jones&firstName=Mary&state=TX"
        );
    }

    #[test]
    fn test_static_templates_pass_through() {
        let entries = build_category(&john_smith(), Category::SpecialtyVerification);
        assert_eq!(entries[0].url, "https://www.certificationmatters.org/find-your-doctor.aspx");
    }

    #[test]
    fn test_unknown_tokens_and_stray_braces_kept() {
        let fields = TemplateFields::from_identity(&john_smith());
        assert_eq!(substitute("a={zip}&b={city}", &fields), "a={zip}&b=Boston");
        assert_eq!(substitute("x={city", &fields), "x={city");
        assert_eq!(substitute("no tokens", &fields), "no tokens");
    }

    #[test]
    fn test_contact_dork() {
        let id = DoctorIdentity::new("John Smith", "Boston", "MA", "Cardiology");
        let dork = contact_dork(&id);
        assert!(dork.starts_with("(group:doctor OR group:physician)"));
        assert!(dork.ends_with(r#""John Smith" "Boston" "MA" "Cardiology""#));

        let without = contact_dork(&john_smith());
        assert!(without.ends_with(r#""MA""#));

        let entry = build_contact_search(&id);
        assert_eq!(entry.category, CONTACT_SEARCH_KEY);
        assert_eq!(entry.platform, "Google Search");
        assert!(entry.url.starts_with("https://www.google.com/search?q=%28group%3Adoctor"));
        assert!(entry.url.contains("%22John%20Smith%22"));
        assert!(!entry.url.contains(' '));
    }
}

use std::fmt;
use std::str::FromStr;

use doctordork_core::{Error, Result};

/// A named platform and the URL template its search link is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformTemplate {
    pub name: &'static str,
    pub url_template: &'static str,
}

const fn platform(name: &'static str, url_template: &'static str) -> PlatformTemplate {
    PlatformTemplate { name, url_template }
}

const REVIEW_PLATFORMS: &[PlatformTemplate] = &[
    platform("Google", "https://www.google.com/search?q={doctor_name}+{city}+{state}+doctor+reviews"),
    platform("Healthgrades", "https://www.healthgrades.com/search?what={doctor_name}&where={city}%2C+{state}"),
    platform("Vitals", "https://www.vitals.com/search?q={doctor_name}&locationsearch={city}%2C+{state}"),
    platform("RateMDs", "https://www.ratemds.com/best-doctors/?search={doctor_name}&location={city}%2C+{state}"),
    platform("Zocdoc", "https://www.zocdoc.com/search/?dr_specialty=&insurance_carrier=&search_query={doctor_name}&address={city}%2C+{state}"),
];

const SOCIAL_PLATFORMS: &[PlatformTemplate] = &[
    platform("LinkedIn", "https://www.linkedin.com/search/results/all/?keywords={doctor_name}+{specialty}"),
    platform("Twitter", "https://twitter.com/search?q={doctor_name}+doctor"),
    platform("Facebook", "https://www.facebook.com/search/top?q={doctor_name}+doctor"),
];

const MEDICARE_LOOKUP: &[PlatformTemplate] = &[
    platform("NPI Registry", "https://npiregistry.cms.hhs.gov/search?searchType=ind&lastName={last_name}&firstName={first_name}&state={state}"),
    platform("Medicare Physician Compare", "https://www.medicare.gov/care-compare/search?type=Physician&searchType=Physician&page=1&search={doctor_name}"),
];

const PUBLICATION_LOOKUP: &[PlatformTemplate] = &[
    platform("PubMed", "https://pubmed.ncbi.nlm.nih.gov/?term={doctor_name}"),
    platform("Google Scholar", "https://scholar.google.com/scholar?q={doctor_name}"),
];

const SPECIALTY_VERIFICATION: &[PlatformTemplate] = &[
    platform("ABMS Certification", "https://www.certificationmatters.org/find-your-doctor.aspx"),
    platform("AOA Board Certification", "https://www.osteopathic.org/home/"),
];

const EDUCATION_LOOKUP: &[PlatformTemplate] = &[
    platform("AMA DoctorFinder", "https://www.ama-assn.org/life-career/professional-satisfaction/ama-doctorfinder"),
    platform("Doximity", "https://www.doximity.com/search?q={doctor_name}"),
];

const HOSPITAL_AFFILIATIONS: &[PlatformTemplate] = &[
    platform("Healthgrades Hospital Affiliations", "https://www.healthgrades.com/search?what={doctor_name}&where={city}%2C+{state}"),
    platform("Vitals Hospital Info", "https://www.vitals.com/search?q={doctor_name}&locationsearch={city}%2C+{state}"),
    platform("WebMD Provider Directory", "https://doctor.webmd.com/results?ps={doctor_name}&pt=&lid={state}"),
];

const INSURANCE_ACCEPTANCE: &[PlatformTemplate] = &[
    platform("Zocdoc Insurance Search", "https://www.zocdoc.com/search/?dr_specialty=&insurance_carrier=&search_query={doctor_name}&address={city}%2C+{state}"),
    platform("Healthgrades Insurance Info", "https://www.healthgrades.com/search?what={doctor_name}&where={city}%2C+{state}"),
    platform("Vitals Insurance Accepted", "https://www.vitals.com/search?q={doctor_name}&locationsearch={city}%2C+{state}"),
];

const LANGUAGE_SUPPORT: &[PlatformTemplate] = &[
    platform("Healthgrades Languages", "https://www.healthgrades.com/search?what={doctor_name}&where={city}%2C+{state}"),
    platform("Vitals Language Info", "https://www.vitals.com/search?q={doctor_name}&locationsearch={city}%2C+{state}"),
    platform("Zocdoc Language Filter", "https://www.zocdoc.com/search/?search_query={doctor_name}&address={city}%2C+{state}"),
];

const TELEMEDICINE_OPTIONS: &[PlatformTemplate] = &[
    platform("Healthgrades Virtual Care", "https://www.healthgrades.com/search?what={doctor_name}+telehealth&where={city}%2C+{state}"),
    platform("Zocdoc Video Visits", "https://www.zocdoc.com/search/?dr_specialty=&insurance_carrier=&search_query={doctor_name}&address={city}%2C+{state}&visitType=virtual"),
    platform("Doximity Video", "https://www.doximity.com/search?q={doctor_name}"),
    platform("Teladoc Provider Search", "https://www.teladoc.com/"),
];

const APPOINTMENT_BOOKING: &[PlatformTemplate] = &[
    platform("Zocdoc Booking", "https://www.zocdoc.com/search/?dr_specialty=&insurance_carrier=&search_query={doctor_name}&address={city}%2C+{state}"),
    platform("Healthgrades Appointments", "https://www.healthgrades.com/search?what={doctor_name}&where={city}%2C+{state}"),
    platform("Vitals Schedule", "https://www.vitals.com/search?q={doctor_name}&locationsearch={city}%2C+{state}"),
    platform("MyChart Epic", "https://www.mychartonline.com/"),
];

/// The templated search categories, in the order a comprehensive search
/// runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Medicare,
    Publications,
    SpecialtyVerification,
    Education,
    HospitalAffiliations,
    InsuranceAcceptance,
    LanguageSupport,
    Telemedicine,
    AppointmentBooking,
    Reviews,
    SocialMedia,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Medicare,
        Category::Publications,
        Category::SpecialtyVerification,
        Category::Education,
        Category::HospitalAffiliations,
        Category::InsuranceAcceptance,
        Category::LanguageSupport,
        Category::Telemedicine,
        Category::AppointmentBooking,
        Category::Reviews,
        Category::SocialMedia,
    ];

    /// Key used in session results, exports and history.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Medicare => "medicare_lookup",
            Category::Publications => "publication_search",
            Category::SpecialtyVerification => "specialty_verification",
            Category::Education => "education_lookup",
            Category::HospitalAffiliations => "hospital_affiliations",
            Category::InsuranceAcceptance => "insurance_acceptance",
            Category::LanguageSupport => "language_support",
            Category::Telemedicine => "telemedicine_options",
            Category::AppointmentBooking => "appointment_booking",
            Category::Reviews => "review_aggregation",
            Category::SocialMedia => "social_media",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Medicare => "Medicare Participation Lookup",
            Category::Publications => "Publication Search",
            Category::SpecialtyVerification => "Specialty Board Verification",
            Category::Education => "Education & Training Lookup",
            Category::HospitalAffiliations => "Hospital Affiliations Lookup",
            Category::InsuranceAcceptance => "Insurance Acceptance Lookup",
            Category::LanguageSupport => "Language Support Lookup",
            Category::Telemedicine => "Telemedicine Options Lookup",
            Category::AppointmentBooking => "Appointment Booking Links",
            Category::Reviews => "Review Aggregation",
            Category::SocialMedia => "Social Media Search",
        }
    }

    /// Noun used in prompts such as "Open all review sites?".
    pub fn sites_label(&self) -> &'static str {
        match self {
            Category::Medicare => "Medicare lookup sites",
            Category::Publications => "publication databases",
            Category::SpecialtyVerification => "certification databases",
            Category::Education => "education databases",
            Category::HospitalAffiliations => "hospital affiliation sites",
            Category::InsuranceAcceptance => "insurance lookup sites",
            Category::LanguageSupport => "language lookup sites",
            Category::Telemedicine => "telemedicine sites",
            Category::AppointmentBooking => "booking sites",
            Category::Reviews => "review sites",
            Category::SocialMedia => "social media sites",
        }
    }

    /// What the linked databases typically show, printed after the links.
    pub fn highlights(&self) -> &'static [&'static str] {
        match self {
            Category::Medicare => &[
                "Medicare enrollment status",
                "National Provider Identifier (NPI)",
                "Practice locations and credentials",
                "Medicare patient ratings",
            ],
            Category::Publications => &[
                "Research papers and studies",
                "Citations and impact metrics",
                "Areas of medical expertise",
                "Academic contributions",
            ],
            Category::SpecialtyVerification => &[
                "ABMS board certifications (24+ specialties)",
                "AOA osteopathic certifications",
                "Certification status and expiration",
                "Subspecialty certifications",
            ],
            Category::Education => &[
                "Medical school attended",
                "Residency and fellowship training",
                "Year of graduation",
                "Professional credentials",
            ],
            Category::HospitalAffiliations => &[
                "Primary hospital affiliations",
                "Admitting privileges",
                "Practice locations",
                "Hospital quality ratings",
            ],
            Category::InsuranceAcceptance => &[
                "Accepted insurance plans",
                "Medicare/Medicaid participation",
                "In-network vs out-of-network",
                "Payment policies",
            ],
            Category::LanguageSupport => &[
                "Languages spoken by doctor",
                "Interpreter services available",
                "Multilingual office staff",
                "Translation services",
            ],
            Category::Telemedicine => &[
                "Virtual visit availability",
                "Video consultation platforms",
                "Online prescription services",
                "Remote patient monitoring",
            ],
            Category::AppointmentBooking => &[
                "Online appointment scheduling",
                "Patient portal access",
                "Same-day appointment availability",
                "Waitlist notifications",
            ],
            Category::Reviews | Category::SocialMedia => &[],
        }
    }

    pub fn templates(&self) -> &'static [PlatformTemplate] {
        match self {
            Category::Medicare => MEDICARE_LOOKUP,
            Category::Publications => PUBLICATION_LOOKUP,
            Category::SpecialtyVerification => SPECIALTY_VERIFICATION,
            Category::Education => EDUCATION_LOOKUP,
            Category::HospitalAffiliations => HOSPITAL_AFFILIATIONS,
            Category::InsuranceAcceptance => INSURANCE_ACCEPTANCE,
            Category::LanguageSupport => LANGUAGE_SUPPORT,
            Category::Telemedicine => TELEMEDICINE_OPTIONS,
            Category::AppointmentBooking => APPOINTMENT_BOOKING,
            Category::Reviews => REVIEW_PLATFORMS,
            Category::SocialMedia => SOCIAL_PLATFORMS,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Accepts the session key or a short alias ("reviews", "medicare", ...).
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        let alias = match wanted.as_str() {
            "medicare" | "npi" => Some(Category::Medicare),
            "publications" | "pubmed" => Some(Category::Publications),
            "specialty" | "certification" => Some(Category::SpecialtyVerification),
            "education" => Some(Category::Education),
            "hospital" | "hospitals" => Some(Category::HospitalAffiliations),
            "insurance" => Some(Category::InsuranceAcceptance),
            "language" | "languages" => Some(Category::LanguageSupport),
            "telemedicine" | "telehealth" => Some(Category::Telemedicine),
            "booking" | "appointments" => Some(Category::AppointmentBooking),
            "reviews" => Some(Category::Reviews),
            "social" => Some(Category::SocialMedia),
            _ => None,
        };
        alias
            .or_else(|| Category::ALL.into_iter().find(|c| c.key() == wanted))
            .ok_or_else(|| Error::NotFound(format!("Unknown category '{}'", s.trim())))
    }
}

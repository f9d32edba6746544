use serde::{Deserialize, Serialize};

use crate::db::types::Grade;

/// Every generated password starts with this literal.
pub(crate) const PASSWORD_PREFIX: &str = "ec";

/// Class subdivisions within a grade.
pub(crate) const GROUPS: [&str; 10] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"];

/// Baccalauréat codes are assigned explicitly: two of its section names
/// start with the same letter, so the first-letter rule cannot apply.
const BACCALAUREAT_SECTION_CODES: &[(&str, &str)] = &[
    ("Mathématiques", "m"),
    ("Sciences Expérimentales", "sc"),
    ("Sciences Techniques", "t"),
    ("Economie et Gestion", "e"),
    ("Lettres", "l"),
    ("Informatique", "i"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Credential {
    pub(crate) grade: Grade,
    pub(crate) group: String,
    #[serde(default)]
    pub(crate) section: Option<String>,
    pub(crate) password: String,
}

impl Credential {
    pub(crate) fn matches(&self, grade: Grade, group: &str, section: Option<&str>) -> bool {
        self.grade == grade && self.group == group && self.section.as_deref() == section
    }
}

pub(crate) fn section_code(grade: Grade, section: &str) -> Option<String> {
    match grade {
        Grade::Baccalaureat => BACCALAUREAT_SECTION_CODES
            .iter()
            .find(|(name, _)| *name == section)
            .map(|(_, code)| (*code).to_string()),
        // Lowercase first letter of the section name. "Sciences" and
        // "Sciences Techniques" both derive "s", so their passwords collide;
        // kept as-is so previously issued passwords stay valid.
        Grade::SecondaryTwo | Grade::SecondaryThree => {
            section.chars().next().map(|ch| ch.to_lowercase().to_string())
        }
        _ => None,
    }
}

pub(crate) fn password_for(grade: Grade, group: &str, section: Option<&str>) -> String {
    let mut password = format!("{PASSWORD_PREFIX}{}{}", grade.ordinal(), group);
    if let Some(code) = section.and_then(|name| section_code(grade, name)) {
        password.push_str(&code);
    }
    password
}

/// The complete default credential set: grades in ladder order, groups 1..10
/// in numeric order, sections in declared order. Pure and deterministic.
pub(crate) fn generate_all() -> Vec<Credential> {
    let mut credentials = Vec::new();

    for grade in Grade::ALL {
        for group in GROUPS {
            if !grade.has_sections() {
                credentials.push(Credential {
                    grade,
                    group: group.to_string(),
                    section: None,
                    password: password_for(grade, group, None),
                });
                continue;
            }

            for section in grade.sections() {
                credentials.push(Credential {
                    grade,
                    group: group.to_string(),
                    section: Some(section.to_string()),
                    password: password_for(grade, group, Some(section)),
                });
            }
        }
    }

    credentials
}

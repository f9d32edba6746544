use serde::{Deserialize, Serialize};
use sqlx::Type;

/// The four calendar entry categories. CSV files carry the French labels,
/// the API and the database carry the tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "eventtype", rename_all = "lowercase")]
pub(crate) enum EventType {
    Exam,
    Homework,
    Meeting,
    Outing,
}

impl EventType {
    pub(crate) const ALL: [EventType; 4] =
        [EventType::Exam, EventType::Homework, EventType::Meeting, EventType::Outing];

    pub(crate) fn label(self) -> &'static str {
        match self {
            EventType::Exam => "Examen",
            EventType::Homework => "Devoir",
            EventType::Meeting => "Réunion",
            EventType::Outing => "Sortie",
        }
    }

    pub(crate) fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.label() == label.trim())
    }
}

/// The thirteen education levels, in ladder order. The discriminant is the
/// 1-based ordinal that appears in every generated password, and is also how
/// the grade is stored (SMALLINT).
///
/// Each grade owns its section list; the last three are the only ones that
/// carry sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub(crate) enum Grade {
    PrimaryOne = 1,
    PrimaryTwo = 2,
    PrimaryThree = 3,
    PrimaryFour = 4,
    PrimaryFive = 5,
    PrimarySix = 6,
    BasicSeven = 7,
    BasicEight = 8,
    BasicNine = 9,
    SecondaryOne = 10,
    SecondaryTwo = 11,
    SecondaryThree = 12,
    Baccalaureat = 13,
}

const SECONDARY_TWO_SECTIONS: &[&str] =
    &["Sciences", "Sciences Techniques", "Lettres", "Economie", "Informatique"];

const SECONDARY_THREE_SECTIONS: &[&str] =
    &["Mathématiques", "Sciences", "Sciences Techniques", "Lettres", "Economie", "Informatique"];

const BACCALAUREAT_SECTIONS: &[&str] = &[
    "Mathématiques",
    "Sciences Expérimentales",
    "Sciences Techniques",
    "Economie et Gestion",
    "Lettres",
    "Informatique",
];

impl Grade {
    pub(crate) const ALL: [Grade; 13] = [
        Grade::PrimaryOne,
        Grade::PrimaryTwo,
        Grade::PrimaryThree,
        Grade::PrimaryFour,
        Grade::PrimaryFive,
        Grade::PrimarySix,
        Grade::BasicSeven,
        Grade::BasicEight,
        Grade::BasicNine,
        Grade::SecondaryOne,
        Grade::SecondaryTwo,
        Grade::SecondaryThree,
        Grade::Baccalaureat,
    ];

    pub(crate) fn ordinal(self) -> i16 {
        self as i16
    }

    pub(crate) fn from_ordinal(ordinal: i16) -> Option<Self> {
        Self::ALL.iter().copied().find(|grade| grade.ordinal() == ordinal)
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Grade::PrimaryOne => "1ère année primaire",
            Grade::PrimaryTwo => "2ème année primaire",
            Grade::PrimaryThree => "3ème année primaire",
            Grade::PrimaryFour => "4ème année primaire",
            Grade::PrimaryFive => "5ème année primaire",
            Grade::PrimarySix => "6ème année primaire",
            Grade::BasicSeven => "7ème année de base",
            Grade::BasicEight => "8ème année de base",
            Grade::BasicNine => "9ème année de base",
            Grade::SecondaryOne => "1ère année secondaire",
            Grade::SecondaryTwo => "2ème année secondaire",
            Grade::SecondaryThree => "3ème année secondaire",
            Grade::Baccalaureat => "Baccalauréat",
        }
    }

    pub(crate) fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|grade| grade.label() == label.trim())
    }

    pub(crate) fn sections(self) -> &'static [&'static str] {
        match self {
            Grade::SecondaryTwo => SECONDARY_TWO_SECTIONS,
            Grade::SecondaryThree => SECONDARY_THREE_SECTIONS,
            Grade::Baccalaureat => BACCALAUREAT_SECTIONS,
            _ => &[],
        }
    }

    pub(crate) fn has_sections(self) -> bool {
        !self.sections().is_empty()
    }
}

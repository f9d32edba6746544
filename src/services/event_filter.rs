use serde::Deserialize;
use time::{Date, Duration};

use crate::db::models::Event;
use crate::db::types::Grade;

/// "next 1 month" is a fixed 30-day window so the predicate stays total on
/// month-end dates.
const MONTH_WINDOW_DAYS: i64 = 30;
const WEEK_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DateWindow {
    Today,
    Week,
    Month,
    #[default]
    All,
}

impl DateWindow {
    fn contains(self, date: Date, today: Date) -> bool {
        match self {
            DateWindow::Today => date == today,
            DateWindow::Week => {
                date >= today && date <= today.saturating_add(Duration::days(WEEK_WINDOW_DAYS))
            }
            DateWindow::Month => {
                date >= today && date <= today.saturating_add(Duration::days(MONTH_WINDOW_DAYS))
            }
            DateWindow::All => true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct EventFilter {
    pub(crate) grade: Option<Grade>,
    pub(crate) group: Option<String>,
    pub(crate) section: Option<String>,
    pub(crate) search: Option<String>,
    pub(crate) window: DateWindow,
}

/// All set predicates AND together; unset dimensions pass everything.
/// Pure and synchronous, so dimension order cannot matter.
pub(crate) fn apply(events: Vec<Event>, filter: &EventFilter, today: Date) -> Vec<Event> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_lowercase);

    events
        .into_iter()
        .filter(|event| {
            if let Some(grade) = filter.grade {
                if event.grade != grade {
                    return false;
                }
            }
            if let Some(group) = &filter.group {
                if &event.group_name != group {
                    return false;
                }
            }
            if let Some(section) = &filter.section {
                if event.section.as_deref() != Some(section.as_str()) {
                    return false;
                }
            }
            if let Some(needle) = &needle {
                let in_title = event.title.to_lowercase().contains(needle);
                let in_description = event.description.to_lowercase().contains(needle);
                if !in_title && !in_description {
                    return false;
                }
            }
            filter.window.contains(event.event_date, today)
        })
        .collect()
}

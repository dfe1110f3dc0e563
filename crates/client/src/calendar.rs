//! Calendar view controller.
//!
//! Holds the view mode, the anchor date and the searchable event set for the
//! appointments calendar. Rendering is left to the caller; this type only
//! answers which dates and events are visible.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};

use domain::{AppointmentResponse, UPCOMING_EVENTS_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarView {
    #[default]
    Month,
    Week,
    Day,
    /// Flat list of every appointment; date navigation does nothing here
    Appointments,
}

#[derive(Debug, Clone)]
pub struct Calendar {
    view: CalendarView,
    anchor: DateTime<Utc>,
    query: String,
    all_events: Vec<AppointmentResponse>,
    events: Vec<AppointmentResponse>,
}

impl Calendar {
    pub fn new(events: Vec<AppointmentResponse>, anchor: DateTime<Utc>) -> Self {
        Self {
            view: CalendarView::default(),
            anchor,
            query: String::new(),
            events: events.clone(),
            all_events: events,
        }
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    pub fn set_view(&mut self, view: CalendarView) {
        self.view = view;
    }

    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    /// Events left after the current search.
    pub fn events(&self) -> &[AppointmentResponse] {
        &self.events
    }

    /// Move the anchor by `amount` units of the current view.
    pub fn change_date(&mut self, amount: i32) {
        let moved = match self.view {
            CalendarView::Month => add_months(self.anchor, amount),
            CalendarView::Week => self
                .anchor
                .checked_add_signed(Duration::weeks(i64::from(amount))),
            CalendarView::Day => self
                .anchor
                .checked_add_signed(Duration::days(i64::from(amount))),
            CalendarView::Appointments => None,
        };
        if let Some(anchor) = moved {
            self.anchor = anchor;
        }
    }

    /// Filter by case-insensitive match on user or description.
    pub fn search(&mut self, query: &str) {
        self.query = query.trim().to_lowercase();
        self.refilter();
    }

    /// Swap the underlying event set, keeping the current search.
    pub fn set_events(&mut self, events: Vec<AppointmentResponse>) {
        self.all_events = events;
        self.refilter();
    }

    fn refilter(&mut self) {
        self.events = if self.query.is_empty() {
            self.all_events.clone()
        } else {
            self.all_events
                .iter()
                .filter(|event| {
                    event.user.to_lowercase().contains(&self.query)
                        || event.description.to_lowercase().contains(&self.query)
                })
                .cloned()
                .collect()
        };
    }

    /// Next events at or after `now`, earliest first.
    pub fn upcoming_events(&self, now: DateTime<Utc>) -> Vec<&AppointmentResponse> {
        let mut upcoming: Vec<_> = self.events.iter().filter(|e| e.date >= now).collect();
        upcoming.sort_by_key(|e| e.date);
        upcoming.truncate(UPCOMING_EVENTS_LIMIT);
        upcoming
    }

    /// Inclusive date range the grid shows; weeks start on Sunday.
    ///
    /// `None` in the appointments list, which is not bounded by dates.
    pub fn visible_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let anchor = self.anchor.date_naive();
        match self.view {
            CalendarView::Month => {
                let first = anchor.with_day(1)?;
                let last = add_months(self.anchor, 1)?
                    .date_naive()
                    .with_day(1)?
                    .pred_opt()?;
                Some((week_start(first), week_start(last) + Duration::days(6)))
            }
            CalendarView::Week => {
                let start = week_start(anchor);
                Some((start, start + Duration::days(6)))
            }
            CalendarView::Day => Some((anchor, anchor)),
            CalendarView::Appointments => None,
        }
    }

    /// Searched events that fall inside the visible range.
    pub fn visible_events(&self) -> Vec<&AppointmentResponse> {
        match self.visible_range() {
            Some((start, end)) => self
                .events
                .iter()
                .filter(|event| {
                    let day = event.date.date_naive();
                    day >= start && day <= end
                })
                .collect(),
            None => self.events.iter().collect(),
        }
    }

    /// Header title, e.g. `March 2024`.
    pub fn title(&self) -> String {
        self.anchor.format("%B %Y").to_string()
    }
}

fn add_months(at: DateTime<Utc>, amount: i32) -> Option<DateTime<Utc>> {
    let months = Months::new(amount.unsigned_abs());
    if amount >= 0 {
        at.checked_add_months(months)
    } else {
        at.checked_sub_months(months)
    }
}

fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_sunday()))
}

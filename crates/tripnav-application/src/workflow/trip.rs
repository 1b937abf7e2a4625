//! Per-trip workflow context.

use chrono::NaiveDate;
use std::sync::{Mutex, PoisonError};
use tripnav_core::navigation::{ActivityId, Route, TripDayId, TripId};

use crate::navigation::Navigator;

/// Long-lived state scoped to one trip.
///
/// Shared by every destination that references the trip (tabs, detail,
/// day views, activity editors). The context reaches navigation only through
/// the injected [`Navigator`]; it never holds the shell.
#[derive(Debug)]
pub struct TripWorkflow {
    trip_id: TripId,
    navigator: Navigator,
    selected_day: Mutex<Option<(NaiveDate, TripDayId)>>,
}

impl TripWorkflow {
    pub fn new(trip_id: TripId, navigator: Navigator) -> Self {
        tracing::debug!("[TripWorkflow] Created context for trip {}", trip_id);
        Self {
            trip_id,
            navigator,
            selected_day: Mutex::new(None),
        }
    }

    pub fn trip_id(&self) -> TripId {
        self.trip_id
    }

    pub fn selected_day(&self) -> Option<(NaiveDate, TripDayId)> {
        *self.selected_day.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Selects a day and navigates to its activity list.
    pub fn open_day(&self, date: NaiveDate, trip_day_id: TripDayId) -> bool {
        let mut selected = self.selected_day.lock().unwrap_or_else(PoisonError::into_inner);
        *selected = Some((date, trip_day_id));
        drop(selected);
        self.navigator.push(Route::ActivityDay {
            date,
            trip_id: self.trip_id,
            trip_day_id,
        })
    }

    /// Navigates to the add-activity form for the selected day.
    ///
    /// Returns `false` when no day is selected or the shell has stopped.
    pub fn add_activity(&self) -> bool {
        let Some((date, trip_day_id)) = self.selected_day() else {
            return false;
        };
        self.navigator.push(Route::AddActivity {
            date,
            trip_id: self.trip_id,
            trip_day_id,
        })
    }

    pub fn edit_activity(&self, activity_id: ActivityId) -> bool {
        let Some((date, trip_day_id)) = self.selected_day() else {
            return false;
        };
        self.navigator.push(Route::EditActivity {
            date,
            activity_id,
            trip_id: self.trip_id,
            trip_day_id,
        })
    }

    pub fn open_activity_images(&self, activity_id: ActivityId) -> bool {
        let Some((_, trip_day_id)) = self.selected_day() else {
            return false;
        };
        self.navigator.push(Route::ActivityImages {
            trip_id: self.trip_id,
            trip_day_id,
            activity_id,
        })
    }

    pub fn edit_trip(&self) -> bool {
        self.navigator.push(Route::EditTrip {
            trip_id: self.trip_id,
        })
    }

    /// Leaves the current screen.
    pub fn close(&self) -> bool {
        self.navigator.pop()
    }
}

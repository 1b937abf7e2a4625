//! Typed navigation destinations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a trip on the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(pub i64);

/// Identifier of one day within a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripDayId(pub i64);

/// Identifier of a scheduled activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub i64);

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TripDayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A navigation destination plus the identifiers it requires.
///
/// Routes are immutable values; two routes are equal when both the variant
/// and its payload match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "camelCase")]
pub enum Route {
    Register,
    SignIn,
    VerifyEmail,
    Otp {
        email: String,
    },
    NameStep,
    UsernameStep,
    Home,
    TripList,
    CreateTrip,
    #[serde(rename_all = "camelCase")]
    EditTrip {
        trip_id: TripId,
    },
    #[serde(rename_all = "camelCase")]
    TripTabs {
        trip_id: TripId,
    },
    #[serde(rename_all = "camelCase")]
    TripDetail {
        trip_id: TripId,
    },
    #[serde(rename_all = "camelCase")]
    ActivityDay {
        date: NaiveDate,
        trip_id: TripId,
        trip_day_id: TripDayId,
    },
    #[serde(rename_all = "camelCase")]
    AddActivity {
        date: NaiveDate,
        trip_id: TripId,
        trip_day_id: TripDayId,
    },
    #[serde(rename_all = "camelCase")]
    EditActivity {
        date: NaiveDate,
        activity_id: ActivityId,
        trip_id: TripId,
        trip_day_id: TripDayId,
    },
    #[serde(rename_all = "camelCase")]
    ActivityImages {
        trip_id: TripId,
        trip_day_id: TripDayId,
        activity_id: ActivityId,
    },
}

impl Route {
    /// Returns the trip this destination is scoped to, if any.
    ///
    /// This is the key the presentation layer uses to resolve a per-trip
    /// workflow context.
    pub fn trip_id(&self) -> Option<TripId> {
        match self {
            Route::EditTrip { trip_id }
            | Route::TripTabs { trip_id }
            | Route::TripDetail { trip_id }
            | Route::ActivityDay { trip_id, .. }
            | Route::AddActivity { trip_id, .. }
            | Route::EditActivity { trip_id, .. }
            | Route::ActivityImages { trip_id, .. } => Some(*trip_id),
            _ => None,
        }
    }

    /// Returns the trip day this destination is scoped to, if any.
    pub fn trip_day_id(&self) -> Option<TripDayId> {
        match self {
            Route::ActivityDay { trip_day_id, .. }
            | Route::AddActivity { trip_day_id, .. }
            | Route::EditActivity { trip_day_id, .. }
            | Route::ActivityImages { trip_day_id, .. } => Some(*trip_day_id),
            _ => None,
        }
    }

    /// Stable, payload-free name of the destination (used in logs).
    pub fn name(&self) -> &'static str {
        match self {
            Route::Register => "register",
            Route::SignIn => "signIn",
            Route::VerifyEmail => "verifyEmail",
            Route::Otp { .. } => "otp",
            Route::NameStep => "nameStep",
            Route::UsernameStep => "usernameStep",
            Route::Home => "home",
            Route::TripList => "tripList",
            Route::CreateTrip => "createTrip",
            Route::EditTrip { .. } => "editTrip",
            Route::TripTabs { .. } => "tripTabs",
            Route::TripDetail { .. } => "tripDetail",
            Route::ActivityDay { .. } => "activityDay",
            Route::AddActivity { .. } => "addActivity",
            Route::EditActivity { .. } => "editActivity",
            Route::ActivityImages { .. } => "activityImages",
        }
    }

    /// True for the onboarding/authentication flow destinations.
    pub fn is_auth_flow(&self) -> bool {
        matches!(
            self,
            Route::Register
                | Route::SignIn
                | Route::VerifyEmail
                | Route::Otp { .. }
                | Route::NameStep
                | Route::UsernameStep
        )
    }
}

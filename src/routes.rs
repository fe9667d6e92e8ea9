use crate::session::Session;
use crate::views::{
    make_reservation::MakeReservation, profile::Profile, reservations::ReservationList, Command,
    Page,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Reservations,
    Profile,
    MakeAReservation,
}

/// Links shown in the navigation bar, in display order
pub const NAV_LINKS: [(&str, Route); 3] = [
    ("Reservations", Route::Reservations),
    ("Profile", Route::Profile),
    ("Make a reservation", Route::MakeAReservation),
];

impl Route {
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Home),
            "/reservations" => Some(Route::Reservations),
            "/profile" => Some(Route::Profile),
            "/make-a-reservation" => Some(Route::MakeAReservation),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Reservations => "/reservations",
            Route::Profile => "/profile",
            Route::MakeAReservation => "/make-a-reservation",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home | Route::Reservations => "Reservations",
            Route::Profile => "Profile",
            Route::MakeAReservation => "Make a reservation",
        }
    }

    /// Routes rendering the same page collapse to one
    pub fn canonical(&self) -> Route {
        match self {
            Route::Home => Route::Reservations,
            other => *other,
        }
    }

    /// Fresh page model for this route plus the requests it issues on mount
    pub fn init(&self, session: &Session) -> (Page, Vec<Command>) {
        match self.canonical() {
            Route::Profile => {
                let (page, commands) = Profile::mount(session.profile);
                (Page::Profile(page), commands)
            }
            Route::MakeAReservation => {
                let (page, commands) =
                    MakeReservation::mount(session.student_id, session.instructor_id);
                (Page::MakeAReservation(page), commands)
            }
            _ => {
                let (page, commands) = ReservationList::mount(session.instructor_id);
                (Page::Reservations(page), commands)
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

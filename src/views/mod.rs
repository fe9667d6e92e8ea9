//! Page models
//!
//! Each page is a plain struct updated by [`Msg`]s. Updates never touch the
//! network: they return a [`Transition`] listing the requests to run, an
//! optional notice and an optional navigation, and the shell carries those
//! out. This keeps every page testable without a server or a browser.

pub mod make_reservation;
pub mod profile;
pub mod reservations;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::model::{
    NewReservation, Person, PersonId, PersonRef, PersonUpdate, Reservation, ReservationId,
};
use crate::routes::Route;
use make_reservation::{MakeReservation, ReservationForm};
use profile::{Profile, ProfileForm};
use reservations::ReservationList;
use tracing::trace;

/// A request a page wants performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadReservations(PersonId),
    LoadInstructor(PersonId),
    LoadPerson(PersonRef),
    SavePerson(PersonRef, PersonUpdate),
    CreateReservation(NewReservation),
}

impl Command {
    /// Perform the request, folding the outcome into the message that
    /// reports it back to the page
    pub async fn run(self, api: &ApiClient) -> Msg {
        match self {
            Command::LoadReservations(id) => {
                Msg::ReservationsLoaded(api.reservations_for_instructor(id).await)
            }
            Command::LoadInstructor(id) => Msg::InstructorLoaded(api.instructor(id).await),
            Command::LoadPerson(who) => Msg::PersonLoaded(api.person(who).await),
            Command::SavePerson(who, update) => {
                Msg::PersonSaved(api.update_person(who, &update).await)
            }
            Command::CreateReservation(reservation) => {
                Msg::ReservationCreated(api.create_reservation(&reservation).await)
            }
        }
    }
}

#[derive(Debug)]
pub enum Msg {
    ReservationsLoaded(Result<Vec<Reservation>, ApiError>),
    InstructorLoaded(Result<Person, ApiError>),
    PersonLoaded(Result<Person, ApiError>),
    PersonSaved(Result<(), ApiError>),
    ReservationCreated(Result<(), ApiError>),

    MarkReserved(ReservationId),
    EditProfile(ProfileForm),
    SaveProfile,
    EditReservation(ReservationForm),
    SubmitReservation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Failure(text) => text,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }
}

/// What a page asks for after handling a message
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub commands: Vec<Command>,
    pub notice: Option<Notice>,
    pub navigate: Option<Route>,
}

impl Transition {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn command(command: Command) -> Self {
        Self {
            commands: vec![command],
            ..Self::default()
        }
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            ..Self::default()
        }
    }

    pub fn navigate(mut self, route: Route) -> Self {
        self.navigate = Some(route);
        self
    }
}

#[derive(Debug)]
pub enum Page {
    Reservations(ReservationList),
    Profile(Profile),
    MakeAReservation(MakeReservation),
}

impl Page {
    pub fn update(&mut self, msg: Msg) -> Transition {
        match self {
            Page::Reservations(page) => page.update(msg),
            Page::Profile(page) => page.update(msg),
            Page::MakeAReservation(page) => page.update(msg),
        }
    }

    /// Whether the page has data to show, as opposed to still loading
    pub fn is_populated(&self) -> bool {
        match self {
            Page::Reservations(page) => page.is_populated(),
            Page::Profile(page) => page.is_populated(),
            Page::MakeAReservation(_) => true,
        }
    }
}

/// Log and drop a message the current page has no use for
pub(crate) fn ignore(page: &str, msg: Msg) -> Transition {
    trace!("{} ignoring message: {:?}", page, msg);
    Transition::none()
}

use super::{ignore, Command, Msg, Transition};
use crate::model::{Person, PersonId, Reservation, ReservationId};
use tracing::{debug, error};

/// Reservations of one instructor plus that instructor's profile
///
/// The two slices load independently and in any order.
#[derive(Debug, Default)]
pub struct ReservationList {
    reservations: Option<Vec<Reservation>>,
    instructor: Option<Person>,
}

impl ReservationList {
    pub fn mount(instructor_id: PersonId) -> (Self, Vec<Command>) {
        (
            Self::default(),
            vec![
                Command::LoadReservations(instructor_id),
                Command::LoadInstructor(instructor_id),
            ],
        )
    }

    pub fn reservations(&self) -> &[Reservation] {
        self.reservations.as_deref().unwrap_or_default()
    }

    pub fn instructor(&self) -> Option<&Person> {
        self.instructor.as_ref()
    }

    pub fn is_populated(&self) -> bool {
        self.reservations.is_some()
    }

    pub fn update(&mut self, msg: Msg) -> Transition {
        match msg {
            Msg::ReservationsLoaded(Ok(reservations)) => {
                debug!("Loaded {} reservations", reservations.len());
                self.reservations = Some(reservations);
            }
            Msg::ReservationsLoaded(Err(e)) => {
                error!("Error loading reservations: {}", e);
            }
            Msg::InstructorLoaded(Ok(instructor)) => {
                self.instructor = Some(instructor);
            }
            Msg::InstructorLoaded(Err(e)) => {
                error!("Error loading instructor: {}", e);
            }
            Msg::MarkReserved(id) => self.mark_reserved(id),
            other => return ignore("reservation list", other),
        }
        Transition::none()
    }

    // Local only: nothing is sent to the API and a reload restores the
    // server's state.
    fn mark_reserved(&mut self, id: ReservationId) {
        match self
            .reservations
            .as_mut()
            .and_then(|list| list.iter_mut().find(|r| r.id == id))
        {
            Some(reservation) => reservation.is_reserved = true,
            None => debug!("No reservation {} to mark", id),
        }
    }
}

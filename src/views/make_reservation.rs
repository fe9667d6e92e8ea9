use super::{ignore, Command, Msg, Notice, Transition};
use crate::model::{NewReservation, PersonId};
use crate::routes::Route;
use serde::Deserialize;
use tracing::{error, info};

/// Places offered by the meeting place picker
pub const MEETING_PLACES: [&str; 3] = [
    "pl. gen. Władysława Sikorskiego 2/2",
    "Kwiatowa 11",
    "Długa 33",
];

/// Values of the reservation form, named as the HTML inputs are
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReservationForm {
    #[serde(rename = "reservation-date", default)]
    pub date: String,
    #[serde(rename = "meeting-time", default)]
    pub time: String,
    #[serde(rename = "meeting-place", default)]
    pub place: String,
}

impl Default for ReservationForm {
    fn default() -> Self {
        Self {
            date: String::new(),
            time: String::new(),
            place: MEETING_PLACES[0].to_string(),
        }
    }
}

#[derive(Debug)]
pub struct MakeReservation {
    form: ReservationForm,
    student_id: PersonId,
    instructor_id: PersonId,
}

impl MakeReservation {
    pub fn mount(student_id: PersonId, instructor_id: PersonId) -> (Self, Vec<Command>) {
        (
            Self {
                form: ReservationForm::default(),
                student_id,
                instructor_id,
            },
            Vec::new(),
        )
    }

    pub fn form(&self) -> &ReservationForm {
        &self.form
    }

    /// Payload for the current form; always unreserved
    pub fn payload(&self) -> NewReservation {
        NewReservation {
            is_reserved: false,
            student_id: self.student_id,
            instructor_id: self.instructor_id,
            reservation_date: self.form.date.clone(),
            reservation_time: self.form.time.clone(),
            reservation_place: self.form.place.clone(),
        }
    }

    pub fn update(&mut self, msg: Msg) -> Transition {
        match msg {
            Msg::EditReservation(form) => {
                self.form = form;
                Transition::none()
            }
            Msg::SubmitReservation => Transition::command(Command::CreateReservation(self.payload())),
            Msg::ReservationCreated(Ok(())) => {
                info!(
                    "Reservation created for {} {} at {}",
                    self.form.date, self.form.time, self.form.place
                );
                Transition::notice(Notice::Success("Reservation created".to_string()))
                    .navigate(Route::Reservations)
            }
            Msg::ReservationCreated(Err(e)) => {
                error!("Error creating reservation: {}", e);
                Transition::notice(Notice::Failure(format!(
                    "Could not create the reservation: {}",
                    e
                )))
            }
            other => ignore("reservation form", other),
        }
    }
}

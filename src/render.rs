//! HTML for the shell's active page

use crate::routes::{Route, NAV_LINKS};
use crate::shell::Shell;
use crate::views::make_reservation::{MakeReservation, MEETING_PLACES};
use crate::views::profile::Profile;
use crate::views::reservations::ReservationList;
use crate::views::{Notice, Page};
use askama::Template;

pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

pub struct NoticeView {
    pub class: &'static str,
    pub text: String,
}

impl From<Notice> for NoticeView {
    fn from(notice: Notice) -> Self {
        Self {
            class: if notice.is_success() {
                "notice-success"
            } else {
                "notice-failure"
            },
            text: notice.text().to_string(),
        }
    }
}

/// Parts shared by every page
pub struct Chrome {
    pub heading: String,
    pub nav: Vec<NavLink>,
    pub notice: Option<NoticeView>,
}

impl Chrome {
    fn new(shell: &mut Shell) -> Self {
        let route = shell.route();
        Self {
            heading: format!("{} | {}", route.title(), shell.session().role()),
            nav: NAV_LINKS
                .iter()
                .map(|&(label, target)| NavLink {
                    label,
                    href: target.path(),
                    active: target.canonical() == route.canonical(),
                })
                .collect(),
            notice: shell.take_notice().map(NoticeView::from),
        }
    }
}

pub struct ReservationRow {
    pub id: u64,
    pub time: String,
    pub date: String,
    pub instructor: String,
    pub place: String,
    pub reserved: bool,
}

#[derive(Template)]
#[template(path = "reservations.html")]
pub struct ReservationsTemplate {
    pub chrome: Chrome,
    pub loading: bool,
    pub rows: Vec<ReservationRow>,
}

impl ReservationsTemplate {
    fn new(chrome: Chrome, page: &ReservationList) -> Self {
        let instructor = page
            .instructor()
            .map(|p| p.full_name())
            .unwrap_or_default();
        Self {
            chrome,
            loading: !page.is_populated(),
            rows: page
                .reservations()
                .iter()
                .map(|r| ReservationRow {
                    id: r.id,
                    time: r.display_time(),
                    date: r.display_date(),
                    instructor: instructor.clone(),
                    place: r.reservation_place.clone(),
                    reserved: r.is_reserved,
                })
                .collect(),
        }
    }
}

pub struct PlaceOption {
    pub name: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "make_reservation.html")]
pub struct MakeReservationTemplate {
    pub chrome: Chrome,
    pub action: &'static str,
    pub date: String,
    pub time: String,
    pub places: Vec<PlaceOption>,
}

impl MakeReservationTemplate {
    fn new(chrome: Chrome, page: &MakeReservation) -> Self {
        let form = page.form();
        Self {
            chrome,
            action: Route::MakeAReservation.path(),
            date: form.date.clone(),
            time: form.time.clone(),
            places: MEETING_PLACES
                .iter()
                .map(|&name| PlaceOption {
                    name,
                    selected: name == form.place,
                })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub chrome: Chrome,
    pub action: &'static str,
    pub loading: bool,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub school: String,
}

impl ProfileTemplate {
    fn new(chrome: Chrome, page: &Profile) -> Self {
        let fields = page.fields().cloned().unwrap_or_default();
        Self {
            chrome,
            action: Route::Profile.path(),
            loading: !page.is_populated(),
            name: fields.name,
            surname: fields.surname,
            email: fields.email,
            password: fields.password,
            school: fields.name_of_school,
        }
    }
}

/// Render the active page, consuming the pending notice
///
/// Returns `Ok(None)` when nothing has been mounted yet.
pub fn render(shell: &mut Shell) -> askama::Result<Option<String>> {
    if shell.page().is_none() {
        return Ok(None);
    }
    let chrome = Chrome::new(shell);
    let html = match shell.page() {
        Some(Page::Reservations(page)) => ReservationsTemplate::new(chrome, page).render()?,
        Some(Page::MakeAReservation(page)) => {
            MakeReservationTemplate::new(chrome, page).render()?
        }
        Some(Page::Profile(page)) => ProfileTemplate::new(chrome, page).render()?,
        None => return Ok(None),
    };
    Ok(Some(html))
}

use super::{ignore, Command, Msg, Notice, Transition};
use crate::model::{PersonRef, PersonUpdate};
use serde::Deserialize;
use tracing::{error, info, warn};

const NOT_LOADED: &str = "The profile has not loaded, nothing was saved";

/// The editable profile inputs. School name is read-only for every role
/// and never comes from the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug)]
pub struct Profile {
    who: PersonRef,
    fields: Option<PersonUpdate>,
}

impl Profile {
    pub fn mount(who: PersonRef) -> (Self, Vec<Command>) {
        (Self { who, fields: None }, vec![Command::LoadPerson(who)])
    }

    pub fn who(&self) -> PersonRef {
        self.who
    }

    /// Current field values, `None` until the record has loaded
    pub fn fields(&self) -> Option<&PersonUpdate> {
        self.fields.as_ref()
    }

    pub fn is_populated(&self) -> bool {
        self.fields.is_some()
    }

    pub fn update(&mut self, msg: Msg) -> Transition {
        match msg {
            Msg::PersonLoaded(Ok(person)) => {
                self.fields = Some(person.into());
                Transition::none()
            }
            Msg::PersonLoaded(Err(e)) => {
                error!("Error loading {} {}: {}", self.who.role, self.who.id, e);
                Transition::none()
            }
            // without a loaded record there is no school name to send back
            Msg::EditProfile(_) | Msg::SaveProfile if self.fields.is_none() => {
                warn!("Refusing to edit unloaded {} {}", self.who.role, self.who.id);
                Transition::notice(Notice::Failure(NOT_LOADED.to_string()))
            }
            Msg::EditProfile(form) => {
                if let Some(fields) = self.fields.as_mut() {
                    fields.name = form.name;
                    fields.surname = form.surname;
                    fields.email = form.email;
                    fields.password = form.password;
                }
                Transition::none()
            }
            Msg::SaveProfile => match &self.fields {
                Some(fields) => Transition::command(Command::SavePerson(self.who, fields.clone())),
                None => Transition::none(),
            },
            Msg::PersonSaved(Ok(())) => {
                info!("Saved {} {}", self.who.role, self.who.id);
                Transition::notice(Notice::Success("Profile saved".to_string()))
            }
            // edits stay in place so the user can retry
            Msg::PersonSaved(Err(e)) => {
                error!("Error saving {} {}: {}", self.who.role, self.who.id, e);
                Transition::notice(Notice::Failure(format!(
                    "Could not save the profile: {}",
                    e
                )))
            }
            other => ignore("profile", other),
        }
    }
}

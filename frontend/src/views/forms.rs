//! Modal form bodies for creating and editing catalogue entries.

use maud::{Markup, html};

use crate::domain::{DEFAULT_DURATION_MINUTES, Room, Subscription, Training, User};

pub const CREATE_TRAINING_FORM: &str = "createTrainingForm";
pub const EDIT_TRAINING_FORM: &str = "editTrainingForm";
pub const CREATE_SUBSCRIPTION_FORM: &str = "createSubscriptionForm";
pub const EDIT_SUBSCRIPTION_FORM: &str = "editSubscriptionForm";
pub const ADD_ROOM_FORM: &str = "addRoomForm";
pub const EDIT_ROOM_FORM: &str = "editRoomForm";

fn group(label: &str, field: Markup) -> Markup {
    html! {
        div.form-group {
            label.form-label { (label) }
            (field)
        }
    }
}

/// Training form; `existing` pre-fills the edit variant.
///
/// Trainer and room can only be chosen on creation; the update endpoint
/// does not accept them.
pub fn training_form(existing: Option<&Training>, trainers: &[User], rooms: &[Room]) -> Markup {
    let form_id = if existing.is_some() {
        EDIT_TRAINING_FORM
    } else {
        CREATE_TRAINING_FORM
    };
    let duration = existing.map_or(DEFAULT_DURATION_MINUTES, Training::duration_minutes);
    html! {
        form id=(form_id) {
            (group("Название *", html! {
                input.form-input type="text" name="title" required value=[existing.map(|t| t.title.as_str())];
            }))
            (group("Описание", html! {
                textarea.form-input name="description" rows="3" {
                    (existing.and_then(Training::description_text).unwrap_or_default())
                }
            }))
            (group("Дата и время *", html! {
                input.form-input type="datetime-local" name="date" required
                    value=[existing.map(Training::schedule_input)];
            }))
            (group("Длительность (минуты) *", html! {
                input.form-input type="number" name="duration" required min="15" step="15" value=(duration);
            }))
            @if existing.is_none() {
                (group("Тренер *", html! {
                    select.form-input name="trainer_id" required {
                        option value="" { "Выберите тренера" }
                        @for trainer in trainers {
                            option value=(trainer.id) { (trainer.full_name()) }
                        }
                    }
                }))
                (group("Помещение *", html! {
                    select.form-input name="room_id" required {
                        option value="" { "Выберите помещение" }
                        @for room in rooms {
                            option value=(room.id) { (room.title) }
                        }
                    }
                }))
            }
        }
    }
}

pub fn subscription_form(existing: Option<&Subscription>) -> Markup {
    let form_id = if existing.is_some() {
        EDIT_SUBSCRIPTION_FORM
    } else {
        CREATE_SUBSCRIPTION_FORM
    };
    html! {
        form id=(form_id) {
            (group("Название *", html! {
                input.form-input type="text" name="title" required minlength="2" maxlength="30"
                    value=[existing.map(|s| s.title.as_str())];
            }))
            (group("Цена (рубли) *", html! {
                input.form-input type="number" name="price" required min="1"
                    value=(existing.map_or(1000, |s| s.price));
            }))
            (group("Длительность (дни) *", html! {
                input.form-input type="number" name="duration_days" required min="1"
                    value=(existing.map_or(30, |s| s.duration_days));
            }))
        }
    }
}

pub fn room_form(existing: Option<&Room>) -> Markup {
    let form_id = if existing.is_some() { EDIT_ROOM_FORM } else { ADD_ROOM_FORM };
    html! {
        form id=(form_id) {
            (group("Название помещения *", html! {
                input.form-input type="text" name="title" required minlength="2" maxlength="30"
                    placeholder="Например: Зал №1" value=[existing.map(|r| r.title.as_str())];
            }))
            (group("Вместимость *", html! {
                input.form-input type="number" name="capacity" required min="1" max="1000"
                    placeholder="Количество человек" value=[existing.map(|r| r.capacity)];
            }))
        }
    }
}

/// Body of a confirmation dialog.
pub fn confirm_body(message: &str) -> Markup {
    html! { p { (message) } }
}

/// Confirmation body for deleting a room, with the side-effect warning.
pub fn delete_room_body(room: &Room) -> Markup {
    html! {
        p { "Вы уверены, что хотите удалить помещение \"" (room.title) "\"?" }
        p {
            strong { "Внимание:" }
            " Все связанные с ним тренировки также будут затронуты."
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Role;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn create_training_form_lists_trainers_and_rooms() {
        let trainers = vec![User::new(2, "Анна", "Петрова", "a@club.ru", Role::Trainer)];
        let rooms = vec![Room {
            id: 4,
            title: "Зал №1".into(),
            capacity: 20,
        }];
        let html = training_form(None, &trainers, &rooms).into_string();
        assert!(html.contains("id=\"createTrainingForm\""));
        assert!(html.contains("<option value=\"2\">Анна Петрова</option>"));
        assert!(html.contains("<option value=\"4\">Зал №1</option>"));
        assert!(html.contains("value=\"60\""));
    }

    #[rstest]
    fn edit_training_form_prefills_schedule() {
        let training: Training = serde_json::from_value(json!({
            "id": 1, "title": "Бокс", "date": "2026-10-20",
            "start_time": "18:00:00", "end_time": "19:30:00"
        }))
        .expect("training fixture");
        let html = training_form(Some(&training), &[], &[]).into_string();
        assert!(html.contains("id=\"editTrainingForm\""));
        assert!(html.contains("value=\"2026-10-20T18:00\""));
        assert!(html.contains("value=\"90\""));
        assert!(!html.contains("trainer_id"));
    }

    #[rstest]
    fn room_form_defaults_to_blank_values() {
        let html = room_form(None).into_string();
        assert!(html.contains("id=\"addRoomForm\""));
        assert!(!html.contains("value="));
    }

    #[rstest]
    fn delete_room_body_escapes_title() {
        let room = Room {
            id: 1,
            title: "<b>Зал</b>".into(),
            capacity: 5,
        };
        assert!(delete_room_body(&room).into_string().contains("&lt;b&gt;Зал&lt;/b&gt;"));
    }
}

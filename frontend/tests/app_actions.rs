//! Actions and form submissions dispatched through the application shell.

#[allow(dead_code)]
mod support;

use std::time::Duration;

use frontend::domain::RequestStatus;
use frontend::domain::ports::{FormData, ModalResponse};
use frontend::views::catalogue::SEARCH_INPUT;
use frontend::views::{Action, LOGIN_FORM, REGISTER_FORM};
use rstest::rstest;
use serde_json::json;
use support::harness::{PASSWORD, admin, client, trainer};
use support::{Harness, StubBackend};

fn schedule(backend: StubBackend) -> StubBackend {
    backend
        .with_room(1, "Большой зал", 10)
        .with_training(json!({
            "id": 1, "title": "Йога", "date": "2026-10-19",
            "start_time": "09:00:00", "end_time": "10:00:00",
            "room": {"id": 1, "title": "Большой зал", "capacity": 10}, "booking_count": 0
        }))
        .with_training(json!({
            "id": 2, "title": "Бокс", "date": "2026-10-22",
            "start_time": "18:00:00", "end_time": "19:00:00",
            "room": {"id": 2, "title": "Ринг", "capacity": 1}, "booking_count": 1
        }))
}

fn confirm() -> Option<ModalResponse> {
    Some(ModalResponse::new("confirm"))
}

#[rstest]
#[tokio::test]
async fn login_success_lands_on_the_schedule() {
    let mut harness = Harness::new(schedule(StubBackend::new()).with_account(client(), PASSWORD));
    harness.open("/login").await;
    let form = FormData::new()
        .with("email", "ivan@club.ru")
        .with("password", PASSWORD);

    harness.submit(LOGIN_FORM, form).await;

    assert_eq!(harness.current_path(), "/trainings");
    assert!(harness.toasts().contains(&"Вход выполнен успешно!".to_owned()));
    let html = harness.html();
    assert!(html.contains("Иван Иванов"));
    assert!(html.contains("Мои записи"));
}

#[rstest]
#[case("ivan@club.ru", "wrong", "Неверный email или пароль")]
#[case("not-an-email", PASSWORD, "Некорректный email")]
#[tokio::test]
async fn login_failures_show_inline_errors(
    #[case] email: &str,
    #[case] password: &str,
    #[case] expected: &str,
) {
    let mut harness = Harness::new(StubBackend::new().with_account(client(), PASSWORD));
    harness.open("/login").await;
    let form = FormData::new().with("email", email).with("password", password);

    harness.submit(LOGIN_FORM, form).await;

    assert_eq!(harness.current_path(), "/login");
    assert_eq!(harness.surface.form_error(LOGIN_FORM).as_deref(), Some(expected));
}

fn registration(password: &str, confirm: &str) -> FormData {
    FormData::new()
        .with("name", "Пётр")
        .with("surname", "Сидоров")
        .with("email", "petr@club.ru")
        .with("phone_number", "")
        .with("password", password)
        .with("confirm_password", confirm)
}

#[rstest]
#[tokio::test]
async fn registration_checks_the_confirmation_first() {
    let mut harness = Harness::new(StubBackend::new());
    harness.open("/register").await;

    harness
        .submit(REGISTER_FORM, registration("secret123", "secret124"))
        .await;

    assert_eq!(
        harness.surface.form_error(REGISTER_FORM).as_deref(),
        Some("Пароли не совпадают")
    );
    assert_eq!(harness.backend.call_count("register"), 0);
}

#[rstest]
#[tokio::test]
async fn registration_success_sends_the_user_to_login() {
    let mut harness = Harness::new(StubBackend::new());
    harness.open("/register").await;

    harness
        .submit(REGISTER_FORM, registration("secret123", "secret123"))
        .await;

    assert_eq!(harness.current_path(), "/login");
    assert_eq!(harness.backend.account_emails(), vec!["petr@club.ru".to_owned()]);
    assert!(
        harness
            .toasts()
            .contains(&"Регистрация успешна! Войдите в систему.".to_owned())
    );
}

#[rstest]
#[tokio::test]
async fn logout_returns_home_as_a_guest() {
    let mut harness = Harness::new(StubBackend::new().signed_in(client()));
    harness.open("/trainings").await;

    harness
        .app
        .dispatch_handler("handleLogout()", FormData::new())
        .await
        .expect("known handler");

    assert_eq!(harness.current_path(), "/");
    assert!(harness.toasts().contains(&"Вы вышли из системы".to_owned()));
    assert!(harness.html().contains("Войти"));
    assert!(!harness.app.context().session.is_authenticated());
}

#[rstest]
#[tokio::test]
async fn unknown_handlers_are_rejected() {
    let mut harness = Harness::new(StubBackend::new());
    harness.open("/").await;

    let result = harness
        .app
        .dispatch_handler("launchRockets()", FormData::new())
        .await;

    assert!(result.is_err());
}

#[rstest]
#[tokio::test]
async fn booking_moves_the_client_to_their_bookings() {
    let mut harness = Harness::new(schedule(StubBackend::new()).signed_in(client()));
    harness.open("/trainings").await;

    harness.invoke(Action::BookTraining(1)).await;

    assert_eq!(harness.current_path(), "/my-bookings");
    assert!(
        harness
            .toasts()
            .contains(&"Вы успешно записались на тренировку!".to_owned())
    );
    assert!(harness.html().contains("Йога"));
}

#[rstest]
#[tokio::test]
async fn booking_failures_become_toasts() {
    let mut harness = Harness::new(schedule(StubBackend::new()).signed_in(client()));
    harness.open("/trainings").await;

    harness.invoke(Action::BookTraining(2)).await;

    assert_eq!(harness.current_path(), "/trainings");
    assert_eq!(
        harness.surface.last_notification().map(|n| n.message),
        Some("Ошибка записи: Нет свободных мест".to_owned())
    );
}

#[rstest]
#[tokio::test]
async fn cancelling_a_booking_requires_confirmation() {
    let mut harness = Harness::new(schedule(StubBackend::new()).signed_in(client()));
    harness.open("/trainings").await;
    harness.invoke(Action::BookTraining(1)).await;

    harness.surface.answer_next_modal(None);
    harness.invoke(Action::CancelBooking(1)).await;
    assert_eq!(harness.backend.call_count("cancel_booking"), 0);

    harness.surface.answer_next_modal(confirm());
    harness.invoke(Action::CancelBooking(1)).await;

    assert_eq!(harness.backend.call_count("cancel_booking"), 1);
    assert!(harness.backend.bookings_snapshot().is_empty());
    assert!(harness.html().contains("Нет записей"));
    assert_eq!(
        harness.surface.modal_titles(),
        vec!["Подтверждение".to_owned(), "Подтверждение".to_owned()]
    );
}

#[rstest]
#[tokio::test]
async fn staff_create_trainings_through_the_modal_form() {
    let backend = schedule(StubBackend::new())
        .signed_in(admin())
        .with_account(trainer(), PASSWORD);
    let mut harness = Harness::new(backend);
    harness.open("/trainings").await;
    let form = FormData::new()
        .with("title", "Кроссфит")
        .with("description", "Интервальная тренировка")
        .with("date", "2026-10-25T10:00")
        .with("duration", "45")
        .with("trainer_id", "2")
        .with("room_id", "1");
    harness
        .surface
        .answer_next_modal(Some(ModalResponse::new("create").with_form(form)));

    harness.invoke(Action::CreateTraining).await;

    let created = harness
        .backend
        .trainings_snapshot()
        .into_iter()
        .find(|training| training.title == "Кроссфит")
        .expect("training created");
    assert_eq!(created.start_time, "10:00:00");
    assert_eq!(created.end_time, "10:45:00");
    assert!(harness.toasts().contains(&"Тренировка создана!".to_owned()));
    assert!(harness.html().contains("Кроссфит"));
    assert_eq!(harness.surface.modal_titles(), vec!["Создать тренировку".to_owned()]);
}

#[rstest]
#[tokio::test]
async fn invalid_training_forms_are_not_sent() {
    let mut harness = Harness::new(schedule(StubBackend::new()).signed_in(admin()));
    harness.open("/trainings").await;
    let form = FormData::new()
        .with("title", "Й")
        .with("date", "2026-10-25T10:00")
        .with("duration", "45")
        .with("trainer_id", "2")
        .with("room_id", "1");
    harness
        .surface
        .answer_next_modal(Some(ModalResponse::new("create").with_form(form)));

    harness.invoke(Action::CreateTraining).await;

    assert_eq!(harness.backend.call_count("create_training"), 0);
    let last = harness.surface.last_notification().expect("error toast");
    assert!(last.message.starts_with("Ошибка создания: "));
}

#[rstest]
#[tokio::test]
async fn editing_a_missing_training_reports_it() {
    let mut harness = Harness::new(schedule(StubBackend::new()).signed_in(admin()));
    harness.open("/trainings").await;

    harness.invoke(Action::EditTraining(99)).await;

    assert_eq!(
        harness.surface.last_notification().map(|n| n.message),
        Some("Тренировка не найдена".to_owned())
    );
    assert!(harness.surface.modal_titles().is_empty());
}

#[rstest]
#[tokio::test]
async fn deleting_a_training_reloads_the_schedule() {
    let mut harness = Harness::new(schedule(StubBackend::new()).signed_in(trainer()));
    harness.open("/trainings").await;
    harness.surface.answer_next_modal(confirm());

    harness.invoke(Action::DeleteTraining(2)).await;

    assert_eq!(harness.backend.trainings_snapshot().len(), 1);
    assert!(harness.toasts().contains(&"Тренировка удалена".to_owned()));
    assert!(!harness.html().contains("Бокс"));
}

#[rstest]
#[tokio::test]
async fn admins_edit_subscriptions() {
    let backend = StubBackend::new()
        .signed_in(admin())
        .with_subscription(3, "Месяц", 3000, 30);
    let mut harness = Harness::new(backend);
    harness.open("/subscriptions").await;
    let form = FormData::new()
        .with("title", "Месяц+")
        .with("price", "3500")
        .with("duration_days", "31");
    harness
        .surface
        .answer_next_modal(Some(ModalResponse::new("save").with_form(form)));

    harness.invoke(Action::EditSubscription(3)).await;

    let updated = harness.backend.subscriptions_snapshot();
    assert_eq!(updated[0].title, "Месяц+");
    assert_eq!(updated[0].price, 3500);
    assert!(harness.toasts().contains(&"Абонемент обновлен!".to_owned()));
    assert!(harness.html().contains("Месяц+"));
}

#[rstest]
#[tokio::test]
async fn buying_a_subscription_files_a_request() {
    let backend = StubBackend::new()
        .signed_in(client())
        .with_subscription(3, "Месяц", 3000, 30);
    let mut harness = Harness::new(backend);
    harness.open("/subscriptions").await;
    harness.surface.answer_next_modal(confirm());

    harness.invoke(Action::BuySubscription(3)).await;

    assert_eq!(harness.current_path(), "/profile");
    assert_eq!(harness.surface.modal_titles(), vec!["Подтверждение покупки".to_owned()]);
    assert_eq!(harness.backend.call_count("request_membership"), 1);
}

fn pending_request(backend: StubBackend) -> StubBackend {
    backend.with_request(json!({
        "id": 50,
        "user": {"id": 7, "first_name": "Иван", "last_name": "Иванов", "email": "ivan@club.ru"},
        "subscription": {"id": 3, "title": "Месяц", "price": 3000, "duration_days": 30},
        "status": "pending",
        "created_at": "2026-10-18T09:30:00"
    }))
}

#[rstest]
#[case(Action::ApproveRequest(50), RequestStatus::Approved, "Заявка одобрена! Абонемент активирован.")]
#[case(Action::RejectRequest(50), RequestStatus::Rejected, "Заявка отклонена.")]
#[tokio::test]
async fn admins_decide_membership_requests(
    #[case] action: Action,
    #[case] status: RequestStatus,
    #[case] toast: &str,
) {
    let mut harness = Harness::new(pending_request(StubBackend::new().signed_in(admin())));
    harness.open("/admin").await;
    harness.surface.answer_next_modal(confirm());

    harness.invoke(action).await;

    assert_eq!(harness.backend.request_status(50), Some(status));
    assert!(harness.toasts().contains(&toast.to_owned()));
    assert_eq!(harness.backend.call_count("membership_requests"), 2);
}

#[rstest]
#[tokio::test]
async fn toggling_request_details_does_not_refetch() {
    let mut harness = Harness::new(pending_request(StubBackend::new().signed_in(admin())));
    harness.open("/admin").await;
    assert!(harness.html().contains("▶"));

    harness.invoke(Action::ToggleRequest(50)).await;

    assert!(harness.html().contains("▼"));
    assert_eq!(harness.backend.call_count("membership_requests"), 1);
}

#[rstest]
#[tokio::test]
async fn admins_manage_rooms() {
    let backend = StubBackend::new().signed_in(admin()).with_room(1, "Большой зал", 10);
    let mut harness = Harness::new(backend);
    harness.open("/admin").await;

    let form = FormData::new().with("title", "Малый зал").with("capacity", "8");
    harness
        .surface
        .answer_next_modal(Some(ModalResponse::new("confirm").with_form(form)));
    harness.invoke(Action::AddRoom).await;
    assert!(harness.toasts().contains(&"Помещение успешно добавлено".to_owned()));
    assert!(harness.html().contains("Малый зал"));

    let form = FormData::new().with("title", "Главный зал").with("capacity", "12");
    harness
        .surface
        .answer_next_modal(Some(ModalResponse::new("confirm").with_form(form)));
    harness.invoke(Action::EditRoom(1)).await;
    assert!(harness.toasts().contains(&"Помещение успешно обновлено".to_owned()));

    harness.surface.answer_next_modal(confirm());
    harness.invoke(Action::DeleteRoom(1)).await;
    let titles: Vec<String> = harness
        .backend
        .rooms_snapshot()
        .into_iter()
        .map(|room| room.title)
        .collect();
    assert_eq!(titles, vec!["Малый зал".to_owned()]);

    harness.invoke(Action::EditRoom(404)).await;
    assert_eq!(
        harness.surface.last_notification().map(|n| n.message),
        Some("Помещение не найдено".to_owned())
    );
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn search_input_is_debounced() {
    let mut harness = Harness::new(schedule(StubBackend::new()));
    harness.open("/trainings").await;

    for query in ["б", "бо", "бок"] {
        let form = FormData::new().with(SEARCH_INPUT, query);
        harness.invoke_with(Action::SearchTrainings, form).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(harness.html().contains("Показано 2 из 2"));

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(harness.html().contains("Показано 1 из 2"));
    assert!(harness.html().contains("value=\"бок\""));
}

#[rstest]
#[tokio::test]
async fn reset_restores_the_full_schedule() {
    let mut harness = Harness::new(schedule(StubBackend::new()));
    harness.open("/trainings").await;
    let form = FormData::new().with(SEARCH_INPUT, "йога");
    harness.invoke_with(Action::FilterTrainings, form).await;
    assert!(harness.html().contains("Показано 1 из 2"));

    harness.invoke(Action::ResetFilters).await;

    assert!(harness.html().contains("Показано 2 из 2"));
    assert!(harness.toasts().contains(&"Фильтры сброшены".to_owned()));
}

//! Application shell.
//!
//! [`App`] wires the router, guards and page controllers around one
//! [`PageContext`] and turns UI events into controller calls. Actions that
//! destroy or commit something ask for confirmation through a modal first;
//! every failure ends up as a toast or an inline form error.

use std::sync::Arc;

use futures_util::future::try_join;
use maud::Markup;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::domain::ports::{FormData, History, Modal, ModalButton, ModalResponse, Notification};
use crate::domain::{
    AvailabilityFilter, DateFilter, Error, ListenerHandle, LoginCredentials, Registration,
    RegistrationForm, RequestStatus, Role, Room, RoomDraft, SubscriptionDraft, TrainingDraft,
    TrainingFilter, TrainingSchedule, TrainingUpdate, User,
};
use crate::guards::AuthGuard;
use crate::pages::{
    AdminPage, HomePage, LoginPage, MyBookingsPage, MyTrainingsPage, NotFoundPage, PageContext,
    PageOutcome, ProfilePage, RegisterPage, SubscriptionsPage, TrainingsPage,
};
use crate::router::{ClickOutcome, ClickTarget, NOT_FOUND_PATH, NavigationOutcome, Router};
use crate::support::Debouncer;
use crate::views::catalogue::{AVAILABILITY_SELECT, DATE_SELECT, SEARCH_INPUT};
use crate::views::forms::{confirm_body, delete_room_body, room_form, subscription_form, training_form};
use crate::views::{Action, AdminSection, LOGIN_FORM, REGISTER_FORM};

const TRAININGS_PATH: &str = "/trainings";

/// Something the user did in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Programmatic navigation.
    Navigate(String),
    /// A click on an anchor.
    Click(ClickTarget),
    /// Back/forward in history.
    PopState,
    /// An inline handler fired; `form` carries the filter bar values.
    Invoke { action: Action, form: FormData },
    /// A form was submitted.
    Submit { form_id: String, form: FormData },
}

impl AppEvent {
    pub fn invoke(action: Action) -> Self {
        Self::Invoke {
            action,
            form: FormData::default(),
        }
    }

    pub fn submit(form_id: impl Into<String>, form: FormData) -> Self {
        Self::Submit {
            form_id: form_id.into(),
            form,
        }
    }
}

/// Result of a confirmation or form modal.
enum Choice {
    Confirmed(FormData),
    Dismissed,
}

fn cancel_button() -> ModalButton {
    ModalButton::new("Отмена", "cancel", "secondary")
}

/// Trainings filter as submitted by the filter bar; unknown values fall back
/// to "all".
pub fn filter_from_form(form: &FormData) -> TrainingFilter {
    TrainingFilter {
        query: form.text(SEARCH_INPUT).trim().to_owned(),
        date: form.text(DATE_SELECT).parse().unwrap_or(DateFilter::All),
        availability: form
            .text(AVAILABILITY_SELECT)
            .parse()
            .unwrap_or(AvailabilityFilter::All),
    }
}

fn trainers(users: Vec<User>) -> Vec<User> {
    users
        .into_iter()
        .filter(|user| user.has_role(&Role::Trainer))
        .collect()
}

fn schedule_from_form(form: &FormData) -> Result<TrainingSchedule, Error> {
    let duration = form.parse::<i64>("duration").unwrap_or(0);
    TrainingSchedule::from_input(form.text("date"), duration)
        .map_err(|error| Error::invalid_request(error.to_string()))
}

fn subscription_draft(form: &FormData) -> Result<SubscriptionDraft, Error> {
    SubscriptionDraft::new(
        form.text("title"),
        form.parse("price").unwrap_or(0),
        form.parse("duration_days").unwrap_or(0),
    )
    .map_err(|error| Error::invalid_request(error.to_string()))
}

fn room_draft(form: &FormData) -> Result<RoomDraft, Error> {
    RoomDraft::new(form.text("title"), form.parse("capacity").unwrap_or(0))
        .map_err(|error| Error::invalid_request(error.to_string()))
}

/// The running client.
pub struct App {
    router: Router,
    history: Arc<dyn History>,
    session_changes: mpsc::UnboundedReceiver<()>,
    listener: ListenerHandle,
    search: Debouncer,
}

impl App {
    /// Build the shell with every route and the authentication guard.
    pub fn new(ctx: PageContext, history: Arc<dyn History>) -> Self {
        let mut router = Router::new(ctx.clone(), Arc::clone(&history));
        router.add_route("/", HomePage);
        router.add_route("/login", LoginPage);
        router.add_route("/register", RegisterPage);
        router.add_route("/trainings", TrainingsPage);
        router.add_route("/subscriptions", SubscriptionsPage);
        router.add_route("/my-bookings", MyBookingsPage);
        router.add_route("/my-trainings", MyTrainingsPage);
        router.add_route("/profile", ProfilePage);
        router.add_route("/admin", AdminPage);
        router.add_route(NOT_FOUND_PATH, NotFoundPage);
        router.before_each(AuthGuard::new(
            Arc::clone(&ctx.session),
            Arc::clone(&ctx.surface),
        ));

        let (tx, session_changes) = mpsc::unbounded_channel();
        let listener = ctx.session.subscribe(move |user| {
            debug!(signed_in = user.is_some(), "session changed");
            // A closed channel means the app is gone; nothing to refresh.
            let _ = tx.send(());
        });

        Self {
            router,
            history,
            session_changes,
            listener,
            search: Debouncer::default(),
        }
    }

    pub fn context(&self) -> &PageContext {
        self.router.context()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Restore the session, then render whatever history points at.
    pub async fn start(&mut self) -> NavigationOutcome {
        let signed_in = self.context().session.check_auth().await;
        info!(signed_in, "client started");
        self.discard_session_changes();
        self.router.start().await
    }

    /// Guarded navigation to `path`, reporting how it ended.
    pub async fn navigate(&mut self, path: &str) -> NavigationOutcome {
        let outcome = self.router.navigate(path).await;
        if self.take_session_changes() {
            return self.router.refresh().await;
        }
        outcome
    }

    /// Handle one UI event, then refresh the route if the session changed.
    pub async fn dispatch(&mut self, event: AppEvent) {
        match event {
            AppEvent::Navigate(path) => {
                self.router.navigate(&path).await;
            }
            AppEvent::Click(target) => {
                if let ClickOutcome::PassThrough = self.router.on_click(&target).await {
                    debug!(href = ?target.href, "click left to the browser");
                }
            }
            AppEvent::PopState => {
                self.router.pop_state().await;
            }
            AppEvent::Invoke { action, form } => self.invoke(action, form).await,
            AppEvent::Submit { form_id, form } => self.submit(&form_id, &form).await,
        }
        if self.take_session_changes() {
            self.router.refresh().await;
        }
    }

    /// Parse an inline handler expression and dispatch it.
    pub async fn dispatch_handler(&mut self, handler: &str, form: FormData) -> Result<(), Error> {
        let action = handler
            .parse::<Action>()
            .map_err(|error| Error::invalid_request(error.to_string()))?;
        self.dispatch(AppEvent::Invoke { action, form }).await;
        Ok(())
    }

    fn take_session_changes(&mut self) -> bool {
        let mut changed = false;
        while self.session_changes.try_recv().is_ok() {
            changed = true;
        }
        changed
    }

    fn discard_session_changes(&mut self) {
        self.take_session_changes();
    }

    fn toast(&self, notification: Notification) {
        self.context().surface.notify(notification);
    }

    fn fail(&self, prefix: &str, error: &Error) {
        self.toast(Notification::error(format!("{prefix}: {}", error.message())));
    }

    async fn ask(&self, title: &str, body: Markup, buttons: Vec<ModalButton>, accept: &str) -> Choice {
        let modal = Modal {
            title: title.to_owned(),
            body,
            buttons,
        };
        match self.context().surface.show_modal(modal).await {
            Some(ModalResponse { action, form }) if action == accept => Choice::Confirmed(form),
            _ => Choice::Dismissed,
        }
    }

    async fn confirm(&self, title: &str, message: &str, accept_label: &str, style: &str) -> bool {
        let buttons = vec![cancel_button(), ModalButton::new(accept_label, "confirm", style)];
        matches!(
            self.ask(title, confirm_body(message), buttons, "confirm").await,
            Choice::Confirmed(_)
        )
    }

    /// Follow a controller's redirect when re-invoked outside the router.
    async fn settle(&mut self, outcome: PageOutcome) {
        if let PageOutcome::Redirect(path) = outcome {
            self.router.navigate(&path).await;
        }
    }

    async fn invoke(&mut self, action: Action, form: FormData) {
        debug!(handler = %action, "dispatching action");
        match action {
            Action::Navigate(path) => {
                self.router.navigate(&path).await;
            }
            Action::Logout => self.logout().await,
            Action::BookTraining(id) => self.book_training(id).await,
            Action::CancelBooking(id) => self.cancel_booking(id).await,
            Action::CreateTraining => self.create_training().await,
            Action::EditTraining(id) => self.edit_training(id).await,
            Action::DeleteTraining(id) => self.delete_training(id).await,
            Action::CreateSubscription => self.create_subscription().await,
            Action::EditSubscription(id) => self.edit_subscription(id).await,
            Action::DeleteSubscription(id) => self.delete_subscription(id).await,
            Action::BuySubscription(id) => self.buy_subscription(id).await,
            Action::ApproveRequest(id) => self.decide_request(id, RequestStatus::Approved).await,
            Action::RejectRequest(id) => self.decide_request(id, RequestStatus::Rejected).await,
            Action::ToggleRequest(id) => {
                self.context().view.toggle_request(id);
                AdminPage::rerender(self.context());
            }
            Action::ChangePage(section, page) => self.change_page(section, page).await,
            Action::AddRoom => self.add_room().await,
            Action::EditRoom(id) => self.edit_room(id).await,
            Action::DeleteRoom(id) => self.delete_room(id).await,
            Action::SearchTrainings => self.schedule_search(filter_from_form(&form)),
            Action::FilterTrainings => {
                self.search.cancel();
                TrainingsPage::apply_filter(self.context(), filter_from_form(&form));
            }
            Action::ResetFilters => {
                self.search.cancel();
                TrainingsPage::apply_filter(self.context(), TrainingFilter::default());
                self.toast(Notification::info("Фильтры сброшены"));
            }
        }
    }

    /// Debounced filter; dropped if the user has left the schedule by then.
    fn schedule_search(&self, filter: TrainingFilter) {
        let ctx = self.context().clone();
        let history = Arc::clone(&self.history);
        self.search.call(move || {
            if history.current_path() == TRAININGS_PATH {
                TrainingsPage::apply_filter(&ctx, filter);
            }
        });
    }

    async fn logout(&mut self) {
        let outcome = self.context().session.logout().await;
        if outcome.success {
            self.toast(Notification::success("Вы вышли из системы"));
            self.router.navigate("/").await;
        } else if let Some(message) = outcome.message {
            self.toast(Notification::error(format!("Ошибка выхода: {message}")));
        }
    }

    async fn book_training(&mut self, training_id: i64) {
        match self.context().api.create_booking(training_id).await {
            Ok(()) => {
                self.toast(Notification::success("Вы успешно записались на тренировку!"));
                self.router.navigate("/my-bookings").await;
            }
            Err(error) => self.fail("Ошибка записи", &error),
        }
    }

    async fn cancel_booking(&mut self, training_id: i64) {
        if !self
            .confirm(
                "Подтверждение",
                "Вы уверены, что хотите отменить запись?",
                "Да, отменить",
                "danger",
            )
            .await
        {
            return;
        }
        match self.context().api.cancel_booking(training_id).await {
            Ok(()) => {
                self.toast(Notification::success("Запись отменена"));
                let outcome = MyBookingsPage::show(self.context()).await;
                self.settle(outcome).await;
            }
            Err(error) => self.fail("Ошибка отмены", &error),
        }
    }

    async fn create_training(&mut self) {
        if let Err(error) = self.try_create_training().await {
            self.fail("Ошибка создания", &error);
        }
    }

    async fn try_create_training(&mut self) -> Result<(), Error> {
        let ctx = self.context().clone();
        let (rooms, users) = try_join(ctx.api.rooms(), ctx.api.all_users()).await?;
        let body = training_form(None, &trainers(users), &rooms);
        let buttons = vec![cancel_button(), ModalButton::new("Создать", "create", "primary")];
        let Choice::Confirmed(form) = self.ask("Создать тренировку", body, buttons, "create").await else {
            return Ok(());
        };
        let draft = TrainingDraft::new(
            form.text("title"),
            form.text("description"),
            schedule_from_form(&form)?,
            form.parse("trainer_id"),
            form.parse("room_id"),
        )
        .map_err(|error| Error::invalid_request(error.to_string()))?;
        ctx.api.create_training(&draft).await?;
        self.toast(Notification::success("Тренировка создана!"));
        TrainingsPage::load(&ctx).await;
        Ok(())
    }

    async fn edit_training(&mut self, training_id: i64) {
        if let Err(error) = self.try_edit_training(training_id).await {
            self.fail("Ошибка обновления", &error);
        }
    }

    async fn try_edit_training(&mut self, training_id: i64) -> Result<(), Error> {
        let ctx = self.context().clone();
        let trainings = ctx.api.trainings().await?;
        let Some(training) = trainings.iter().find(|training| training.id == training_id) else {
            self.toast(Notification::error("Тренировка не найдена"));
            return Ok(());
        };
        let body = training_form(Some(training), &[], &[]);
        let buttons = vec![cancel_button(), ModalButton::new("Сохранить", "save", "primary")];
        let Choice::Confirmed(form) = self
            .ask("Редактировать тренировку", body, buttons, "save")
            .await
        else {
            return Ok(());
        };
        let update = TrainingUpdate::new(
            form.text("title"),
            form.text("description"),
            schedule_from_form(&form)?,
        )
        .map_err(|error| Error::invalid_request(error.to_string()))?;
        ctx.api.update_training(training_id, &update).await?;
        self.toast(Notification::success("Тренировка обновлена!"));
        TrainingsPage::load(&ctx).await;
        Ok(())
    }

    async fn delete_training(&mut self, training_id: i64) {
        if !self
            .confirm(
                "Удаление тренировки",
                "Вы уверены, что хотите удалить эту тренировку?",
                "Да, удалить",
                "danger",
            )
            .await
        {
            return;
        }
        match self.context().api.delete_training(training_id).await {
            Ok(()) => {
                self.toast(Notification::success("Тренировка удалена"));
                TrainingsPage::load(self.context()).await;
            }
            Err(error) => self.fail("Ошибка удаления", &error),
        }
    }

    async fn create_subscription(&mut self) {
        if let Err(error) = self.try_create_subscription().await {
            self.fail("Ошибка создания", &error);
        }
    }

    async fn try_create_subscription(&mut self) -> Result<(), Error> {
        let buttons = vec![cancel_button(), ModalButton::new("Создать", "create", "primary")];
        let Choice::Confirmed(form) = self
            .ask("Создать абонемент", subscription_form(None), buttons, "create")
            .await
        else {
            return Ok(());
        };
        let draft = subscription_draft(&form)?;
        self.context().api.create_subscription(&draft).await?;
        self.toast(Notification::success("Абонемент создан!"));
        SubscriptionsPage::show(self.context()).await;
        Ok(())
    }

    async fn edit_subscription(&mut self, subscription_id: i64) {
        if let Err(error) = self.try_edit_subscription(subscription_id).await {
            self.fail("Ошибка обновления", &error);
        }
    }

    async fn try_edit_subscription(&mut self, subscription_id: i64) -> Result<(), Error> {
        let subscriptions = self.context().api.subscriptions().await?;
        let Some(subscription) = subscriptions
            .iter()
            .find(|subscription| subscription.id == subscription_id)
        else {
            self.toast(Notification::error("Абонемент не найден"));
            return Ok(());
        };
        let buttons = vec![cancel_button(), ModalButton::new("Сохранить", "save", "primary")];
        let Choice::Confirmed(form) = self
            .ask(
                "Редактировать абонемент",
                subscription_form(Some(subscription)),
                buttons,
                "save",
            )
            .await
        else {
            return Ok(());
        };
        let draft = subscription_draft(&form)?;
        self.context()
            .api
            .update_subscription(subscription_id, &draft)
            .await?;
        self.toast(Notification::success("Абонемент обновлен!"));
        SubscriptionsPage::show(self.context()).await;
        Ok(())
    }

    async fn delete_subscription(&mut self, subscription_id: i64) {
        if !self
            .confirm(
                "Удаление абонемента",
                "Вы уверены, что хотите удалить этот абонемент?",
                "Да, удалить",
                "danger",
            )
            .await
        {
            return;
        }
        match self.context().api.delete_subscription(subscription_id).await {
            Ok(()) => {
                self.toast(Notification::success("Абонемент удален"));
                SubscriptionsPage::show(self.context()).await;
            }
            Err(error) => self.fail("Ошибка удаления", &error),
        }
    }

    async fn buy_subscription(&mut self, subscription_id: i64) {
        if !self
            .confirm(
                "Подтверждение покупки",
                "Вы уверены, что хотите подать заявку на этот абонемент? \
                 После одобрения администратором абонемент будет активирован.",
                "Да, подать заявку",
                "primary",
            )
            .await
        {
            return;
        }
        match self.context().api.request_membership(subscription_id).await {
            Ok(()) => {
                self.toast(Notification::success(
                    "Заявка на абонемент успешно отправлена! Ожидайте одобрения администратора.",
                ));
                self.router.navigate("/profile").await;
            }
            Err(error) => self.fail("Ошибка", &error),
        }
    }

    async fn decide_request(&mut self, request_id: i64, status: RequestStatus) {
        let (title, message, label, style, done) = match status {
            RequestStatus::Approved => (
                "Одобрить заявку",
                "Вы уверены, что хотите одобрить эту заявку? Будет создан активный абонемент для клиента.",
                "Да, одобрить",
                "success",
                "Заявка одобрена! Абонемент активирован.",
            ),
            _ => (
                "Отклонить заявку",
                "Вы уверены, что хотите отклонить эту заявку?",
                "Да, отклонить",
                "danger",
                "Заявка отклонена.",
            ),
        };
        if !self.confirm(title, message, label, style).await {
            return;
        }
        match self
            .context()
            .api
            .update_request_status(request_id, status)
            .await
        {
            Ok(()) => {
                self.toast(Notification::success(done));
                let outcome = AdminPage::load(self.context()).await;
                self.settle(outcome).await;
            }
            Err(error) => self.fail("Ошибка", &error),
        }
    }

    async fn change_page(&mut self, section: AdminSection, page: usize) {
        self.context()
            .view
            .update(|state| state.admin_pages.set(section, page));
        let outcome = AdminPage::load(self.context()).await;
        self.settle(outcome).await;
    }

    fn cached_room(&self, room_id: i64) -> Option<Room> {
        self.context().view.read(|state| {
            state
                .admin
                .as_ref()?
                .rooms
                .iter()
                .find(|room| room.id == room_id)
                .cloned()
        })
    }

    async fn save_room(&self, room_id: Option<i64>, form: &FormData) -> Result<(), Error> {
        let draft = room_draft(form)?;
        match room_id {
            Some(room_id) => self.context().api.update_room(room_id, &draft).await,
            None => self.context().api.create_room(&draft).await,
        }
    }

    async fn add_room(&mut self) {
        let buttons = vec![cancel_button(), ModalButton::new("Добавить", "confirm", "primary")];
        let Choice::Confirmed(form) = self
            .ask("Добавить помещение", room_form(None), buttons, "confirm")
            .await
        else {
            return;
        };
        match self.save_room(None, &form).await {
            Ok(()) => {
                self.toast(Notification::success("Помещение успешно добавлено"));
                let outcome = AdminPage::load(self.context()).await;
                self.settle(outcome).await;
            }
            Err(error) => self.fail("Ошибка создания помещения", &error),
        }
    }

    async fn edit_room(&mut self, room_id: i64) {
        let Some(room) = self.cached_room(room_id) else {
            self.toast(Notification::error("Помещение не найдено"));
            return;
        };
        let buttons = vec![cancel_button(), ModalButton::new("Сохранить", "confirm", "primary")];
        let Choice::Confirmed(form) = self
            .ask("Редактировать помещение", room_form(Some(&room)), buttons, "confirm")
            .await
        else {
            return;
        };
        match self.save_room(Some(room_id), &form).await {
            Ok(()) => {
                self.toast(Notification::success("Помещение успешно обновлено"));
                let outcome = AdminPage::load(self.context()).await;
                self.settle(outcome).await;
            }
            Err(error) => self.fail("Ошибка обновления помещения", &error),
        }
    }

    async fn delete_room(&mut self, room_id: i64) {
        let Some(room) = self.cached_room(room_id) else {
            self.toast(Notification::error("Помещение не найдено"));
            return;
        };
        let buttons = vec![cancel_button(), ModalButton::new("Да, удалить", "confirm", "danger")];
        let Choice::Confirmed(_) = self
            .ask("Удаление помещения", delete_room_body(&room), buttons, "confirm")
            .await
        else {
            return;
        };
        match self.context().api.delete_room(room_id).await {
            Ok(()) => {
                self.toast(Notification::success("Помещение успешно удалено"));
                let outcome = AdminPage::load(self.context()).await;
                self.settle(outcome).await;
            }
            Err(error) => self.fail("Ошибка удаления помещения", &error),
        }
    }

    async fn submit(&mut self, form_id: &str, form: &FormData) {
        match form_id {
            LOGIN_FORM => self.submit_login(form).await,
            REGISTER_FORM => self.submit_register(form).await,
            other => debug!(form_id = other, "submission for unknown form ignored"),
        }
    }

    async fn submit_login(&mut self, form: &FormData) {
        let surface = Arc::clone(&self.context().surface);
        surface.clear_form_error(LOGIN_FORM);
        let credentials =
            match LoginCredentials::try_from_parts(form.text("email"), form.text("password")) {
                Ok(credentials) => credentials,
                Err(error) => {
                    surface.show_form_error(LOGIN_FORM, &error.to_string());
                    return;
                }
            };
        let outcome = self.context().session.login(&credentials).await;
        if outcome.success {
            self.toast(Notification::success("Вход выполнен успешно!"));
            self.router.navigate(TRAININGS_PATH).await;
        } else {
            let message = outcome.message.unwrap_or_default();
            surface.show_form_error(LOGIN_FORM, &message);
        }
    }

    async fn submit_register(&mut self, form: &FormData) {
        let surface = Arc::clone(&self.context().surface);
        surface.clear_form_error(REGISTER_FORM);
        let phone = form.text("phone_number").trim();
        let registration = Registration::try_from_form(RegistrationForm {
            email: form.text("email"),
            password: form.text("password"),
            confirm_password: form.text("confirm_password"),
            first_name: form.text("name"),
            last_name: form.text("surname"),
            phone_number: (!phone.is_empty()).then_some(phone),
        });
        let registration = match registration {
            Ok(registration) => registration,
            Err(error) => {
                surface.show_form_error(REGISTER_FORM, &error.to_string());
                return;
            }
        };
        let outcome = self.context().session.register(&registration).await;
        if outcome.success {
            self.toast(Notification::success("Регистрация успешна! Войдите в систему."));
            self.router.navigate("/login").await;
        } else {
            let message = outcome.message.unwrap_or_default();
            surface.show_form_error(REGISTER_FORM, &message);
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.context().session.unsubscribe(self.listener);
    }
}

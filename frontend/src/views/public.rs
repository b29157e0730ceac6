//! Pages that need no data: landing, sign-in forms and not-found.

use maud::{Markup, html};

use crate::domain::User;

use super::components::{empty_state, form_input, layout};

/// Form id of the sign-in form.
pub const LOGIN_FORM: &str = "loginForm";
/// Form id of the registration form.
pub const REGISTER_FORM: &str = "registerForm";

const SERVICES: [(&str, &str, &str); 6] = [
    ("💪", "Тренажерный зал", "Современное оборудование для силовых и кардио тренировок"),
    ("🧘", "Групповые занятия", "Йога, пилатес, зумба и другие направления"),
    ("🥊", "Единоборства", "Бокс, кикбоксинг, MMA с профессиональными тренерами"),
    ("🏊", "Бассейн", "Плавание для всех уровней подготовки"),
    ("👤", "Персональные тренировки", "Индивидуальный подход и программа под ваши цели"),
    ("🍎", "Консультация диетолога", "Разработка индивидуального плана питания"),
];

const ADVANTAGES: [(&str, &str); 4] = [
    ("Профессиональные тренеры", "Сертифицированные специалисты с большим опытом"),
    ("Современное оборудование", "Новейшие тренажеры от ведущих производителей"),
    ("Удобное расписание", "Работаем с 6:00 до 23:00 без выходных"),
    ("Доступные цены", "Гибкая система абонементов и акции"),
];

const HERO_STATS: [(&str, &str); 3] = [
    ("5+", "Лет опыта"),
    ("1000+", "Довольных клиентов"),
    ("50+", "Видов тренировок"),
];

fn section_header(title: &str) -> Markup {
    html! {
        div.section-header {
            h2.section-title { (title) }
            div.section-divider {}
        }
    }
}

/// Landing page; guests get sign-up calls to action.
pub fn home_page(user: Option<&User>) -> Markup {
    let content = html! {
        div.home-page {
            section.hero-section {
                div.hero-overlay {}
                div.hero-content {
                    h1.hero-main-title { "СПОРТКЛУБ" }
                    p.hero-tagline { "Твой путь к совершенству начинается здесь" }
                    div.hero-stats {
                        @for (number, label) in HERO_STATS {
                            div.stat-item {
                                div.stat-number { (number) }
                                div.stat-label { (label) }
                            }
                        }
                    }
                    div.hero-cta {
                        @if user.is_none() {
                            a.btn-hero.btn-hero-primary href="/register" data-link { "Начать тренировки" }
                            a.btn-hero.btn-hero-secondary href="/trainings" data-link { "Расписание" }
                        } @else {
                            a.btn-hero.btn-hero-primary href="/trainings" data-link { "Перейти к тренировкам" }
                        }
                    }
                }
            }
            section.about-section {
                div.container {
                    (section_header("О нас"))
                    div.about-content {
                        p.about-text {
                            strong { "СпортКлуб" }
                            " - это современный фитнес-центр, где каждый найдет идеальную программу тренировок. \
                             Мы предлагаем профессиональный подход, новейшее оборудование и команду опытных тренеров, \
                             готовых помочь вам достичь ваших целей."
                        }
                    }
                }
            }
            section.services-section {
                div.container {
                    (section_header("Наши услуги"))
                    div.services-grid {
                        @for (icon, title, description) in SERVICES {
                            div.service-card {
                                div.service-icon { (icon) }
                                h3.service-title { (title) }
                                p.service-description { (description) }
                            }
                        }
                    }
                }
            }
            section.advantages-section {
                div.container {
                    (section_header("Почему выбирают нас"))
                    div.advantages-grid {
                        @for (index, (title, text)) in ADVANTAGES.iter().enumerate() {
                            div.advantage-item {
                                div.advantage-number { (format!("{:02}", index + 1)) }
                                h4.advantage-title { (title) }
                                p.advantage-text { (text) }
                            }
                        }
                    }
                }
            }
            @if user.is_none() {
                section.cta-section {
                    div.container {
                        div.cta-content {
                            h2.cta-title { "Готовы начать?" }
                            p.cta-text { "Присоединяйтесь к нам и начните свой путь к здоровью и красоте уже сегодня!" }
                            a.btn-cta href="/register" data-link { "Записаться на тренировку" }
                        }
                    }
                }
            }
        }
    };
    layout(content, user)
}

fn auth_card(title: &str, form_id: &str, fields: Markup, submit: &str, footer: Markup) -> Markup {
    html! {
        div.container.container-sm {
            div.auth-card {
                h1.auth-title { (title) }
                form.auth-form id=(form_id) {
                    (fields)
                    button.btn.btn-primary.btn-block type="submit" { (submit) }
                }
                p.auth-footer { (footer) }
            }
        }
    }
}

pub fn login_page(user: Option<&User>) -> Markup {
    let fields = html! {
        (form_input("email", "email", "Email", true, "example@email.com"))
        (form_input("password", "password", "Пароль", true, "••••••••"))
    };
    let footer = html! { "Нет аккаунта? " a href="/register" data-link { "Зарегистрироваться" } };
    layout(auth_card("Вход в систему", LOGIN_FORM, fields, "Войти", footer), user)
}

pub fn register_page(user: Option<&User>) -> Markup {
    let fields = html! {
        (form_input("text", "name", "Имя", true, "Иван"))
        (form_input("text", "surname", "Фамилия", true, "Иванов"))
        (form_input("email", "email", "Email", true, "example@email.com"))
        (form_input("tel", "phone_number", "Телефон", false, "+7 900 000-00-00"))
        (form_input("password", "password", "Пароль", true, "••••••••"))
        (form_input("password", "confirm_password", "Подтвердите пароль", true, "••••••••"))
    };
    let footer = html! { "Уже есть аккаунт? " a href="/login" data-link { "Войти" } };
    layout(auth_card("Регистрация", REGISTER_FORM, fields, "Зарегистрироваться", footer), user)
}

pub fn not_found_page(user: Option<&User>) -> Markup {
    let content = html! {
        div.container {
            (empty_state("404", "Страница не найдена", "К сожалению, запрашиваемая страница не существует."))
        }
    };
    layout(content, user)
}

// ===============================
// src/translate.rs
// ===============================
//
// Per-domain error translators. Urutan tetap:
//   1) exact match kode error backend (case-sensitive)
//   2) status 400..500  -> pesan "cek input" per domain
//   3) lainnya          -> pesan umum error server
// Status 0 / None selalu jadi 500.
//
use crate::client::RemoteError;
use crate::error::TranslatedError;

pub const SERVER_MESSAGE: &str = "Ошибка связи с сервером. Попробуйте позже";

pub const NO_CURRENT_GOAL: &str = "no current goal found";
pub const NO_CURRENT_GOAL_RU: &str = "Текущая цель не найдена";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownError {
    pub code: &'static str,
    pub message: &'static str,
    pub field: Option<&'static str>,
}

const fn known(code: &'static str, message: &'static str, field: Option<&'static str>) -> KnownError {
    KnownError { code, message, field }
}

#[derive(Debug)]
pub struct Translator {
    pub domain: &'static str,
    pub known: &'static [KnownError],
    pub client_message: &'static str,
}

impl Translator {
    pub fn translate(&self, raw: &RemoteError) -> TranslatedError {
        let status = match raw.status {
            Some(s) if s != 0 => s,
            _ => 500,
        };

        if let Some(k) = self.known.iter().find(|k| k.code == raw.message) {
            return TranslatedError {
                message: k.message.to_string(),
                status,
                field: k.field.map(str::to_string),
            };
        }

        let message = match raw.status {
            Some(s) if (400..500).contains(&s) => self.client_message,
            _ => SERVER_MESSAGE,
        };
        TranslatedError { message: message.to_string(), status, field: None }
    }
}

pub static BALANCE: Translator = Translator {
    domain: "balance",
    known: &[
        known("balance not found", "Баланс не найден", None),
        known("user not found", "Пользователь не найден", None),
        known("unauthorized", "Сессия истекла, войдите снова", None),
    ],
    client_message: "Не удалось получить баланс. Проверьте данные",
};

pub static CATEGORY: Translator = Translator {
    domain: "category",
    known: &[
        known("category_in_use", "Категория используется в расходах и не может быть удалена", None),
        known("category already exists", "Категория с таким названием уже существует", None),
        known("category not found", "Категория не найдена", None),
        known("name is required", "Введите название категории", None),
        known("unauthorized", "Сессия истекла, войдите снова", None),
    ],
    client_message: "Проверьте правильность данных категории",
};

pub static CREDIT: Translator = Translator {
    domain: "credit",
    known: &[
        known("invalid amount", "Введите корректную сумму", Some("amount")),
        known("amount must be positive", "Сумма должна быть больше нуля", Some("amount")),
        known("invalid date", "Введите корректную дату", Some("date")),
        known("end date before start date", "Дата окончания раньше даты начала", Some("end_date")),
        known("end date required", "Укажите дату окончания", Some("end_date")),
        known("description too long", "Слишком длинное описание", Some("description")),
        known("credit not found", "Доход не найден", None),
    ],
    client_message: "Проверьте правильность данных дохода",
};

pub static SPENDING: Translator = Translator {
    domain: "spending",
    known: &[
        known("invalid amount", "Введите корректную сумму", Some("amount")),
        known("amount must be positive", "Сумма должна быть больше нуля", Some("amount")),
        known("invalid date", "Введите корректную дату", Some("date")),
        known("end date before start date", "Дата окончания раньше даты начала", Some("end_date")),
        known("end date required", "Укажите дату окончания", Some("end_date")),
        known("description too long", "Слишком длинное описание", Some("description")),
        known("category not found", "Выберите существующую категорию", Some("category_id")),
        known("spending not found", "Расход не найден", None),
    ],
    client_message: "Проверьте правильность данных расхода",
};

pub static GOAL: Translator = Translator {
    domain: "goal",
    known: &[
        known(NO_CURRENT_GOAL, NO_CURRENT_GOAL_RU, None),
        known("goal not found", "Цель не найдена", None),
        known("invalid amount", "Введите корректную сумму цели", None),
        known("invalid wish date", "Желаемая дата должна быть в будущем", None),
        known("goal already achieved", "Цель уже достигнута", None),
    ],
    client_message: "Проверьте правильность данных цели",
};

pub static RECOMMENDATIONS: Translator = Translator {
    domain: "recommendations",
    known: &[
        known("not enough data", "Недостаточно данных для рекомендаций", None),
        known("recommendations not found", "Рекомендации пока отсутствуют", None),
    ],
    client_message: "Не удалось получить рекомендации",
};

pub static REMINDER: Translator = Translator {
    domain: "reminder",
    known: &[
        known("reminder not found", "Напоминание не найдено", None),
        known("no current goal found", "Нет текущей цели для напоминания", None),
    ],
    client_message: "Не удалось получить напоминание",
};

pub fn balance(raw: &RemoteError) -> TranslatedError {
    BALANCE.translate(raw)
}

pub fn category(raw: &RemoteError) -> TranslatedError {
    CATEGORY.translate(raw)
}

pub fn credit(raw: &RemoteError) -> TranslatedError {
    CREDIT.translate(raw)
}

pub fn spending(raw: &RemoteError) -> TranslatedError {
    SPENDING.translate(raw)
}

pub fn goal(raw: &RemoteError) -> TranslatedError {
    GOAL.translate(raw)
}

pub fn recommendations(raw: &RemoteError) -> TranslatedError {
    RECOMMENDATIONS.translate(raw)
}

pub fn reminder(raw: &RemoteError) -> TranslatedError {
    REMINDER.translate(raw)
}

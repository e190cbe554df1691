//! Form inputs and their conversion into request bodies.
//!
//! Conversion runs every local check first, so a form that converts cleanly
//! is ready to send.

use chrono::TimeZone;

use crate::shared::error::SharedError;
use crate::shared::models::{
    BoardCreate, Card, CardCreate, CardUpdate, ChecklistItem, Label, ListCreate, ListUpdate,
    LoginCredentials, RegisterData, DEFAULT_BOARD_COLOR,
};
use crate::shared::timestamp::{format_due_input, parse_due_date_input};
use crate::shared::validation;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn to_credentials(&self) -> Result<LoginCredentials, SharedError> {
        validation::login(&self.email, &self.password)?;
        Ok(LoginCredentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn to_register_data(&self) -> Result<RegisterData, SharedError> {
        let email = validation::email(&self.email)?;
        let username = validation::username(&self.username)?;
        validation::new_password(&self.password, &self.confirm_password)?;
        let full_name = Some(self.full_name.trim().to_string()).filter(|name| !name.is_empty());
        Ok(RegisterData {
            email,
            username,
            password: self.password.clone(),
            full_name,
        })
    }

    pub fn clear_passwords(&mut self) {
        self.password.clear();
        self.confirm_password.clear();
    }
}

#[derive(Debug, Clone)]
pub struct BoardForm {
    pub title: String,
    pub description: String,
    pub background_color: String,
}

impl Default for BoardForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            background_color: DEFAULT_BOARD_COLOR.to_string(),
        }
    }
}

impl BoardForm {
    pub fn to_create(&self) -> Result<BoardCreate, SharedError> {
        Ok(BoardCreate {
            title: validation::board_title(&self.title)?,
            description: validation::board_description(&self.description)?,
            background_color: Some(self.background_color.clone()),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListForm {
    pub title: String,
}

impl ListForm {
    pub fn to_create(&self) -> Result<ListCreate, SharedError> {
        Ok(ListCreate {
            title: validation::list_title(&self.title)?,
            order: None,
        })
    }

    pub fn to_update(&self) -> Result<ListUpdate, SharedError> {
        Ok(ListUpdate {
            title: Some(validation::list_title(&self.title)?),
            order: None,
        })
    }
}

/// Create and edit form for cards
#[derive(Debug, Clone, Default)]
pub struct CardForm {
    pub title: String,
    pub description: String,
    pub labels: Vec<Label>,
    /// `dd/mm/yyyy HH:mm` in local time, or blank
    pub due_input: String,
    pub checklist: Vec<ChecklistItem>,
    /// Text of the checklist item being typed
    pub checklist_input: String,
}

impl CardForm {
    /// Form prefilled from an existing card, due date shown in `tz`
    pub fn from_card<Tz: TimeZone>(card: &Card, tz: &Tz) -> Self {
        Self {
            title: card.title.clone(),
            description: card.description.clone().unwrap_or_default(),
            labels: card.labels.clone(),
            due_input: card
                .due_date
                .map(|due| format_due_input(&due, tz))
                .unwrap_or_default(),
            checklist: card.checklist.clone(),
            checklist_input: String::new(),
        }
    }

    pub fn toggle_label(&mut self, label: Label) {
        match self.labels.iter().position(|l| *l == label) {
            Some(index) => {
                self.labels.remove(index);
            }
            None => self.labels.push(label),
        }
    }

    /// Move the typed checklist text into the checklist
    pub fn add_checklist_item(&mut self) -> Result<(), SharedError> {
        let text = validation::checklist_text(&self.checklist_input)?;
        self.checklist.push(ChecklistItem::new(text));
        self.checklist_input.clear();
        Ok(())
    }

    pub fn remove_checklist_item(&mut self, item_id: &str) {
        self.checklist.retain(|item| item.id != item_id);
    }

    pub fn to_create<Tz: TimeZone>(&self, tz: &Tz) -> Result<CardCreate, SharedError> {
        let title = validation::card_title(&self.title)?;
        let description = validation::card_description(&self.description)?;
        let due_date = self.parse_due(tz)?;
        Ok(CardCreate {
            title,
            description,
            labels: self.labels.clone(),
            due_date,
            checklist: self.checklist.clone(),
            order: None,
        })
    }

    pub fn to_update<Tz: TimeZone>(&self, tz: &Tz) -> Result<CardUpdate, SharedError> {
        let title = validation::card_title(&self.title)?;
        let description = validation::card_description(&self.description)?;
        let due_date = self.parse_due(tz)?;
        Ok(CardUpdate {
            title: Some(title),
            description: Some(description.unwrap_or_default()),
            labels: Some(self.labels.clone()),
            due_date,
            checklist: Some(self.checklist.clone()),
            order: None,
        })
    }

    fn parse_due<Tz: TimeZone>(&self, tz: &Tz) -> Result<Option<chrono::DateTime<chrono::Utc>>, SharedError> {
        if self.due_input.trim().is_empty() {
            return Ok(None);
        }
        parse_due_date_input(&self.due_input, tz).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_card_form_converts_local_due_date() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let form = CardForm {
            title: "  Ship it ".to_string(),
            due_input: "16/12/2025 14:30".to_string(),
            labels: vec![Label::Red],
            ..CardForm::default()
        };
        let create = form.to_create(&tz).unwrap();
        assert_eq!(create.title, "Ship it");
        assert_eq!(create.description, None);
        assert_eq!(
            create.due_date,
            Some(Utc.with_ymd_and_hms(2025, 12, 16, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_card_form_rejects_bad_date_before_sending() {
        let form = CardForm {
            title: "Ship it".to_string(),
            due_input: "tomorrow".to_string(),
            ..CardForm::default()
        };
        let err = form.to_create(&Utc).unwrap_err();
        assert!(matches!(err, SharedError::InvalidDate { .. }));
    }

    #[test]
    fn test_toggle_label_adds_then_removes() {
        let mut form = CardForm::default();
        form.toggle_label(Label::Blue);
        form.toggle_label(Label::Green);
        form.toggle_label(Label::Blue);
        assert_eq!(form.labels, vec![Label::Green]);
    }

    #[test]
    fn test_checklist_input_moves_into_checklist() {
        let mut form = CardForm {
            checklist_input: " write tests ".to_string(),
            ..CardForm::default()
        };
        form.add_checklist_item().unwrap();
        assert_eq!(form.checklist.len(), 1);
        assert_eq!(form.checklist[0].text, "write tests");
        assert!(form.checklist_input.is_empty());
        assert!(form.add_checklist_item().is_err());
    }

    #[test]
    fn test_edit_form_round_trips_due_input() {
        let tz = FixedOffset::east_opt(-5 * 3600).unwrap();
        let mut card = crate::shared::models::fixtures::card("c1", "l1", 0);
        card.due_date = Some(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 0).unwrap());
        let form = CardForm::from_card(&card, &tz);
        assert_eq!(form.due_input, "01/01/2025 22:04");
        assert_eq!(form.to_update(&tz).unwrap().due_date, card.due_date);
    }

    #[test]
    fn test_register_form_policy() {
        let mut form = RegisterForm {
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
            password: "Secret123".to_string(),
            confirm_password: "Secret123".to_string(),
            ..RegisterForm::default()
        };
        assert!(form.to_register_data().unwrap().full_name.is_none());
        form.confirm_password = "Secret12".to_string();
        assert_eq!(form.to_register_data().unwrap_err().user_message(), "Passwords do not match");
    }

    #[test]
    fn test_board_form_defaults_to_blue() {
        let form = BoardForm {
            title: "Roadmap".to_string(),
            ..BoardForm::default()
        };
        assert_eq!(form.to_create().unwrap().background_color.as_deref(), Some(DEFAULT_BOARD_COLOR));
    }
}

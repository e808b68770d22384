//! Contact capture: the lead's data, the partially filled form and its
//! validation rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeCount {
    #[serde(rename = "1-5")]
    UpToFive,
    #[serde(rename = "6-10")]
    SixToTen,
    #[serde(rename = "10+")]
    MoreThanTen,
}

impl EmployeeCount {
    pub const ALL: [EmployeeCount; 3] = [Self::UpToFive, Self::SixToTen, Self::MoreThanTen];

    pub fn label(&self) -> &'static str {
        match self {
            Self::UpToFive => "1 a 5 funcionários",
            Self::SixToTen => "6 a 10 funcionários",
            Self::MoreThanTen => "Mais de 10 funcionários",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

/// A lead that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub employee_count: EmployeeCount,
}

/// Form contents as typed so far; any field may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub employee_count: Option<EmployeeCount>,
}

impl ContactDraft {
    /// Validates the draft and builds the contact from it.
    pub fn complete(&self) -> Result<ContactData, FieldErrors> {
        let errors = validate(self);
        match self.employee_count {
            Some(employee_count) if errors.is_empty() => Ok(ContactData {
                name: self.name.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
                company: self.company.clone(),
                employee_count,
            }),
            _ => Err(errors),
        }
    }

    pub fn value(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Name => self.name.as_str(),
            Field::Email => self.email.as_str(),
            Field::Phone => self.phone.as_str(),
            Field::Company => self.company.as_str(),
            Field::EmployeeCount => return self.employee_count.map(|c| c.label()),
        };
        Some(value).filter(|v| !v.is_empty())
    }

    fn set_text(&mut self, field: Field, value: String) -> bool {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Company => &mut self.company,
            Field::EmployeeCount => return false,
        };
        *slot = value;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Name,
    Email,
    Phone,
    Company,
    EmployeeCount,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Company,
        Self::EmployeeCount,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Nome",
            Self::Email => "E-mail",
            Self::Phone => "Telefone",
            Self::Company => "Empresa",
            Self::EmployeeCount => "Quantidade de funcionários",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "Seu nome completo",
            Self::Email => "seu@email.com",
            Self::Phone => "(11) 99999-9999",
            Self::Company => "Nome da sua empresa",
            Self::EmployeeCount => "Selecione uma opção",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldError {
    Required,
    InvalidFormat,
    MustSelectOne,
}

impl FieldError {
    /// Message shown next to `field`.
    pub fn message(&self, field: Field) -> &'static str {
        match (self, field) {
            (Self::InvalidFormat, _) => "E-mail inválido",
            (Self::MustSelectOne, _) => "Selecione o número de funcionários",
            (Self::Required, Field::Name) => "Nome é obrigatório",
            (Self::Required, Field::Email) => "E-mail é obrigatório",
            (Self::Required, Field::Phone) => "Telefone é obrigatório",
            (Self::Required, Field::Company) => "Empresa é obrigatória",
            (Self::Required, Field::EmployeeCount) => "Selecione o número de funcionários",
        }
    }
}

/// Per-field errors; a field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    fn set(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Runs every rule; later rules on the same field overwrite earlier ones.
///
/// The e-mail format rule runs after the required rule, so an empty e-mail
/// ends up reported as `InvalidFormat`.
pub fn validate(draft: &ContactDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if is_blank(&draft.name) {
        errors.set(Field::Name, FieldError::Required);
    }
    if is_blank(&draft.email) {
        errors.set(Field::Email, FieldError::Required);
    }
    if !draft.email.contains('@') {
        errors.set(Field::Email, FieldError::InvalidFormat);
    }
    if is_blank(&draft.phone) {
        errors.set(Field::Phone, FieldError::Required);
    }
    if is_blank(&draft.company) {
        errors.set(Field::Company, FieldError::Required);
    }
    if draft.employee_count.is_none() {
        errors.set(Field::EmployeeCount, FieldError::MustSelectOne);
    }

    errors
}

/// State of the contact screen: the draft, the errors from the last submit
/// and the field currently waiting for input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub draft: ContactDraft,
    pub errors: FieldErrors,
    pub editing: Option<Field>,
}

impl ContactForm {
    pub fn begin_edit(&mut self, field: Field) {
        self.editing = Some(field);
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Stores typed text into the field being edited. Returns `false` when
    /// no text field is waiting for input.
    pub fn fill(&mut self, value: String) -> bool {
        let Some(field) = self.editing else {
            return false;
        };
        if !self.draft.set_text(field, value) {
            return false;
        }
        self.errors.clear(field);
        self.editing = None;
        true
    }

    pub fn select_employee_count(&mut self, count: EmployeeCount) {
        self.draft.employee_count = Some(count);
        self.errors.clear(Field::EmployeeCount);
        self.editing = None;
    }
}

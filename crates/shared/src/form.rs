//! Add-employee form: field state, client-side validation, and the translation
//! from form vocabulary to the backend's creation payload.

use std::collections::BTreeMap;

use crate::protocol::NewEmployee;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FullName,
    Email,
    Department,
    Position,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::FullName,
        FormField::Email,
        FormField::Department,
        FormField::Position,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::FullName => "Full Name",
            FormField::Email => "Email Address",
            FormField::Department => "Department",
            FormField::Position => "Position (Employee ID)",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::FullName => "e.g., John Doe",
            FormField::Email => "e.g., john.doe@company.com",
            FormField::Department => "e.g., Engineering",
            FormField::Position => "e.g., Senior Developer",
        }
    }
}

pub type FieldErrors = BTreeMap<FormField, &'static str>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddEmployeeForm {
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    errors: FieldErrors,
}

impl AddEmployeeForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::Email => &self.email,
            FormField::Department => &self.department,
            FormField::Position => &self.position,
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FullName => &mut self.full_name,
            FormField::Email => &mut self.email,
            FormField::Department => &mut self.department,
            FormField::Position => &mut self.position,
        }
    }

    /// Replaces a field value; editing a field clears its error.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.value_mut(field) = value.into();
        self.errors.remove(&field);
    }

    pub fn clear_error(&mut self, field: FormField) {
        self.errors.remove(&field);
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Re-evaluates every rule, storing the resulting errors. Returns the
    /// creation payload only when the form is valid.
    pub fn validate(&mut self) -> Option<NewEmployee> {
        self.errors = check(self);
        self.errors.is_empty().then(|| NewEmployee::from(&*self))
    }
}

fn check(form: &AddEmployeeForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.full_name.trim().is_empty() {
        errors.insert(FormField::FullName, "Full name is required");
    }
    if form.email.trim().is_empty() {
        errors.insert(FormField::Email, "Email is required");
    } else if !is_valid_email(&form.email) {
        errors.insert(FormField::Email, "Invalid email format");
    }
    if form.department.trim().is_empty() {
        errors.insert(FormField::Department, "Department is required");
    }
    if form.position.trim().is_empty() {
        errors.insert(FormField::Position, "Position is required");
    }
    errors
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot with text on
/// both sides somewhere after it.
pub fn is_valid_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .any(|(idx, _)| idx > 0 && idx + 1 < domain.len())
}

impl From<&AddEmployeeForm> for NewEmployee {
    fn from(form: &AddEmployeeForm) -> Self {
        NewEmployee {
            name: form.full_name.trim().to_string(),
            email: form.email.trim().to_string(),
            department: form.department.trim().to_string(),
            employee_id: form.position.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> AddEmployeeForm {
        let mut form = AddEmployeeForm::default();
        form.set(FormField::FullName, " Jane Doe ");
        form.set(FormField::Email, "jane.doe@company.com");
        form.set(FormField::Department, "Engineering");
        form.set(FormField::Position, "EMP-042");
        form
    }

    #[test]
    fn valid_form_maps_position_to_employee_id() {
        let mut form = filled();
        let payload = form.validate().expect("valid form");
        assert_eq!(payload.name, "Jane Doe");
        assert_eq!(payload.employee_id, "EMP-042");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn every_blank_field_is_reported() {
        let mut form = AddEmployeeForm::default();
        form.set(FormField::FullName, "   ");
        assert!(form.validate().is_none());
        assert_eq!(form.errors().len(), 4);
        assert_eq!(form.error(FormField::FullName), Some("Full name is required"));
        assert_eq!(form.error(FormField::Email), Some("Email is required"));
    }

    #[test]
    fn invalid_email_blocks_submission() {
        let mut form = filled();
        form.set(FormField::Email, "jane@company");
        assert!(form.validate().is_none());
        assert_eq!(form.error(FormField::Email), Some("Invalid email format"));
        assert_eq!(form.errors().len(), 1);
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut form = AddEmployeeForm::default();
        form.validate();
        form.set(FormField::Department, "Ops");
        assert_eq!(form.error(FormField::Department), None);
        assert_eq!(form.error(FormField::Position), Some("Position is required"));
    }

    #[test]
    fn email_shape_rules() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@.b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a b@c.io"));
        assert!(!is_valid_email("a@b@c.io"));
        assert!(!is_valid_email("plainaddress"));
    }
}

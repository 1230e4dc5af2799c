//! Form session state: current values, touched fields and submit attempts.
//!
//! Errors are recomputed on every change, but a field's error is only
//! visible once the field has been blurred or a submit was attempted.

use std::collections::BTreeSet;

use crate::validation::{Credentials, Field, FieldErrors, Schema, ValidationError};

#[derive(Debug, Clone)]
pub struct FormState {
    schema: Schema,
    values: Credentials,
    errors: FieldErrors,
    touched: BTreeSet<Field>,
    submit_count: u32,
}

impl FormState {
    pub fn new(schema: Schema) -> Self {
        let values = Credentials::default();
        Self {
            errors: schema.validate(&values),
            schema,
            values,
            touched: BTreeSet::new(),
            submit_count: 0,
        }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn values(&self) -> &Credentials {
        &self.values
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
        self.revalidate();
    }

    /// Marks `field` as touched (focused then left).
    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Records a submit attempt and re-runs validation. Returns the errors
    /// found; an empty map means the form may be submitted.
    pub fn attempt_submit(&mut self) -> &FieldErrors {
        self.submit_count = self.submit_count.saturating_add(1);
        self.revalidate();
        &self.errors
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Every current error, shown or not.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The error a user should currently see next to `field`.
    pub fn visible_error(&self, field: Field) -> Option<&ValidationError> {
        if !(self.is_touched(field) || self.submit_count > 0) {
            return None;
        }
        self.errors.get(&field)
    }

    pub fn visible_errors(&self) -> FieldErrors {
        self.schema
            .fields()
            .iter()
            .filter_map(|field| self.visible_error(*field).map(|err| (*field, *err)))
            .collect()
    }

    /// Drops entered values and interaction history.
    pub fn reset(&mut self) {
        *self = Self::new(self.schema);
    }

    fn revalidate(&mut self) {
        self.errors = self.schema.validate(&self.values);
    }
}

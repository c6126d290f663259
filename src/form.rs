//! Form controller.
//!
//! [`Form`] ties the validation engine to a host form. It merges the option
//! layers, infers rules from the inputs, validates on change and on submit,
//! translates messages and sends valid data to the configured URL.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use formguard_config::{Layer, Options, OptionsBuilder};
use formguard_http_client::{
    FormClient, HttpClientConfig, HttpClientError, SubmitRequest, SubmitResponse,
};
use formguard_i18n::Dictionary;
use formguard_log::{debug, error, trace, warn};
use formguard_validation::{
    CustomMessages, DataMap, ErrorMessageTable, FieldRules, FieldValue, FormErrors, Method,
    MessageCache, MethodRegistry, NULL, Param, RuleParam, RuleSet, get_value_by_name, merge_data,
    panic_message, validate_data, validate_field,
};

use crate::adapter::{FormSource, FormView, StateChange};
use crate::error::Result;

/// Shown when a submission fails at the transport level.
pub const SEND_FAILED: &str = "Can not send form!";

/// Errors handed to the error callback.
#[derive(Debug, Clone, Copy)]
pub enum ErrorEvent<'a> {
    /// Client-side validation failed.
    Client(&'a FormErrors),
    /// The server answered with `validationErrors`.
    Server(&'a IndexMap<String, Vec<String>>),
}

/// Payload of the success callback.
#[derive(Debug, Clone, Copy)]
pub enum SuccessEvent<'a> {
    /// The form is valid and no URL is configured.
    NotSent,
    /// The server accepted the data.
    Sent(&'a SubmitResponse),
}

pub type ErrorCallback = Box<dyn FnMut(ErrorEvent<'_>) + Send>;
pub type SuccessCallback = Box<dyn FnMut(SuccessEvent<'_>) + Send>;

/// Result of [`Form::submit`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent.
    Invalid(FormErrors),
    /// Valid, but no URL is configured.
    NotSent,
    /// The server reported validation errors.
    Rejected(SubmitResponse),
    /// The server accepted the data.
    Accepted(SubmitResponse),
    /// The request could not be completed.
    Failed(HttpClientError),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

/// Which data [`Form::collect`] reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collect {
    All,
    Field(String),
    Fields(Vec<String>),
}

/// Builder for [`Form`].
pub struct FormBuilder<S, V> {
    source: S,
    view: V,
    options: OptionsBuilder,
    rules: Option<RuleSet>,
    methods: MethodRegistry,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
    client: Option<FormClient>,
    http_config: Option<HttpClientConfig>,
    translations_dir: Option<PathBuf>,
}

impl<S: FormSource, V: FormView> FormBuilder<S, V> {
    pub fn new(source: S, view: V) -> Self {
        Self {
            source,
            view,
            options: OptionsBuilder::new(),
            rules: None,
            methods: MethodRegistry::new(),
            on_success: None,
            on_error: None,
            client: None,
            http_config: None,
            translations_dir: None,
        }
    }

    /// Explicit options; they win over the form's own and the defaults.
    /// Repeated calls merge.
    pub fn options(mut self, explicit: Value) -> Self {
        self.options = self.options.explicit(explicit);
        self
    }

    /// Explicit options from a JSON or TOML file.
    pub fn options_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.options = self.options.file(Layer::Explicit, path)?;
        Ok(self)
    }

    /// Typed rules, overlaid on the rules of the options.
    pub fn rules(mut self, rules: RuleSet) -> Self {
        match self.rules.as_mut() {
            Some(current) => current.merge(rules),
            None => self.rules = Some(rules),
        }
        self
    }

    /// Register a method before the message table is first built.
    pub fn method<F>(mut self, rule: impl Into<String>, f: F, message: impl Into<String>) -> Self
    where
        F: Fn(&FieldValue, &Param) -> bool + Send + Sync + 'static,
    {
        self.methods.add(rule, f, message);
        self
    }

    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: FnMut(SuccessEvent<'_>) + Send + 'static,
    {
        self.on_success = Some(Box::new(f));
        self
    }

    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: FnMut(ErrorEvent<'_>) + Send + 'static,
    {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn client(mut self, client: FormClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Configuration for the submission client, used unless a client is set.
    pub fn http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = Some(config);
        self
    }

    /// Directory of `<language>.json` translation files.
    pub fn translations_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.translations_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> Result<Form<S, V>> {
        let FormBuilder {
            source,
            mut view,
            options,
            rules: typed_rules,
            methods,
            on_success,
            on_error,
            client,
            http_config,
            translations_dir,
        } = self;

        let options = options.form(source.form_options()).build()?;

        let mut rules = options.rule_set()?;
        if let Some(typed) = typed_rules {
            rules.merge(typed);
        }

        let dictionary = Dictionary::from_translations(options.translations.clone());
        if let Some(dir) = translations_dir {
            dictionary.load_from_dir(dir)?;
        }

        let client = match (client, http_config) {
            (Some(client), _) => Some(client),
            (None, Some(config)) => Some(FormClient::new(config)?),
            (None, None) => None,
        };

        let mut fields: Vec<String> = Vec::new();
        for input in source.inputs() {
            if fields.contains(&input.name) {
                continue;
            }

            let explicit = rules.get(&input.name).cloned().unwrap_or_default();
            let merged = FieldRules::merge_over_inferred(input.rules(), explicit);

            let mut change = StateChange::new().add(options.states.pristine.clone());
            for (rule, param) in merged.iter() {
                if param.param().is_truthy() {
                    change = change.add(rule);
                }
            }
            view.mark_field(&input.name, &change, None);

            rules.insert(input.name.clone(), merged);
            fields.push(input.name);
        }

        let messages = MessageCache::build(&rules, options.custom_messages(), &methods);

        debug!(
            "Form ready with {} fields and {} ruled fields",
            fields.len(),
            rules.len()
        );

        Ok(Form {
            source,
            view,
            options,
            rules,
            methods,
            messages,
            dictionary,
            data: DataMap::new(),
            fields,
            on_success,
            on_error,
            client,
        })
    }
}

/// A validated form bound to a host through [`FormSource`] and [`FormView`].
pub struct Form<S, V> {
    source: S,
    view: V,
    options: Options,
    rules: RuleSet,
    methods: MethodRegistry,
    messages: MessageCache,
    dictionary: Dictionary,
    data: DataMap,
    fields: Vec<String>,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
    client: Option<FormClient>,
}

impl<S: FormSource, V: FormView> Form<S, V> {
    /// Set up a form with explicit options. See [`FormBuilder`] for more.
    pub fn new(source: S, view: V, explicit: Value) -> Result<Self> {
        FormBuilder::new(source, view).options(explicit).build()
    }

    pub fn builder(source: S, view: V) -> FormBuilder<S, V> {
        FormBuilder::new(source, view)
    }

    /// The user is typing in a field.
    pub fn handle_input(&mut self, name: &str) {
        let change = StateChange::new()
            .remove(self.options.states.pristine.clone())
            .add(self.options.states.dirty.clone());
        self.view.mark_field(name, &change, None);
    }

    /// A field's value was committed: validate it and show the result.
    pub fn handle_change(&mut self, name: &str) -> Vec<String> {
        let change = StateChange::new().remove(self.options.states.dirty.clone());
        self.view.mark_field(name, &change, None);

        let input = self.source.input_data(name);
        merge_data(&mut self.data, input);

        let Some(field_rules) = self.rules.get(name) else {
            trace!("No rules for field {}", name);
            return Vec::new();
        };

        let value = get_value_by_name(name, &self.data).unwrap_or(&NULL);
        let table = self.messages.current();
        let errors: Vec<String> =
            validate_field(field_rules, &self.methods, value, name, &table, &self.data)
                .into_iter()
                .map(|message| self.translate(&message))
                .collect();

        self.show_field(name, &errors);
        errors
    }

    /// Validate the whole form and mark every field.
    pub fn validate(&mut self) -> FormErrors {
        self.data = self.source.data();

        let table = self.messages.current();
        let language = self.options.language.clone();
        let errors = validate_data(&self.rules, &self.methods, &self.data, &table)
            .map_messages(|message| self.dictionary.translate(&message, &language));

        let shown: Vec<(String, Vec<String>)> = errors
            .iter()
            .filter(|(field, _)| self.is_field(field))
            .map(|(field, messages)| (field.to_string(), messages.unwrap_or_default().to_vec()))
            .collect();

        for (field, messages) in shown {
            self.show_field(&field, &messages);
        }

        errors
    }

    /// Validate and, when valid, send the form to the configured URL.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let errors = self.validate();

        // Rules without a backing input are reported but never block sending.
        let blocking = errors
            .invalid_fields()
            .filter(|field| self.is_field(field))
            .count();
        if blocking > 0 {
            debug!("Form has {} invalid fields", blocking);
            self.emit_error(ErrorEvent::Client(&errors));
            return SubmitOutcome::Invalid(errors);
        }

        if !self.options.has_url() {
            self.emit_success(SuccessEvent::NotSent);
            return SubmitOutcome::NotSent;
        }

        match self.send().await {
            Ok(response) => self.handle_response(response),
            Err(e) => self.handle_failure(e),
        }
    }

    async fn send(&mut self) -> std::result::Result<SubmitResponse, HttpClientError> {
        let request = SubmitRequest::from_options(&self.options.ajax, self.data.clone())?;
        let client = match &self.client {
            Some(client) => client.clone(),
            None => {
                let client = FormClient::default_client()?;
                self.client = Some(client.clone());
                client
            }
        };
        client.submit(&request).await
    }

    fn handle_response(&mut self, response: SubmitResponse) -> SubmitOutcome {
        let Some(validation_errors) = response.validation_errors.as_ref() else {
            self.emit_success(SuccessEvent::Sent(&response));

            if self.options.redirect
                && let Some(url) = response.redirect.as_deref()
            {
                self.view.redirect(url);
            } else if self.options.clean {
                self.view.reset();
            }

            return SubmitOutcome::Accepted(response);
        };

        self.emit_error(ErrorEvent::Server(validation_errors));

        match response.base_errors() {
            Some(base) => {
                let message = base
                    .iter()
                    .map(|message| self.translate(message))
                    .collect::<Vec<_>>()
                    .join(", ");
                let change = self.form_error_change();
                self.view.set_base_message(&message);
                self.view.mark_form(&change);
            }
            None => self.view.set_base_message(""),
        }

        let shown: Vec<(String, Vec<String>)> = response
            .field_errors()
            .filter(|(field, _)| self.is_field(field))
            .map(|(field, messages)| {
                let messages = messages.iter().map(|m| self.translate(m)).collect();
                (field.to_string(), messages)
            })
            .collect();

        for (field, messages) in shown {
            self.show_field(&field, &messages);
        }

        debug!(
            "Server rejected the form ({} entries)",
            validation_errors.len()
        );
        SubmitOutcome::Rejected(response)
    }

    fn handle_failure(&mut self, e: HttpClientError) -> SubmitOutcome {
        match &e {
            HttpClientError::Status { .. } => warn!("{}", e),
            _ => warn!("Form submission failed: {}", e),
        }

        let message = self.translate(SEND_FAILED);
        let change = self.form_error_change();
        self.view.set_base_message(&message);
        self.view.mark_form(&change);

        SubmitOutcome::Failed(e)
    }

    /// Read form data into the snapshot and return what was read.
    pub fn collect(&mut self, what: Collect) -> DataMap {
        match what {
            Collect::All => {
                self.data = self.source.data();
                self.data.clone()
            }
            Collect::Field(name) => {
                let input = self.source.input_data(&name);
                merge_data(&mut self.data, input.clone());
                input
            }
            Collect::Fields(names) => {
                let mut collected = DataMap::new();
                for name in names {
                    let input = self.source.input_data(&name);
                    merge_data(&mut self.data, input.clone());
                    merge_data(&mut collected, input);
                }
                collected
            }
        }
    }

    /// Register or replace a method and refresh the message table.
    pub fn add_method<F>(&mut self, rule: impl Into<String>, f: F, message: impl Into<String>)
    where
        F: Fn(&FieldValue, &Param) -> bool + Send + Sync + 'static,
    {
        self.methods.add(rule, f, message);
        self.rebuild_messages();
    }

    /// Unregister a method. `required` cannot be removed.
    pub fn remove_method(&mut self, rule: &str) -> Result<Option<Method>> {
        let removed = self.methods.remove(rule)?;
        self.rebuild_messages();
        Ok(removed)
    }

    pub fn add_rule(&mut self, field: &str, rule: impl Into<String>, param: impl Into<RuleParam>) {
        self.rules.field_mut(field).insert(rule, param);
        self.rebuild_messages();
    }

    pub fn remove_rule(&mut self, field: &str, rule: &str) -> Option<RuleParam> {
        let removed = self.rules.get_mut(field)?.remove(rule);
        self.rebuild_messages();
        removed
    }

    /// Replace the custom messages.
    pub fn set_messages(&mut self, messages: CustomMessages) {
        self.options.messages = messages;
        self.rebuild_messages();
    }

    /// Messages are translated when shown, so nothing is rebuilt.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.options.language = language.into();
    }

    pub fn add_to_dictionary(&self, source: &str, translated: &str, language: &str) {
        self.dictionary.add_translation(source, translated, language);
    }

    /// Translate into the current language.
    pub fn translate(&self, text: &str) -> String {
        self.dictionary.translate(text, &self.options.language)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn methods(&self) -> &MethodRegistry {
        &self.methods
    }

    /// Current message table; a held snapshot survives later rebuilds.
    pub fn message_table(&self) -> Arc<ErrorMessageTable> {
        self.messages.current()
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn data(&self) -> &DataMap {
        &self.data
    }

    /// Field names in document order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn is_field(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field == name)
    }

    fn rebuild_messages(&mut self) {
        self.messages
            .rebuild(&self.rules, self.options.custom_messages(), &self.methods);
    }

    fn show_field(&mut self, field: &str, errors: &[String]) {
        let states = &self.options.states;
        let change = if errors.is_empty() {
            StateChange::new()
                .add(states.valid.clone())
                .remove(states.error.clone())
        } else {
            StateChange::new()
                .add(states.error.clone())
                .remove(states.valid.clone())
        };
        let message = errors.join(", ");
        self.view.mark_field(field, &change, Some(&message));
    }

    fn form_error_change(&self) -> StateChange {
        StateChange::new()
            .add(self.options.form_state(&self.options.states.error))
            .remove(self.options.form_state(&self.options.states.valid))
    }

    fn emit_error(&mut self, event: ErrorEvent<'_>) {
        if let Some(callback) = self.on_error.as_mut()
            && let Err(payload) = catch_unwind(AssertUnwindSafe(|| callback(event)))
        {
            error!("Error callback panicked: {}", panic_message(payload.as_ref()));
        }
    }

    fn emit_success(&mut self, event: SuccessEvent<'_>) {
        if let Some(callback) = self.on_success.as_mut()
            && let Err(payload) = catch_unwind(AssertUnwindSafe(|| callback(event)))
        {
            error!("Success callback panicked: {}", panic_message(payload.as_ref()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_outcome() {
        assert!(SubmitOutcome::Accepted(SubmitResponse::default()).is_accepted());
        assert!(!SubmitOutcome::NotSent.is_accepted());
    }
}
